//! Daily summary of the lowest cloud layer.

use super::{CloudStats, DailyRecord, Statistics};

/// Percentage of samples with a cloud base above zero. 0 for no samples.
pub fn cloud_fraction(heights: &[f64]) -> f64 {
    if heights.is_empty() {
        return 0.0;
    }
    let cloudy = heights.iter().filter(|&&h| h > 0.0).count();

    cloudy as f64 / heights.len() as f64 * 100.0
}

impl DailyRecord {
    /// Computes min, max and mean of the primary height over cloudy samples
    /// and the cloud fraction over all samples.
    ///
    /// Without any cloudy sample only the cloud fraction changes: a scored
    /// record keeps its heights, an unscored one stays unscored since its
    /// fraction reads as 0 either way.
    pub fn compute_statistics(&mut self) {
        let cloudy: Vec<f64> = self
            .height_primary
            .iter()
            .copied()
            .filter(|&h| h > 0.0)
            .collect();
        let fraction = cloud_fraction(&self.height_primary);

        if cloudy.is_empty() {
            if let Statistics::Scored(stats) = &mut self.statistics {
                stats.cloud_fraction = fraction;
            }
            return;
        }

        let height_min = cloudy.iter().copied().fold(f64::INFINITY, f64::min);
        let height_max = cloudy.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let height_mean = cloudy.iter().sum::<f64>() / cloudy.len() as f64;

        self.statistics = Statistics::Scored(CloudStats {
            cloud_fraction: fraction,
            height_min,
            height_max,
            height_mean,
        });
    }
}

// -- Tests -------------------------------------------------------------------
