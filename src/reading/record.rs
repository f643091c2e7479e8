//! The daily ceilometer record and its optional summary statistics.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{date_label, day_of_year};

/// Summary of the lowest cloud layer over one day.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CloudStats {
    /// Percentage of samples with a cloud base, 0 to 100.
    pub cloud_fraction: f64,
    pub height_min: f64,
    pub height_max: f64,
    pub height_mean: f64,
}

/// Whether the summary has been computed for a record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Statistics {
    #[default]
    Unscored,
    Scored(CloudStats),
}

impl Statistics {
    /// The computed summary, or all zeros when there is none.
    pub fn values(&self) -> CloudStats {
        match self {
            Statistics::Unscored => CloudStats::default(),
            Statistics::Scored(stats) => *stats,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, Statistics::Scored(_))
    }
}

/// One day of ceilometer samples.
///
/// The five sample sequences always have the same length, which is zero when
/// the feed was empty or could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub day_of_year: u32,
    /// Day-of-year plus fractional local time, one per sample.
    pub julian_time: Vec<f64>,
    /// Local time in hours, shifted by 24 after each midnight crossing.
    pub local_time: Vec<f64>,
    /// Cloud base heights in meters; 0 means no cloud at that layer.
    pub height_primary: Vec<f64>,
    pub height_secondary: Vec<f64>,
    pub height_tertiary: Vec<f64>,
    pub statistics: Statistics,
}

impl DailyRecord {
    /// A record with no samples for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        DailyRecord {
            date,
            day_of_year: day_of_year(date),
            julian_time: Vec::new(),
            local_time: Vec::new(),
            height_primary: Vec::new(),
            height_secondary: Vec::new(),
            height_tertiary: Vec::new(),
            statistics: Statistics::Unscored,
        }
    }

    /// Appends one sample at `local_time` hours.
    pub fn push_sample(&mut self, local_time: f64, heights: [f64; 3]) {
        self.julian_time
            .push(self.day_of_year as f64 + local_time / 24.0);
        self.local_time.push(local_time);
        self.height_primary.push(heights[0]);
        self.height_secondary.push(heights[1]);
        self.height_tertiary.push(heights[2]);
    }

    pub fn len(&self) -> usize {
        self.height_primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height_primary.is_empty()
    }

    /// Date as `YYYY_MM_DD`.
    pub fn date_label(&self) -> String {
        date_label(self.date)
    }

    pub fn year_label(&self) -> String {
        self.date.year().to_string()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn cloud_fraction(&self) -> f64 {
        self.statistics.values().cloud_fraction
    }

    pub fn height_min(&self) -> f64 {
        self.statistics.values().height_min
    }

    pub fn height_max(&self) -> f64 {
        self.statistics.values().height_max
    }

    pub fn height_mean(&self) -> f64 {
        self.statistics.values().height_mean
    }
}

// -- Tests -------------------------------------------------------------------
