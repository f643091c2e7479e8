//! Batch over a range of days: reuse stored days, fetch and save the rest,
//! then plot cloud fraction per day.

use anyhow::Result;
use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::{
    calendar::to_date,
    cli::create_progress_bar,
    config::RunConfig,
    fetch::Fetcher,
    parquet::{self, load_record, store_file_name},
    plot,
    reading::DailyRecord,
};

use super::make_range_plot_file_name;

pub async fn range(config: &RunConfig) -> Result<String> {
    let (first, last) = config.day_range()?;
    let fetcher = Fetcher::new(&config.base_url, &config.dataset, config.timeout)?;

    let days = process_days(config, &fetcher, first, last).await?;

    let plot_file_name = make_range_plot_file_name(&config.plot_dir, config.year, first, last);
    plot::plot_range(&days, &plot_file_name)?;

    Ok(plot_file_name.to_string_lossy().to_string())
}

/// Cloud fraction for every day in `first..=last`, in order.
pub async fn process_days(
    config: &RunConfig,
    fetcher: &Fetcher,
    first: u32,
    last: u32,
) -> Result<Vec<(u32, f64)>> {
    let count = (last + 1).saturating_sub(first);
    let bar = create_progress_bar(count as u64, "Processing days".to_string());
    let mut days = Vec::with_capacity(count as usize);

    for day_of_year in first..=last {
        let record = load_or_fetch(config, fetcher, day_of_year, &bar).await?;
        let cloud_fraction = record.cloud_fraction();

        bar.println(format!(
            "{} cloud fraction that day: {:.2} %",
            record.date_label(),
            cloud_fraction
        ));
        days.push((day_of_year, cloud_fraction));
        bar.inc(1);
    }
    bar.finish_with_message("Days processed");

    Ok(days)
}

/// Loads the day from its store file when there is one, otherwise fetches,
/// scores and saves it. Log lines go through `bar` so it is redrawn intact.
async fn load_or_fetch(
    config: &RunConfig,
    fetcher: &Fetcher,
    day_of_year: u32,
    bar: &ProgressBar,
) -> Result<DailyRecord> {
    let date = to_date(config.year, day_of_year)?;
    let file_path = store_file_name(&config.store_dir, config.year, day_of_year);

    if file_path.is_file() {
        bar.suspend(|| info!("Open and read {}", file_path.display()));
        return load_record(&file_path);
    }

    bar.suspend(|| info!("Fetching {}", fetcher.url_for(date)));

    let (mut record, _) = fetcher.fetch_or_empty(date, &ProgressBar::hidden()).await;
    record.compute_statistics();
    if record.statistics.is_scored() {
        debug!(
            "Cloud base min {} m, max {} m, mean {:.1} m",
            record.height_min(),
            record.height_max(),
            record.height_mean()
        );
    }
    let saved = parquet::save_record(&record, &config.store_dir)?;
    bar.suspend(|| info!("Saved data to: {}", saved.display()));

    Ok(record)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDate;
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::{config::Mode, parquet::save_record, reading::CloudStats, reading::Statistics};

    use super::*;

    const FEED: &str = "a\nb\nc\nd\ne\n00:10:00\t300.0\t0.0\t0.0\n00:20:00\t0.0\t0.0\t0.0\n00:30:00\t0.0\t0.0\t0.0\n00:40:00\t900.0\t0.0\t0.0\n";

    fn config_for(server: &MockServer, tmp_dir: &TempDir) -> RunConfig {
        let mut config = RunConfig::new(
            2016,
            Mode::Range {
                start: (2, 14),
                end: (2, 15),
            },
        );
        config.base_url = server.uri();
        config.store_dir = tmp_dir.path().to_path_buf();
        config
    }

    fn stored_day_fixture() -> DailyRecord {
        let mut record = DailyRecord::empty(NaiveDate::from_ymd_opt(2016, 2, 14).unwrap());
        record.push_sample(1.0, [500.0, 0.0, 0.0]);
        record.statistics = Statistics::Scored(CloudStats {
            cloud_fraction: 12.5,
            height_min: 500.0,
            height_max: 500.0,
            height_mean: 500.0,
        });
        record
    }

    #[tokio::test]
    async fn should_load_stored_day_and_fetch_missing_day() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ceil_16_02_14.dat"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ceil_16_02_15.dat"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
            .expect(1)
            .mount(&server)
            .await;

        let tmp_dir = TempDir::new().unwrap();
        let config = config_for(&server, &tmp_dir);
        save_record(&stored_day_fixture(), tmp_dir.path()).unwrap();
        let fetcher = Fetcher::new(&config.base_url, &config.dataset, None).unwrap();

        let (first, last) = config.day_range().unwrap();
        let days = process_days(&config, &fetcher, first, last).await.unwrap();

        assert_eq!(days, vec![(45, 12.5), (46, 50.0)]);
        assert_eq!(fs::read_dir(tmp_dir.path()).unwrap().count(), 2);

        let saved = load_record(&tmp_dir.path().join("2016_046.parquet")).unwrap();
        assert_eq!(saved.len(), 4);
        assert_eq!(saved.height_mean(), 600.0);
        assert_eq!(saved.cloud_fraction(), 50.0);
    }

    #[tokio::test]
    async fn should_save_empty_day_when_feed_is_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let tmp_dir = TempDir::new().unwrap();
        let config = config_for(&server, &tmp_dir);
        let fetcher = Fetcher::new(&config.base_url, &config.dataset, None).unwrap();

        let days = process_days(&config, &fetcher, 60, 60).await.unwrap();
        let saved = load_record(&tmp_dir.path().join("2016_060.parquet")).unwrap();

        assert_eq!(days, vec![(60, 0.0)]);
        assert!(saved.is_empty());
        assert_eq!(saved.date, NaiveDate::from_ymd_opt(2016, 2, 29).unwrap());
        assert_eq!(saved.statistics, Statistics::Unscored);
    }

    #[tokio::test]
    async fn should_process_nothing_for_reversed_range() {
        let server = MockServer::start().await;
        let tmp_dir = TempDir::new().unwrap();
        let config = config_for(&server, &tmp_dir);
        let fetcher = Fetcher::new(&config.base_url, &config.dataset, None).unwrap();

        let days = process_days(&config, &fetcher, 46, 45).await.unwrap();

        assert!(days.is_empty());
        assert_eq!(fs::read_dir(tmp_dir.path()).unwrap().count(), 0);
    }
}
