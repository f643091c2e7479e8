//! Fetch one day, compute its statistics and plot it.

use anyhow::{anyhow, Result};
use indicatif::ProgressBar;

use crate::{
    calendar::{date_label, to_date},
    cli::create_spinner,
    config::{Mode, RunConfig},
    fetch::Fetcher,
    plot,
    reading::DailyRecord,
};

use super::make_day_plot_file_name;

pub async fn day(config: &RunConfig) -> Result<String> {
    let fetcher = Fetcher::new(&config.base_url, &config.dataset, config.timeout)?;

    let record = fetch_day(config, &fetcher).await?;
    let plot_file_name = make_day_plot_file_name(&config.plot_dir, &record);
    plot::plot_day(&record, &plot_file_name)?;

    Ok(plot_file_name.to_string_lossy().to_string())
}

/// Fetches and scores the configured day; the store is neither read nor written.
pub async fn fetch_day(config: &RunConfig, fetcher: &Fetcher) -> Result<DailyRecord> {
    let Mode::SingleDay { day_of_year } = config.mode else {
        return Err(anyhow!("Single day mode expected, got {:?}", config.mode));
    };
    let date = to_date(config.year, day_of_year)?;

    let bar = create_spinner(format!("Downloading {}...", date_label(date)));
    let (mut record, _) = fetcher.fetch_or_empty(date, &bar).await;
    finish(&bar, &record);

    record.compute_statistics();

    Ok(record)
}

fn finish(bar: &ProgressBar, record: &DailyRecord) {
    bar.finish_with_message(format!(
        "{} samples read for {}",
        record.len(),
        record.date_label()
    ));
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    #[tokio::test]
    async fn should_fetch_day_without_touching_store() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ceil_19_12_11.dat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("a\nb\nc\nd\ne\n10:00:00\t400.0\t0.0\t0.0\n10:01:00\t0.0\t0.0\t0.0\n"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let tmp_dir = TempDir::new().unwrap();
        let mut config = RunConfig::new(2019, Mode::SingleDay { day_of_year: 345 });
        config.base_url = server.uri();
        config.store_dir = tmp_dir.path().to_path_buf();
        let fetcher = Fetcher::new(&config.base_url, &config.dataset, None).unwrap();

        let record = fetch_day(&config, &fetcher).await.unwrap();

        assert_eq!(record.day_of_year, 345);
        assert_eq!(record.cloud_fraction(), 50.0);
        assert_eq!(record.height_mean(), 400.0);
        assert_eq!(std::fs::read_dir(tmp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn should_reject_day_outside_year() {
        let config = RunConfig::new(2019, Mode::SingleDay { day_of_year: 366 });
        let fetcher = Fetcher::new("http://127.0.0.1:9/", "ceil_", None).unwrap();

        assert!(fetch_day(&config, &fetcher).await.is_err());
    }
}
