//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::{command, Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::{parse_month_day, Mode, RunConfig},
    fetch::{DEFAULT_BASE_URL, DEFAULT_DATASET},
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub options: Options,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and plot a single day
    Day {
        /// Year of the day
        #[arg(long, default_value_t = 2019)]
        year: i32,
        /// Day of year, starting at 1
        #[arg(long, default_value_t = 345)]
        doy: u32,
    },
    /// Fetch or load every day of a range, save statistics and plot cloud fraction
    Range {
        /// Year of the range
        #[arg(long, default_value_t = 2016)]
        year: i32,
        /// First day as MM-DD
        #[arg(long, default_value = "01-01")]
        start: String,
        /// Last day as MM-DD
        #[arg(long, default_value = "12-31")]
        end: String,
    },
}

#[derive(Args)]
pub struct Options {
    /// Dataset tag placed ahead of the date in the feed name
    #[arg(long, global = true, default_value = DEFAULT_DATASET)]
    pub dataset: String,

    /// Location of the feed archive
    #[arg(long, global = true, env = "CEILOMETER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory holding the per-day store files
    #[arg(long, global = true, default_value = ".")]
    pub store_dir: PathBuf,

    /// Directory the plots are written to
    #[arg(long, global = true, default_value = ".")]
    pub plot_dir: PathBuf,

    /// Request timeout in seconds; requests wait indefinitely when unset
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

impl Cli {
    pub fn run_config(&self) -> Result<RunConfig> {
        let (year, mode) = match &self.command {
            Commands::Day { year, doy } => (*year, Mode::SingleDay { day_of_year: *doy }),
            Commands::Range { year, start, end } => (
                *year,
                Mode::Range {
                    start: parse_month_day(start)?,
                    end: parse_month_day(end)?,
                },
            ),
        };

        let mut config = RunConfig::new(year, mode);
        config.dataset.clone_from(&self.options.dataset);
        config.base_url.clone_from(&self.options.base_url);
        config.store_dir.clone_from(&self.options.store_dir);
        config.plot_dir.clone_from(&self.options.plot_dir);
        config.timeout = self.options.timeout.map(Duration::from_secs);

        Ok(config)
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    ProgressBar::new(size).with_message(message).with_style(style)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_range_config() {
        let cli = Cli::try_parse_from([
            "ceilometer",
            "range",
            "--year",
            "2016",
            "--start",
            "02-14",
            "--end",
            "02-15",
            "--store-dir",
            "/tmp/ceil",
        ])
        .unwrap();
        let config = cli.run_config().unwrap();

        assert_eq!(config.year, 2016);
        assert_eq!(
            config.mode,
            Mode::Range {
                start: (2, 14),
                end: (2, 15)
            }
        );
        assert_eq!(config.day_range().unwrap(), (45, 46));
        assert_eq!(config.store_dir, PathBuf::from("/tmp/ceil"));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn should_build_day_config_with_defaults() {
        let cli = Cli::try_parse_from(["ceilometer", "day", "--timeout", "30"]).unwrap();
        let config = cli.run_config().unwrap();

        assert_eq!(config.year, 2019);
        assert_eq!(config.mode, Mode::SingleDay { day_of_year: 345 });
        assert_eq!(config.dataset, "ceil_");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn should_reject_malformed_range_date() {
        let cli = Cli::try_parse_from(["ceilometer", "range", "--start", "0101"]).unwrap();

        assert!(cli.run_config().is_err());
    }

    #[test]
    fn should_create_progress_bar_with_length() {
        let pb = create_progress_bar(366, "Days".to_string());
        pb.set_position(45);

        assert_eq!(pb.length(), Some(366));
        assert_eq!(pb.position(), 45);
    }
}
