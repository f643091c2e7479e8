//! Run configuration handed to the commands.

use std::{path::PathBuf, time::Duration};

use anyhow::{anyhow, Result};

use crate::{
    calendar::month_day_to_day_of_year,
    fetch::{DEFAULT_BASE_URL, DEFAULT_DATASET},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Fetch and plot a single day without touching the store.
    SingleDay { day_of_year: u32 },
    /// Process every day between two `(month, day)` pairs, inclusive.
    Range { start: (u32, u32), end: (u32, u32) },
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub year: i32,
    pub mode: Mode,
    pub dataset: String,
    pub base_url: String,
    pub store_dir: PathBuf,
    pub plot_dir: PathBuf,
    pub timeout: Option<Duration>,
}

impl RunConfig {
    pub fn new(year: i32, mode: Mode) -> Self {
        RunConfig {
            year,
            mode,
            dataset: DEFAULT_DATASET.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            store_dir: PathBuf::from("."),
            plot_dir: PathBuf::from("."),
            timeout: None,
        }
    }

    /// Inclusive day-of-year bounds of the run.
    pub fn day_range(&self) -> Result<(u32, u32)> {
        match self.mode {
            Mode::SingleDay { day_of_year } => Ok((day_of_year, day_of_year)),
            Mode::Range { start, end } => Ok((
                month_day_to_day_of_year(self.year, start.0, start.1)?,
                month_day_to_day_of_year(self.year, end.0, end.1)?,
            )),
        }
    }
}

/// Parses a `MM-DD` pair.
pub fn parse_month_day(s: &str) -> Result<(u32, u32)> {
    let (month, day) = s
        .split_once('-')
        .ok_or_else(|| anyhow!("Expected MM-DD, got `{s}`"))?;

    Ok((month.trim().parse()?, day.trim().parse()?))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_month_day() {
        assert_eq!(parse_month_day("12-31").unwrap(), (12, 31));
        assert_eq!(parse_month_day("1-5").unwrap(), (1, 5));
        assert!(parse_month_day("1231").is_err());
        assert!(parse_month_day("ab-01").is_err());
    }

    #[test]
    fn should_compute_day_range_for_whole_leap_year() {
        let config = RunConfig::new(
            2016,
            Mode::Range {
                start: (1, 1),
                end: (12, 31),
            },
        );

        assert_eq!(config.day_range().unwrap(), (1, 366));
    }

    #[test]
    fn should_reject_date_outside_year() {
        let config = RunConfig::new(
            2019,
            Mode::Range {
                start: (2, 29),
                end: (3, 1),
            },
        );

        assert!(config.day_range().is_err());
    }

    #[test]
    fn should_use_archive_defaults() {
        let config = RunConfig::new(2019, Mode::SingleDay { day_of_year: 345 });

        assert_eq!(config.day_range().unwrap(), (345, 345));
        assert_eq!(config.dataset, "ceil_");
        assert_eq!(config.base_url, "https://skywatch.colorado.edu/data/");
        assert_eq!(config.timeout, None);
    }
}
