pub mod day;
pub mod range;

use std::path::{Path, PathBuf};

pub use day::day;
pub use range::range;

use crate::reading::DailyRecord;

pub fn make_day_plot_file_name(plot_dir: &Path, record: &DailyRecord) -> PathBuf {
    plot_dir.join(format!("{}_{:03}.png", record.year(), record.day_of_year))
}

pub fn make_range_plot_file_name(plot_dir: &Path, year: i32, first: u32, last: u32) -> PathBuf {
    plot_dir.join(format!("{}_{:03}-{:03}_cf.png", year, first, last))
}

// -- Tests -------------------------------------------------------------------
