//! Parsing of the tab-delimited ceilometer feed.
//!
//! The feed opens with five header lines. Every following line holds a
//! `HH:MM:SS` time and at least three cloud base heights in meters.

use chrono::NaiveDate;
use thiserror::Error;

use super::DailyRecord;

/// Number of header lines ahead of the samples.
pub const HEADER_LINES: usize = 5;

#[derive(Debug, Error, PartialEq)]
pub enum FeedError {
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

/// Turns clock times into a running local time across midnight crossings.
///
/// When a time comes in below the previous one the offset grows by 24 and is
/// added on top of the candidate, which already carries the old offset. The
/// resulting time scale is what stored records use.
#[derive(Debug, Default)]
pub struct Rollover {
    offset: f64,
    previous: f64,
}

impl Rollover {
    pub fn next(&mut self, hours: f64, minutes: f64, seconds: f64) -> f64 {
        let mut local = hours + minutes / 60.0 + seconds / 3600.0 + self.offset;
        if local < self.previous {
            self.offset += 24.0;
            local += self.offset;
        }
        self.previous = local;

        local
    }
}

/// Parses the feed text into a record for `date`.
pub fn parse_feed(text: &str, date: NaiveDate) -> Result<DailyRecord, FeedError> {
    let mut record = DailyRecord::empty(date);
    let mut rollover = Rollover::default();

    for (index, line) in text.split_inclusive('\n').enumerate().skip(HEADER_LINES) {
        let line_number = index + 1;
        let malformed = |reason: String| FeedError::MalformedLine {
            line: line_number,
            reason,
        };

        let columns: Vec<&str> = line
            .split('\t')
            .filter(|field| field.chars().count() > 1)
            .collect();
        if columns.len() < 4 {
            return Err(malformed(format!(
                "expected a time and three heights, found {} fields",
                columns.len()
            )));
        }

        let (hours, minutes, seconds) = parse_clock(columns[0]).map_err(malformed)?;
        let local = rollover.next(hours, minutes, seconds);

        let mut heights = [0.0; 3];
        for (slot, field) in heights.iter_mut().zip(&columns[1..4]) {
            *slot = parse_number(field).map_err(malformed)?;
        }

        record.push_sample(local, heights);
    }

    Ok(record)
}

// Fixed-width `HH:MM:SS`: hours at 0..2, minutes at 3..5, seconds at 6..8.
fn parse_clock(field: &str) -> Result<(f64, f64, f64), String> {
    let part = |range: std::ops::Range<usize>| {
        field
            .get(range)
            .ok_or_else(|| format!("time `{}` is too short", field.trim()))
            .and_then(parse_number)
    };

    Ok((part(0..2)?, part(3..5)?, part(6..8)?))
}

fn parse_number(field: &str) -> Result<f64, String> {
    let trimmed = field.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| format!("`{trimmed}` is not a number"))
}

// -- Tests -------------------------------------------------------------------
