//! Scatter plots of a day's cloud base heights and of cloud fraction over a
//! range of days.

use std::{ops::Range, path::Path};

use anyhow::Result;
use plotters::prelude::*;

use crate::reading::DailyRecord;

const SIZE: (u32, u32) = (1024, 768);

/// Caption for a day plot, cloud fraction rounded to one decimal.
pub fn day_title(record: &DailyRecord) -> String {
    format!(
        "{} Cloud Fraction {:.1}%",
        record.date_label(),
        record.cloud_fraction()
    )
}

/// Plots local time against the primary cloud base height.
pub fn plot_day(record: &DailyRecord, file_path: &Path) -> Result<()> {
    let points: Vec<(f64, f64)> = record
        .local_time
        .iter()
        .copied()
        .zip(record.height_primary.iter().copied())
        .collect();

    scatter(
        file_path,
        &day_title(record),
        ("Local Time [h]", "Cloud Base Height [m]"),
        &points,
        (0.0..24.0, 0.0..1000.0),
    )
}

/// Plots day of year against cloud fraction.
pub fn plot_range(days: &[(u32, f64)], file_path: &Path) -> Result<()> {
    let points: Vec<(f64, f64)> = days.iter().map(|&(doy, cf)| (doy as f64, cf)).collect();

    scatter(
        file_path,
        "Cloud Fraction",
        ("Day of year", "Cloud Fraction"),
        &points,
        (1.0..366.0, 0.0..100.0),
    )
}

fn scatter(
    file_path: &Path,
    caption: &str,
    (x_desc, y_desc): (&str, &str),
    points: &[(f64, f64)],
    (x_fallback, y_fallback): (Range<f64>, Range<f64>),
) -> Result<()> {
    let x_range = axis_range(points.iter().map(|p| p.0), x_fallback);
    let y_range = axis_range(points.iter().map(|p| p.1), y_fallback);

    let root = BitMapBackend::new(file_path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 5.percent_height()))
        .margin(1.percent())
        .x_label_area_size(8.percent_height())
        .y_label_area_size(8.percent_width())
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 2, BLACK.filled())),
    )?;

    root.present()?;

    Ok(())
}

/// Data extent padded by 5%, or `fallback` when there is nothing to span.
fn axis_range(values: impl Iterator<Item = f64>, fallback: Range<f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() {
        return fallback;
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;

    (min - pad)..(max + pad)
}

// -- Tests -------------------------------------------------------------------
