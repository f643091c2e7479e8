//! Save and restore a daily record as a parquet file.
//!
//! Samples go into five Float64 columns. The date, day-of-year, year and,
//! for a scored record, the four statistics are kept in the schema metadata.

use std::{
    collections::HashMap,
    fs::File,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{ArrayRef, Float64Array},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use parquet::{
    arrow::{arrow_reader::ParquetRecordBatchReaderBuilder, ArrowWriter},
    basic::Compression,
    file::properties::WriterProperties,
};
use tracing::debug;

use crate::{
    calendar::parse_date_label,
    reading::{CloudStats, DailyRecord, Statistics},
};

const COLUMNS: [&str; 5] = ["jul", "loc", "h1", "h2", "h3"];
const STATISTIC_KEYS: [&str; 4] = ["mean", "min", "max", "cf"];

/// Store file for a day: `<dir>/<year>_<doy, 3 digits>.parquet`.
pub fn store_file_name(store_dir: &Path, year: i32, day_of_year: u32) -> PathBuf {
    store_dir.join(format!("{}_{:03}.parquet", year, day_of_year))
}

/// Writes `record` to its store file in `store_dir`, replacing any previous one.
pub fn save_record(record: &DailyRecord, store_dir: &Path) -> Result<PathBuf> {
    let file_path = store_file_name(store_dir, record.year(), record.day_of_year);
    debug!("Saving data to: {}", file_path.display());

    let mut metadata = HashMap::new();
    metadata.insert("date".to_string(), record.date_label());
    metadata.insert("doy".to_string(), record.day_of_year.to_string());
    metadata.insert("year".to_string(), record.year_label());
    if let Statistics::Scored(stats) = record.statistics {
        metadata.insert("mean".to_string(), stats.height_mean.to_string());
        metadata.insert("min".to_string(), stats.height_min.to_string());
        metadata.insert("max".to_string(), stats.height_max.to_string());
        metadata.insert("cf".to_string(), stats.cloud_fraction.to_string());
    }

    let fields: Vec<Field> = COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Float64, false))
        .collect();
    let schema = Arc::new(Schema::new_with_metadata(fields, metadata));

    let sequences = [
        &record.julian_time,
        &record.local_time,
        &record.height_primary,
        &record.height_secondary,
        &record.height_tertiary,
    ];
    let columns: Vec<ArrayRef> = sequences
        .iter()
        .map(|values| Arc::new(Float64Array::from(values.to_vec())) as ArrayRef)
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::UNCOMPRESSED)
        .build();

    let file = File::create(&file_path)
        .with_context(|| format!("Cannot create {}", file_path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(file_path)
}

/// Reads a record back from a store file.
///
/// Statistics are restored only when all four keys are present; otherwise
/// the record comes back unscored.
pub fn load_record(file_path: &Path) -> Result<DailyRecord> {
    let file = File::open(file_path)
        .with_context(|| format!("Cannot open {}", file_path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let metadata = builder.schema().metadata().clone();
    let reader = builder.build()?;

    let mut sequences: [Vec<f64>; 5] = Default::default();
    for batch in reader {
        let batch = batch?;
        for (values, name) in sequences.iter_mut().zip(COLUMNS) {
            let column = batch
                .column_by_name(name)
                .ok_or_else(|| anyhow!("Column `{name}` missing"))?;
            let array = column
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| anyhow!("Column `{name}` is not Float64"))?;
            values.extend(array.values().iter().copied());
        }
    }

    let required = |key: &str| {
        metadata
            .get(key)
            .ok_or_else(|| anyhow!("Field `{key}` missing from {}", file_path.display()))
    };
    let date = parse_date_label(required("date")?)?;
    let day_of_year: u32 = required("doy")?.parse().context("Field `doy`")?;
    let year = required("year")?;
    if *year != date.format("%Y").to_string() {
        return Err(anyhow!("Field `year` {year} does not match date {date}"));
    }

    let statistics = read_statistics(&metadata)?;
    let [julian_time, local_time, height_primary, height_secondary, height_tertiary] = sequences;

    Ok(DailyRecord {
        date,
        day_of_year,
        julian_time,
        local_time,
        height_primary,
        height_secondary,
        height_tertiary,
        statistics,
    })
}

fn read_statistics(metadata: &HashMap<String, String>) -> Result<Statistics> {
    if !STATISTIC_KEYS.iter().all(|key| metadata.contains_key(*key)) {
        return Ok(Statistics::Unscored);
    }

    let value = |key: &str| -> Result<f64> {
        metadata[key]
            .parse()
            .with_context(|| format!("Statistic `{key}`"))
    };

    Ok(Statistics::Scored(CloudStats {
        cloud_fraction: value("cf")?,
        height_min: value("min")?,
        height_max: value("max")?,
        height_mean: value("mean")?,
    }))
}

// -- Tests -------------------------------------------------------------------
