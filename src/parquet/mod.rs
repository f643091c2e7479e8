//! Handles saving daily records to disk in the _parquet_ file format and
//! reading them back.

pub mod record;

pub use record::{load_record, save_record, store_file_name};
