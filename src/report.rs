//! CSV reports of per-step simulation output.
//!
//! Reporting is how a run records data for later analysis; it is distinct
//! from logging, which describes the crate's own behavior. The writer
//! appends serializable rows to a CSV file, flushing after every row so a
//! crash never loses a completed step.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::{create_dir_all, File};
use std::path::Path;

use csv::Writer;
use serde::{Deserialize, Serialize};

use crate::error::EpisimError;

/// One row of a status-count report: the tally of one status on one day.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusCountRow {
    pub day: u64,
    pub status: String,
    pub count: usize,
}

/// Writes report rows to a single CSV file.
pub struct ReportWriter {
    writer: Writer<File>,
}

impl ReportWriter {
    /// Creates the report file, and any parent directories that do not
    /// exist yet.
    ///
    /// # Errors
    ///
    /// Returns an `EpisimError` if the path does not end in `.csv` or the
    /// file cannot be created.
    pub fn new(path: &Path) -> Result<Self, EpisimError> {
        match path.extension().and_then(OsStr::to_str) {
            Some("csv") => {
                create_dir_all(path.parent().expect("Either root or empty path provided"))?;
                let file = File::create(path)?;
                Ok(ReportWriter {
                    writer: Writer::from_writer(file),
                })
            }
            _ => Err(EpisimError::ReportError(
                "Report output files must be CSVs at this time".to_string(),
            )),
        }
    }

    /// Appends one row, with columns following the items of the row
    /// struct, and flushes it to disk.
    ///
    /// # Errors
    ///
    /// Returns an `EpisimError` if serialization or the write fails.
    pub fn write_row<T: Serialize>(&mut self, row: &T) -> Result<(), EpisimError> {
        self.writer.serialize(row)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Appends one [`StatusCountRow`] per status from a counts query, in
    /// sorted status order so files are stable across runs.
    ///
    /// # Errors
    ///
    /// Returns an `EpisimError` if any row fails to write.
    pub fn write_counts(
        &mut self,
        day: u64,
        counts: &HashMap<&'static str, usize>,
    ) -> Result<(), EpisimError> {
        let mut entries: Vec<(&&str, &usize)> = counts.iter().collect();
        entries.sort();
        for (status, count) in entries {
            self.write_row(&StatusCountRow {
                day,
                status: (*status).to_string(),
                count: *count,
            })?;
        }
        Ok(())
    }
}
