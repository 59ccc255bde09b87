//! Append-only event logbook.
//!
//! Every notable event is recorded as a `(category, event, value)` triple,
//! appended to a CSV file for easy inspection and mirrored into the SQLite
//! `events` table for durable stats. Logging is fire-and-forget: failures
//! on either side are swallowed and must never block timing code.

use std::fs::OpenOptions;
use std::path::PathBuf;

use chrono::Utc;

use super::{data_dir, Database};
use crate::error::CoreError;

const HEADER: [&str; 4] = ["timestamp", "type", "event", "value"];

/// CSV logbook with a SQLite mirror.
pub struct Logbook {
    path: PathBuf,
    csv_enabled: bool,
}

impl Logbook {
    pub fn new(path: PathBuf, csv_enabled: bool) -> Self {
        Self { path, csv_enabled }
    }

    /// The default logbook location, `~/.config/companion/logs.csv`.
    pub fn default_path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("logs.csv"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Record one triple. Infallible by contract; CSV and database errors
    /// are swallowed independently so one sink failing never silences the
    /// other.
    pub fn record(&self, db: &Database, category: &str, event: &str, value: &str) {
        if self.csv_enabled {
            let _ = self.append_csv(category, event, value);
        }
        let _ = db.append_event(category, event, value);
    }

    fn append_csv(&self, category: &str, event: &str, value: &str) -> Result<(), CoreError> {
        let new_file = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if new_file {
            writer.write_record(HEADER)?;
        }
        writer.write_record([
            Utc::now().to_rfc3339().as_str(),
            category,
            event,
            value,
        ])?;
        writer.flush()?;
        Ok(())
    }
}
