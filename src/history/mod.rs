// src/history/mod.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

/// `2026-Oct-16-09:14:03`
pub const TIMESTAMP_FORMAT: &str = "%Y-%h-%d-%H:%M:%S";

/// Append-only audit trail of one ETL run, one timestamped line per milestone.
pub struct History {
    path: PathBuf,
}

impl History {
    /// Point at `path`; the parent directory is created if needed but the
    /// file itself is only created on the first record.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating log directory {:?}", parent))?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `message` stamped with the current local time.
    pub fn record(&self, message: &str) -> Result<()> {
        self.record_at(Local::now(), message)
    }

    /// Append `message` stamped with `at`.
    pub fn record_at<Tz: TimeZone>(&self, at: DateTime<Tz>, message: &str) -> Result<()>
    where
        Tz::Offset: std::fmt::Display,
    {
        info!("{}", message.trim_end());
        let line = format_line(&at, message);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening run log {:?}", &self.path))?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("appending to run log {:?}", &self.path))?;
        Ok(())
    }
}

fn format_line<Tz: TimeZone>(at: &DateTime<Tz>, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}: {}\n", at.format(TIMESTAMP_FORMAT), message)
}
