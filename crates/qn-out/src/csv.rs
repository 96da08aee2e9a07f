//! CSV output backend.
//!
//! Creates `stats.csv` in the configured output directory, plus one
//! `<center>_observations.csv` and `<center>_welch.csv` per center that
//! produces observation data.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;

use qn_stats::{MetricKind, ObservationSet};

use crate::writer::OutputWriter;
use crate::{OutputResult, StatsRow};

/// Writes simulation output to CSV files in one directory.
pub struct CsvWriter {
    dir:      PathBuf,
    stats:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) `stats.csv` in `dir` and write its header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut stats = Writer::from_path(dir.join("stats.csv"))?;
        let mut header = vec!["center".to_string(), "row".to_string()];
        header.extend(MetricKind::ALL.iter().map(|m| m.label().to_string()));
        stats.write_record(&header)?;

        Ok(Self {
            dir: dir.to_path_buf(),
            stats,
            finished: false,
        })
    }

    /// Sanitize a center name for use as a file-name prefix.
    fn file_stem(center: &str) -> String {
        center
            .chars()
            .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect()
    }
}

impl OutputWriter for CsvWriter {
    fn write_stats_rows(&mut self, rows: &[StatsRow]) -> OutputResult<()> {
        for row in rows {
            let mut record = vec![row.center.clone(), row.row.to_string()];
            record.extend(row.metrics.iter().map(|v| v.to_string()));
            self.stats.write_record(&record)?;
        }
        Ok(())
    }

    fn write_observations(&mut self, set: &ObservationSet) -> OutputResult<()> {
        let path = self
            .dir
            .join(format!("{}_observations.csv", Self::file_stem(set.name())));
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["replication", "snapshot", "response_time"])?;
        for (replication, row) in set.rows().iter().enumerate() {
            for (snapshot, value) in row.iter().enumerate() {
                writer.write_record(&[
                    replication.to_string(),
                    snapshot.to_string(),
                    value.to_string(),
                ])?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    fn write_welch_curve(&mut self, center: &str, curve: &[f64]) -> OutputResult<()> {
        let path = self.dir.join(format!("{}_welch.csv", Self::file_stem(center)));
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["snapshot", "smoothed_response_time"])?;
        for (snapshot, value) in curve.iter().enumerate() {
            writer.write_record(&[snapshot.to_string(), value.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stats.flush()?;
        Ok(())
    }
}
