//! # Monthly Repository
//!
//! One document per calendar month: `monthly/YYYY-MM.json`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::fs::{read_json, write_json_atomic};
use apotheca_core::{MonthlyAggregate, PeriodKey};

/// Reads and writes monthly aggregate documents.
#[derive(Debug, Clone)]
pub struct MonthlyRepository {
    dir: PathBuf,
}

impl MonthlyRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        MonthlyRepository { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `period`.
    pub fn path_for(&self, period: PeriodKey) -> PathBuf {
        self.dir.join(format!("{}.json", period))
    }

    /// Loads one month, `None` if it has no document.
    pub fn load(&self, period: PeriodKey) -> StoreResult<Option<MonthlyAggregate>> {
        read_json(&self.path_for(period))
    }

    /// Loads every month, oldest first.
    ///
    /// Files whose stem is not a `YYYY-MM` period are ignored.
    pub fn load_all(&self) -> StoreResult<Vec<MonthlyAggregate>> {
        let mut aggregates = Vec::new();
        for (period, path) in self.list()? {
            let Some(aggregate) = read_json::<MonthlyAggregate>(&path)? else {
                continue;
            };
            if aggregate.period != period {
                warn!(
                    path = %path.display(),
                    period = %aggregate.period,
                    "Monthly document name does not match its period"
                );
            }
            if !aggregate.is_consistent() {
                warn!(period = %aggregate.period, "Monthly totals do not add up");
            }
            aggregates.push(aggregate);
        }

        debug!(months = aggregates.len(), "Monthly aggregates loaded");
        Ok(aggregates)
    }

    /// Writes one month's document.
    pub fn save(&self, aggregate: &MonthlyAggregate) -> StoreResult<()> {
        write_json_atomic(&self.path_for(aggregate.period), aggregate)
    }

    /// Deletes one month's document. A missing document is not an error.
    pub fn remove(&self, period: PeriodKey) -> StoreResult<()> {
        let path = self.path_for(period);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::write(&path, e)),
        }
    }

    /// Month documents on disk, sorted by period.
    pub fn list(&self) -> StoreResult<Vec<(PeriodKey, PathBuf)>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::read(&self.dir, e)),
        };

        let mut found = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StoreError::read(&self.dir, e))?.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let period = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<PeriodKey>().ok());
            if let Some(period) = period {
                found.push((period, path));
            }
        }

        found.sort();
        Ok(found)
    }
}
