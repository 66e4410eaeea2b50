//! # Backup Commands
//!
//! Used by both the "Backup Now" menu entry and the scheduler tick.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CommandError;
use crate::state::AppState;
use apotheca_store::BackupReport;

/// Outcome of one backup run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupDto {
    pub dir: PathBuf,
    pub copied: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub pruned: Vec<PathBuf>,
}

impl From<BackupReport> for BackupDto {
    fn from(r: BackupReport) -> Self {
        BackupDto {
            dir: r.dir,
            copied: r.copied,
            skipped: r.skipped,
            pruned: r.pruned,
        }
    }
}

/// Takes a full backup now.
pub fn backup_now(state: &AppState) -> Result<BackupDto, CommandError> {
    backup_at(state, Local::now())
}

/// Takes a full backup stamped with `now`.
///
/// Compacts the sale journal first so the copy holds a complete
/// `sales.json`. Missing or unreadable files are skipped, not fatal.
pub fn backup_at(state: &AppState, now: DateTime<Local>) -> Result<BackupDto, CommandError> {
    let report = state.store().backup(state.inventory().ledger(), now)?;

    info!(
        dir = %report.dir.display(),
        copied = report.copied.len(),
        pruned = report.pruned.len(),
        "Backup finished"
    );
    Ok(report.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sale::{add_to_cart, checkout_at};
    use crate::commands::test_support::seeded;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_backup_at() {
        let dir = TempDir::new().unwrap();
        let mut state = seeded(&dir);
        let now = Local.with_ymd_and_hms(2026, 10, 16, 14, 3, 11).unwrap();
        add_to_cart(&mut state, "A100", "2").unwrap();
        checkout_at(&mut state, now).unwrap();

        let backup = backup_at(&state, now).unwrap();

        assert_eq!(backup.dir, dir.path().join("backups").join("backup_20261016_140311"));
        assert!(backup.skipped.is_empty());
        assert!(backup.dir.join("sales.json").is_file());
        assert!(backup.dir.join("monthly").join("2026-10.json").is_file());
    }
}
