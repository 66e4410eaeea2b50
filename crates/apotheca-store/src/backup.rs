//! # Backups
//!
//! Full copies of the data directory into timestamped folders.
//!
//! ## Layout
//! ```text
//! backups/
//! ├── backup_20261016_140311/
//! │   ├── products.json
//! │   ├── sales.json
//! │   └── monthly/
//! │       └── 2026-10.json
//! └── backup_20261016_140311_1/      ← same second, suffixed
//! ```
//!
//! ## Failure Policy
//! A backup never stops the application. A source file that is missing or
//! fails to copy is logged and skipped; the rest of the run continues. Only
//! failing to create the backup folder itself is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::fs::ensure_dir;

const PREFIX: &str = "backup_";

/// What one backup run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupReport {
    /// The folder created for this run.
    pub dir: PathBuf,
    /// Files copied, relative to the data directory.
    pub copied: Vec<PathBuf>,
    /// Files that were missing or failed to copy.
    pub skipped: Vec<PathBuf>,
    /// Old backup folders removed by retention.
    pub pruned: Vec<PathBuf>,
}

/// Folder name for a backup taken at `now`.
///
/// ```rust
/// use apotheca_store::backup::backup_dir_name;
/// use chrono::{Local, TimeZone};
///
/// let now = Local.with_ymd_and_hms(2026, 10, 16, 14, 3, 11).unwrap();
/// assert_eq!(backup_dir_name(now), "backup_20261016_140311");
/// ```
pub fn backup_dir_name(now: DateTime<Local>) -> String {
    format!("{}{}", PREFIX, now.format("%Y%m%d_%H%M%S"))
}

/// Copies `files` (relative to `data_dir`) into a new folder under
/// `backup_root`.
pub fn create_backup(
    data_dir: &Path,
    files: &[PathBuf],
    backup_root: &Path,
    now: DateTime<Local>,
) -> StoreResult<BackupReport> {
    ensure_dir(backup_root)?;
    let dir = reserve_dir(backup_root, &backup_dir_name(now))?;

    let mut report = BackupReport {
        dir: dir.clone(),
        ..BackupReport::default()
    };

    for relative in files {
        let source = data_dir.join(relative);
        let target = dir.join(relative);

        if !source.is_file() {
            warn!(file = %source.display(), "Backup source missing, skipped");
            report.skipped.push(relative.clone());
            continue;
        }

        match copy_file(&source, &target) {
            Ok(bytes) => {
                debug!(file = %relative.display(), bytes, "Backed up");
                report.copied.push(relative.clone());
            }
            Err(e) => {
                warn!(file = %source.display(), error = %e, "Backup copy failed, skipped");
                report.skipped.push(relative.clone());
            }
        }
    }

    info!(
        dir = %dir.display(),
        copied = report.copied.len(),
        skipped = report.skipped.len(),
        "Backup created"
    );
    Ok(report)
}

fn copy_file(source: &Path, target: &Path) -> io::Result<u64> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, target)
}

/// Creates `root/name`, or `root/name_1`, `root/name_2`, ... if taken.
fn reserve_dir(root: &Path, name: &str) -> StoreResult<PathBuf> {
    let mut candidate = root.join(name);
    let mut n = 0u32;
    loop {
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                n += 1;
                candidate = root.join(format!("{}_{}", name, n));
            }
            Err(e) => return Err(StoreError::write(&candidate, e)),
        }
    }
}

/// Backup folders under `root`, oldest first.
pub fn list_backups(root: &Path) -> StoreResult<Vec<PathBuf>> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::read(root, e)),
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| StoreError::read(root, e))?.path();
        let is_backup = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(false, |n| n.starts_with(PREFIX));
        if is_backup && path.is_dir() {
            dirs.push(path);
        }
    }

    dirs.sort_by_key(|p| sort_key(p));
    Ok(dirs)
}

/// `backup_YYYYMMDD_HHMMSS[_N]` → (timestamp part, N), so `_10` sorts after `_9`.
fn sort_key(path: &Path) -> (String, u32) {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let stamp_len = PREFIX.len() + "YYYYMMDD_HHMMSS".len();

    match name.get(..stamp_len) {
        Some(stamp) => {
            let suffix = name[stamp_len..]
                .trim_start_matches('_')
                .parse()
                .unwrap_or(0);
            (stamp.to_string(), suffix)
        }
        None => (name.to_string(), 0),
    }
}

/// Deletes the oldest backup folders so that at most `keep` remain.
///
/// A folder that cannot be removed is logged and left in place.
pub fn prune_backups(root: &Path, keep: usize) -> StoreResult<Vec<PathBuf>> {
    let dirs = list_backups(root)?;
    let excess = dirs.len().saturating_sub(keep);

    let mut removed = Vec::new();
    for dir in dirs.into_iter().take(excess) {
        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                debug!(dir = %dir.display(), "Old backup removed");
                removed.push(dir);
            }
            Err(e) => warn!(dir = %dir.display(), error = %e, "Could not remove old backup"),
        }
    }
    Ok(removed)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 16, 14, 3, 11).unwrap()
    }

    #[test]
    fn test_same_second_gets_suffix() {
        let data = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();

        let first = create_backup(data.path(), &[], root.path(), now()).unwrap();
        let second = create_backup(data.path(), &[], root.path(), now()).unwrap();

        assert!(first.dir.ends_with("backup_20261016_140311"));
        assert!(second.dir.ends_with("backup_20261016_140311_1"));
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let data = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        fs::create_dir(data.path().join("monthly")).unwrap();
        fs::write(data.path().join("products.json"), "{}").unwrap();
        fs::write(data.path().join("monthly").join("2026-10.json"), "{}").unwrap();

        let files = vec![
            PathBuf::from("products.json"),
            PathBuf::from("sales.json"),
            PathBuf::from("monthly/2026-10.json"),
        ];
        let report = create_backup(data.path(), &files, root.path(), now()).unwrap();

        assert_eq!(report.skipped, vec![PathBuf::from("sales.json")]);
        assert_eq!(report.copied.len(), 2);
        assert!(report.dir.join("monthly").join("2026-10.json").is_file());
    }

    #[test]
    fn test_sort_key_orders_suffixes_numerically() {
        let mut names = vec![
            PathBuf::from("backup_20261016_140311_10"),
            PathBuf::from("backup_20261016_140311_2"),
            PathBuf::from("backup_20261016_140311"),
            PathBuf::from("backup_20261015_090000"),
        ];
        names.sort_by_key(|p| sort_key(p));
        assert_eq!(
            names,
            vec![
                PathBuf::from("backup_20261015_090000"),
                PathBuf::from("backup_20261016_140311"),
                PathBuf::from("backup_20261016_140311_2"),
                PathBuf::from("backup_20261016_140311_10"),
            ]
        );
    }

    #[test]
    fn test_prune_keeps_newest() {
        let root = TempDir::new().unwrap();
        for name in [
            "backup_20261014_000000",
            "backup_20261015_000000",
            "backup_20261016_000000",
        ] {
            fs::create_dir(root.path().join(name)).unwrap();
        }
        fs::create_dir(root.path().join("unrelated")).unwrap();

        let removed = prune_backups(root.path(), 2).unwrap();
        assert_eq!(removed.len(), 1);
        assert!(removed[0].ends_with("backup_20261014_000000"));
        assert_eq!(list_backups(root.path()).unwrap().len(), 2);
        assert!(root.path().join("unrelated").exists());
    }
}
