//! # Document I/O
//!
//! Whole-document JSON reads and crash-safe writes.
//!
//! ## Write-Temp-Then-Rename
//! ```text
//! write_json_atomic("products.json", &catalog)
//!      │
//!      ├── 1. write + fsync  products.json.tmp
//!      │
//!      └── 2. rename         products.json.tmp → products.json
//!
//! A crash during 1 leaves the old products.json untouched.
//! A crash after 2 leaves the new one. Rename is atomic on one file system.
//! ```

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Sibling path used while a document is being written.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replaces `path` with `bytes` via a temporary sibling file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let tmp = tmp_path(path);

    let write_tmp = || -> io::Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()
    };
    write_tmp().map_err(|e| StoreError::write(&tmp, e))?;

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        StoreError::write(path, e)
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "Document written");
    Ok(())
}

/// Serializes `value` as pretty JSON and writes it atomically.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    write_atomic(path, &bytes)
}

/// Reads a JSON document. A missing file is `Ok(None)`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::read(path, e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| StoreError::corrupt(path, e))
}

/// Creates `dir` and its parents.
pub fn ensure_dir(dir: &Path) -> StoreResult<()> {
    fs::create_dir_all(dir).map_err(|e| StoreError::write(dir, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_tmp_path_is_sibling() {
        assert_eq!(
            tmp_path(Path::new("data/products.json")),
            PathBuf::from("data/products.json.tmp")
        );
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");

        let mut value = BTreeMap::new();
        value.insert("a".to_string(), 1);
        write_json_atomic(&path, &value).unwrap();

        let back: Option<BTreeMap<String, i32>> = read_json(&path).unwrap();
        assert_eq!(back, Some(value));
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn test_missing_is_none_and_garbage_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        assert!(read_json::<Vec<i32>>(&path).unwrap().is_none());

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            read_json::<Vec<i32>>(&path),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("doc.json");
        let err = write_json_atomic(&path, &[1, 2, 3]).unwrap_err();
        assert!(err.is_write_failure());
    }
}
