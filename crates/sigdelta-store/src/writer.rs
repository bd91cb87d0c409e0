//! Writers for signature tables and delta files
//!
//! Uses temp -> rename so readers never observe a partial file

use std::fs;
use std::path::Path;

use sigdelta_core::{Delta, SignatureTable, VersionTransition};

use crate::errors::{io_error, Result};
use crate::file_format::FileFormat;
use crate::format_v0::DeltaFileV0;

/// Write a delta file in format v0, encoding chosen by extension
///
/// # Errors
///
/// Fails on unknown extensions and I/O errors.
pub fn write_delta(path: &Path, transition: &VersionTransition, delta: &Delta) -> Result<()> {
    let format = FileFormat::require("write_delta", path)?;
    let file = DeltaFileV0::from_delta(transition, delta);
    let content = format.encode("write_delta", &file)?;
    atomic_write("write_delta", path, content.as_bytes())?;

    tracing::debug!(path = %path.display(), transition = %transition, "wrote delta");
    Ok(())
}

/// Write a full signature table, encoding chosen by extension
///
/// # Errors
///
/// Fails on unknown extensions and I/O errors.
pub fn write_table(path: &Path, table: &SignatureTable) -> Result<()> {
    let format = FileFormat::require("write_table", path)?;
    let content = format.encode("write_table", table)?;
    atomic_write("write_table", path, content.as_bytes())?;

    tracing::debug!(path = %path.display(), table_len = table.len(), "wrote table");
    Ok(())
}

/// Atomically write bytes to a file, creating parent directories
pub(crate) fn atomic_write(operation: &str, target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error(operation, parent, e))?;
        }
    }

    let temp_path = target_path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| io_error(operation, &temp_path, e))?;
    fs::rename(&temp_path, target_path).map_err(|e| io_error(operation, target_path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("deltas").join("8.3-8.4.json");

        atomic_write("test", &target, b"{}").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"{}");
    }

    #[test]
    fn test_no_tmp_files_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("8.4.yaml");

        write_table(&target, &SignatureTable::new()).unwrap();

        let tmp_count = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .count();
        assert_eq!(tmp_count, 0);
    }

    #[test]
    fn test_write_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let err = write_table(&temp_dir.path().join("8.4.txt"), &SignatureTable::new()).unwrap_err();
        assert_eq!(err.op(), Some("write_table"));
    }
}
