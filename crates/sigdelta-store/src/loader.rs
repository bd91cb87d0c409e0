//! Loaders for signature tables, delta files and delta directories

use std::fs;
use std::path::{Path, PathBuf};

use sigdelta_core::errors::ExError;
use sigdelta_core::{Delta, DeltaChain, SignatureTable, VersionTransition};

use crate::errors::{from_core, io_error, Result};
use crate::file_format::FileFormat;
use crate::format_v0::DeltaFileV0;

/// Load a full signature table (`.json`, `.yaml` or `.yml`)
///
/// # Errors
///
/// Fails on unreadable files, unknown extensions, or content that is not a
/// valid table (missing return slot, repeated base name, ...).
pub fn load_table(path: &Path) -> Result<SignatureTable> {
    let format = FileFormat::require("load_table", path)?;
    let content = fs::read_to_string(path).map_err(|e| io_error("load_table", path, e))?;
    let table: SignatureTable = format.decode("load_table", path, &content)?;

    tracing::debug!(path = %path.display(), table_len = table.len(), "loaded table");
    Ok(table)
}

/// Load and validate one delta file
///
/// # Errors
///
/// Fails on unreadable or malformed files and on the validation rules of
/// [`DeltaFileV0::into_parts`].
pub fn load_delta(path: &Path) -> Result<(VersionTransition, Delta)> {
    let format = FileFormat::require("load_delta", path)?;
    let content = fs::read_to_string(path).map_err(|e| io_error("load_delta", path, e))?;
    let file: DeltaFileV0 = format.decode("load_delta", path, &content)?;
    let (transition, delta) = file.into_parts(path)?;

    tracing::debug!(
        path = %path.display(),
        transition = %transition,
        delta_len = delta.len(),
        "loaded delta"
    );
    Ok((transition, delta))
}

/// Load every delta file in `dir` into a chain
///
/// Files are picked by extension; anything else in the directory is ignored.
/// The chain is ordered by transition, not by file name.
///
/// # Errors
///
/// Fails if the directory cannot be read, any delta file fails to load, or
/// the transitions do not form a contiguous chain without duplicates. A
/// failing file's own error is kept as the source.
pub fn load_chain_dir(dir: &Path) -> Result<DeltaChain> {
    let entries = fs::read_dir(dir).map_err(|e| io_error("load_chain_dir", dir, e))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_error("load_chain_dir", dir, e))?;
        let path = entry.path();
        if path.is_file() && FileFormat::from_path(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort();

    let links = paths
        .iter()
        .map(|path| {
            load_delta(path).map_err(|e| {
                ExError::new(e.kind())
                    .with_op("load_chain_dir")
                    .with_message(format!("{}: cannot load delta file", dir.display()))
                    .with_source(e)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let chain = DeltaChain::from_entries(links).map_err(|e| {
        let err = from_core("load_chain_dir", e);
        let message = format!("{}: {}", dir.display(), err.message());
        err.with_message(message)
    })?;

    tracing::debug!(dir = %dir.display(), chain_len = chain.len(), "loaded chain");
    Ok(chain)
}
