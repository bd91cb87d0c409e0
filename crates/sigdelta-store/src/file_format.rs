//! Extension-driven choice between JSON and YAML encodings

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{encode_error, parse_error, unsupported_format, Result};

/// On-disk encoding of a table or delta file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Same as [`FileFormat::from_path`], reporting unknown extensions as an error
    pub(crate) fn require(operation: &str, path: &Path) -> Result<Self> {
        Self::from_path(path).ok_or_else(|| unsupported_format(operation, path))
    }

    pub(crate) fn decode<T: DeserializeOwned>(
        self,
        operation: &str,
        path: &Path,
        content: &str,
    ) -> Result<T> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| parse_error(operation, path, e)),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(operation, path, e)),
        }
    }

    pub(crate) fn encode<T: Serialize>(self, operation: &str, value: &T) -> Result<String> {
        match self {
            Self::Json => serde_json::to_string_pretty(value)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| encode_error(operation, e)),
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| encode_error(operation, e)),
        }
    }
}
