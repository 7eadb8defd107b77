//! Upload payload construction and response decoding.

use crate::error::BackendError;
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};
use shared::payload::AnalysisPayload;
use shared::permit::PermitType;
use std::path::{Path, PathBuf};

/// One document read from disk, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, BackendError> {
        let bytes = std::fs::read(path).map_err(|source| BackendError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());
        Ok(Self::new(name, bytes))
    }

    /// Only the first path of a multi-file selection is ever sent.
    pub fn first_of(paths: &[PathBuf]) -> Result<Self, BackendError> {
        let first = paths.first().ok_or(BackendError::NoFile)?;
        Self::from_path(first)
    }

    pub fn mime_type(&self) -> &'static str {
        let lower = self.name.to_lowercase();
        if lower.ends_with(".pdf") {
            "application/pdf"
        } else if lower.ends_with(".docx") {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        } else {
            "application/octet-stream"
        }
    }
}

/// Build the three-part multipart body: file, permit type, JSON mode list.
pub fn build_form(
    file: UploadedFile,
    permit_type: PermitType,
    modes: &[String],
) -> Result<Form, BackendError> {
    let modes_json = serde_json::to_string(modes)?;
    let mime = file.mime_type();
    let part = Part::bytes(file.bytes)
        .file_name(file.name)
        .mime_str(mime)
        .map_err(BackendError::Network)?;

    Ok(Form::new()
        .part("file", part)
        .text("permitType", permit_type.as_str())
        .text("analysisModes", modes_json))
}

/// Decoded `POST /api/upload` response.
///
/// The envelope is `{ "metadata": <payload>, ... }`. A response without a
/// usable `metadata` object still succeeds; downstream screens then show
/// their "no data" state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadResponse {
    pub metadata: Option<AnalysisPayload>,
    pub extra: Map<String, Value>,
}

impl UploadResponse {
    pub fn from_json(value: Value) -> Result<Self, BackendError> {
        let Value::Object(mut root) = value else {
            return Err(BackendError::InvalidEnvelope);
        };
        let metadata = root.remove("metadata").and_then(AnalysisPayload::from_value);
        Ok(Self {
            metadata,
            extra: root,
        })
    }
}

/// Human-readable size, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
