//! Diff errors with structured context.
//!
//! Every error maps to an [`ErrorCategory`] so the CLI can pick a
//! sysexits.h-compliant exit code and print an actionable suggestion.

use std::io;

use hexdiff_common::ErrorCategory;
use serde_json::{Value, json};
use thiserror::Error;

/// Configuration rejected before any input is read.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no input streams given")]
    EmptyStreamList,

    #[error("highlight palette is empty")]
    EmptyPalette,

    #[error("unknown highlight mode '{0}' (expected off, underline, fixed[:color] or cycle)")]
    UnknownHighlightMode(String),

    #[error("unknown color '{0}'")]
    UnknownColor(String),

    #[error("unknown highlight target '{0}' (expected fg or bg)")]
    UnknownTarget(String),

    #[error("{names} stream names given for {streams} inputs")]
    NameCountMismatch { names: usize, streams: usize },
}

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: io::Error },

    #[error("failed to seek in {stream}: {source}")]
    Seek { stream: String, source: io::Error },

    #[error("failed to read {stream} at offset {offset}: {source}")]
    Read {
        stream: String,
        offset: u64,
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),

    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl DiffError {
    /// Returns the error category for programmatic handling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            DiffError::Open { .. } => ErrorCategory::NotFound,
            DiffError::Seek { .. } | DiffError::Read { .. } | DiffError::Write(_) => {
                ErrorCategory::External
            }
            DiffError::Serialize(_) => ErrorCategory::Internal,
            DiffError::Config(_) => ErrorCategory::InvalidInput,
        }
    }

    /// Returns the operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            DiffError::Open { .. } => "open",
            DiffError::Seek { .. } => "seek",
            DiffError::Read { .. } => "read",
            DiffError::Write(_) => "write",
            DiffError::Serialize(_) => "serialize",
            DiffError::Config(_) => "configure",
        }
    }

    /// Returns structured context about the error for debugging.
    pub fn context(&self) -> Value {
        match self {
            DiffError::Open { path, source } => json!({
                "operation": self.operation(),
                "path": path,
                "reason": source.to_string()
            }),
            DiffError::Seek { stream, source } => json!({
                "operation": self.operation(),
                "stream": stream,
                "reason": source.to_string()
            }),
            DiffError::Read {
                stream,
                offset,
                source,
            } => json!({
                "operation": self.operation(),
                "stream": stream,
                "offset": offset,
                "reason": source.to_string()
            }),
            DiffError::Write(source) => json!({
                "operation": self.operation(),
                "reason": source.to_string()
            }),
            DiffError::Serialize(source) => json!({
                "operation": self.operation(),
                "reason": source.to_string()
            }),
            DiffError::Config(source) => json!({
                "operation": self.operation(),
                "reason": source.to_string()
            }),
        }
    }

    /// Returns a helpful suggestion for resolving the error.
    pub fn suggestion(&self) -> String {
        match self {
            DiffError::Open { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => "Check that the path exists.".to_string(),
                io::ErrorKind::PermissionDenied => {
                    "Permission denied. Check file permissions.".to_string()
                }
                _ => "Check that the path names a readable regular file.".to_string(),
            },
            DiffError::Seek { .. } => {
                "Inputs must be seekable. Copy pipes or devices to a regular file first."
                    .to_string()
            }
            DiffError::Read { .. } => {
                "The input failed mid-read. Check the device or whether the file is being modified."
                    .to_string()
            }
            DiffError::Write(_) => {
                "Output could not be written. Check the destination or pipe.".to_string()
            }
            DiffError::Serialize(_) => "This is a bug. Please report it.".to_string(),
            DiffError::Config(_) => "Run 'hexdiff --help' for valid options.".to_string(),
        }
    }

    /// Converts to UNIX sysexits.h-compliant exit code.
    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    /// Returns structured JSON representation of this error.
    pub fn to_json(&self) -> Value {
        json!({
            "message": self.to_string(),
            "category": self.category().as_str(),
            "context": self.context(),
            "suggestion": self.suggestion()
        })
    }
}
