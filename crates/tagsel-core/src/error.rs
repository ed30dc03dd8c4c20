//! Error types and exit codes for tagsel
//!
//! Selector parsing and matching never fail on user input; malformed specs
//! are logged and skipped. Errors only come from the edges: configuration,
//! manifests and CLI usage.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (invalid manifest or config)

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for the tagsel binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - invalid manifest or config (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur outside the pure selection core
#[derive(Error, Debug)]
pub enum TagselError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("config not found: {path:?}")]
    ConfigNotFound { path: PathBuf },

    #[error("invalid config in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("invalid manifest: {reason}")]
    InvalidManifest { reason: String },

    #[error("class {class} is defined more than once")]
    DuplicateClass { class: String },

    #[error("class {class} has unknown base {base}")]
    UnknownBaseClass { class: String, base: String },

    #[error("unknown test class: {class}")]
    UnknownClass { class: String },

    #[error("ambiguous test class {class} (candidates: {candidates})")]
    AmbiguousClass { class: String, candidates: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl TagselError {
    /// Create an error for an invalid manifest
    pub fn invalid_manifest(reason: impl std::fmt::Display) -> Self {
        TagselError::InvalidManifest {
            reason: reason.to_string(),
        }
    }

    /// Create an error for a config file that could not be parsed
    pub fn invalid_config(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        TagselError::InvalidConfig {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TagselError::UnknownFormat(_) | TagselError::UsageError(_) => ExitCode::Usage,

            TagselError::ConfigNotFound { .. }
            | TagselError::InvalidConfig { .. }
            | TagselError::InvalidManifest { .. }
            | TagselError::DuplicateClass { .. }
            | TagselError::UnknownBaseClass { .. }
            | TagselError::UnknownClass { .. }
            | TagselError::AmbiguousClass { .. } => ExitCode::Data,

            TagselError::Io(_)
            | TagselError::Json(_)
            | TagselError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            TagselError::UnknownFormat(_) => "unknown_format",
            TagselError::UsageError(_) => "usage_error",
            TagselError::ConfigNotFound { .. } => "config_not_found",
            TagselError::InvalidConfig { .. } => "invalid_config",
            TagselError::InvalidManifest { .. } => "invalid_manifest",
            TagselError::DuplicateClass { .. } => "duplicate_class",
            TagselError::UnknownBaseClass { .. } => "unknown_base_class",
            TagselError::UnknownClass { .. } => "unknown_class",
            TagselError::AmbiguousClass { .. } => "ambiguous_class",
            TagselError::Io(_) => "io_error",
            TagselError::Json(_) => "json_error",
            TagselError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for tagsel operations
pub type Result<T> = std::result::Result<T, TagselError>;
