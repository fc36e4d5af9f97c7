//! Error types for signing operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for signing operations
pub type Result<T> = std::result::Result<T, SigningError>;

/// Signing-related errors
#[derive(Debug, Error)]
pub enum SigningError {
    /// Signing tool not found
    #[error("Signing tool not found: {tool}. {hint}")]
    ToolNotFound { tool: String, hint: String },

    /// Signing tool exited non-zero
    #[error("Signing tool failed: {tool} (exit code {status:?}): {stderr}")]
    ToolFailed {
        tool: String,
        status: Option<i32>,
        stderr: String,
    },

    /// File extension is neither .apk nor .aab
    #[error("Cannot sign {0}: not an APK or AAB")]
    UnsupportedArtifact(PathBuf),

    /// Glob pattern matched no release files
    #[error("No release files matched pattern: {0}")]
    NoReleaseFiles(String),

    /// Invalid glob pattern
    #[error("Invalid file pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    /// Keystore file missing on disk
    #[error("Keystore not found at {0}")]
    KeystoreNotFound(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SigningError {
    /// Create a configuration error with a message
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
