//! Exit codes for the CLI

use droidsign_core::SigningError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// A signing tool exited non-zero
pub const TOOL_ERROR: i32 = 3;

/// Map a top-level error to an exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<SigningError>() {
        Some(SigningError::ToolFailed { .. }) => TOOL_ERROR,
        Some(
            SigningError::ToolNotFound { .. }
            | SigningError::NoReleaseFiles(_)
            | SigningError::InvalidPattern(_)
            | SigningError::KeystoreNotFound(_)
            | SigningError::UnsupportedArtifact(_)
            | SigningError::Config(_)
            | SigningError::Toml(_),
        ) => CONFIG_ERROR,
        _ => ERROR,
    }
}
