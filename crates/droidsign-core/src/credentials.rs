//! Signing credentials

use std::path::{Path, PathBuf};

use crate::error::{Result, SigningError};

/// Credentials passed through to the signing tools.
///
/// Passwords are opaque secrets. `Debug` is hand-written so a credentials
/// value can be traced without ever printing them; redaction happens here,
/// at the logging boundary, not via any global masking state.
#[derive(Clone)]
pub struct SigningCredentials {
    /// Path to the keystore file
    pub keystore: PathBuf,
    /// Key alias within the keystore
    pub key_alias: String,
    /// Keystore password
    pub keystore_password: String,
    /// Key password; when absent the tools fall back to the keystore password
    pub key_password: Option<String>,
}

impl SigningCredentials {
    /// Create credentials, checking that the keystore exists on disk
    pub fn new(
        keystore: PathBuf,
        key_alias: String,
        keystore_password: String,
        key_password: Option<String>,
    ) -> Result<Self> {
        if !keystore.exists() {
            return Err(SigningError::KeystoreNotFound(keystore));
        }
        if key_alias.is_empty() {
            return Err(SigningError::config("Key alias must not be empty"));
        }
        Ok(Self {
            keystore,
            key_alias,
            keystore_password,
            key_password,
        })
    }

    /// Keystore path
    pub fn keystore(&self) -> &Path {
        &self.keystore
    }
}

impl std::fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningCredentials")
            .field("keystore", &self.keystore)
            .field("key_alias", &self.key_alias)
            .field("keystore_password", &"<redacted>")
            .field(
                "key_password",
                &self.key_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
