//! Configuration loading
//!
//! Settings come from `droidsign.toml` in the working directory or one of
//! its ancestors, with CLI flags layered on top by the binary. Passwords are
//! never stored in the file; it only names the environment variables they
//! are read from.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Result, SigningError};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "droidsign.toml";

/// Default environment variable for the keystore password
pub const KEYSTORE_PASSWORD_ENV: &str = "DROIDSIGN_KEYSTORE_PASSWORD";

/// Default environment variable for the key password
pub const KEY_PASSWORD_ENV: &str = "DROIDSIGN_KEY_PASSWORD";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Glob pattern for release files
    pub files: Option<String>,

    /// Signing settings
    pub signing: SigningSection,

    /// Explicit tool path overrides
    pub tools: ToolOverrides,
}

/// `[signing]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SigningSection {
    /// Keystore file path
    pub keystore: Option<PathBuf>,

    /// Key alias within the keystore
    pub key_alias: Option<String>,

    /// Environment variable holding the keystore password
    pub keystore_password_env: Option<String>,

    /// Environment variable holding the key password
    pub key_password_env: Option<String>,

    /// Keep `-temp` intermediate artifacts after signing (default true)
    pub keep_intermediates: Option<bool>,
}

/// `[tools]` section: explicit paths that skip toolchain discovery
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolOverrides {
    pub zipalign: Option<PathBuf>,
    pub apksigner: Option<PathBuf>,
    pub jarsigner: Option<PathBuf>,
}

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    info!(path = %path.display(), "loading config");

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find the configuration file in a directory or its parents
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            info!(path = %candidate.display(), "found config file");
            return Some(candidate);
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from a directory, or fall back to defaults
pub fn load_config_or_default(dir: &Path) -> (Config, Option<PathBuf>) {
    match find_config(dir) {
        Some(path) => match load_config(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                (Config::default(), None)
            }
        },
        None => (Config::default(), None),
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(files) = &config.files {
        if files.trim().is_empty() {
            return Err(SigningError::config("files pattern must not be empty"));
        }
    }
    if let Some(alias) = &config.signing.key_alias {
        if alias.trim().is_empty() {
            return Err(SigningError::config("signing.key_alias must not be empty"));
        }
    }
    for (field, value) in [
        (
            "signing.keystore_password_env",
            &config.signing.keystore_password_env,
        ),
        ("signing.key_password_env", &config.signing.key_password_env),
    ] {
        if let Some(name) = value {
            if name.trim().is_empty() {
                return Err(SigningError::config(format!(
                    "{} must name an environment variable",
                    field
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_parent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("app/release");
        std::fs::create_dir_all(&nested).unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "files = \"*.apk\"\n").unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_load_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &config_path,
            r#"
files = "release/*.apk"

[signing]
keystore = "release.jks"
key_alias = "mykey"
keep_intermediates = false

[tools]
zipalign = "/opt/sdk/build-tools/34.0.0/zipalign"
"#,
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.files.as_deref(), Some("release/*.apk"));
        assert_eq!(config.signing.key_alias.as_deref(), Some("mykey"));
        assert_eq!(config.signing.keep_intermediates, Some(false));
        assert!(config.tools.zipalign.is_some());
        assert!(config.tools.apksigner.is_none());
    }

    #[test]
    fn test_empty_alias_rejected() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "[signing]\nkey_alias = \"\"\n").unwrap();

        let err = load_config(&config_path).unwrap_err();
        assert!(matches!(err, SigningError::Config(_)));
    }

    #[test]
    fn test_missing_config_falls_back_to_default() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path());
        assert!(path.is_none());
        assert!(config.files.is_none());
    }
}
