//! Android build toolchain discovery

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ToolOverrides;
use crate::error::{Result, SigningError};

/// Resolved absolute paths to the three signing tools.
///
/// Resolved once per run and shared read-only across all pipeline
/// invocations.
#[derive(Debug, Clone)]
pub struct BuildToolset {
    /// Path to zipalign (Android SDK build-tools)
    pub zipalign: PathBuf,
    /// Path to apksigner (Android SDK build-tools)
    pub apksigner: PathBuf,
    /// Path to jarsigner (JDK)
    pub jarsigner: PathBuf,
}

impl BuildToolset {
    /// Create a toolset from explicit paths, checking each exists on disk
    pub fn new(zipalign: PathBuf, apksigner: PathBuf, jarsigner: PathBuf) -> Result<Self> {
        for (tool, path) in [
            ("zipalign", &zipalign),
            ("apksigner", &apksigner),
            ("jarsigner", &jarsigner),
        ] {
            if !path.exists() {
                return Err(SigningError::ToolNotFound {
                    tool: tool.to_string(),
                    hint: format!("Configured path does not exist: {}", path.display()),
                });
            }
        }
        Ok(Self {
            zipalign,
            apksigner,
            jarsigner,
        })
    }

    /// Discover the toolchain, honoring per-tool overrides first.
    ///
    /// zipalign and apksigner come from the newest build-tools version under
    /// the Android SDK; jarsigner from JAVA_HOME or PATH.
    pub fn discover(overrides: &ToolOverrides) -> Result<Self> {
        let zipalign = match &overrides.zipalign {
            Some(path) => path.clone(),
            None => find_build_tool("zipalign")?,
        };
        let apksigner = match &overrides.apksigner {
            Some(path) => path.clone(),
            None => find_build_tool("apksigner")?,
        };
        let jarsigner = match &overrides.jarsigner {
            Some(path) => path.clone(),
            None => find_jarsigner()?,
        };

        info!(
            zipalign = %zipalign.display(),
            apksigner = %apksigner.display(),
            jarsigner = %jarsigner.display(),
            "resolved signing toolchain"
        );

        Self::new(zipalign, apksigner, jarsigner)
    }
}

/// Find a tool in the newest build-tools version of the Android SDK
fn find_build_tool(tool: &str) -> Result<PathBuf> {
    for sdk_root in sdk_roots() {
        let build_tools = sdk_root.join("build-tools");
        if !build_tools.is_dir() {
            continue;
        }

        let Ok(entries) = std::fs::read_dir(&build_tools) else {
            continue;
        };

        let mut versions: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .collect();
        versions.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

        for version in versions {
            let candidate = version.path().join(tool);
            if candidate.exists() {
                debug!(tool, path = %candidate.display(), "found in SDK build-tools");
                return Ok(candidate);
            }
        }
    }

    // Last resort: PATH
    if let Ok(path) = which::which(tool) {
        debug!(tool, path = %path.display(), "found on PATH");
        return Ok(path);
    }

    Err(SigningError::ToolNotFound {
        tool: tool.to_string(),
        hint: "Install Android SDK build-tools or set ANDROID_HOME".to_string(),
    })
}

/// Find jarsigner, preferring JAVA_HOME over PATH
fn find_jarsigner() -> Result<PathBuf> {
    if let Ok(java_home) = std::env::var("JAVA_HOME") {
        let candidate = Path::new(&java_home).join("bin").join("jarsigner");
        if candidate.exists() {
            debug!(path = %candidate.display(), "found jarsigner in JAVA_HOME");
            return Ok(candidate);
        }
    }

    which::which("jarsigner").map_err(|_| SigningError::ToolNotFound {
        tool: "jarsigner".to_string(),
        hint: "Install a JDK or set JAVA_HOME".to_string(),
    })
}

/// Candidate Android SDK root directories, most specific first
fn sdk_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    for var in ["ANDROID_HOME", "ANDROID_SDK_ROOT"] {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                roots.push(PathBuf::from(value));
            }
        }
    }

    if let Some(home) = dirs::home_dir() {
        roots.push(home.join("Android/Sdk"));
        roots.push(home.join("Library/Android/sdk"));
    }
    roots.push(PathBuf::from("/usr/local/share/android-sdk"));

    roots
}
