//! Release artifact model

use std::path::{Path, PathBuf};

use crate::error::{Result, SigningError};

/// The two Android release artifact kinds.
///
/// Closed enum so pipeline dispatch is a total match; a file with any other
/// extension is rejected at discovery time rather than falling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Android application package
    Apk,
    /// Android App Bundle
    Aab,
}

impl ArtifactKind {
    /// Derive the kind from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("apk") => Ok(Self::Apk),
            Some(ext) if ext.eq_ignore_ascii_case("aab") => Ok(Self::Aab),
            _ => Err(SigningError::UnsupportedArtifact(path.to_path_buf())),
        }
    }

    /// Check whether a path carries a signable extension
    pub fn matches(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }

    /// File extension for this kind
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Apk => "apk",
            Self::Aab => "aab",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apk => write!(f, "APK"),
            Self::Aab => write!(f, "AAB"),
        }
    }
}

/// A discovered release artifact. Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseFile {
    path: PathBuf,
    kind: ArtifactKind,
}

impl ReleaseFile {
    /// Create a release file, deriving its kind from the extension
    pub fn new(path: PathBuf) -> Result<Self> {
        let kind = ArtifactKind::from_path(&path)?;
        Ok(Self { path, kind })
    }

    /// Path as discovered (relative to the working directory)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Artifact kind
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }
}
