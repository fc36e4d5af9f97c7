//! Release file discovery

use tracing::{debug, info};

use crate::artifact::{ArtifactKind, ReleaseFile};
use crate::error::{Result, SigningError};

/// Find release files matching a glob pattern.
///
/// Matches are filtered to APK/AAB files and sorted so batch order is
/// stable across runs. An empty result is a configuration error: a signing
/// step with nothing to sign means the build produced no artifacts where
/// the pipeline expected them.
pub fn find_release_files(pattern: &str) -> Result<Vec<ReleaseFile>> {
    debug!(pattern, "discovering release files");

    let mut paths = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry.map_err(|e| SigningError::Io(e.into_error()))?;
        if path.is_file() && ArtifactKind::matches(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(SigningError::NoReleaseFiles(pattern.to_string()));
    }

    info!(pattern, count = paths.len(), "discovered release files");
    paths.into_iter().map(ReleaseFile::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_finds_and_sorts_matches() {
        let temp = TempDir::new().unwrap();
        for name in ["b.aab", "a.apk", "notes.txt"] {
            std::fs::write(temp.path().join(name), b"x").unwrap();
        }

        let pattern = format!("{}/*", temp.path().display());
        let files = find_release_files(&pattern).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|f| f.path().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.apk", "b.aab"]);
    }

    #[test]
    fn test_empty_match_is_error() {
        let temp = TempDir::new().unwrap();
        let pattern = format!("{}/*.apk", temp.path().display());
        let err = find_release_files(&pattern).unwrap_err();
        assert!(matches!(err, SigningError::NoReleaseFiles(_)));
    }

    #[test]
    fn test_non_artifacts_filtered_out() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("app.ipa"), b"x").unwrap();

        let pattern = format!("{}/*", temp.path().display());
        assert!(find_release_files(&pattern).is_err());
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let err = find_release_files("[").unwrap_err();
        assert!(matches!(err, SigningError::InvalidPattern(_)));
    }
}
