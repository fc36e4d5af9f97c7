//! Signing run report

use std::path::{Path, PathBuf};

use serde::Serialize;

/// One signed artifact: the source path and the final signed path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningResult {
    /// Path as discovered
    pub source: PathBuf,
    /// Final signed artifact path
    pub signed: PathBuf,
}

/// Ordered results of a successful run plus the aggregates consumed by the
/// CI reporting side: count, single-file shortcut, colon-joined path list.
#[derive(Debug, Default, Serialize)]
pub struct SigningReport {
    results: Vec<SigningResult>,
}

impl SigningReport {
    /// Append a result, preserving discovery order
    pub fn push(&mut self, source: PathBuf, signed: PathBuf) {
        self.results.push(SigningResult { source, signed });
    }

    /// Results in discovery order
    pub fn results(&self) -> &[SigningResult] {
        &self.results
    }

    /// Number of signed files
    pub fn count(&self) -> usize {
        self.results.len()
    }

    /// The signed path, present only when exactly one file was signed
    pub fn single_path(&self) -> Option<&Path> {
        match self.results.as_slice() {
            [only] => Some(&only.signed),
            _ => None,
        }
    }

    /// All signed paths joined with `:`, in discovery order
    pub fn joined_paths(&self) -> String {
        self.results
            .iter()
            .map(|r| r.signed.display().to_string())
            .collect::<Vec<_>>()
            .join(":")
    }
}
