//! Derived file names for pipeline outputs
//!
//! Pure derivations, no I/O. Both names are deterministic functions of the
//! source file name and artifact kind, so two files in the same batch can
//! never collide as long as their source names differ.

use std::path::{Path, PathBuf};

use crate::artifact::ArtifactKind;

/// Name of the per-file intermediate artifact (`foo.apk` -> `foo-temp.apk`).
///
/// For APKs this holds the zipaligned input to apksigner; for AABs it holds
/// the jarsigner output awaiting alignment. The roles differ, the naming
/// does not.
pub fn aligned_name(path: &Path, kind: ArtifactKind) -> PathBuf {
    derive(path, "temp", kind)
}

/// Name of the final signed artifact (`foo.apk` -> `foo-signed.apk`)
pub fn signed_name(path: &Path, kind: ArtifactKind) -> PathBuf {
    derive(path, "signed", kind)
}

fn derive(path: &Path, tag: &str, kind: ArtifactKind) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}-{}.{}", stem, tag, kind.extension()))
}
