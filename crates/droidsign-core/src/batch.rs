//! Batch orchestration
//!
//! Files are signed strictly one at a time, in discovery order. The first
//! failing tool invocation aborts the whole batch; there is no partial
//! report.

use std::path::Path;

use tracing::{info, warn};

use crate::artifact::ReleaseFile;
use crate::error::Result;
use crate::pipeline::SigningPipeline;
use crate::report::SigningReport;

/// Progress notification, delivered before file `index` (1-based) of
/// `total` starts signing
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress<'a> {
    pub index: usize,
    pub total: usize,
    pub file: &'a Path,
}

/// Drives the pipeline over an ordered batch of release files
pub struct BatchOrchestrator<'a> {
    pipeline: SigningPipeline<'a>,
    keep_intermediates: bool,
}

impl<'a> BatchOrchestrator<'a> {
    /// Create an orchestrator.
    ///
    /// `keep_intermediates` controls whether each file's `-temp` artifact
    /// survives the run (the default; useful when debugging a CI job).
    pub fn new(pipeline: SigningPipeline<'a>, keep_intermediates: bool) -> Self {
        Self {
            pipeline,
            keep_intermediates,
        }
    }

    /// Sign every file in order, without progress callbacks
    pub async fn sign_all(&self, files: &[ReleaseFile]) -> Result<SigningReport> {
        self.sign_all_with_progress(files, |_| {}).await
    }

    /// Sign every file in order, notifying `progress` before each file
    pub async fn sign_all_with_progress<F>(
        &self,
        files: &[ReleaseFile],
        mut progress: F,
    ) -> Result<SigningReport>
    where
        F: FnMut(BatchProgress<'_>),
    {
        let total = files.len();
        let mut report = SigningReport::default();

        for (i, file) in files.iter().enumerate() {
            progress(BatchProgress {
                index: i + 1,
                total,
                file: file.path(),
            });
            info!(
                index = i + 1,
                total,
                file = %file.path().display(),
                kind = %file.kind(),
                "signing release file"
            );

            let signed = self.pipeline.sign(file).await?;

            if !self.keep_intermediates {
                let intermediate = self.pipeline.intermediate_path(file);
                if let Err(e) = tokio::fs::remove_file(&intermediate).await {
                    warn!(
                        path = %intermediate.display(),
                        error = %e,
                        "failed to remove intermediate artifact"
                    );
                }
            }

            report.push(file.path().to_path_buf(), signed);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::SigningCredentials;
    use crate::invoker::tests_support::RecordingInvoker;
    use crate::toolset::BuildToolset;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixture(temp: &TempDir) -> (BuildToolset, SigningCredentials) {
        let tool = |name: &str| {
            let path = temp.path().join(name);
            std::fs::write(&path, b"").unwrap();
            path
        };
        let toolset =
            BuildToolset::new(tool("zipalign"), tool("apksigner"), tool("jarsigner")).unwrap();

        let keystore = temp.path().join("release.jks");
        std::fs::write(&keystore, b"keystore").unwrap();
        let credentials =
            SigningCredentials::new(keystore, "mykey".into(), "pw123".into(), None).unwrap();

        (toolset, credentials)
    }

    fn files(names: &[&str]) -> Vec<ReleaseFile> {
        names
            .iter()
            .map(|n| ReleaseFile::new(PathBuf::from(n)).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_mixed_batch_in_order() {
        let temp = TempDir::new().unwrap();
        let (toolset, credentials) = fixture(&temp);
        let invoker = RecordingInvoker::default();
        let pipeline = SigningPipeline::new(&toolset, &credentials, &invoker);
        let orchestrator = BatchOrchestrator::new(pipeline, true);

        let report = orchestrator
            .sign_all(&files(&["a.apk", "b.aab"]))
            .await
            .unwrap();

        assert_eq!(report.count(), 2);
        assert_eq!(report.joined_paths(), "a-signed.apk:b-signed.aab");
        assert_eq!(report.single_path(), None);
        // Two tool invocations per file.
        assert_eq!(invoker.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_single_file_report() {
        let temp = TempDir::new().unwrap();
        let (toolset, credentials) = fixture(&temp);
        let invoker = RecordingInvoker::default();
        let pipeline = SigningPipeline::new(&toolset, &credentials, &invoker);
        let orchestrator = BatchOrchestrator::new(pipeline, true);

        let report = orchestrator
            .sign_all(&files(&["app-release.apk"]))
            .await
            .unwrap();

        assert_eq!(report.count(), 1);
        assert_eq!(
            report.single_path(),
            Some(std::path::Path::new("app-release-signed.apk"))
        );
    }

    #[tokio::test]
    async fn test_progress_notified_before_each_file() {
        let temp = TempDir::new().unwrap();
        let (toolset, credentials) = fixture(&temp);
        let invoker = RecordingInvoker::default();
        let pipeline = SigningPipeline::new(&toolset, &credentials, &invoker);
        let orchestrator = BatchOrchestrator::new(pipeline, true);

        let mut seen = Vec::new();
        orchestrator
            .sign_all_with_progress(&files(&["a.apk", "b.aab", "c.apk"]), |p| {
                seen.push((p.index, p.total, p.file.to_path_buf()));
            })
            .await
            .unwrap();

        assert_eq!(
            seen,
            vec![
                (1, 3, PathBuf::from("a.apk")),
                (2, 3, PathBuf::from("b.aab")),
                (3, 3, PathBuf::from("c.apk")),
            ]
        );
    }

    #[tokio::test]
    async fn test_first_failure_aborts_batch() {
        let temp = TempDir::new().unwrap();
        let (toolset, credentials) = fixture(&temp);
        // jarsigner fails, so the AAB in the middle aborts the run.
        let invoker = RecordingInvoker::failing_on("jarsigner");
        let pipeline = SigningPipeline::new(&toolset, &credentials, &invoker);
        let orchestrator = BatchOrchestrator::new(pipeline, true);

        let err = orchestrator
            .sign_all(&files(&["a.apk", "b.aab", "c.apk"]))
            .await
            .unwrap_err();

        assert!(matches!(err, crate::SigningError::ToolFailed { .. }));
        // a.apk took two invocations, b.aab failed on its first; c.apk was
        // never attempted.
        assert_eq!(invoker.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_intermediate_cleanup_when_disabled() {
        let temp = TempDir::new().unwrap();
        let (toolset, credentials) = fixture(&temp);
        let invoker = RecordingInvoker::default();
        let pipeline = SigningPipeline::new(&toolset, &credentials, &invoker);
        let orchestrator = BatchOrchestrator::new(pipeline, false);

        // The recording invoker does not create files, so pre-create the
        // intermediate the cleanup should remove.
        let source = temp.path().join("app.apk");
        std::fs::write(&source, b"apk").unwrap();
        let intermediate = temp.path().join("app-temp.apk");
        std::fs::write(&intermediate, b"aligned").unwrap();

        orchestrator
            .sign_all(&[ReleaseFile::new(source).unwrap()])
            .await
            .unwrap();

        assert!(!intermediate.exists());
    }
}
