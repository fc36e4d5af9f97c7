//! Per-file signing pipeline
//!
//! Drives one release file through its tool sequence. The two branches run
//! the same tools in different orders: apksigner re-signs an aligned
//! container in place, so APKs are aligned first and signed second; jarsigner
//! knows nothing about Android alignment, so AABs are signed first and
//! aligned last to keep the distributable artifact page-aligned.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::artifact::{ArtifactKind, ReleaseFile};
use crate::credentials::SigningCredentials;
use crate::error::Result;
use crate::invoker::ToolInvoker;
use crate::paths;
use crate::toolset::BuildToolset;

/// zipalign invocation shape shared by both branches: preserve uncompressed
/// page alignment (-p), force overwrite (-f), verbose (-v), 4-byte boundary.
const ZIPALIGN_FLAGS: [&str; 4] = ["-p", "-f", "-v", "4"];

/// Signs a single release file with the resolved toolchain
pub struct SigningPipeline<'a> {
    toolset: &'a BuildToolset,
    credentials: &'a SigningCredentials,
    invoker: &'a dyn ToolInvoker,
}

impl<'a> SigningPipeline<'a> {
    /// Create a pipeline over a shared toolset and credentials
    pub fn new(
        toolset: &'a BuildToolset,
        credentials: &'a SigningCredentials,
        invoker: &'a dyn ToolInvoker,
    ) -> Self {
        Self {
            toolset,
            credentials,
            invoker,
        }
    }

    /// Sign one file, returning the final signed path.
    ///
    /// Leaves the intermediate `-temp` artifact on disk; the orchestrator
    /// decides whether to remove it.
    pub async fn sign(&self, file: &ReleaseFile) -> Result<PathBuf> {
        match file.kind() {
            ArtifactKind::Apk => self.sign_apk(file).await,
            ArtifactKind::Aab => self.sign_aab(file).await,
        }
    }

    /// Intermediate artifact path for a file, for post-run cleanup
    pub fn intermediate_path(&self, file: &ReleaseFile) -> PathBuf {
        paths::aligned_name(file.path(), file.kind())
    }

    /// APK: align, then sign
    async fn sign_apk(&self, file: &ReleaseFile) -> Result<PathBuf> {
        let source = file.path();
        let aligned = paths::aligned_name(source, ArtifactKind::Apk);
        let signed = paths::signed_name(source, ArtifactKind::Apk);

        debug!(file = %source.display(), "aligning APK");
        self.zipalign(source.to_path_buf(), aligned.clone()).await?;

        let mut args = vec![
            "sign".to_string(),
            "--ks".to_string(),
            self.credentials.keystore.display().to_string(),
            "--ks-key-alias".to_string(),
            self.credentials.key_alias.clone(),
            "--ks-pass".to_string(),
            format!("pass:{}", self.credentials.keystore_password),
            "--out".to_string(),
            signed.display().to_string(),
        ];
        // apksigner falls back to the keystore password when --key-pass is
        // omitted, so the flag only appears when a key password was given.
        if let Some(key_password) = &self.credentials.key_password {
            args.push("--key-pass".to_string());
            args.push(format!("pass:{}", key_password));
        }
        args.push(aligned.display().to_string());

        debug!(file = %source.display(), "signing APK");
        self.invoker.run(&self.toolset.apksigner, &args).await?;

        info!(source = %source.display(), signed = %signed.display(), "signed APK");
        Ok(signed)
    }

    /// AAB: sign, then align
    async fn sign_aab(&self, file: &ReleaseFile) -> Result<PathBuf> {
        let source = file.path();
        let signed_temp = paths::aligned_name(source, ArtifactKind::Aab);
        let signed = paths::signed_name(source, ArtifactKind::Aab);

        // jarsigner takes raw password values (no pass: prefix) and the key
        // alias as the trailing positional argument.
        let mut args = vec![
            "-keystore".to_string(),
            self.credentials.keystore.display().to_string(),
            "-storepass".to_string(),
            self.credentials.keystore_password.clone(),
            "-signedjar".to_string(),
            signed_temp.display().to_string(),
        ];
        if let Some(key_password) = &self.credentials.key_password {
            args.push("-keypass".to_string());
            args.push(key_password.clone());
        }
        args.push(source.display().to_string());
        args.push(self.credentials.key_alias.clone());

        debug!(file = %source.display(), "signing AAB");
        self.invoker.run(&self.toolset.jarsigner, &args).await?;

        debug!(file = %source.display(), "aligning AAB");
        self.zipalign(signed_temp, signed.clone()).await?;

        info!(source = %source.display(), signed = %signed.display(), "signed AAB");
        Ok(signed)
    }

    async fn zipalign(&self, input: PathBuf, output: PathBuf) -> Result<()> {
        let mut args: Vec<String> = ZIPALIGN_FLAGS.iter().map(|s| s.to_string()).collect();
        args.push(input.display().to_string());
        args.push(output.display().to_string());
        self.invoker.run(&self.toolset.zipalign, &args).await
    }
}
