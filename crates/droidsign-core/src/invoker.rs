//! External tool invocation

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, SigningError};

/// Seam over external process execution.
///
/// The pipeline only needs "run this tool with these arguments and fail on
/// non-zero exit"; tests substitute a recording implementation.
#[async_trait::async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Run a tool to completion, failing on non-zero exit
    async fn run(&self, tool: &Path, args: &[String]) -> Result<()>;
}

/// Invoker that spawns real processes via tokio
#[derive(Debug, Default)]
pub struct ProcessInvoker;

#[async_trait::async_trait]
impl ToolInvoker for ProcessInvoker {
    async fn run(&self, tool: &Path, args: &[String]) -> Result<()> {
        debug!(tool = %tool.display(), "running signing tool");

        let output = Command::new(tool)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SigningError::ToolFailed {
                tool: tool
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| tool.display().to_string()),
                status: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Recording invoker shared by pipeline and batch tests
#[cfg(test)]
pub(crate) mod tests_support {
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use super::ToolInvoker;
    use crate::error::{Result, SigningError};

    /// Records every invocation; optionally fails when the tool's file name
    /// matches a configured trigger.
    #[derive(Debug, Default)]
    pub struct RecordingInvoker {
        calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
        fail_on: Option<String>,
    }

    impl RecordingInvoker {
        pub fn failing_on(tool: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: Some(tool.to_string()),
            }
        }

        pub fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ToolInvoker for RecordingInvoker {
        async fn run(&self, tool: &Path, args: &[String]) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((tool.to_path_buf(), args.to_vec()));

            let name = tool
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if self.fail_on.as_deref() == Some(name.as_str()) {
                return Err(SigningError::ToolFailed {
                    tool: name,
                    status: Some(1),
                    stderr: "simulated failure".to_string(),
                });
            }
            Ok(())
        }
    }
}
