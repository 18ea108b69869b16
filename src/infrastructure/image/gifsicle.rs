//! Animated resizer backed by the `gifsicle` command-line tool.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::ResizeError;
use crate::domain::ports::AnimatedResizerPort;

/// Program name looked up on `PATH` by default.
pub const DEFAULT_GIFSICLE_PROGRAM: &str = "gifsicle";
/// How long one batch invocation may run before it is killed.
pub const DEFAULT_RESIZE_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs `gifsicle --batch --resize-fit NxN <files...>` once per batch.
///
/// Files are modified in place. The child is killed if the timeout elapses
/// or the future is dropped.
pub struct GifsicleResizer {
    program: String,
    timeout: Duration,
}

impl GifsicleResizer {
    /// Creates a resizer running `program` with the given timeout.
    #[must_use]
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn command(&self, paths: &[PathBuf], bounds: u32) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--batch")
            .arg("--resize-fit")
            .arg(format!("{bounds}x{bounds}"))
            .args(paths)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

impl Default for GifsicleResizer {
    fn default() -> Self {
        Self::new(DEFAULT_GIFSICLE_PROGRAM, DEFAULT_RESIZE_TIMEOUT)
    }
}

#[async_trait]
impl AnimatedResizerPort for GifsicleResizer {
    async fn resize_fit(&self, paths: &[PathBuf], bounds: u32) -> Result<(), ResizeError> {
        // With no file arguments gifsicle reads stdin.
        if paths.is_empty() {
            return Ok(());
        }

        debug!(program = %self.program, count = paths.len(), bounds, "Launching animated resizer");

        let child = self.command(paths, bounds).spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResizeError::ToolMissing {
                    program: self.program.clone(),
                }
            } else {
                ResizeError::unexpected(format!("failed to launch {}: {e}", self.program))
            }
        })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ResizeError::Timeout {
                secs: self.timeout.as_secs(),
            })?
            .map_err(|e| ResizeError::unexpected(format!("failed to wait for {}: {e}", self.program)))?;

        if !output.status.success() {
            warn!(
                program = %self.program,
                status = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Animated resizer failed"
            );
            return Err(ResizeError::ExitStatus {
                code: output.status.code(),
            });
        }

        debug!(count = paths.len(), "Animated resizer finished");
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn some_paths() -> Vec<PathBuf> {
        vec![PathBuf::from("/nonexistent/1.gif")]
    }

    #[tokio::test]
    async fn test_success_exit() {
        let resizer = GifsicleResizer::new("true", Duration::from_secs(5));
        assert!(resizer.resize_fit(&some_paths(), 50).await.is_ok());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_reported() {
        let resizer = GifsicleResizer::new("false", Duration::from_secs(5));

        let err = resizer.resize_fit(&some_paths(), 50).await.unwrap_err();

        assert_eq!(err.exit_code(), Some(1));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let resizer = GifsicleResizer::new("emojibox-no-such-tool", Duration::from_secs(5));

        let err = resizer.resize_fit(&some_paths(), 50).await.unwrap_err();

        assert!(matches!(err, ResizeError::ToolMissing { program } if program == "emojibox-no-such-tool"));
    }

    #[tokio::test]
    async fn test_empty_batch_never_launches() {
        let resizer = GifsicleResizer::new("emojibox-no-such-tool", Duration::from_secs(5));
        assert!(resizer.resize_fit(&[], 50).await.is_ok());
    }

    #[test]
    fn test_command_arguments() {
        let resizer = GifsicleResizer::default();
        let paths = vec![PathBuf::from("a/1.gif"), PathBuf::from("a/2.gif")];

        let command = resizer.command(&paths, 50);
        let args: Vec<_> = command
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(command.as_std().get_program(), "gifsicle");
        assert_eq!(
            args,
            vec!["--batch", "--resize-fit", "50x50", "a/1.gif", "a/2.gif"]
        );
    }
}
