//! Invoker for the fail2ban control tool.
//!
//! Spawns `fail2ban-client` with piped output and a wall-clock deadline,
//! classifies failures, and hands the captured stdout to the parsers.
//! Nothing is retried and nothing is cached; every call is independent.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tracing::debug;

use crate::BoxFuture;
use banstat_config::Fail2banConfig;

/// Default wall-clock deadline for a control-tool invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Failure classification for a control-tool invocation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("fail2ban control tool not found")]
    ToolUnavailable,

    /// Non-zero exit. The captured stderr is for logs only and must not be
    /// echoed to HTTP clients.
    #[error("control tool exited with status {code}")]
    ExecutionFailed { code: i32, stderr: String },

    #[error("control tool timed out after {0:?}")]
    Timeout(Duration),

    #[error("control tool I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The three queries banstat issues against the control tool.
///
/// Object-safe so handlers can hold an `Arc<dyn ControlTool>` and tests can
/// substitute a stub that replays canned output.
pub trait ControlTool: Send + Sync {
    /// `fail2ban-client status` — overall daemon status text.
    fn daemon_status(&self) -> BoxFuture<'_, Result<String, ClientError>>;

    /// `fail2ban-client status <jail>` — per-jail status text.
    ///
    /// Callers must pass a name that already passed
    /// [`crate::validate::is_valid_jail_name`]; the name goes straight into
    /// the argument list.
    fn jail_status<'a>(&'a self, jail_name: &'a str) -> BoxFuture<'a, Result<String, ClientError>>;

    /// `fail2ban-client version` — daemon version text.
    fn version(&self) -> BoxFuture<'_, Result<String, ClientError>>;
}

/// Production [`ControlTool`] backed by the real `fail2ban-client` binary.
pub struct Fail2banClient {
    binary: PathBuf,
    timeout: Duration,
}

impl Fail2banClient {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Build a client from the `[fail2ban]` config section.
    pub fn from_config(config: &Fail2banConfig) -> Self {
        Self::new(&config.binary, Duration::from_secs(config.timeout_secs))
    }

    async fn run(&self, args: &[&str]) -> Result<String, ClientError> {
        debug!(binary = %self.binary.display(), ?args, "invoking control tool");

        let child = tokio::process::Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // reap the child if the timeout drops the wait future
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ClientError::ToolUnavailable,
                _ => ClientError::Io(e),
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))??;

        if !output.status.success() {
            return Err(ClientError::ExecutionFailed {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for Fail2banClient {
    fn default() -> Self {
        Self::new("fail2ban-client", DEFAULT_TIMEOUT)
    }
}

impl ControlTool for Fail2banClient {
    fn daemon_status(&self) -> BoxFuture<'_, Result<String, ClientError>> {
        Box::pin(async move { self.run(&["status"]).await })
    }

    fn jail_status<'a>(&'a self, jail_name: &'a str) -> BoxFuture<'a, Result<String, ClientError>> {
        Box::pin(async move { self.run(&["status", jail_name]).await })
    }

    fn version(&self) -> BoxFuture<'_, Result<String, ClientError>> {
        Box::pin(async move { self.run(&["version"]).await })
    }
}
