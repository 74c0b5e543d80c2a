//! A [`ControlTool`] stub that replays canned output without spawning
//! anything, plus a call recorder so tests can assert the invoker was (or
//! was not) reached.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use banstat_core::client::{ClientError, ControlTool};
use banstat_core::BoxFuture;

use crate::fixtures;

/// What a stubbed operation resolves to.
#[derive(Debug, Clone)]
pub enum StubOutcome {
    Output(String),
    ExitError { code: i32, stderr: String },
    Unavailable,
    TimedOut,
}

impl StubOutcome {
    fn resolve(&self) -> Result<String, ClientError> {
        match self {
            Self::Output(text) => Ok(text.clone()),
            Self::ExitError { code, stderr } => Err(ClientError::ExecutionFailed {
                code: *code,
                stderr: stderr.clone(),
            }),
            Self::Unavailable => Err(ClientError::ToolUnavailable),
            Self::TimedOut => Err(ClientError::Timeout(Duration::from_secs(5))),
        }
    }
}

/// Stub invoker with one outcome per operation and a log of calls made.
pub struct StubControlTool {
    daemon_status: StubOutcome,
    jail_status: StubOutcome,
    version: StubOutcome,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubControlTool {
    /// All three operations succeed with the fixture output.
    pub fn healthy() -> Self {
        Self {
            daemon_status: StubOutcome::Output(fixtures::DAEMON_STATUS.to_string()),
            jail_status: StubOutcome::Output(fixtures::JAIL_STATUS_SSHD.to_string()),
            version: StubOutcome::Output(fixtures::VERSION.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All three operations fail with a non-zero exit.
    pub fn failing(code: i32, stderr: &str) -> Self {
        let outcome = StubOutcome::ExitError {
            code,
            stderr: stderr.to_string(),
        };
        Self {
            daemon_status: outcome.clone(),
            jail_status: outcome.clone(),
            version: outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All three operations fail as if the binary were missing.
    pub fn unavailable() -> Self {
        Self {
            daemon_status: StubOutcome::Unavailable,
            jail_status: StubOutcome::Unavailable,
            version: StubOutcome::Unavailable,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_daemon_status(mut self, raw: &str) -> Self {
        self.daemon_status = StubOutcome::Output(raw.to_string());
        self
    }

    pub fn with_jail_status(mut self, raw: &str) -> Self {
        self.jail_status = StubOutcome::Output(raw.to_string());
        self
    }

    pub fn with_version(mut self, raw: &str) -> Self {
        self.version = StubOutcome::Output(raw.to_string());
        self
    }

    pub fn with_outcome(mut self, outcome: StubOutcome) -> Self {
        self.daemon_status = outcome.clone();
        self.jail_status = outcome.clone();
        self.version = outcome;
        self
    }

    /// Handle to the call log. Entries are operation names, with the jail
    /// name appended for `jail_status`.
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl ControlTool for StubControlTool {
    fn daemon_status(&self) -> BoxFuture<'_, Result<String, ClientError>> {
        self.record("status".to_string());
        let result = self.daemon_status.resolve();
        Box::pin(async move { result })
    }

    fn jail_status<'a>(&'a self, jail_name: &'a str) -> BoxFuture<'a, Result<String, ClientError>> {
        self.record(format!("status {jail_name}"));
        let result = self.jail_status.resolve();
        Box::pin(async move { result })
    }

    fn version(&self) -> BoxFuture<'_, Result<String, ClientError>> {
        self.record("version".to_string());
        let result = self.version.resolve();
        Box::pin(async move { result })
    }
}
