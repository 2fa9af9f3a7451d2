//! Bridge between a run request and the external test tool.
//!
//! A [`TestRunner`] takes a test name and a base URL and settles into a
//! [`RunOutcome`]. Test failures and launch failures are outcomes, not
//! errors; `Err` is reserved for plumbing failures (lost output pipes,
//! an unreachable remote bridge) that the controller records as `Error`.

pub mod command;
pub mod remote;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{DashboardConfig, DEFAULT_BASE_URL};
use crate::error::DashboardError;
use crate::results::ResultStatus;

pub use command::CommandRunner;
pub use remote::RemoteRunner;

pub const PASSED_MESSAGE: &str = "Test passed successfully";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub status: ResultStatus,
    pub message: String,
    pub error: Option<String>,
}

impl RunOutcome {
    pub fn passed() -> Self {
        Self {
            status: ResultStatus::Passed,
            message: PASSED_MESSAGE.to_string(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            status: ResultStatus::Failed,
            message: message.into(),
            error,
        }
    }

    pub fn launch_failure(label: &str, error: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            message: format!("Failed to run {} test", label),
            error: Some(error.into()),
        }
    }
}

#[async_trait]
pub trait TestRunner: Send + Sync {
    /// Human-readable tool name used in outcome messages.
    fn label(&self) -> &str;

    /// Run `test_name` against `base_url`. No timeout is applied.
    async fn run(&self, test_name: &str, base_url: &str) -> Result<RunOutcome, DashboardError>;
}

pub type SharedRunner = Arc<dyn TestRunner>;

/// Pick the runner the process was configured with.
pub fn build_runner(config: &DashboardConfig) -> Result<SharedRunner, DashboardError> {
    if let Some(remote) = &config.remote_bridge {
        return Ok(Arc::new(RemoteRunner::new(remote)?));
    }
    Ok(Arc::new(CommandRunner::for_kind(
        config.runner,
        &config.project_dir,
        config.headed,
    )))
}

// ============================================================================
// /api/run-test wire types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTestRequest {
    #[serde(rename = "testName")]
    pub test_name: String,
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl RunTestRequest {
    pub fn base_url_or_default(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTestResponse {
    pub success: bool,
    pub status: ResultStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RunOutcome> for RunTestResponse {
    fn from(outcome: RunOutcome) -> Self {
        let success = outcome.status == ResultStatus::Passed;
        Self {
            success,
            // Anything but a pass is reported as "failed" on the wire
            status: if success {
                ResultStatus::Passed
            } else {
                ResultStatus::Failed
            },
            message: outcome.message,
            error: outcome.error,
        }
    }
}

impl From<RunTestResponse> for RunOutcome {
    fn from(response: RunTestResponse) -> Self {
        let status = if response.success {
            ResultStatus::Passed
        } else if response.status == ResultStatus::Passed {
            ResultStatus::Failed
        } else {
            response.status
        };
        Self {
            status,
            message: response.message,
            error: response.error,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Last `n` lines of `output`. A trailing newline does not count as an
/// extra empty line.
pub fn tail_lines(output: &str, n: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}

/// `HEADED=1` or `HEADED=true` (any case) requests a visible browser.
pub fn is_headed(value: Option<&str>) -> bool {
    match value {
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true"),
        None => false,
    }
}
