//! Run orchestration: status transitions, bridge invocation, result logging.
//!
//! Per test: `Pending -> Running -> {Passed, Failed, Error}`, and any settled
//! state goes back to `Running` on the next invocation.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::catalog::TestStatus;
use crate::error::DashboardError;
use crate::results::{ResultStatus, TestResult};
use crate::state::{DashboardState, View};

pub const PLUMBING_FAILURE_MESSAGE: &str = "Failed to run test";

/// A test that has been marked `Running` and still needs its bridge call.
#[derive(Debug, Clone)]
pub struct PendingRun {
    pub test_id: u32,
    pub test_name: String,
    pub started_at: DateTime<Utc>,
}

/// Mark `test_id` as running. Returns `None` when it already is, so a
/// second trigger never launches a second process.
pub async fn begin_run(
    state: &DashboardState,
    test_id: u32,
) -> Result<Option<PendingRun>, DashboardError> {
    let mut catalog = state.catalog.write().await;
    let test = catalog
        .get(test_id)
        .ok_or(DashboardError::TestNotFound(test_id))?;

    if test.status == TestStatus::Running {
        info!("Test {} is already running, ignoring trigger", test.name);
        return Ok(None);
    }

    let pending = PendingRun {
        test_id,
        test_name: test.name.clone(),
        started_at: Utc::now(),
    };
    catalog.set_status(test_id, TestStatus::Running);
    Ok(Some(pending))
}

/// Resolve the target environment, invoke the bridge and record the outcome.
pub async fn complete_run(state: &DashboardState, run: PendingRun) -> TestResult {
    let base_url = {
        let environments = state.environments.read().await;
        environments.active().map(|env| env.url.clone())
    };

    let outcome = match base_url {
        Some(url) => {
            info!("Running {} against {}", run.test_name, url);
            state.runner.run(&run.test_name, &url).await
        }
        None => Err(DashboardError::Configuration),
    };

    let (status, message, error) = match outcome {
        Ok(outcome) => (outcome.status, outcome.message, outcome.error),
        Err(e) => {
            warn!("Run of {} failed before producing a result: {}", run.test_name, e);
            (
                ResultStatus::Error,
                PLUMBING_FAILURE_MESSAGE.to_string(),
                Some(e.to_string()),
            )
        }
    };

    let result = TestResult {
        id: uuid::Uuid::new_v4().to_string(),
        test_name: run.test_name,
        status,
        timestamp: run.started_at,
        message: Some(message),
        error,
    };

    state
        .catalog
        .write()
        .await
        .set_status(run.test_id, status.into());
    state.results.append(result.clone()).await;
    state.set_view(View::Results).await;

    info!("{} finished: {:?}", result.test_name, result.status);
    result
}

/// `begin_run` then `complete_run`; `None` when the test was already running.
pub async fn trigger_run(
    state: &DashboardState,
    test_id: u32,
) -> Result<Option<TestResult>, DashboardError> {
    match begin_run(state, test_id).await? {
        Some(pending) => Ok(Some(complete_run(state, pending).await)),
        None => Ok(None),
    }
}
