use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use super::{RunOutcome, RunTestRequest, RunTestResponse, TestRunner};
use crate::config::RUN_TEST_PATH;
use crate::error::DashboardError;

/// Forwards runs to another dashboard's `/api/run-test` endpoint.
///
/// Both the 200 and 500 bodies of that endpoint carry a structured
/// outcome. Transport and decoding failures surface as
/// [`DashboardError::Remote`].
pub struct RemoteRunner {
    client: reqwest::Client,
    endpoint: Url,
}

impl RemoteRunner {
    /// The endpoint is resolved under the bridge URL's path, so a dashboard
    /// mounted at `http://host/dash` is reached at `/dash/api/run-test`.
    pub fn new(bridge: &Url) -> Result<Self, DashboardError> {
        let mut base = bridge.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(RUN_TEST_PATH.trim_start_matches('/'))
            .map_err(|e| DashboardError::Other(format!("Invalid bridge URL {}: {}", bridge, e)))?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| DashboardError::Remote(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TestRunner for RemoteRunner {
    fn label(&self) -> &str {
        "Remote"
    }

    async fn run(&self, test_name: &str, base_url: &str) -> Result<RunOutcome, DashboardError> {
        info!("Forwarding {} to {}", test_name, self.endpoint);

        let request = RunTestRequest {
            test_name: test_name.to_string(),
            base_url: Some(base_url.to_string()),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| DashboardError::Remote(e.to_string()))?;

        let status = response.status();
        let body: RunTestResponse = response.json().await.map_err(|e| {
            warn!("Unreadable bridge response (HTTP {}): {}", status, e);
            DashboardError::Remote(e.to_string())
        })?;

        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joined_onto_bridge() {
        let bridge = Url::parse("http://ci-box:3000/").unwrap();
        let runner = RemoteRunner::new(&bridge).unwrap();
        assert_eq!(runner.endpoint().as_str(), "http://ci-box:3000/api/run-test");

        let bare = Url::parse("http://ci-box:3000").unwrap();
        let runner = RemoteRunner::new(&bare).unwrap();
        assert_eq!(runner.endpoint().as_str(), "http://ci-box:3000/api/run-test");
    }

    #[test]
    fn test_endpoint_keeps_bridge_path_prefix() {
        let with_slash = Url::parse("http://host/dash/").unwrap();
        assert_eq!(
            RemoteRunner::new(&with_slash).unwrap().endpoint().as_str(),
            "http://host/dash/api/run-test"
        );

        let without_slash = Url::parse("http://host/dash").unwrap();
        assert_eq!(
            RemoteRunner::new(&without_slash).unwrap().endpoint().as_str(),
            "http://host/dash/api/run-test"
        );
    }
}
