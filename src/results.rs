use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tokio::sync::{broadcast, RwLock};

use crate::config::RESULT_CHANNEL_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Passed,
    Failed,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: String,
    pub test_name: String,
    pub status: ResultStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Session-scoped, most-recent-first history of run outcomes.
pub struct ResultLog {
    entries: RwLock<VecDeque<TestResult>>,
    sender: broadcast::Sender<TestResult>,
}

impl Default for ResultLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultLog {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(RESULT_CHANNEL_CAPACITY);
        Self {
            entries: RwLock::new(VecDeque::new()),
            sender,
        }
    }

    pub async fn append(&self, result: TestResult) {
        self.entries.write().await.push_front(result.clone());
        let _ = self.sender.send(result);
    }

    pub async fn all(&self) -> Vec<TestResult> {
        self.entries.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TestResult> {
        self.sender.subscribe()
    }
}
