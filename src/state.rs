use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::catalog::TestCatalog;
use crate::config::DashboardConfig;
use crate::environments::EnvironmentStore;
use crate::results::ResultLog;
use crate::runner::SharedRunner;
use crate::store::{SharedStore, StoreError};

pub type SharedState = Arc<DashboardState>;

/// Which panel of the dashboard is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Tests,
    Results,
    Environments,
    Settings,
}

pub struct DashboardState {
    pub config: DashboardConfig,
    pub store: SharedStore,
    pub runner: SharedRunner,
    pub environments: RwLock<EnvironmentStore>,
    pub catalog: RwLock<TestCatalog>,
    pub results: ResultLog,
    pub view: RwLock<View>,
    /// Serializes read-modify-write of stored preferences.
    pub preferences_lock: Mutex<()>,
    pub started_at: DateTime<Utc>,
}

impl DashboardState {
    pub fn new(
        config: DashboardConfig,
        store: SharedStore,
        runner: SharedRunner,
    ) -> Result<Self, StoreError> {
        let environments = EnvironmentStore::load(store.clone())?;
        Ok(Self {
            config,
            store,
            runner,
            environments: RwLock::new(environments),
            catalog: RwLock::new(TestCatalog::default()),
            results: ResultLog::new(),
            view: RwLock::new(View::default()),
            preferences_lock: Mutex::new(()),
            started_at: Utc::now(),
        })
    }

    pub fn with_catalog(mut self, catalog: TestCatalog) -> Self {
        self.catalog = RwLock::new(catalog);
        self
    }

    pub async fn set_view(&self, view: View) {
        *self.view.write().await = view;
    }

    pub async fn current_view(&self) -> View {
        *self.view.read().await
    }
}
