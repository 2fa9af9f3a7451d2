//! Key-value persistence port.
//!
//! The dashboard keeps its durable state (the environment list and UI
//! preferences) as plain string values under fixed keys. Any backend that
//! can get, set and delete a string by key satisfies [`KeyValueStore`].

pub mod file;
pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use crate::config::{DashboardConfig, StoreKind};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// Open the backend selected in config, creating the data dir if needed.
pub fn open_store(config: &DashboardConfig) -> Result<SharedStore, StoreError> {
    let store: SharedStore = match config.store {
        StoreKind::Sqlite => {
            std::fs::create_dir_all(&config.data_dir)?;
            Arc::new(SqliteStore::open(&config.sqlite_path())?)
        }
        StoreKind::File => {
            std::fs::create_dir_all(&config.data_dir)?;
            Arc::new(FileStore::new(config.json_store_path()))
        }
        StoreKind::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}
