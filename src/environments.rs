//! Named base URLs that test runs target.
//!
//! At most one environment is enabled at a time. The `"default"` entry is
//! seeded on first load and can never be removed; it is also the fallback
//! when nothing is enabled.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{DEFAULT_BASE_URL, ENVIRONMENTS_KEY};
use crate::store::{SharedStore, StoreError};

pub const DEFAULT_ENVIRONMENT_ID: &str = "default";
pub const DEFAULT_ENVIRONMENT_NAME: &str = "Local";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
    pub url: String,
    pub enabled: bool,
}

impl Environment {
    pub fn default_local() -> Self {
        Self {
            id: DEFAULT_ENVIRONMENT_ID.to_string(),
            name: DEFAULT_ENVIRONMENT_NAME.to_string(),
            url: DEFAULT_BASE_URL.to_string(),
            enabled: true,
        }
    }
}

pub struct EnvironmentStore {
    environments: Vec<Environment>,
    store: SharedStore,
}

impl EnvironmentStore {
    /// Load the persisted list, seeding (and persisting) the default entry
    /// when nothing usable is stored.
    pub fn load(store: SharedStore) -> Result<Self, StoreError> {
        let stored = match store.get(ENVIRONMENTS_KEY)? {
            Some(json) => match serde_json::from_str::<Vec<Environment>>(&json) {
                Ok(list) => Some(list),
                Err(e) => {
                    warn!("Stored environments are unreadable, reseeding: {}", e);
                    None
                }
            },
            None => None,
        };

        let env_store = match stored {
            Some(environments) => Self {
                environments,
                store,
            },
            None => {
                info!("Seeding default environment ({})", DEFAULT_BASE_URL);
                let env_store = Self {
                    environments: vec![Environment::default_local()],
                    store,
                };
                env_store.persist()?;
                env_store
            }
        };
        Ok(env_store)
    }

    pub fn list(&self) -> &[Environment] {
        &self.environments
    }

    pub fn get(&self, id: &str) -> Option<&Environment> {
        self.environments.iter().find(|env| env.id == id)
    }

    /// Add a disabled environment. Blank name or url is a silent no-op.
    pub fn add(&mut self, name: &str, url: &str) -> Result<Option<Environment>, StoreError> {
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || url.is_empty() {
            return Ok(None);
        }

        let env = Environment {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            url: url.to_string(),
            enabled: false,
        };
        self.environments.push(env.clone());
        self.persist()?;
        Ok(Some(env))
    }

    /// Flip `id` and disable every other environment. Toggling the enabled
    /// one leaves nothing enabled.
    pub fn toggle(&mut self, id: &str) -> Result<(), StoreError> {
        for env in &mut self.environments {
            env.enabled = if env.id == id { !env.enabled } else { false };
        }
        self.persist()
    }

    /// Returns whether an entry was removed. The default entry never is.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        if id == DEFAULT_ENVIRONMENT_ID {
            return Ok(false);
        }
        let before = self.environments.len();
        self.environments.retain(|env| env.id != id);
        if self.environments.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// The enabled environment, else the default entry.
    pub fn active(&self) -> Option<&Environment> {
        self.environments
            .iter()
            .find(|env| env.enabled)
            .or_else(|| self.get(DEFAULT_ENVIRONMENT_ID))
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.environments)?;
        self.store.set(ENVIRONMENTS_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn fresh() -> (EnvironmentStore, SharedStore) {
        let kv: SharedStore = Arc::new(MemoryStore::new());
        (EnvironmentStore::load(kv.clone()).unwrap(), kv)
    }

    fn enabled_count(store: &EnvironmentStore) -> usize {
        store.list().iter().filter(|env| env.enabled).count()
    }

    #[test]
    fn test_first_load_seeds_and_persists_default() {
        let (store, kv) = fresh();
        assert_eq!(store.list(), &[Environment::default_local()]);

        let persisted = kv.get(ENVIRONMENTS_KEY).unwrap().unwrap();
        let parsed: Vec<Environment> = serde_json::from_str(&persisted).unwrap();
        assert_eq!(parsed, vec![Environment::default_local()]);
    }

    #[test]
    fn test_corrupt_state_is_reseeded() {
        let kv: SharedStore = Arc::new(MemoryStore::new());
        kv.set(ENVIRONMENTS_KEY, "{not json").unwrap();
        let store = EnvironmentStore::load(kv).unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].id, DEFAULT_ENVIRONMENT_ID);
    }

    #[test]
    fn test_add_trims_and_starts_disabled() {
        let (mut store, _) = fresh();
        let env = store
            .add("  Staging ", " https://staging.example.com ")
            .unwrap()
            .unwrap();
        assert_eq!(env.name, "Staging");
        assert_eq!(env.url, "https://staging.example.com");
        assert!(!env.enabled);
        assert_ne!(env.id, DEFAULT_ENVIRONMENT_ID);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_add_blank_fields_is_noop() {
        let (mut store, _) = fresh();
        assert!(store.add("", "http://a").unwrap().is_none());
        assert!(store.add("A", "").unwrap().is_none());
        assert!(store.add("   ", "http://a").unwrap().is_none());
        assert!(store.add("A", "\t ").unwrap().is_none());
        assert_eq!(store.list(), &[Environment::default_local()]);
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let (mut store, _) = fresh();
        let a = store.add("A", "http://a").unwrap().unwrap();
        let b = store.add("A", "http://a").unwrap().unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_toggle_keeps_at_most_one_enabled() {
        let (mut store, _) = fresh();
        let a = store.add("A", "http://a").unwrap().unwrap();
        let b = store.add("B", "http://b").unwrap().unwrap();

        let sequence = [
            a.id.as_str(),
            b.id.as_str(),
            b.id.as_str(),
            DEFAULT_ENVIRONMENT_ID,
            a.id.as_str(),
            "unknown",
            a.id.as_str(),
        ];
        for id in sequence {
            store.toggle(id).unwrap();
            assert!(enabled_count(&store) <= 1, "after toggling {}", id);
        }
    }

    #[test]
    fn test_toggle_enables_target_and_disables_others() {
        let (mut store, _) = fresh();
        let a = store.add("A", "http://a").unwrap().unwrap();
        store.toggle(&a.id).unwrap();

        assert!(store.get(&a.id).unwrap().enabled);
        assert!(!store.get(DEFAULT_ENVIRONMENT_ID).unwrap().enabled);
        assert_eq!(store.active().unwrap().id, a.id);
    }

    #[test]
    fn test_toggle_enabled_default_falls_back_to_default() {
        let (mut store, _) = fresh();
        store.toggle(DEFAULT_ENVIRONMENT_ID).unwrap();

        assert!(!store.get(DEFAULT_ENVIRONMENT_ID).unwrap().enabled);
        assert_eq!(enabled_count(&store), 0);
        // Nothing enabled, so the default entry is still the active target
        assert_eq!(store.active().unwrap().id, DEFAULT_ENVIRONMENT_ID);
    }

    #[test]
    fn test_remove_default_is_noop() {
        let (mut store, _) = fresh();
        assert!(!store.remove(DEFAULT_ENVIRONMENT_ID).unwrap());
        assert!(store.get(DEFAULT_ENVIRONMENT_ID).is_some());
    }

    #[test]
    fn test_remove_other_environment() {
        let (mut store, _) = fresh();
        let a = store.add("A", "http://a").unwrap().unwrap();
        assert!(store.remove(&a.id).unwrap());
        assert!(store.get(&a.id).is_none());
        assert!(!store.remove(&a.id).unwrap());
    }

    #[test]
    fn test_active_without_default_is_none() {
        let kv: SharedStore = Arc::new(MemoryStore::new());
        let orphan = vec![Environment {
            id: "x".into(),
            name: "X".into(),
            url: "http://x".into(),
            enabled: false,
        }];
        kv.set(ENVIRONMENTS_KEY, &serde_json::to_string(&orphan).unwrap())
            .unwrap();

        let store = EnvironmentStore::load(kv).unwrap();
        assert!(store.active().is_none());
    }

    #[test]
    fn test_state_survives_reload() {
        let (mut store, kv) = fresh();
        let a = store.add("A", "http://a").unwrap().unwrap();
        store.toggle(&a.id).unwrap();
        drop(store);

        let reloaded = EnvironmentStore::load(kv).unwrap();
        assert_eq!(reloaded.list().len(), 2);
        assert_eq!(reloaded.active().unwrap().url, "http://a");
    }
}
