use crate::config::DARK_MODE_KEY;
use crate::store::{KeyValueStore, StoreError};

/// Anything other than the literal `"true"` reads as light mode.
pub fn dark_mode(store: &dyn KeyValueStore) -> Result<bool, StoreError> {
    Ok(store.get(DARK_MODE_KEY)?.as_deref() == Some("true"))
}

pub fn set_dark_mode(store: &dyn KeyValueStore, enabled: bool) -> Result<(), StoreError> {
    store.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
}

pub fn toggle_dark_mode(store: &dyn KeyValueStore) -> Result<bool, StoreError> {
    let enabled = !dark_mode(store)?;
    set_dark_mode(store, enabled)?;
    Ok(enabled)
}
