//! Key/value store for user preferences such as per-view page sizes.

use std::{num::NonZeroUsize, sync::Arc};

use dashmap::DashMap;
use log::{debug, warn};

/// Persistence for string preferences, injected into whoever needs it.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
}

pub type SharedConfigStore = Arc<dyn ConfigStore>;

/// In-process store; contents live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedConfigStore {
        Arc::new(Self::new())
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

pub fn limit_key(view: &str) -> String {
    format!("{}.limit", view)
}

/// Page size stored for `view`, if any valid one was stored.
pub fn preferred_limit(store: &dyn ConfigStore, view: &str) -> Option<NonZeroUsize> {
    let key = limit_key(view);
    let raw = store.get(&key)?;
    match raw.trim().parse::<usize>().ok().and_then(NonZeroUsize::new) {
        Some(limit) => Some(limit),
        None => {
            warn!("Ignoring invalid stored page size {}={:?}", key, raw);
            None
        }
    }
}

pub fn store_limit(store: &dyn ConfigStore, view: &str, limit: NonZeroUsize) {
    let key = limit_key(view);
    debug!("Storing page size {}={}", key, limit);
    store.set(&key, limit.to_string());
}
