use std::{
    fs,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use dashmap::{mapref::one::RefMut, DashMap};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::{
    config::{Config, CONFIG},
    controller::PaginationController,
    notifications::{create_event_bus, SharedEventBus},
    settings::{MemoryStore, SharedConfigStore},
};

pub static STATE: Lazy<State> =
    Lazy::new(|| State::new(&CONFIG).expect("Failed to create state"));

/// Cached response body, valid until `expires_at`.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub body: String,
    pub expires_at: Instant,
}

#[derive(Clone)]
pub struct State {
    pub config: Arc<Config>,
    pub records: Arc<[Value]>,
    pub views: Arc<DashMap<String, PaginationController<Value>>>,
    pub events: SharedEventBus,
    pub store: SharedConfigStore,
    pub cache: Arc<DashMap<String, CachedResponse>>,
}

impl State {
    pub fn new(config: &Config) -> Result<Self> {
        let records = match &config.data_path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let records = load_records(&raw)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                info!("Loaded {} records from {}", records.len(), path.display());
                records
            }
            None => Vec::new(),
        };
        Ok(Self::with_records(config.clone(), records))
    }

    pub fn with_records(config: Config, records: Vec<Value>) -> Self {
        Self {
            config: Arc::new(config),
            records: records.into(),
            views: Arc::new(DashMap::new()),
            events: create_event_bus(),
            store: MemoryStore::shared(),
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the named view, creating it on first use. New views are refused
    /// once `max_views` exist.
    pub fn view(&self, name: &str) -> Option<RefMut<'_, String, PaginationController<Value>>> {
        if let Some(view) = self.views.get_mut(name) {
            return Some(view);
        }
        if self.views.len() >= self.config.max_views {
            warn!("Refusing view {:?}: {} views already open", name, self.views.len());
            return None;
        }
        Some(self.views.entry(name.to_string()).or_insert_with(|| {
            info!("Creating view {:?}", name);
            let limit = self.config.paging.default_limit;
            PaginationController::with_limit(self.records.clone(), limit)
                .with_max_visible(self.config.paging.max_visible)
                .with_store(name, self.store.clone())
                .with_event_bus(name, self.events.clone())
        }))
    }

    /// Cached body for `key`, dropping it when it has expired.
    pub fn cached_response(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let body = self
            .cache
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.body.clone());
        if body.is_none() {
            self.cache.remove_if(key, |_, entry| entry.expires_at <= now);
        }
        body
    }

    /// Stores `body` under `key` for `ttl`. Expired entries are swept once the
    /// cache reaches `cache_capacity`; if it is still full the body is not
    /// cached.
    pub fn cache_response(&self, key: String, body: String, ttl: Duration) -> bool {
        let now = Instant::now();
        if self.cache.len() >= self.config.cache_capacity && !self.cache.contains_key(&key) {
            self.cache.retain(|_, entry| entry.expires_at > now);
            if self.cache.len() >= self.config.cache_capacity {
                debug!("Response cache full, not caching {}", key);
                return false;
            }
        }
        self.cache.insert(
            key,
            CachedResponse {
                body,
                expires_at: now + ttl,
            },
        );
        true
    }
}

fn load_records(raw: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(records) => Ok(records),
        other => bail!("expected a JSON array of records, found {}", kind(&other)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
