//! Tag-invalidated query cache
//!
//! In-memory cache for query results shared by every service. Entries are
//! stored under explicit keys with the tags they provide, expire on a
//! configurable TTL, and are evicted eagerly when a mutation invalidates
//! one of their tags.
//!
//! # Semantics
//!
//! - **Single-flight**: concurrent fetches of one key collapse into a
//!   single fetcher invocation; the winners' result is shared.
//! - **Error handling**: fetch errors are never cached; the next call
//!   runs the fetcher again.
//! - **Invalidation**: evicts every entry registered under the given tags
//!   and broadcasts one event naming the tags and evicted keys.

use std::any::Any;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use moka::future::Cache;
use tokio::sync::{broadcast, Mutex};
use vitaport_domain::{CacheConfig, Result, VitaportError};

use super::tags::{QueryKey, Tag};

/// Default TTL for cached query results (5 minutes)
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Default max number of cached queries
pub const DEFAULT_MAX_CAPACITY: u64 = 1000;

/// Capacity of the invalidation broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Query store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Time-to-live for cached entries
    pub ttl: Duration,

    /// Maximum number of cached entries
    pub max_capacity: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_TTL_SECONDS),
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

impl From<&CacheConfig> for StoreConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl: Duration::from_secs(config.ttl_seconds),
            max_capacity: config.max_capacity,
        }
    }
}

/// Invalidation event delivered to query observers
#[derive(Debug, Clone)]
pub struct Invalidation {
    /// Tags the mutation declared
    pub tags: Vec<Tag>,
    /// Keys that were actually evicted
    pub keys: Vec<QueryKey>,
}

impl Invalidation {
    /// Whether the event intersects the given tag set
    #[must_use]
    pub fn touches(&self, tags: &[Tag]) -> bool {
        self.tags.iter().any(|tag| tags.contains(tag))
    }
}

type CachedValue = Arc<dyn Any + Send + Sync>;

/// In-memory query cache with tag invalidation
pub struct QueryCache {
    entries: Cache<QueryKey, CachedValue>,
    tag_index: DashMap<Tag, HashSet<QueryKey>>,
    in_flight: DashMap<QueryKey, Arc<Mutex<()>>>,
    events: broadcast::Sender<Invalidation>,
}

impl QueryCache {
    /// Create a cache with the given configuration
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        let entries =
            Cache::builder().time_to_live(config.ttl).max_capacity(config.max_capacity).build();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self { entries, tag_index: DashMap::new(), in_flight: DashMap::new(), events }
    }

    /// Resolve a query through the cache
    ///
    /// Returns the cached value when present; otherwise runs `fetch`,
    /// stores the result under `key` with its `tags`, and returns it.
    /// Concurrent calls for the same key wait for the first fetcher
    /// instead of issuing their own request.
    ///
    /// # Errors
    /// Propagates fetcher errors without caching them, and returns
    /// `Internal` if the key is already cached with a different type.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, tags: &[Tag], fetch: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.peek::<T>(&key).await? {
            tracing::debug!(key = %key, "query cache hit");
            return Ok(hit);
        }

        let gate = self
            .in_flight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = gate.lock().await;

        // A concurrent fetch may have landed while we waited on the gate.
        if let Some(hit) = self.peek::<T>(&key).await? {
            tracing::debug!(key = %key, "query cache hit after single-flight wait");
            return Ok(hit);
        }

        tracing::debug!(key = %key, "query cache miss, running fetcher");
        let outcome = match fetch().await {
            Ok(value) => {
                let value = Arc::new(value);
                self.store(&key, tags, value.clone()).await;
                Ok(value)
            }
            // Never cache a failed fetch.
            Err(err) => Err(err),
        };

        drop(guard);
        self.in_flight.remove(&key);
        outcome
    }

    /// Read a cached value without fetching
    ///
    /// # Errors
    /// Returns `Internal` if the key is cached with a different type.
    pub async fn peek<T>(&self, key: &QueryKey) -> Result<Option<Arc<T>>>
    where
        T: Send + Sync + 'static,
    {
        let Some(value) = self.entries.get(key).await else {
            return Ok(None);
        };

        let value = value.downcast::<T>().map_err(|_| {
            VitaportError::Internal(format!("query {key} is cached with a different result type"))
        })?;
        Ok(Some(value))
    }

    async fn store(&self, key: &QueryKey, tags: &[Tag], value: CachedValue) {
        for tag in tags {
            self.tag_index.entry(tag.clone()).or_default().insert(key.clone());
        }
        self.entries.insert(key.clone(), value).await;
    }

    /// Evict every entry registered under any of the tags and notify
    /// observers with a single event
    ///
    /// One mutation must translate into exactly one call here so that
    /// observers refetch exactly once.
    pub async fn invalidate_tags(&self, tags: &[Tag]) {
        let mut evicted: HashSet<QueryKey> = HashSet::new();
        for tag in tags {
            if let Some((_, keys)) = self.tag_index.remove(tag) {
                for key in keys {
                    self.entries.invalidate(&key).await;
                    evicted.insert(key);
                }
            }
        }

        let event = Invalidation { tags: tags.to_vec(), keys: evicted.into_iter().collect() };
        tracing::debug!(tags = ?event.tags, evicted = event.keys.len(), "cache tags invalidated");

        // Send failure just means nothing is mounted right now.
        let _ = self.events.send(event);
    }

    /// Drop every cached entry and tag registration (logout path)
    pub fn clear(&self) {
        self.entries.invalidate_all();
        self.tag_index.clear();
        tracing::info!("query cache cleared");
    }

    /// Subscribe to invalidation events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Invalidation> {
        self.events.subscribe()
    }

    /// Number of cached entries (for diagnostics and tests)
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}
