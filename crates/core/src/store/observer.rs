//! Query observers
//!
//! An observer is the subscription half of a query: it resolves the query
//! immediately, exposes the latest value through a watch channel, and
//! refetches exactly once for every invalidation event that touches its
//! tags. Dropping the observer cancels its background task.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use vitaport_domain::{Result, VitaportError};

use super::query_cache::{Invalidation, QueryCache};
use super::tags::{QueryKey, Tag};

/// Fetcher a service installs for one observed query
pub type QueryFetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// Live subscription to a single query
pub struct QueryObserver<T> {
    latest: watch::Receiver<Option<Arc<T>>>,
    task: JoinHandle<()>,
}

impl<T: Send + Sync + 'static> QueryObserver<T> {
    /// Start observing a query
    ///
    /// Performs the initial fetch through the cache (sharing in-flight
    /// requests with other observers of the same key), then refetches on
    /// every invalidation event intersecting `tags`.
    ///
    /// # Errors
    /// Fails when the initial fetch fails; later refetch failures keep
    /// the previous value and are logged.
    pub async fn start(
        cache: Arc<QueryCache>,
        key: QueryKey,
        tags: Vec<Tag>,
        fetcher: QueryFetcher<T>,
    ) -> Result<Self> {
        // Subscribe before the initial fetch so an invalidation landing in
        // between is not lost.
        let mut events = cache.subscribe();
        let initial = cache.fetch(key.clone(), &tags, || fetcher()).await?;
        let (tx, rx) = watch::channel(Some(initial));

        let task = tokio::spawn(async move {
            loop {
                let event = match events.recv().await {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(key = %key, missed, "query observer lagged, forcing refetch");
                        Invalidation { tags: tags.clone(), keys: Vec::new() }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };

                if !event.touches(&tags) {
                    continue;
                }

                match cache.fetch(key.clone(), &tags, || fetcher()).await {
                    Ok(value) => {
                        if tx.send(Some(value)).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(key = %key, error = %err, "query observer refetch failed");
                    }
                }
            }
        });

        Ok(Self { latest: rx, task })
    }

    /// Latest resolved value
    #[must_use]
    pub fn current(&self) -> Option<Arc<T>> {
        self.latest.borrow().clone()
    }

    /// Wait until the observed value changes
    ///
    /// # Errors
    /// Returns `Internal` when the observer task has ended.
    pub async fn changed(&mut self) -> Result<()> {
        self.latest
            .changed()
            .await
            .map_err(|_| VitaportError::Internal("query observer task ended".to_string()))
    }

    /// A watch receiver for consumers that want their own handle
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Option<Arc<T>>> {
        self.latest.clone()
    }
}

impl<T> Drop for QueryObserver<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
