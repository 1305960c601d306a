//! Waitlist service

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vitaport_domain::{Result, WaitlistEntry};

use crate::store::{QueryCache, QueryKey, Tag};

use super::ports::WaitlistApi;

/// Waitlist operations over the port and the query cache
pub struct WaitlistService {
    api: Arc<dyn WaitlistApi>,
    cache: Arc<QueryCache>,
}

impl WaitlistService {
    /// Create the service
    #[must_use]
    pub fn new(api: Arc<dyn WaitlistApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    fn list_key() -> QueryKey {
        QueryKey::new("waitlist/my")
    }

    /// Waitlist entries; key `waitlist/my`, tag `Waitlist`
    pub async fn my_entries(
        &self,
        cancel: Option<CancellationToken>,
    ) -> Result<Arc<Vec<WaitlistEntry>>> {
        let api = self.api.clone();
        self.cache
            .fetch(Self::list_key(), &[Tag::Waitlist], move || async move {
                api.my_entries(cancel).await
            })
            .await
    }

    /// Remove an entry; invalidates `Waitlist`
    pub async fn remove(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()> {
        self.api.remove(id, cancel).await?;
        self.cache.invalidate_tags(&[Tag::Waitlist]).await;
        tracing::info!(entry_id = id, "waitlist entry removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::store::StoreConfig;

    use super::*;

    struct FakeWaitlistApi {
        entries: Mutex<Vec<WaitlistEntry>>,
        list_calls: AtomicUsize,
    }

    #[async_trait]
    impl WaitlistApi for FakeWaitlistApi {
        async fn my_entries(
            &self,
            _cancel: Option<CancellationToken>,
        ) -> Result<Vec<WaitlistEntry>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.entries.lock().unwrap().clone())
        }

        async fn remove(&self, id: &str, _cancel: Option<CancellationToken>) -> Result<()> {
            self.entries.lock().unwrap().retain(|entry| entry.id != id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn removal_invalidates_the_list() {
        let entry: WaitlistEntry = serde_json::from_value(serde_json::json!({
            "id": "w1",
            "doctorId": "d1",
            "preference": "nextAvailable",
            "status": "waiting"
        }))
        .unwrap();
        let api = Arc::new(FakeWaitlistApi {
            entries: Mutex::new(vec![entry]),
            list_calls: AtomicUsize::new(0),
        });
        let service =
            WaitlistService::new(api.clone(), Arc::new(QueryCache::new(StoreConfig::default())));

        assert_eq!(service.my_entries(None).await.unwrap().len(), 1);

        service.remove("w1", None).await.unwrap();

        assert!(service.my_entries(None).await.unwrap().is_empty());
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 2);
    }
}
