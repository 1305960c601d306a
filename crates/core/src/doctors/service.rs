//! Doctor directory service

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vitaport_domain::{Doctor, Result};

use crate::store::{QueryCache, QueryFetcher, QueryKey, QueryObserver, Tag};
use crate::validate::required;

use super::ports::DoctorsApi;

/// Doctor directory operations over the port and the query cache
pub struct DoctorsService {
    api: Arc<dyn DoctorsApi>,
    cache: Arc<QueryCache>,
}

impl DoctorsService {
    /// Create the service
    #[must_use]
    pub fn new(api: Arc<dyn DoctorsApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    fn list_key() -> QueryKey {
        QueryKey::new("doctors/list")
    }

    fn details_key(id: &str) -> QueryKey {
        QueryKey::new(format!("doctors/{id}"))
    }

    /// Doctor directory; key `doctors/list`, tag `Doctors`
    pub async fn doctors(&self, cancel: Option<CancellationToken>) -> Result<Arc<Vec<Doctor>>> {
        let api = self.api.clone();
        self.cache
            .fetch(Self::list_key(), &[Tag::Doctors], move || async move {
                api.doctors(cancel).await
            })
            .await
    }

    /// One doctor; key `doctors/{id}`, tag `Doctor(id)`
    pub async fn doctor(
        &self,
        id: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<Arc<Doctor>> {
        let api = self.api.clone();
        let owned_id = id.to_string();
        self.cache
            .fetch(Self::details_key(id), &[Tag::Doctor(id.to_string())], move || async move {
                api.doctor(&owned_id, cancel).await
            })
            .await
    }

    /// Flip a doctor's favorite flag
    ///
    /// Invalidates `Doctors`, `Doctor(id)`, and `User` (the favorite list
    /// lives on the profile). Calling twice restores the original state.
    pub async fn toggle_favorite(
        &self,
        doctor_id: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<()> {
        required("doctorId", doctor_id)?;

        self.api.toggle_favorite(doctor_id, cancel).await?;
        self.cache
            .invalidate_tags(&[Tag::Doctors, Tag::Doctor(doctor_id.to_string()), Tag::User])
            .await;
        tracing::info!(doctor_id, "favorite flag toggled");
        Ok(())
    }

    /// Live subscription to the doctor directory
    pub async fn observe_doctors(&self) -> Result<QueryObserver<Vec<Doctor>>> {
        let api = self.api.clone();
        let fetcher: QueryFetcher<Vec<Doctor>> = Arc::new(move || {
            let api = api.clone();
            Box::pin(async move { api.doctors(None).await })
        });
        QueryObserver::start(self.cache.clone(), Self::list_key(), vec![Tag::Doctors], fetcher)
            .await
    }
}
