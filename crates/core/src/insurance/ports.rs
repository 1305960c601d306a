//! Port interface for the insurance endpoints

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use vitaport_domain::{InsuranceCard, InsuranceForm, InsuranceUpdate, Result};

/// Remote insurance endpoints
#[async_trait]
pub trait InsuranceApi: Send + Sync {
    /// Cards on file for the current patient
    async fn cards(&self, cancel: Option<CancellationToken>) -> Result<Vec<InsuranceCard>>;

    /// Create a card (multipart upload with card/signature images)
    async fn create(
        &self,
        form: &InsuranceForm,
        cancel: Option<CancellationToken>,
    ) -> Result<InsuranceCard>;

    /// Update a card's fields (JSON, no file uploads)
    async fn update(
        &self,
        id: &str,
        update: &InsuranceUpdate,
        cancel: Option<CancellationToken>,
    ) -> Result<InsuranceCard>;

    /// Delete a card
    async fn delete(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()>;
}
