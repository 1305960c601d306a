//! Port interface for the doctor directory endpoints

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use vitaport_domain::{Doctor, Result};

/// Remote doctor directory endpoints
#[async_trait]
pub trait DoctorsApi: Send + Sync {
    /// Full doctor directory
    async fn doctors(&self, cancel: Option<CancellationToken>) -> Result<Vec<Doctor>>;

    /// One doctor's detail view
    async fn doctor(&self, id: &str, cancel: Option<CancellationToken>) -> Result<Doctor>;

    /// Flip the favorite flag for a doctor
    ///
    /// The backend uses the same call for add and remove; the flag state
    /// after the call is whatever the server decided.
    async fn toggle_favorite(
        &self,
        doctor_id: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<()>;
}
