//! Port interface for the waitlist endpoints

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use vitaport_domain::{Result, WaitlistEntry};

/// Remote waitlist endpoints
#[async_trait]
pub trait WaitlistApi: Send + Sync {
    /// Waitlist entries for the current patient
    async fn my_entries(&self, cancel: Option<CancellationToken>) -> Result<Vec<WaitlistEntry>>;

    /// Remove an entry
    async fn remove(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()>;
}
