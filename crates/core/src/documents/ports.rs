//! Port interface for the document endpoints

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use vitaport_domain::{DocumentCategory, FileUpload, PatientDocument, Result};

/// Remote document and category endpoints
#[async_trait]
pub trait DocumentsApi: Send + Sync {
    /// All document categories
    async fn categories(
        &self,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<DocumentCategory>>;

    /// Create a category
    async fn create_category(
        &self,
        name: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<DocumentCategory>;

    /// Delete a category
    async fn delete_category(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()>;

    /// Documents, optionally filtered by category
    async fn documents(
        &self,
        category_id: Option<&str>,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<PatientDocument>>;

    /// Upload a document (multipart)
    async fn upload(
        &self,
        category_id: Option<&str>,
        file: &FileUpload,
        cancel: Option<CancellationToken>,
    ) -> Result<PatientDocument>;

    /// Delete a document
    async fn delete(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()>;
}
