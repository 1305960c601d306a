//! Patient document service

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vitaport_domain::{DocumentCategory, FileUpload, PatientDocument, Result};

use crate::store::{QueryCache, QueryKey, Tag};
use crate::validate::required;

use super::ports::DocumentsApi;

/// Document and category operations over the port and the query cache
pub struct DocumentsService {
    api: Arc<dyn DocumentsApi>,
    cache: Arc<QueryCache>,
}

impl DocumentsService {
    /// Create the service
    #[must_use]
    pub fn new(api: Arc<dyn DocumentsApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    fn categories_key() -> QueryKey {
        QueryKey::new("documents/categories")
    }

    fn documents_key(category_id: Option<&str>) -> QueryKey {
        match category_id {
            Some(category) => QueryKey::new(format!("documents/list?category={category}")),
            None => QueryKey::new("documents/list"),
        }
    }

    /// Category list; tag `DocumentCategories`
    pub async fn categories(
        &self,
        cancel: Option<CancellationToken>,
    ) -> Result<Arc<Vec<DocumentCategory>>> {
        let api = self.api.clone();
        self.cache
            .fetch(Self::categories_key(), &[Tag::DocumentCategories], move || async move {
                api.categories(cancel).await
            })
            .await
    }

    /// Create a category; invalidates `DocumentCategories`
    ///
    /// Category names are taken as typed; the portal does no dedup or
    /// normalization.
    pub async fn create_category(
        &self,
        name: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<DocumentCategory> {
        required("name", name)?;

        let category = self.api.create_category(name, cancel).await?;
        self.cache.invalidate_tags(&[Tag::DocumentCategories]).await;
        Ok(category)
    }

    /// Delete a category; invalidates `DocumentCategories` + `Documents`
    pub async fn delete_category(
        &self,
        id: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<()> {
        self.api.delete_category(id, cancel).await?;
        self.cache.invalidate_tags(&[Tag::DocumentCategories, Tag::Documents]).await;
        Ok(())
    }

    /// Document list, optionally per category; tag `Documents`
    pub async fn documents(
        &self,
        category_id: Option<&str>,
        cancel: Option<CancellationToken>,
    ) -> Result<Arc<Vec<PatientDocument>>> {
        let api = self.api.clone();
        let owned_category = category_id.map(ToString::to_string);
        self.cache
            .fetch(Self::documents_key(category_id), &[Tag::Documents], move || async move {
                api.documents(owned_category.as_deref(), cancel).await
            })
            .await
    }

    /// Upload a document; invalidates `Documents`
    pub async fn upload(
        &self,
        category_id: Option<&str>,
        file: FileUpload,
        cancel: Option<CancellationToken>,
    ) -> Result<PatientDocument> {
        required("fileName", &file.file_name)?;

        let document = self.api.upload(category_id, &file, cancel).await?;
        self.cache.invalidate_tags(&[Tag::Documents]).await;
        tracing::info!(document_id = %document.id, "document uploaded");
        Ok(document)
    }

    /// Delete a document; invalidates `Documents`
    pub async fn delete(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()> {
        self.api.delete(id, cancel).await?;
        self.cache.invalidate_tags(&[Tag::Documents]).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use vitaport_domain::VitaportError;

    use crate::store::StoreConfig;

    use super::*;

    #[derive(Default)]
    struct FakeDocumentsApi {
        upload_calls: AtomicUsize,
        list_calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentsApi for FakeDocumentsApi {
        async fn categories(
            &self,
            _cancel: Option<CancellationToken>,
        ) -> Result<Vec<DocumentCategory>> {
            Ok(Vec::new())
        }

        async fn create_category(
            &self,
            name: &str,
            _cancel: Option<CancellationToken>,
        ) -> Result<DocumentCategory> {
            Ok(DocumentCategory { id: "c1".to_string(), name: name.to_string(), document_count: None })
        }

        async fn delete_category(
            &self,
            _id: &str,
            _cancel: Option<CancellationToken>,
        ) -> Result<()> {
            Ok(())
        }

        async fn documents(
            &self,
            _category_id: Option<&str>,
            _cancel: Option<CancellationToken>,
        ) -> Result<Vec<PatientDocument>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn upload(
            &self,
            _category_id: Option<&str>,
            file: &FileUpload,
            _cancel: Option<CancellationToken>,
        ) -> Result<PatientDocument> {
            self.upload_calls.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::from_value(serde_json::json!({
                "id": "doc-1",
                "fileName": file.file_name
            }))
            .unwrap())
        }

        async fn delete(&self, _id: &str, _cancel: Option<CancellationToken>) -> Result<()> {
            Ok(())
        }
    }

    fn service(api: Arc<FakeDocumentsApi>) -> DocumentsService {
        DocumentsService::new(api, Arc::new(QueryCache::new(StoreConfig::default())))
    }

    #[tokio::test]
    async fn nameless_upload_is_rejected_before_the_network() {
        let api = Arc::new(FakeDocumentsApi::default());
        let service = service(api.clone());

        let result =
            service.upload(None, FileUpload::new("", "application/pdf", vec![1, 2]), None).await;
        assert!(matches!(result, Err(VitaportError::Validation(_))));
        assert_eq!(api.upload_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn per_category_lists_cache_independently() {
        let api = Arc::new(FakeDocumentsApi::default());
        let service = service(api.clone());

        service.documents(None, None).await.unwrap();
        service.documents(Some("c1"), None).await.unwrap();
        service.documents(Some("c1"), None).await.unwrap();

        // Two distinct keys, each fetched once.
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn upload_invalidates_every_document_list() {
        let api = Arc::new(FakeDocumentsApi::default());
        let service = service(api.clone());

        service.documents(None, None).await.unwrap();
        service.documents(Some("c1"), None).await.unwrap();
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 2);

        service
            .upload(Some("c1"), FileUpload::new("scan.pdf", "application/pdf", vec![1]), None)
            .await
            .unwrap();

        service.documents(None, None).await.unwrap();
        service.documents(Some("c1"), None).await.unwrap();
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 4);
    }
}
