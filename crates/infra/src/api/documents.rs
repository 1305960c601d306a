//! Documents API client
//!
//! Category CRUD under `/api/user/documents/categories`, document CRUD
//! under `/api/user/documents`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use vitaport_core::{AccessTokenProvider, DocumentsApi};
use vitaport_domain::{DocumentCategory, FileUpload, PatientDocument, Result};

use crate::http::HttpClient;

use super::{file_part, ApiBase};

/// REST client for the document endpoints
pub struct DocumentsClient {
    base: ApiBase,
}

impl DocumentsClient {
    /// Create the client
    #[must_use]
    pub fn new(base_url: &str, http: HttpClient, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self { base: ApiBase::new(base_url, http, tokens) }
    }
}

#[async_trait]
impl DocumentsApi for DocumentsClient {
    async fn categories(
        &self,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<DocumentCategory>> {
        let builder = self.base.request(Method::GET, "/api/user/documents/categories").await?;
        self.base.execute_json(builder, cancel).await
    }

    async fn create_category(
        &self,
        name: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<DocumentCategory> {
        let builder = self
            .base
            .request(Method::POST, "/api/user/documents/categories")
            .await?
            .json(&serde_json::json!({ "name": name }));
        self.base.execute_json(builder, cancel).await
    }

    async fn delete_category(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()> {
        let builder = self
            .base
            .request(Method::DELETE, &format!("/api/user/documents/categories/{id}"))
            .await?;
        self.base.execute_unit(builder, cancel).await
    }

    async fn documents(
        &self,
        category_id: Option<&str>,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<PatientDocument>> {
        let mut builder = self.base.request(Method::GET, "/api/user/documents").await?;
        if let Some(category) = category_id {
            builder = builder.query(&[("category", category)]);
        }
        self.base.execute_json(builder, cancel).await
    }

    async fn upload(
        &self,
        category_id: Option<&str>,
        file: &FileUpload,
        cancel: Option<CancellationToken>,
    ) -> Result<PatientDocument> {
        let mut form = Form::new().part("document", file_part(file)?);
        if let Some(category) = category_id {
            form = form.text("categoryId", category.to_string());
        }

        let builder =
            self.base.request(Method::POST, "/api/user/documents").await?.multipart(form);
        self.base.execute_json_once(builder, cancel).await
    }

    async fn delete(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()> {
        let builder =
            self.base.request(Method::DELETE, &format!("/api/user/documents/{id}")).await?;
        self.base.execute_unit(builder, cancel).await
    }
}
