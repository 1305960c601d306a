//! Doctor directory API client
//!
//! Directory reads under `/api/user/doctors`, favorite toggling through
//! `/api/user/favorites`. The backend uses one favorites call for add and
//! remove alike.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use vitaport_core::{AccessTokenProvider, DoctorsApi};
use vitaport_domain::{Doctor, Result};

use crate::http::HttpClient;

use super::ApiBase;

/// REST client for the doctor directory endpoints
pub struct DoctorsClient {
    base: ApiBase,
}

impl DoctorsClient {
    /// Create the client
    #[must_use]
    pub fn new(base_url: &str, http: HttpClient, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self { base: ApiBase::new(base_url, http, tokens) }
    }
}

#[async_trait]
impl DoctorsApi for DoctorsClient {
    async fn doctors(&self, cancel: Option<CancellationToken>) -> Result<Vec<Doctor>> {
        let builder = self.base.request(Method::GET, "/api/user/doctors").await?;
        self.base.execute_json(builder, cancel).await
    }

    async fn doctor(&self, id: &str, cancel: Option<CancellationToken>) -> Result<Doctor> {
        let builder = self.base.request(Method::GET, &format!("/api/user/doctors/{id}")).await?;
        self.base.execute_json(builder, cancel).await
    }

    async fn toggle_favorite(
        &self,
        doctor_id: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<()> {
        let builder = self
            .base
            .request(Method::POST, "/api/user/favorites")
            .await?
            .json(&serde_json::json!({ "doctorId": doctor_id }));
        self.base.execute_unit(builder, cancel).await
    }
}
