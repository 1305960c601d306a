//! Insurance API client
//!
//! CRUD under `/api/insurance`. Creation is a multipart upload carrying
//! the card and signature images plus the subscriber record as a JSON
//! text part; updates are plain JSON without files.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use vitaport_core::{AccessTokenProvider, InsuranceApi};
use vitaport_domain::{InsuranceCard, InsuranceForm, InsuranceUpdate, Result};

use crate::http::HttpClient;

use super::{file_part, json_encode_error, ApiBase};

/// REST client for the insurance endpoints
pub struct InsuranceClient {
    base: ApiBase,
}

impl InsuranceClient {
    /// Create the client
    #[must_use]
    pub fn new(base_url: &str, http: HttpClient, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self { base: ApiBase::new(base_url, http, tokens) }
    }

    fn card_form(form: &InsuranceForm) -> Result<Form> {
        let mut multipart = Form::new()
            .text("insuranceName", form.insurance_name.clone())
            .text("contractId", form.contract_id.clone())
            .text("groupNumber", form.group_number.clone())
            .text("patientRelationship", form.patient_relationship.clone())
            .text(
                "subscriber",
                serde_json::to_string(&form.subscriber).map_err(json_encode_error)?,
            );

        if let Some(card) = &form.card_image {
            multipart = multipart.part("insuranceCard", file_part(card)?);
        }
        if let Some(signature) = &form.signature_image {
            multipart = multipart.part("digitalSignature", file_part(signature)?);
        }

        Ok(multipart)
    }
}

#[async_trait]
impl InsuranceApi for InsuranceClient {
    async fn cards(&self, cancel: Option<CancellationToken>) -> Result<Vec<InsuranceCard>> {
        let builder = self.base.request(Method::GET, "/api/insurance").await?;
        self.base.execute_json(builder, cancel).await
    }

    async fn create(
        &self,
        form: &InsuranceForm,
        cancel: Option<CancellationToken>,
    ) -> Result<InsuranceCard> {
        let multipart = Self::card_form(form)?;
        let builder =
            self.base.request(Method::POST, "/api/insurance").await?.multipart(multipart);
        self.base.execute_json_once(builder, cancel).await
    }

    async fn update(
        &self,
        id: &str,
        update: &InsuranceUpdate,
        cancel: Option<CancellationToken>,
    ) -> Result<InsuranceCard> {
        let builder =
            self.base.request(Method::PUT, &format!("/api/insurance/{id}")).await?.json(update);
        self.base.execute_json(builder, cancel).await
    }

    async fn delete(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()> {
        let builder = self.base.request(Method::DELETE, &format!("/api/insurance/{id}")).await?;
        self.base.execute_unit(builder, cancel).await
    }
}
