//! Appointments API client
//!
//! Everything under `/api/appointments/*`. Booking is a multipart upload
//! (scalar fields, JSON-encoded medication/diagnosis lists, attached
//! documents) and is therefore sent exactly once; the transition calls
//! are plain verbs on the appointment id.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::multipart::Form;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use vitaport_core::{AccessTokenProvider, AppointmentsApi};
use vitaport_domain::constants::APPOINTMENT_COUNT_ALL;
use vitaport_domain::{Appointment, BookingRequest, Result};

use crate::http::HttpClient;

use super::{file_part, json_encode_error, ApiBase};

/// REST client for the appointment endpoints
pub struct AppointmentsClient {
    base: ApiBase,
}

impl AppointmentsClient {
    /// Create the client
    #[must_use]
    pub fn new(base_url: &str, http: HttpClient, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self { base: ApiBase::new(base_url, http, tokens) }
    }

    fn booking_form(request: &BookingRequest) -> Result<Form> {
        let mut form = Form::new()
            .text("doctorId", request.doctor_id.clone())
            .text("dateTime", request.date_time.to_rfc3339())
            .text("visitReason", request.visit_reason.clone())
            .text("visitType", request.visit_type.clone())
            .text(
                "currentMedications",
                serde_json::to_string(&request.current_medications).map_err(json_encode_error)?,
            )
            .text(
                "priorDiagnoses",
                serde_json::to_string(&request.prior_diagnoses).map_err(json_encode_error)?,
            );

        if let Some(insurance_id) = &request.insurance_id {
            form = form.text("insuranceId", insurance_id.clone());
        }
        if let Some(summary) = &request.summary {
            form = form.text("summary", summary.clone());
        }
        for document in &request.documents {
            form = form.part("documents", file_part(document)?);
        }

        Ok(form)
    }
}

#[async_trait]
impl AppointmentsApi for AppointmentsClient {
    async fn my_appointments(
        &self,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<Appointment>> {
        let builder = self
            .base
            .request(Method::GET, "/api/appointments/my-appointments")
            .await?
            .query(&[("count", APPOINTMENT_COUNT_ALL)]);
        self.base.execute_json(builder, cancel).await
    }

    async fn details(&self, id: &str, cancel: Option<CancellationToken>) -> Result<Appointment> {
        let builder =
            self.base.request(Method::GET, &format!("/api/appointments/{id}/details")).await?;
        self.base.execute_json(builder, cancel).await
    }

    async fn book(
        &self,
        request: &BookingRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Appointment> {
        let form = Self::booking_form(request)?;
        let builder = self
            .base
            .request(Method::POST, "/api/appointments/book")
            .await?
            .multipart(form);
        self.base.execute_json_once(builder, cancel).await
    }

    async fn cancel(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()> {
        let builder =
            self.base.request(Method::DELETE, &format!("/api/appointments/{id}/cancel")).await?;
        self.base.execute_unit(builder, cancel).await
    }

    async fn reschedule(
        &self,
        id: &str,
        new_date_time: DateTime<Utc>,
        cancel: Option<CancellationToken>,
    ) -> Result<()> {
        let builder = self
            .base
            .request(Method::PUT, &format!("/api/appointments/{id}/reschedule"))
            .await?
            .json(&serde_json::json!({ "newDateTime": new_date_time }));
        self.base.execute_unit(builder, cancel).await
    }

    async fn check_in(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()> {
        let builder = self
            .base
            .request(Method::POST, &format!("/api/appointments/{id}/check-in"))
            .await?;
        self.base.execute_unit(builder, cancel).await
    }

    async fn confirm(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()> {
        let builder =
            self.base.request(Method::PUT, &format!("/api/appointments/{id}/confirm")).await?;
        self.base.execute_unit(builder, cancel).await
    }
}
