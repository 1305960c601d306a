//! Appointment service
//!
//! Read path goes through the query cache; every mutation validates its
//! form first, then calls the port, then invalidates its declared tag set
//! with a single call.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use vitaport_domain::{Appointment, BookingRequest, Result, VitaportError};

use crate::store::{QueryCache, QueryFetcher, QueryKey, QueryObserver, Tag};
use crate::validate::required;

use super::ports::AppointmentsApi;

/// Appointment operations over the port and the query cache
pub struct AppointmentsService {
    api: Arc<dyn AppointmentsApi>,
    cache: Arc<QueryCache>,
}

impl AppointmentsService {
    /// Create the service
    #[must_use]
    pub fn new(api: Arc<dyn AppointmentsApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    fn list_key() -> QueryKey {
        QueryKey::new("appointments/my")
    }

    fn details_key(id: &str) -> QueryKey {
        QueryKey::new(format!("appointments/{id}"))
    }

    /// All appointments for the current patient
    ///
    /// Query key `appointments/my`, tag `Appointments`.
    pub async fn my_appointments(
        &self,
        cancel: Option<CancellationToken>,
    ) -> Result<Arc<Vec<Appointment>>> {
        let api = self.api.clone();
        self.cache
            .fetch(Self::list_key(), &[Tag::Appointments], move || async move {
                api.my_appointments(cancel).await
            })
            .await
    }

    /// Detail view of one appointment
    ///
    /// Query key `appointments/{id}`, tag `Appointment(id)`.
    pub async fn details(
        &self,
        id: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<Arc<Appointment>> {
        let api = self.api.clone();
        let owned_id = id.to_string();
        self.cache
            .fetch(
                Self::details_key(id),
                &[Tag::Appointment(id.to_string())],
                move || async move { api.details(&owned_id, cancel).await },
            )
            .await
    }

    /// Appointments still ahead: open status and a future start time
    pub async fn upcoming(
        &self,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<Appointment>> {
        let now = Utc::now();
        let all = self.my_appointments(cancel).await?;
        Ok(all.iter().filter(|a| a.is_upcoming(now)).cloned().collect())
    }

    /// Everything that is not upcoming
    pub async fn past(&self, cancel: Option<CancellationToken>) -> Result<Vec<Appointment>> {
        let now = Utc::now();
        let all = self.my_appointments(cancel).await?;
        Ok(all.iter().filter(|a| !a.is_upcoming(now)).cloned().collect())
    }

    /// Book an appointment
    ///
    /// Validates the form before any request is issued. Invalidates
    /// `Appointments`.
    pub async fn book(
        &self,
        request: BookingRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Appointment> {
        validate_booking(&request)?;

        let appointment = self.api.book(&request, cancel).await?;
        self.cache.invalidate_tags(&[Tag::Appointments]).await;
        tracing::info!(appointment_id = %appointment.id, "appointment booked");
        Ok(appointment)
    }

    /// Cancel an appointment; invalidates `Appointments` + `Appointment(id)`
    pub async fn cancel_appointment(
        &self,
        id: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<()> {
        self.api.cancel(id, cancel).await?;
        self.cache
            .invalidate_tags(&[Tag::Appointments, Tag::Appointment(id.to_string())])
            .await;
        tracing::info!(appointment_id = id, "appointment cancelled");
        Ok(())
    }

    /// Reschedule an appointment; invalidates `Appointments` + `Appointment(id)`
    pub async fn reschedule(
        &self,
        id: &str,
        new_date_time: DateTime<Utc>,
        cancel: Option<CancellationToken>,
    ) -> Result<()> {
        if new_date_time <= Utc::now() {
            return Err(VitaportError::Validation(
                "newDateTime must be in the future".to_string(),
            ));
        }

        self.api.reschedule(id, new_date_time, cancel).await?;
        self.cache
            .invalidate_tags(&[Tag::Appointments, Tag::Appointment(id.to_string())])
            .await;
        Ok(())
    }

    /// Check in for an appointment; invalidates `Appointments` + `Appointment(id)`
    pub async fn check_in(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()> {
        self.api.check_in(id, cancel).await?;
        self.cache
            .invalidate_tags(&[Tag::Appointments, Tag::Appointment(id.to_string())])
            .await;
        Ok(())
    }

    /// Confirm an appointment; invalidates `Appointments` + `Appointment(id)`
    pub async fn confirm(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()> {
        self.api.confirm(id, cancel).await?;
        self.cache
            .invalidate_tags(&[Tag::Appointments, Tag::Appointment(id.to_string())])
            .await;
        Ok(())
    }

    /// Live subscription to the appointment list
    pub async fn observe_my_appointments(&self) -> Result<QueryObserver<Vec<Appointment>>> {
        let api = self.api.clone();
        let fetcher: QueryFetcher<Vec<Appointment>> = Arc::new(move || {
            let api = api.clone();
            Box::pin(async move { api.my_appointments(None).await })
        });
        QueryObserver::start(self.cache.clone(), Self::list_key(), vec![Tag::Appointments], fetcher)
            .await
    }
}

fn validate_booking(request: &BookingRequest) -> Result<()> {
    required("doctorId", &request.doctor_id)?;
    required("visitReason", &request.visit_reason)?;
    required("visitType", &request.visit_type)?;
    if request.date_time <= Utc::now() {
        return Err(VitaportError::Validation("dateTime must be in the future".to_string()));
    }
    Ok(())
}
