//! Port interface for the appointment endpoints

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use vitaport_domain::{Appointment, BookingRequest, Result};

/// Remote appointment endpoints
#[async_trait]
pub trait AppointmentsApi: Send + Sync {
    /// Full (unpaginated) appointment list for the current patient
    async fn my_appointments(
        &self,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<Appointment>>;

    /// Detail view of one appointment
    async fn details(&self, id: &str, cancel: Option<CancellationToken>) -> Result<Appointment>;

    /// Book a new appointment (multipart upload)
    async fn book(
        &self,
        request: &BookingRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Appointment>;

    /// Cancel an appointment
    async fn cancel(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()>;

    /// Move an appointment to a new slot
    async fn reschedule(
        &self,
        id: &str,
        new_date_time: DateTime<Utc>,
        cancel: Option<CancellationToken>,
    ) -> Result<()>;

    /// Record patient arrival
    async fn check_in(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()>;

    /// Confirm a booked appointment
    async fn confirm(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()>;
}
