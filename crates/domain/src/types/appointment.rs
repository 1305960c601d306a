//! Appointment types
//!
//! Appointments are created by the booking mutation and transitioned by
//! reschedule/cancel/check-in/confirm, each a separate network call. The
//! client enforces no state machine; the backend rejects illegal
//! transitions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::upload::FileUpload;

/// Fixed set of status tags the backend assigns to appointments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
    Booked,
    Confirmed,
}

impl AppointmentStatus {
    /// Statuses that count toward the "upcoming" filtered view
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Booked | Self::Scheduled | Self::Confirmed)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no-show",
            Self::Booked => "booked",
            Self::Confirmed => "confirmed",
        };
        f.write_str(tag)
    }
}

/// Appointment record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    #[serde(alias = "patient")]
    pub patient_id: String,
    #[serde(alias = "doctor")]
    pub doctor_id: String,
    pub date_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub visit_reason: Option<String>,
    #[serde(default)]
    pub visit_type: Option<String>,
    #[serde(default, alias = "insurance")]
    pub insurance_id: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Backend references of documents attached at booking time
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub current_medications: Vec<Medication>,
    #[serde(default)]
    pub prior_diagnoses: Vec<Diagnosis>,
    #[serde(default)]
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Whether the appointment belongs in the upcoming view at `now`
    #[must_use]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status.is_open() && self.date_time > now
    }
}

/// Medication the patient reports taking at booking time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
}

/// Prior diagnosis the patient reports at booking time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub name: String,
    #[serde(default)]
    pub diagnosed_on: Option<NaiveDate>,
}

/// Booking form submitted to the book mutation
///
/// Travels as a multipart form: scalar fields as text parts, `documents`
/// as file parts, medications/diagnoses as JSON-encoded text parts.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub doctor_id: String,
    pub date_time: DateTime<Utc>,
    pub visit_reason: String,
    pub visit_type: String,
    pub insurance_id: Option<String>,
    pub summary: Option<String>,
    pub documents: Vec<FileUpload>,
    pub current_medications: Vec<Medication>,
    pub prior_diagnoses: Vec<Diagnosis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tags_round_trip_the_wire_spelling() {
        assert_eq!(serde_json::to_string(&AppointmentStatus::NoShow).unwrap(), r#""no-show""#);
        assert_eq!(
            serde_json::from_str::<AppointmentStatus>(r#""booked""#).unwrap(),
            AppointmentStatus::Booked
        );
    }

    #[test]
    fn upcoming_requires_open_status_and_future_start() {
        let now = Utc::now();
        let mut appointment: Appointment = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "patient": "p1",
            "doctor": "d1",
            "dateTime": (now + chrono::Duration::hours(2)).to_rfc3339(),
            "status": "booked"
        }))
        .unwrap();

        assert!(appointment.is_upcoming(now));

        appointment.status = AppointmentStatus::Cancelled;
        assert!(!appointment.is_upcoming(now));

        appointment.status = AppointmentStatus::Scheduled;
        appointment.date_time = now - chrono::Duration::hours(1);
        assert!(!appointment.is_upcoming(now));
    }

    #[test]
    fn accepts_insurance_field_name_fallback() {
        let appointment: Appointment = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "patientId": "p1",
            "doctorId": "d1",
            "dateTime": "2026-09-01T15:30:00Z",
            "status": "scheduled",
            "insurance": "ins-9"
        }))
        .unwrap();

        assert_eq!(appointment.insurance_id.as_deref(), Some("ins-9"));
    }
}
