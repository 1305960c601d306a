//! Waitlist entry types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Patient preference attached to a waitlist entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaitlistPreference {
    NextAvailable,
    SpecificDate,
}

/// Waitlist entry for an earlier slot with a doctor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: String,
    #[serde(alias = "doctor")]
    pub doctor_id: String,
    pub preference: WaitlistPreference,
    /// Set when the preference is [`WaitlistPreference::SpecificDate`]
    #[serde(default)]
    pub preferred_date: Option<NaiveDate>,
    /// Backend-assigned status tag; the client treats it as opaque
    #[serde(default)]
    pub status: Option<String>,
}
