//! Patient profile types
//!
//! Current-user snapshot returned by the auth endpoints and persisted in
//! the credential store under the `user` key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::insurance::InsuranceCard;

/// Patient profile as returned by the portal backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    /// Onboarding-step counter; see [`OnboardingRoute::from_step`]
    #[serde(default)]
    pub verification_step: i32,
    #[serde(default)]
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub insurance_info: Vec<InsuranceCard>,
    /// Ids of doctors the patient has marked as favorites
    #[serde(default)]
    pub favorite_doctors: Vec<String>,
}

impl PatientProfile {
    /// Patient's display name
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Personal information collected by the onboarding forms
///
/// The date of birth is a calendar date and is transmitted as an ISO
/// `YYYY-MM-DD` string, never a locale-formatted one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default, alias = "driverLicense")]
    pub license_number: Option<String>,
    /// Last four digits of the SSN; the full number is never held client-side
    #[serde(default, rename = "ssnLast4")]
    pub ssn_last4: Option<String>,
}

/// Postal address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Setup page a consumer should redirect to after authentication
///
/// Derived from the profile's onboarding-step counter. The portal treats
/// steps 0 and 1 as "personal information pending", step 2 as "insurance
/// pending", and anything beyond as fully onboarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingRoute {
    PersonalInformation,
    Insurance,
    Complete,
}

impl OnboardingRoute {
    /// Map the profile's step counter to the route to show next
    #[must_use]
    pub fn from_step(step: i32) -> Self {
        match step {
            i32::MIN..=1 => Self::PersonalInformation,
            2 => Self::Insurance,
            _ => Self::Complete,
        }
    }

    /// Path of the page this route points at
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::PersonalInformation => "/onboarding/personal-information",
            Self::Insurance => "/onboarding/insurance",
            Self::Complete => "/dashboard",
        }
    }
}
