//! Session credential types
//!
//! Created on login/signup success, persisted through the credential
//! store, and read on every request to populate the bearer header.

use serde::{Deserialize, Serialize};

use crate::types::patient::{OnboardingRoute, PatientProfile};

/// Access/refresh token pair issued by the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Raw reply shape shared by the login, signup, and OTP endpoints
///
/// The backend either returns a full session (`user` + both tokens) or a
/// bare `message` (e.g. the verification-pending notice). All fields are
/// optional on the wire; the session service decides which shape it is.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<PatientProfile>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Registration form submitted to the signup endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Result of a login/signup/OTP attempt, after session persistence
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Session persisted; the consumer should continue to the given route
    Authenticated { user: PatientProfile, onboarding: OnboardingRoute },
    /// Email not verified; nothing was persisted and the consumer should
    /// redirect to the verification page
    VerificationRequired { redirect: String },
}

impl LoginOutcome {
    /// Whether a session was persisted
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}
