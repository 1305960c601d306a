//! Port interfaces for authentication and session persistence
//!
//! These traits define the boundaries between core session logic and the
//! infrastructure implementations (HTTP auth client, on-device credential
//! file).

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use vitaport_domain::constants::ACCESS_TOKEN_KEY;
use vitaport_domain::{LoginReply, PatientProfile, PersonalInfo, Result, SignupRequest};

/// Remote auth and profile endpoints
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a session
    async fn login(
        &self,
        email: &str,
        password: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<LoginReply>;

    /// Register a new patient account
    async fn signup(
        &self,
        request: &SignupRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<LoginReply>;

    /// Complete email verification with a one-time passcode
    async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<LoginReply>;

    /// Request a fresh verification passcode
    async fn resend_otp(&self, email: &str, cancel: Option<CancellationToken>) -> Result<()>;

    /// Replace the patient's personal information
    async fn update_personal_info(
        &self,
        info: &PersonalInfo,
        cancel: Option<CancellationToken>,
    ) -> Result<PatientProfile>;
}

/// On-device key/value storage for session credentials
///
/// Implementations persist the `accessToken`, `refreshToken`, and `user`
/// keys across restarts. Key names are part of the storage contract (see
/// `vitaport_domain::constants`).
pub trait CredentialStore: Send + Sync {
    /// Read a stored value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a single key
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove everything (logout)
    fn clear(&self) -> Result<()>;
}

/// Provides bearer tokens to authorize API calls
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Current bearer token, or `None` when no session is persisted
    ///
    /// Requests proceed unauthenticated when this returns `None`; the
    /// backend's rejection surfaces as an auth error.
    async fn access_token(&self) -> Result<Option<String>>;
}

/// Token provider backed by the credential store
pub struct StoredTokenProvider {
    store: Arc<dyn CredentialStore>,
}

impl StoredTokenProvider {
    /// Create a provider reading from the given store
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AccessTokenProvider for StoredTokenProvider {
    async fn access_token(&self) -> Result<Option<String>> {
        self.store.get(ACCESS_TOKEN_KEY)
    }
}
