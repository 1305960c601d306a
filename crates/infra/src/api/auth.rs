//! Auth API client
//!
//! Login/signup/OTP under `/api/auth/*`, personal information under
//! `/api/user/*`. The login-shaped endpoints all return [`LoginReply`];
//! deciding whether a reply is a session or a verification notice is the
//! session service's job, not this client's.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use vitaport_core::{AccessTokenProvider, AuthApi};
use vitaport_domain::{LoginReply, PatientProfile, PersonalInfo, Result, SignupRequest};

use crate::http::HttpClient;

use super::ApiBase;

/// REST client for the auth and profile endpoints
pub struct AuthClient {
    base: ApiBase,
}

impl AuthClient {
    /// Create the client
    #[must_use]
    pub fn new(base_url: &str, http: HttpClient, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self { base: ApiBase::new(base_url, http, tokens) }
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(
        &self,
        email: &str,
        password: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<LoginReply> {
        let builder = self
            .base
            .request(Method::POST, "/api/auth/login")
            .await?
            .json(&serde_json::json!({ "email": email, "password": password }));
        self.base.execute_json(builder, cancel).await
    }

    async fn signup(
        &self,
        request: &SignupRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<LoginReply> {
        let builder =
            self.base.request(Method::POST, "/api/auth/signup").await?.json(request);
        self.base.execute_json(builder, cancel).await
    }

    async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<LoginReply> {
        let builder = self
            .base
            .request(Method::POST, "/api/auth/verify-otp")
            .await?
            .json(&serde_json::json!({ "email": email, "otp": otp }));
        self.base.execute_json(builder, cancel).await
    }

    async fn resend_otp(&self, email: &str, cancel: Option<CancellationToken>) -> Result<()> {
        let builder = self
            .base
            .request(Method::POST, "/api/auth/resend-otp")
            .await?
            .json(&serde_json::json!({ "email": email }));
        self.base.execute_unit(builder, cancel).await
    }

    async fn update_personal_info(
        &self,
        info: &PersonalInfo,
        cancel: Option<CancellationToken>,
    ) -> Result<PatientProfile> {
        let builder = self
            .base
            .request(Method::PUT, "/api/user/personal-information")
            .await?
            .json(info);
        self.base.execute_json(builder, cancel).await
    }
}
