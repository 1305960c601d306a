//! Session service
//!
//! Owns the login/signup/verification flows and the persisted session.
//! The persistence contract: on success, `accessToken`, `refreshToken`,
//! and the serialized `user` snapshot are written to the credential store
//! under exactly those keys; a verification-pending reply persists
//! nothing.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vitaport_domain::constants::{
    ACCESS_TOKEN_KEY, EMAIL_NOT_VERIFIED_MESSAGE, REFRESH_TOKEN_KEY, USER_KEY,
};
use vitaport_domain::{
    LoginOutcome, LoginReply, OnboardingRoute, PatientProfile, PersonalInfo, Result,
    SignupRequest, VitaportError,
};

use crate::store::{QueryCache, Tag};
use crate::validate::required;

use super::ports::{AuthApi, CredentialStore};

/// Session management over the auth port and the credential store
pub struct SessionService {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn CredentialStore>,
    cache: Arc<QueryCache>,
}

impl SessionService {
    /// Create the service
    #[must_use]
    pub fn new(
        api: Arc<dyn AuthApi>,
        store: Arc<dyn CredentialStore>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self { api, store, cache }
    }

    /// Log in with email and password
    ///
    /// # Errors
    /// `Validation` when a field is blank (no request is issued), `Api`
    /// when the reply carries neither a session nor the verification
    /// notice, or any transport error.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<LoginOutcome> {
        required("email", email)?;
        required("password", password)?;

        let reply = self.api.login(email, password, cancel).await?;
        self.settle(email, reply).await
    }

    /// Register a new account
    pub async fn signup(
        &self,
        request: SignupRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<LoginOutcome> {
        required("firstName", &request.first_name)?;
        required("lastName", &request.last_name)?;
        required("email", &request.email)?;
        required("password", &request.password)?;

        let reply = self.api.signup(&request, cancel).await?;
        self.settle(&request.email, reply).await
    }

    /// Complete email verification; persists the session like login
    pub async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<LoginOutcome> {
        required("email", email)?;
        required("otp", otp)?;

        let reply = self.api.verify_otp(email, otp, cancel).await?;
        self.settle(email, reply).await
    }

    /// Request a fresh verification passcode
    pub async fn resend_otp(&self, email: &str, cancel: Option<CancellationToken>) -> Result<()> {
        required("email", email)?;
        self.api.resend_otp(email, cancel).await
    }

    /// Replace the patient's personal information
    ///
    /// The stored user snapshot is replaced with the returned profile and
    /// the `User` tag is invalidated. Date of birth travels as an ISO
    /// `YYYY-MM-DD` string by construction (`NaiveDate`).
    pub async fn update_personal_info(
        &self,
        info: PersonalInfo,
        cancel: Option<CancellationToken>,
    ) -> Result<PatientProfile> {
        required("firstName", &info.first_name)?;
        required("lastName", &info.last_name)?;

        let profile = self.api.update_personal_info(&info, cancel).await?;
        self.store.set(USER_KEY, &serialize_snapshot(&profile)?)?;
        self.cache.invalidate_tags(&[Tag::User]).await;
        Ok(profile)
    }

    /// Current user snapshot from the credential store (no network)
    ///
    /// # Errors
    /// `Storage` when the snapshot exists but cannot be parsed.
    pub fn current_user(&self) -> Result<Option<PatientProfile>> {
        match self.store.get(USER_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| VitaportError::Storage(format!("corrupt user snapshot: {e}"))),
            None => Ok(None),
        }
    }

    /// Whether an access token is persisted
    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.store.get(ACCESS_TOKEN_KEY)?.is_some())
    }

    /// Clear the persisted session and the entire query cache
    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        self.cache.clear();
        tracing::info!("session cleared");
        Ok(())
    }

    async fn settle(&self, email: &str, reply: LoginReply) -> Result<LoginOutcome> {
        if reply.message.as_deref() == Some(EMAIL_NOT_VERIFIED_MESSAGE) {
            let redirect = format!("/verify-email?email={}", urlencoding::encode(email));
            tracing::info!(email, "login blocked pending email verification");
            return Ok(LoginOutcome::VerificationRequired { redirect });
        }

        let (Some(user), Some(access), Some(refresh)) =
            (reply.user, reply.access_token, reply.refresh_token)
        else {
            return Err(VitaportError::Api("auth response missing session fields".to_string()));
        };

        self.store.set(ACCESS_TOKEN_KEY, &access)?;
        self.store.set(REFRESH_TOKEN_KEY, &refresh)?;
        self.store.set(USER_KEY, &serialize_snapshot(&user)?)?;
        self.cache.invalidate_tags(&[Tag::User]).await;

        let onboarding = OnboardingRoute::from_step(user.verification_step);
        tracing::info!(user_id = %user.id, route = onboarding.path(), "session established");
        Ok(LoginOutcome::Authenticated { user, onboarding })
    }
}

fn serialize_snapshot(profile: &PatientProfile) -> Result<String> {
    serde_json::to_string(profile)
        .map_err(|e| VitaportError::Internal(format!("failed to serialize user snapshot: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::store::StoreConfig;

    use super::*;

    #[derive(Default)]
    struct MemoryCredentialStore {
        entries: Mutex<HashMap<String, String>>,
    }

    impl CredentialStore for MemoryCredentialStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            self.entries.lock().unwrap().clear();
            Ok(())
        }
    }

    struct ScriptedAuthApi {
        reply: LoginReply,
    }

    #[async_trait]
    impl AuthApi for ScriptedAuthApi {
        async fn login(
            &self,
            _email: &str,
            _password: &str,
            _cancel: Option<CancellationToken>,
        ) -> Result<LoginReply> {
            Ok(self.reply.clone())
        }

        async fn signup(
            &self,
            _request: &SignupRequest,
            _cancel: Option<CancellationToken>,
        ) -> Result<LoginReply> {
            Ok(self.reply.clone())
        }

        async fn verify_otp(
            &self,
            _email: &str,
            _otp: &str,
            _cancel: Option<CancellationToken>,
        ) -> Result<LoginReply> {
            Ok(self.reply.clone())
        }

        async fn resend_otp(
            &self,
            _email: &str,
            _cancel: Option<CancellationToken>,
        ) -> Result<()> {
            Ok(())
        }

        async fn update_personal_info(
            &self,
            _info: &PersonalInfo,
            _cancel: Option<CancellationToken>,
        ) -> Result<PatientProfile> {
            Err(VitaportError::Internal("not scripted".to_string()))
        }
    }

    fn sample_profile(step: i32) -> PatientProfile {
        serde_json::from_value(serde_json::json!({
            "id": "p1",
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "emailVerified": true,
            "verificationStep": step
        }))
        .unwrap()
    }

    fn service(reply: LoginReply) -> (SessionService, Arc<MemoryCredentialStore>) {
        let store = Arc::new(MemoryCredentialStore::default());
        let cache = Arc::new(QueryCache::new(StoreConfig::default()));
        let service =
            SessionService::new(Arc::new(ScriptedAuthApi { reply }), store.clone(), cache);
        (service, store)
    }

    #[tokio::test]
    async fn login_persists_session_under_documented_keys() {
        let reply = LoginReply {
            message: None,
            user: Some(sample_profile(3)),
            access_token: Some("at-123".to_string()),
            refresh_token: Some("rt-456".to_string()),
        };
        let (service, store) = service(reply);

        let outcome = service.login("jane@example.com", "hunter2", None).await.unwrap();

        assert!(outcome.is_authenticated());
        assert_eq!(store.get("accessToken").unwrap().as_deref(), Some("at-123"));
        assert_eq!(store.get("refreshToken").unwrap().as_deref(), Some("rt-456"));
        let snapshot = service.current_user().unwrap().unwrap();
        assert_eq!(snapshot.id, "p1");
    }

    #[tokio::test]
    async fn unverified_login_redirects_and_persists_nothing() {
        let reply = LoginReply {
            message: Some(EMAIL_NOT_VERIFIED_MESSAGE.to_string()),
            user: None,
            access_token: None,
            refresh_token: None,
        };
        let (service, store) = service(reply);

        let outcome = service.login("jane+test@example.com", "hunter2", None).await.unwrap();

        match outcome {
            LoginOutcome::VerificationRequired { redirect } => {
                assert_eq!(redirect, "/verify-email?email=jane%2Btest%40example.com");
            }
            LoginOutcome::Authenticated { .. } => panic!("expected verification redirect"),
        }
        assert!(store.get("accessToken").unwrap().is_none());
        assert!(store.get("user").unwrap().is_none());
    }

    #[tokio::test]
    async fn onboarding_route_comes_from_the_step_counter() {
        let reply = LoginReply {
            message: None,
            user: Some(sample_profile(2)),
            access_token: Some("at".to_string()),
            refresh_token: Some("rt".to_string()),
        };
        let (service, _store) = service(reply);

        let outcome = service.login("jane@example.com", "hunter2", None).await.unwrap();
        match outcome {
            LoginOutcome::Authenticated { onboarding, .. } => {
                assert_eq!(onboarding, OnboardingRoute::Insurance);
            }
            LoginOutcome::VerificationRequired { .. } => panic!("expected session"),
        }
    }

    #[tokio::test]
    async fn blank_credentials_never_reach_the_api() {
        let reply = LoginReply {
            message: None,
            user: Some(sample_profile(3)),
            access_token: Some("at".to_string()),
            refresh_token: Some("rt".to_string()),
        };
        let (service, store) = service(reply);

        let result = service.login("", "hunter2", None).await;
        assert!(matches!(result, Err(VitaportError::Validation(_))));
        assert!(store.get("accessToken").unwrap().is_none());
    }

    #[tokio::test]
    async fn partial_session_reply_is_an_api_error() {
        let reply = LoginReply {
            message: None,
            user: Some(sample_profile(3)),
            access_token: Some("at".to_string()),
            refresh_token: None,
        };
        let (service, store) = service(reply);

        let result = service.login("jane@example.com", "hunter2", None).await;
        assert!(matches!(result, Err(VitaportError::Api(_))));
        // Nothing may be persisted from a half-formed reply.
        assert!(store.get("accessToken").unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_clears_store() {
        let reply = LoginReply {
            message: None,
            user: Some(sample_profile(3)),
            access_token: Some("at".to_string()),
            refresh_token: Some("rt".to_string()),
        };
        let (service, store) = service(reply);

        service.login("jane@example.com", "hunter2", None).await.unwrap();
        assert!(service.is_authenticated().unwrap());

        service.logout().unwrap();
        assert!(!service.is_authenticated().unwrap());
        assert!(store.get("user").unwrap().is_none());
    }
}
