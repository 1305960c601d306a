//! REST API clients for the portal backend
//!
//! One client per resource area, all sharing [`ApiBase`]: origin from
//! configuration, bearer-token injection from the credential store, and a
//! single normalization boundary that unwraps the backend's optional
//! `{"data": ...}` envelope and translates error payloads exactly once.
//! Downstream code never re-checks response shapes.

pub mod appointments;
pub mod auth;
pub mod doctors;
pub mod documents;
pub mod insurance;
pub mod waitlist;

pub use appointments::AppointmentsClient;
pub use auth::AuthClient;
pub use doctors::DoctorsClient;
pub use documents::DocumentsClient;
pub use insurance::InsuranceClient;
pub use waitlist::WaitlistClient;

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use vitaport_core::AccessTokenProvider;
use vitaport_domain::{FileUpload, Result, VitaportError};

use crate::http::HttpClient;

/// Shared request plumbing for the resource clients
pub(crate) struct ApiBase {
    base_url: String,
    http: HttpClient,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl ApiBase {
    pub(crate) fn new(
        base_url: &str,
        http: HttpClient,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string(), http, tokens }
    }

    /// Build a request with the bearer header attached when a session
    /// exists; requests proceed unauthenticated otherwise.
    pub(crate) async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let request_id = uuid::Uuid::new_v4();
        debug!(%request_id, %method, path, "building portal request");

        let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.tokens.access_token().await? {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        Ok(builder)
    }

    /// Execute with retry and decode the JSON payload.
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        cancel: Option<CancellationToken>,
    ) -> Result<T> {
        let response = self.http.send_with_cancel(builder, cancel).await?;
        decode_response(response).await
    }

    /// Execute exactly once (multipart bodies cannot be replayed) and
    /// decode the JSON payload.
    pub(crate) async fn execute_json_once<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        cancel: Option<CancellationToken>,
    ) -> Result<T> {
        let response = self.http.send_once(builder, cancel).await?;
        decode_response(response).await
    }

    /// Execute with retry for operations whose success carries no payload
    /// the client needs.
    pub(crate) async fn execute_unit(
        &self,
        builder: RequestBuilder,
        cancel: Option<CancellationToken>,
    ) -> Result<()> {
        let response = self.http.send_with_cancel(builder, cancel).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let bytes = response.bytes().await.unwrap_or_default();
        Err(error_from_status(status, &bytes))
    }
}

async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|err| VitaportError::Network(format!("failed to read response body: {err}")))?;

    if !status.is_success() {
        return Err(error_from_status(status, &bytes));
    }

    decode_body(&bytes)
}

/// Unwrap the optional `{"data": ...}` envelope and map the payload into
/// its strict domain type. This is the only place response shapes are
/// inspected.
pub(crate) fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    #[derive(Deserialize)]
    struct Envelope<U> {
        data: U,
    }

    if let Ok(envelope) = serde_json::from_slice::<Envelope<T>>(bytes) {
        return Ok(envelope.data);
    }

    serde_json::from_slice(bytes)
        .map_err(|err| VitaportError::Internal(format!("unexpected response shape: {err}")))
}

/// Translate an error status plus payload into a `VitaportError`.
///
/// 401/403 map to `Auth`, 404 to `NotFound`, remaining 4xx to `Api` with
/// the backend message when parseable, everything else to `Network`.
pub(crate) fn error_from_status(status: StatusCode, bytes: &[u8]) -> VitaportError {
    let message = extract_message(bytes).unwrap_or_else(|| {
        status.canonical_reason().unwrap_or("request failed").to_string()
    });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => VitaportError::Auth(message),
        StatusCode::NOT_FOUND => VitaportError::NotFound(message),
        s if s.is_client_error() => VitaportError::Api(message),
        s => VitaportError::Network(format!("HTTP {s}: {message}")),
    }
}

/// Backend errors arrive as `{"data":{"message":...}}` or `{"message":...}`.
fn extract_message(bytes: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct Inner {
        message: String,
    }

    #[derive(Deserialize)]
    struct Wrapped {
        data: Inner,
    }

    if let Ok(wrapped) = serde_json::from_slice::<Wrapped>(bytes) {
        return Some(wrapped.data.message);
    }
    serde_json::from_slice::<Inner>(bytes).ok().map(|inner| inner.message)
}

/// Build a multipart file part from an upload payload.
pub(crate) fn file_part(upload: &FileUpload) -> Result<reqwest::multipart::Part> {
    reqwest::multipart::Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(&upload.content_type)
        .map_err(|err| {
            VitaportError::Internal(format!(
                "invalid content type {}: {err}",
                upload.content_type
            ))
        })
}

pub(crate) fn json_encode_error(err: serde_json::Error) -> VitaportError {
    VitaportError::Internal(format!("failed to encode request field: {err}"))
}
