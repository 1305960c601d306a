use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, Request, RequestBuilder, Response};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use vitaport_domain::{Result, VitaportError};

/// HTTP client with built-in retry, timeout, and cancellation support.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder with retry semantics.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        self.send_with_cancel(builder, None).await
    }

    /// Execute with retry semantics, aborting early when `cancel` fires.
    ///
    /// Server errors (5xx) and transport failures retry with exponential
    /// backoff up to the configured attempt count; client errors never
    /// retry. A cancelled call returns [`VitaportError::Cancelled`]
    /// without waiting for the in-flight response.
    pub async fn send_with_cancel(
        &self,
        builder: RequestBuilder,
        cancel: Option<CancellationToken>,
    ) -> Result<Response> {
        let attempts = self.max_attempts.max(1);

        for attempt in 0..attempts {
            let cloned_builder = builder.try_clone().ok_or_else(|| {
                VitaportError::Internal(
                    "request body cannot be cloned; use send_once for streaming bodies".into(),
                )
            })?;

            let request = cloned_builder
                .build()
                .map_err(|err| VitaportError::Internal(format!("invalid request: {err}")))?;

            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt = attempt + 1, %method, %url, "sending HTTP request");

            match self.execute(request, cancel.as_ref()).await? {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %method, %url, %status, "received HTTP response");

                    if status.is_server_error() && attempt + 1 < attempts {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, %method, %url, error = %err, "HTTP request failed");

                    if attempt + 1 < attempts && should_retry_error(&err) {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Err(network_error(&err));
                }
            }
        }

        Err(VitaportError::Internal(
            "http client exhausted retries without producing a result".into(),
        ))
    }

    /// Execute a request exactly once.
    ///
    /// For multipart and other streaming bodies that cannot be replayed;
    /// no retry is attempted regardless of the outcome.
    pub async fn send_once(
        &self,
        builder: RequestBuilder,
        cancel: Option<CancellationToken>,
    ) -> Result<Response> {
        let request = builder
            .build()
            .map_err(|err| VitaportError::Internal(format!("invalid request: {err}")))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending single-shot HTTP request");

        match self.execute(request, cancel.as_ref()).await? {
            Ok(response) => Ok(response),
            Err(err) => Err(network_error(&err)),
        }
    }

    /// Run one attempt, racing the cancellation token when present.
    async fn execute(
        &self,
        request: Request,
        cancel: Option<&CancellationToken>,
    ) -> Result<std::result::Result<Response, reqwest::Error>> {
        match cancel {
            Some(token) => tokio::select! {
                () = token.cancelled() => Err(VitaportError::Cancelled),
                result = self.client.execute(request) => Ok(result),
            },
            None => Ok(self.client.execute(request).await),
        }
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|err| VitaportError::Internal(format!("failed to build http client: {err}")))?;

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

fn network_error(err: &reqwest::Error) -> VitaportError {
    VitaportError::Network(format!("http request failed: {err}"))
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
