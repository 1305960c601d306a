//! Waitlist API client

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use vitaport_core::{AccessTokenProvider, WaitlistApi};
use vitaport_domain::{Result, WaitlistEntry};

use crate::http::HttpClient;

use super::ApiBase;

/// REST client for the waitlist endpoints
pub struct WaitlistClient {
    base: ApiBase,
}

impl WaitlistClient {
    /// Create the client
    #[must_use]
    pub fn new(base_url: &str, http: HttpClient, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self { base: ApiBase::new(base_url, http, tokens) }
    }
}

#[async_trait]
impl WaitlistApi for WaitlistClient {
    async fn my_entries(&self, cancel: Option<CancellationToken>) -> Result<Vec<WaitlistEntry>> {
        let builder = self.base.request(Method::GET, "/api/waitlist/my").await?;
        self.base.execute_json(builder, cancel).await
    }

    async fn remove(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()> {
        let builder = self.base.request(Method::DELETE, &format!("/api/waitlist/{id}")).await?;
        self.base.execute_unit(builder, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::testing::{test_http_client, StaticTokenProvider};
    use super::*;

    fn client(base_url: &str) -> WaitlistClient {
        WaitlistClient::new(
            base_url,
            test_http_client(),
            StaticTokenProvider::with_token("session-token"),
        )
    }

    #[tokio::test]
    async fn lists_the_patients_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/waitlist/my"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{
                    "id": "w1",
                    "doctorId": "d1",
                    "preference": "nextAvailable",
                    "status": "waiting"
                }]
            })))
            .mount(&server)
            .await;

        let entries = client(&server.uri()).my_entries(None).await.expect("entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].doctor_id, "d1");
    }

    #[tokio::test]
    async fn removal_targets_the_entry_id() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/waitlist/w1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client(&server.uri()).remove("w1", None).await.expect("removed");
    }
}
