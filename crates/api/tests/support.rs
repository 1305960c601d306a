//! Shared fixtures for the portal integration tests.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use tempfile::TempDir;
use vitaport_api::PortalContext;
use vitaport_domain::{ApiConfig, CacheConfig, Config, HttpConfig, StorageConfig};
use wiremock::MockServer;

/// Build a portal context pointed at a mock backend.
///
/// Retries are disabled so every wiremock expectation counts real calls;
/// the credential file lives in the returned temp dir, which must stay
/// alive for the duration of the test.
pub fn portal_against(server: &MockServer) -> (PortalContext, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        api: ApiConfig { base_url: server.uri() },
        http: HttpConfig { timeout_seconds: 5, max_attempts: 1 },
        cache: CacheConfig::default(),
        storage: StorageConfig { credentials_path: dir.path().join("credentials.json") },
    };

    let context = PortalContext::init(config).expect("portal context");
    (context, dir)
}

/// Session payload the auth endpoints answer with.
pub fn session_reply(step: i32) -> serde_json::Value {
    serde_json::json!({
        "data": {
            "user": {
                "id": "p1",
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "emailVerified": true,
                "verificationStep": step
            },
            "accessToken": "at-123",
            "refreshToken": "rt-456"
        }
    })
}

/// Appointment record as the backend serializes it.
pub fn appointment_json(id: &str, date_time: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "patientId": "p1",
        "doctorId": "d1",
        "dateTime": date_time,
        "status": status
    })
}

/// An RFC 3339 timestamp a few hours in the future.
pub fn future_slot() -> String {
    (chrono::Utc::now() + chrono::Duration::hours(6)).to_rfc3339()
}
