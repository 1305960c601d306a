//! Login/logout persistence contract, end to end against a mock backend.

mod support;

use vitaport_domain::LoginOutcome;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{portal_against, session_reply};

#[tokio::test]
async fn login_persists_the_session_under_the_documented_keys() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_partial_json(serde_json::json!({ "email": "jane@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_reply(3)))
        .expect(1)
        .mount(&server)
        .await;

    let (portal, dir) = portal_against(&server);

    let outcome = portal.session.login("jane@example.com", "hunter2", None).await.unwrap();
    assert!(outcome.is_authenticated());

    // The on-disk file is the storage contract: three fixed keys.
    let raw = std::fs::read_to_string(dir.path().join("credentials.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["accessToken"], "at-123");
    assert_eq!(stored["refreshToken"], "rt-456");
    let user: serde_json::Value =
        serde_json::from_str(stored["user"].as_str().unwrap()).unwrap();
    assert_eq!(user["id"], "p1");

    // And the snapshot is readable back through the service.
    let current = portal.session.current_user().unwrap().unwrap();
    assert_eq!(current.email, "jane@example.com");
}

#[tokio::test]
async fn unverified_login_yields_the_encoded_redirect_and_persists_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Your email is not verified. A new verification OTP has been sent to your email."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (portal, dir) = portal_against(&server);

    let outcome = portal.session.login("jane+test@example.com", "hunter2", None).await.unwrap();

    match outcome {
        LoginOutcome::VerificationRequired { redirect } => {
            assert_eq!(redirect, "/verify-email?email=jane%2Btest%40example.com");
        }
        LoginOutcome::Authenticated { .. } => panic!("expected a verification redirect"),
    }

    assert!(!dir.path().join("credentials.json").exists());
    assert!(!portal.session.is_authenticated().unwrap());
}

#[tokio::test]
async fn onboarding_route_reflects_the_profile_step() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_reply(1)))
        .mount(&server)
        .await;

    let (portal, _dir) = portal_against(&server);

    let outcome = portal.session.login("jane@example.com", "hunter2", None).await.unwrap();
    match outcome {
        LoginOutcome::Authenticated { onboarding, .. } => {
            assert_eq!(onboarding.path(), "/onboarding/personal-information");
        }
        LoginOutcome::VerificationRequired { .. } => panic!("expected a session"),
    }
}

#[tokio::test]
async fn subsequent_requests_carry_the_persisted_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_reply(3)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/waitlist/my"))
        .and(wiremock::matchers::header("Authorization", "Bearer at-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let (portal, _dir) = portal_against(&server);

    portal.session.login("jane@example.com", "hunter2", None).await.unwrap();
    let entries = portal.waitlist.my_entries(None).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn logout_clears_credentials_and_cached_queries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_reply(3)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/waitlist/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let (portal, _dir) = portal_against(&server);
    portal.session.login("jane@example.com", "hunter2", None).await.unwrap();
    portal.waitlist.my_entries(None).await.unwrap();

    portal.session.logout().unwrap();
    assert!(!portal.session.is_authenticated().unwrap());
    assert!(portal.session.current_user().unwrap().is_none());

    // The cache was emptied, so the next read goes back to the network.
    portal.waitlist.my_entries(None).await.unwrap();
}
