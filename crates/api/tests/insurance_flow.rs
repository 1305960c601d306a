//! Insurance card flows against a mock backend.

mod support;

use chrono::NaiveDate;
use vitaport_domain::{FileUpload, InsuranceForm, Subscriber, VitaportError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::portal_against;

fn subscriber() -> Subscriber {
    Subscriber {
        first_name: "Pat".to_string(),
        last_name: "Doe".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1962, 11, 3).unwrap(),
        sex: None,
        employer: None,
        address: None,
    }
}

fn complete_form() -> InsuranceForm {
    InsuranceForm {
        insurance_name: "Acme Health".to_string(),
        contract_id: "CT-100".to_string(),
        group_number: "G-7".to_string(),
        patient_relationship: "self".to_string(),
        subscriber: subscriber(),
        card_image: Some(FileUpload::new("card.png", "image/png", vec![0x89, 0x50])),
        signature_image: Some(FileUpload::new("sig.png", "image/png", vec![0x89, 0x50])),
    }
}

#[tokio::test]
async fn a_missing_contract_id_never_issues_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/insurance"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (portal, _dir) = portal_against(&server);

    let mut form = complete_form();
    form.contract_id = String::new();

    let result = portal.insurance.create(form, None).await;
    assert!(matches!(result, Err(VitaportError::Validation(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn creating_a_card_refetches_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/insurance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/insurance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "ins-1",
            "insuranceName": "Acme Health",
            "contractId": "CT-100"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (portal, _dir) = portal_against(&server);

    portal.insurance.cards(None).await.unwrap();
    portal.insurance.cards(None).await.unwrap();

    let card = portal.insurance.create(complete_form(), None).await.unwrap();
    assert_eq!(card.id, "ins-1");

    portal.insurance.cards(None).await.unwrap();
}

#[tokio::test]
async fn the_subscriber_dob_travels_as_an_iso_date() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/insurance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "ins-1",
            "insuranceName": "Acme Health",
            "contractId": "CT-100"
        })))
        .mount(&server)
        .await;

    let (portal, _dir) = portal_against(&server);
    portal.insurance.create(complete_form(), None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("\"dateOfBirth\":\"1962-11-03\""));
}
