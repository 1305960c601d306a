//! Insurance card types
//!
//! Cards are created/updated/deleted independently; the client enforces no
//! consistency between a patient's multiple cards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::patient::Address;
use crate::types::upload::FileUpload;

/// Insurance card on file for the patient
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceCard {
    pub id: String,
    pub insurance_name: String,
    pub contract_id: String,
    #[serde(default)]
    pub group_number: Option<String>,
    /// Relationship of the patient to the policy subscriber, e.g. "self"
    #[serde(default)]
    pub patient_relationship: Option<String>,
    #[serde(default)]
    pub subscriber: Option<Subscriber>,
    /// Backend reference of the uploaded card image
    #[serde(default, alias = "insuranceCard")]
    pub card_file: Option<String>,
    /// Backend reference of the uploaded signature image
    #[serde(default, alias = "digitalSignature")]
    pub signature_file: Option<String>,
}

/// Policy subscriber sub-record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub employer: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Form submitted to the create-card mutation
///
/// Travels as a multipart form: scalar fields and the subscriber (JSON) as
/// text parts, the card and signature images as file parts.
#[derive(Debug, Clone)]
pub struct InsuranceForm {
    pub insurance_name: String,
    pub contract_id: String,
    pub group_number: String,
    pub patient_relationship: String,
    pub subscriber: Subscriber,
    pub card_image: Option<FileUpload>,
    pub signature_image: Option<FileUpload>,
}

/// JSON body submitted to the update-card mutation (no file uploads)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceUpdate {
    pub insurance_name: String,
    pub contract_id: String,
    pub group_number: String,
    pub patient_relationship: String,
    pub subscriber: Subscriber,
}
