//! Patient document types
//!
//! Uploaded file metadata grouped by user-created categories. Categories
//! are created ad hoc; the client performs no dedup or normalization of
//! their names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-created grouping for uploaded documents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub document_count: Option<u32>,
}

/// Uploaded document metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDocument {
    pub id: String,
    pub file_name: String,
    #[serde(default, alias = "category")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}
