//! Doctor directory types

use serde::{Deserialize, Serialize};

/// Doctor as listed by the portal directory
///
/// Read-only from the portal's perspective except for the favorite flag,
/// which flips through the favorites mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, alias = "specialty")]
    pub discipline: Option<String>,
    #[serde(default)]
    pub office_locations: Vec<OfficeLocation>,
    // Upstream has shipped both singular and plural here; the alias keeps
    // the normalization in this one spot.
    #[serde(default, alias = "qualification")]
    pub qualifications: Vec<Qualification>,
    #[serde(default, alias = "favourite")]
    pub is_favorite: bool,
}

impl Doctor {
    /// Doctor's display name
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Practice location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeLocation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Professional qualification entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualification {
    pub degree: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_singular_qualification_alias() {
        let doctor: Doctor = serde_json::from_str(
            r#"{
                "id": "d1",
                "firstName": "Gregory",
                "lastName": "House",
                "specialty": "Diagnostics",
                "qualification": [{"degree": "MD", "institution": "Johns Hopkins"}],
                "favourite": true
            }"#,
        )
        .unwrap();

        assert_eq!(doctor.discipline.as_deref(), Some("Diagnostics"));
        assert_eq!(doctor.qualifications.len(), 1);
        assert!(doctor.is_favorite);
        assert_eq!(doctor.full_name(), "Gregory House");
    }
}
