//! Form validation helpers shared by the services
//!
//! A failed check must block the operation before any network request is
//! issued.

use vitaport_domain::{Result, VitaportError};

/// Require a non-blank string field
///
/// The field name is the wire-level (camelCase) name so error strings can
/// be matched against form fields by consumers.
pub fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(VitaportError::Validation(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(required("contractId", "").is_err());
        assert!(required("contractId", "   ").is_err());
        assert!(required("contractId", "CT-100").is_ok());
    }

    #[test]
    fn error_names_the_field() {
        let err = required("groupNumber", "").unwrap_err();
        assert!(err.to_string().contains("groupNumber"));
    }
}
