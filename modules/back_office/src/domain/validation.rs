//! Input validation for admin forms

use crate::contract::{BackOfficeError, CatalogDraft, CommissionTerms, CreatorDraft};

/// Validate a site setting key
///
/// Accepts alphanumerics, `_`, `.` and `-`; must start with an alphanumeric
/// character (e.g. `site_name`, `drive.folder_id`, `feature-flags`).
pub fn validate_setting_key(key: &str) -> Result<(), BackOfficeError> {
    let Some(first_char) = key.chars().next() else {
        return Err(BackOfficeError::validation("setting key cannot be empty"));
    };

    if !first_char.is_ascii_alphanumeric() {
        return Err(BackOfficeError::validation(format!(
            "setting key '{}' must start with alphanumeric character",
            key
        )));
    }

    let is_valid = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-');

    if !is_valid {
        return Err(BackOfficeError::validation(format!(
            "setting key '{}' contains invalid characters. Only alphanumeric, '_', '.', and '-' are allowed",
            key
        )));
    }

    Ok(())
}

/// Validate a site setting value against the configured size limit
pub fn validate_setting_value(value: &str, max_size: usize) -> Result<(), BackOfficeError> {
    if value.len() > max_size {
        return Err(BackOfficeError::validation(format!(
            "setting value is {} bytes, limit is {}",
            value.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate commission terms entered by an admin
pub fn validate_terms(terms: &CommissionTerms) -> Result<(), BackOfficeError> {
    if !terms.rate.is_finite() || !(0.0..=100.0).contains(&terms.rate) {
        return Err(BackOfficeError::validation(format!(
            "commission rate {} must be between 0 and 100",
            terms.rate
        )));
    }
    if terms.per_item_fee < 0 {
        return Err(BackOfficeError::validation(format!(
            "commission per item {} cannot be negative",
            terms.per_item_fee
        )));
    }
    Ok(())
}

/// Validate a creator form
pub fn validate_creator(draft: &CreatorDraft) -> Result<(), BackOfficeError> {
    if draft.name.trim().is_empty() {
        return Err(BackOfficeError::validation("creator name cannot be empty"));
    }
    if let Some(email) = &draft.email {
        if !email.contains('@') {
            return Err(BackOfficeError::validation(format!(
                "'{}' is not an email address",
                email
            )));
        }
    }
    validate_terms(&draft.terms)
}

/// Validate a collection entry form
pub fn validate_catalog_entry(draft: &CatalogDraft) -> Result<(), BackOfficeError> {
    if draft.title.trim().is_empty() {
        return Err(BackOfficeError::validation("title cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{BankAccount, BusinessType};

    fn draft() -> CreatorDraft {
        CreatorDraft {
            name: "Aoi Studio".to_string(),
            email: Some("aoi@example.com".to_string()),
            terms: CommissionTerms {
                rate: 20.0,
                per_item_fee: 0,
            },
            business_type: BusinessType::Individual,
            withholding_required: true,
            bank: BankAccount::default(),
            is_active: true,
        }
    }

    #[test]
    fn test_validate_setting_key_valid() {
        assert!(validate_setting_key("site_name").is_ok());
        assert!(validate_setting_key("drive.folder_id").is_ok());
        assert!(validate_setting_key("feature-flags").is_ok());
        assert!(validate_setting_key("Mail2").is_ok());
    }

    #[test]
    fn test_validate_setting_key_invalid() {
        assert!(validate_setting_key("").is_err());
        assert!(validate_setting_key("_hidden").is_err());
        assert!(validate_setting_key(".dot").is_err());
        assert!(validate_setting_key("site name").is_err());
        assert!(validate_setting_key("key@host").is_err());
    }

    #[test]
    fn test_validate_setting_value_size() {
        assert!(validate_setting_value("abc", 3).is_ok());
        assert!(validate_setting_value("abcd", 3).is_err());
    }

    #[test]
    fn test_validate_terms_bounds() {
        assert!(validate_terms(&CommissionTerms { rate: 0.0, per_item_fee: 0 }).is_ok());
        assert!(validate_terms(&CommissionTerms { rate: 100.0, per_item_fee: 50 }).is_ok());
        assert!(validate_terms(&CommissionTerms { rate: -0.5, per_item_fee: 0 }).is_err());
        assert!(validate_terms(&CommissionTerms { rate: 100.5, per_item_fee: 0 }).is_err());
        assert!(validate_terms(&CommissionTerms { rate: f64::NAN, per_item_fee: 0 }).is_err());
        assert!(validate_terms(&CommissionTerms { rate: 10.0, per_item_fee: -1 }).is_err());
    }

    #[test]
    fn test_validate_creator() {
        assert!(validate_creator(&draft()).is_ok());

        let mut blank = draft();
        blank.name = "   ".to_string();
        assert!(validate_creator(&blank).is_err());

        let mut bad_email = draft();
        bad_email.email = Some("not-an-address".to_string());
        assert!(validate_creator(&bad_email).is_err());

        let mut no_email = draft();
        no_email.email = None;
        assert!(validate_creator(&no_email).is_ok());
    }
}
