//! Buyer contact details and validation.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Buyer contact details collected at checkout.
///
/// Both fields are stored trimmed; validation runs at the start of the
/// checkout saga, before any network activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuyerInfo {
    name: String,
    phone: String,
}

impl BuyerInfo {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Name: letters and whitespace only, at least 2 characters.
    /// Phone: digits only, at least 7 of them.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let name_ok = self.name.chars().count() >= 2
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c.is_whitespace());
        if !name_ok {
            return Err(CommerceError::InvalidBuyerName);
        }

        let phone_ok = self.phone.len() >= 7 && self.phone.chars().all(|c| c.is_ascii_digit());
        if !phone_ok {
            return Err(CommerceError::InvalidPhone);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_buyer() {
        let buyer = BuyerInfo::new("Jane Doe", "0123456789");
        assert!(buyer.validate().is_ok());
    }

    #[test]
    fn test_inputs_are_trimmed() {
        let buyer = BuyerInfo::new("  Jane Doe  ", " 0123456 ");
        assert!(buyer.validate().is_ok());
        assert_eq!(buyer.name(), "Jane Doe");
        assert_eq!(buyer.phone(), "0123456");
    }

    #[test]
    fn test_name_with_digits_rejected() {
        let buyer = BuyerInfo::new("John123", "0123456789");
        assert!(matches!(
            buyer.validate().unwrap_err(),
            CommerceError::InvalidBuyerName
        ));
    }

    #[test]
    fn test_short_name_rejected() {
        let buyer = BuyerInfo::new("J", "0123456789");
        assert!(matches!(
            buyer.validate().unwrap_err(),
            CommerceError::InvalidBuyerName
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let buyer = BuyerInfo::new("", "0123456789");
        assert!(matches!(
            buyer.validate().unwrap_err(),
            CommerceError::InvalidBuyerName
        ));
    }

    #[test]
    fn test_phone_with_letters_rejected() {
        let buyer = BuyerInfo::new("Jane Doe", "abc1234");
        assert!(matches!(
            buyer.validate().unwrap_err(),
            CommerceError::InvalidPhone
        ));
    }

    #[test]
    fn test_short_phone_rejected() {
        let buyer = BuyerInfo::new("Jane Doe", "123456");
        assert!(matches!(
            buyer.validate().unwrap_err(),
            CommerceError::InvalidPhone
        ));
    }

    #[test]
    fn test_name_is_checked_before_phone() {
        let buyer = BuyerInfo::new("J@ne", "short");
        assert!(matches!(
            buyer.validate().unwrap_err(),
            CommerceError::InvalidBuyerName
        ));
    }
}
