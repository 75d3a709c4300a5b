//! Contact message model and local validation

use serde::{Deserialize, Serialize};

use crate::error::{ContactField, FitDashError};

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Message sent through the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "mensaje")]
    pub message: String,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Check the fields in form order; the first failing field is reported.
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.chars().count() < MIN_NAME_CHARS {
            return Err(FitDashError::validation(
                ContactField::Name,
                format!("Name must be at least {MIN_NAME_CHARS} characters long"),
            ));
        }

        if !is_valid_email(&self.email) {
            return Err(FitDashError::validation(
                ContactField::Email,
                "Please enter a valid email address",
            ));
        }

        if self.message.chars().count() < MIN_MESSAGE_CHARS {
            return Err(FitDashError::validation(
                ContactField::Message,
                format!("Message must be at least {MIN_MESSAGE_CHARS} characters long"),
            ));
        }

        Ok(())
    }
}

/// Permissive syntax check equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // Some dot in the domain must have text on both sides
    domain
        .char_indices()
        .filter(|&(_, c)| c == '.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

/// Acknowledgement for an accepted contact message
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactReceipt {
    /// Identifier assigned by the server, when it echoes one back
    #[serde(rename = "id_contacto", default)]
    pub id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@b.c")]
    #[case("ana.perez@example.com")]
    #[case("first+tag@sub.domain.org")]
    #[case("a@b..c")]
    #[case("a@b.c.")]
    fn test_valid_emails(#[case] email: &str) {
        assert!(is_valid_email(email), "{email} should be accepted");
    }

    #[rstest]
    #[case("")]
    #[case("bad")]
    #[case("@b.c")]
    #[case("a@")]
    #[case("a@b")]
    #[case("a@.c")]
    #[case("a@b.")]
    #[case("a@@b.c")]
    #[case("a b@c.d")]
    #[case("a@b.c d")]
    fn test_invalid_emails(#[case] email: &str) {
        assert!(!is_valid_email(email), "{email} should be rejected");
    }

    #[test]
    fn test_minimal_valid_message_is_accepted() {
        let message = ContactMessage::new("Al", "a@b.c", "1234567890");
        assert!(message.validate().is_ok());
    }

    #[rstest]
    #[case("A", "a@b.c", "1234567890", ContactField::Name)]
    #[case("", "a@b.c", "1234567890", ContactField::Name)]
    #[case("Al", "bad", "1234567890", ContactField::Email)]
    #[case("Al", "a@b.c", "123456789", ContactField::Message)]
    #[case("A", "bad", "short", ContactField::Name)]
    #[case("Al", "bad", "short", ContactField::Email)]
    fn test_first_invalid_field_is_reported(
        #[case] name: &str,
        #[case] email: &str,
        #[case] body: &str,
        #[case] expected: ContactField,
    ) {
        let err = ContactMessage::new(name, email, body).validate().unwrap_err();
        assert_eq!(err.field(), Some(expected));
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        // two chars, four bytes
        let message = ContactMessage::new("Ñú", "a@b.c", "ñññññññññ");
        let err = message.validate().unwrap_err();
        assert_eq!(err.field(), Some(ContactField::Message));
    }

    #[test]
    fn test_wire_field_names() {
        let message = ContactMessage::new("Al", "a@b.c", "1234567890");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"nombre": "Al", "correo": "a@b.c", "mensaje": "1234567890"})
        );
    }

    #[test]
    fn test_receipt_tolerates_missing_id() {
        let receipt: ContactReceipt = serde_json::from_str(r#"{"nombre": "Al"}"#).unwrap();
        assert_eq!(receipt.id, None);

        let receipt: ContactReceipt = serde_json::from_str(r#"{"id_contacto": 7}"#).unwrap();
        assert_eq!(receipt.id, Some(7));
    }
}
