//! # Validation Module
//!
//! Checkout-form validation rules.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form controls                                       │
//! │  ├── Basic format hints (required marks, input masks)                  │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (runs before any order submission)               │
//! │  ├── Field rules (length floors, phone format, area selection)         │
//! │  └── Produces per-field messages + the first field to focus            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order API                                                    │
//! │  └── Server-side checks (the backend re-validates everything)          │
//! │                                                                         │
//! │  A failed validation NEVER reaches the network.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dokan_core::types::CheckoutForm;
//! use dokan_core::validation::validate_form;
//!
//! let form = CheckoutForm::default();
//! let errors = validate_form(&form).unwrap_err();
//! assert_eq!(errors.first_invalid(), Some("name"));
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::CheckoutForm;
use crate::{MIN_ADDRESS_LEN, MIN_NAME_LEN, MIN_NOTE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Digit Normalization
// =============================================================================

/// Converts Bengali digit glyphs (০-৯) to ASCII digits.
///
/// Customers routinely type their number with a Bengali keyboard layout;
/// `০১৭১২৩৪৫৬৭৮` and `01712345678` are the same number and must both
/// pass validation. Applied before the phone pattern check and before
/// the value goes on the order payload.
pub fn normalize_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '০'..='৯' => {
                // U+09E6 is Bengali zero; offset into ASCII digits
                char::from(b'0' + (c as u32 - 0x09E6) as u8)
            }
            other => other,
        })
        .collect()
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the customer name.
///
/// ## Rules
/// - Required (non-empty after trim)
/// - Trimmed length ≥ 3
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: MIN_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates the customer mobile number.
///
/// ## Rules
/// - Required
/// - After digit normalization: starts with `01`, followed by exactly
///   9 more digits (11 digits total, local mobile format)
///
/// ## Example
/// ```rust
/// use dokan_core::validation::validate_phone;
///
/// assert!(validate_phone("01712345678").is_ok());
/// assert!(validate_phone("০১৭১২৩৪৫৬৭৮").is_ok()); // Bengali digits
/// assert!(validate_phone("123456789").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = normalize_digits(phone.trim());

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let valid = phone.len() == 11
        && phone.starts_with("01")
        && phone.bytes().all(|b| b.is_ascii_digit());

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be an 11-digit mobile number starting with 01".to_string(),
        });
    }

    Ok(())
}

/// Validates the delivery address.
///
/// ## Rules
/// - Required
/// - Trimmed length ≥ 10 (a deliverable address needs more than a word)
pub fn validate_address(address: &str) -> ValidationResult<()> {
    let address = address.trim();

    if address.is_empty() {
        return Err(ValidationError::Required {
            field: "address".to_string(),
        });
    }

    if address.chars().count() < MIN_ADDRESS_LEN {
        return Err(ValidationError::TooShort {
            field: "address".to_string(),
            min: MIN_ADDRESS_LEN,
        });
    }

    Ok(())
}

/// Validates that a delivery area was selected.
pub fn validate_delivery_area(area: Option<crate::types::DeliveryArea>) -> ValidationResult<()> {
    if area.is_none() {
        return Err(ValidationError::Required {
            field: "delivery_area".to_string(),
        });
    }
    Ok(())
}

/// Validates the optional order note.
///
/// ## Rules
/// - Empty/whitespace note: fine (the field is optional)
/// - Once touched (non-empty after trim): trimmed length ≥ 5
///
/// The floor on a touched note is an explicit policy: one-character
/// notes are noise for the packing desk, so either say something or
/// leave it blank.
pub fn validate_note(note: &str) -> ValidationResult<()> {
    let note = note.trim();

    if note.is_empty() {
        return Ok(());
    }

    if note.chars().count() < MIN_NOTE_LEN {
        return Err(ValidationError::TooShort {
            field: "note".to_string(),
            min: MIN_NOTE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Form Validation
// =============================================================================

/// Per-field error messages for the checkout form.
///
/// Serialized to the UI so each message renders inline next to its
/// field; [`FieldErrors::first_invalid`] names the field to scroll to
/// and focus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub delivery_area: Option<String>,
    pub note: Option<String>,
}

impl FieldErrors {
    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.delivery_area.is_none()
            && self.note.is_none()
    }

    /// The first failed field in form display order, for scroll/focus.
    pub fn first_invalid(&self) -> Option<&'static str> {
        if self.name.is_some() {
            Some("name")
        } else if self.phone.is_some() {
            Some("phone")
        } else if self.address.is_some() {
            Some("address")
        } else if self.delivery_area.is_some() {
            Some("delivery_area")
        } else if self.note.is_some() {
            Some("note")
        } else {
            None
        }
    }
}

/// Runs every field validator; `Err` carries the full per-field map
/// (all failures at once, not just the first).
pub fn validate_form(form: &CheckoutForm) -> Result<(), FieldErrors> {
    let errors = FieldErrors {
        name: validate_name(&form.name).err().map(|e| e.to_string()),
        phone: validate_phone(&form.phone).err().map(|e| e.to_string()),
        address: validate_address(&form.address).err().map(|e| e.to_string()),
        delivery_area: validate_delivery_area(form.delivery_area)
            .err()
            .map(|e| e.to_string()),
        note: validate_note(&form.note).err().map(|e| e.to_string()),
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeliveryArea;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            name: "Rahim Uddin".to_string(),
            phone: "01712345678".to_string(),
            address: "House 7, Road 3, Dhanmondi, Dhaka".to_string(),
            delivery_area: Some(DeliveryArea::InsideDhaka),
            note: String::new(),
            payment_method: "cashOnDelivery".to_string(),
        }
    }

    #[test]
    fn test_normalize_digits() {
        assert_eq!(normalize_digits("০১৭১২৩৪৫৬৭৮"), "01712345678");
        assert_eq!(normalize_digits("01712345678"), "01712345678");
        assert_eq!(normalize_digits("৫ pieces"), "5 pieces");
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Rahim").is_ok());
        assert!(validate_name("  Ab  ").is_err()); // 2 chars after trim
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("01712345678").is_ok());
        assert!(validate_phone(" 01712345678 ").is_ok());
        assert!(validate_phone("০১৭১২৩৪৫৬৭৮").is_ok());

        assert!(validate_phone("123456789").is_err()); // wrong prefix + length
        assert!(validate_phone("0171234567").is_err()); // 10 digits
        assert!(validate_phone("017123456789").is_err()); // 12 digits
        assert!(validate_phone("02712345678").is_err()); // landline prefix
        assert!(validate_phone("0171234567a").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("House 7, Road 3, Dhaka").is_ok());
        assert!(validate_address("Dhaka").is_err()); // under 10 chars
        assert!(validate_address("").is_err());
    }

    #[test]
    fn test_validate_note_optional_with_floor() {
        assert!(validate_note("").is_ok());
        assert!(validate_note("   ").is_ok());
        assert!(validate_note("Call before delivery").is_ok());
        assert!(validate_note("ok").is_err()); // touched but under 5 chars
    }

    #[test]
    fn test_validate_form_all_errors_at_once() {
        let errors = validate_form(&CheckoutForm::default()).unwrap_err();
        assert!(errors.name.is_some());
        assert!(errors.phone.is_some());
        assert!(errors.address.is_some());
        assert!(errors.delivery_area.is_some());
        assert!(errors.note.is_none()); // optional, untouched
        assert_eq!(errors.first_invalid(), Some("name"));
    }

    #[test]
    fn test_validate_form_empty_name_message() {
        let mut form = valid_form();
        form.name = String::new();
        let errors = validate_form(&form).unwrap_err();
        assert!(errors.name.is_some());
        assert_eq!(errors.first_invalid(), Some("name"));

        form.name = "Ab".to_string();
        let errors = validate_form(&form).unwrap_err();
        assert!(errors.name.unwrap().contains("at least 3"));
    }

    #[test]
    fn test_validate_form_happy_path() {
        assert!(validate_form(&valid_form()).is_ok());
    }
}
