//! # Error Types
//!
//! Domain-specific error types for dokan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dokan-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Checkout-form field failures                   │
//! │                                                                         │
//! │  dokan-api errors (separate crate)                                     │
//! │  └── ApiClientError   - Transport/contract failures                    │
//! │                                                                         │
//! │  Storefront app errors                                                 │
//! │  └── StoreError       - What the UI sees (serialized code + message)   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → UI toast/inline      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, field, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
///
/// These are blocked *before* any store mutation and surfaced as
/// dismissible notifications, usually with a corrective action attached
/// (clear the conflicting cart, pick another variant, ...).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A regular-cart add was attempted while the preorder slot is
    /// occupied. Regular and preorder carts are mutually exclusive.
    #[error("A preorder is pending; clear it or complete its checkout first")]
    PreorderPending,

    /// A preorder was attempted while the regular cart has items.
    #[error("The cart has items; clear it or complete its checkout first")]
    CartNotEmpty,

    /// The chosen product/variant has no stock at all.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// No payment method selected (or it mapped to nothing) at submit.
    #[error("Select a payment method to place the order")]
    MissingPaymentMethod,

    /// Checkout was triggered with nothing to order.
    #[error("Nothing to order")]
    EmptyOrder,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Checkout-form field failures.
///
/// Rendered inline next to the offending field; the messages double as
/// the user-facing copy, so they are phrased for humans.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. a malformed phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
