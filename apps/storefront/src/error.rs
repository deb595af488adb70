//! # Store Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  UI Shell                       Rust App Layer                          │
//! │  ────────                       ──────────────                          │
//! │                                                                         │
//! │  invoke add_to_cart                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, StoreError>                                           │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Business rule? ── CoreError::PreorderPending ──┐               │  │
//! │  │         │                                       │               │  │
//! │  │         ▼                                       ▼               │  │
//! │  │  Network failed? ── ApiClientError ────────► StoreError ───────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  { code: "CART_CONFLICT",                                               │
//! │    message: "A preorder is pending; ..." }                              │
//! │  → dismissible notification with a corrective action                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is terminal at the UI boundary: shown to the user, never
//! logged to a remote sink, and never allowed to mutate store state.

use serde::Serialize;

use dokan_api::ApiClientError;
use dokan_core::validation::FieldErrors;
use dokan_core::CoreError;

/// Fallback toast when the server gives us nothing better.
pub const GENERIC_SUBMIT_FAILURE: &str = "Could not place the order. Please try again.";

/// Error returned from storefront commands.
///
/// ## Serialization
/// This is what the UI shell receives when a command fails:
/// ```json
/// {
///   "code": "OUT_OF_STOCK",
///   "message": "Cotton Panjabi (XL) is out of stock"
/// }
/// ```
/// Validation failures additionally carry the per-field map and the
/// field to scroll to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field messages, set only for `ValidationError`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,

    /// First invalid field, for scroll/focus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<&'static str>,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Checkout-form validation failed (stay on the form)
    ValidationError,

    /// Regular cart and preorder slot would both be non-empty
    CartConflict,

    /// Nothing purchasable for the chosen product/variant
    OutOfStock,

    /// Payment selection missing or unmappable
    PaymentError,

    /// The submission transport failed
    NetworkError,

    /// The backend refused the order
    OrderRejected,

    /// Order created but no gateway URL came back (known gap:
    /// the buyer cannot reach the payment page from this flow)
    GatewayMissing,

    /// A submission is already in flight
    SubmissionInFlight,

    /// Anything else
    Internal,
}

impl StoreError {
    /// Creates a new store error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        StoreError {
            code,
            message: message.into(),
            fields: None,
            focus: None,
        }
    }

    /// Creates a validation error carrying the per-field map.
    pub fn validation(errors: FieldErrors) -> Self {
        StoreError {
            code: ErrorCode::ValidationError,
            message: "Please fix the highlighted fields".to_string(),
            focus: errors.first_invalid(),
            fields: Some(errors),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::new(ErrorCode::Internal, message)
    }
}

/// Lowers business-rule violations to UI errors.
impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::PreorderPending | CoreError::CartNotEmpty => ErrorCode::CartConflict,
            CoreError::OutOfStock { .. } => ErrorCode::OutOfStock,
            CoreError::MissingPaymentMethod => ErrorCode::PaymentError,
            CoreError::EmptyOrder => ErrorCode::ValidationError,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        StoreError::new(code, err.to_string())
    }
}

/// Lowers transport failures to UI errors.
///
/// The server's own message wins when it sent one; otherwise the user
/// gets the generic fallback, and the real cause goes to the log.
impl From<ApiClientError> for StoreError {
    fn from(err: ApiClientError) -> Self {
        let message = err
            .server_message()
            .map(String::from)
            .unwrap_or_else(|| GENERIC_SUBMIT_FAILURE.to_string());
        tracing::error!(error = %err, "API call failed");
        StoreError::new(ErrorCode::NetworkError, message)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for StoreError {}
