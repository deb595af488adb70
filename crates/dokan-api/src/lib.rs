//! # dokan-api: REST Boundary for the Dokan Storefront
//!
//! Typed client for the remote product/business/order API. The backend's
//! JSON schema is a given contract; this crate pins it down in types and
//! keeps the rest of the workspace off raw `serde_json::Value`.
//!
//! ## What lives here
//! - [`client`] - the reqwest-backed [`ApiClient`]
//! - [`order`] - order-creation request/response contract types
//! - [`catalog`] - the business-profile document and its translation
//!   into core config types (product payloads deserialize directly into
//!   `dokan_core::types`)
//! - [`error`] - [`ApiClientError`]
//!
//! ## What deliberately does NOT live here
//! No retry/backoff (failures surface once), no cancellation tokens, no
//! response caching. The app layer owns when calls happen; this crate
//! owns only how.

pub mod catalog;
pub mod client;
pub mod error;
pub mod order;

pub use catalog::BusinessProfile;
pub use client::{ApiClient, ApiConfig};
pub use error::{ApiClientError, ApiResult};
pub use order::{OrderData, OrderProduct, OrderRequest, OrderResponse};
