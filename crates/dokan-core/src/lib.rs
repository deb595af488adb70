//! # dokan-core: Pure Business Logic for the Dokan Storefront
//!
//! This crate is the **heart** of the storefront. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dokan Storefront Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Frontend (JS shell)                        │   │
//! │  │    Browse UI ──► Product UI ──► Cart UI ──► Checkout UI         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ embedded app layer                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  apps/storefront (commands)                     │   │
//! │  │    add_to_cart, toggle_wishlist, submit_order, etc.             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dokan-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ │   │
//! │  │  │  types  │ │ pricing │ │  cart   │ │validation│ │checkout │ │   │
//! │  │  │ Product │ │Resolved │ │  Cart   │ │  form    │ │ totals  │ │   │
//! │  │  │ Variant │ │ Price   │ │Preorder │ │  rules   │ │ mapping │ │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO WALL CLOCK • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    dokan-api (REST boundary)                    │   │
//! │  │              order submission, catalog/business fetch           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog and checkout types (Product, Variant, forms)
//! - [`money`] - Integer whole-taka money type (no floating point!)
//! - [`pricing`] - Discount-window and effective-price resolution
//! - [`cart`] - Cart/preorder reducers and the exclusivity rule
//! - [`wishlist`] - Wishlist reducer
//! - [`catalog`] - Browse filters, sorting, pagination, flash deals
//! - [`validation`] - Checkout-form field rules
//! - [`checkout`] - Order totals and payment-method mapping
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system and wall-clock access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole taka (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use dokan_core::money::Taka;
//! use dokan_core::pricing::resolve_price;
//! use dokan_core::types::PriceFields;
//!
//! let fields = PriceFields {
//!     selling_price: Taka::new(1000),
//!     offer_price: Some(Taka::new(750)),
//!     discount_start_date: None,
//!     discount_end_date: None,
//! };
//!
//! // No window dates set: the offer is never active
//! let resolved = resolve_price(&fields, Utc::now());
//! assert!(!resolved.is_within_offer);
//! assert_eq!(resolved.effective_price, Taka::new(1000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dokan_core::Taka` instead of
// `use dokan_core::money::Taka`

pub use cart::{AddOutcome, Cart, CartKind, CartLine, PreorderCart};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Taka;
pub use pricing::ResolvedPrice;
pub use types::*;
pub use wishlist::{Wishlist, WishlistItem};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum customer-name length (trimmed) the checkout form accepts.
pub const MIN_NAME_LEN: usize = 3;

/// Minimum address length (trimmed) the checkout form accepts.
///
/// ## Business Reason
/// A deliverable address in Dhaka needs at least a house, a road and an
/// area; anything shorter generates a call-back from the courier.
pub const MIN_ADDRESS_LEN: usize = 10;

/// Minimum note length once the optional note field has been touched.
///
/// ## Business Reason
/// One-character notes are noise for the packing desk: either say
/// something or leave the field blank.
pub const MIN_NOTE_LEN: usize = 5;
