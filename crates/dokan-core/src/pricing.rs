//! # Pricing Resolver
//!
//! Derives what a buyer actually pays from raw catalog price fields.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Price Resolution                                    │
//! │                                                                         │
//! │  Product                                                                │
//! │     │                                                                   │
//! │     ├── has_variants? ──yes──► selected variant                         │
//! │     │                          └── none selected? ──► fallback:         │
//! │     │                              first variant with stock,            │
//! │     │                              else first variant                   │
//! │     │                                                                   │
//! │     └── no ──► product's own price fields                               │
//! │                                                                         │
//! │  PriceFields ──► resolve_price(fields, now) ──► ResolvedPrice           │
//! │                                                                         │
//! │  within offer  iff  offer < selling  AND  start ≤ now ≤ end            │
//! │  (absent start/end behave as the epoch, so an unset window is           │
//! │   never active)                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! `now` is an argument, never read from the wall clock. Same inputs,
//! same output - the resolver runs identically in tests, on a server
//! renderer, and in the client shell.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Taka;
use crate::types::{PriceFields, Product};

// =============================================================================
// Resolved Price
// =============================================================================

/// Everything the UI and the cart need to know about a price.
///
/// Computed once per render (or per add-to-cart, where the result is
/// frozen onto the cart line); never stored on catalog entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrice {
    /// The regular selling price (strikethrough display when discounted).
    pub selling_price: Taka,
    /// The offer price; equals `selling_price` when no offer is set.
    pub offer_price: Taka,
    /// Whether the discount window is currently open.
    pub is_within_offer: bool,
    /// Whole-percent saving, 0 when the window is closed.
    pub discount_percent: u8,
    /// What the buyer pays: `offer_price` inside the window, else
    /// `selling_price`.
    pub effective_price: Taka,
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves a single set of price fields at a given instant.
///
/// ## Rules
/// - Missing `offer_price` falls back to the selling price (never a
///   saving, never an active window).
/// - The window is the closed interval `[start, end]`; an absent bound
///   behaves as the epoch, so a window missing either date is inactive.
/// - An offer that is not strictly below the selling price is ignored.
///
/// No error cases: malformed inputs were already coerced to 0 at the
/// deserialization boundary.
pub fn resolve_price(fields: &PriceFields, now: DateTime<Utc>) -> ResolvedPrice {
    let selling_price = fields.selling_price;
    let offer_price = fields.offer_price.unwrap_or(selling_price);

    let epoch = Utc.timestamp_opt(0, 0).single().unwrap_or_default();
    let start = fields.discount_start_date.unwrap_or(epoch);
    let end = fields.discount_end_date.unwrap_or(epoch);

    let is_within_offer = offer_price < selling_price && start <= now && now <= end;

    let discount_percent = if is_within_offer {
        offer_price.percent_off(selling_price)
    } else {
        0
    };

    ResolvedPrice {
        selling_price,
        offer_price,
        is_within_offer,
        discount_percent,
        effective_price: if is_within_offer {
            offer_price
        } else {
            selling_price
        },
    }
}

/// Resolves the price shown for a product, honoring the variant invariant.
///
/// With variants, the resolver runs on the selected variant when the id
/// matches, else on the display fallback (first in-stock variant, else
/// the first variant) - never on the parent product's own base fields.
pub fn resolve_product_price(
    product: &Product,
    selected_variant_id: Option<&str>,
    now: DateTime<Utc>,
) -> ResolvedPrice {
    if product.has_variants {
        let chosen = selected_variant_id
            .and_then(|id| product.variant(id))
            .or_else(|| product.fallback_variant());

        match chosen {
            Some(v) => resolve_price(&v.price_fields(), now),
            // A variants product with an empty variant list is broken
            // catalog data; resolve to zeros rather than leak base fields.
            None => resolve_price(&PriceFields::default(), now),
        }
    } else {
        resolve_price(&product.price_fields(), now)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
