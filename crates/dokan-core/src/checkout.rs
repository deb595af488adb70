//! # Checkout Arithmetic
//!
//! Pure order math and the payment-method mapping table. The async
//! orchestration (validate → submit → route) lives in the app layer;
//! everything here is deterministic arithmetic it delegates to.
//!
//! ## Total Computation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   due = subtotal + delivery_fee(area) − additional_discount            │
//! │                                                                         │
//! │   delivery_fee:                                                         │
//! │     • looked up from the business's three-tier fee table               │
//! │     • 0 for an unselected/unrecognized area                            │
//! │     • forced 0 entirely when the business runs office pickup           │
//! │       (no courier)                                                      │
//! │                                                                         │
//! │   additional_discount:                                                  │
//! │     • the fixed wallet promo (applies when the matching payment        │
//! │       method is selected), independent of the fee - it still           │
//! │       applies when delivery is free                                     │
//! │                                                                         │
//! │   The due amount floors at ৳0.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Taka;
use crate::types::DeliveryArea;

// =============================================================================
// Payment Selections & Codes
// =============================================================================

/// UI selection value for cash on delivery.
pub const COD_SELECTION: &str = "cashOnDelivery";

/// UI selection value for the generic "Pay Now" online option.
pub const PAY_NOW_SELECTION: &str = "Pay Now";

/// UI selection value for the bKash wallet (passes through as its own
/// backend code, and triggers the fixed promotional discount when the
/// business has one configured).
pub const BKASH_SELECTION: &str = "bKash";

/// Backend payment code for cash on delivery.
pub const COD_CODE: &str = "cod";

/// Backend payment code for the aggregated online gateway.
pub const SSL_CODE: &str = "ssl";

/// Translates the UI-level payment selection to its backend code.
///
/// ## Mapping
/// | Selection          | Code          |
/// |--------------------|---------------|
/// | `cashOnDelivery`   | `cod`         |
/// | `Pay Now`          | `ssl`         |
/// | any other non-empty| passes through|
/// | empty              | `None` (blocks submission) |
///
/// Named wallet/gateway selections ("bKash", "Nagad", ...) are their own
/// backend codes, so they pass through unchanged.
pub fn map_payment_method(selection: &str) -> Option<String> {
    let selection = selection.trim();
    match selection {
        "" => None,
        COD_SELECTION => Some(COD_CODE.to_string()),
        PAY_NOW_SELECTION => Some(SSL_CODE.to_string()),
        other => Some(other.to_string()),
    }
}

// =============================================================================
// Delivery Fees
// =============================================================================

/// The business's flat delivery fee per shipping-zone tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFees {
    pub inside_dhaka: Taka,
    pub sub_dhaka: Taka,
    pub outside_dhaka: Taka,
}

impl Default for DeliveryFees {
    /// Typical metro-courier defaults.
    fn default() -> Self {
        DeliveryFees {
            inside_dhaka: Taka::new(60),
            sub_dhaka: Taka::new(100),
            outside_dhaka: Taka::new(120),
        }
    }
}

/// How orders leave the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CourierMode {
    /// Courier delivery: area tiers apply.
    #[default]
    Courier,
    /// Customers collect from the office: every fee is zero regardless
    /// of the selected area.
    OfficePickup,
}

/// Looks up the delivery fee for a (possibly unselected) area.
///
/// Unselected or unrecognized areas cost 0 - the validation layer is
/// responsible for requiring a selection before submission; this lookup
/// never fails.
pub fn delivery_fee(area: Option<DeliveryArea>, fees: &DeliveryFees, mode: CourierMode) -> Taka {
    if mode == CourierMode::OfficePickup {
        return Taka::zero();
    }

    match area {
        Some(DeliveryArea::InsideDhaka) => fees.inside_dhaka,
        Some(DeliveryArea::SubDhaka) => fees.sub_dhaka,
        Some(DeliveryArea::OutsideDhaka) => fees.outside_dhaka,
        None => Taka::zero(),
    }
}

// =============================================================================
// Order Total
// =============================================================================

/// Itemized order totals, as shown on the checkout summary and encoded
/// into the order payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Taka,
    pub delivery_fee: Taka,
    pub additional_discount: Taka,
    /// `subtotal + delivery_fee − additional_discount`, floored at 0.
    pub due: Taka,
}

/// Computes the amount due.
pub fn order_total(subtotal: Taka, delivery_fee: Taka, additional_discount: Taka) -> OrderTotals {
    OrderTotals {
        subtotal,
        delivery_fee,
        additional_discount,
        due: (subtotal + delivery_fee - additional_discount).floor_zero(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
