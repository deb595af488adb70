//! # Order Contract Types
//!
//! The order-creation request/response shapes, field-for-field as the
//! backend expects them. The wire format mixes snake_case outer fields
//! with camelCase line-item fields; the serde renames below pin that
//! down so the Rust side can stay consistent.

use serde::{Deserialize, Serialize};

use dokan_core::money::Taka;

// =============================================================================
// Request
// =============================================================================

/// One ordered line on the outbound payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProduct {
    #[serde(rename = "productId")]
    pub product_id: String,

    pub quantity: i64,

    /// Present only when the buyer picked a variant.
    #[serde(rename = "variantId", skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
}

/// The order-creation payload.
///
/// Optional fields are skipped (not sent as null) - the backend treats
/// absent and null differently for the attribution fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,

    /// Wire value of the shipping tier ("inside_dhaka", ...).
    pub delivery_area: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,

    pub products: Vec<OrderProduct>,

    /// Always "fixed" when a promotional discount applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_discount_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_discount_amount: Option<Taka>,

    /// Amount due: subtotal + delivery fee − additional discount.
    pub due: Taka,

    /// Backend payment code ("cod", "ssl", or a gateway's own name).
    pub payment_method: String,

    /// Attribution: where the customer came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_source: Option<String>,

    /// Attribution: ad-platform click id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttclid: Option<String>,

    /// Attribution: opaque tracking blob, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<serde_json::Value>,
}

// =============================================================================
// Response
// =============================================================================

/// Payload of a (successful) order creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderData {
    /// Human-facing order number.
    #[serde(rename = "orderId", default)]
    pub order_id: String,

    /// Database id of the order document.
    #[serde(rename = "_id", default)]
    pub id: String,

    /// Redirect target for the gateway the buyer picked, when online
    /// payment was selected.
    #[serde(rename = "selectedGatewayUrl", default)]
    pub selected_gateway_url: Option<String>,

    /// Fallback redirect target listing every gateway.
    #[serde(rename = "allGatewayUrl", default)]
    pub all_gateway_url: Option<String>,
}

/// The order-creation response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Whether the order was created.
    #[serde(default)]
    pub success: bool,

    /// Server-provided message; shown to the user on failure when set.
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub data: Option<OrderData>,
}

impl OrderResponse {
    /// The gateway redirect to use: the selected gateway when present,
    /// else the all-gateways page.
    pub fn gateway_url(&self) -> Option<&str> {
        let data = self.data.as_ref()?;
        data.selected_gateway_url
            .as_deref()
            .or(data.all_gateway_url.as_deref())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
