//! # Checkout Orchestration Support
//!
//! The pieces `commands::checkout::submit_order` is built from: the
//! in-flight guard, order-payload assembly, and the client-side
//! order-status URL for cash-on-delivery orders.
//!
//! ## Submission State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Idle ──submit──► Validating ──ok──► Submitting ──success──► clear    │
//! │     ▲                  │                   │                  store,   │
//! │     │               field errors        rejected /            redirect │
//! │     │                  │                network error            │     │
//! │     └──────────────────┴───────────────────┴──────────────────────┘     │
//! │                                                                         │
//! │   Submitting is the only suspend point. A second submit while one      │
//! │   is in flight is rejected by the guard itself - the UI disabling      │
//! │   the button is a courtesy, not the protection.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use url::form_urlencoded;

use dokan_api::{OrderData, OrderProduct, OrderRequest};
use dokan_core::cart::CartLine;
use dokan_core::checkout::{OrderTotals, COD_SELECTION};
use dokan_core::types::CheckoutForm;
use dokan_core::validation::normalize_digits;

use crate::error::{ErrorCode, StoreError};
use crate::state::BusinessConfig;

// =============================================================================
// In-Flight Guard
// =============================================================================

/// Hard reentrancy lock around order submission.
///
/// Exactly one submission may be outstanding; the token releases the
/// guard on drop, so every exit path (success, rejection, panic
/// unwinding through an await) ends the in-flight state.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    in_flight: AtomicBool,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        SubmissionGuard::default()
    }

    /// Claims the guard, or fails when a submission is already running.
    pub fn try_begin(&self) -> Result<SubmissionToken<'_>, StoreError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Ok(SubmissionToken { guard: self })
        } else {
            Err(StoreError::new(
                ErrorCode::SubmissionInFlight,
                "An order submission is already in progress",
            ))
        }
    }

    /// Whether a submission is outstanding (drives the loading overlay).
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Proof of holding the guard; releases it on drop.
#[derive(Debug)]
pub struct SubmissionToken<'a> {
    guard: &'a SubmissionGuard,
}

impl Drop for SubmissionToken<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

// =============================================================================
// Outcome & Attribution
// =============================================================================

/// Where the UI sends the user after a successful submission.
///
/// Both branches end in a hard navigation (full page load, not a
/// client-side route): COD goes to our own status page, online payment
/// goes to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum CheckoutOutcome {
    /// Cash on delivery: the client-side status page.
    StatusPage { url: String },
    /// Online payment: the gateway's hosted page.
    Gateway { url: String },
}

impl CheckoutOutcome {
    /// The navigation target, whichever branch was taken.
    pub fn url(&self) -> &str {
        match self {
            CheckoutOutcome::StatusPage { url } | CheckoutOutcome::Gateway { url } => url,
        }
    }
}

/// Marketing attribution riding along on the order payload.
/// Fire-and-forget: the backend never answers anything about it.
#[derive(Debug, Clone, Default)]
pub struct Attribution {
    /// Ad-platform click id, when the visit carried one.
    pub ttclid: Option<String>,
    /// Opaque tracking blob, passed through untouched.
    pub tracking: Option<serde_json::Value>,
}

// =============================================================================
// Payload Assembly
// =============================================================================

/// Builds the outbound order payload from validated inputs.
///
/// The form was validated before this runs; what happens here is
/// normalization (trim, Bengali digits → ASCII) and field mapping, not
/// judgment calls.
pub fn build_order_request(
    form: &CheckoutForm,
    lines: &[CartLine],
    totals: &OrderTotals,
    payment_code: String,
    config: &BusinessConfig,
    attribution: &Attribution,
) -> OrderRequest {
    let note = form.note.trim();

    OrderRequest {
        customer_name: form.name.trim().to_string(),
        customer_phone: normalize_digits(form.phone.trim()),
        customer_address: form.address.trim().to_string(),
        delivery_area: form
            .delivery_area
            .map(|a| a.as_str().to_string())
            .unwrap_or_default(),
        customer_note: (!note.is_empty()).then(|| note.to_string()),
        products: lines
            .iter()
            .map(|line| OrderProduct {
                product_id: line.item_id.clone(),
                quantity: line.quantity,
                variant_id: line.variant_id.clone(),
            })
            .collect(),
        additional_discount_type: totals
            .additional_discount
            .is_positive()
            .then(|| "fixed".to_string()),
        additional_discount_amount: totals
            .additional_discount
            .is_positive()
            .then_some(totals.additional_discount),
        due: totals.due,
        payment_method: payment_code,
        customer_source: Some(config.customer_source.clone()),
        ttclid: attribution.ttclid.clone(),
        tracking: attribution.tracking.clone(),
    }
}

// =============================================================================
// Order-Status URL (COD)
// =============================================================================

/// Builds the client-side status URL a cash-on-delivery order redirects
/// to.
///
/// All free text is percent-encoded; each line item gets indexed
/// `itemName{i}/itemPrice{i}/itemQty{i}/itemImage{i}` parameters so the
/// status page can render the order without refetching anything.
pub fn build_status_url(
    path: &str,
    order: &OrderData,
    form: &CheckoutForm,
    totals: &OrderTotals,
    lines: &[CartLine],
) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    query
        .append_pair("status", "success")
        .append_pair("orderId", &order.order_id)
        .append_pair("_id", &order.id)
        .append_pair("customerName", form.name.trim())
        .append_pair("customerPhone", &normalize_digits(form.phone.trim()))
        .append_pair("customerAddress", form.address.trim())
        .append_pair("total", &totals.due.amount().to_string())
        .append_pair("deliveryCharge", &totals.delivery_fee.amount().to_string())
        .append_pair("itemCount", &lines.len().to_string())
        .append_pair("paymentMethod", COD_SELECTION)
        .append_pair(
            "additionalDiscount",
            &totals.additional_discount.amount().to_string(),
        );

    for (i, line) in lines.iter().enumerate() {
        query
            .append_pair(&format!("itemName{i}"), &line.name)
            .append_pair(&format!("itemPrice{i}"), &line.price.amount().to_string())
            .append_pair(&format!("itemQty{i}"), &line.quantity.to_string())
            .append_pair(&format!("itemImage{i}"), line.image.as_deref().unwrap_or(""));
    }

    format!("{}?{}", path, query.finish())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dokan_core::checkout::order_total;
    use dokan_core::money::Taka;
    use dokan_core::types::DeliveryArea;

    fn line(name: &str, price: i64, qty: i64) -> CartLine {
        CartLine {
            item_id: "p1".to_string(),
            variant_id: None,
            name: name.to_string(),
            price: Taka::new(price),
            selling_price: Taka::new(price),
            offer_price: None,
            quantity: qty,
            max_stock: 10,
            image: Some("https://cdn.example/p1.jpg".to_string()),
            variant_values: vec![],
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Rahim & Sons".to_string(),
            phone: "০১৭১২৩৪৫৬৭৮".to_string(),
            address: "House 7, Road 3, Dhanmondi".to_string(),
            delivery_area: Some(DeliveryArea::InsideDhaka),
            note: "  ".to_string(),
            payment_method: COD_SELECTION.to_string(),
        }
    }

    #[test]
    fn test_guard_rejects_second_submission() {
        let guard = SubmissionGuard::new();
        let token = guard.try_begin().unwrap();
        assert!(guard.is_in_flight());

        let err = guard.try_begin().unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmissionInFlight);

        drop(token);
        assert!(!guard.is_in_flight());
        assert!(guard.try_begin().is_ok());
    }

    #[test]
    fn test_order_request_normalizes_and_maps() {
        let lines = vec![line("Cotton Panjabi", 500, 1)];
        let totals = order_total(Taka::new(500), Taka::new(60), Taka::zero());
        let req = build_order_request(
            &form(),
            &lines,
            &totals,
            "cod".to_string(),
            &BusinessConfig::default(),
            &Attribution::default(),
        );

        assert_eq!(req.customer_phone, "01712345678"); // Bengali digits normalized
        assert_eq!(req.delivery_area, "inside_dhaka");
        assert_eq!(req.customer_note, None); // whitespace note dropped
        assert_eq!(req.due, Taka::new(560));
        assert_eq!(req.additional_discount_type, None); // no promo, no fields
        assert_eq!(req.products.len(), 1);
        assert_eq!(req.products[0].product_id, "p1");
    }

    #[test]
    fn test_order_request_discount_fields_when_promo_applies() {
        let lines = vec![line("Cotton Panjabi", 500, 1)];
        let totals = order_total(Taka::new(500), Taka::new(60), Taka::new(100));
        let req = build_order_request(
            &form(),
            &lines,
            &totals,
            "bKash".to_string(),
            &BusinessConfig::default(),
            &Attribution::default(),
        );

        assert_eq!(req.additional_discount_type.as_deref(), Some("fixed"));
        assert_eq!(req.additional_discount_amount, Some(Taka::new(100)));
        assert_eq!(req.due, Taka::new(460));
    }

    #[test]
    fn test_status_url_encodes_and_indexes() {
        let lines = vec![line("Cotton Panjabi & Co", 500, 2), line("Mug", 150, 1)];
        let totals = order_total(Taka::new(1150), Taka::new(60), Taka::zero());
        let order = OrderData {
            order_id: "DK-1001".to_string(),
            id: "665f1c".to_string(),
            selected_gateway_url: None,
            all_gateway_url: None,
        };

        let url = build_status_url("/order-status", &order, &form(), &totals, &lines);

        assert!(url.starts_with("/order-status?status=success"));
        assert!(url.contains("orderId=DK-1001"));
        assert!(url.contains("_id=665f1c"));
        // Free text percent-encoded: '&' in the name must not split params
        assert!(url.contains("itemName0=Cotton+Panjabi+%26+Co"));
        assert!(url.contains("customerName=Rahim+%26+Sons"));
        assert!(url.contains("itemQty0=2"));
        assert!(url.contains("itemName1=Mug"));
        assert!(url.contains("itemPrice1=150"));
        assert!(url.contains("itemCount=2"));
        assert!(url.contains("paymentMethod=cashOnDelivery"));
        assert!(url.contains("deliveryCharge=60"));
        assert!(url.contains("total=1210"));
    }
}
