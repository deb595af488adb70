//! # Checkout Commands
//!
//! Form edits, payment selection, and the one async command in the whole
//! storefront: `submit_order`.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use dokan_api::ApiClient;
use dokan_core::cart::{CartKind, CartLine};
use dokan_core::checkout::{
    delivery_fee, map_payment_method, order_total, OrderTotals, BKASH_SELECTION, COD_CODE,
};
use dokan_core::money::Taka;
use dokan_core::types::CheckoutForm;
use dokan_core::validation::validate_form;
use dokan_core::CoreError;

use crate::checkout::{
    build_order_request, build_status_url, Attribution, CheckoutOutcome, SubmissionGuard,
};
use crate::error::{ErrorCode, StoreError, GENERIC_SUBMIT_FAILURE};
use crate::state::{BusinessConfig, CartState, CheckoutFormState, FormPatch, PreorderState};

// =============================================================================
// Form & Payment Commands
// =============================================================================

/// Gets the current form (pre-filled from the persisted snapshot).
pub fn get_form(form: &CheckoutFormState) -> CheckoutForm {
    form.snapshot()
}

/// Applies a partial form edit and returns the updated form.
pub fn update_form(form: &CheckoutFormState, patch: FormPatch) -> CheckoutForm {
    form.apply(patch);
    form.snapshot()
}

/// Current checkout summary for the totals panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub totals: OrderTotals,
    pub payment_method: String,
}

/// Records the payment selection and applies the wallet promo.
///
/// Selecting bKash sets the business-configured fixed discount on the
/// cart; selecting anything else clears it. That coupling between
/// payment choice and discount is a promotional rule, not an accident.
pub fn select_payment_method(
    form: &CheckoutFormState,
    cart: &CartState,
    preorder: &PreorderState,
    config: &BusinessConfig,
    selection: &str,
) -> CheckoutSummary {
    debug!(%selection, "select_payment_method command");

    form.with_form_mut(|f| f.payment_method = selection.to_string());

    let discount = if selection == BKASH_SELECTION {
        config.bkash_discount
    } else {
        Taka::zero()
    };
    cart.with_cart_mut(|c| c.set_discount(discount));

    summarize(form, cart, preorder, config)
}

/// Computes the live totals panel for the checkout page.
pub fn summarize(
    form: &CheckoutFormState,
    cart: &CartState,
    preorder: &PreorderState,
    config: &BusinessConfig,
) -> CheckoutSummary {
    let form = form.snapshot();
    let subtotal = if !cart.is_empty() {
        cart.with_cart(|c| c.subtotal())
    } else {
        preorder.with_slot(|s| s.subtotal())
    };
    let fee = delivery_fee(form.delivery_area, &config.delivery_fees, config.courier_mode);
    let discount = if form.payment_method == BKASH_SELECTION {
        config.bkash_discount
    } else {
        Taka::zero()
    };

    CheckoutSummary {
        totals: order_total(subtotal, fee, discount),
        payment_method: form.payment_method,
    }
}

// =============================================================================
// Order Submission
// =============================================================================

/// Submits the current cart (or preorder) as an order.
///
/// ## Flow
/// 1. Claim the in-flight guard (a concurrent second submit is rejected
///    outright, independent of UI disablement)
/// 2. Validate the form - failures return the per-field map and never
///    touch the network
/// 3. Assemble totals and the payload from whichever store has items
/// 4. POST the order (the single suspend point; no retry, no timeout
///    beyond the transport's own)
/// 5. On success: clear the supplying store, then route - COD to the
///    client-side status page, online payment to the gateway URL
///
/// ## Failure Contract
/// Any failure leaves the cart/preorder exactly as they were, so the
/// user can fix the problem and try again by hand.
pub async fn submit_order(
    api: &ApiClient,
    cart: &CartState,
    preorder: &PreorderState,
    form_state: &CheckoutFormState,
    config: &BusinessConfig,
    guard: &SubmissionGuard,
    attribution: Attribution,
) -> Result<CheckoutOutcome, StoreError> {
    let _token = guard.try_begin()?;

    let form = form_state.snapshot();
    validate_form(&form).map_err(StoreError::validation)?;

    // Whichever store has items supplies the order; the exclusivity
    // invariant means at most one of them does.
    let (source, lines): (CartKind, Vec<CartLine>) = if !cart.is_empty() {
        (CartKind::Regular, cart.with_cart(|c| c.lines.clone()))
    } else if !preorder.is_empty() {
        (
            CartKind::Preorder,
            preorder.with_slot(|s| s.line.clone().into_iter().collect()),
        )
    } else {
        return Err(CoreError::EmptyOrder.into());
    };

    let payment_code =
        map_payment_method(&form.payment_method).ok_or(CoreError::MissingPaymentMethod)?;

    let subtotal = lines
        .iter()
        .fold(Taka::zero(), |acc, l| acc + l.line_total());
    let fee = delivery_fee(form.delivery_area, &config.delivery_fees, config.courier_mode);
    let discount = if form.payment_method == BKASH_SELECTION {
        config.bkash_discount
    } else {
        Taka::zero()
    };
    let totals = order_total(subtotal, fee, discount);

    let request = build_order_request(&form, &lines, &totals, payment_code.clone(), config, &attribution);

    let attempt_id = Uuid::new_v4();
    info!(
        %attempt_id,
        ?source,
        due = %totals.due,
        payment = %payment_code,
        items = lines.len(),
        "Submitting order"
    );

    // The single suspend point. A transport error surfaces once and the
    // stores stay untouched.
    let response = api.create_order(&request).await.map_err(StoreError::from)?;

    if !response.success {
        let message = response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_SUBMIT_FAILURE.to_string());
        warn!(%attempt_id, %message, "Order rejected");
        return Err(StoreError::new(ErrorCode::OrderRejected, message));
    }

    // Success: the order exists server-side, so the supplying store is
    // done regardless of how the routing below goes.
    match source {
        CartKind::Regular => cart.with_cart_mut(|c| c.clear()),
        CartKind::Preorder => preorder.with_slot_mut(|s| s.clear()),
    }

    let data = response.data.clone().unwrap_or_default();
    info!(%attempt_id, order_id = %data.order_id, "Order placed");

    if payment_code == COD_CODE {
        let url = build_status_url(&config.status_page_path, &data, &form, &totals, &lines);
        Ok(CheckoutOutcome::StatusPage { url })
    } else if let Some(url) = response.gateway_url() {
        Ok(CheckoutOutcome::Gateway {
            url: url.to_string(),
        })
    } else {
        // Known gap: the order was created but there is no payment page
        // to send the buyer to. Surface it, do not swallow it.
        warn!(%attempt_id, "Order created but no gateway URL in response");
        Err(StoreError::new(
            ErrorCode::GatewayMissing,
            "Your order was received, but the payment page could not be opened. Please contact support.",
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dokan_api::ApiConfig;
    use dokan_core::types::{DeliveryArea, Product};

    fn api() -> ApiClient {
        // Never actually dialed in these tests: every case fails before
        // the network call.
        ApiClient::new(&ApiConfig::default()).unwrap()
    }

    fn product(id: &str, price: i64, stock: i64) -> Product {
        serde_json::from_str(&format!(
            r#"{{"_id":"{id}","name":"Product {id}","selling_price":{price},"stock":{stock}}}"#
        ))
        .unwrap()
    }

    fn filled_form(state: &CheckoutFormState) {
        state.apply(FormPatch {
            name: Some("Rahim Uddin".to_string()),
            phone: Some("01712345678".to_string()),
            address: Some("House 7, Road 3, Dhanmondi".to_string()),
            delivery_area: Some(Some(DeliveryArea::InsideDhaka)),
            note: None,
        });
        state.with_form_mut(|f| f.payment_method = "cashOnDelivery".to_string());
    }

    #[tokio::test]
    async fn test_empty_name_fails_validation_before_network() {
        let cart = CartState::new();
        cart.with_cart_mut(|c| {
            let p = product("p1", 500, 5);
            c.add_line(crate::commands::cart_line_for_tests(&p, 1));
        });
        let form = CheckoutFormState::new();
        filled_form(&form);
        form.with_form_mut(|f| f.name = String::new());

        let err = submit_order(
            &api(),
            &cart,
            &PreorderState::new(),
            &form,
            &BusinessConfig::default(),
            &SubmissionGuard::new(),
            Attribution::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.fields.unwrap().name.is_some());
        // The cart was not touched
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn test_empty_stores_block_submission() {
        let form = CheckoutFormState::new();
        filled_form(&form);

        let err = submit_order(
            &api(),
            &CartState::new(),
            &PreorderState::new(),
            &form,
            &BusinessConfig::default(),
            &SubmissionGuard::new(),
            Attribution::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("Nothing to order"));
    }

    #[tokio::test]
    async fn test_missing_payment_method_blocks_submission() {
        let cart = CartState::new();
        cart.with_cart_mut(|c| {
            let p = product("p1", 500, 5);
            c.add_line(crate::commands::cart_line_for_tests(&p, 1));
        });
        let form = CheckoutFormState::new();
        filled_form(&form);
        form.with_form_mut(|f| f.payment_method = String::new());

        let err = submit_order(
            &api(),
            &cart,
            &PreorderState::new(),
            &form,
            &BusinessConfig::default(),
            &SubmissionGuard::new(),
            Attribution::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::PaymentError);
    }

    #[tokio::test]
    async fn test_in_flight_guard_rejects_second_submit() {
        let guard = SubmissionGuard::new();
        let _held = guard.try_begin().unwrap();

        let form = CheckoutFormState::new();
        filled_form(&form);

        let err = submit_order(
            &api(),
            &CartState::new(),
            &PreorderState::new(),
            &form,
            &BusinessConfig::default(),
            &guard,
            Attribution::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::SubmissionInFlight);
    }

    #[test]
    fn test_bkash_selection_applies_promo() {
        let cart = CartState::new();
        cart.with_cart_mut(|c| {
            let p = product("p1", 500, 5);
            c.add_line(crate::commands::cart_line_for_tests(&p, 1));
        });
        let form = CheckoutFormState::new();
        filled_form(&form);

        let mut config = BusinessConfig::default();
        config.bkash_discount = Taka::new(100);

        let preorder = PreorderState::new();
        let summary = select_payment_method(&form, &cart, &preorder, &config, "bKash");
        assert_eq!(summary.totals.additional_discount, Taka::new(100));
        // subtotal 500 + inside-Dhaka 60 − 100 = 460
        assert_eq!(summary.totals.due, Taka::new(460));
        assert_eq!(cart.with_cart(|c| c.discount_amount), Taka::new(100));

        // Switching away clears the promo
        let summary = select_payment_method(&form, &cart, &preorder, &config, "cashOnDelivery");
        assert_eq!(summary.totals.due, Taka::new(560));
        assert_eq!(cart.with_cart(|c| c.discount_amount), Taka::zero());
    }

    #[test]
    fn test_summary_uses_preorder_when_cart_empty() {
        let cart = CartState::new();
        let preorder = PreorderState::new();
        preorder.with_slot_mut(|s| {
            let p = product("p1", 900, 5);
            s.set_line(crate::commands::cart_line_for_tests(&p, 1));
        });
        let form = CheckoutFormState::new();
        filled_form(&form);

        let summary = summarize(&form, &cart, &preorder, &BusinessConfig::default());
        assert_eq!(summary.totals.subtotal, Taka::new(900));
        assert_eq!(summary.totals.due, Taka::new(960));
    }
}
