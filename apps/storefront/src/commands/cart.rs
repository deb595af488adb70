//! # Cart Commands
//!
//! The UI-facing cart mutations, including THE add gateway.
//!
//! ## One Door In
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    add_to_cart(kind, ...)                               │
//! │                                                                         │
//! │   1. Exclusivity check: regular add blocked while a preorder is         │
//! │      pending, preorder blocked while the cart has items                 │
//! │              │                                                          │
//! │              ▼                                                          │
//! │   2. Variant resolution: selected variant, else first-with-stock,       │
//! │      else first - a variants product never sells on its base fields     │
//! │              │                                                          │
//! │              ▼                                                          │
//! │   3. Stock gate: zero stock is blocked here with a notification         │
//! │              │                                                          │
//! │              ▼                                                          │
//! │   4. Price freeze: the resolver runs ONCE, its output is written        │
//! │      onto the line and never re-derived                                 │
//! │              │                                                          │
//! │              ▼                                                          │
//! │   5. Reducer: merge/append with silent clamping                         │
//! │                                                                         │
//! │   Callers never touch the reducers directly - this function is the      │
//! │   sole mutation entry point, so the cross-store invariant cannot be     │
//! │   bypassed by a forgetful call site.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use dokan_core::cart::{AddOutcome, Cart, CartKind, CartLine, PreorderCart};
use dokan_core::cart::ensure_exclusive;
use dokan_core::money::Taka;
use dokan_core::pricing::resolve_price;
use dokan_core::types::{Product, Variant};
use dokan_core::CoreError;

use crate::error::StoreError;
use crate::state::{CartState, PreorderState};

// =============================================================================
// Response DTOs
// =============================================================================

/// Aggregate numbers for the cart UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub total_quantity: i64,
    pub subtotal: Taka,
    pub discount_amount: Taka,
    pub grand_total: Taka,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            discount_amount: cart.discount_amount,
            grand_total: cart.grand_total(),
        }
    }
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub is_open: bool,
}

/// Preorder-slot response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreorderView {
    pub line: Option<CartLine>,
    pub subtotal: Taka,
}

impl From<&PreorderCart> for PreorderView {
    fn from(slot: &PreorderCart) -> Self {
        PreorderView {
            line: slot.line.clone(),
            subtotal: slot.subtotal(),
        }
    }
}

/// What an add changed: the outcome plus both store snapshots (the UI
/// renders both badges either way).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutation {
    pub outcome: AddOutcome,
    pub cart: CartView,
    pub preorder: PreorderView,
}

fn cart_view(cart: &CartState) -> CartView {
    CartView {
        lines: cart.with_cart(|c| c.lines.clone()),
        totals: cart.with_cart(|c| CartTotals::from(c)),
        is_open: cart.is_open(),
    }
}

fn mutation(outcome: AddOutcome, cart: &CartState, preorder: &PreorderState) -> CartMutation {
    CartMutation {
        outcome,
        cart: cart_view(cart),
        preorder: preorder.with_slot(|p| PreorderView::from(p)),
    }
}

// =============================================================================
// The Add Gateway
// =============================================================================

/// Name shown in stock notifications: "Cotton Panjabi (XL / Red)".
fn display_name(product: &Product, variant: Option<&Variant>) -> String {
    match variant {
        Some(v) if !v.variants_values.is_empty() => {
            format!("{} ({})", product.name, v.variants_values.join(" / "))
        }
        _ => product.name.clone(),
    }
}

/// Adds a product (or one of its variants) to the regular cart or the
/// preorder slot. See the module docs for the full pipeline.
///
/// ## Arguments
/// * `kind` - which store the add targets
/// * `variant_id` - the user's variant selection, if any
/// * `quantity` - requested units (values < 1 behave as 1)
pub fn add_to_cart(
    cart: &CartState,
    preorder: &PreorderState,
    kind: CartKind,
    product: &Product,
    variant_id: Option<&str>,
    quantity: i64,
) -> Result<CartMutation, StoreError> {
    debug!(product_id = %product.id, ?kind, ?variant_id, quantity, "add_to_cart command");

    // Cross-store invariant first: nothing resolves, nothing mutates,
    // until we know this add is even allowed.
    ensure_exclusive(kind, cart.is_empty(), preorder.is_empty())?;

    let now = Utc::now();

    // Variant invariant: with variants, price and stock come from the
    // chosen variant (or the display fallback), never the base fields.
    let chosen: Option<&Variant> = if product.has_variants {
        let v = variant_id
            .and_then(|id| product.variant(id))
            .or_else(|| product.fallback_variant());
        if v.is_none() {
            // Broken catalog data: variants product with no variants
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            }
            .into());
        }
        v
    } else {
        None
    };

    let stock = chosen.map_or(product.stock, |v| v.stock);
    if stock <= 0 {
        return Err(CoreError::OutOfStock {
            name: display_name(product, chosen),
        }
        .into());
    }

    let resolved = match chosen {
        Some(v) => resolve_price(&v.price_fields(), now),
        None => resolve_price(&product.price_fields(), now),
    };

    let line = CartLine {
        item_id: product.id.clone(),
        variant_id: chosen.map(|v| v.id.clone()),
        name: product.name.clone(),
        price: resolved.effective_price,
        selling_price: resolved.selling_price,
        offer_price: resolved.is_within_offer.then_some(resolved.offer_price),
        quantity,
        max_stock: stock,
        image: chosen
            .and_then(|v| v.image.clone())
            .or_else(|| product.primary_image().map(String::from)),
        variant_values: chosen.map(|v| v.variants_values.clone()).unwrap_or_default(),
    };

    let outcome = match kind {
        CartKind::Regular => cart.with_cart_mut(|c| c.add_line(line)),
        CartKind::Preorder => preorder.with_slot_mut(|s| s.set_line(line)),
    };

    info!(
        product_id = %product.id,
        ?kind,
        quantity = outcome.quantity,
        clamped = outcome.clamped,
        "Added to cart"
    );

    Ok(mutation(outcome, cart, preorder))
}

// =============================================================================
// Remaining Cart Commands
// =============================================================================

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartView {
    debug!("get_cart command");
    cart_view(cart)
}

/// Sets a line's quantity (≤ 0 removes, values above the stock snapshot
/// clamp).
pub fn update_cart_item(
    cart: &CartState,
    item_id: &str,
    variant_id: Option<&str>,
    quantity: i64,
) -> CartView {
    debug!(%item_id, ?variant_id, quantity, "update_cart_item command");
    cart.with_cart_mut(|c| c.update_quantity(item_id, variant_id, quantity));
    cart_view(cart)
}

/// Removes a line.
pub fn remove_from_cart(cart: &CartState, item_id: &str, variant_id: Option<&str>) -> CartView {
    debug!(%item_id, ?variant_id, "remove_from_cart command");
    cart.with_cart_mut(|c| c.remove_line(item_id, variant_id));
    cart_view(cart)
}

/// Clears all items from the cart.
///
/// ## When Used
/// - The user resolves a cart/preorder conflict in the preorder's favor
/// - After a successful order (the orchestrator calls the reducer
///   directly)
pub fn clear_cart(cart: &CartState) -> CartView {
    debug!("clear_cart command");
    cart.with_cart_mut(Cart::clear);
    cart_view(cart)
}

/// Opens/closes the mini-cart drawer (pure UI state).
pub fn set_cart_open(cart: &CartState, open: bool) -> CartView {
    cart.set_open(open);
    cart_view(cart)
}

/// Gets the preorder slot.
pub fn get_preorder(preorder: &PreorderState) -> PreorderView {
    debug!("get_preorder command");
    preorder.with_slot(|p| PreorderView::from(p))
}

/// Clears the preorder slot.
pub fn clear_preorder(preorder: &PreorderState) -> PreorderView {
    debug!("clear_preorder command");
    preorder.with_slot_mut(PreorderCart::clear);
    preorder.with_slot(|p| PreorderView::from(p))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Duration;

    fn plain_product(id: &str, price: i64, stock: i64) -> Product {
        serde_json::from_str(&format!(
            r#"{{"_id":"{id}","name":"Product {id}","selling_price":{price},"stock":{stock}}}"#
        ))
        .unwrap()
    }

    fn variant_product_with_offer(stock: i64) -> Product {
        let start = (Utc::now() - Duration::days(1)).to_rfc3339();
        let end = (Utc::now() + Duration::days(1)).to_rfc3339();
        serde_json::from_str(&format!(
            r#"{{"_id":"p1","name":"Cotton Panjabi","hasVariants":true,
                "variants":[{{"_id":"v1","selling_price":800,"offer_price":600,
                    "discount_start_date":"{start}","discount_end_date":"{end}",
                    "stock":{stock},"variants_values":["XL"]}}]}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_add_plain_product_freezes_price() {
        // selling 1000, no offer, stock 5, add 3
        let cart = CartState::new();
        let preorder = PreorderState::new();
        let product = plain_product("p1", 1000, 5);

        let m = add_to_cart(&cart, &preorder, CartKind::Regular, &product, None, 3).unwrap();

        assert_eq!(m.cart.lines.len(), 1);
        let line = &m.cart.lines[0];
        assert_eq!(line.price, Taka::new(1000));
        assert_eq!(line.quantity, 3);
        assert_eq!(line.max_stock, 5);
        assert_eq!(line.offer_price, None);
    }

    #[test]
    fn test_add_active_offer_variant_clamps() {
        // variant selling 800 / offer 600 active, stock 2, request 5
        let cart = CartState::new();
        let preorder = PreorderState::new();
        let product = variant_product_with_offer(2);

        let m =
            add_to_cart(&cart, &preorder, CartKind::Regular, &product, Some("v1"), 5).unwrap();

        assert!(m.outcome.clamped);
        let line = &m.cart.lines[0];
        assert_eq!(line.price, Taka::new(600)); // offer price frozen
        assert_eq!(line.selling_price, Taka::new(800));
        assert_eq!(line.quantity, 2); // clamped to stock
        assert_eq!(line.variant_values, vec!["XL".to_string()]);
    }

    #[test]
    fn test_zero_stock_is_blocked_with_notification() {
        let cart = CartState::new();
        let preorder = PreorderState::new();
        let product = variant_product_with_offer(0);

        let err =
            add_to_cart(&cart, &preorder, CartKind::Regular, &product, Some("v1"), 1).unwrap_err();

        assert_eq!(err.code, ErrorCode::OutOfStock);
        assert!(err.message.contains("Cotton Panjabi (XL)"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_regular_add_blocked_while_preorder_pending() {
        let cart = CartState::new();
        let preorder = PreorderState::new();
        let preorder_item = plain_product("pre", 900, 3);
        let regular_item = plain_product("reg", 500, 3);

        add_to_cart(&cart, &preorder, CartKind::Preorder, &preorder_item, None, 1).unwrap();

        let err =
            add_to_cart(&cart, &preorder, CartKind::Regular, &regular_item, None, 1).unwrap_err();

        assert_eq!(err.code, ErrorCode::CartConflict);
        assert!(cart.is_empty()); // the blocked add mutated nothing
        assert!(!preorder.is_empty());
    }

    #[test]
    fn test_preorder_blocked_while_cart_has_items() {
        let cart = CartState::new();
        let preorder = PreorderState::new();
        let regular_item = plain_product("reg", 500, 3);
        let preorder_item = plain_product("pre", 900, 3);

        add_to_cart(&cart, &preorder, CartKind::Regular, &regular_item, None, 1).unwrap();

        let err =
            add_to_cart(&cart, &preorder, CartKind::Preorder, &preorder_item, None, 1).unwrap_err();

        assert_eq!(err.code, ErrorCode::CartConflict);
        assert!(preorder.is_empty());

        // Clearing the cart resolves the conflict
        clear_cart(&cart);
        assert!(
            add_to_cart(&cart, &preorder, CartKind::Preorder, &preorder_item, None, 1).is_ok()
        );
    }

    #[test]
    fn test_update_and_remove() {
        let cart = CartState::new();
        let preorder = PreorderState::new();
        let product = plain_product("p1", 500, 4);

        add_to_cart(&cart, &preorder, CartKind::Regular, &product, None, 1).unwrap();

        let view = update_cart_item(&cart, "p1", None, 99);
        assert_eq!(view.lines[0].quantity, 4); // clamped

        let view = update_cart_item(&cart, "p1", None, 0);
        assert!(view.lines.is_empty()); // non-positive removes

        add_to_cart(&cart, &preorder, CartKind::Regular, &product, None, 1).unwrap();
        let view = remove_from_cart(&cart, "p1", None);
        assert!(view.lines.is_empty());
    }
}
