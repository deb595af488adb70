//! # Cart Reducers
//!
//! Pure state + transitions for the regular cart and the preorder slot.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Reducer Operations                              │
//! │                                                                         │
//! │  UI Action                Reducer                  State Change         │
//! │  ─────────                ───────                  ────────────         │
//! │                                                                         │
//! │  Add to cart ────────────► add_line() ───────────► merge or append,    │
//! │                                                     quantity clamped    │
//! │                                                     to stock snapshot   │
//! │                                                                         │
//! │  Change quantity ────────► update_quantity() ────► set (clamped), or   │
//! │                                                     remove when ≤ 0     │
//! │                                                                         │
//! │  Remove line ────────────► remove_line() ────────► filter by identity  │
//! │                                                                         │
//! │  Clear ──────────────────► clear() ──────────────► empty               │
//! │                                                                         │
//! │  NOTE: Exceeding the stock snapshot NEVER errors - the quantity         │
//! │        silently clamps. That is the contract, not an oversight.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A line is identified by `(item_id, variant_id-or-none)`. Adding the
//! same identity twice merges by summing quantities (clamped); it never
//! duplicates the line.
//!
//! ## Where the mutual exclusion lives
//! The regular cart and the preorder slot must never both be non-empty.
//! That rule is enforced by the single add gateway in the app layer -
//! these reducers stay oblivious so they remain pure and composable.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Taka;

// =============================================================================
// Cart Line
// =============================================================================

/// One (product, variant-or-none) pairing in a cart.
///
/// ## Price Freezing
/// `price` is the effective unit price at the moment of adding, resolved
/// once by the pricing resolver and frozen here. A mid-session catalog
/// price change never alters a line already in the cart.
/// `selling_price`/`offer_price` ride along for strikethrough display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog id of the product (or of the variant's parent product).
    pub item_id: String,

    /// Variant id when a variant was chosen; `None` for plain products.
    pub variant_id: Option<String>,

    /// Display name at add-time (frozen).
    pub name: String,

    /// Effective unit price at add-time (frozen).
    pub price: Taka,

    /// Regular selling price at add-time, for strikethrough display.
    pub selling_price: Taka,

    /// Offer price at add-time, if a discount window was open.
    pub offer_price: Option<Taka>,

    /// Units of this line in the cart. Always ≥ 1 and ≤ `max_stock`.
    pub quantity: i64,

    /// Stock snapshot at add-time; the hard quantity cap for this line.
    pub max_stock: i64,

    /// Image reference for the mini-cart and the order-status page.
    pub image: Option<String>,

    /// Variant option labels (e.g. ["XL"]) for display.
    pub variant_values: Vec<String>,
}

impl CartLine {
    /// Line total: frozen unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Taka {
        self.price.multiply_quantity(self.quantity)
    }

    /// Whether this line is the given (item, variant) identity.
    fn matches(&self, item_id: &str, variant_id: Option<&str>) -> bool {
        self.item_id == item_id && self.variant_id.as_deref() == variant_id
    }
}

// =============================================================================
// Add Outcome
// =============================================================================

/// What `add_line` did.
///
/// The clamp is deliberately an *outcome*, not an error: the add always
/// takes effect (unless nothing was addable at all), and callers that
/// want to toast "only N left in stock" can check `clamped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddOutcome {
    /// The add merged into an existing line instead of appending.
    pub merged: bool,
    /// The requested quantity exceeded the stock snapshot and was cut.
    pub clamped: bool,
    /// Quantity now on the line (0 means the stock snapshot was empty
    /// and nothing was stored).
    pub quantity: i64,
}

// =============================================================================
// Cart
// =============================================================================

/// The regular shopping cart.
///
/// ## Invariants
/// - Lines are unique by `(item_id, variant_id)`; same-identity adds merge.
/// - `1 ≤ quantity ≤ max_stock` for every stored line.
/// - `discount_amount` is an order-level adjustment (e.g. the wallet
///   promo); it never touches per-line prices.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,

    /// Order-level discount subtracted from the subtotal.
    #[serde(default)]
    pub discount_amount: Taka,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a line, merging with an existing identity and clamping the
    /// quantity to the line's stock snapshot.
    ///
    /// ## Behavior
    /// - Same `(item_id, variant_id)` already present: quantities sum,
    ///   clamped to `max_stock`.
    /// - New identity: appended, quantity clamped to `max_stock`.
    /// - `max_stock ≤ 0`: nothing is stored; outcome reports quantity 0.
    ///
    /// Exceeding the cap is never an error (see module docs).
    pub fn add_line(&mut self, line: CartLine) -> AddOutcome {
        if line.max_stock <= 0 {
            return AddOutcome {
                merged: false,
                clamped: true,
                quantity: 0,
            };
        }

        let requested = line.quantity.max(1);

        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(&line.item_id, line.variant_id.as_deref()))
        {
            let wanted = existing.quantity + requested;
            let stored = wanted.min(existing.max_stock);
            existing.quantity = stored;
            return AddOutcome {
                merged: true,
                clamped: stored < wanted,
                quantity: stored,
            };
        }

        let stored = requested.min(line.max_stock);
        let clamped = stored < requested;
        self.lines.push(CartLine {
            quantity: stored,
            ..line
        });
        AddOutcome {
            merged: false,
            clamped,
            quantity: stored,
        }
    }

    /// Sets a line's quantity.
    ///
    /// ## Behavior
    /// - `quantity ≤ 0` removes the line (an implicit remove, uniformly
    ///   for 0 and negatives).
    /// - Otherwise the quantity is clamped to the line's stock snapshot.
    /// - Unknown identity is a no-op.
    pub fn update_quantity(&mut self, item_id: &str, variant_id: Option<&str>, quantity: i64) {
        if quantity <= 0 {
            self.remove_line(item_id, variant_id);
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(item_id, variant_id))
        {
            line.quantity = quantity.min(line.max_stock);
        }
    }

    /// Removes the exact `(item_id, variant_id)` line; no-op if absent.
    pub fn remove_line(&mut self, item_id: &str, variant_id: Option<&str>) {
        self.lines.retain(|l| !l.matches(item_id, variant_id));
    }

    /// Empties the cart and resets the order-level discount.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount_amount = Taka::zero();
    }

    /// Sets the order-level discount (e.g. the wallet promo amount).
    pub fn set_discount(&mut self, amount: Taka) {
        self.discount_amount = amount;
    }

    /// Looks up a line by identity.
    pub fn line(&self, item_id: &str, variant_id: Option<&str>) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(item_id, variant_id))
    }

    /// Total units across all lines (the cart badge number).
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals, before any order-level discount.
    pub fn subtotal(&self) -> Taka {
        self.lines
            .iter()
            .fold(Taka::zero(), |acc, l| acc + l.line_total())
    }

    /// Subtotal minus the order-level discount.
    pub fn grand_total(&self) -> Taka {
        self.subtotal() - self.discount_amount
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Preorder Cart
// =============================================================================

/// The preorder slot: at most one line, replaced wholesale.
///
/// Committing to a preorder purchase overwrites whatever was here; there
/// is no merging and no second line. The slot is mutually exclusive with
/// the regular cart (enforced by the add gateway in the app layer).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PreorderCart {
    /// The single committed preorder line, if any.
    pub line: Option<CartLine>,
}

impl PreorderCart {
    /// Creates an empty preorder slot.
    pub fn new() -> Self {
        PreorderCart::default()
    }

    /// Replaces the slot's content with the given line, clamping its
    /// quantity to the stock snapshot (same policy as the regular cart).
    pub fn set_line(&mut self, line: CartLine) -> AddOutcome {
        if line.max_stock <= 0 {
            return AddOutcome {
                merged: false,
                clamped: true,
                quantity: 0,
            };
        }

        let requested = line.quantity.max(1);
        let stored = requested.min(line.max_stock);
        let clamped = stored < requested;
        self.line = Some(CartLine {
            quantity: stored,
            ..line
        });
        AddOutcome {
            merged: false,
            clamped,
            quantity: stored,
        }
    }

    /// Empties the slot (explicit clear, or after a placed order).
    pub fn clear(&mut self) {
        self.line = None;
    }

    /// Whether the slot is empty.
    pub fn is_empty(&self) -> bool {
        self.line.is_none()
    }

    /// Total units (0 or the line's quantity).
    pub fn total_quantity(&self) -> i64 {
        self.line.as_ref().map_or(0, |l| l.quantity)
    }

    /// The slot's subtotal.
    pub fn subtotal(&self) -> Taka {
        self.line.as_ref().map_or(Taka::zero(), CartLine::line_total)
    }
}

// =============================================================================
// Cross-Store Exclusivity
// =============================================================================

/// Which cart an add targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum CartKind {
    Regular,
    Preorder,
}

/// The one rule both carts share: they can never both be non-empty.
///
/// Called by the add gateway *before* delegating to a reducer. Kept here
/// (pure, next to the reducers it protects) so no caller can reimplement
/// it subtly differently.
pub fn ensure_exclusive(
    target: CartKind,
    cart_is_empty: bool,
    preorder_is_empty: bool,
) -> crate::error::CoreResult<()> {
    match target {
        CartKind::Regular if !preorder_is_empty => Err(crate::error::CoreError::PreorderPending),
        CartKind::Preorder if !cart_is_empty => Err(crate::error::CoreError::CartNotEmpty),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item: &str, variant: Option<&str>, price: i64, qty: i64, stock: i64) -> CartLine {
        CartLine {
            item_id: item.to_string(),
            variant_id: variant.map(String::from),
            name: format!("Item {item}"),
            price: Taka::new(price),
            selling_price: Taka::new(price),
            offer_price: None,
            quantity: qty,
            max_stock: stock,
            image: None,
            variant_values: vec![],
        }
    }

    #[test]
    fn test_add_plain_product() {
        // selling_price 1000, no offer, stock 5, add 3
        let mut cart = Cart::new();
        let outcome = cart.add_line(line("p1", None, 1000, 3, 5));

        assert!(!outcome.merged);
        assert!(!outcome.clamped);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].price, Taka::new(1000));
        assert_eq!(cart.lines[0].quantity, 3);
        assert_eq!(cart.lines[0].max_stock, 5);
    }

    #[test]
    fn test_add_clamps_to_stock_never_errors() {
        // stock 2, request 5: stored quantity is exactly the cap
        let mut cart = Cart::new();
        let outcome = cart.add_line(line("p1", Some("v1"), 600, 5, 2));

        assert!(outcome.clamped);
        assert_eq!(outcome.quantity, 2);
        assert_eq!(cart.lines[0].quantity, 2);
    }

    #[test]
    fn test_same_identity_merges_not_duplicates() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", Some("v1"), 600, 2, 10));
        let outcome = cart.add_line(line("p1", Some("v1"), 600, 3, 10));

        assert!(outcome.merged);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 5);
    }

    #[test]
    fn test_merge_clamps_sum() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", None, 600, 3, 4));
        let outcome = cart.add_line(line("p1", None, 600, 3, 4));

        assert!(outcome.merged);
        assert!(outcome.clamped);
        assert_eq!(cart.lines[0].quantity, 4);
    }

    #[test]
    fn test_different_variants_are_distinct_lines() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", Some("v1"), 600, 1, 5));
        cart.add_line(line("p1", Some("v2"), 650, 1, 5));
        cart.add_line(line("p1", None, 700, 1, 5));

        assert_eq!(cart.lines.len(), 3);
    }

    #[test]
    fn test_zero_stock_stores_nothing() {
        let mut cart = Cart::new();
        let outcome = cart.add_line(line("p1", None, 600, 1, 0));

        assert_eq!(outcome.quantity, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_clamps() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", None, 600, 1, 4));
        cart.update_quantity("p1", None, 99);

        assert_eq!(cart.lines[0].quantity, 4);
    }

    #[test]
    fn test_update_quantity_nonpositive_removes() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", None, 600, 2, 4));
        cart.update_quantity("p1", None, 0);
        assert!(cart.is_empty());

        cart.add_line(line("p1", None, 600, 2, 4));
        cart.update_quantity("p1", None, -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_exact_identity_only() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", Some("v1"), 600, 1, 5));
        cart.add_line(line("p1", Some("v2"), 600, 1, 5));

        cart.remove_line("p1", Some("v1"));
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].variant_id.as_deref(), Some("v2"));

        // Removing something absent is a no-op
        cart.remove_line("p1", Some("v9"));
        assert_eq!(cart.lines.len(), 1);
    }

    #[test]
    fn test_totals_and_discount() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", None, 300, 2, 10)); // 600
        cart.add_line(line("p2", None, 150, 1, 10)); // 150

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), Taka::new(750));

        cart.set_discount(Taka::new(100));
        assert_eq!(cart.grand_total(), Taka::new(650));
    }

    #[test]
    fn test_clear_resets_discount() {
        let mut cart = Cart::new();
        cart.add_line(line("p1", None, 300, 1, 10));
        cart.set_discount(Taka::new(50));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.grand_total(), Taka::zero());
    }

    #[test]
    fn test_preorder_slot_replaces_wholesale() {
        let mut slot = PreorderCart::new();
        slot.set_line(line("p1", None, 900, 1, 3));
        slot.set_line(line("p2", None, 500, 2, 3));

        let l = slot.line.as_ref().unwrap();
        assert_eq!(l.item_id, "p2");
        assert_eq!(slot.total_quantity(), 2);
        assert_eq!(slot.subtotal(), Taka::new(1000));
    }

    #[test]
    fn test_preorder_clamps_like_cart() {
        let mut slot = PreorderCart::new();
        let outcome = slot.set_line(line("p1", None, 900, 9, 3));

        assert!(outcome.clamped);
        assert_eq!(slot.line.as_ref().unwrap().quantity, 3);
    }

    #[test]
    fn test_preorder_clear() {
        let mut slot = PreorderCart::new();
        slot.set_line(line("p1", None, 900, 1, 3));
        slot.clear();
        assert!(slot.is_empty());
    }

    #[test]
    fn test_exclusive_blocks_regular_while_preorder_pending() {
        let err = ensure_exclusive(CartKind::Regular, true, false).unwrap_err();
        assert!(matches!(err, crate::error::CoreError::PreorderPending));
    }

    #[test]
    fn test_exclusive_blocks_preorder_while_cart_has_items() {
        let err = ensure_exclusive(CartKind::Preorder, false, true).unwrap_err();
        assert!(matches!(err, crate::error::CoreError::CartNotEmpty));
    }

    #[test]
    fn test_exclusive_allows_when_other_side_empty() {
        assert!(ensure_exclusive(CartKind::Regular, false, true).is_ok());
        assert!(ensure_exclusive(CartKind::Preorder, true, false).is_ok());
        assert!(ensure_exclusive(CartKind::Regular, true, true).is_ok());
    }
}
