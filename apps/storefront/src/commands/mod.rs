//! # Command Module
//!
//! The functions the UI shell invokes. Commands are the only writers:
//! they check business rules (via `dokan-core`), mutate the managed
//! state, and hand back serializable views for rendering.

pub mod cart;
pub mod checkout;
pub mod wishlist;

pub use cart::{
    add_to_cart, clear_cart, clear_preorder, get_cart, get_preorder, remove_from_cart,
    set_cart_open, update_cart_item, CartMutation, CartTotals, CartView, PreorderView,
};
pub use checkout::{
    get_form, select_payment_method, submit_order, summarize, update_form, CheckoutSummary,
};
pub use wishlist::{get_wishlist, remove_from_wishlist, toggle_wishlist, WishlistView};

/// Builds a cart line straight off a plain product, bypassing the
/// gateway. Test fixtures only - production code goes through
/// [`add_to_cart`].
#[cfg(test)]
pub(crate) fn cart_line_for_tests(
    product: &dokan_core::types::Product,
    quantity: i64,
) -> dokan_core::cart::CartLine {
    dokan_core::cart::CartLine {
        item_id: product.id.clone(),
        variant_id: None,
        name: product.name.clone(),
        price: product.selling_price,
        selling_price: product.selling_price,
        offer_price: None,
        quantity,
        max_stock: product.stock,
        image: None,
        variant_values: vec![],
    }
}
