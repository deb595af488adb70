//! # Wishlist Commands

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use dokan_core::pricing::resolve_product_price;
use dokan_core::types::Product;
use dokan_core::wishlist::WishlistItem;

use crate::state::WishlistState;

/// Wishlist response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub items: Vec<WishlistItem>,
    pub count: usize,
}

fn view(wishlist: &WishlistState) -> WishlistView {
    wishlist.with_wishlist(|wl| WishlistView {
        items: wl.items.clone(),
        count: wl.len(),
    })
}

/// Gets the current wishlist.
pub fn get_wishlist(wishlist: &WishlistState) -> WishlistView {
    debug!("get_wishlist command");
    view(wishlist)
}

/// Heart-icon toggle: saves the product, or removes it if already saved.
///
/// The saved price is the effective price at save-time; like cart lines
/// it is display data, not a price promise.
pub fn toggle_wishlist(
    wishlist: &WishlistState,
    product: &Product,
    variant_id: Option<&str>,
) -> WishlistView {
    debug!(product_id = %product.id, ?variant_id, "toggle_wishlist command");

    let resolved = resolve_product_price(product, variant_id, Utc::now());
    let chosen = variant_id.and_then(|id| product.variant(id));

    let item = WishlistItem {
        id: product.id.clone(),
        name: product.name.clone(),
        price: resolved.effective_price,
        image: chosen
            .and_then(|v| v.image.clone())
            .or_else(|| product.primary_image().map(String::from)),
        variant_values: chosen.map(|v| v.variants_values.clone()).unwrap_or_default(),
    };

    wishlist.with_wishlist_mut(|wl| wl.toggle(item));
    view(wishlist)
}

/// Removes a saved product; no-op if absent.
pub fn remove_from_wishlist(wishlist: &WishlistState, id: &str) -> WishlistView {
    debug!(%id, "remove_from_wishlist command");
    wishlist.with_wishlist_mut(|wl| wl.remove(id));
    view(wishlist)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        serde_json::from_str(&format!(
            r#"{{"_id":"{id}","name":"Product {id}","selling_price":750,"stock":3}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_toggle_saves_then_removes() {
        let wishlist = WishlistState::new();

        let v = toggle_wishlist(&wishlist, &product("p1"), None);
        assert_eq!(v.count, 1);
        assert_eq!(v.items[0].price.amount(), 750);

        let v = toggle_wishlist(&wishlist, &product("p1"), None);
        assert_eq!(v.count, 0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let wishlist = WishlistState::new();
        toggle_wishlist(&wishlist, &product("p1"), None);

        let v = remove_from_wishlist(&wishlist, "zz");
        assert_eq!(v.count, 1);
    }
}
