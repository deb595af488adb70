//! # Wishlist Reducer

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Taka;

/// A saved-for-later product reference. No quantity - a wishlist marks
/// interest, it does not reserve stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// Catalog id; wishlist entries are unique by this.
    pub id: String,
    /// Display name at save-time.
    pub name: String,
    /// Price shown when the item was saved.
    pub price: Taka,
    /// Image reference.
    pub image: Option<String>,
    /// Variant option labels, when the user saved a specific variant.
    pub variant_values: Vec<String>,
}

/// The wishlist: an id-unique, insertion-ordered collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub items: Vec<WishlistItem>,
}

impl Wishlist {
    pub fn new() -> Self {
        Wishlist::default()
    }

    /// Adds an item. A duplicate id is a no-op, not an error and not a
    /// replacement. Returns whether the item was actually inserted.
    pub fn add(&mut self, item: WishlistItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes by id; no-op if absent. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Add-or-remove in one step (the heart-icon toggle). Returns `true`
    /// when the item is present afterwards.
    pub fn toggle(&mut self, item: WishlistItem) -> bool {
        if self.remove(&item.id) {
            false
        } else {
            self.items.push(item);
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> WishlistItem {
        WishlistItem {
            id: id.to_string(),
            name: format!("Item {id}"),
            price: Taka::new(500),
            image: None,
            variant_values: vec![],
        }
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut wl = Wishlist::new();
        assert!(wl.add(item("a")));
        assert!(!wl.add(item("a")));
        assert_eq!(wl.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut wl = Wishlist::new();
        wl.add(item("a"));
        assert!(!wl.remove("zz"));
        assert!(wl.remove("a"));
        assert!(wl.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut wl = Wishlist::new();
        assert!(wl.toggle(item("a")));
        assert!(wl.contains("a"));
        assert!(!wl.toggle(item("a")));
        assert!(!wl.contains("a"));
    }
}
