//! # Wishlist State

use std::sync::{Arc, Mutex};

use dokan_core::wishlist::Wishlist;

/// Managed wishlist state.
#[derive(Debug, Default)]
pub struct WishlistState {
    wishlist: Arc<Mutex<Wishlist>>,
}

impl WishlistState {
    pub fn new() -> Self {
        WishlistState::default()
    }

    /// Executes a function with read access to the wishlist.
    pub fn with_wishlist<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Wishlist) -> R,
    {
        let wl = self.wishlist.lock().expect("Wishlist mutex poisoned");
        f(&wl)
    }

    /// Executes a function with write access to the wishlist.
    pub fn with_wishlist_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Wishlist) -> R,
    {
        let mut wl = self.wishlist.lock().expect("Wishlist mutex poisoned");
        f(&mut wl)
    }
}
