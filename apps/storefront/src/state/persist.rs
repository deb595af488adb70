//! # Persisted Store Snapshot
//!
//! A whitelisted subset of the store survives page reloads; everything
//! else is rebuilt fresh per session.
//!
//! ## Whitelist
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PERSISTED (snapshot file)          SESSION-ONLY (rebuilt)             │
//! │  ─────────────────────────          ───────────────────────            │
//! │  • cart lines + discount            • fetched catalog pages            │
//! │  • preorder slot                    • business config (refetched)      │
//! │  • wishlist                         • mini-cart open flag              │
//! │  • checkout form                    • submission in-flight flag        │
//! │  • theme choice                     • every error/toast                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The snapshot is one JSON document, rewritten whole after mutations. A
//! missing or corrupt file is not an error - the store simply starts
//! fresh (and says so at debug level). Two shells sharing one snapshot
//! file can race each other; the last writer wins, as in the reference
//! behavior.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use dokan_core::cart::{Cart, PreorderCart};
use dokan_core::types::CheckoutForm;
use dokan_core::wishlist::Wishlist;

use super::cart::{CartState, PreorderState};
use super::checkout::CheckoutFormState;
use super::theme::ThemeState;
use super::wishlist::WishlistState;

/// The persisted slices, exactly the whitelist above.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub cart: Cart,

    #[serde(default)]
    pub preorder: PreorderCart,

    #[serde(default)]
    pub wishlist: Wishlist,

    #[serde(default)]
    pub checkout_form: CheckoutForm,

    #[serde(default)]
    pub theme: String,
}

impl StoreSnapshot {
    /// Captures the current whitelisted state.
    pub fn capture(
        cart: &CartState,
        preorder: &PreorderState,
        wishlist: &WishlistState,
        form: &CheckoutFormState,
        theme: &ThemeState,
    ) -> Self {
        StoreSnapshot {
            cart: cart.with_cart(Clone::clone),
            preorder: preorder.with_slot(Clone::clone),
            wishlist: wishlist.with_wishlist(Clone::clone),
            checkout_form: form.snapshot(),
            theme: theme.get(),
        }
    }

    /// Restores the whitelisted state into the managed stores.
    pub fn restore(
        self,
        cart: &CartState,
        preorder: &PreorderState,
        wishlist: &WishlistState,
        form: &CheckoutFormState,
        theme: &ThemeState,
    ) {
        cart.with_cart_mut(|c| *c = self.cart);
        preorder.with_slot_mut(|s| *s = self.preorder);
        wishlist.with_wishlist_mut(|w| *w = self.wishlist);
        form.with_form_mut(|f| *f = self.checkout_form);
        theme.set(self.theme);
    }

    /// Loads a snapshot, or a fresh default when the file is missing or
    /// does not parse (a stale schema is treated like a missing file).
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(?path, error = %e, "Corrupt store snapshot, starting fresh");
                    StoreSnapshot::default()
                }
            },
            Err(_) => {
                debug!(?path, "No store snapshot, starting fresh");
                StoreSnapshot::default()
            }
        }
    }

    /// Writes the snapshot, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

/// Determines the snapshot file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.dokan.storefront/store.json`
/// - **Windows**: `%APPDATA%\dokan\storefront\store.json`
/// - **Linux**: `~/.local/share/dokan-storefront/store.json`
///
/// ## Development Override
/// Set `DOKAN_STORE_PATH` to use a custom path.
pub fn default_snapshot_path() -> PathBuf {
    if let Ok(path) = std::env::var("DOKAN_STORE_PATH") {
        return PathBuf::from(path);
    }

    ProjectDirs::from("com", "dokan", "storefront")
        .map(|dirs| dirs.data_dir().join("store.json"))
        .unwrap_or_else(|| PathBuf::from("store.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dokan_core::cart::CartLine;
    use dokan_core::money::Taka;

    fn sample_line() -> CartLine {
        CartLine {
            item_id: "p1".to_string(),
            variant_id: Some("v1".to_string()),
            name: "Cotton Panjabi".to_string(),
            price: Taka::new(600),
            selling_price: Taka::new(800),
            offer_price: Some(Taka::new(600)),
            quantity: 2,
            max_stock: 5,
            image: None,
            variant_values: vec!["XL".to_string()],
        }
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = std::env::temp_dir().join("dokan-test-snapshot");
        let path = dir.join("store.json");

        let cart = CartState::new();
        cart.with_cart_mut(|c| {
            c.add_line(sample_line());
        });
        let preorder = PreorderState::new();
        let wishlist = WishlistState::new();
        let form = CheckoutFormState::new();
        form.with_form_mut(|f| f.name = "Rahim".to_string());
        let theme = ThemeState::new();
        theme.set("dark".to_string());

        let snapshot = StoreSnapshot::capture(&cart, &preorder, &wishlist, &form, &theme);
        snapshot.save(&path).unwrap();

        let restored = StoreSnapshot::load(&path);
        assert_eq!(restored.cart.lines.len(), 1);
        assert_eq!(restored.cart.lines[0].quantity, 2);
        assert_eq!(restored.checkout_form.name, "Rahim");
        assert_eq!(restored.theme, "dark");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_corrupt_snapshot_starts_fresh() {
        let dir = std::env::temp_dir().join("dokan-test-corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let snapshot = StoreSnapshot::load(&path);
        assert!(snapshot.cart.is_empty());
        assert!(snapshot.wishlist.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_snapshot_starts_fresh() {
        let snapshot = StoreSnapshot::load(Path::new("/nonexistent/nowhere/store.json"));
        assert!(snapshot.cart.is_empty());
        assert!(snapshot.preorder.is_empty());
    }
}
