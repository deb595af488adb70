//! # Dokan Storefront Library
//!
//! The embeddable application layer for the Dokan storefront. The UI
//! shell (whatever renders the pages) constructs one [`Storefront`] and
//! drives it through the command functions.
//!
//! ## Module Organization
//! ```text
//! dokan_storefront/
//! ├── lib.rs          ◄─── You are here (Storefront setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart + preorder state wrappers
//! │   ├── wishlist.rs ◄─── Wishlist state wrapper
//! │   ├── checkout.rs ◄─── Checkout form state
//! │   ├── config.rs   ◄─── Business configuration
//! │   ├── theme.rs    ◄─── Theme choice
//! │   └── persist.rs  ◄─── Snapshot whitelist load/save
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── The add gateway + cart commands
//! │   ├── wishlist.rs ◄─── Wishlist commands
//! │   └── checkout.rs ◄─── Form, payment, submit_order
//! ├── checkout.rs     ◄─── Submission guard, payload/status-URL builders
//! └── error.rs        ◄─── StoreError for the UI boundary
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Build Config ─────────────────────────────────────────────────────► │
//! │     • Defaults + DOKAN_* environment overrides                          │
//! │                                                                         │
//! │  3. Load Snapshot ────────────────────────────────────────────────────► │
//! │     • cart/preorder/wishlist/form/theme restored from disk              │
//! │     • missing or corrupt file → fresh store                             │
//! │                                                                         │
//! │  4. (Shell) fetch business profile ──► storefront.apply_profile(...)    │
//! │     • delivery fees, courier mode, wallet promo                         │
//! │                                                                         │
//! │  5. Shell renders and starts invoking commands                          │
//! │     • shell calls storefront.save() after mutating commands             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod checkout;
pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use dokan_api::{ApiClient, ApiConfig, BusinessProfile};

use checkout::SubmissionGuard;
use error::StoreError;
use state::{
    default_snapshot_path, BusinessConfig, CartState, CheckoutFormState, PreorderState,
    StoreSnapshot, ThemeState, WishlistState,
};

/// The assembled storefront: every managed state object plus the API
/// client, ready for the UI shell to drive.
#[derive(Debug)]
pub struct Storefront {
    pub config: BusinessConfig,
    pub api: ApiClient,
    pub cart: CartState,
    pub preorder: PreorderState,
    pub wishlist: WishlistState,
    pub form: CheckoutFormState,
    pub theme: ThemeState,
    pub submission: SubmissionGuard,
    snapshot_path: PathBuf,
}

impl Storefront {
    /// Builds a storefront with the snapshot loaded from the default
    /// platform location (see [`state::default_snapshot_path`]).
    pub fn new(config: BusinessConfig) -> Result<Self, StoreError> {
        Self::with_snapshot_path(config, default_snapshot_path())
    }

    /// Builds a storefront persisting to an explicit snapshot path.
    pub fn with_snapshot_path(
        config: BusinessConfig,
        snapshot_path: PathBuf,
    ) -> Result<Self, StoreError> {
        let api = ApiClient::new(&ApiConfig {
            base_url: config.api_base_url.clone(),
            timeout_secs: 30,
        })
        .map_err(|e| StoreError::internal(e.to_string()))?;

        let storefront = Storefront {
            config,
            api,
            cart: CartState::new(),
            preorder: PreorderState::new(),
            wishlist: WishlistState::new(),
            form: CheckoutFormState::new(),
            theme: ThemeState::new(),
            submission: SubmissionGuard::new(),
            snapshot_path,
        };

        StoreSnapshot::load(&storefront.snapshot_path).restore(
            &storefront.cart,
            &storefront.preorder,
            &storefront.wishlist,
            &storefront.form,
            &storefront.theme,
        );

        info!(
            shop = %storefront.config.shop_name,
            api = %storefront.config.api_base_url,
            "Storefront initialized"
        );

        Ok(storefront)
    }

    /// Persists the whitelisted slices. The shell calls this after
    /// mutating commands (and before shutdown).
    pub fn save(&self) -> Result<(), StoreError> {
        StoreSnapshot::capture(
            &self.cart,
            &self.preorder,
            &self.wishlist,
            &self.form,
            &self.theme,
        )
        .save(&self.snapshot_path)
        .map_err(|e| StoreError::internal(e.to_string()))
    }

    /// Applies a fetched business profile (fees, courier mode, promo).
    pub fn apply_profile(&mut self, profile: &BusinessProfile) {
        self.config.apply_profile(profile);
        info!(shop = %self.config.shop_name, "Business profile applied");
    }

    /// Fetches the business profile and applies it.
    pub async fn refresh_business(&mut self) -> Result<(), StoreError> {
        let profile = self.api.fetch_business().await?;
        self.apply_profile(&profile);
        Ok(())
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=dokan=trace` - Show trace for dokan crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,dokan=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_round_trips_snapshot() {
        let dir = std::env::temp_dir().join("dokan-test-storefront");
        let path = dir.join("store.json");
        std::fs::remove_file(&path).ok();

        let store =
            Storefront::with_snapshot_path(BusinessConfig::default(), path.clone()).unwrap();
        store.theme.set("dark".to_string());
        store
            .form
            .with_form_mut(|f| f.name = "Rahim".to_string());
        store.save().unwrap();

        let reloaded = Storefront::with_snapshot_path(BusinessConfig::default(), path).unwrap();
        assert_eq!(reloaded.theme.get(), "dark");
        assert_eq!(reloaded.form.snapshot().name, "Rahim");

        std::fs::remove_dir_all(&dir).ok();
    }
}
