//! # State Module
//!
//! Manages application state for the embeddable storefront layer.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types. This approach:
//!
//! 1. **Better Separation of Concerns**: Each state type has a single responsibility
//! 2. **Easier Testing**: Can construct/inject individual states
//! 3. **Clearer Command Signatures**: Commands declare exactly what state they need
//! 4. **Reduced Contention**: Independent states don't block each other
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌───────────────┐  ┌──────────────────┐             │
//! │  │  CartState   │  │ PreorderState │  │  WishlistState   │             │
//! │  │  Arc<Mutex<  │  │  Arc<Mutex<   │  │  Arc<Mutex<      │             │
//! │  │    Cart>>    │  │   Preorder    │  │    Wishlist>>    │             │
//! │  │  + open flag │  │   Cart>>      │  │                  │             │
//! │  └──────────────┘  └───────────────┘  └──────────────────┘             │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────┐          │
//! │  │ CheckoutFormState│  │  BusinessConfig  │  │  ThemeState  │          │
//! │  │  Arc<Mutex<Form>>│  │  (read-mostly)   │  │              │          │
//! │  └──────────────────┘  └──────────────────┘  └──────────────┘          │
//! │                                                                         │
//! │  PERSISTENCE: cart, preorder, wishlist, form and theme are the          │
//! │  snapshot whitelist (state/persist.rs); the rest is per-session.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod checkout;
mod config;
mod persist;
mod theme;
mod wishlist;

pub use cart::{CartState, PreorderState};
pub use checkout::{CheckoutFormState, FormPatch};
pub use config::BusinessConfig;
pub use persist::{default_snapshot_path, StoreSnapshot};
pub use theme::ThemeState;
pub use wishlist::WishlistState;
