//! # Cart & Preorder State
//!
//! App-managed wrappers around the pure reducers in `dokan_core::cart`.
//!
//! ## Thread Safety
//! Both stores are wrapped in `Arc<Mutex<T>>`:
//! 1. Multiple commands may access/modify a store
//! 2. Only one command should modify a store at a time
//! 3. The host shell may invoke commands from more than one task
//!
//! There is still only one *logical* writer (the current user), so the
//! mutexes are about memory safety, not about contention.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use dokan_core::cart::{Cart, PreorderCart};

/// Managed regular-cart state.
///
/// Carries the mini-cart drawer's open/closed flag alongside the cart
/// itself; the flag is pure UI state and never affects business logic.
#[derive(Debug, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
    is_open: AtomicBool,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let subtotal = cart_state.with_cart(|cart| cart.subtotal());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.with_cart(Cart::is_empty)
    }

    /// Mini-cart drawer flag.
    pub fn is_open(&self) -> bool {
        self.is_open.load(Ordering::Relaxed)
    }

    /// Opens/closes the mini-cart drawer.
    pub fn set_open(&self, open: bool) {
        self.is_open.store(open, Ordering::Relaxed);
    }
}

/// Managed preorder-slot state.
#[derive(Debug, Default)]
pub struct PreorderState {
    slot: Arc<Mutex<PreorderCart>>,
}

impl PreorderState {
    /// Creates a new empty preorder state.
    pub fn new() -> Self {
        PreorderState::default()
    }

    /// Executes a function with read access to the slot.
    pub fn with_slot<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PreorderCart) -> R,
    {
        let slot = self.slot.lock().expect("Preorder mutex poisoned");
        f(&slot)
    }

    /// Executes a function with write access to the slot.
    pub fn with_slot_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut PreorderCart) -> R,
    {
        let mut slot = self.slot.lock().expect("Preorder mutex poisoned");
        f(&mut slot)
    }

    /// Whether the slot is empty.
    pub fn is_empty(&self) -> bool {
        self.with_slot(PreorderCart::is_empty)
    }
}
