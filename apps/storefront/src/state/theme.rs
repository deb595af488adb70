//! # Theme State
//!
//! The light/dark theme choice. Persisted via the snapshot whitelist so
//! the shop doesn't flash back to light mode on every reload.

use std::sync::{Arc, Mutex};

/// Managed theme state. An empty string means "follow the system".
#[derive(Debug, Default)]
pub struct ThemeState {
    theme: Arc<Mutex<String>>,
}

impl ThemeState {
    pub fn new() -> Self {
        ThemeState::default()
    }

    pub fn get(&self) -> String {
        self.theme.lock().expect("Theme mutex poisoned").clone()
    }

    pub fn set(&self, theme: String) {
        *self.theme.lock().expect("Theme mutex poisoned") = theme;
    }
}
