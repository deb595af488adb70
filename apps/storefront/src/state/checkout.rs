//! # Checkout Form State
//!
//! The delivery-info form lives in the store (not in component state) so
//! it survives navigation between pages and - via the snapshot whitelist
//! - page reloads. It is never reset automatically; only explicit user
//! edits mutate it.

use std::sync::{Arc, Mutex};

use dokan_core::types::{CheckoutForm, DeliveryArea};

/// A partial form edit; `None` fields are left untouched.
///
/// Mirrors how the UI wires input handlers: each control patches just
/// its own field.
#[derive(Debug, Clone, Default)]
pub struct FormPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub delivery_area: Option<Option<DeliveryArea>>,
    pub note: Option<String>,
}

/// Managed checkout-form state.
#[derive(Debug, Default)]
pub struct CheckoutFormState {
    form: Arc<Mutex<CheckoutForm>>,
}

impl CheckoutFormState {
    pub fn new() -> Self {
        CheckoutFormState::default()
    }

    /// Executes a function with read access to the form.
    pub fn with_form<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CheckoutForm) -> R,
    {
        let form = self.form.lock().expect("Checkout form mutex poisoned");
        f(&form)
    }

    /// Executes a function with write access to the form.
    pub fn with_form_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CheckoutForm) -> R,
    {
        let mut form = self.form.lock().expect("Checkout form mutex poisoned");
        f(&mut form)
    }

    /// Applies a partial edit.
    pub fn apply(&self, patch: FormPatch) {
        self.with_form_mut(|form| {
            if let Some(name) = patch.name {
                form.name = name;
            }
            if let Some(phone) = patch.phone {
                form.phone = phone;
            }
            if let Some(address) = patch.address {
                form.address = address;
            }
            if let Some(area) = patch.delivery_area {
                form.delivery_area = area;
            }
            if let Some(note) = patch.note {
                form.note = note;
            }
        });
    }

    /// A copy of the current form (for validation and payload building).
    pub fn snapshot(&self) -> CheckoutForm {
        self.with_form(Clone::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_touches_only_named_fields() {
        let state = CheckoutFormState::new();
        state.apply(FormPatch {
            name: Some("Rahim".to_string()),
            ..Default::default()
        });
        state.apply(FormPatch {
            phone: Some("01712345678".to_string()),
            ..Default::default()
        });

        let form = state.snapshot();
        assert_eq!(form.name, "Rahim");
        assert_eq!(form.phone, "01712345678");
        assert_eq!(form.address, "");
    }

    #[test]
    fn test_area_can_be_cleared() {
        let state = CheckoutFormState::new();
        state.apply(FormPatch {
            delivery_area: Some(Some(DeliveryArea::SubDhaka)),
            ..Default::default()
        });
        assert_eq!(state.snapshot().delivery_area, Some(DeliveryArea::SubDhaka));

        state.apply(FormPatch {
            delivery_area: Some(None),
            ..Default::default()
        });
        assert_eq!(state.snapshot().delivery_area, None);
    }
}
