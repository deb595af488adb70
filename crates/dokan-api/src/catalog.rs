//! # Catalog & Business DTOs
//!
//! Product payloads deserialize straight into `dokan_core::types` (those
//! types already absorb the backend's loose numerics). What lives here is
//! the business-profile document: delivery-fee tiers, courier mode and
//! the wallet promo, plus the translation into core config types.

use serde::{Deserialize, Serialize};

use dokan_core::checkout::{CourierMode, DeliveryFees};
use dokan_core::money::Taka;
use dokan_core::types::coerce;

/// The business configuration document served by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Shop display name.
    #[serde(default)]
    pub name: String,

    /// Flat fee for inside-Dhaka delivery.
    #[serde(deserialize_with = "coerce::taka", default)]
    pub inside_dhaka_delivery_charge: Taka,

    /// Flat fee for the Dhaka suburbs.
    #[serde(deserialize_with = "coerce::taka", default)]
    pub sub_dhaka_delivery_charge: Taka,

    /// Flat fee for the rest of the country.
    #[serde(deserialize_with = "coerce::taka", default)]
    pub outside_dhaka_delivery_charge: Taka,

    /// Courier name, or `null`/"office-delivery" when customers collect
    /// from the office (which zeroes every delivery fee).
    #[serde(default)]
    pub courier: Option<String>,

    /// Display name of the online payment gateway, when one is wired up.
    #[serde(default)]
    pub payment_gateway: Option<String>,

    /// Fixed promotional discount applied when the buyer pays with the
    /// bKash wallet. Zero disables the promo.
    #[serde(deserialize_with = "coerce::taka", default)]
    pub bkash_discount_amount: Taka,
}

impl BusinessProfile {
    /// The fee table in core terms.
    pub fn delivery_fees(&self) -> DeliveryFees {
        DeliveryFees {
            inside_dhaka: self.inside_dhaka_delivery_charge,
            sub_dhaka: self.sub_dhaka_delivery_charge,
            outside_dhaka: self.outside_dhaka_delivery_charge,
        }
    }

    /// Courier mode: a missing courier or the explicit office-delivery
    /// marker means no courier runs and all fees are zero.
    pub fn courier_mode(&self) -> CourierMode {
        match self.courier.as_deref() {
            None | Some("") | Some("office-delivery") => CourierMode::OfficePickup,
            Some(_) => CourierMode::Courier,
        }
    }
}
