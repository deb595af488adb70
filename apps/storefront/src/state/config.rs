//! # Business Configuration State
//!
//! Stores the business-level settings checkout depends on.
//!
//! ## Configuration Sources (Priority Order)
//! 1. The fetched business profile (`apply_profile`, wins once loaded)
//! 2. Environment variables (`DOKAN_*`)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Read-mostly after startup; the one mutation point is applying a
//! freshly fetched business profile, which the embedding shell does from
//! its init path before commands start flying.

use serde::{Deserialize, Serialize};

use dokan_api::BusinessProfile;
use dokan_core::checkout::{CourierMode, DeliveryFees};
use dokan_core::money::Taka;

/// Business configuration.
///
/// ## Fields
/// Most fields have sensible defaults for development.
/// Production deployments get theirs from the business profile endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessConfig {
    /// Shop name (status page, notifications).
    pub shop_name: String,

    /// Base URL of the backend API.
    pub api_base_url: String,

    /// Flat delivery fee per shipping-zone tier.
    pub delivery_fees: DeliveryFees,

    /// Courier vs office pickup (office pickup zeroes every fee).
    pub courier_mode: CourierMode,

    /// Fixed promotional discount for paying with the bKash wallet.
    /// Zero disables the promo.
    pub bkash_discount: Taka,

    /// Storefront path of the client-side order-status page.
    pub status_page_path: String,

    /// Attribution value sent as `customer_source` on every order.
    pub customer_source: String,
}

impl Default for BusinessConfig {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        BusinessConfig {
            shop_name: "Dokan Dev Shop".to_string(),
            api_base_url: "http://localhost:5000".to_string(),
            delivery_fees: DeliveryFees::default(),
            courier_mode: CourierMode::Courier,
            bkash_discount: Taka::zero(),
            status_page_path: "/order-status".to_string(),
            customer_source: "website".to_string(),
        }
    }
}

impl BusinessConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `DOKAN_API_URL`: Override the backend base URL
    /// - `DOKAN_SHOP_NAME`: Override the shop name
    /// - `DOKAN_BKASH_DISCOUNT`: Override the wallet promo amount
    pub fn from_env() -> Self {
        let mut config = BusinessConfig::default();

        if let Ok(url) = std::env::var("DOKAN_API_URL") {
            config.api_base_url = url;
        }

        if let Ok(name) = std::env::var("DOKAN_SHOP_NAME") {
            config.shop_name = name;
        }

        if let Ok(amount) = std::env::var("DOKAN_BKASH_DISCOUNT") {
            if let Ok(amount) = amount.parse::<i64>() {
                config.bkash_discount = Taka::new(amount);
            }
        }

        config
    }

    /// Overwrites the business-controlled settings from a fetched
    /// profile. URL and paths are deployment concerns and stay put.
    pub fn apply_profile(&mut self, profile: &BusinessProfile) {
        if !profile.name.trim().is_empty() {
            self.shop_name = profile.name.clone();
        }
        self.delivery_fees = profile.delivery_fees();
        self.courier_mode = profile.courier_mode();
        self.bkash_discount = profile.bkash_discount_amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_profile_overwrites_business_settings() {
        let mut config = BusinessConfig::default();
        let profile: BusinessProfile = serde_json::from_str(
            r#"{"name":"Rahim's Dokan",
                "inside_dhaka_delivery_charge":80,
                "sub_dhaka_delivery_charge":110,
                "outside_dhaka_delivery_charge":150,
                "courier":null,
                "bkash_discount_amount":100}"#,
        )
        .unwrap();

        config.apply_profile(&profile);

        assert_eq!(config.shop_name, "Rahim's Dokan");
        assert_eq!(config.delivery_fees.inside_dhaka, Taka::new(80));
        assert_eq!(config.courier_mode, CourierMode::OfficePickup);
        assert_eq!(config.bkash_discount, Taka::new(100));
        // Deployment-level settings untouched
        assert_eq!(config.api_base_url, "http://localhost:5000");
    }
}
