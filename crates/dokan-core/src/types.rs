//! # Domain Types
//!
//! Core catalog and checkout types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Variant     │   │  CheckoutForm   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  name           │       │
//! │  │  selling_price  │   │  selling_price  │   │  phone          │       │
//! │  │  offer_price?   │   │  offer_price?   │   │  address        │       │
//! │  │  discount dates │   │  discount dates │   │  delivery_area  │       │
//! │  │  stock          │   │  stock          │   │  note?          │       │
//! │  │  variants[]     │   │  variant_values │   │  payment_method │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │  DeliveryArea   │  inside_dhaka | sub_dhaka | outside_dhaka         │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Upstream Tolerance
//! The catalog API is loose about numeric fields: prices arrive as numbers
//! or digit strings, stock is sometimes null. Every such field deserializes
//! through [`coerce`], which defaults malformed values to 0 instead of
//! failing the whole payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Taka;

// =============================================================================
// Tolerant Field Coercion
// =============================================================================

/// Deserializers that coerce sloppy upstream values instead of erroring.
///
/// The catalog backend serves prices as `1000`, `"1000"`, `1000.0` or
/// `null` depending on how the record was entered. Rejecting a whole
/// product page over one malformed field is worse than showing ৳0, so
/// these helpers absorb the mess at the boundary.
pub mod coerce {
    use super::Taka;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    /// Anything the backend might put where a number belongs.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Int(i64),
        Float(f64),
        Text(String),
        Null(Option<()>),
    }

    impl Loose {
        fn into_i64(self) -> i64 {
            match self {
                Loose::Int(n) => n,
                Loose::Float(f) if f.is_finite() => f.round() as i64,
                Loose::Float(_) => 0,
                Loose::Text(s) => s.trim().parse::<f64>().map_or(0, |f| f.round() as i64),
                Loose::Null(_) => 0,
            }
        }
    }

    /// Coerces a required money field; malformed input becomes ৳0.
    pub fn taka<'de, D: Deserializer<'de>>(de: D) -> Result<Taka, D::Error> {
        Ok(Taka::new(Loose::deserialize(de)?.into_i64()))
    }

    /// Coerces an optional money field; `null`/absent stays `None`,
    /// malformed text becomes ৳0 rather than an error.
    pub fn taka_opt<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Taka>, D::Error> {
        let loose = Option::<Loose>::deserialize(de)?;
        Ok(match loose {
            None | Some(Loose::Null(_)) => None,
            Some(v) => Some(Taka::new(v.into_i64())),
        })
    }

    /// Coerces a stock count; malformed or null input becomes 0.
    pub fn stock<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
        Ok(Loose::deserialize(de)?.into_i64().max(0))
    }

    /// Parses an optional RFC 3339 timestamp; unparseable or non-string
    /// input becomes `None` (an unset window is simply never active).
    pub fn datetime_opt<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = serde_json::Value::deserialize(de)?;
        Ok(raw
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }
}

// =============================================================================
// Price Fields
// =============================================================================

/// The raw price inputs the pricing resolver works on.
///
/// Both [`Product`] and [`Variant`] expose their own copy via
/// `price_fields()`; the resolver never cares which one it got.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceFields {
    /// Regular selling price.
    pub selling_price: Taka,
    /// Discounted price; only meaningful while the discount window is open.
    pub offer_price: Option<Taka>,
    /// Discount window start. Unset means the window never opens.
    #[ts(as = "Option<String>")]
    pub discount_start_date: Option<DateTime<Utc>>,
    /// Discount window end. Unset means the window never opens.
    #[ts(as = "Option<String>")]
    pub discount_end_date: Option<DateTime<Utc>>,
}

// =============================================================================
// Variant
// =============================================================================

/// A purchasable configuration of a product (e.g. a size).
///
/// Variants are immutable catalog snapshots: fetched from the API, never
/// mutated client-side. Each carries its own price, discount window,
/// stock count and preorder flag.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Variant {
    /// Unique identifier.
    #[serde(rename = "_id")]
    pub id: String,

    /// Variant's own selling price.
    #[serde(deserialize_with = "coerce::taka", default)]
    pub selling_price: Taka,

    /// Variant's own offer price, if any.
    #[serde(deserialize_with = "coerce::taka_opt", default)]
    pub offer_price: Option<Taka>,

    /// Discount window start.
    #[serde(deserialize_with = "coerce::datetime_opt", default)]
    #[ts(as = "Option<String>")]
    pub discount_start_date: Option<DateTime<Utc>>,

    /// Discount window end.
    #[serde(deserialize_with = "coerce::datetime_opt", default)]
    #[ts(as = "Option<String>")]
    pub discount_end_date: Option<DateTime<Utc>>,

    /// Remaining stock for this variant.
    #[serde(deserialize_with = "coerce::stock", default)]
    pub stock: i64,

    /// Whether this variant is sold as a preorder.
    #[serde(default)]
    pub is_preorder: bool,

    /// Human-readable option labels, in display order (e.g. ["XL", "Red"]).
    #[serde(default)]
    pub variants_values: Vec<String>,

    /// Variant-specific image, if different from the product's.
    #[serde(default)]
    pub image: Option<String>,
}

impl Variant {
    /// Returns this variant's price inputs for the resolver.
    pub fn price_fields(&self) -> PriceFields {
        PriceFields {
            selling_price: self.selling_price,
            offer_price: self.offer_price,
            discount_start_date: self.discount_start_date,
            discount_end_date: self.discount_end_date,
        }
    }

    /// Whether any stock remains.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// ## Variant Invariant
/// When `has_variants` is true, price and stock MUST be read from a
/// variant (the selected one, or the display fallback), never from the
/// product's own base fields. The pricing resolver enforces this.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name.
    pub name: String,

    /// URL slug.
    #[serde(default)]
    pub slug: String,

    /// Base selling price (only authoritative when `has_variants` is false).
    #[serde(deserialize_with = "coerce::taka", default)]
    pub selling_price: Taka,

    /// Base offer price.
    #[serde(deserialize_with = "coerce::taka_opt", default)]
    pub offer_price: Option<Taka>,

    /// Discount window start.
    #[serde(deserialize_with = "coerce::datetime_opt", default)]
    #[ts(as = "Option<String>")]
    pub discount_start_date: Option<DateTime<Utc>>,

    /// Discount window end.
    #[serde(deserialize_with = "coerce::datetime_opt", default)]
    #[ts(as = "Option<String>")]
    pub discount_end_date: Option<DateTime<Utc>>,

    /// Base stock count (only authoritative when `has_variants` is false).
    #[serde(deserialize_with = "coerce::stock", default)]
    pub stock: i64,

    /// Whether pricing/stock live on the variants instead of the product.
    #[serde(rename = "hasVariants", default)]
    pub has_variants: bool,

    /// Ordered variant list; empty unless `has_variants`.
    #[serde(default)]
    pub variants: Vec<Variant>,

    /// Whether the product is sold as a preorder.
    #[serde(default)]
    pub is_preorder: bool,

    /// Category ids this product belongs to.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Image references, first entry is the primary image.
    #[serde(default)]
    pub images: Vec<String>,

    /// When the product entered the catalog (used by "newest" sorting).
    #[serde(deserialize_with = "coerce::datetime_opt", default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns the product's own price inputs.
    ///
    /// Callers holding a product with variants should go through
    /// [`crate::pricing::resolve_product_price`] instead, which picks the
    /// right variant first.
    pub fn price_fields(&self) -> PriceFields {
        PriceFields {
            selling_price: self.selling_price,
            offer_price: self.offer_price,
            discount_start_date: self.discount_start_date,
            discount_end_date: self.discount_end_date,
        }
    }

    /// The variant shown when the user has not picked one yet:
    /// first variant with stock, else the first variant.
    pub fn fallback_variant(&self) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|v| v.in_stock())
            .or_else(|| self.variants.first())
    }

    /// Finds a variant by id.
    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Primary image reference, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether anything is purchasable right now.
    pub fn in_stock(&self) -> bool {
        if self.has_variants {
            self.variants.iter().any(Variant::in_stock)
        } else {
            self.stock > 0
        }
    }
}

// =============================================================================
// Delivery Area
// =============================================================================

/// Shipping-zone tier; each maps to a configured flat delivery fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryArea {
    /// Inside Dhaka city.
    InsideDhaka,
    /// Dhaka suburbs.
    SubDhaka,
    /// Everywhere else.
    OutsideDhaka,
}

impl DeliveryArea {
    /// The wire value used by the order API and the checkout form.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryArea::InsideDhaka => "inside_dhaka",
            DeliveryArea::SubDhaka => "sub_dhaka",
            DeliveryArea::OutsideDhaka => "outside_dhaka",
        }
    }

    /// Parses the wire value; anything unrecognized is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "inside_dhaka" => Some(DeliveryArea::InsideDhaka),
            "sub_dhaka" => Some(DeliveryArea::SubDhaka),
            "outside_dhaka" => Some(DeliveryArea::OutsideDhaka),
            _ => None,
        }
    }
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Delivery-information form state.
///
/// Mutated only by form input handlers; survives page reloads via the
/// persisted store whitelist and is never reset automatically.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    /// Customer name.
    #[serde(default)]
    pub name: String,

    /// Customer mobile number, local `01XXXXXXXXX` format.
    #[serde(default)]
    pub phone: String,

    /// Delivery address.
    #[serde(default)]
    pub address: String,

    /// Selected shipping-zone tier; `None` until the user picks one.
    #[serde(default)]
    pub delivery_area: Option<DeliveryArea>,

    /// Optional order note.
    #[serde(default)]
    pub note: String,

    /// Raw payment selection from the UI ("cashOnDelivery", "bKash",
    /// "Pay Now", a gateway name, ...). Mapped to a backend code at
    /// submission time.
    #[serde(default)]
    pub payment_method: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
