//! # Catalog Browsing
//!
//! Predicate filters, sorting and pagination over an in-memory product
//! slice, plus the flash-deals pick. Deliberately NOT an index: the
//! storefront works on one fetched page of catalog data at a time, and a
//! linear scan over a few hundred products is nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Taka;
use crate::pricing::resolve_product_price;
use crate::types::Product;

// =============================================================================
// Filtering
// =============================================================================

/// Browse filters, all optional and AND-combined.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    /// Case-insensitive substring match on the product name.
    pub query: Option<String>,
    /// Keep only products referencing this category id.
    pub category: Option<String>,
    /// Inclusive lower bound on the effective price.
    pub min_price: Option<Taka>,
    /// Inclusive upper bound on the effective price.
    pub max_price: Option<Taka>,
    /// Drop products with nothing purchasable.
    #[serde(default)]
    pub in_stock_only: bool,
}

/// Applies the filter; price bounds compare against the resolved
/// effective price (what the buyer would actually pay at `now`).
pub fn filter_products<'a>(
    products: &'a [Product],
    filter: &CatalogFilter,
    now: DateTime<Utc>,
) -> Vec<&'a Product> {
    let needle = filter
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    products
        .iter()
        .filter(|p| {
            if let Some(q) = &needle {
                if !p.name.to_lowercase().contains(q) {
                    return false;
                }
            }
            if let Some(cat) = &filter.category {
                if !p.categories.iter().any(|c| c == cat) {
                    return false;
                }
            }
            if filter.in_stock_only && !p.in_stock() {
                return false;
            }
            if filter.min_price.is_some() || filter.max_price.is_some() {
                let effective = resolve_product_price(p, None, now).effective_price;
                if let Some(min) = filter.min_price {
                    if effective < min {
                        return false;
                    }
                }
                if let Some(max) = filter.max_price {
                    if effective > max {
                        return false;
                    }
                }
            }
            true
        })
        .collect()
}

// =============================================================================
// Sorting
// =============================================================================

/// Browse sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    /// Biggest active saving first (flash-deal ordering).
    DiscountDesc,
    /// Most recently added to the catalog first.
    Newest,
}

/// Sorts in place. Ties keep their relative order (stable sort), so a
/// category page doesn't reshuffle on every render.
pub fn sort_products(products: &mut [&Product], order: SortOrder, now: DateTime<Utc>) {
    match order {
        SortOrder::PriceAsc => products
            .sort_by_key(|p| resolve_product_price(p, None, now).effective_price),
        SortOrder::PriceDesc => products
            .sort_by_key(|p| std::cmp::Reverse(resolve_product_price(p, None, now).effective_price)),
        SortOrder::DiscountDesc => products
            .sort_by_key(|p| std::cmp::Reverse(resolve_product_price(p, None, now).discount_percent)),
        SortOrder::Newest => {
            products.sort_by_key(|p| std::cmp::Reverse(p.created_at.unwrap_or_default()))
        }
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of results plus enough metadata to render a pager.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served (out-of-range requests clamp
    /// to the last page).
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slices a page out of the full result list.
///
/// `page` is 1-based; `per_page` of 0 is treated as 1. Requests past the
/// end serve the last page rather than an empty one.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let slice = items
        .get(start..(start + per_page).min(total_items))
        .unwrap_or(&[]);

    Page {
        items: slice.to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}

// =============================================================================
// Flash Deals
// =============================================================================

/// Products whose discount window is open right now, biggest saving
/// first - the home-page flash-deals strip.
pub fn flash_deals<'a>(products: &'a [Product], now: DateTime<Utc>) -> Vec<&'a Product> {
    let mut deals: Vec<&Product> = products
        .iter()
        .filter(|p| resolve_product_price(p, None, now).is_within_offer)
        .collect();
    sort_products(&mut deals, SortOrder::DiscountDesc, now);
    deals
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn product(id: &str, name: &str, price: i64, stock: i64) -> Product {
        serde_json::from_str(&format!(
            r#"{{"_id":"{id}","name":"{name}","selling_price":{price},"stock":{stock}}}"#
        ))
        .unwrap()
    }

    fn discounted(id: &str, selling: i64, offer: i64) -> Product {
        serde_json::from_str(&format!(
            r#"{{"_id":"{id}","name":"Deal {id}","selling_price":{selling},
                "offer_price":{offer},
                "discount_start_date":"{}","discount_end_date":"{}","stock":5}}"#,
            (now() - Duration::days(1)).to_rfc3339(),
            (now() + Duration::days(1)).to_rfc3339(),
        ))
        .unwrap()
    }

    #[test]
    fn test_query_filter_case_insensitive() {
        let products = vec![
            product("p1", "Cotton Panjabi", 900, 5),
            product("p2", "Denim Jacket", 1800, 5),
        ];
        let filter = CatalogFilter {
            query: Some("panjabi".to_string()),
            ..Default::default()
        };
        let hits = filter_products(&products, &filter, now());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");
    }

    #[test]
    fn test_price_range_uses_effective_price() {
        // Selling 1000 but active offer 400: a max_price of 500 keeps it
        let products = vec![discounted("p1", 1000, 400), product("p2", "Plain", 600, 5)];
        let filter = CatalogFilter {
            max_price: Some(Taka::new(500)),
            ..Default::default()
        };
        let hits = filter_products(&products, &filter, now());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");
    }

    #[test]
    fn test_in_stock_only() {
        let products = vec![product("p1", "A", 100, 0), product("p2", "B", 100, 2)];
        let filter = CatalogFilter {
            in_stock_only: true,
            ..Default::default()
        };
        let hits = filter_products(&products, &filter, now());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p2");
    }

    #[test]
    fn test_sort_price_asc() {
        let products = vec![
            product("p1", "A", 900, 5),
            product("p2", "B", 100, 5),
            product("p3", "C", 500, 5),
        ];
        let mut refs: Vec<&Product> = products.iter().collect();
        sort_products(&mut refs, SortOrder::PriceAsc, now());
        let ids: Vec<&str> = refs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p2", "p3", "p1"]);
    }

    #[test]
    fn test_paginate_clamps_and_counts() {
        let items: Vec<i32> = (1..=7).collect();

        let page = paginate(&items, 2, 3);
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total_pages, 3);

        // Past the end: serve the last page
        let page = paginate(&items, 99, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.items, vec![7]);

        // Empty list still reports one (empty) page
        let empty: Vec<i32> = vec![];
        let page = paginate(&empty, 1, 3);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_flash_deals_only_active_windows() {
        let products = vec![
            discounted("p1", 1000, 800), // 20%
            discounted("p2", 1000, 500), // 50%
            product("p3", "No deal", 700, 5),
        ];
        let deals = flash_deals(&products, now());
        let ids: Vec<&str> = deals.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1"]);
    }
}
