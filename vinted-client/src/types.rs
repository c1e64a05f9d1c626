//! Catalog search API response types
//!
//! These types mirror the catalog search endpoint's JSON payload and are
//! converted to `vinted-core` types for use by callers. The payload drifts
//! between domains and releases, so everything non-essential is defaulted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vinted_core::CatalogItem;

/// Top-level search response envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Matching listings
    #[serde(default)]
    pub items: Vec<ApiItem>,

    /// Pagination metadata
    #[serde(default)]
    pub pagination: Option<ApiPagination>,
}

/// A listing as returned by the search API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiItem {
    /// Unique identifier
    pub id: u64,

    /// Listing title
    #[serde(default)]
    pub title: String,

    /// Asking price
    #[serde(default)]
    pub price: Option<ApiPrice>,

    /// Brand name
    #[serde(default)]
    pub brand_title: Option<String>,

    /// Size label
    #[serde(default)]
    pub size_title: Option<String>,

    /// Listing URL on the marketplace website
    #[serde(default)]
    pub url: Option<String>,

    /// Primary photo
    #[serde(default)]
    pub photo: Option<ApiPhoto>,

    /// Favourite count
    #[serde(default)]
    pub favourite_count: Option<u32>,
}

/// Price with its ISO currency code
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiPrice {
    /// Amount, serialized by the API as a decimal string
    pub amount: Decimal,

    /// ISO currency code (e.g., "EUR")
    #[serde(default)]
    pub currency_code: Option<String>,
}

/// Listing photo
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiPhoto {
    /// Thumbnail URL
    #[serde(default)]
    pub url: Option<String>,

    /// Full-resolution URL
    #[serde(default)]
    pub full_size_url: Option<String>,
}

/// Pagination metadata
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiPagination {
    #[serde(default)]
    pub current_page: u32,

    #[serde(default)]
    pub total_pages: u32,

    #[serde(default)]
    pub total_entries: u64,

    #[serde(default)]
    pub per_page: u32,
}

impl ApiItem {
    /// Convert to the unified catalog item model
    pub fn to_catalog_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            title: self.title.clone(),
            price: self
                .price
                .as_ref()
                .map(|p| p.amount)
                .unwrap_or_default(),
            currency: self.price.as_ref().and_then(|p| p.currency_code.clone()),
            brand: self.brand_title.clone(),
            size: self.size_title.clone(),
            url: self.url.clone(),
            photo_url: self
                .photo
                .as_ref()
                .and_then(|p| p.full_size_url.clone().or_else(|| p.url.clone())),
            favourite_count: self.favourite_count.unwrap_or_default(),
        }
    }
}
