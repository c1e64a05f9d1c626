//! Catalog item data structures

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single second-hand listing returned by a catalog search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique identifier on the marketplace
    pub id: u64,

    /// Listing title
    pub title: String,

    /// Asking price in the listing's currency
    pub price: Decimal,

    /// ISO currency code (e.g., "EUR")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Brand name as shown in the listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Size label (e.g., "M", "40")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// URL of the listing on the marketplace website
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// URL of the primary listing photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    /// Number of users that favourited the listing
    #[serde(default)]
    pub favourite_count: u32,
}
