//! The normalized listing: the common shape every adapter extracts into.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;

use super::marketplace::Marketplace;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    UsedLikeNew,
    UsedVeryGood,
    UsedGood,
    UsedAcceptable,
    Refurbished,
    Unknown,
}

impl Default for Condition {
    fn default() -> Self {
        Condition::Unknown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    Sold,
    OutOfStock,
    Unavailable,
    Unknown,
}

impl Default for Availability {
    fn default() -> Self {
        Availability::Unknown
    }
}

/// Seller metadata; all fields beyond presence are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: Option<String>,
    pub name: Option<String>,
    /// 0-100.
    pub rating: Option<u8>,
    pub review_count: Option<u64>,
    #[serde(default)]
    pub verified: bool,
}

/// A marketplace listing normalized to a common schema. The data
/// model. `id`, `marketplace`, `url`, `title`, `extracted_at`, `confidence`,
/// and `extractor_version` are always populated by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedListing {
    pub id: String,
    pub marketplace: Marketplace,
    pub url: String,
    pub title: String,
    pub price: Option<Money>,
    pub shipping_cost: Option<Money>,
    pub original_price: Option<Money>,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub availability: Availability,
    pub sold_date: Option<NaiveDate>,
    pub quantity_available: Option<u64>,
    #[serde(default)]
    pub seller: Seller,
    #[serde(default)]
    pub images: Vec<String>,
    pub item_number: Option<String>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, Json>,
    pub extracted_at: DateTime<Utc>,
    pub extraction_method: String,
    pub confidence: f64,
    pub extractor_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn ok() -> Self {
        ValidationResult {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Baseline invariant checks shared by every adapter's default `validate`
/// implementation. Adapters may layer additional
/// marketplace-specific checks on top via their own `validate` override.
pub fn validate(listing: &NormalizedListing) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if listing.id.trim().is_empty() {
        result.errors.push("id must not be empty".to_string());
    }
    if listing.url.trim().is_empty() {
        result.errors.push("url must not be empty".to_string());
    }
    if listing.title.trim().is_empty() {
        result.errors.push("title must not be empty".to_string());
    }
    if listing.extractor_version.trim().is_empty() {
        result
            .errors
            .push("extractor_version must not be empty".to_string());
    }
    if !(0.0..=1.0).contains(&listing.confidence) {
        result.errors.push(format!(
            "confidence must be in [0, 1], got {}",
            listing.confidence
        ));
    }
    if let Some(price) = &listing.price {
        if price.amount.is_sign_negative() {
            result
                .errors
                .push("price.amount must be non-negative".to_string());
        }
        if price.currency.len() != 3 {
            result
                .errors
                .push("price.currency must be a 3-letter code".to_string());
        }
    }
    if listing.images.is_empty() {
        result
            .warnings
            .push("listing has no images".to_string());
    }

    result.valid = result.errors.is_empty();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_listing() -> NormalizedListing {
        NormalizedListing {
            id: "item-1".to_string(),
            marketplace: Marketplace::Ebay,
            url: "https://ebay.com/itm/1".to_string(),
            title: "Vintage Lamp".to_string(),
            price: Some(Money::new(dec!(45.00), "USD").unwrap()),
            shipping_cost: None,
            original_price: None,
            condition: Condition::UsedGood,
            availability: Availability::InStock,
            sold_date: None,
            quantity_available: Some(1),
            seller: Seller::default(),
            images: vec!["https://ebay.com/img/1.jpg".to_string()],
            item_number: None,
            category: vec![],
            attributes: BTreeMap::new(),
            extracted_at: Utc::now(),
            extraction_method: "scraping".to_string(),
            confidence: 0.8,
            extractor_version: "1.0.0".to_string(),
        }
    }

    #[test]
    fn valid_listing_passes() {
        let result = validate(&base_listing());
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn empty_title_is_an_error() {
        let mut listing = base_listing();
        listing.title = "".to_string();
        let result = validate(&listing);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("title")));
    }

    #[test]
    fn confidence_out_of_range_is_an_error() {
        let mut listing = base_listing();
        listing.confidence = 1.5;
        assert!(!validate(&listing).valid);
    }

    #[test]
    fn missing_images_is_only_a_warning() {
        let mut listing = base_listing();
        listing.images.clear();
        let result = validate(&listing);
        assert!(result.valid);
        assert!(!result.warnings.is_empty());
    }
}
