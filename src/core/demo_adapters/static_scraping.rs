//! A tiny stand-in for an HTML scraper: parses
//! `title=...;price=...;currency=...` out of the identifier string.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;

use crate::core::adapter::{Adapter, AdapterError, ExtractOptions};
use crate::core::channel::{Channel, ConfidenceRange, Tier};
use crate::core::domain::{
    Freshness, HealthSnapshot, ListingWithProvenance, Marketplace, Money, NormalizedListing,
    ProvenanceRecord, Seller,
};
use crate::core::health::HealthTracker;

const CONFIDENCE: f64 = 0.75;

pub struct StaticScrapingAdapter {
    marketplace: Marketplace,
    version: String,
    health: HealthTracker,
}

impl StaticScrapingAdapter {
    pub fn new(marketplace: Marketplace) -> Self {
        StaticScrapingAdapter {
            marketplace,
            version: "1.0.0".to_string(),
            health: HealthTracker::new(),
        }
    }
}

fn parse_fields(content: &str) -> BTreeMap<&str, &str> {
    content
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim()))
        .collect()
}

#[async_trait]
impl Adapter for StaticScrapingAdapter {
    fn channel(&self) -> Channel {
        Channel::Scraping
    }

    fn tier(&self) -> Tier {
        crate::core::channel::tier_of(Channel::Scraping)
    }

    fn confidence_range(&self) -> ConfidenceRange {
        crate::core::channel::default_confidence_range(Channel::Scraping)
    }

    fn marketplace_id(&self) -> Marketplace {
        self.marketplace
    }

    fn name(&self) -> &str {
        "static-scraping"
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn can_handle(&self, input: &str) -> bool {
        input.contains("title=")
    }

    async fn extract_with_provenance(
        &self,
        content: &str,
        identifier: &str,
        _options: &ExtractOptions,
    ) -> Result<Option<ListingWithProvenance>, AdapterError> {
        let fields = parse_fields(content);

        let title = match fields.get("title") {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                self.health.record(false);
                return Err(AdapterError::Parse("missing title field".to_string()));
            }
        };

        let price = match (fields.get("price"), fields.get("currency")) {
            (Some(amount), Some(currency)) => {
                let parsed = match amount.parse() {
                    Ok(p) => p,
                    Err(_) => {
                        self.health.record(false);
                        return Err(AdapterError::Parse(format!("invalid price amount: {amount}")));
                    }
                };
                match Money::new(parsed, *currency) {
                    Ok(money) => Some(money),
                    Err(e) => {
                        self.health.record(false);
                        return Err(AdapterError::Parse(e.to_string()));
                    }
                }
            }
            _ => None,
        };

        let listing = NormalizedListing {
            id: identifier.to_string(),
            marketplace: self.marketplace,
            url: format!("https://example.invalid/listing/{identifier}"),
            title,
            price,
            shipping_cost: None,
            original_price: None,
            condition: Default::default(),
            availability: Default::default(),
            sold_date: None,
            quantity_available: None,
            seller: Seller::default(),
            images: Vec::new(),
            item_number: None,
            category: Vec::new(),
            attributes: BTreeMap::new(),
            extracted_at: Utc::now(),
            extraction_method: "scraping".to_string(),
            confidence: CONFIDENCE,
            extractor_version: self.version.clone(),
        };

        let provenance = ProvenanceRecord {
            channel: Channel::Scraping,
            tier: self.tier(),
            confidence: CONFIDENCE,
            freshness: Freshness::Recent,
            source_id: format!("{}@{}", self.name(), self.version),
            extracted_at: Utc::now(),
            raw_data_hash: None,
            user_consented: true,
            terms_compliant: true,
            metadata: BTreeMap::new(),
        };

        self.health.record(true);
        Ok(Some(ListingWithProvenance {
            listing,
            provenance,
            correlated_sources: None,
            conflicting_data: None,
        }))
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn get_health(&self) -> HealthSnapshot {
        self.health.snapshot(true, self.confidence_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_title_price_and_currency() {
        let adapter = StaticScrapingAdapter::new(Marketplace::Ebay);
        let content = "title=Vintage Lamp;price=45.00;currency=USD";
        let options = ExtractOptions {
            deadline: std::time::Duration::from_secs(1),
        };
        let result = adapter
            .extract_with_provenance(content, "item-1", &options)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.listing.title, "Vintage Lamp");
        assert_eq!(result.listing.price.unwrap().currency, "USD");
        assert_eq!(result.provenance.channel, Channel::Scraping);
    }

    #[tokio::test]
    async fn missing_title_is_a_parse_error() {
        let adapter = StaticScrapingAdapter::new(Marketplace::Ebay);
        let options = ExtractOptions {
            deadline: std::time::Duration::from_secs(1),
        };
        let result = adapter
            .extract_with_provenance("price=1;currency=USD", "item-1", &options)
            .await;
        assert!(matches!(result, Err(AdapterError::Parse(_))));
    }

    #[tokio::test]
    async fn invalid_price_amount_is_recorded_as_a_health_failure() {
        let adapter = StaticScrapingAdapter::new(Marketplace::Ebay);
        let options = ExtractOptions {
            deadline: std::time::Duration::from_secs(1),
        };
        let result = adapter
            .extract_with_provenance("title=Lamp;price=not-a-number;currency=USD", "item-1", &options)
            .await;
        assert!(matches!(result, Err(AdapterError::Parse(_))));
        assert_eq!(adapter.get_health().await.recent_failure_rate, 1.0);
    }
}
