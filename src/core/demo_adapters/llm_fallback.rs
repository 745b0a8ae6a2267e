//! A deterministic stand-in for an LLM-backed last-resort extractor: always
//! succeeds, always at low confidence.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;

use crate::core::adapter::{Adapter, AdapterError, ExtractOptions};
use crate::core::channel::{Channel, ConfidenceRange, Tier};
use crate::core::domain::{
    Freshness, HealthSnapshot, ListingWithProvenance, Marketplace, NormalizedListing,
    ProvenanceRecord, Seller,
};
use crate::core::health::HealthTracker;

const CONFIDENCE: f64 = 0.6;

pub struct LlmFallbackAdapter {
    marketplace: Marketplace,
    version: String,
    health: HealthTracker,
}

impl LlmFallbackAdapter {
    pub fn new(marketplace: Marketplace) -> Self {
        LlmFallbackAdapter {
            marketplace,
            version: "1.0.0".to_string(),
            health: HealthTracker::new(),
        }
    }
}

#[async_trait]
impl Adapter for LlmFallbackAdapter {
    fn channel(&self) -> Channel {
        Channel::LlmExtraction
    }

    fn tier(&self) -> Tier {
        crate::core::channel::tier_of(Channel::LlmExtraction)
    }

    fn confidence_range(&self) -> ConfidenceRange {
        crate::core::channel::default_confidence_range(Channel::LlmExtraction)
    }

    fn marketplace_id(&self) -> Marketplace {
        self.marketplace
    }

    fn name(&self) -> &str {
        "llm-fallback"
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn can_handle(&self, _input: &str) -> bool {
        // Last-resort channel: takes whatever nothing else could parse.
        true
    }

    async fn extract_with_provenance(
        &self,
        _content: &str,
        identifier: &str,
        _options: &ExtractOptions,
    ) -> Result<Option<ListingWithProvenance>, AdapterError> {
        let listing = NormalizedListing {
            id: identifier.to_string(),
            marketplace: self.marketplace,
            url: format!("https://example.invalid/listing/{identifier}"),
            title: format!("Unverified listing for {identifier}"),
            price: None,
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
            extraction_method: "llm_extraction".to_string(),
            confidence: CONFIDENCE,
            extractor_version: self.version.clone(),
        };

        let provenance = ProvenanceRecord {
            channel: Channel::LlmExtraction,
            tier: self.tier(),
            confidence: CONFIDENCE,
            freshness: Freshness::Historical,
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
