//! A tiny stand-in for a marketplace's bulk data-export feature: parses one
//! `title,price,currency` header+row CSV line.

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

const CONFIDENCE: f64 = 0.88;

pub struct CsvExportAdapter {
    marketplace: Marketplace,
    version: String,
    health: HealthTracker,
}

impl CsvExportAdapter {
    pub fn new(marketplace: Marketplace) -> Self {
        CsvExportAdapter {
            marketplace,
            version: "1.0.0".to_string(),
            health: HealthTracker::new(),
        }
    }
}

fn parse_row<'a>(content: &'a str) -> Result<(Vec<&'a str>, Vec<&'a str>), AdapterError> {
    let mut lines = content.lines();
    let header = lines
        .next()
        .ok_or_else(|| AdapterError::Parse("empty content".to_string()))?;
    let row = lines
        .next()
        .ok_or_else(|| AdapterError::Parse("missing data row".to_string()))?;
    Ok((
        header.split(',').map(str::trim).collect(),
        row.split(',').map(str::trim).collect(),
    ))
}

#[async_trait]
impl Adapter for CsvExportAdapter {
    fn channel(&self) -> Channel {
        Channel::DataExport
    }

    fn tier(&self) -> Tier {
        crate::core::channel::tier_of(Channel::DataExport)
    }

    fn confidence_range(&self) -> ConfidenceRange {
        crate::core::channel::default_confidence_range(Channel::DataExport)
    }

    fn marketplace_id(&self) -> Marketplace {
        self.marketplace
    }

    fn name(&self) -> &str {
        "csv-export"
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn can_handle(&self, input: &str) -> bool {
        input.lines().count() >= 2 && input.contains(',')
    }

    async fn extract_with_provenance(
        &self,
        content: &str,
        identifier: &str,
        _options: &ExtractOptions,
    ) -> Result<Option<ListingWithProvenance>, AdapterError> {
        let (header, row) = match parse_row(content) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.health.record(false);
                return Err(e);
            }
        };

        let column = |name: &str| -> Option<&str> {
            header
                .iter()
                .position(|h| *h == name)
                .and_then(|i| row.get(i).copied())
        };

        let title = match column("title") {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                self.health.record(false);
                return Err(AdapterError::Parse("row missing title column".to_string()));
            }
        };

        let price = match (column("price"), column("currency")) {
            (Some(amount), Some(currency)) => {
                let parsed = match amount.parse() {
                    Ok(p) => p,
                    Err(_) => {
                        self.health.record(false);
                        return Err(AdapterError::Parse(format!("invalid price amount: {amount}")));
                    }
                };
                match Money::new(parsed, currency) {
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
            extraction_method: "data_export".to_string(),
            confidence: CONFIDENCE,
            extractor_version: self.version.clone(),
        };

        let provenance = ProvenanceRecord {
            channel: Channel::DataExport,
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
