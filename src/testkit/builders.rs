//! Quick constructors for listings and provenance records, so tests can
//! build a valid `ListingWithProvenance` in one line instead of filling in
//! every field by hand.

use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::core::channel::Channel;
use crate::core::domain::{
    Availability, Condition, Freshness, ListingWithProvenance, Marketplace, Money,
    NormalizedListing, ProvenanceRecord, Seller,
};

/// A minimal, always-valid listing for a given marketplace/title/price,
/// ready to be wrapped in provenance by [`provenance_for`].
pub fn listing(marketplace: Marketplace, title: &str, amount: Decimal, currency: &str) -> NormalizedListing {
    NormalizedListing {
        id: format!("{title}-id"),
        marketplace,
        url: format!("https://example.test/{title}"),
        title: title.to_string(),
        price: Some(Money::new(amount, currency).expect("valid test money")),
        shipping_cost: None,
        original_price: None,
        condition: Condition::Unknown,
        availability: Availability::Unknown,
        sold_date: None,
        quantity_available: None,
        seller: Seller::default(),
        images: vec![],
        item_number: None,
        category: vec![],
        attributes: BTreeMap::new(),
        extracted_at: Utc::now(),
        extraction_method: "testkit".to_string(),
        confidence: 0.8,
        extractor_version: "0.0.0-test".to_string(),
    }
}

pub fn provenance_for(channel: Channel, source_id: &str, confidence: f64) -> ProvenanceRecord {
    ProvenanceRecord {
        channel,
        tier: crate::core::channel::tier_of(channel),
        confidence,
        freshness: Freshness::Recent,
        source_id: source_id.to_string(),
        extracted_at: Utc::now(),
        raw_data_hash: None,
        user_consented: true,
        terms_compliant: true,
        metadata: BTreeMap::new(),
    }
}

pub fn with_provenance(
    listing: NormalizedListing,
    channel: Channel,
    source_id: &str,
    confidence: f64,
) -> ListingWithProvenance {
    ListingWithProvenance {
        listing,
        provenance: provenance_for(channel, source_id, confidence),
        correlated_sources: None,
        conflicting_data: None,
    }
}
