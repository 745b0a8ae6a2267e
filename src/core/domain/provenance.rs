//! Provenance record attached to every extraction, and the merged
//! listing-with-provenance result type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;

use crate::core::channel::{Channel, Tier};

use super::listing::NormalizedListing;

/// Recency classification of a source's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    Realtime,
    Recent,
    Historical,
}

/// The audit record describing how a listing value came to exist.
///
/// Field names are part of the stable wire contract: consumers of a
/// serialized provenance record rely on these exact names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    pub channel: Channel,
    pub tier: Tier,
    pub confidence: f64,
    pub freshness: Freshness,
    pub source_id: String,
    pub extracted_at: DateTime<Utc>,
    pub raw_data_hash: Option<String>,
    pub user_consented: bool,
    pub terms_compliant: bool,
    #[serde(default)]
    pub metadata: BTreeMap<String, Json>,
}

/// A single field-level disagreement detected while merging multiple
/// sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictEntry {
    pub field: String,
    pub values: Vec<ConflictValue>,
    pub resolution_method: String,
    pub resolved_value: Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictValue {
    pub source_id: String,
    pub tier: Tier,
    pub value: Json,
}

/// A normalized listing plus its provenance and, when merged from multiple
/// sources, the correlating/conflicting evidence that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingWithProvenance {
    #[serde(flatten)]
    pub listing: NormalizedListing,
    pub provenance: ProvenanceRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlated_sources: Option<Vec<ProvenanceRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_data: Option<Vec<ConflictEntry>>,
}
