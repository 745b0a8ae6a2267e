//! Request/response value types shared by `get_data` and
//! `get_from_all_sources`.

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;

use crate::core::channel::{Channel, Tier};
use crate::core::domain::{ConflictEntry, ListingWithProvenance};
use crate::core::registry::SourceFilter;

/// Options recognized by both `get_data` and `get_from_all_sources`.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub preferred_tiers: Vec<Tier>,
    pub required_confidence: f64,
    pub allow_fallback: bool,
    pub timeout: Duration,
    pub include_channels: Option<HashSet<Channel>>,
    pub exclude_channels: HashSet<Channel>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        RequestOptions {
            preferred_tiers: vec![1, 2, 3, 4],
            required_confidence: 0.5,
            allow_fallback: true,
            timeout: Duration::from_millis(30_000),
            include_channels: None,
            exclude_channels: HashSet::new(),
        }
    }
}

impl RequestOptions {
    pub fn filter(&self) -> SourceFilter {
        SourceFilter {
            preferred_tiers: self.preferred_tiers.clone(),
            include_channels: self.include_channels.clone(),
            exclude_channels: self.exclude_channels.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttemptRecord {
    pub channel: Channel,
    pub tier: Tier,
    pub success: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrchestratorResult {
    pub data: Option<ListingWithProvenance>,
    pub attempted_sources: Vec<AttemptRecord>,
    pub fallback_used: bool,
    pub total_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MultiSourceResult {
    pub merged_data: Option<ListingWithProvenance>,
    pub sources: Vec<ListingWithProvenance>,
    pub conflicts: Vec<ConflictEntry>,
}
