//! Filter options applied to every request, independent of how the
//! fallback-chain order was produced.

use std::collections::HashSet;

use crate::core::channel::{Channel, Tier};

#[derive(Debug, Clone)]
pub struct SourceFilter {
    pub preferred_tiers: Vec<Tier>,
    pub include_channels: Option<HashSet<Channel>>,
    pub exclude_channels: HashSet<Channel>,
}

impl Default for SourceFilter {
    fn default() -> Self {
        SourceFilter {
            preferred_tiers: vec![1, 2, 3, 4],
            include_channels: None,
            exclude_channels: HashSet::new(),
        }
    }
}

impl SourceFilter {
    pub fn admits(&self, channel: Channel, tier: Tier) -> bool {
        if self.exclude_channels.contains(&channel) {
            return false;
        }
        if let Some(include) = &self.include_channels {
            if !include.contains(&channel) {
                return false;
            }
        }
        self.preferred_tiers.contains(&tier)
    }
}
