//! The adapter registry: the two-level `marketplace → channel →
//! registered-adapter-record` table, registration lifecycle, and
//! fallback-chain resolution.

mod fallback;
mod record;

pub use fallback::SourceFilter;
pub use record::AdapterRecord;

use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::adapter::Adapter;
use crate::core::channel::Channel;
use crate::core::domain::{HealthSnapshot, Marketplace};

/// `{channel, tier, available}` entry returned by `get_available_adapters`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AdapterAvailability {
    pub channel: Channel,
    pub tier: crate::core::channel::Tier,
    pub available: bool,
}

type Table = HashMap<Marketplace, HashMap<Channel, AdapterRecord>>;

/// Shared mutable registry. Reader/writer discipline via `parking_lot`:
/// every request path takes a read lock; admin operations
/// (register/unregister/enable/disable/set_fallback_chain) take a write
/// lock. The lock is never held across an `.await`.
pub struct Registry {
    table: RwLock<Table>,
    fallback_overrides: RwLock<HashMap<Marketplace, Vec<Channel>>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            table: RwLock::new(HashMap::new()),
            fallback_overrides: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace the adapter registered for `(marketplace,
    /// adapter.channel())`. Replacing an existing registration is logged as
    /// a warning naming the old and new version.
    pub fn register_adapter(&self, marketplace: Marketplace, adapter: Arc<dyn Adapter>) {
        let channel = adapter.channel();
        let mut table = self.table.write();
        let marketplace_table = table.entry(marketplace).or_default();

        if let Some(existing) = marketplace_table.get(&channel) {
            warn!(
                %marketplace,
                %channel,
                old_version = existing.adapter.version(),
                new_version = adapter.version(),
                "replacing registered adapter"
            );
        } else {
            info!(%marketplace, %channel, version = adapter.version(), "registered adapter");
        }

        marketplace_table.insert(channel, AdapterRecord::new(adapter));
    }

    pub fn unregister_adapter(&self, marketplace: Marketplace, channel: Channel) {
        if let Some(marketplace_table) = self.table.write().get_mut(&marketplace) {
            marketplace_table.remove(&channel);
        }
    }

    pub fn enable_adapter(&self, marketplace: Marketplace, channel: Channel) -> bool {
        self.set_enabled(marketplace, channel, true)
    }

    pub fn disable_adapter(&self, marketplace: Marketplace, channel: Channel) -> bool {
        self.set_enabled(marketplace, channel, false)
    }

    fn set_enabled(&self, marketplace: Marketplace, channel: Channel, enabled: bool) -> bool {
        if let Some(record) = self
            .table
            .write()
            .get_mut(&marketplace)
            .and_then(|t| t.get_mut(&channel))
        {
            record.enabled = enabled;
            true
        } else {
            false
        }
    }

    pub fn set_fallback_chain(&self, marketplace: Marketplace, chain: Vec<Channel>) {
        self.fallback_overrides.write().insert(marketplace, chain);
    }

    /// The resolved fallback chain for `marketplace`: either the explicit
    /// override filtered to registered+enabled adapters (in the exact
    /// order given), or the default tier-ascending /
    /// reliability-descending ordering.
    pub fn get_fallback_chain(&self, marketplace: Marketplace) -> Vec<Channel> {
        let table = self.table.read();
        let Some(marketplace_table) = table.get(&marketplace) else {
            return Vec::new();
        };

        if let Some(chain) = self.fallback_overrides.read().get(&marketplace) {
            return chain
                .iter()
                .filter(|c| marketplace_table.get(c).map(|r| r.enabled).unwrap_or(false))
                .copied()
                .collect();
        }

        self.default_chain(marketplace_table)
    }

    fn default_chain(&self, marketplace_table: &HashMap<Channel, AdapterRecord>) -> Vec<Channel> {
        let mut enabled: Vec<(Channel, crate::core::channel::Tier, f64)> = marketplace_table
            .iter()
            .filter(|(_, record)| record.enabled)
            .map(|(channel, record)| (*channel, record.adapter.tier(), record.estimated_reliability()))
            .collect();

        enabled.sort_by(|a, b| a.1.cmp(&b.1).then(b.2.partial_cmp(&a.2).unwrap()));
        enabled.into_iter().map(|(channel, _, _)| channel).collect()
    }

    pub fn get_available_adapters(&self, marketplace: Marketplace) -> Vec<AdapterAvailability> {
        let table = self.table.read();
        let Some(marketplace_table) = table.get(&marketplace) else {
            return Vec::new();
        };
        marketplace_table
            .iter()
            .map(|(channel, record)| AdapterAvailability {
                channel: *channel,
                tier: record.adapter.tier(),
                available: record.enabled,
            })
            .collect()
    }

    /// Resolve the ordered, filtered list of adapters for one request.
    pub fn resolve(&self, marketplace: Marketplace, filter: &SourceFilter) -> Vec<Arc<dyn Adapter>> {
        let chain = self.get_fallback_chain(marketplace);
        let table = self.table.read();
        let Some(marketplace_table) = table.get(&marketplace) else {
            return Vec::new();
        };

        chain
            .into_iter()
            .filter_map(|channel| {
                let record = marketplace_table.get(&channel)?;
                if !record.enabled {
                    return None;
                }
                filter
                    .admits(channel, record.adapter.tier())
                    .then(|| record.adapter.clone())
            })
            .collect()
    }

    /// Every registered `(marketplace, channel, adapter)` triple, for
    /// `get_health_report`.
    pub fn all_records(&self) -> Vec<(Marketplace, Channel, Arc<dyn Adapter>)> {
        self.table
            .read()
            .iter()
            .flat_map(|(marketplace, channels)| {
                channels
                    .iter()
                    .map(|(channel, record)| (*marketplace, *channel, record.adapter.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Cache a freshly computed health snapshot on the record.
    pub fn cache_health(&self, marketplace: Marketplace, channel: Channel, snapshot: HealthSnapshot) {
        if let Some(record) = self
            .table
            .write()
            .get_mut(&marketplace)
            .and_then(|t| t.get_mut(&channel))
        {
            record.last_health = Some(snapshot);
            record.last_checked_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::mock_adapter::MockAdapter;

    #[test]
    fn registering_same_channel_twice_replaces_not_duplicates() {
        let registry = Registry::new();
        registry.register_adapter(
            Marketplace::Ebay,
            Arc::new(MockAdapter::new("a", Channel::Scraping, Marketplace::Ebay).with_version("1.0")),
        );
        registry.register_adapter(
            Marketplace::Ebay,
            Arc::new(MockAdapter::new("a", Channel::Scraping, Marketplace::Ebay).with_version("2.0")),
        );

        let adapters = registry.get_available_adapters(Marketplace::Ebay);
        assert_eq!(adapters.len(), 1);

        let resolved = registry.resolve(Marketplace::Ebay, &SourceFilter::default());
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].version(), "2.0");
    }

    #[test]
    fn default_chain_orders_by_tier_then_reliability() {
        let registry = Registry::new();
        registry.register_adapter(
            Marketplace::Ebay,
            Arc::new(MockAdapter::new("scrape", Channel::Scraping, Marketplace::Ebay)),
        );
        registry.register_adapter(
            Marketplace::Ebay,
            Arc::new(MockAdapter::new("api", Channel::OfficialApi, Marketplace::Ebay)),
        );
        registry.register_adapter(
            Marketplace::Ebay,
            Arc::new(MockAdapter::new("llm", Channel::LlmExtraction, Marketplace::Ebay)),
        );

        let chain = registry.get_fallback_chain(Marketplace::Ebay);
        assert_eq!(
            chain,
            vec![Channel::OfficialApi, Channel::Scraping, Channel::LlmExtraction]
        );
    }

    #[test]
    fn disabled_adapters_are_excluded_from_resolution() {
        let registry = Registry::new();
        registry.register_adapter(
            Marketplace::Ebay,
            Arc::new(MockAdapter::new("scrape", Channel::Scraping, Marketplace::Ebay)),
        );
        registry.disable_adapter(Marketplace::Ebay, Channel::Scraping);

        assert!(registry.resolve(Marketplace::Ebay, &SourceFilter::default()).is_empty());
        let availability = registry.get_available_adapters(Marketplace::Ebay);
        assert_eq!(availability[0].available, false);
    }

    #[test]
    fn explicit_fallback_chain_is_honored_in_order() {
        let registry = Registry::new();
        registry.register_adapter(
            Marketplace::Ebay,
            Arc::new(MockAdapter::new("scrape", Channel::Scraping, Marketplace::Ebay)),
        );
        registry.register_adapter(
            Marketplace::Ebay,
            Arc::new(MockAdapter::new("api", Channel::OfficialApi, Marketplace::Ebay)),
        );

        registry.set_fallback_chain(Marketplace::Ebay, vec![Channel::Scraping, Channel::OfficialApi]);
        let chain = registry.get_fallback_chain(Marketplace::Ebay);
        assert_eq!(chain, vec![Channel::Scraping, Channel::OfficialApi]);
    }

    #[test]
    fn fallback_chain_override_drops_unregistered_channels() {
        let registry = Registry::new();
        registry.register_adapter(
            Marketplace::Ebay,
            Arc::new(MockAdapter::new("scrape", Channel::Scraping, Marketplace::Ebay)),
        );
        registry.set_fallback_chain(Marketplace::Ebay, vec![Channel::OfficialApi, Channel::Scraping]);
        assert_eq!(registry.get_fallback_chain(Marketplace::Ebay), vec![Channel::Scraping]);
    }

    #[test]
    fn filter_excludes_out_of_preference_tiers() {
        let registry = Registry::new();
        registry.register_adapter(
            Marketplace::Ebay,
            Arc::new(MockAdapter::new("scrape", Channel::Scraping, Marketplace::Ebay)),
        );
        let filter = SourceFilter {
            preferred_tiers: vec![1, 2],
            ..SourceFilter::default()
        };
        assert!(registry.resolve(Marketplace::Ebay, &filter).is_empty());
    }
}
