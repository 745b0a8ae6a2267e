//! The orchestrator: the public entry point tying the registry, the
//! fallback walk, the concurrent fan-out, and health aggregation together.

mod get_data;
mod multi_source;
mod types;

pub use types::{AttemptRecord, MultiSourceResult, OrchestratorResult, RequestOptions};

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::core::adapter::Adapter;
use crate::core::channel::Channel;
use crate::core::domain::{HealthSnapshot, Marketplace};
use crate::core::registry::{AdapterAvailability, Registry};

/// Per-marketplace, per-channel health snapshots returned by
/// `get_health_report`.
pub type HealthReport = HashMap<Marketplace, HashMap<Channel, HealthSnapshot>>;

/// Thin facade over a shared [`Registry`]. Cloning an `Orchestrator` is
/// cheap: it holds only an `Arc` to the shared table.
#[derive(Clone)]
pub struct Orchestrator {
    registry: Arc<Registry>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    pub fn new() -> Self {
        Orchestrator {
            registry: Arc::new(Registry::new()),
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn register_adapter(&self, marketplace: Marketplace, adapter: Arc<dyn Adapter>) {
        self.registry.register_adapter(marketplace, adapter);
    }

    pub fn unregister_adapter(&self, marketplace: Marketplace, channel: Channel) {
        self.registry.unregister_adapter(marketplace, channel);
    }

    pub fn enable_adapter(&self, marketplace: Marketplace, channel: Channel) -> bool {
        self.registry.enable_adapter(marketplace, channel)
    }

    pub fn disable_adapter(&self, marketplace: Marketplace, channel: Channel) -> bool {
        self.registry.disable_adapter(marketplace, channel)
    }

    pub fn set_fallback_chain(&self, marketplace: Marketplace, chain: Vec<Channel>) {
        self.registry.set_fallback_chain(marketplace, chain);
    }

    pub fn get_fallback_chain(&self, marketplace: Marketplace) -> Vec<Channel> {
        self.registry.get_fallback_chain(marketplace)
    }

    pub fn get_available_adapters(&self, marketplace: Marketplace) -> Vec<AdapterAvailability> {
        self.registry.get_available_adapters(marketplace)
    }

    /// Walk the fallback chain for `marketplace`, returning the first
    /// acceptable result and recording every attempt along the way.
    pub async fn get_data(
        &self,
        marketplace: Marketplace,
        identifier: &str,
        options: &RequestOptions,
    ) -> OrchestratorResult {
        get_data::get_data(&self.registry, marketplace, identifier, options).await
    }

    pub async fn get_data_default(
        &self,
        marketplace: Marketplace,
        identifier: &str,
    ) -> OrchestratorResult {
        self.get_data(marketplace, identifier, &RequestOptions::default()).await
    }

    /// Query every admitted source for `marketplace` concurrently and merge
    /// the results, surfacing any field-level disagreement.
    pub async fn get_from_all_sources(
        &self,
        marketplace: Marketplace,
        identifier: &str,
        options: &RequestOptions,
    ) -> MultiSourceResult {
        multi_source::get_from_all_sources(&self.registry, marketplace, identifier, options).await
    }

    pub async fn get_from_all_sources_default(
        &self,
        marketplace: Marketplace,
        identifier: &str,
    ) -> MultiSourceResult {
        self.get_from_all_sources(marketplace, identifier, &RequestOptions::default()).await
    }

    /// Query every registered adapter's health independently. A hung or
    /// panicking health check never blocks another adapter's report, and is
    /// substituted with a synthetic unhealthy snapshot.
    pub async fn get_health_report(&self) -> HealthReport {
        let records = self.registry.all_records();
        let mut tasks = Vec::with_capacity(records.len());

        for (marketplace, channel, adapter) in records {
            let task = tokio::spawn(async move { adapter.get_health().await });
            tasks.push((marketplace, channel, task));
        }

        let mut report: HealthReport = HashMap::new();
        for (marketplace, channel, task) in tasks {
            let snapshot = match task.await {
                Ok(snapshot) => snapshot,
                Err(join_err) => {
                    warn!(%marketplace, %channel, error = %join_err, "health check task panicked");
                    HealthSnapshot::unhealthy(format!("health check failed: {join_err}"))
                }
            };
            self.registry.cache_health(marketplace, channel, snapshot.clone());
            report.entry(marketplace).or_default().insert(channel, snapshot);
        }

        report
    }
}
