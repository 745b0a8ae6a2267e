//! Concurrent multi-source fan-out: `get_from_all_sources`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::core::adapter::{Adapter, ExtractOptions};
use crate::core::domain::Marketplace;
use crate::core::merge::merge;
use crate::core::registry::Registry;

use super::types::{MultiSourceResult, RequestOptions};

async fn run_one(
    adapter: Arc<dyn Adapter>,
    identifier: String,
    timeout: Duration,
) -> Option<crate::core::domain::ListingWithProvenance> {
    if !adapter.is_available().await {
        return None;
    }
    let options = ExtractOptions { deadline: timeout };
    match tokio::time::timeout(
        timeout,
        adapter.extract_with_provenance(&identifier, &identifier, &options),
    )
    .await
    {
        Ok(Ok(Some(listing))) => Some(listing),
        Ok(Ok(None)) => None,
        Ok(Err(e)) => {
            warn!(channel = %adapter.channel(), error = %e, "source failed during fan-out");
            None
        }
        Err(_) => {
            warn!(channel = %adapter.channel(), "source timed out during fan-out");
            None
        }
    }
}

pub async fn get_from_all_sources(
    registry: &Registry,
    marketplace: Marketplace,
    identifier: &str,
    options: &RequestOptions,
) -> MultiSourceResult {
    let start = Instant::now();
    let adapters = registry.resolve(marketplace, &options.filter());

    if adapters.is_empty() {
        return MultiSourceResult {
            merged_data: None,
            sources: Vec::new(),
            conflicts: Vec::new(),
        };
    }

    let mut tasks = Vec::with_capacity(adapters.len());
    for adapter in adapters {
        let id = identifier.to_string();
        let timeout = options.timeout;
        tasks.push(tokio::spawn(run_one(adapter, id, timeout)));
    }

    let joined = futures_util::future::join_all(tasks).await;
    let mut sources: Vec<_> = joined
        .into_iter()
        .filter_map(|r| match r {
            Ok(Some(listing)) => Some(listing),
            Ok(None) => None,
            Err(join_err) => {
                warn!(error = %join_err, "source task panicked during fan-out");
                None
            }
        })
        .collect();
    sources.sort_by(|a, b| a.provenance.tier.cmp(&b.provenance.tier));

    let merge_result = merge(sources.clone());

    let elapsed = start.elapsed();
    if elapsed >= options.timeout {
        warn!(marketplace = %marketplace, elapsed_ms = elapsed.as_millis(), "multi-source fan-out exceeded its timeout");
    }

    MultiSourceResult {
        merged_data: merge_result.merged,
        sources,
        conflicts: merge_result.conflicts,
    }
}
