//! Single-source-with-fallback: `get_data`.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::core::adapter::ExtractOptions;
use crate::core::domain::Marketplace;
use crate::core::registry::Registry;

use super::types::{AttemptRecord, OrchestratorResult, RequestOptions};

fn elapsed_ms(since: Instant) -> u64 {
    since.elapsed().as_millis() as u64
}

pub async fn get_data(
    registry: &Registry,
    marketplace: Marketplace,
    identifier: &str,
    options: &RequestOptions,
) -> OrchestratorResult {
    let start = Instant::now();
    let adapters = registry.resolve(marketplace, &options.filter());

    if adapters.is_empty() {
        debug!(%marketplace, "no adapters available for get_data");
        return OrchestratorResult {
            data: None,
            attempted_sources: Vec::new(),
            fallback_used: false,
            total_duration_ms: elapsed_ms(start),
        };
    }

    let first_attempt_tier = adapters[0].tier();
    let mut fallback_used = false;
    let mut attempted = Vec::new();

    for adapter in &adapters {
        // Step 2a: stop launching new attempts once the total budget is spent.
        let elapsed = start.elapsed();
        if elapsed >= options.timeout {
            break;
        }

        if adapter.tier() > first_attempt_tier {
            fallback_used = true;
        }

        let attempt_start = Instant::now();

        if !adapter.is_available().await {
            attempted.push(AttemptRecord {
                channel: adapter.channel(),
                tier: adapter.tier(),
                success: false,
                error: Some("Adapter not available".to_string()),
                duration_ms: elapsed_ms(attempt_start),
            });
            if !options.allow_fallback {
                break;
            }
            continue;
        }

        let deadline = options
            .timeout
            .checked_sub(start.elapsed())
            .unwrap_or(Duration::ZERO)
            .max(Duration::from_millis(1000));
        let extract_options = ExtractOptions { deadline };

        let outcome = tokio::time::timeout(
            deadline,
            adapter.extract_with_provenance(identifier, identifier, &extract_options),
        )
        .await;

        let (success, error, data) = match outcome {
            Err(_) => (false, Some("Adapter timed out".to_string()), None),
            Ok(Err(e)) => (false, Some(e.to_string()), None),
            Ok(Ok(None)) => (false, Some("Extraction returned null".to_string()), None),
            Ok(Ok(Some(listing))) if listing.listing.confidence < options.required_confidence => (
                false,
                Some(format!(
                    "Confidence {} below threshold {}",
                    listing.listing.confidence, options.required_confidence
                )),
                None,
            ),
            Ok(Ok(Some(listing))) => (true, None, Some(listing)),
        };

        if let Some(err) = &error {
            warn!(channel = %adapter.channel(), error = %err, "adapter attempt failed");
        }

        attempted.push(AttemptRecord {
            channel: adapter.channel(),
            tier: adapter.tier(),
            success,
            error,
            duration_ms: elapsed_ms(attempt_start),
        });

        if success {
            return OrchestratorResult {
                data,
                attempted_sources: attempted,
                fallback_used,
                total_duration_ms: elapsed_ms(start),
            };
        }

        if !options.allow_fallback {
            break;
        }
    }

    OrchestratorResult {
        data: None,
        attempted_sources: attempted,
        fallback_used,
        total_duration_ms: elapsed_ms(start),
    }
}
