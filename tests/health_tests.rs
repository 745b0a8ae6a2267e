mod support;

use std::sync::Arc;

use async_trait::async_trait;

use listingmux::core::adapter::{Adapter, AdapterError, ExtractOptions};
use listingmux::core::channel::Channel;
use listingmux::core::domain::{HealthSnapshot, ListingWithProvenance, Marketplace};
use listingmux::core::orchestrator::Orchestrator;
use listingmux::testkit::mock_adapter::MockAdapter;

/// An adapter whose health check panics, to exercise the orchestrator's
/// per-adapter isolation in `get_health_report`.
struct PanickingHealthAdapter;

#[async_trait]
impl Adapter for PanickingHealthAdapter {
    fn channel(&self) -> Channel {
        Channel::OcrExtraction
    }

    fn marketplace_id(&self) -> Marketplace {
        Marketplace::Ebay
    }

    fn name(&self) -> &str {
        "panicking-health"
    }

    fn version(&self) -> &str {
        "0.0.1"
    }

    fn can_handle(&self, _input: &str) -> bool {
        true
    }

    async fn extract_with_provenance(
        &self,
        _content: &str,
        _identifier: &str,
        _options: &ExtractOptions,
    ) -> Result<Option<ListingWithProvenance>, AdapterError> {
        Ok(None)
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn get_health(&self) -> HealthSnapshot {
        panic!("simulated health-check failure");
    }
}

#[tokio::test]
async fn a_panicking_health_check_does_not_suppress_other_adapters_reports() {
    let orchestrator = Orchestrator::new();
    orchestrator.register_adapter(Marketplace::Ebay, Arc::new(PanickingHealthAdapter));
    orchestrator.register_adapter(
        Marketplace::Ebay,
        Arc::new(MockAdapter::new("scrape", Channel::Scraping, Marketplace::Ebay)),
    );

    let report = orchestrator.get_health_report().await;
    let ebay = report.get(&Marketplace::Ebay).unwrap();

    // The healthy adapter's entry is unaffected by its sibling's panic.
    assert!(ebay.get(&Channel::Scraping).unwrap().available);

    // The panicking adapter still gets an entry: a synthetic unhealthy
    // snapshot substituted in place of the one that couldn't be computed.
    let substituted = ebay.get(&Channel::OcrExtraction).unwrap();
    assert!(!substituted.available);
    assert_eq!(substituted.recent_failure_rate, 1.0);
    assert!(substituted.status_message.is_some());
}
