#![allow(dead_code)]

use std::sync::Arc;

use listingmux::core::channel::Channel;
use listingmux::core::domain::Marketplace;
use listingmux::core::orchestrator::Orchestrator;
use listingmux::testkit::mock_adapter::{MockAdapter, MockOutcome};

/// Register a scriptable mock adapter for `channel` and immediately queue
/// one outcome for it.
pub fn register_mock(
    orchestrator: &Orchestrator,
    marketplace: Marketplace,
    channel: Channel,
    outcome: MockOutcome,
) -> Arc<MockAdapter> {
    let adapter = Arc::new(MockAdapter::new(&channel.to_string(), channel, marketplace));
    adapter.push_outcome(outcome);
    orchestrator.register_adapter(marketplace, adapter.clone());
    adapter
}
