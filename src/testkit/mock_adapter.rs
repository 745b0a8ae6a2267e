//! A scriptable [`Adapter`] used across unit and integration tests: push a
//! queue of outcomes and the adapter returns them in order.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::core::adapter::{Adapter, AdapterError, ExtractOptions};
use crate::core::channel::{Channel, ConfidenceRange, Tier};
use crate::core::domain::{HealthSnapshot, ListingWithProvenance, Marketplace};
use crate::core::health::HealthTracker;

/// One scripted outcome for a single `extract_with_provenance` call.
pub enum MockOutcome {
    Success(ListingWithProvenance),
    NoData,
    Error(AdapterError),
    /// Sleep longer than the deadline passed in, to exercise timeout paths.
    Hang(Duration),
}

pub struct MockAdapter {
    name: String,
    channel: Channel,
    marketplace: Marketplace,
    version: String,
    tier_override: Option<Tier>,
    confidence_range_override: Option<ConfidenceRange>,
    outcomes: Mutex<VecDeque<MockOutcome>>,
    available: AtomicBool,
    health: HealthTracker,
    calls: Mutex<u32>,
}

impl MockAdapter {
    pub fn new(name: &str, channel: Channel, marketplace: Marketplace) -> Self {
        MockAdapter {
            name: name.to_string(),
            channel,
            marketplace,
            version: "1.0.0".to_string(),
            tier_override: None,
            confidence_range_override: None,
            outcomes: Mutex::new(VecDeque::new()),
            available: AtomicBool::new(true),
            health: HealthTracker::new(),
            calls: Mutex::new(0),
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier_override = Some(tier);
        self
    }

    pub fn with_confidence_range(mut self, range: ConfidenceRange) -> Self {
        self.confidence_range_override = Some(range);
        self
    }

    pub fn unavailable(self) -> Self {
        self.available.store(false, Ordering::SeqCst);
        self
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Queue one outcome (consumed in FIFO order, one per call). Once the
    /// queue is drained, further calls return `NoData`.
    pub fn push_outcome(&self, outcome: MockOutcome) {
        self.outcomes.lock().push_back(outcome);
    }

    pub fn call_count(&self) -> u32 {
        *self.calls.lock()
    }
}

#[async_trait]
impl Adapter for MockAdapter {
    fn channel(&self) -> Channel {
        self.channel
    }

    fn tier(&self) -> Tier {
        self.tier_override.unwrap_or_else(|| crate::core::channel::tier_of(self.channel))
    }

    fn confidence_range(&self) -> ConfidenceRange {
        self.confidence_range_override
            .unwrap_or_else(|| crate::core::channel::default_confidence_range(self.channel))
    }

    fn marketplace_id(&self) -> Marketplace {
        self.marketplace
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn can_handle(&self, _input: &str) -> bool {
        true
    }

    async fn extract_with_provenance(
        &self,
        _content: &str,
        _identifier: &str,
        options: &ExtractOptions,
    ) -> Result<Option<ListingWithProvenance>, AdapterError> {
        *self.calls.lock() += 1;
        let outcome = self.outcomes.lock().pop_front();
        let result = match outcome {
            None => Ok(None),
            Some(MockOutcome::Success(listing)) => Ok(Some(listing)),
            Some(MockOutcome::NoData) => Ok(None),
            Some(MockOutcome::Error(e)) => Err(e),
            Some(MockOutcome::Hang(duration)) => {
                tokio::time::sleep(duration).await;
                Ok(None)
            }
        };
        self.health.record(result.is_ok());
        // A real adapter would race its own work against this deadline;
        // the mock just acknowledges it was supplied.
        let _ = options.deadline;
        result
    }

    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn get_health(&self) -> HealthSnapshot {
        self.health.snapshot(self.is_available().await, self.confidence_range())
    }
}
