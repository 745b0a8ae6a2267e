//! The per-(marketplace, channel) registration record.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::core::adapter::Adapter;
use crate::core::domain::HealthSnapshot;

pub struct AdapterRecord {
    pub adapter: Arc<dyn Adapter>,
    pub enabled: bool,
    pub last_health: Option<HealthSnapshot>,
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl AdapterRecord {
    pub fn new(adapter: Arc<dyn Adapter>) -> Self {
        AdapterRecord {
            adapter,
            enabled: true,
            last_health: None,
            last_checked_at: None,
        }
    }

    /// Reliability estimate used for default fallback-chain ordering: the
    /// last-observed health, or the adapter's own confidence ceiling if
    /// it has never been measured.
    pub fn estimated_reliability(&self) -> f64 {
        self.last_health
            .as_ref()
            .map(|h| h.estimated_reliability)
            .unwrap_or_else(|| self.adapter.confidence_range().max)
    }
}
