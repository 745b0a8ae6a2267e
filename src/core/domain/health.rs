//! Health snapshot value type. The rolling-window tracker that
//! produces these lives in [`crate::core::health`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub available: bool,
    pub last_successful_extraction: Option<DateTime<Utc>>,
    pub recent_failure_rate: f64,
    pub estimated_reliability: f64,
    pub status_message: Option<String>,
}

impl HealthSnapshot {
    /// Synthetic unhealthy snapshot substituted when a health check itself
    /// fails.
    pub fn unhealthy(status_message: impl Into<String>) -> Self {
        HealthSnapshot {
            available: false,
            last_successful_extraction: None,
            recent_failure_rate: 1.0,
            estimated_reliability: 0.0,
            status_message: Some(status_message.into()),
        }
    }
}
