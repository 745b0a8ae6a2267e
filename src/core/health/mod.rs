//! Per-adapter rolling health window. Each adapter owns one of
//! these; the orchestrator never touches it directly.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::core::channel::ConfidenceRange;
use crate::core::domain::HealthSnapshot;

/// Retain at most this many events per adapter.
const MAX_EVENTS: usize = 100;
/// Drop events older than this.
const MAX_AGE_SECS: i64 = 3600;

struct Event {
    success: bool,
    at: DateTime<Utc>,
}

struct State {
    events: VecDeque<Event>,
    last_success: Option<DateTime<Utc>>,
}

/// A bounded, guarded rolling window of extraction outcomes for one
/// adapter.
pub struct HealthTracker {
    state: Mutex<State>,
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthTracker {
    pub fn new() -> Self {
        HealthTracker {
            state: Mutex::new(State {
                events: VecDeque::new(),
                last_success: None,
            }),
        }
    }

    /// Record the outcome of one `extract_with_provenance` call, successful or not.
    pub fn record(&self, success: bool) {
        let now = Utc::now();
        let mut state = self.state.lock();
        state.events.push_back(Event { success, at: now });
        if success {
            state.last_success = Some(now);
        }
        Self::prune(&mut state.events, now);
    }

    fn prune(events: &mut VecDeque<Event>, now: DateTime<Utc>) {
        while events.len() > MAX_EVENTS {
            events.pop_front();
        }
        while events
            .front()
            .map(|e| now.signed_duration_since(e.at) > ChronoDuration::seconds(MAX_AGE_SECS))
            .unwrap_or(false)
        {
            events.pop_front();
        }
    }

    /// Produce a snapshot. `available` is supplied by the caller (an
    /// adapter's own readiness check); the reliability estimate degrades
    /// the channel's top-of-range confidence by the recent failure rate.
    pub fn snapshot(&self, available: bool, confidence_range: ConfidenceRange) -> HealthSnapshot {
        let mut state = self.state.lock();
        Self::prune(&mut state.events, Utc::now());

        let total = state.events.len();
        let failures = state.events.iter().filter(|e| !e.success).count();
        let recent_failure_rate = if total == 0 {
            0.0
        } else {
            failures as f64 / total as f64
        };

        HealthSnapshot {
            available,
            last_successful_extraction: state.last_success,
            recent_failure_rate,
            estimated_reliability: confidence_range.max * (1.0 - recent_failure_rate),
            status_message: None,
        }
    }
}
