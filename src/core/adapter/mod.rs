//! The adapter contract. The orchestrator is polymorphic over any
//! value implementing [`Adapter`]; it never depends on a concrete adapter
//! type.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::core::channel::{Channel, ConfidenceRange, Tier};
use crate::core::domain::{
    validate, HealthSnapshot, ListingWithProvenance, Marketplace, NormalizedListing,
    ValidationResult,
};

/// Recoverable extraction trouble. Adapters raise this for transient
/// failures (network hiccup, parse error); the orchestrator catches it and
/// records it in the attempt audit rather than letting it propagate.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("adapter timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to parse source content: {0}")]
    Parse(String),
    #[error("{0}")]
    Other(String),
}

/// Per-attempt parameters the orchestrator passes into an extraction call.
/// `deadline` is the derived per-attempt budget. Adapters are expected, but
/// not forced, to honor it internally; the orchestrator additionally wraps
/// the call in its own `tokio::time::timeout`.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub deadline: Duration,
}

/// The fixed capability set every adapter exposes.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// The channel (mechanism) this adapter uses.
    fn channel(&self) -> Channel;

    /// Reliability tier. Defaults to the fixed table for this adapter's
    /// channel; adapters rarely need to override this.
    fn tier(&self) -> Tier {
        crate::core::channel::tier_of(self.channel())
    }

    /// Confidence range this adapter's extractions typically fall in.
    /// Defaults to the channel's table entry.
    fn confidence_range(&self) -> ConfidenceRange {
        crate::core::channel::default_confidence_range(self.channel())
    }

    /// Whether using this adapter requires explicit end-user action (e.g.
    /// granting a browser-extension permission, consenting to cookie
    /// import). Defaults to `false`.
    fn requires_user_action(&self) -> bool {
        false
    }

    /// Marketplace this adapter instance is bound to.
    fn marketplace_id(&self) -> Marketplace;

    /// Human-readable adapter name, for logging.
    fn name(&self) -> &str;

    /// Adapter version, used to build `ProvenanceRecord::source_id`.
    fn version(&self) -> &str;

    /// Cheap, local predicate: can this adapter plausibly handle `input`
    /// (the identifier/content string passed to the orchestrator)?
    fn can_handle(&self, input: &str) -> bool;

    /// The orchestrator's sole extraction entry point. Returns `Ok(None)`
    /// for "no data found"; returns `Err` only for recoverable trouble the
    /// orchestrator should record and (if fallback is allowed) move past.
    async fn extract_with_provenance(
        &self,
        content: &str,
        identifier: &str,
        options: &ExtractOptions,
    ) -> Result<Option<ListingWithProvenance>, AdapterError>;

    /// Validate a listing this adapter (or another) produced. Defaults to
    /// the shared baseline invariant checks; adapters may add
    /// marketplace-specific checks on top.
    fn validate(&self, listing: &NormalizedListing) -> ValidationResult {
        validate(listing)
    }

    /// Whether this adapter can serve right now (API key loaded, bridge
    /// server up, etc).
    async fn is_available(&self) -> bool;

    /// Current health snapshot, derived from this adapter's own rolling
    /// event window.
    async fn get_health(&self) -> HealthSnapshot;
}
