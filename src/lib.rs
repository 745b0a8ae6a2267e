//! listingmux - multi-channel marketplace listing orchestrator.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── core/
//! │   ├── domain/        # Pure value types: listing, money, provenance
//! │   ├── channel/        # Channel → tier → confidence-range table
//! │   ├── adapter/        # The Adapter trait every source implements
//! │   ├── registry/        # marketplace → channel → adapter table, fallback chains
//! │   ├── health/          # Per-adapter rolling health window
//! │   ├── merge/            # Multi-source conflict resolution
//! │   ├── orchestrator/     # get_data / get_from_all_sources / get_health_report
//! │   └── demo_adapters/    # Minimal reference adapters for every tier
//! ├── app/                  # Configuration and logging setup
//! └── cli/                  # Thin clap-based command-line front end
//! ```
//!
//! # Features
//!
//! - `testkit` - expose [`testkit`] outside this crate's own test binaries,
//!   for integration tests under `tests/`.

pub mod app;
pub mod cli;
pub mod core;
pub mod error;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
