//! Minimal reference adapters demonstrating the `Adapter` contract across
//! all four reliability tiers, without any real network or file I/O.

mod csv_export;
mod llm_fallback;
mod static_scraping;

pub use csv_export::CsvExportAdapter;
pub use llm_fallback::LlmFallbackAdapter;
pub use static_scraping::StaticScrapingAdapter;
