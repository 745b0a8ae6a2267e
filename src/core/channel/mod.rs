//! Channel → tier classification table, fixed and compile-time.
//!
//! The channel enum is a closed set of nine stable wire values. Each channel
//! belongs to exactly one tier, and each tier has a default confidence
//! range that adapters use when they don't have a better basis for their
//! own `confidence_range()`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The mechanism by which data was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    OfficialApi,
    FinancialApi,
    BrowserExtension,
    DataExport,
    EmailParsing,
    CookieImport,
    Scraping,
    OcrExtraction,
    LlmExtraction,
}

impl Channel {
    pub const ALL: [Channel; 9] = [
        Channel::OfficialApi,
        Channel::FinancialApi,
        Channel::BrowserExtension,
        Channel::DataExport,
        Channel::EmailParsing,
        Channel::CookieImport,
        Channel::Scraping,
        Channel::OcrExtraction,
        Channel::LlmExtraction,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Channel::OfficialApi => "official_api",
            Channel::FinancialApi => "financial_api",
            Channel::BrowserExtension => "browser_extension",
            Channel::DataExport => "data_export",
            Channel::EmailParsing => "email_parsing",
            Channel::CookieImport => "cookie_import",
            Channel::Scraping => "scraping",
            Channel::OcrExtraction => "ocr_extraction",
            Channel::LlmExtraction => "llm_extraction",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}

/// Tier 1 (most reliable) through tier 4 (most speculative).
pub type Tier = u8;

/// The default confidence range a tier's channels fall into absent adapter
/// overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceRange {
    pub min: f64,
    pub max: f64,
}

impl ConfidenceRange {
    pub const fn new(min: f64, max: f64) -> Self {
        ConfidenceRange { min, max }
    }
}

/// The fixed channel → (tier, confidence range) table.
pub fn tier_of(channel: Channel) -> Tier {
    match channel {
        Channel::OfficialApi | Channel::FinancialApi => 1,
        Channel::BrowserExtension
        | Channel::DataExport
        | Channel::EmailParsing
        | Channel::CookieImport => 2,
        Channel::Scraping => 3,
        Channel::OcrExtraction | Channel::LlmExtraction => 4,
    }
}

/// Default confidence range for a channel's tier.
pub fn default_confidence_range(channel: Channel) -> ConfidenceRange {
    match tier_of(channel) {
        1 => ConfidenceRange::new(0.90, 1.00),
        2 => ConfidenceRange::new(0.80, 0.95),
        3 => ConfidenceRange::new(0.70, 0.85),
        4 => ConfidenceRange::new(0.55, 0.80),
        other => unreachable!("tier_of returned out-of-range tier {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_table_covers_every_channel() {
        assert_eq!(tier_of(Channel::OfficialApi), 1);
        assert_eq!(tier_of(Channel::FinancialApi), 1);
        assert_eq!(tier_of(Channel::BrowserExtension), 2);
        assert_eq!(tier_of(Channel::DataExport), 2);
        assert_eq!(tier_of(Channel::EmailParsing), 2);
        assert_eq!(tier_of(Channel::CookieImport), 2);
        assert_eq!(tier_of(Channel::Scraping), 3);
        assert_eq!(tier_of(Channel::OcrExtraction), 4);
        assert_eq!(tier_of(Channel::LlmExtraction), 4);
    }

    #[test]
    fn confidence_ranges_match_the_fixed_table() {
        assert_eq!(default_confidence_range(Channel::OfficialApi), ConfidenceRange::new(0.90, 1.00));
        assert_eq!(default_confidence_range(Channel::DataExport), ConfidenceRange::new(0.80, 0.95));
        assert_eq!(default_confidence_range(Channel::Scraping), ConfidenceRange::new(0.70, 0.85));
        assert_eq!(default_confidence_range(Channel::LlmExtraction), ConfidenceRange::new(0.55, 0.80));
    }

    #[test]
    fn round_trips_through_display_and_from_str() {
        for c in Channel::ALL {
            assert_eq!(c.to_string().parse::<Channel>().unwrap(), c);
        }
    }

    #[test]
    fn refuses_unknown_channel_string() {
        assert!("telepathy".parse::<Channel>().is_err());
    }
}
