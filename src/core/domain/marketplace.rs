//! Marketplace identifier enum (closed set).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace a listing was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marketplace {
    Ebay,
    Amazon,
    Walmart,
    Etsy,
    Custom,
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Marketplace::Ebay => "ebay",
            Marketplace::Amazon => "amazon",
            Marketplace::Walmart => "walmart",
            Marketplace::Etsy => "etsy",
            Marketplace::Custom => "custom",
        };
        f.write_str(s)
    }
}

/// Unknown marketplace strings are refused, never silently coerced.
#[derive(Debug, thiserror::Error)]
#[error("unknown marketplace: {0}")]
pub struct UnknownMarketplace(pub String);

impl FromStr for Marketplace {
    type Err = UnknownMarketplace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ebay" => Ok(Marketplace::Ebay),
            "amazon" => Ok(Marketplace::Amazon),
            "walmart" => Ok(Marketplace::Walmart),
            "etsy" => Ok(Marketplace::Etsy),
            "custom" => Ok(Marketplace::Custom),
            other => Err(UnknownMarketplace(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display_and_from_str() {
        for m in [
            Marketplace::Ebay,
            Marketplace::Amazon,
            Marketplace::Walmart,
            Marketplace::Etsy,
            Marketplace::Custom,
        ] {
            assert_eq!(m.to_string().parse::<Marketplace>().unwrap(), m);
        }
    }

    #[test]
    fn refuses_unknown_marketplace() {
        assert!("shopify".parse::<Marketplace>().is_err());
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("EBAY".parse::<Marketplace>().unwrap(), Marketplace::Ebay);
    }
}
