//! Conflict resolution and multi-source merge.

use serde_json::Value as Json;

use crate::core::domain::{ConflictEntry, ConflictValue, ListingWithProvenance};

/// Fixed field order conflicts are checked and emitted in.
const CONFLICT_FIELDS: [&str; 5] = ["title", "price", "condition", "availability", "sold_date"];

/// Agreement boost cap and per-source increment.
const MAX_AGREEMENT_BOOST: f64 = 0.10;
const PER_SOURCE_BOOST: f64 = 0.03;

pub struct MultiSourceMerge {
    pub merged: Option<ListingWithProvenance>,
    pub conflicts: Vec<ConflictEntry>,
}

fn field_value(listing: &ListingWithProvenance, field: &str) -> Option<Json> {
    let value = match field {
        "title" => Json::String(listing.listing.title.clone()),
        "price" => serde_json::to_value(&listing.listing.price).ok()?,
        "condition" => serde_json::to_value(listing.listing.condition).ok()?,
        "availability" => serde_json::to_value(listing.listing.availability).ok()?,
        "sold_date" => serde_json::to_value(listing.listing.sold_date).ok()?,
        other => unreachable!("unexpected conflict field {other}"),
    };
    if value.is_null() {
        None
    } else {
        Some(value)
    }
}

fn set_field(listing: &mut ListingWithProvenance, field: &str, value: &Json) {
    match field {
        "title" => {
            if let Some(s) = value.as_str() {
                listing.listing.title = s.to_string();
            }
        }
        "price" => {
            listing.listing.price = serde_json::from_value(value.clone()).ok().flatten();
        }
        "condition" => {
            if let Ok(c) = serde_json::from_value(value.clone()) {
                listing.listing.condition = c;
            }
        }
        "availability" => {
            if let Ok(a) = serde_json::from_value(value.clone()) {
                listing.listing.availability = a;
            }
        }
        "sold_date" => {
            listing.listing.sold_date = serde_json::from_value(value.clone()).ok().flatten();
        }
        other => unreachable!("unexpected conflict field {other}"),
    }
}

/// Merge sources already collected from a parallel gather.
/// `sources` is the raw, unsorted set of successful per-adapter results; the
/// caller (the orchestrator) is only responsible for collecting them.
pub fn merge(mut sources: Vec<ListingWithProvenance>) -> MultiSourceMerge {
    if sources.is_empty() {
        return MultiSourceMerge {
            merged: None,
            conflicts: Vec::new(),
        };
    }

    // Stable sort: ties keep launch/input order.
    sources.sort_by(|a, b| a.provenance.tier.cmp(&b.provenance.tier));

    let primary = sources[0].clone();
    let mut merged = primary.clone();
    if sources.len() > 1 {
        merged.correlated_sources = Some(sources.iter().map(|s| s.provenance.clone()).collect());
    }

    let mut conflicts = Vec::new();

    for field in CONFLICT_FIELDS {
        let mut present: Vec<(&ListingWithProvenance, Json)> = sources
            .iter()
            .filter_map(|s| field_value(s, field).map(|v| (s, v)))
            .collect();

        if present.len() < 2 {
            continue;
        }

        let mut distinct_values: Vec<&Json> = Vec::new();
        for (_, v) in &present {
            if !distinct_values.contains(&v) {
                distinct_values.push(v);
            }
        }
        if distinct_values.len() < 2 {
            continue;
        }

        // `present` inherits `sources`'s tier-ascending, input-order-stable
        // ordering, so the first entry is already the lowest-tier winner.
        present.sort_by(|a, b| a.0.provenance.tier.cmp(&b.0.provenance.tier));
        let (_, resolved_value) = &present[0];

        let values = present
            .iter()
            .map(|(s, v)| ConflictValue {
                source_id: s.provenance.source_id.clone(),
                tier: s.provenance.tier,
                value: v.clone(),
            })
            .collect();

        conflicts.push(ConflictEntry {
            field: field.to_string(),
            values,
            resolution_method: "highest_tier".to_string(),
            resolved_value: resolved_value.clone(),
        });

        set_field(&mut merged, field, resolved_value);
    }

    let boost = (MAX_AGREEMENT_BOOST).min((sources.len() as f64 - 1.0) * PER_SOURCE_BOOST);
    merged.listing.confidence = (primary.provenance.confidence + boost).min(1.0);

    if !conflicts.is_empty() {
        merged.conflicting_data = Some(conflicts.clone());
    }

    MultiSourceMerge {
        merged: Some(merged),
        conflicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::channel::Channel;
    use crate::core::domain::Marketplace;
    use crate::testkit::builders::{listing, with_provenance};
    use rust_decimal_macros::dec;

    #[test]
    fn merging_no_sources_yields_nothing() {
        let result = merge(vec![]);
        assert!(result.merged.is_none());
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn single_source_passes_through_unchanged() {
        let l = with_provenance(
            listing(Marketplace::Ebay, "Lamp", dec!(10), "USD"),
            Channel::Scraping,
            "scraping@1",
            0.8,
        );
        let result = merge(vec![l.clone()]);
        let merged = result.merged.unwrap();
        assert_eq!(merged.listing.title, "Lamp");
        assert_eq!(merged.listing.confidence, 0.8);
        assert!(merged.correlated_sources.is_none());
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn lowest_tier_wins_conflicting_fields() {
        let tier1 = with_provenance(
            listing(Marketplace::Ebay, "A", dec!(100), "USD"),
            Channel::OfficialApi,
            "api@1",
            0.95,
        );
        let tier3 = with_provenance(
            listing(Marketplace::Ebay, "B", dec!(99), "USD"),
            Channel::Scraping,
            "scrape@1",
            0.8,
        );

        let result = merge(vec![tier3, tier1]);
        let merged = result.merged.unwrap();
        assert_eq!(merged.listing.title, "A");
        assert_eq!(merged.listing.price.unwrap().amount, dec!(100));

        let fields: Vec<_> = result.conflicts.iter().map(|c| c.field.as_str()).collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"price"));
        for c in &result.conflicts {
            assert_eq!(c.resolution_method, "highest_tier");
        }
    }

    #[test]
    fn agreement_boost_caps_at_point_one() {
        let mut sources = Vec::new();
        for i in 0..5 {
            sources.push(with_provenance(
                listing(Marketplace::Ebay, "Same", dec!(50), "USD"),
                Channel::OfficialApi,
                &format!("api@{i}"),
                0.85,
            ));
        }
        let result = merge(sources);
        let merged = result.merged.unwrap();
        assert_eq!(merged.listing.confidence, 0.95); // 0.85 + min(0.10, 4*0.03=0.12) = 0.95
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn two_agreeing_sources_boost_by_0_03() {
        let a = with_provenance(
            listing(Marketplace::Ebay, "Same", dec!(50), "USD"),
            Channel::OfficialApi,
            "api@1",
            0.85,
        );
        let b = with_provenance(
            listing(Marketplace::Ebay, "Same", dec!(50), "USD"),
            Channel::Scraping,
            "scrape@1",
            0.80,
        );
        let result = merge(vec![a, b]);
        let merged = result.merged.unwrap();
        assert!((merged.listing.confidence - 0.88).abs() < 1e-9);
        assert_eq!(merged.correlated_sources.unwrap().len(), 2);
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn ties_in_tier_break_by_input_order() {
        let first = with_provenance(
            listing(Marketplace::Ebay, "First", dec!(1), "USD"),
            Channel::Scraping,
            "scrape@1",
            0.8,
        );
        let second = with_provenance(
            listing(Marketplace::Ebay, "Second", dec!(2), "USD"),
            Channel::Scraping,
            "scrape@2",
            0.8,
        );
        let result = merge(vec![first, second]);
        assert_eq!(result.merged.unwrap().listing.title, "First");
    }
}
