mod support;

use std::sync::Arc;

use listingmux::core::channel::Channel;
use listingmux::core::domain::Marketplace;
use listingmux::core::orchestrator::{Orchestrator, RequestOptions};
use listingmux::testkit::builders::{listing, with_provenance};
use listingmux::testkit::mock_adapter::{MockAdapter, MockOutcome};
use rust_decimal_macros::dec;

use support::register_mock;

#[tokio::test]
async fn disabling_an_adapter_excludes_it_from_subsequent_get_data_calls() {
    let orchestrator = Orchestrator::new();
    let api = register_mock(
        &orchestrator,
        Marketplace::Ebay,
        Channel::OfficialApi,
        MockOutcome::Success(with_provenance(
            listing(Marketplace::Ebay, "X", dec!(1), "USD"),
            Channel::OfficialApi,
            "api@1",
            0.9,
        )),
    );
    orchestrator.disable_adapter(Marketplace::Ebay, Channel::OfficialApi);

    let result = orchestrator.get_data_default(Marketplace::Ebay, "u").await;
    assert!(result.data.is_none());
    assert_eq!(api.call_count(), 0);

    let available = orchestrator.get_available_adapters(Marketplace::Ebay);
    let entry = available.iter().find(|a| a.channel == Channel::OfficialApi).unwrap();
    assert!(!entry.available);
}

#[tokio::test]
async fn filter_violations_never_appear_in_attempted_sources() {
    let orchestrator = Orchestrator::new();
    register_mock(
        &orchestrator,
        Marketplace::Ebay,
        Channel::Scraping,
        MockOutcome::Success(with_provenance(
            listing(Marketplace::Ebay, "X", dec!(1), "USD"),
            Channel::Scraping,
            "scrape@1",
            0.8,
        )),
    );
    register_mock(
        &orchestrator,
        Marketplace::Ebay,
        Channel::OfficialApi,
        MockOutcome::Success(with_provenance(
            listing(Marketplace::Ebay, "Y", dec!(1), "USD"),
            Channel::OfficialApi,
            "api@1",
            0.9,
        )),
    );

    let options = RequestOptions {
        preferred_tiers: vec![3],
        ..RequestOptions::default()
    };
    let result = orchestrator.get_data(Marketplace::Ebay, "u", &options).await;
    assert!(result
        .attempted_sources
        .iter()
        .all(|a| a.tier == 3));
}

#[tokio::test]
async fn registering_the_same_channel_twice_keeps_a_single_record() {
    let orchestrator = Orchestrator::new();
    orchestrator.register_adapter(
        Marketplace::Ebay,
        Arc::new(MockAdapter::new("scrape-v1", Channel::Scraping, Marketplace::Ebay).with_version("1.0")),
    );
    orchestrator.register_adapter(
        Marketplace::Ebay,
        Arc::new(MockAdapter::new("scrape-v2", Channel::Scraping, Marketplace::Ebay).with_version("2.0")),
    );

    let available = orchestrator.get_available_adapters(Marketplace::Ebay);
    assert_eq!(available.len(), 1);
}

#[tokio::test]
async fn default_fallback_chain_orders_by_tier_then_reliability() {
    let orchestrator = Orchestrator::new();
    orchestrator.register_adapter(
        Marketplace::Ebay,
        Arc::new(MockAdapter::new("llm", Channel::LlmExtraction, Marketplace::Ebay)),
    );
    orchestrator.register_adapter(
        Marketplace::Ebay,
        Arc::new(MockAdapter::new("api", Channel::OfficialApi, Marketplace::Ebay)),
    );
    orchestrator.register_adapter(
        Marketplace::Ebay,
        Arc::new(MockAdapter::new("scrape", Channel::Scraping, Marketplace::Ebay)),
    );

    assert_eq!(
        orchestrator.get_fallback_chain(Marketplace::Ebay),
        vec![Channel::OfficialApi, Channel::Scraping, Channel::LlmExtraction]
    );
}
