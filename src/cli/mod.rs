//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::channel::Channel;
use crate::core::domain::Marketplace;

/// listingmux - multi-channel marketplace listing orchestrator.
#[derive(Parser, Debug)]
#[command(name = "listingmux")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the configured log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register the three demo adapters (static scraping, CSV export, LLM
    /// fallback) for a marketplace.
    RegisterDemo(RegisterDemoArgs),

    /// Fetch one listing, walking the fallback chain.
    GetData(GetDataArgs),

    /// Fetch one listing from every admitted source and merge the results.
    GetAllSources(GetDataArgs),

    /// Print the health report for every registered adapter.
    Health,
}

#[derive(Parser, Debug)]
pub struct RegisterDemoArgs {
    /// Marketplace to register the demo adapters under.
    #[arg(long, value_enum, default_value = "ebay")]
    pub marketplace: Marketplace,
}

#[derive(Parser, Debug)]
pub struct GetDataArgs {
    /// Marketplace to query.
    #[arg(long, value_enum, default_value = "ebay")]
    pub marketplace: Marketplace,

    /// Opaque listing identifier (and, for the demo adapters, the inline
    /// content to parse).
    #[arg(long)]
    pub identifier: String,

    /// Minimum acceptable confidence, overriding the configured default.
    #[arg(long)]
    pub required_confidence: Option<f64>,

    /// Disable falling back past the first attempted source.
    #[arg(long)]
    pub no_fallback: bool,

    /// Restrict to these channels only (repeatable).
    #[arg(long = "channel", value_enum)]
    pub channels: Vec<Channel>,
}

impl clap::ValueEnum for Marketplace {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Marketplace::Ebay,
            Marketplace::Amazon,
            Marketplace::Walmart,
            Marketplace::Etsy,
            Marketplace::Custom,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.to_string()))
    }
}

impl clap::ValueEnum for Channel {
    fn value_variants<'a>() -> &'a [Self] {
        &Channel::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.to_string()))
    }
}
