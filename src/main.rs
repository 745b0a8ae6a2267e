use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use listingmux::app::Config;
use listingmux::cli::{Cli, Commands};
use listingmux::core::demo_adapters::{CsvExportAdapter, LlmFallbackAdapter, StaticScrapingAdapter};
use listingmux::core::orchestrator::{Orchestrator, RequestOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("warning: {e}, falling back to defaults");
        Config::default()
    });
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.init_logging();

    let orchestrator = Orchestrator::new();

    match cli.command {
        Commands::RegisterDemo(args) => {
            register_demo_adapters(&orchestrator, args.marketplace);
            info!(marketplace = %args.marketplace, "registered demo adapters");
            println!("registered demo adapters for {}", args.marketplace);
        }
        Commands::GetData(args) => {
            register_demo_adapters(&orchestrator, args.marketplace);
            let options = request_options(&args, &config);
            let result = tokio::select! {
                result = orchestrator.get_data(args.marketplace, &args.identifier, &options) => result,
                _ = tokio::signal::ctrl_c() => {
                    eprintln!("interrupted");
                    std::process::exit(130);
                }
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::GetAllSources(args) => {
            register_demo_adapters(&orchestrator, args.marketplace);
            let options = request_options(&args, &config);
            let result = tokio::select! {
                result = orchestrator.get_from_all_sources(args.marketplace, &args.identifier, &options) => result,
                _ = tokio::signal::ctrl_c() => {
                    eprintln!("interrupted");
                    std::process::exit(130);
                }
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Health => {
            let report = orchestrator.get_health_report().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn register_demo_adapters(orchestrator: &Orchestrator, marketplace: listingmux::core::domain::Marketplace) {
    orchestrator.register_adapter(marketplace, Arc::new(StaticScrapingAdapter::new(marketplace)));
    orchestrator.register_adapter(marketplace, Arc::new(CsvExportAdapter::new(marketplace)));
    orchestrator.register_adapter(marketplace, Arc::new(LlmFallbackAdapter::new(marketplace)));
}

fn request_options(args: &listingmux::cli::GetDataArgs, config: &Config) -> RequestOptions {
    let mut options = RequestOptions {
        timeout: Duration::from_millis(config.timeout_ms),
        required_confidence: config.required_confidence,
        allow_fallback: !args.no_fallback,
        ..RequestOptions::default()
    };
    if let Some(confidence) = args.required_confidence {
        options.required_confidence = confidence;
    }
    if !args.channels.is_empty() {
        options.include_channels = Some(args.channels.iter().copied().collect::<HashSet<_>>());
    }
    options
}
