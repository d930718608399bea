use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use listing_scout::scrapers::types::DEFAULT_USER_AGENT;
use listing_scout::{ExtractResponse, Extractor, ExtractorConfig};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Pull listing details out of vacation rental pages
#[derive(Debug, Parser)]
#[command(name = "listing-scout", version)]
struct Args {
    /// Listing page URLs
    #[arg(required = true)]
    urls: Vec<String>,

    /// Give up on a page after this many seconds
    #[arg(long, env = "SCOUT_TIMEOUT_SECS", default_value_t = 15)]
    timeout_secs: u64,

    #[arg(long, env = "SCOUT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Where to write the JSON report
    #[arg(long, env = "SCOUT_OUTPUT", default_value = "scraped_listings.json")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct ScrapeReport {
    url: String,
    scraped_at: DateTime<Utc>,
    #[serde(flatten)]
    response: ExtractResponse,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = ExtractorConfig::default()
        .with_user_agent(args.user_agent)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let extractor = Arc::new(Extractor::with_config(config).context("Failed to create extractor")?);

    info!("Extracting {} listing(s)", args.urls.len());

    let mut tasks = JoinSet::new();
    for (idx, url) in args.urls.into_iter().enumerate() {
        let extractor = Arc::clone(&extractor);
        tasks.spawn(async move {
            let response = extractor.respond(&url).await;
            (
                idx,
                ScrapeReport {
                    url,
                    scraped_at: Utc::now(),
                    response,
                },
            )
        });
    }

    let mut reports = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        reports.push(joined.context("Extraction task panicked")?);
    }
    reports.sort_by_key(|(idx, _)| *idx);
    let reports: Vec<ScrapeReport> = reports.into_iter().map(|(_, report)| report).collect();

    for (i, report) in reports.iter().enumerate() {
        println!("{}. {}", i + 1, report.url);
        match (&report.response.data, &report.response.error) {
            (Some(listing), _) if listing.is_empty() => {
                println!("   Nothing recovered, fill the listing in by hand");
            }
            (Some(listing), _) => {
                println!("   {}", listing.title.as_deref().unwrap_or("(untitled)"));
                if let Some(price) = listing.price {
                    println!("   Price: {} €", price);
                }
                if let Some(address) = &listing.address {
                    println!("   Address: {}", address);
                }
                if let (Some(lat), Some(lng)) = (listing.lat, listing.lng) {
                    println!("   Location: {}, {}", lat, lng);
                }
                if let Some(bedrooms) = listing.bedrooms {
                    println!("   Bedrooms: {}", bedrooms);
                }
                if let Some(beds) = listing.beds {
                    println!("   Beds: {}", beds);
                }
                println!(
                    "   Pool: {:?}, jacuzzi: {:?}, BBQ: {:?}",
                    listing.has_pool, listing.has_jacuzzi, listing.has_bbq
                );
            }
            (None, error) => {
                println!("   Failed: {}", error.as_deref().unwrap_or("unknown error"));
            }
        }
        println!();
    }

    let json = serde_json::to_string_pretty(&reports)?;
    tokio::fs::write(&args.output, json)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("💾 Saved {} report(s) to {}", reports.len(), args.output.display());

    Ok(())
}
