#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for the citizen safety risk map.
//!
//! Runs the neighborhood risk aggregation over an incident dataset file,
//! merges an exported snapshot of citizen reports into the map overlay, and
//! prints safety recommendations and the safe-point registry.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use temis_dataset::load_dataset;
use temis_map::{MapOverlay, all_safe_points, style::MarkerStyle};
use temis_reports::{REPORT_COLLECTION, ReportFeed};
use temis_risk::{AggregationConfig, aggregate, recommendations_for};
use temis_risk_models::RiskAssessment;

#[derive(Parser)]
#[command(name = "temis", about = "Citizen safety risk map tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify neighborhoods in an incident dataset into risk zones
    Zones {
        /// Incident dataset (JSON array of single-key objects)
        #[arg(long)]
        dataset: PathBuf,
        /// Aggregation settings TOML (defaults are built in)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build the full map overlay (zones, citizen reports, safe points) as JSON
    Overlay {
        /// Incident dataset (JSON array of single-key objects)
        #[arg(long)]
        dataset: PathBuf,
        /// Exported report documents (JSON object keyed by document ID)
        #[arg(long)]
        reports: Option<PathBuf>,
        /// Aggregation settings TOML (defaults are built in)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print safety recommendations for a risk tier
    Recommend {
        /// Tier name (`alto`, `medio`, `bajo`)
        #[arg(long)]
        tier: String,
        /// Incident count for the zone
        #[arg(long, default_value_t = 1)]
        count: u64,
    },
    /// List the registered safe points
    SafePoints,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Zones {
            dataset,
            config,
            json,
        } => {
            let assessment = assess_file(&dataset, config.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print_assessment(&assessment);
            }
        }
        Commands::Overlay {
            dataset,
            reports,
            config,
        } => {
            let assessment = assess_file(&dataset, config.as_deref())?;
            let feed = ReportFeed::new(REPORT_COLLECTION);
            if let Some(path) = reports {
                publish_report_file(&feed, &path)?;
            }

            let subscription = feed.subscribe();
            let snapshot = subscription.current();
            let overlay = MapOverlay::build(&assessment, &snapshot.reports, &all_safe_points());
            println!("{}", serde_json::to_string_pretty(&overlay)?);
        }
        Commands::Recommend { tier, count } => {
            for line in recommendations_for(&tier, count) {
                println!("{line}");
            }
        }
        Commands::SafePoints => {
            for point in all_safe_points() {
                let style = MarkerStyle::for_safe_point(point.kind);
                println!(
                    "{:>3}  {:<10} {:<34} {:>9.4} {:>10.4}  {}  [{}]",
                    point.id,
                    point.kind.to_string(),
                    point.name,
                    point.latitude,
                    point.longitude,
                    point.phone,
                    style.icon
                );
            }
        }
    }

    Ok(())
}

fn assess_file(
    dataset: &Path,
    config: Option<&Path>,
) -> Result<RiskAssessment, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => AggregationConfig::load(path)?,
        None => AggregationConfig::default(),
    };
    let dataset = load_dataset(dataset)?;
    Ok(aggregate(&dataset.records, &config))
}

fn publish_report_file(
    feed: &ReportFeed,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let documents: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&contents)?;
    let published = feed.publish_documents(documents);
    log::info!("Loaded {published} citizen reports from {}", path.display());
    Ok(())
}

fn print_assessment(assessment: &RiskAssessment) {
    let stats = &assessment.statistics;

    if assessment.is_empty() {
        println!("No risk zones: the dataset has no usable incident records.");
        return;
    }

    println!(
        "{} incidents across {} neighborhoods: {} alto, {} medio",
        stats.total_crimes, stats.total_colonias, stats.high_risk_zones, stats.medium_risk_zones
    );
    println!();

    for zone in &assessment.zones {
        println!(
            "{:<6} {:>6}  {:<48} ({:.5}, {:.5})  r={}m",
            zone.tier.to_string(),
            zone.crime_count,
            zone.name,
            zone.coordinate.latitude,
            zone.coordinate.longitude,
            zone.radius
        );
    }
}
