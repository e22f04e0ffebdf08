use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};

use nearby_finder::api::{ApiListing, AppState};
use nearby_finder::listings::{ContactLinks, DISCLAIMER_BODY, DISCLAIMER_TITLE};
use nearby_finder::{FinderConfig, ListingLoader, ListingRanker, LocationResolver, logging, web};

#[derive(Parser)]
#[command(
    name = "nearby-finder",
    version,
    about = "Find nearby approved service listings ranked by distance"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search listings around a center point
    Search(SearchArgs),
    /// Serve the JSON API
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the disclaimer
    Disclaimer,
}

#[derive(Args)]
struct SearchArgs {
    /// Text matched against name, services and address
    #[arg(short, long, default_value = "")]
    query: String,

    /// Only show listings within this many kilometers
    #[arg(short, long, allow_negative_numbers = true)]
    radius: Option<f64>,

    /// Search center as "lat,lng" (defaults to the configured center)
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
    at: Option<String>,

    /// Maximum number of results to print
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => FinderConfig::load_from_path(Some(path.clone())),
        None => FinderConfig::load(),
    }
    .context("Failed to load configuration")?;

    logging::init(&config.logging, cli.verbose);
    debug!("Using configuration: {:?}", config);

    match cli.command {
        Command::Search(args) => search(&config, args).await,
        Command::Serve { port } => {
            let listings = ListingLoader::load(&config.listings).await;
            let state = AppState::new(listings, config.search.clone());
            web::run(port.unwrap_or(config.server.port), state).await
        }
        Command::Disclaimer => {
            println!("{DISCLAIMER_TITLE}\n\n{DISCLAIMER_BODY}");
            Ok(())
        }
    }
}

async fn search(config: &FinderConfig, args: SearchArgs) -> Result<()> {
    if let Some(radius) = args.radius {
        if radius > config.search.max_radius_km {
            bail!(
                "Invalid input: radius cannot exceed {} km",
                config.search.max_radius_km
            );
        }
    }

    let listings = ListingLoader::load(&config.listings).await;
    let center = LocationResolver::resolve(args.at.as_deref(), config.search.default_center());
    let ranking = ListingRanker::rank(&listings, &center, &args.query, args.radius)?;

    for invalid in &ranking.skipped {
        warn!("Skipped listing {}: {}", invalid.id, invalid.reason);
    }

    let limit = args.limit.unwrap_or(config.search.max_results);
    let results: Vec<_> = ranking.results.into_iter().take(limit).collect();

    if args.json {
        let api_listings: Vec<ApiListing> = results.into_iter().map(ApiListing::from).collect();
        println!("{}", serde_json::to_string_pretty(&api_listings)?);
        return Ok(());
    }

    println!(
        "Found {} listings near {}:",
        results.len(),
        center.format_coordinates()
    );
    for (index, ranked) in results.iter().enumerate() {
        let listing = &ranked.listing;
        println!(
            "  {}. {} ({:.2} km) - {}",
            index + 1,
            listing.name,
            ranked.distance_km,
            listing.address
        );
        if !listing.services.is_empty() {
            println!("     Services: {}", listing.services.join(", "));
        }

        let links = ContactLinks::for_listing(listing);
        let link_parts: Vec<String> = [
            links.phone.map(|l| format!("Call: {l}")),
            links.whatsapp.map(|l| format!("WhatsApp: {l}")),
            links.maps.map(|l| format!("Map: {l}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !link_parts.is_empty() {
            println!("     {}", link_parts.join("  "));
        }
    }

    Ok(())
}
