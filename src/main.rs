use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use site_ranker::config::Settings;
use site_ranker::models::{ErrorResponse, SearchRequest, SearchResponse, SiteType};
use site_ranker::services::{CatalogError, CatalogSource, JsonFileCatalog};
use site_ranker::{RankingError, SearchCriteria};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use validator::Validate;

/// Rank cultural heritage sites around a position
#[derive(Parser, Debug)]
#[command(name = "site-ranker", version, about)]
struct Cli {
    /// JSON file containing the site catalog (overrides catalog.path)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Configuration file (defaults to config/default.toml + config/local.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Your latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Your longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Text to look for in site names
    #[arg(short, long)]
    keywords: Option<String>,

    /// Preferred site type, e.g. museum or "archaeological site"
    #[arg(short = 't', long, value_parser = parse_site_type)]
    site_type: Option<SiteType>,

    /// Minimum average rating
    #[arg(short, long, default_value_t = 0.0)]
    min_rating: f64,

    /// Only consider sites within this radius
    #[arg(long)]
    max_distance_km: Option<f64>,

    /// Maximum number of results
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,
}

fn parse_site_type(s: &str) -> Result<SiteType, String> {
    s.parse()
}

#[derive(Debug, Error)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("no catalog given; pass --catalog or set catalog.path")]
    MissingCatalog,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::Validation(_) => "invalid_request",
            AppError::MissingCatalog => "missing_catalog",
            AppError::Catalog(_) => "catalog_unavailable",
            AppError::Ranking(RankingError::InvalidCoordinate { .. }) => "invalid_coordinate",
            AppError::Ranking(RankingError::InvalidCriteria(_)) => "invalid_criteria",
            AppError::Ranking(RankingError::InvalidSite { .. }) => "invalid_site",
            AppError::Encode(_) => "encode_error",
        }
    }
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    // Logs go to stderr so stdout stays clean for results
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn run(cli: Cli, settings: Settings) -> Result<(), AppError> {
    let request = SearchRequest {
        keywords: cli.keywords,
        site_type: cli.site_type,
        min_rating: cli.min_rating,
        user_latitude: cli.lat,
        user_longitude: cli.lon,
        max_distance_km: cli.max_distance_km,
        limit: cli.limit.or(settings.ranking.default_limit),
    };
    request.validate()?;
    let criteria = SearchCriteria::from(request);

    let catalog_path = cli
        .catalog
        .or_else(|| settings.catalog.path.as_ref().map(PathBuf::from))
        .ok_or(AppError::MissingCatalog)?;
    let sites = JsonFileCatalog::new(&catalog_path).sites()?;

    let engine = settings.ranking_engine();
    let ranking = engine.rank(sites, &criteria)?;

    info!(
        "Ranked {} of {} candidates ({} filtered out)",
        ranking.results.len(),
        ranking.total_candidates,
        ranking.filtered_out
    );

    let response = SearchResponse {
        results: ranking.results,
        total_candidates: ranking.total_candidates,
        filtered_out: ranking.filtered_out,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if response.results.is_empty() {
        println!("No sites match your search.");
    } else {
        for (rank, ranked) in response.results.iter().enumerate() {
            println!(
                "{:>3}. {:<40} {:<20} rating {:>4.1}  {:>8.2} km  score {:.3}",
                rank + 1,
                ranked.site.name,
                ranked.site.site_type,
                ranked.site.average_rating,
                ranked.distance_km,
                ranked.score
            );
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let json = cli.json;

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings);

    match run(cli, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Search failed: {}", e);
            if json {
                let body = ErrorResponse {
                    error: e.kind().to_string(),
                    message: e.to_string(),
                };
                if let Ok(encoded) = serde_json::to_string(&body) {
                    println!("{}", encoded);
                }
            }
            ExitCode::FAILURE
        }
    }
}
