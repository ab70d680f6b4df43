use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use shopfinder::{
    nominatim::Nominatim,
    output::{describe, JsonFile},
    overpass::Overpass,
    search::{self, Outcome, Request},
    Config,
};

/// Find shops near a place whose name approximately matches a store name.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Store name to look for, e.g. "Monoprix"
    store_name: String,
    /// Place to search around [default: Paris, France]
    location: Option<String>,
    /// Search radius in metres [default: 5000]
    radius: Option<u32>,

    /// YAML file overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Lowest accepted name similarity, between 0 and 1
    #[arg(long)]
    min_similarity: Option<f64>,
    /// Most distinct names to keep
    #[arg(long)]
    max_results: Option<usize>,
    /// Where matched_shops_<store_name>.json is written
    #[arg(long)]
    output_dir: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(x) => x,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match resolve_config(&cli) {
        Ok(x) => x,
        Err(e) => {
            eprintln!("Invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("{config:?}");

    let request = Request {
        store_name: &cli.store_name,
        location: &config.location,
        radius: config.radius,
    };
    let sink = JsonFile::new(&config.output_dir);
    let result = search::run(
        &config,
        &request,
        &Nominatim::new(&config),
        &Overpass::new(&config),
        &sink,
        |outcome| print_outcome(&cli.store_name, outcome),
    );

    match result {
        Ok(outcome) => {
            if matches!(outcome, Outcome::Matched { .. }) {
                println!("Saved to {}", sink.path(&cli.store_name).display());
            }
            ExitCode::from(exit_status(&outcome))
        }
        // a failed run is reported, not signalled
        Err(e) => {
            println!("An error occurred: {e:#}");
            ExitCode::SUCCESS
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(x) = &cli.location {
        config.location = x.clone();
    }
    if let Some(x) = cli.radius {
        config.radius = x;
    }
    if let Some(x) = cli.min_similarity {
        config.min_similarity = x;
    }
    if let Some(x) = cli.max_results {
        config.max_results = x;
    }
    if let Some(x) = &cli.output_dir {
        config.output_dir = x.clone();
    }
    config.validate()?;
    Ok(config)
}

fn print_outcome(store_name: &str, outcome: &Outcome) {
    match outcome {
        Outcome::LocationNotFound => println!("Location not found."),
        Outcome::NoMatches { .. } => println!("No shops found matching '{store_name}'."),
        Outcome::Matched { center, shops } => {
            println!("Matched Shops for '{store_name}':");
            for shop in shops {
                println!("{}", describe(shop, center));
            }
        }
    }
}

fn exit_status(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::LocationNotFound => 1,
        Outcome::NoMatches { .. } | Outcome::Matched { .. } => 0,
    }
}
