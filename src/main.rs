//! Scenario Gen - Entry Point
//!
//! Generates a scenario from a config file (or defaults) and writes a JSON
//! snapshot of the result.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scenario_gen::core::config::ScenarioConfig;
use scenario_gen::core::error::Result;
use scenario_gen::focus::FocusLibrary;
use scenario_gen::scenario::{generate_scenario, UnitLibrary};

/// Procedural scenario generator
#[derive(Parser, Debug)]
#[command(name = "scenario-gen")]
#[command(about = "Generate territories, power rankings and national focus trees")]
struct Args {
    /// Scenario config file (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Focus chain library (TOML); the built-in library is used when omitted
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Division template library (TOML); the built-in library is used when omitted
    #[arg(long)]
    units: Option<PathBuf>,

    /// Random seed, overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the JSON snapshot
    #[arg(long, default_value = "scenario_output.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scenario_gen=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let library = match &args.templates {
        Some(path) => FocusLibrary::load_file(path)?,
        None => FocusLibrary::embedded()?,
    };
    let units = match &args.units {
        Some(path) => UnitLibrary::load_file(path)?,
        None => UnitLibrary::embedded()?,
    };

    tracing::info!(
        "Generating {}x{} map with {} countries (seed {})",
        config.map.width,
        config.map.height,
        config.countries.count,
        config.seed
    );

    let output = generate_scenario(&config, &library, &units)?;

    std::fs::write(&args.output, output.to_json()?)?;

    println!("{}", output.summary());
    println!("\nFull output written to {}", args.output.display());

    Ok(())
}
