//! heat-plan - command-line front end for the heat-mitigation engine
//!
//! Prints engine records as JSON on stdout; diagnostics go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use heat_mitigation_core_rs::catalog::{find_sector, punjab_sectors};
use heat_mitigation_core_rs::config::get_config_schema;
use heat_mitigation_core_rs::{EngineConfig, InterventionMix, MitigationEngine, SectorProfile};

#[derive(Parser, Debug)]
#[command(name = "heat-plan")]
#[command(version)]
#[command(about = "Urban heat-mitigation planning calculator")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON coefficient file (defaults apply to omitted keys)
    #[arg(short, long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the built-in sectors
    Sectors,
    /// Simulate an intervention mix for a sector
    Simulate {
        #[arg(long)]
        sector: String,
        /// Albedo coverage fraction [0, 1]
        #[arg(long, default_value = "0")]
        albedo: f64,
        /// Green cover fraction [0, 1]
        #[arg(long, default_value = "0")]
        green: f64,
    },
    /// Recommend interventions for a sector and derive every outcome
    Plan {
        #[arg(long)]
        sector: String,
        /// Target temperature (°C)
        #[arg(long, default_value = "31")]
        target: f64,
    },
    /// Plan every built-in sector against one target
    Region {
        /// Target temperature (°C)
        #[arg(long, default_value = "31")]
        target: f64,
    },
    /// Classify heat-stress risk for a reading
    Risk {
        /// Temperature (°C)
        #[arg(long)]
        temp: f64,
        /// Relative humidity fraction [0, 1]
        #[arg(long)]
        humidity: f64,
    },
    /// Print documentation for every coefficient
    ConfigSchema,
    /// Load and validate a configuration file
    ValidateConfig,
}

fn load_engine(path: Option<&str>) -> Result<MitigationEngine> {
    let config = match path {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading config {}", path))?,
        None => EngineConfig::default(),
    };
    MitigationEngine::new(config).context("invalid engine configuration")
}

fn sector(name: &str) -> Result<SectorProfile> {
    find_sector(name)?.with_context(|| format!("unknown sector '{}' (try `heat-plan sectors`)", name))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Sectors => print_json(&punjab_sectors()?),
        Commands::ConfigSchema => {
            println!("{}", get_config_schema()?);
            Ok(())
        }
        Commands::ValidateConfig => {
            let path = args.config.context("--config required for validate-config")?;
            load_engine(Some(&path))?;
            eprintln!("[heat-plan] {} OK", path);
            Ok(())
        }
        Commands::Simulate {
            sector: name,
            albedo,
            green,
        } => {
            let engine = load_engine(args.config.as_deref())?;
            let mix = InterventionMix::new(albedo, green)?;
            print_json(&engine.simulate_sector(&sector(&name)?, &mix)?)
        }
        Commands::Plan {
            sector: name,
            target,
        } => {
            let engine = load_engine(args.config.as_deref())?;
            let report = engine.plan(&sector(&name)?, target)?;
            if !report.is_feasible() {
                eprintln!(
                    "[heat-plan] {}: target {}°C not reachable, {:.2}°C unmet",
                    report.sector,
                    target,
                    report.unmet_delta_c()
                );
            }
            print_json(&report)
        }
        Commands::Region { target } => {
            let engine = load_engine(args.config.as_deref())?;
            print_json(&engine.plan_region(&punjab_sectors()?, target)?)
        }
        Commands::Risk { temp, humidity } => {
            let engine = load_engine(args.config.as_deref())?;
            print_json(&engine.classify(temp, humidity)?)
        }
    }
}
