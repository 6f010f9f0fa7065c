//! Sarathi - simulated mission run
//!
//! Drives a scripted navigator around a grid road network under the
//! mission commander until the mission quits, aborts, or runs out of
//! cycles.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, info};

use sarathi::sim::{self, SimulationOutcome};
use sarathi::{Behavior, Result, SarathiConfig, SarathiError};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (default: sarathi.toml if present)
    config: Option<PathBuf>,

    /// Override the simulation cycle limit
    #[arg(short, long)]
    max_cycles: Option<u32>,

    /// Pace cycles at the configured control rate
    #[arg(short, long)]
    realtime: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    let directive: tracing_subscriber::filter::Directive = "sarathi=info"
        .parse()
        .map_err(|e| SarathiError::Config(format!("Bad log directive: {}", e)))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            SarathiConfig::load(path)?
        }
        None if Path::new("sarathi.toml").exists() => {
            info!("Loading configuration from sarathi.toml");
            SarathiConfig::load(Path::new("sarathi.toml"))?
        }
        None => {
            info!("Using default configuration");
            SarathiConfig::default()
        }
    };

    if let Some(max_cycles) = args.max_cycles {
        config.simulation.max_cycles = max_cycles;
    }

    info!("Sarathi v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Mission from {} through {} checkpoints at {:.1} Hz",
        config.simulation.start,
        config.simulation.checkpoints.len(),
        config.commander.cycle_hz
    );

    let pacing = args.realtime.then(|| config.cycle_period());
    let outcome = sim::run(&config, pacing)?;
    report(&outcome);

    if outcome.behavior == Behavior::Abort {
        error!("Mission aborted");
        return Err(SarathiError::Aborted(outcome.cycles));
    }
    Ok(())
}

fn report(outcome: &SimulationOutcome) {
    info!(
        "Finished after {} cycles: {} in state {} at {}",
        outcome.cycles, outcome.behavior, outcome.state, outcome.position
    );
    info!(
        "{} checkpoints reached, {} blockages, {} plans",
        outcome.checkpoints_reached, outcome.blockages, outcome.plans
    );
}
