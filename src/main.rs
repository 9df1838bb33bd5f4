//! Portfolio roll-up simulator
//!
//! # Architecture
//! - **core**: Node arena and hierarchy store
//! - **hot_path**: Readiness, valuation and upward propagation
//! - **io**: CSV definition/price sources and the result sink
//! - **engine**: Run orchestration
//! - **infrastructure**: Cold path (config, logging, metrics)

use anyhow::Context;
use portfolio_sim::infrastructure::logging::init_logging;
use portfolio_sim::{Config, Simulator};

fn main() -> anyhow::Result<()> {
    // Load config or use defaults
    let config = Config::load().context("failed to load configuration")?;

    // Guards must outlive every log call
    let _guards = init_logging(&config.logging).context("failed to initialize logging")?;

    tracing::info!(target: "engine", "Starting portfolio simulator...");

    let summary = Simulator::run_files(&config.simulation).with_context(|| {
        format!(
            "simulation failed (portfolios: {}, prices: {})",
            config.simulation.portfolios_path.display(),
            config.simulation.prices_path.display()
        )
    })?;

    tracing::info!(target: "engine", summary = %summary.to_json(), "Simulation complete");
    Ok(())
}
