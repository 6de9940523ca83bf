//! CRUD probe - binary entry point
//!
//! Runs the sequence once against the configured endpoint. Exits non-zero
//! with every failed check listed when any step failed.

use anyhow::Context;
use crud_probe::{config::Config, logging, CrudProbe};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let _logging_guard =
        logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = config.target.base_url,
        "Starting CRUD probe"
    );

    let probe = CrudProbe::from_config(&config).context("Failed to build HTTP client")?;
    let ledger = probe.run_crud_sequence().await;

    ledger.assert_all().context("CRUD sequence failed")?;

    tracing::info!("CRUD sequence passed");
    Ok(())
}
