//! Study Hall
//!
//! Runs one admission-control simulation and logs its report.
//!
//! # Startup Flow
//!
//! 1. Initialize tracing
//! 2. Load configuration from environment
//! 3. Read the population size (environment, else interactive prompt)
//! 4. Run the supervisor until the hall drains or Ctrl+C interrupts it
//! 5. Log the report as JSON; exit non-zero on failure

#![warn(clippy::pedantic)]

use std::sync::Arc;

use study_hall::config::Config;
use study_hall::console::{ConsolePopulation, ConsoleRenderer, PopulationSource};
use study_hall::errors::HallError;
use study_hall::hall::Supervisor;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_hall=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!(error = %e, exit_code = e.exit_code(), "Study hall failed");
        std::process::exit(e.exit_code());
    }
}

async fn run() -> Result<(), HallError> {
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        HallError::from(e)
    })?;

    info!(
        sim_id = %config.sim_id,
        population = ?config.population,
        min_study_seconds = config.min_study_seconds,
        max_study_seconds = config.max_study_seconds,
        release_pacing_ms = config.release_pacing_ms,
        arrival_pacing_ms = config.arrival_pacing_ms,
        seed = ?config.seed,
        "Configuration loaded successfully"
    );

    let population = match config.population {
        Some(population) => population,
        None => tokio::task::spawn_blocking(|| ConsolePopulation::stdio().read_population_size())
            .await
            .map_err(|e| HallError::Internal(format!("population prompt task failed: {e}")))??,
    };

    let supervisor = Supervisor::new(config, Arc::new(ConsoleRenderer::stdout()));
    tokio::spawn(interrupt_on_signal(supervisor.cancel_token()));

    let report = supervisor.run(population).await?;

    match serde_json::to_string(&report) {
        Ok(json) => info!(report = %json, "Simulation report"),
        Err(e) => error!(error = %e, "Failed to serialize simulation report"),
    }
    Ok(())
}

/// Cancel the simulation on Ctrl+C or SIGTERM.
async fn interrupt_on_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        #[expect(
            clippy::expect_used,
            reason = "Signal handler installation is critical - panic is appropriate if it fails"
        )]
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        #[expect(
            clippy::expect_used,
            reason = "Signal handler installation is critical - panic is appropriate if it fails"
        )]
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
        () = cancel_token.cancelled() => return,
    }

    info!("Interrupt received, stopping simulation");
    cancel_token.cancel();
}
