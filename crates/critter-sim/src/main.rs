//! Headless driver: runs a critter world on a timer and reports the scores.

use anyhow::{Context, Result};
use critter_core::{DriverConfig, Pace};
use critter_sim::{telemetry, Driver};
use critter_species::Roster;
use critter_world::Engine;
use parking_lot::Mutex;
use rand::RngCore;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;

    telemetry::init_telemetry(config.json_logs)?;

    info!(
        seed = config.engine.seed,
        width = config.engine.world.width,
        height = config.engine.world.height,
        population = config.engine.initial_population,
        speed = config.speed,
        "Starting critter-sim"
    );

    let engine = Engine::new(config.engine.clone(), Roster::with_builtins())
        .context("failed to build the world")?;
    let driver = Arc::new(Mutex::new(Driver::new(engine, Pace::new(config.speed))));

    let stopper = driver.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        stopper.lock().pause();
    });

    driver.lock().play();
    run_loop(&driver, &config).await;

    info!("Shutting down");

    let driver = driver.lock();
    for line in driver.report() {
        info!("{}", line);
    }
    let summary = driver.summary();
    print!("{}", driver.engine().render_text());
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Config file from the first argument, else defaults. `CRITTER_SEED`
/// overrides the seed either way.
fn load_config() -> Result<DriverConfig> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => DriverConfig::load(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => DriverConfig::default(),
    };

    if let Ok(raw) = std::env::var("CRITTER_SEED") {
        config.engine.seed = raw
            .trim()
            .parse()
            .with_context(|| format!("CRITTER_SEED is not a number: {raw}"))?;
    }

    Ok(config)
}

/// Play rounds until paused, out of turns or out of critters
async fn run_loop<R: RngCore>(driver: &Mutex<Driver<R>>, config: &DriverConfig) {
    let mut next_report = config.report_every;

    loop {
        let delay = {
            let driver = driver.lock();
            if !driver.is_running() {
                break;
            }
            driver.pace().delay()
        };
        tokio::time::sleep(delay).await;

        let mut driver = driver.lock();
        if !driver.is_running() {
            break;
        }
        driver.turn();

        let turn = driver.engine().turn_count();
        if config.report_every > 0 && turn >= next_report {
            info!(turn, population = driver.engine().population(), "Scoreboard");
            for line in driver.report() {
                info!("  {}", line);
            }
            next_report = (turn / config.report_every + 1) * config.report_every;
        }

        if let Some(max) = config.max_turns {
            if turn >= max {
                info!(turn, max_turns = max, "Turn limit reached");
                driver.pause();
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
