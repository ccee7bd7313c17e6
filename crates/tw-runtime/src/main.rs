//! `trustwipe` - secure-erase orchestrator CLI.

use anyhow::{bail, Context, Result};
use clap::Parser;
use shared_types::SecretString;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;
use tracing::{error, info};
use tw_03_attempt_limiter::prune_task;
use tw_07_orchestrator::{WipeEngine, WipeEngineApi, WipeSubmission};
use tw_runtime::render::{device_line, event_line};
use tw_runtime::{build_terminal_engine, init_tracing, Cli, Command, LoadedConfig, TelemetryConfig};
use zeroize::Zeroize;

/// Environment variable checked for the wipe secret before prompting.
const SECRET_ENV: &str = "TRUSTWIPE_PASSWORD";

/// How often idle rate-limit buckets are dropped.
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &cli.log_level {
        telemetry = telemetry.with_log_level(level.clone());
    }
    init_tracing(&telemetry).context("failed to initialize logging")?;

    let config = LoadedConfig::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let engine = Arc::new(build_terminal_engine(&config).context("failed to start engine")?);
    tokio::spawn(prune_task(Arc::clone(engine.limiter()), PRUNE_INTERVAL));

    match cli.command {
        Command::Drives { json } => drives(&engine, json).await,
        Command::Details { id } => {
            let device = engine.get_drive_details(&id).await?;
            println!("{}", serde_json::to_string_pretty(&device)?);
            Ok(())
        }
        Command::Os => {
            let report = engine.check_os();
            println!("{} (supported: {})", report.platform, report.supported);
            Ok(())
        }
        Command::Info => {
            println!("{}", serde_json::to_string_pretty(&engine.get_system_info().await)?);
            Ok(())
        }
        Command::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.get_app_status())?);
            Ok(())
        }
        Command::Wipe {
            device,
            method,
            username,
            requester,
        } => {
            let secret = read_secret()?;
            let requester = requester.unwrap_or_else(|| username.clone());
            let submission =
                WipeSubmission::new(device, method, username, secret).with_requester(requester);
            wipe(engine, submission).await
        }
    }
}

async fn drives(engine: &WipeEngine, json: bool) -> Result<()> {
    let drives = engine.get_drives().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&drives)?);
    } else if drives.is_empty() {
        println!("No usable drives found");
    } else {
        for device in &drives {
            println!("{}", device_line(device));
        }
    }
    Ok(())
}

async fn wipe(engine: Arc<WipeEngine>, submission: WipeSubmission) -> Result<()> {
    let mut events = engine.start_wipe(submission);
    let mut outcome = None;

    while let Some(event) = events.next().await {
        println!("{}", event_line(&event));
        if let Some(done) = event.outcome() {
            outcome = Some(done.clone());
        }
    }

    match outcome {
        Some(outcome) if outcome.is_success() => {
            info!(request_id = %outcome.request_id, status = %outcome.status, "Wipe finished");
            Ok(())
        }
        Some(outcome) => bail!("wipe {}: {}", outcome.status, outcome.message),
        None => {
            error!("Status stream ended without an outcome");
            bail!("wipe ended without an outcome")
        }
    }
}

/// Secret from the environment, or one line from stdin.
fn read_secret() -> Result<SecretString> {
    if let Ok(secret) = std::env::var(SECRET_ENV) {
        return Ok(SecretString::from(secret));
    }

    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password")?;
    let secret = SecretString::from(line.trim_end_matches(['\r', '\n']).to_string());
    line.zeroize();
    Ok(secret)
}
