//! nohittertracker: poll today's MLB games and post no-hitter updates.
//!
//! Loads the day's schedule once at startup, so the process is meant to be
//! restarted daily (systemd timer or cron).

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{error, info, warn};

use no_hitter_tracker::api::StatsClient;
use no_hitter_tracker::config::{AppConfig, CONFIG_PATH};
use no_hitter_tracker::poller::Poller;
use no_hitter_tracker::twitter::TwitterClient;
use no_hitter_tracker::{STATS_API_BASE, TWITTER_API_BASE};

#[derive(Parser)]
#[command(name = "nohittertracker", about = "Post MLB no-hitter and perfect game updates")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,
}

fn init_logging(path: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Logging is configured from the file, so report the load result after init.
    let loaded = AppConfig::load(&args.config);
    let mut config = loaded.as_ref().ok().cloned().unwrap_or_default();
    init_logging(&config.settings.log_path)?;
    match &loaded {
        Ok(_) => info!("Config data successfully loaded from {}", args.config.display()),
        Err(e) => error!("Error loading config data, using defaults: {e:#}"),
    }
    config.twitter.apply_env_overrides();

    let settings = &config.settings;
    info!("---CURRENT SETTINGS---");
    info!("Update interval: {} minutes", settings.poll_interval_minutes);
    info!("Num innings needed to alert: {} innings", settings.innings_to_alert);
    info!("Debug: {}", settings.debug_mode);

    if !settings.debug_mode && !config.twitter.is_complete() {
        warn!("Twitter credentials are incomplete; posts will fail until they are set");
    }

    let stats = StatsClient::new(STATS_API_BASE, settings.request_timeout())?;
    let twitter = TwitterClient::new(
        TWITTER_API_BASE,
        config.twitter.clone(),
        settings.request_timeout(),
    )?;

    let date = Local::now().date_naive();
    let mut poller = Poller::new(&stats, &twitter, settings, date);
    poller.start().await;

    let interval = settings.poll_interval();
    info!("Entering polling loop (interval: {interval:?}). Press Ctrl+C to stop.");

    loop {
        let announcements = poller.tick().await;
        if !announcements.is_empty() {
            info!("Tick made {} announcement(s)", announcements.len());
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
            _ = tokio::time::sleep(interval) => {}
        }

        poller.refresh_schedule().await;
    }

    Ok(())
}
