//! update-status: publish the tracker service's run state as the account's
//! profile location ("Status: active", "Status: inactive" or "?").

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use no_hitter_tracker::TWITTER_API_BASE;
use no_hitter_tracker::config::{AppConfig, CONFIG_PATH};
use no_hitter_tracker::service_status::{location_text, unit_state};
use no_hitter_tracker::twitter::TwitterClient;

#[derive(Parser)]
#[command(name = "update-status", about = "Mirror the tracker service state to the profile location")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    /// systemd unit to report on (defaults to `settings.service_name`)
    #[arg(long)]
    service: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(&args.config);
    config.twitter.apply_env_overrides();

    let unit = args.service.unwrap_or_else(|| config.settings.service_name.clone());
    let state = match unit_state(&unit).await {
        Ok(state) => state,
        Err(e) => {
            warn!("Failed to query {unit}: {e:#}");
            String::new()
        }
    };
    let location = location_text(&state);

    let client = TwitterClient::new(
        TWITTER_API_BASE,
        config.twitter,
        config.settings.request_timeout(),
    )?;
    match client.update_profile_location(&location).await {
        Ok(()) => println!("Status successfully updated: {location}"),
        Err(e) => println!("An error occurred and the status was not updated: {e:#}"),
    }

    Ok(())
}
