//! setup-account: first-time setup for the posting account.
//!
//! Reads the four OAuth 1.0a credentials (hidden input by default), verifies
//! them against the Twitter/X API, prints the account they belong to, and
//! saves them into the config file. Existing settings are kept; a missing
//! config file is created with defaults.
//!
//! Use the flags only for scripted/CI use, since they end up in shell history.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use no_hitter_tracker::TWITTER_API_BASE;
use no_hitter_tracker::config::{AppConfig, CONFIG_PATH, TwitterConfig};
use no_hitter_tracker::twitter::TwitterClient;

#[derive(Parser)]
#[command(
    name = "setup-account",
    about = "Verify Twitter credentials and save them to config.toml"
)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    #[arg(long)]
    consumer_key: Option<String>,

    #[arg(long)]
    consumer_secret: Option<String>,

    #[arg(long)]
    access_token: Option<String>,

    #[arg(long)]
    access_token_secret: Option<String>,
}

fn read_value(flag: Option<String>, prompt: &str) -> Result<String> {
    let value = match flag {
        Some(value) => value,
        None => rpassword::prompt_password(prompt)
            .with_context(|| format!("failed to read {}", prompt.trim_end_matches(": ")))?,
    };
    let value = value.trim().to_string();
    if value.is_empty() {
        bail!("{} cannot be empty", prompt.trim_end_matches(": "));
    }
    Ok(value)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_path();

    let mut app_config = if config_path.exists() {
        AppConfig::load(config_path)?
    } else {
        AppConfig::default()
    };

    println!("=== No-Hitter Tracker: Account Setup ===\n");

    // ── Step 1: Read credentials ───────────────────────────────────
    let twitter = TwitterConfig {
        consumer_key: read_value(cli.consumer_key, "Consumer key: ")?,
        consumer_secret: read_value(cli.consumer_secret, "Consumer secret: ")?,
        access_token: read_value(cli.access_token, "Access token: ")?,
        access_token_secret: read_value(cli.access_token_secret, "Access token secret: ")?,
    };

    // ── Step 2: Verify against the API ─────────────────────────────
    println!("Verifying credentials...");
    let client = TwitterClient::new(
        TWITTER_API_BASE,
        twitter.clone(),
        app_config.settings.request_timeout(),
    )?;
    let account = client
        .verify_credentials()
        .await
        .context("credential check failed; verify the keys and that the app has read/write access")?;
    println!("  Authenticated as @{} ({})", account.screen_name, account.name);
    if let Some(location) = account.location.as_deref().filter(|l| !l.is_empty()) {
        println!("  Current location: {location}");
    }
    println!();

    // ── Step 3: Save config ────────────────────────────────────────
    println!("Saving credentials to {}...", config_path.display());
    app_config.twitter = twitter;
    app_config.save(config_path)?;
    println!("  Config updated successfully");
    println!();

    println!("=== Setup Complete ===");
    println!();
    println!("Next steps:");
    println!("  set `debug_mode = true` under [settings] for a rehearsal run, then:");
    println!("  cargo run --bin nohittertracker");

    Ok(())
}
