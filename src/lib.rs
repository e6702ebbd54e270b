pub mod api;
pub mod auth;
pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod feed;
pub mod poller;
pub mod reporter;
pub mod service_status;
pub mod state;
pub mod twitter;
pub mod types;

#[cfg(test)]
mod testing;

/// MLB Stats API base URL (public, no auth required)
pub const STATS_API_BASE: &str = "https://statsapi.mlb.com";

/// Sport identifier for Major League Baseball in the Stats API.
pub const MLB_SPORT_ID: u32 = 1;

/// Twitter/X API base URL
pub const TWITTER_API_BASE: &str = "https://api.twitter.com";

/// systemd unit the status updater reports on.
pub const SERVICE_NAME: &str = "nohittertracker.service";
