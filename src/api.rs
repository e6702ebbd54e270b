use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::MLB_SPORT_ID;
use crate::feed::{LiveFeed, PeopleResponse, ScheduleResponse};
use crate::types::{GameId, GameSnapshot, GameStatus, PlayerId};

/// Read access to game data. Implemented by [`StatsClient`] against the
/// MLB Stats API and by in-memory fakes in tests.
#[allow(async_fn_in_trait)]
pub trait StatsSource {
    /// Game ID → status for every game on `date`. Failures are logged and
    /// yield an empty map.
    async fn game_statuses(&self, date: NaiveDate) -> BTreeMap<GameId, GameStatus>;

    /// Fresh snapshot of one game from the live feed.
    async fn game_snapshot(&self, game_id: GameId) -> Result<GameSnapshot>;

    /// Display name of a player. Failures are logged and yield an empty name.
    async fn player_name(&self, player_id: PlayerId) -> String;
}

/// HTTP client for the MLB Stats API.
pub struct StatsClient {
    http: reqwest::Client,
    base: Url,
}

impl StatsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid base URL {base_url}"))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("invalid endpoint path {path}"))
    }

    /// URL of the day's schedule, e.g. `/api/v1/schedule/games/?sportId=1&date=09/11/2021`.
    pub fn schedule_url(&self, date: NaiveDate) -> Result<Url> {
        let mut url = self.endpoint("/api/v1/schedule/games/")?;
        url.query_pairs_mut()
            .append_pair("sportId", &MLB_SPORT_ID.to_string())
            .append_pair("date", &date.format("%m/%d/%Y").to_string());
        Ok(url)
    }

    pub fn live_feed_url(&self, game_id: GameId) -> Result<Url> {
        self.endpoint(&format!("/api/v1.1/game/{game_id}/feed/live"))
    }

    pub fn person_url(&self, player_id: PlayerId) -> Result<Url> {
        self.endpoint(&format!("/api/v1/people/{player_id}"))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {url} returned an error status"))?;
        resp.json()
            .await
            .with_context(|| format!("failed to decode response from {url}"))
    }

    /// Fetch the schedule for `date` as game ID → status.
    pub async fn fetch_schedule(&self, date: NaiveDate) -> Result<BTreeMap<GameId, GameStatus>> {
        let resp: ScheduleResponse = self.get_json(self.schedule_url(date)?).await?;
        let statuses = resp.into_statuses();
        debug!("Fetched {} scheduled games for {date}", statuses.len());
        Ok(statuses)
    }

    pub async fn fetch_live_feed(&self, game_id: GameId) -> Result<GameSnapshot> {
        let feed: LiveFeed = self.get_json(self.live_feed_url(game_id)?).await?;
        Ok(feed.into_snapshot(game_id))
    }

    pub async fn fetch_player_name(&self, player_id: PlayerId) -> Result<String> {
        let resp: PeopleResponse = self.get_json(self.person_url(player_id)?).await?;
        resp.into_name()
            .with_context(|| format!("no person found for id {player_id}"))
    }
}

impl StatsSource for StatsClient {
    async fn game_statuses(&self, date: NaiveDate) -> BTreeMap<GameId, GameStatus> {
        match self.fetch_schedule(date).await {
            Ok(statuses) => statuses,
            Err(e) => {
                warn!("Failed to fetch schedule for {date}: {e:#}");
                BTreeMap::new()
            }
        }
    }

    async fn game_snapshot(&self, game_id: GameId) -> Result<GameSnapshot> {
        self.fetch_live_feed(game_id).await
    }

    async fn player_name(&self, player_id: PlayerId) -> String {
        match self.fetch_player_name(player_id).await {
            Ok(name) => name,
            Err(e) => {
                warn!("Failed to look up player {player_id}: {e:#}");
                String::new()
            }
        }
    }
}
