use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::api::StatsSource;
use crate::classifier::classify;
use crate::config::SettingsConfig;
use crate::dispatcher::Dispatcher;
use crate::state::TrackerState;
use crate::twitter::Publisher;
use crate::types::{Announcement, GameId, GameSnapshot, GameStatus, Side};

/// Whether a game needs a fresh snapshot this tick: it is live, or it is
/// final with an announced bid that has not been closed out.
pub fn needs_refresh(game: &GameSnapshot, state: &TrackerState) -> bool {
    match game.status {
        GameStatus::Live => true,
        GameStatus::Final => state.is_open(game.home.team.id) || state.is_open(game.away.team.id),
        GameStatus::Scheduled => false,
    }
}

/// Drives one day of games: owns the game list, the latest schedule and the
/// announcement state.
pub struct Poller<'a, S, P> {
    stats: &'a S,
    dispatcher: Dispatcher<'a, S, P>,
    date: NaiveDate,
    games: Vec<GameSnapshot>,
    statuses: BTreeMap<GameId, GameStatus>,
    pub state: TrackerState,
}

impl<'a, S: StatsSource, P: Publisher> Poller<'a, S, P> {
    pub fn new(stats: &'a S, publisher: &'a P, settings: &SettingsConfig, date: NaiveDate) -> Self {
        Self {
            stats,
            dispatcher: Dispatcher::new(
                stats,
                publisher,
                settings.innings_to_alert,
                settings.debug_mode,
            ),
            date,
            games: Vec::new(),
            statuses: BTreeMap::new(),
            state: TrackerState::new(),
        }
    }

    pub fn games(&self) -> &[GameSnapshot] {
        &self.games
    }

    /// Load the day's game list. The list is never rebuilt afterwards.
    pub async fn start(&mut self) -> usize {
        info!("Date: {}", self.date.format("%m/%d/%Y"));
        info!("Scanning games...");
        self.refresh_schedule().await;

        for (&game_id, &status) in &self.statuses {
            let mut snapshot = match self.stats.game_snapshot(game_id).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("Failed to load game {game_id}: {e:#}");
                    GameSnapshot::new(game_id, status)
                }
            };
            snapshot.status = status;
            self.games.push(snapshot);
        }

        info!("Tracking {} game(s)", self.games.len());
        self.games.len()
    }

    /// Re-fetch the schedule so status changes (notably games going final)
    /// are seen on the next tick.
    pub async fn refresh_schedule(&mut self) {
        let statuses = self.stats.game_statuses(self.date).await;
        if statuses != self.statuses {
            debug!("Schedule statuses: {statuses:?}");
            self.statuses = statuses;
        }
    }

    /// One pass over the day's games. Returns every announcement made.
    pub async fn tick(&mut self) -> Vec<Announcement> {
        let mut announcements = Vec::new();

        for game in &mut self.games {
            // Games missing from a failed schedule fetch keep their last status.
            if let Some(&status) = self.statuses.get(&game.game_id) {
                game.status = status;
            }

            if !needs_refresh(game, &self.state) {
                continue;
            }

            match self.stats.game_snapshot(game.game_id).await {
                Ok(snapshot) => *game = snapshot,
                Err(e) => {
                    warn!(
                        "Failed to refresh game {}, keeping previous snapshot: {e:#}",
                        game.game_id
                    );
                }
            }

            for side in [Side::Home, Side::Away] {
                let team = game.side(side);
                let status = classify(team.team.id, &team.pitching, team.pitcher_count, &self.state);
                debug!(
                    "game_id={} side={} team_id={} pitchers={} status={}",
                    game.game_id,
                    side.label(),
                    team.team.id,
                    team.pitcher_count,
                    status.map_or_else(|| "none".to_string(), |s| s.to_string()),
                );

                if let Some(status) = status {
                    if let Some(announcement) = self
                        .dispatcher
                        .dispatch(&mut self.state, game, side, status)
                        .await
                    {
                        announcements.push(announcement);
                    }
                }
            }
        }

        announcements
    }
}
