//! In-memory fakes shared by the dispatcher and poller tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::Result;
use chrono::NaiveDate;

use crate::api::StatsSource;
use crate::twitter::Publisher;
use crate::types::{
    GameId, GameSnapshot, GameStatus, PitchingLine, PlayRecord, PlayerId, TeamInfo, TeamSide,
};

pub const HOME_TEAM: u64 = 10;
pub const AWAY_TEAM: u64 = 20;
pub const HOME_PITCHER: PlayerId = 100;
pub const AWAY_PITCHER: PlayerId = 200;

pub fn line(innings: &str, hits: u32, walks: u32, hit_by_pitch: u32) -> PitchingLine {
    PitchingLine {
        innings_pitched: innings.into(),
        hits,
        walks,
        hit_by_pitch,
    }
}

/// Game between "Home Team" (HOM) and "Away Team" (AWY). `home_line` is the
/// home team's pitching; the away team has already allowed hits.
pub fn game(game_id: GameId, status: GameStatus, home_line: PitchingLine, home_pitchers: usize) -> GameSnapshot {
    GameSnapshot {
        game_id,
        status,
        home: TeamSide {
            team: TeamInfo {
                id: HOME_TEAM,
                name: "Home Team".into(),
                abbreviation: "HOM".into(),
            },
            pitcher_count: home_pitchers,
            pitcher_id: Some(HOME_PITCHER),
            pitching: home_line,
        },
        away: TeamSide {
            team: TeamInfo {
                id: AWAY_TEAM,
                name: "Away Team".into(),
                abbreviation: "AWY".into(),
            },
            pitcher_count: 2,
            pitcher_id: Some(AWAY_PITCHER),
            pitching: line("6.0", 5, 2, 0),
        },
        plays: Vec::new(),
    }
}

/// Top-half play (home team pitching).
pub fn top_play(event_type: &str, inning: u32, outs: u32, batter: &str) -> PlayRecord {
    PlayRecord {
        result_type: "atBat".into(),
        event_type: event_type.into(),
        description: format!("{batter} {event_type}."),
        is_out: false,
        inning,
        is_top_inning: true,
        outs,
        batter_name: batter.into(),
        pitcher_name: "Home Pitcher".into(),
    }
}

#[derive(Default)]
pub struct FakeStats {
    pub statuses: RefCell<BTreeMap<GameId, GameStatus>>,
    pub snapshots: RefCell<HashMap<GameId, GameSnapshot>>,
    pub failing: RefCell<HashSet<GameId>>,
    names: HashMap<PlayerId, String>,
    name_lookups: Cell<usize>,
    snapshot_fetches: Cell<usize>,
}

impl FakeStats {
    pub fn with_name(mut self, id: PlayerId, name: &str) -> Self {
        self.names.insert(id, name.to_string());
        self
    }

    /// Set both the schedule status and the live snapshot of a game.
    pub fn set_game(&self, snapshot: GameSnapshot) {
        self.statuses
            .borrow_mut()
            .insert(snapshot.game_id, snapshot.status);
        self.snapshots
            .borrow_mut()
            .insert(snapshot.game_id, snapshot);
    }

    pub fn name_lookups(&self) -> usize {
        self.name_lookups.get()
    }

    pub fn snapshot_fetches(&self) -> usize {
        self.snapshot_fetches.get()
    }
}

impl StatsSource for FakeStats {
    async fn game_statuses(&self, _date: NaiveDate) -> BTreeMap<GameId, GameStatus> {
        self.statuses.borrow().clone()
    }

    async fn game_snapshot(&self, game_id: GameId) -> Result<GameSnapshot> {
        self.snapshot_fetches.set(self.snapshot_fetches.get() + 1);
        if self.failing.borrow().contains(&game_id) {
            anyhow::bail!("connection refused");
        }
        self.snapshots
            .borrow()
            .get(&game_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown game {game_id}"))
    }

    async fn player_name(&self, player_id: PlayerId) -> String {
        self.name_lookups.set(self.name_lookups.get() + 1);
        self.names.get(&player_id).cloned().unwrap_or_default()
    }
}

/// Records every publish attempt.
#[derive(Default)]
pub struct RecordingPublisher {
    posts: RefCell<Vec<String>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self {
            posts: RefCell::default(),
            fail: true,
        }
    }

    pub fn posts(&self) -> Vec<String> {
        self.posts.borrow().clone()
    }
}

impl Publisher for RecordingPublisher {
    async fn publish(&self, text: &str) -> Result<()> {
        self.posts.borrow_mut().push(text.to_string());
        if self.fail {
            anyhow::bail!("HTTP 403 Forbidden");
        }
        Ok(())
    }
}
