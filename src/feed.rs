//! Stats API response shapes and their conversion into snapshots.
//!
//! Only the fields the tracker reads are modelled; everything else in the
//! (very large) live feed is ignored by serde.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::{
    GameId, GameSnapshot, GameStatus, PitchingLine, PlayRecord, PlayerId, TeamId, TeamInfo,
    TeamSide,
};

// ── schedule ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleDate {
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGame {
    pub game_pk: GameId,
    #[serde(default)]
    pub status: StatusBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBody {
    #[serde(default)]
    pub status_code: String,
}

impl ScheduleResponse {
    /// Game ID → status for the first (only) date in the response.
    pub fn into_statuses(self) -> BTreeMap<GameId, GameStatus> {
        self.dates
            .into_iter()
            .next()
            .map(|date| {
                date.games
                    .into_iter()
                    .map(|g| (g.game_pk, GameStatus::from_code(&g.status.status_code)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ── live feed ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveFeed {
    pub game_data: GameData,
    pub live_data: LiveData,
}

#[derive(Debug, Deserialize)]
pub struct GameData {
    #[serde(default)]
    pub status: StatusBody,
    pub teams: HomeAway<TeamBody>,
}

#[derive(Debug, Deserialize)]
pub struct HomeAway<T> {
    pub home: T,
    pub away: T,
}

#[derive(Debug, Deserialize)]
pub struct TeamBody {
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
}

#[derive(Debug, Deserialize)]
pub struct LiveData {
    pub boxscore: Boxscore,
    #[serde(default)]
    pub plays: Plays,
}

#[derive(Debug, Deserialize)]
pub struct Boxscore {
    pub teams: HomeAway<BoxscoreTeam>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscoreTeam {
    /// Pitchers in order of appearance.
    #[serde(default)]
    pub pitchers: Vec<PlayerId>,
    pub team_stats: TeamStats,
}

#[derive(Debug, Deserialize)]
pub struct TeamStats {
    pub pitching: PitchingStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingStats {
    #[serde(default)]
    pub innings_pitched: String,
    #[serde(default)]
    pub hits: u32,
    #[serde(default)]
    pub base_on_balls: u32,
    #[serde(default)]
    pub hit_by_pitch: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plays {
    #[serde(default)]
    pub all_plays: Vec<Play>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Play {
    pub result: PlayResult,
    pub about: PlayAbout,
    pub count: PlayCount,
    pub matchup: Matchup,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayResult {
    #[serde(rename = "type")]
    pub result_type: String,
    pub event_type: String,
    pub description: String,
    pub is_out: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayAbout {
    pub inning: u32,
    pub is_top_inning: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayCount {
    pub outs: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Matchup {
    pub batter: Person,
    pub pitcher: Person,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
    pub full_name: String,
}

impl From<Play> for PlayRecord {
    fn from(play: Play) -> Self {
        Self {
            result_type: play.result.result_type,
            event_type: play.result.event_type,
            description: play.result.description,
            is_out: play.result.is_out,
            inning: play.about.inning,
            is_top_inning: play.about.is_top_inning,
            outs: play.count.outs,
            batter_name: play.matchup.batter.full_name,
            pitcher_name: play.matchup.pitcher.full_name,
        }
    }
}

fn team_side(team: TeamBody, box_team: BoxscoreTeam) -> TeamSide {
    let pitching = box_team.team_stats.pitching;
    TeamSide {
        team: TeamInfo {
            id: team.id,
            name: team.name,
            abbreviation: team.abbreviation,
        },
        pitcher_count: box_team.pitchers.len(),
        pitcher_id: box_team.pitchers.first().copied(),
        pitching: PitchingLine {
            innings_pitched: pitching.innings_pitched,
            hits: pitching.hits,
            walks: pitching.base_on_balls,
            hit_by_pitch: pitching.hit_by_pitch,
        },
    }
}

impl LiveFeed {
    pub fn into_snapshot(self, game_id: GameId) -> GameSnapshot {
        let GameData { status, teams } = self.game_data;
        let LiveData { boxscore, plays } = self.live_data;
        GameSnapshot {
            game_id,
            status: GameStatus::from_code(&status.status_code),
            home: team_side(teams.home, boxscore.teams.home),
            away: team_side(teams.away, boxscore.teams.away),
            plays: plays.all_plays.into_iter().map(PlayRecord::from).collect(),
        }
    }
}

// ── people ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PeopleResponse {
    #[serde(default)]
    pub people: Vec<Person>,
}

impl PeopleResponse {
    pub fn into_name(self) -> Option<String> {
        self.people.into_iter().next().map(|p| p.full_name)
    }
}
