use std::fmt;

pub type GameId = u64;
pub type TeamId = u64;
pub type PlayerId = u64;

/// Play event types that count as a hit allowed.
const HIT_EVENTS: &[&str] = &["single", "double", "triple", "home_run"];

/// Play event types that cost a pitcher a perfect game without a hit.
const WALK_OR_ERROR_EVENTS: &[&str] = &[
    "walk",
    "intent_walk",
    "hit_by_pitch",
    "error",
    "field_error",
];

/// Game state as reported by the schedule and live-feed status codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Scheduled,
    Live,
    Final,
}

impl GameStatus {
    /// `I` is in progress, `F` is final. Everything else (pre-game, warmup,
    /// delayed, postponed) is not actionable yet.
    pub fn from_code(code: &str) -> Self {
        match code {
            "I" => GameStatus::Live,
            "F" => GameStatus::Final,
            _ => GameStatus::Scheduled,
        }
    }
}

/// Which team in a game. The side is the pitching team when classifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }

    /// The home team pitches the top of each inning.
    pub fn pitches_in_top(self) -> bool {
        self == Side::Home
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamInfo {
    pub id: TeamId,
    pub name: String,
    pub abbreviation: String,
}

/// Aggregate team pitching line for a game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PitchingLine {
    /// Raw innings string, e.g. `"6.2"` (six innings and two outs).
    pub innings_pitched: String,
    pub hits: u32,
    pub walks: u32,
    pub hit_by_pitch: u32,
}

impl PitchingLine {
    /// Innings pitched as a number for threshold comparisons. Unparseable
    /// values count as zero innings.
    pub fn innings(&self) -> f64 {
        self.innings_pitched.trim().parse().unwrap_or(0.0)
    }
}

/// One team's half of a game snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamSide {
    pub team: TeamInfo,
    /// Number of pitchers who have appeared for this team.
    pub pitcher_count: usize,
    /// First pitcher listed in the boxscore; `None` before anyone has pitched.
    pub pitcher_id: Option<PlayerId>,
    pub pitching: PitchingLine,
}

/// A single entry from a game's play log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayRecord {
    /// Result type, e.g. `"atBat"`.
    pub result_type: String,
    /// Event type, e.g. `"single"`, `"walk"`, `"strikeout"`.
    pub event_type: String,
    pub description: String,
    pub is_out: bool,
    pub inning: u32,
    pub is_top_inning: bool,
    pub outs: u32,
    pub batter_name: String,
    pub pitcher_name: String,
}

impl PlayRecord {
    pub fn is_hit(&self) -> bool {
        self.result_type == "atBat" && !self.is_out && HIT_EVENTS.contains(&self.event_type.as_str())
    }

    pub fn is_walk_or_error(&self) -> bool {
        WALK_OR_ERROR_EVENTS.contains(&self.event_type.as_str())
    }
}

/// The play that broke up (or downgraded) a no-hit bid.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEvent {
    pub batter_name: String,
    pub pitcher_name: String,
    pub description: String,
    /// Completed innings at the time of the play; two outs in the 7th is 6.2.
    pub completed_innings: u32,
    pub completed_outs: u32,
    pub is_hit: bool,
    pub is_walk_or_error: bool,
}

impl From<&PlayRecord> for PlayEvent {
    fn from(play: &PlayRecord) -> Self {
        Self {
            batter_name: play.batter_name.clone(),
            pitcher_name: play.pitcher_name.clone(),
            description: play.description.clone(),
            completed_innings: play.inning.saturating_sub(1),
            completed_outs: play.outs,
            is_hit: play.is_hit(),
            is_walk_or_error: play.is_walk_or_error(),
        }
    }
}

/// Latest known state of one game, replaced wholesale on every refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub game_id: GameId,
    pub status: GameStatus,
    pub home: TeamSide,
    pub away: TeamSide,
    pub plays: Vec<PlayRecord>,
}

impl GameSnapshot {
    /// An empty snapshot carrying only the schedule's view of the game.
    pub fn new(game_id: GameId, status: GameStatus) -> Self {
        Self {
            game_id,
            status,
            home: TeamSide::default(),
            away: TeamSide::default(),
            plays: Vec::new(),
        }
    }

    pub fn side(&self, side: Side) -> &TeamSide {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn is_final(&self) -> bool {
        self.status == GameStatus::Final
    }

    /// First hit allowed by `side`'s pitchers.
    pub fn first_hit(&self, side: Side) -> Option<PlayEvent> {
        self.half_inning_plays(side)
            .find(|p| p.is_hit())
            .map(PlayEvent::from)
    }

    /// First walk, hit batter or error behind `side`'s pitchers.
    pub fn first_walk_or_error(&self, side: Side) -> Option<PlayEvent> {
        self.half_inning_plays(side)
            .find(|p| p.is_walk_or_error())
            .map(PlayEvent::from)
    }

    fn half_inning_plays(&self, side: Side) -> impl Iterator<Item = &PlayRecord> {
        let top = side.pitches_in_top();
        self.plays.iter().filter(move |p| p.is_top_inning == top)
    }
}

/// Stage of a no-hit bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoHitterKind {
    NoHitter,
    PerfectGame,
    /// Perfect game lost to a walk, hit batter or error; no-hitter intact.
    Downgrade,
    /// First hit allowed after the bid was announced.
    Broken,
}

/// Classification of one team's pitching line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoHitterStatus {
    pub kind: NoHitterKind,
    /// More than one pitcher has appeared for the team.
    pub is_combined: bool,
}

impl NoHitterStatus {
    pub fn new(kind: NoHitterKind, is_combined: bool) -> Self {
        Self { kind, is_combined }
    }

    /// Active bid (no-hitter or perfect game, solo or combined).
    pub fn is_active(&self) -> bool {
        matches!(self.kind, NoHitterKind::NoHitter | NoHitterKind::PerfectGame)
    }

    pub fn is_perfect_game(&self) -> bool {
        self.kind == NoHitterKind::PerfectGame
    }

    /// Broken or downgraded bid.
    pub fn is_setback(&self) -> bool {
        matches!(self.kind, NoHitterKind::Downgrade | NoHitterKind::Broken)
    }
}

impl fmt::Display for NoHitterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            NoHitterKind::NoHitter => "no-hitter",
            NoHitterKind::PerfectGame => "perfect game",
            NoHitterKind::Downgrade => "downgrade",
            NoHitterKind::Broken => "broken",
        };
        if self.is_combined {
            write!(f, "combined {kind}")
        } else {
            f.write_str(kind)
        }
    }
}

/// A post produced by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub game_id: GameId,
    pub team_id: TeamId,
    pub status: NoHitterStatus,
    /// Message body without the hashtag footer.
    pub message: String,
    /// Full text handed to the publisher.
    pub text: String,
    /// Whether the publisher accepted the post (always false in debug mode).
    pub published: bool,
}
