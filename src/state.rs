use std::collections::{HashMap, HashSet};

use crate::types::TeamId;

/// Announcement bookkeeping for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackedTeam {
    /// The last announcement for this team was a perfect game.
    pub is_perfect_game: bool,
    /// A terminal (broken or finished) announcement has been made.
    pub is_finished: bool,
}

/// Tracks which teams have been announced during the current day.
///
/// A team enters `teams` with its first announcement and enters `finished`
/// with its terminal one. Nothing is ever removed; the process restarts daily.
#[derive(Debug, Default)]
pub struct TrackerState {
    /// Announced teams keyed by team ID.
    pub teams: HashMap<TeamId, TrackedTeam>,
    /// Teams whose terminal announcement has been made.
    pub finished: HashSet<TeamId>,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, team_id: TeamId) -> Option<&TrackedTeam> {
        self.teams.get(&team_id)
    }

    pub fn is_tracked(&self, team_id: TeamId) -> bool {
        self.teams.contains_key(&team_id)
    }

    /// Team was last announced with a perfect game still intact.
    pub fn holds_perfect_game(&self, team_id: TeamId) -> bool {
        self.get(team_id).is_some_and(|t| t.is_perfect_game)
    }

    pub fn is_finished(&self, team_id: TeamId) -> bool {
        self.finished.contains(&team_id)
    }

    /// Tracked with no terminal announcement yet.
    pub fn is_open(&self, team_id: TeamId) -> bool {
        self.is_tracked(team_id) && !self.is_finished(team_id)
    }

    /// Record the first in-progress announcement for a team.
    pub fn record_in_progress(&mut self, team_id: TeamId, is_perfect_game: bool) {
        self.teams.insert(
            team_id,
            TrackedTeam {
                is_perfect_game,
                is_finished: false,
            },
        );
    }

    /// Record a perfect game lost without a hit. The bid stays open.
    pub fn record_downgrade(&mut self, team_id: TeamId) {
        self.teams.entry(team_id).or_default().is_perfect_game = false;
    }

    /// Record a bid broken up by a hit.
    pub fn record_broken(&mut self, team_id: TeamId) {
        self.record_downgrade(team_id);
        self.mark_finished(team_id);
    }

    /// Record a completed no-hitter or perfect game.
    pub fn record_completed(&mut self, team_id: TeamId) {
        self.mark_finished(team_id);
    }

    fn mark_finished(&mut self, team_id: TeamId) {
        self.teams.entry(team_id).or_default().is_finished = true;
        self.finished.insert(team_id);
    }
}
