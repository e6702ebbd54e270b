use crate::state::TrackerState;
use crate::types::{NoHitterKind, NoHitterStatus, PitchingLine, TeamId};

/// Classify a team's cumulative pitching line into a no-hit bid stage.
///
/// Returns `None` when there is nothing to announce: hits have been allowed
/// and the team was never announced, so there is no bid to break.
///
/// The only memory consulted is whether `team_id` was last announced with a
/// perfect game, which turns a walk into a downgrade rather than a fresh
/// no-hitter.
pub fn classify(
    team_id: TeamId,
    line: &PitchingLine,
    pitcher_count: usize,
    state: &TrackerState,
) -> Option<NoHitterStatus> {
    let is_combined = pitcher_count > 1;

    if line.hits == 0 {
        let kind = if line.walks == 0 && line.hit_by_pitch == 0 {
            NoHitterKind::PerfectGame
        } else if state.holds_perfect_game(team_id) {
            NoHitterKind::Downgrade
        } else {
            NoHitterKind::NoHitter
        };
        return Some(NoHitterStatus::new(kind, is_combined));
    }

    if state.is_tracked(team_id) {
        return Some(NoHitterStatus::new(NoHitterKind::Broken, is_combined));
    }

    None
}
