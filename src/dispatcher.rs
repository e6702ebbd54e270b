use tracing::{debug, error, info, warn};

use crate::api::StatsSource;
use crate::reporter::{self, Subject};
use crate::state::TrackerState;
use crate::twitter::Publisher;
use crate::types::{Announcement, GameSnapshot, NoHitterKind, NoHitterStatus, Side, TeamId};

/// Which announcement, if any, a classification calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Announced bid broken up or downgraded.
    Setback,
    /// First announcement of a bid still in progress.
    InProgress,
    /// Bid completed in a final game.
    Completed,
}

/// Pick the announcement for a team. At most one action applies:
///
/// 1. announced and unfinished, now broken or downgraded → [`Action::Setback`]
/// 2. never announced, game still going, active bid → [`Action::InProgress`]
/// 3. game final, no terminal announcement yet, active bid → [`Action::Completed`]
pub fn decide(
    state: &TrackerState,
    team_id: TeamId,
    status: NoHitterStatus,
    is_final: bool,
) -> Option<Action> {
    if state.is_open(team_id) && status.is_setback() {
        Some(Action::Setback)
    } else if !state.is_tracked(team_id) && !is_final && status.is_active() {
        Some(Action::InProgress)
    } else if is_final && !state.is_finished(team_id) && status.is_active() {
        Some(Action::Completed)
    } else {
        None
    }
}

/// Turns classifications into posts and keeps [`TrackerState`] in step.
pub struct Dispatcher<'a, S, P> {
    stats: &'a S,
    publisher: &'a P,
    innings_to_alert: f64,
    debug_mode: bool,
}

impl<'a, S: StatsSource, P: Publisher> Dispatcher<'a, S, P> {
    pub fn new(stats: &'a S, publisher: &'a P, innings_to_alert: f64, debug_mode: bool) -> Self {
        Self {
            stats,
            publisher,
            innings_to_alert,
            debug_mode,
        }
    }

    /// Announce `status` for the team pitching on `side` of `game` if it is due.
    ///
    /// Nothing happens below the innings threshold. State is updated once the
    /// publish call has been attempted, whether or not it succeeded.
    pub async fn dispatch(
        &self,
        state: &mut TrackerState,
        game: &GameSnapshot,
        side: Side,
        status: NoHitterStatus,
    ) -> Option<Announcement> {
        let pitching = game.side(side);
        let opponent = game.side(side.opponent());
        let team_id = pitching.team.id;
        let innings_pitched = &pitching.pitching.innings_pitched;

        debug!(
            "dispatch: game_id={} status={status} side={} team_id={team_id} team={} opponent={} innings_pitched={innings_pitched}",
            game.game_id,
            side.label(),
            pitching.team.abbreviation,
            opponent.team.name,
        );

        if pitching.pitching.innings() < self.innings_to_alert {
            return None;
        }

        let action = decide(state, team_id, status, game.is_final())?;

        let pitcher_name = match (status.is_combined, pitching.pitcher_id) {
            (false, Some(id)) => self.stats.player_name(id).await,
            _ => String::new(),
        };
        let subject = Subject {
            pitcher_name: &pitcher_name,
            team_abbrv: &pitching.team.abbreviation,
            team_name: &pitching.team.name,
            opposing_team: &opponent.team.name,
        };

        let message = match action {
            Action::Setback if status.kind == NoHitterKind::Broken => {
                let play = game.first_hit(side);
                if play.is_none() {
                    warn!(
                        "No hit found in play log for team {team_id} in game {}",
                        game.game_id
                    );
                }
                reporter::broken(&subject, status.is_combined, play.as_ref())
            }
            Action::Setback => {
                match game.first_walk_or_error(side) {
                    Some(play) => info!(
                        "Perfect game for team {team_id} lost after {}.{} innings: {}",
                        play.completed_innings, play.completed_outs, play.description
                    ),
                    None => warn!(
                        "No walk or error found in play log for team {team_id} in game {}",
                        game.game_id
                    ),
                }
                reporter::downgrade(&subject, status.is_combined)
            }
            Action::InProgress => reporter::in_progress(&subject, status, innings_pitched),
            Action::Completed => reporter::completed(&subject, status),
        };

        let text = reporter::with_hashtags(
            &message,
            &game.home.team.abbreviation,
            &game.away.team.abbreviation,
        );
        let published = self.publish(&text, &message, game).await;

        match action {
            Action::Setback if status.kind == NoHitterKind::Broken => state.record_broken(team_id),
            Action::Setback => state.record_downgrade(team_id),
            Action::InProgress => state.record_in_progress(team_id, status.is_perfect_game()),
            Action::Completed => state.record_completed(team_id),
        }

        Some(Announcement {
            game_id: game.game_id,
            team_id,
            status,
            message,
            text,
            published,
        })
    }

    async fn publish(&self, text: &str, message: &str, game: &GameSnapshot) -> bool {
        if self.debug_mode {
            info!("Debug mode, post not sent: {message} (Game ID: {})", game.game_id);
            return false;
        }
        match self.publisher.publish(text).await {
            Ok(()) => {
                info!("Post sent: {message} (Game ID: {})", game.game_id);
                true
            }
            Err(e) => {
                error!("An error occurred and the post was not sent: {e:#}");
                false
            }
        }
    }
}
