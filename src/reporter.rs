//! Post text for each stage of a no-hit bid.

use crate::types::{NoHitterStatus, PlayEvent};

/// Names used to fill in a post about one team's bid.
#[derive(Debug, Clone, Default)]
pub struct Subject<'a> {
    pub pitcher_name: &'a str,
    pub team_abbrv: &'a str,
    pub team_name: &'a str,
    pub opposing_team: &'a str,
}

/// Bid in progress, e.g. after six innings.
pub fn in_progress(subject: &Subject<'_>, status: NoHitterStatus, innings_pitched: &str) -> String {
    if status.is_combined {
        format!(
            "The {} currently have a {status} against the {} through {innings_pitched} innings.",
            subject.team_name, subject.opposing_team,
        )
    } else {
        format!(
            "{} ({}) currently has a {status} against the {} through {innings_pitched} innings.",
            subject.pitcher_name, subject.team_abbrv, subject.opposing_team,
        )
    }
}

/// Perfect game lost, no-hitter still intact.
pub fn downgrade(subject: &Subject<'_>, is_combined: bool) -> String {
    if is_combined {
        format!(
            "The {} no longer have a combined perfect game against the {}. No-hitter is still active.",
            subject.team_name, subject.opposing_team,
        )
    } else {
        format!(
            "{} ({}) no longer has a perfect game against the {}. No-hitter is still active.",
            subject.pitcher_name, subject.team_abbrv, subject.opposing_team,
        )
    }
}

/// No-hitter broken up. The breaking play is appended when it was found.
pub fn broken(subject: &Subject<'_>, is_combined: bool, play: Option<&PlayEvent>) -> String {
    let mut message = if is_combined {
        format!(
            "The {} no longer have a combined no-hitter against the {}.",
            subject.team_name, subject.opposing_team,
        )
    } else {
        format!(
            "{} ({}) no longer has a no-hitter against the {}.",
            subject.pitcher_name, subject.team_abbrv, subject.opposing_team,
        )
    };
    if let Some(play) = play {
        message.push_str("\n\n");
        message.push_str(&broken_up_by(play));
    }
    message
}

pub fn broken_up_by(play: &PlayEvent) -> String {
    format!(
        "Broken up by {} after {}.{} innings.",
        play.batter_name, play.completed_innings, play.completed_outs,
    )
}

/// Completed no-hitter or perfect game.
pub fn completed(subject: &Subject<'_>, status: NoHitterStatus) -> String {
    if status.is_combined {
        format!(
            "The {} have thrown a {status} against the {}.",
            subject.team_name, subject.opposing_team,
        )
    } else {
        format!(
            "{} ({}) has thrown a {status} against the {}.",
            subject.pitcher_name, subject.team_abbrv, subject.opposing_team,
        )
    }
}

/// Append the matchup hashtags in both orders.
pub fn with_hashtags(message: &str, home_abbrv: &str, away_abbrv: &str) -> String {
    format!("{message}\n\n#{home_abbrv}vs{away_abbrv} | #{away_abbrv}vs{home_abbrv}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NoHitterKind;

    fn subject() -> Subject<'static> {
        Subject {
            pitcher_name: "Corbin Burnes",
            team_abbrv: "MIL",
            team_name: "Milwaukee Brewers",
            opposing_team: "Cleveland Guardians",
        }
    }

    fn play() -> PlayEvent {
        PlayEvent {
            batter_name: "Jose Ramirez".into(),
            pitcher_name: "Josh Hader".into(),
            description: "Jose Ramirez singles on a line drive.".into(),
            completed_innings: 8,
            completed_outs: 1,
            is_hit: true,
            is_walk_or_error: false,
        }
    }

    #[test]
    fn in_progress_solo() {
        let status = NoHitterStatus::new(NoHitterKind::PerfectGame, false);
        assert_eq!(
            in_progress(&subject(), status, "6.0"),
            "Corbin Burnes (MIL) currently has a perfect game against the Cleveland Guardians through 6.0 innings."
        );
    }

    #[test]
    fn in_progress_combined() {
        let status = NoHitterStatus::new(NoHitterKind::NoHitter, true);
        assert_eq!(
            in_progress(&subject(), status, "7.1"),
            "The Milwaukee Brewers currently have a combined no-hitter against the Cleveland Guardians through 7.1 innings."
        );
    }

    #[test]
    fn downgrade_messages() {
        assert_eq!(
            downgrade(&subject(), false),
            "Corbin Burnes (MIL) no longer has a perfect game against the Cleveland Guardians. No-hitter is still active."
        );
        assert_eq!(
            downgrade(&subject(), true),
            "The Milwaukee Brewers no longer have a combined perfect game against the Cleveland Guardians. No-hitter is still active."
        );
    }

    #[test]
    fn broken_with_play() {
        let play = play();
        assert_eq!(
            broken(&subject(), true, Some(&play)),
            "The Milwaukee Brewers no longer have a combined no-hitter against the Cleveland Guardians.\n\nBroken up by Jose Ramirez after 8.1 innings."
        );
    }

    #[test]
    fn broken_without_play_has_no_suffix() {
        assert_eq!(
            broken(&subject(), false, None),
            "Corbin Burnes (MIL) no longer has a no-hitter against the Cleveland Guardians."
        );
    }

    #[test]
    fn completed_messages() {
        let solo = NoHitterStatus::new(NoHitterKind::NoHitter, false);
        assert_eq!(
            completed(&subject(), solo),
            "Corbin Burnes (MIL) has thrown a no-hitter against the Cleveland Guardians."
        );
        let combined = NoHitterStatus::new(NoHitterKind::PerfectGame, true);
        assert_eq!(
            completed(&subject(), combined),
            "The Milwaukee Brewers have thrown a combined perfect game against the Cleveland Guardians."
        );
    }

    #[test]
    fn hashtag_footer() {
        assert_eq!(with_hashtags("Hi.", "MIL", "CLE"), "Hi.\n\n#MILvsCLE | #CLEvsMIL");
    }
}
