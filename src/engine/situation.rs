// Forward-looking score analysis: is either team one point away from taking
// the current set or the whole match? Read-only; the scoring transition
// re-derives the same win conditions independently, and the integration
// suite holds the two in agreement.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::engine::state::{MatchState, Team};
use crate::rules::{DeuceRule, Rules};

/// A score where the next point can decide a set or the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "team", rename_all = "snake_case")]
pub enum Situation {
    SetPoint(Team),
    MatchPoint(Team),
}

impl Situation {
    pub fn team(&self) -> Team {
        match self {
            Situation::SetPoint(team) | Situation::MatchPoint(team) => *team,
        }
    }
}

impl MatchState {
    /// Reports a set or match point if either team holds one. `None` once
    /// the match is over; raw-points play has no sets, so it never reports
    /// a situation.
    pub fn situation(&self, rules: &Rules) -> Option<Situation> {
        if self.finished.is_some() {
            return None;
        }
        let (deuce_rule, sets_target) = match *rules {
            Rules::Standard {
                deuce_rule,
                sets_target,
                ..
            } => (deuce_rule, sets_target),
            Rules::RawPoints { .. } => return None,
        };
        // At most one team can be a point from the set, so the probe order
        // does not matter.
        Team::iter().find_map(|team| self.situation_for(deuce_rule, sets_target, team))
    }

    fn situation_for(
        &self,
        deuce_rule: DeuceRule,
        sets_target: u8,
        team: Team,
    ) -> Option<Situation> {
        if !self.holds_game_point(deuce_rule, team) {
            return None;
        }
        let would_win_set = if self.game.in_tiebreak {
            // A won tiebreak always decides the set.
            true
        } else {
            let games = self.current_set().games;
            games[team] + 1 >= 6 && games[team] + 1 >= games[team.opponent()] + 2
        };
        if !would_win_set {
            return None;
        }
        if self.sets_won(team) + 1 >= sets_target {
            Some(Situation::MatchPoint(team))
        } else {
            Some(Situation::SetPoint(team))
        }
    }

    /// Would `team` take the current game (or tiebreak) by winning the next
    /// point?
    fn holds_game_point(&self, deuce_rule: DeuceRule, team: Team) -> bool {
        let opponent = team.opponent();
        if self.game.in_tiebreak {
            let points = self
                .current_set()
                .tiebreak
                .as_ref()
                .expect("tiebreak sub-state present while a tiebreak is underway")
                .points;
            return points[team] >= 6 && points[team] >= points[opponent] + 1;
        }
        let points = self.game.points;
        let level_at_deuce = points[team] >= 3 && points[team] == points[opponent];
        match deuce_rule {
            DeuceRule::GoldenPoint if level_at_deuce => true,
            DeuceRule::SilverPoint if level_at_deuce && self.game.deuce_entries >= 2 => true,
            _ => points[team] >= 3 && points[team] >= points[opponent] + 1,
        }
    }
}
