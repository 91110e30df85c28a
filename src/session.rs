// The session owns the single live copy of a match: the active rules, the
// current state, and the snapshot ledger that backs one-step undo. Input
// handlers and render loops talk to a session; the engine itself stays a
// set of pure functions.

use std::collections::VecDeque;

use tracing::{debug, info, instrument};

use crate::display::DisplayModel;
use crate::engine::{MatchState, Situation, Team};
use crate::rules::{ConfigError, Rules};

/// Snapshots kept for undo. Older ones are discarded, so an operator can
/// step back through the recent points but the ledger stays bounded over a
/// long match.
const UNDO_DEPTH: usize = 50;

#[derive(Debug, Clone)]
pub struct MatchSession {
    rules: Rules,
    state: MatchState,
    ledger: VecDeque<MatchState>,
}

impl MatchSession {
    pub fn new(rules: Rules, first_server: Team) -> Result<Self, ConfigError> {
        let state = MatchState::new(&rules, first_server)?;
        info!(match_id = %state.id, ?rules, "match session started");
        Ok(Self {
            rules,
            state,
            ledger: VecDeque::new(),
        })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Awards one point. The pre-transition state is pushed onto the undo
    /// ledger before the replacement is committed. Ignored once the match
    /// is finished.
    #[instrument(skip(self), fields(match_id = %self.state.id))]
    pub fn score_point(&mut self, team: Team) {
        if self.state.is_finished() {
            debug!("point ignored, match already finished");
            return;
        }
        let next = self.state.score_point(&self.rules, team);
        if self.ledger.len() == UNDO_DEPTH {
            self.ledger.pop_front();
        }
        self.ledger.push_back(std::mem::replace(&mut self.state, next));
        debug!(?team, total_points = self.state.stats.total_points, "point scored");
        if let Some(outcome) = &self.state.finished {
            info!(winner = ?outcome.winner, reason = ?outcome.reason, "match finished");
        }
    }

    /// Restores the most recent snapshot verbatim. Returns `false` when the
    /// ledger is empty (repeated undo bottoms out as a no-op).
    #[instrument(skip(self), fields(match_id = %self.state.id))]
    pub fn undo(&mut self) -> bool {
        match self.ledger.pop_back() {
            Some(snapshot) => {
                self.state = snapshot;
                debug!(remaining = self.ledger.len(), "state restored from snapshot");
                true
            }
            None => false,
        }
    }

    /// Starts a fresh match under possibly different rules, dropping every
    /// snapshot of the old one.
    #[instrument(skip(self))]
    pub fn reset(&mut self, rules: Rules, first_server: Team) -> Result<(), ConfigError> {
        self.state = MatchState::new(&rules, first_server)?;
        self.rules = rules;
        self.ledger.clear();
        info!(match_id = %self.state.id, "match session reset");
        Ok(())
    }

    pub fn display(&self) -> DisplayModel {
        self.state.project(&self.rules)
    }

    pub fn situation(&self) -> Option<Situation> {
        self.state.situation(&self.rules)
    }

    /// Number of points currently recoverable through undo.
    pub fn undo_depth(&self) -> usize {
        self.ledger.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{DeuceRule, SetTieRule};

    fn classic() -> Rules {
        Rules::Standard {
            deuce_rule: DeuceRule::Advantage,
            set_tie_rule: SetTieRule::Tiebreak,
            sets_target: 2,
        }
    }

    #[test]
    fn undo_restores_the_exact_prior_state() {
        let mut session = MatchSession::new(classic(), Team::Home).unwrap();
        session.score_point(Team::Home);
        session.score_point(Team::Away);
        let before = session.state().clone();

        session.score_point(Team::Away);
        assert_ne!(session.state(), &before);
        assert!(session.undo());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn undo_on_an_empty_ledger_is_a_no_op() {
        let mut session = MatchSession::new(classic(), Team::Home).unwrap();
        assert!(!session.undo());

        session.score_point(Team::Home);
        assert!(session.undo());
        assert!(!session.undo(), "ledger should be exhausted");
        assert_eq!(session.state().stats.total_points, 0);
    }

    #[test]
    fn ledger_is_bounded() {
        let mut session = MatchSession::new(classic(), Team::Home).unwrap();
        for index in 0..(UNDO_DEPTH + 10) {
            let team = if index % 2 == 0 { Team::Home } else { Team::Away };
            session.score_point(team);
        }
        assert_eq!(session.undo_depth(), UNDO_DEPTH);

        let mut undone = 0;
        while session.undo() {
            undone += 1;
        }
        assert_eq!(undone, UNDO_DEPTH);
    }

    #[test]
    fn snapshots_are_independent_of_the_live_state() {
        let mut session = MatchSession::new(classic(), Team::Home).unwrap();
        for _ in 0..3 {
            session.score_point(Team::Home);
        }
        // 40-0; the game concludes on the next point.
        session.score_point(Team::Home);
        assert_eq!(session.state().current_set().games.home, 1);

        assert!(session.undo());
        assert_eq!(session.state().current_set().games.home, 0);
        assert_eq!(session.state().game.points.home, 3);
    }

    #[test]
    fn finished_match_ignores_points_and_adds_no_snapshots() {
        let rules = Rules::Standard {
            deuce_rule: DeuceRule::Advantage,
            set_tie_rule: SetTieRule::Tiebreak,
            sets_target: 1,
        };
        let mut session = MatchSession::new(rules, Team::Home).unwrap();
        for _ in 0..24 {
            session.score_point(Team::Home);
        }
        assert!(session.state().is_finished());
        let depth = session.undo_depth();

        session.score_point(Team::Away);
        assert_eq!(session.undo_depth(), depth);
        assert!(session.state().is_finished());
    }

    #[test]
    fn undo_can_step_back_across_the_finish() {
        let rules = Rules::Standard {
            deuce_rule: DeuceRule::Advantage,
            set_tie_rule: SetTieRule::Tiebreak,
            sets_target: 1,
        };
        let mut session = MatchSession::new(rules, Team::Home).unwrap();
        for _ in 0..24 {
            session.score_point(Team::Home);
        }
        assert!(session.state().is_finished());

        assert!(session.undo());
        assert!(!session.state().is_finished());
        assert_eq!(session.state().current_set().games.home, 5);
    }

    #[test]
    fn reset_clears_the_ledger_and_swaps_rules() {
        let mut session = MatchSession::new(classic(), Team::Home).unwrap();
        session.score_point(Team::Home);
        assert_eq!(session.undo_depth(), 1);

        let americano = Rules::RawPoints {
            target_points: 16,
            serves_per_turn: 4,
            side_swap_every_serves: 8,
        };
        session.reset(americano, Team::Away).unwrap();
        assert_eq!(session.undo_depth(), 0);
        assert!(!session.undo());
        assert!(session.rules().is_raw_points());
        assert_eq!(session.state().server, Team::Away);
        assert_eq!(session.state().stats.total_points, 0);
    }

    #[test]
    fn reset_rejects_a_bad_configuration_and_keeps_the_old_match() {
        let mut session = MatchSession::new(classic(), Team::Home).unwrap();
        session.score_point(Team::Home);

        let bad = Rules::RawPoints {
            target_points: 0,
            serves_per_turn: 4,
            side_swap_every_serves: 8,
        };
        assert!(session.reset(bad, Team::Home).is_err());
        // The running match is untouched by the failed reset.
        assert!(!session.rules().is_raw_points());
        assert_eq!(session.state().stats.total_points, 1);
        assert_eq!(session.undo_depth(), 1);
    }
}
