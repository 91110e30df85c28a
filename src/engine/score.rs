// The scoring transition: one completed point in, the next match state out.
// All rule-variant branching, win detection, serve rotation and statistics
// updates live here.

use crate::engine::state::{
    FinishReason, GameScore, MatchOutcome, MatchState, SetRecord, Team,
    TiebreakScore,
};
use crate::rules::{DeuceRule, Rules, SetTieRule};

impl MatchState {
    /// Applies one completed point won by `team` and returns the next
    /// state. The input is never touched, so the caller can keep it as an
    /// undo snapshot. Once the match is finished this is a no-op and the
    /// returned state equals the input.
    ///
    /// # Panics
    ///
    /// Panics if `rules` does not match the mode this state was initialized
    /// for (raw-points rules against a standard state or vice versa). The
    /// session layer owns both values, so the pairing cannot drift there.
    pub fn score_point(&self, rules: &Rules, team: Team) -> MatchState {
        let mut next = self.clone();
        if next.finished.is_some() {
            return next;
        }
        next.stats.record_point(team, next.server);
        match *rules {
            Rules::Standard {
                deuce_rule,
                set_tie_rule,
                sets_target,
            } => {
                if next.game.in_tiebreak {
                    next.score_tiebreak_point(sets_target, team);
                } else {
                    next.score_game_point(deuce_rule, set_tie_rule, sets_target, team);
                }
            }
            Rules::RawPoints {
                target_points,
                serves_per_turn,
                ..
            } => next.score_raw_point(target_points, serves_per_turn, team),
        }
        next
    }

    fn score_tiebreak_point(&mut self, sets_target: u8, team: Team) {
        let tb = self
            .current_set_mut()
            .tiebreak
            .as_mut()
            .expect("tiebreak sub-state present while a tiebreak is underway");
        tb.points[team] += 1;
        let won = tb.points[team] >= 7 && tb.points[team] >= tb.points[team.opponent()] + 2;
        let next_server = tb.server();

        if won {
            // A won tiebreak always decides the set.
            if team != self.server {
                self.stats.record_break(team);
            }
            self.current_set_mut().games[team] += 1;
            self.conclude_set(sets_target, team);
        } else {
            self.server = next_server;
        }
    }

    fn score_game_point(
        &mut self,
        deuce_rule: DeuceRule,
        set_tie_rule: SetTieRule,
        sets_target: u8,
        team: Team,
    ) {
        let opponent = team.opponent();
        let was_deuce =
            self.game.points[team] >= 3 && self.game.points[team] == self.game.points[opponent];

        self.game.points[team] += 1;
        if self.game.points[team] == self.game.points[opponent] && self.game.points[team] >= 3 {
            // The game just returned to a level score at 40-40 or beyond.
            self.game.deuce_entries = self.game.deuce_entries.saturating_add(1);
        }

        let sudden_death = match deuce_rule {
            DeuceRule::Advantage => false,
            DeuceRule::GoldenPoint => was_deuce,
            DeuceRule::SilverPoint => was_deuce && self.game.deuce_entries >= 2,
        };
        let points = self.game.points;
        if sudden_death || (points[team] >= 4 && points[team] >= points[opponent] + 2) {
            self.conclude_game(set_tie_rule, sets_target, team);
        }
        // Otherwise the game continues; the server never changes mid-game.
    }

    fn conclude_game(&mut self, set_tie_rule: SetTieRule, sets_target: u8, winner: Team) {
        if winner != self.server {
            self.stats.record_break(winner);
        }
        let set = self.current_set_mut();
        set.games[winner] += 1;
        let games = set.games;

        if games.home == 6 && games.away == 6 && set_tie_rule == SetTieRule::Tiebreak {
            // Six games each: the set is decided by a tiebreak. The team
            // due to serve the next game opens it.
            let opening_server = self.server.opponent();
            self.current_set_mut().tiebreak = Some(TiebreakScore::new(opening_server));
            self.game = GameScore {
                in_tiebreak: true,
                ..GameScore::default()
            };
            self.server = opening_server;
            return;
        }

        if games[winner] >= 6 && games[winner] >= games[winner.opponent()] + 2 {
            self.conclude_set(sets_target, winner);
        } else {
            self.game = GameScore::default();
            self.server = self.server.opponent();
        }
    }

    fn conclude_set(&mut self, sets_target: u8, winner: Team) {
        let set = self.current_set_mut();
        set.completed = true;
        set.winner = Some(winner);
        self.game = GameScore::default();

        if self.sets_won(winner) >= sets_target {
            self.finished = Some(MatchOutcome {
                winner,
                reason: FinishReason::Sets,
            });
            return;
        }
        self.sets.push(SetRecord::open());
        self.server = self.server.opponent();
    }

    fn score_raw_point(&mut self, target_points: u16, serves_per_turn: u8, team: Team) {
        let raw = self
            .raw
            .as_mut()
            .expect("raw-points progress present under raw-points rules");
        raw.points[team] += 1;
        raw.serves_this_turn += 1;
        raw.total_serves += 1;

        let rotate = raw.serves_this_turn >= serves_per_turn;
        if rotate {
            raw.serves_this_turn = 0;
        }
        let won = raw.points[team] >= target_points;

        if rotate {
            self.server = self.server.opponent();
        }
        if won {
            self.finished = Some(MatchOutcome {
                winner: team,
                reason: FinishReason::Points,
            });
        }
    }
}
