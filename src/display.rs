// Presentation projection: maps a match state (plus rules) to the view a
// scoreboard renders. Pure and recomputed on demand; nothing here feeds
// back into scoring.

use serde::{Deserialize, Serialize};

use crate::engine::{MatchOutcome, MatchState, PerTeam, Situation, Team};
use crate::rules::{DeuceRule, Rules};

const POINT_LABELS: [&str; 4] = ["0", "15", "30", "40"];

/// Presentation-ready view of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayModel {
    /// "0"/"15"/"30"/"40" with "Ad" for a held advantage; plain integers
    /// during a tiebreak and in raw-points mode.
    pub points: PerTeam<String>,
    /// Games in the set currently on court.
    pub games: PerTeam<u8>,
    pub sets: PerTeam<u8>,
    pub server: Team,
    pub in_tiebreak: bool,
    pub at_deuce: bool,
    /// The team holding advantage, when one does.
    pub advantage: Option<Team>,
    pub raw_mode: bool,
    /// Serves left in the current server's turn (raw-points mode only).
    pub serves_remaining: Option<u8>,
    /// Whether the teams currently occupy swapped ends (raw-points mode).
    pub ends_swapped: bool,
    /// Headline for the scoreboard, most important situation first.
    pub status: Option<String>,
    pub finished: Option<MatchOutcome>,
}

impl MatchState {
    /// Builds the view for the current state. Called on every render cycle.
    pub fn project(&self, rules: &Rules) -> DisplayModel {
        match *rules {
            Rules::RawPoints {
                serves_per_turn,
                side_swap_every_serves,
                ..
            } => self.project_raw(serves_per_turn, side_swap_every_serves),
            Rules::Standard { deuce_rule, .. } => self.project_standard(rules, deuce_rule),
        }
    }

    fn project_raw(&self, serves_per_turn: u8, side_swap_every: u8) -> DisplayModel {
        let raw = self
            .raw
            .as_ref()
            .expect("raw-points progress present under raw-points rules");
        DisplayModel {
            points: PerTeam::new(raw.points.home.to_string(), raw.points.away.to_string()),
            games: PerTeam::default(),
            sets: PerTeam::default(),
            server: self.server,
            in_tiebreak: false,
            at_deuce: false,
            advantage: None,
            raw_mode: true,
            serves_remaining: Some(serves_per_turn - raw.serves_this_turn),
            ends_swapped: (raw.total_serves / u32::from(side_swap_every)) % 2 == 1,
            status: None,
            finished: self.finished,
        }
    }

    fn project_standard(&self, rules: &Rules, deuce_rule: DeuceRule) -> DisplayModel {
        let set = self.current_set();
        let (points, at_deuce, advantage) = if self.game.in_tiebreak {
            let tb = set
                .tiebreak
                .as_ref()
                .expect("tiebreak sub-state present while a tiebreak is underway");
            let labels =
                PerTeam::new(tb.points.home.to_string(), tb.points.away.to_string());
            (labels, false, None)
        } else {
            self.game_point_labels()
        };

        DisplayModel {
            points,
            games: set.games,
            sets: PerTeam::new(self.sets_won(Team::Home), self.sets_won(Team::Away)),
            server: self.server,
            in_tiebreak: self.game.in_tiebreak,
            at_deuce,
            advantage,
            raw_mode: false,
            serves_remaining: None,
            ends_swapped: false,
            status: self.status_line(deuce_rule, self.situation(rules), at_deuce),
            finished: self.finished,
        }
    }

    fn game_point_labels(&self) -> (PerTeam<String>, bool, Option<Team>) {
        let points = self.game.points;
        if points.home >= 3 && points.away >= 3 {
            if points.home == points.away {
                return (PerTeam::new("40".into(), "40".into()), true, None);
            }
            let leader = if points.home > points.away {
                Team::Home
            } else {
                Team::Away
            };
            let labels = match leader {
                Team::Home => PerTeam::new("Ad".into(), "40".into()),
                Team::Away => PerTeam::new("40".into(), "Ad".into()),
            };
            return (labels, false, Some(leader));
        }
        let label = |n: u8| POINT_LABELS[usize::from(n.min(3))].to_string();
        (
            PerTeam::new(label(points.home), label(points.away)),
            false,
            None,
        )
    }

    fn status_line(
        &self,
        deuce_rule: DeuceRule,
        situation: Option<Situation>,
        at_deuce: bool,
    ) -> Option<String> {
        if let Some(situation) = situation {
            let text = match situation {
                Situation::MatchPoint(_) => "Match point",
                Situation::SetPoint(_) => "Set point",
            };
            return Some(text.to_string());
        }
        if self.game.in_tiebreak {
            return Some("Tiebreak".to_string());
        }
        if at_deuce {
            let text = match deuce_rule {
                DeuceRule::GoldenPoint => "Golden point",
                DeuceRule::SilverPoint if self.game.deuce_entries >= 2 => "Silver point",
                DeuceRule::SilverPoint | DeuceRule::Advantage => "Deuce",
            };
            return Some(text.to_string());
        }
        None
    }
}
