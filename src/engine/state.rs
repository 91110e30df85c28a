// MatchState is the single value that represents a match in progress: set
// history, current game counters, tiebreak sub-state, server and running
// statistics.

// The state is created once by the initializer and from then on only ever
// replaced wholesale by the scoring transition, never mutated in place by
// collaborators. That replacement discipline is what makes undo snapshots
// independent values rather than aliases.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;
use uuid::Uuid;

use crate::rules::{ConfigError, Rules};
use crate::stats::MatchStats;

/// One of the two sides of the court.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }
}

/// A pair of values, one per team, addressed with `Team` as the index.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct PerTeam<T> {
    pub home: T,
    pub away: T,
}

impl<T> PerTeam<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }
}

impl<T> Index<Team> for PerTeam<T> {
    type Output = T;

    fn index(&self, team: Team) -> &T {
        match team {
            Team::Home => &self.home,
            Team::Away => &self.away,
        }
    }
}

impl<T> IndexMut<Team> for PerTeam<T> {
    fn index_mut(&mut self, team: Team) -> &mut T {
        match team {
            Team::Home => &mut self.home,
            Team::Away => &mut self.away,
        }
    }
}

/// Tiebreak sub-state of a set that reached six games each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiebreakScore {
    pub points: PerTeam<u16>,
    /// The team that served the first tiebreak point: the team that would
    /// have served the next game had the tiebreak not occurred.
    pub opening_server: Team,
}

impl TiebreakScore {
    pub fn new(opening_server: Team) -> Self {
        Self {
            points: PerTeam::default(),
            opening_server,
        }
    }

    pub fn total_points(&self) -> u16 {
        self.points.home + self.points.away
    }

    /// Server of the next tiebreak point. The opening server takes the
    /// first single point, then service changes hands every two points.
    pub fn server(&self) -> Team {
        let total = self.total_points();
        if total == 0 {
            return self.opening_server;
        }
        let pair = (total - 1) / 2;
        if pair % 2 == 1 {
            self.opening_server
        } else {
            self.opening_server.opponent()
        }
    }
}

/// One set in the match history. Only the last set in the sequence may be
/// open; all earlier ones are completed with a winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRecord {
    pub games: PerTeam<u8>,
    pub tiebreak: Option<TiebreakScore>,
    pub completed: bool,
    pub winner: Option<Team>,
}

impl SetRecord {
    pub fn open() -> Self {
        Self {
            games: PerTeam::default(),
            tiebreak: None,
            completed: false,
            winner: None,
        }
    }
}

/// Counters for the game currently being played. Reset whenever a game or
/// tiebreak concludes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    pub points: PerTeam<u8>,
    pub in_tiebreak: bool,
    /// Distinct times this game has been level at 40-40 or beyond. Only the
    /// silver-point rule reads it.
    pub deuce_entries: u8,
}

/// Running totals for raw-points ("Americano") play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProgress {
    pub points: PerTeam<u16>,
    pub serves_this_turn: u8,
    pub total_serves: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// A team reached the configured number of sets.
    Sets,
    /// A team reached the raw-points target.
    Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: Team,
    pub reason: FinishReason,
}

/// Everything needed to resume or redisplay a match in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub id: Uuid,
    /// Set history, oldest first. Never empty: a match always holds either
    /// an open set or, once finished, its final completed set.
    pub sets: Vec<SetRecord>,
    pub game: GameScore,
    pub server: Team,
    /// Set exactly once. Afterwards the scoring transition is a no-op.
    pub finished: Option<MatchOutcome>,
    /// Present only in raw-points mode.
    pub raw: Option<RawProgress>,
    pub stats: MatchStats,
}

impl MatchState {
    /// Creates the state for a fresh match. The configuration is validated
    /// here so a malformed one is rejected before any point is scored.
    pub fn new(rules: &Rules, first_server: Team) -> Result<Self, ConfigError> {
        rules.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            sets: vec![SetRecord::open()],
            game: GameScore::default(),
            server: first_server,
            finished: None,
            raw: rules.is_raw_points().then(RawProgress::default),
            stats: MatchStats::started_now(),
        })
    }

    /// The set currently being played (or, once the match is over, the set
    /// that ended it).
    pub fn current_set(&self) -> &SetRecord {
        self.sets.last().expect("a match always holds a current set")
    }

    pub(crate) fn current_set_mut(&mut self) -> &mut SetRecord {
        self.sets
            .last_mut()
            .expect("a match always holds a current set")
    }

    pub fn sets_won(&self, team: Team) -> u8 {
        self.sets
            .iter()
            .filter(|set| set.winner == Some(team))
            .count() as u8
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }
}
