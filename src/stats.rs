// Running match statistics, updated by the scoring transition on every
// point, plus the terminal summary the persistence layer writes out once a
// match is over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{FinishReason, MatchState, PerTeam, Team};
use crate::rules::Rules;

/// A run of consecutive points taken by one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub team: Team,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub started_at: DateTime<Utc>,
    pub total_points: u32,
    pub points_won: PerTeam<u32>,
    /// Points won by the team that was serving when the point was played.
    pub service_points_won: PerTeam<u32>,
    /// Games and tiebreaks won by the team that was not serving when they
    /// concluded.
    pub breaks: PerTeam<u32>,
    pub current_streak: Option<Streak>,
    pub longest_streak: Option<Streak>,
    /// One entry per point ever played, oldest first.
    pub point_history: Vec<Team>,
}

impl MatchStats {
    pub(crate) fn started_now() -> Self {
        Self {
            started_at: Utc::now(),
            total_points: 0,
            points_won: PerTeam::default(),
            service_points_won: PerTeam::default(),
            breaks: PerTeam::default(),
            current_streak: None,
            longest_streak: None,
            point_history: Vec::new(),
        }
    }

    /// Per-point bookkeeping shared by every scoring mode. Breaks are not
    /// counted here; they are recorded when a game or tiebreak concludes.
    pub(crate) fn record_point(&mut self, team: Team, server: Team) {
        self.total_points += 1;
        self.points_won[team] += 1;
        self.point_history.push(team);
        if server == team {
            self.service_points_won[team] += 1;
        }

        let streak = match self.current_streak {
            Some(current) if current.team == team => Streak {
                team,
                length: current.length + 1,
            },
            _ => Streak { team, length: 1 },
        };
        self.current_streak = Some(streak);
        match self.longest_streak {
            Some(best) if best.length >= streak.length => {}
            _ => self.longest_streak = Some(streak),
        }
    }

    pub(crate) fn record_break(&mut self, winner: Team) {
        self.breaks[winner] += 1;
    }
}

/// Terminal summary of a finished match, shaped as a plain value the
/// persistence layer can write out without touching the engine again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: Uuid,
    pub rules: Rules,
    pub winner: Team,
    pub reason: FinishReason,
    /// Game score of every completed set, in playing order. Empty in
    /// raw-points mode.
    pub set_scores: Vec<PerTeam<u8>>,
    /// Final point totals in raw-points mode.
    pub raw_points: Option<PerTeam<u16>>,
    pub total_points: u32,
    pub duration_secs: i64,
}

impl MatchSummary {
    /// `None` while the match is still in progress. The completion instant
    /// is supplied by the caller; the engine itself never reads the clock
    /// after initialization.
    pub fn from_state(
        state: &MatchState,
        rules: &Rules,
        completed_at: DateTime<Utc>,
    ) -> Option<Self> {
        let outcome = state.finished?;
        Some(Self {
            match_id: state.id,
            rules: *rules,
            winner: outcome.winner,
            reason: outcome.reason,
            set_scores: state
                .sets
                .iter()
                .filter(|set| set.completed)
                .map(|set| set.games)
                .collect(),
            raw_points: state.raw.map(|raw| raw.points),
            total_points: state.stats.total_points,
            duration_secs: (completed_at - state.stats.started_at).num_seconds(),
        })
    }
}
