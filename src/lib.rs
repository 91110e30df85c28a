// Library crate for the matchpoint scoring engine
// This file exposes the public API consumed by the scoreboard application

pub mod display;
pub mod engine;
pub mod rules;
pub mod session;
pub mod stats;

// Re-export commonly used types for easier access by callers and tests
pub use display::DisplayModel;
pub use engine::{
    FinishReason, GameScore, MatchOutcome, MatchState, PerTeam, RawProgress,
    SetRecord, Situation, Team, TiebreakScore,
};
pub use rules::{ConfigError, DeuceRule, Rules, SetTieRule};
pub use session::MatchSession;
pub use stats::{MatchStats, MatchSummary, Streak};
