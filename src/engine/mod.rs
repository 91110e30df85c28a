// Public API
pub use situation::Situation;
pub use state::{
    FinishReason, GameScore, MatchOutcome, MatchState, PerTeam, RawProgress,
    SetRecord, Team, TiebreakScore,
};

// Internal modules
mod score;
mod situation;
mod state;
