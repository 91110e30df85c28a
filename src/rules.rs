// Rule configuration for a match. Built once when the match is set up and
// never mutated afterwards; every scoring and query call receives it by
// reference alongside the state it applies to.

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;
use thiserror::Error;

/// How a game tied at 40-40 is resolved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum DeuceRule {
    /// Classic scoring: a team must take two points in a row from deuce.
    Advantage,
    /// The first point after deuce wins the game outright.
    GoldenPoint,
    /// The first deuce still plays an advantage; a second deuce in the same
    /// game becomes sudden death.
    SilverPoint,
}

/// What happens when a set reaches six games each.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum SetTieRule {
    /// A tiebreak to seven, win by two, decides the set.
    Tiebreak,
    /// Games continue until one team leads by two.
    PlayOn,
}

/// The active scoring system and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Rules {
    Standard {
        deuce_rule: DeuceRule,
        set_tie_rule: SetTieRule,
        /// Sets required to win the match.
        sets_target: u8,
    },
    /// "Americano" scoring: a single running point count per team, no games
    /// or sets, with the serve rotating every fixed number of serves.
    RawPoints {
        /// Total points a team needs to win the match.
        target_points: u16,
        serves_per_turn: u8,
        /// Teams change ends every this many serves.
        side_swap_every_serves: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("sets target must be at least 1")]
    ZeroSetsTarget,
    #[error("target points must be at least 1")]
    ZeroTargetPoints,
    #[error("serves per turn must be at least 1")]
    ZeroServesPerTurn,
    #[error("side swap interval must be at least 1")]
    ZeroSideSwapInterval,
}

impl Rules {
    /// Rejects self-contradictory parameter values. Called by the match
    /// initializer so a bad configuration never reaches live scoring.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Rules::Standard { sets_target, .. } => {
                if *sets_target == 0 {
                    return Err(ConfigError::ZeroSetsTarget);
                }
                Ok(())
            }
            Rules::RawPoints {
                target_points,
                serves_per_turn,
                side_swap_every_serves,
            } => {
                if *target_points == 0 {
                    return Err(ConfigError::ZeroTargetPoints);
                }
                if *serves_per_turn == 0 {
                    return Err(ConfigError::ZeroServesPerTurn);
                }
                if *side_swap_every_serves == 0 {
                    return Err(ConfigError::ZeroSideSwapInterval);
                }
                Ok(())
            }
        }
    }

    pub fn is_raw_points(&self) -> bool {
        matches!(self, Rules::RawPoints { .. })
    }
}
