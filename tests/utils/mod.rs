pub mod builders;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use builders::{
    americano_rules, init_tracing, score_many, session, standard_rules,
    win_games, TO_DEUCE,
};
