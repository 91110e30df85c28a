use std::sync::Once;

use matchpoint::{DeuceRule, MatchSession, MatchState, Rules, SetTieRule, Team};

static TRACING: Once = Once::new();

/// Routes engine logs into the test harness output. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "matchpoint=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Three points each: the shortest route from 0-0 to deuce.
pub const TO_DEUCE: [Team; 6] = [
    Team::Home,
    Team::Away,
    Team::Home,
    Team::Away,
    Team::Home,
    Team::Away,
];

pub fn standard_rules(
    deuce_rule: DeuceRule,
    set_tie_rule: SetTieRule,
    sets_target: u8,
) -> Rules {
    Rules::Standard {
        deuce_rule,
        set_tie_rule,
        sets_target,
    }
}

pub fn americano_rules(target_points: u16, serves_per_turn: u8) -> Rules {
    Rules::RawPoints {
        target_points,
        serves_per_turn,
        side_swap_every_serves: serves_per_turn * 2,
    }
}

pub fn session(rules: Rules) -> MatchSession {
    init_tracing();
    MatchSession::new(rules, Team::Home).expect("test rules should be valid")
}

pub fn score_many(state: MatchState, rules: &Rules, points: &[Team]) -> MatchState {
    points
        .iter()
        .fold(state, |state, team| state.score_point(rules, *team))
}

/// Each listed team takes a whole game with four straight points.
pub fn win_games(state: MatchState, rules: &Rules, winners: &[Team]) -> MatchState {
    winners
        .iter()
        .fold(state, |state, team| score_many(state, rules, &[*team; 4]))
}
