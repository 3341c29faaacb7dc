//! Minimal head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other through the referee,
//! with an optional seeded random opening prefix. Every observation collapse
//! draws from the match RNG, so a seed fully determines a game between
//! deterministic engines.
//!
//! Jokers stay out of engine-vs-engine play unless
//! `MatchConfig::search_params.allow_jokers` is set. A joker from an engine
//! that was not allowed one is rejected as an illegal decision.

use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;
use tracing::info;

use crate::engines::engine_random::legal_decisions;
use crate::engines::engine_trait::{Engine, SearchParams};
use crate::errors::{EngineError, EngineResult};
use crate::game_flow::referee::{apply_decision, final_score, FinalScore};
use crate::game_state::decision::Decision;
use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::{PieceType, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    BlackWin,
    WhiteWin,
    Draw,
    MaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, color: Player },
    Draw,
    MaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub search_params: SearchParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_min_plies: 0,
            opening_max_plies: 4,
            search_params: SearchParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub score: FinalScore,
    pub opening_decisions: Vec<Decision>,
    pub played_decisions: Vec<Decision>,
    pub black_move_count: u32,
    pub white_move_count: u32,
    pub black_total_time_ns: u128,
    pub white_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match from the standard opening.
pub fn play_engine_match(
    mut engine_black: Box<dyn Engine>,
    mut engine_white: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> EngineResult<MatchResult> {
    play_match_internal(
        GameState::new_game(),
        &mut engine_black,
        &mut engine_white,
        seed,
        config,
        true,
    )
}

/// Play a single seeded match from a caller-provided state, without a random
/// opening prefix.
pub fn play_engine_match_from_state(
    mut engine_black: Box<dyn Engine>,
    mut engine_white: Box<dyn Engine>,
    start_state: GameState,
    seed: u64,
    config: MatchConfig,
) -> EngineResult<MatchResult> {
    play_match_internal(
        start_state,
        &mut engine_black,
        &mut engine_white,
        seed,
        config,
        false,
    )
}

fn is_joker_drop(decision: Decision) -> bool {
    matches!(
        decision,
        Decision::Placement {
            piece_type: PieceType::Joker,
            ..
        }
    )
}

fn outcome_for(score: FinalScore) -> MatchOutcome {
    match score.winner() {
        Some(Player::Black) => MatchOutcome::BlackWin,
        Some(Player::White) => MatchOutcome::WhiteWin,
        None => MatchOutcome::Draw,
    }
}

fn play_match_internal(
    mut state: GameState,
    engine_black: &mut Box<dyn Engine>,
    engine_white: &mut Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
    apply_random_opening: bool,
) -> EngineResult<MatchResult> {
    engine_black.new_game();
    engine_white.new_game();
    let mut rng = StdRng::seed_from_u64(seed);

    let opening_decisions = if apply_random_opening {
        let (after, decisions) = apply_seeded_random_opening(
            &state,
            &mut rng,
            config.opening_min_plies,
            config.opening_max_plies,
            config.search_params.allow_jokers,
        )?;
        state = after;
        decisions
    } else {
        Vec::new()
    };

    let mut played_decisions = Vec::<Decision>::new();
    let mut black_move_count = 0u32;
    let mut white_move_count = 0u32;
    let mut black_total_time_ns = 0u128;
    let mut white_total_time_ns = 0u128;

    for _ in 0..config.max_plies {
        if state.game_over {
            break;
        }

        let mover = state.current_player;
        let started = Instant::now();
        let out = match mover {
            Player::Black => engine_black.choose_move(&state, &config.search_params)?,
            Player::White => engine_white.choose_move(&state, &config.search_params)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Player::Black => {
                black_move_count = black_move_count.saturating_add(1);
                black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
            }
            Player::White => {
                white_move_count = white_move_count.saturating_add(1);
                white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        if !config.search_params.allow_jokers && is_joker_drop(out.decision) {
            return Err(EngineError::illegal(format!(
                "{mover} dropped a joker in a match without jokers"
            )));
        }
        state = apply_decision(&state, out.decision, &mut rng)?.state;
        played_decisions.push(out.decision);
    }

    let outcome = if state.game_over {
        outcome_for(final_score(&state))
    } else {
        MatchOutcome::MaxPlies
    };

    Ok(MatchResult {
        outcome,
        score: final_score(&state),
        final_state: state,
        opening_decisions,
        played_decisions,
        black_move_count,
        white_move_count,
        black_total_time_ns,
        white_total_time_ns,
    })
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> EngineResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_black = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (black, white) = if player1_is_black {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            info!(game = i + 1, games = config.games, seed, black, white, "series game");
        }

        let result = if player1_is_black {
            play_engine_match(player1_factory(), player2_factory(), seed, config.per_game.clone())?
        } else {
            play_engine_match(player2_factory(), player1_factory(), seed, config.per_game.clone())?
        };

        let (p1_moves, p1_ns, p2_moves, p2_ns) = if player1_is_black {
            (
                result.black_move_count,
                result.black_total_time_ns,
                result.white_move_count,
                result.white_total_time_ns,
            )
        } else {
            (
                result.white_move_count,
                result.white_total_time_ns,
                result.black_move_count,
                result.black_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let winner_color = match result.outcome {
            MatchOutcome::BlackWin => Some(Player::Black),
            MatchOutcome::WhiteWin => Some(Player::White),
            MatchOutcome::Draw | MatchOutcome::MaxPlies => None,
        };
        let mapped = match winner_color {
            Some(color) => {
                let player1_won = (color == Player::Black) == player1_is_black;
                let player = if player1_won {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin { player, color }
            }
            None => {
                stats.draws += 1;
                if result.outcome == MatchOutcome::MaxPlies {
                    SeriesOutcome::MaxPlies
                } else {
                    SeriesOutcome::Draw
                }
            }
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            info!(
                game = i + 1,
                result = ?mapped,
                black = result.score.black,
                white = result.score.white,
                p1_wins = stats.player1_wins,
                p2_wins = stats.player2_wins,
                draws = stats.draws,
                "series result"
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

/// Play `min..=max` uniformly random legal decisions (pass when stuck).
pub fn apply_seeded_random_opening<R: Rng + ?Sized>(
    initial: &GameState,
    rng: &mut R,
    min_plies: u8,
    max_plies: u8,
    allow_jokers: bool,
) -> EngineResult<(GameState, Vec<Decision>)> {
    let mut state = initial.clone();
    let mut decisions = Vec::<Decision>::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        if state.game_over {
            break;
        }
        let legal = legal_decisions(&state, allow_jokers);
        let chosen = legal.as_slice().choose(rng).copied().unwrap_or(Decision::Pass);
        state = apply_decision(&state, chosen, rng)?.state;
        decisions.push(chosen);
    }

    Ok((state, decisions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_hard::HardEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_trait::EngineOutput;
    use crate::move_generation::legal_move_checks::JOKER_UNLOCK_TURN;

    #[test]
    fn random_vs_random_plays_to_the_end() {
        let result = play_engine_match(
            Box::new(RandomEngine::seeded(1)),
            Box::new(RandomEngine::seeded(2)),
            42,
            MatchConfig {
                max_plies: 400,
                ..MatchConfig::default()
            },
        )
        .expect("match should run");

        assert!(result.final_state.game_over);
        assert_ne!(result.outcome, MatchOutcome::MaxPlies);
        assert_eq!(result.outcome, outcome_for(result.score));
        assert!(result.black_move_count + result.white_move_count > 0);
    }

    #[test]
    fn same_seed_replays_the_same_game() {
        let play = || {
            play_engine_match(
                Box::new(RandomEngine::seeded(5)),
                Box::new(RandomEngine::seeded(6)),
                9,
                MatchConfig {
                    max_plies: 30,
                    opening_min_plies: 2,
                    opening_max_plies: 6,
                    ..MatchConfig::default()
                },
            )
            .expect("match should run")
        };
        let a = play();
        let b = play();
        assert_eq!(a.opening_decisions, b.opening_decisions);
        assert_eq!(a.played_decisions, b.played_decisions);
        assert_eq!(a.final_state, b.final_state);
    }

    struct JokerDropper;

    impl Engine for JokerDropper {
        fn name(&self) -> &str {
            "joker dropper"
        }

        fn choose_move(
            &mut self,
            game_state: &GameState,
            _params: &SearchParams,
        ) -> EngineResult<EngineOutput> {
            let decision = legal_decisions(game_state, true)
                .into_iter()
                .find(|d| is_joker_drop(*d))
                .unwrap_or(Decision::Pass);
            Ok(EngineOutput {
                decision,
                info_lines: Vec::new(),
            })
        }
    }

    #[test]
    fn matches_without_jokers_never_see_one() {
        let result = play_engine_match(
            Box::new(RandomEngine::seeded(8)),
            Box::new(RandomEngine::seeded(9)),
            3,
            MatchConfig {
                max_plies: 400,
                ..MatchConfig::default()
            },
        )
        .expect("match should run");

        assert!(result
            .opening_decisions
            .iter()
            .chain(result.played_decisions.iter())
            .all(|d| !is_joker_drop(*d)));
        assert!(!result.final_state.has_used_joker_for(Player::Black));
        assert!(!result.final_state.has_used_joker_for(Player::White));
    }

    #[test]
    fn joker_from_an_engine_is_rejected_unless_allowed() {
        let mut start = GameState::new_game();
        start.current_turn = JOKER_UNLOCK_TURN;

        let err = play_engine_match_from_state(
            Box::new(JokerDropper),
            Box::new(RandomEngine::seeded(2)),
            start.clone(),
            0,
            MatchConfig::default(),
        );
        assert!(matches!(err, Err(EngineError::IllegalDecision { .. })));

        let allowed = play_engine_match_from_state(
            Box::new(JokerDropper),
            Box::new(RandomEngine::seeded(2)),
            start,
            0,
            MatchConfig {
                max_plies: 1,
                search_params: SearchParams {
                    allow_jokers: true,
                    ..SearchParams::default()
                },
                ..MatchConfig::default()
            },
        )
        .expect("jokers allowed");
        assert!(is_joker_drop(allowed.played_decisions[0]));
        assert!(allowed.final_state.has_used_joker_for(Player::Black));
    }

    #[test]
    fn match_from_a_finished_state_plays_nothing() {
        let mut start = GameState::new_game();
        start.game_over = true;
        let result = play_engine_match_from_state(
            Box::new(RandomEngine::seeded(1)),
            Box::new(RandomEngine::seeded(2)),
            start,
            0,
            MatchConfig::default(),
        )
        .expect("match should run");

        assert!(result.opening_decisions.is_empty());
        assert!(result.played_decisions.is_empty());
        assert_eq!(result.outcome, MatchOutcome::Draw);
    }

    #[test]
    fn hard_vs_random_series_reports_stats() {
        let stats = play_engine_match_series(
            || Box::new(HardEngine::new()) as Box<dyn Engine>,
            || Box::new(RandomEngine::seeded(3)) as Box<dyn Engine>,
            MatchSeriesConfig {
                games: 2,
                base_seed: 777,
                per_game: MatchConfig {
                    max_plies: 24,
                    search_params: SearchParams {
                        depth: Some(2),
                        ..SearchParams::default()
                    },
                    ..MatchConfig::default()
                },
                verbose: false,
            },
        )
        .expect("series should run");

        assert_eq!(stats.games, 2);
        assert_eq!(stats.outcomes.len(), 2);
        assert_eq!(
            u32::from(stats.player1_wins + stats.player2_wins + stats.draws),
            2
        );
        assert!(stats.player1_moves > 0);
        assert!(stats.overall_avg_move_time_ms >= 0.0);
        assert!(stats.report().starts_with("games=2 "));
    }
}
