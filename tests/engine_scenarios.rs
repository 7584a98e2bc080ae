//! End-to-end behaviour of the puzzle engine as a front-end drives it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use tile_puzzle::{Board, Mode, MoveOutcome, Phase, PuzzleConfig, PuzzleEngine, PuzzleError};

fn ids(engine: &PuzzleEngine) -> Vec<Option<usize>> {
    engine.board().expect("initialized").ids()
}

fn initialized(config: PuzzleConfig) -> PuzzleEngine {
    let size = config.grid_size;
    let mut engine = PuzzleEngine::new(&config).expect("valid config");
    engine.initialize(size).expect("valid size");
    engine
}

#[test]
fn test_initialize_is_solved_for_every_size() {
    for size in 2..=7 {
        for config in [PuzzleConfig::sliding(size), PuzzleConfig::swap(size)] {
            let engine = initialized(config);
            assert!(engine.is_solved());
            assert_eq!(engine.move_count(), 0);
            assert_eq!(engine.phase(), Phase::InPlay);
        }
    }
}

#[test]
fn test_initialize_rejects_small_grids() {
    let mut engine = PuzzleEngine::new(&PuzzleConfig::default()).unwrap();
    for size in [0, 1] {
        assert!(matches!(
            engine.initialize(size),
            Err(PuzzleError::InvalidConfiguration { .. })
        ));
    }
    assert_eq!(engine.phase(), Phase::Unconfigured);
    assert!(engine.board().is_none());
}

#[test]
fn test_mismatched_mode_parameters_are_rejected() {
    let config = PuzzleConfig {
        line_slides: true,
        ..PuzzleConfig::swap(3)
    };
    assert!(matches!(
        PuzzleEngine::new(&config),
        Err(PuzzleError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_scenario_a_solved_by_construction() {
    let engine = initialized(PuzzleConfig::sliding(3));
    assert!(engine.is_solved());
    assert_eq!(engine.blank(), Some(8));
}

#[test]
fn test_scenario_b_single_slide() {
    let mut engine = initialized(PuzzleConfig::sliding(3));

    assert_eq!(engine.attempt_move(7).unwrap(), MoveOutcome::Accepted);

    let board = ids(&engine);
    assert_eq!(board[8], Some(7));
    assert_eq!(board[7], None);
    assert_eq!(engine.blank(), Some(7));
    assert_eq!(engine.move_count(), 1);
    assert!(!engine.is_solved());
}

#[test]
fn test_scenario_c_free_swap_win() {
    let mut engine = PuzzleEngine::from_arrangement(
        &PuzzleConfig::swap(2),
        2,
        &[Some(1), Some(0), Some(3), Some(2)],
    )
    .unwrap();

    assert_eq!(engine.attempt_move(0).unwrap(), MoveOutcome::Selected);
    assert_eq!(engine.move_count(), 0);
    assert_eq!(engine.attempt_move(1).unwrap(), MoveOutcome::Accepted);
    assert_eq!(ids(&engine), vec![Some(0), Some(1), Some(3), Some(2)]);
    assert_eq!(engine.move_count(), 1);
    assert!(!engine.is_solved());

    engine.attempt_move(2).unwrap();
    assert_eq!(engine.attempt_move(3).unwrap(), MoveOutcome::Accepted);
    assert_eq!(ids(&engine), vec![Some(0), Some(1), Some(2), Some(3)]);
    assert_eq!(engine.move_count(), 2);
    assert!(engine.is_solved());
    assert_eq!(engine.phase(), Phase::Solved);
}

#[test]
fn test_scenario_d_rejection() {
    // Blank in the centre, two slides away from solved.
    let mut engine = PuzzleEngine::from_arrangement(
        &PuzzleConfig::sliding(3),
        3,
        &[Some(0), Some(1), Some(2), Some(3), None, Some(4), Some(6), Some(7), Some(5)],
    )
    .unwrap();
    assert_eq!(engine.blank(), Some(4));
    let before = ids(&engine);

    assert_eq!(engine.attempt_move(0).unwrap(), MoveOutcome::Rejected);
    assert_eq!(ids(&engine), before);
    assert_eq!(engine.move_count(), 0);
}

#[test]
fn test_out_of_range_slot_is_invalid_argument() {
    let mut engine = initialized(PuzzleConfig::sliding(3));
    let before = ids(&engine);

    assert_eq!(
        engine.attempt_move(9),
        Err(PuzzleError::InvalidArgument { slot: 9, len: 9 })
    );
    assert_eq!(ids(&engine), before);
    assert_eq!(engine.move_count(), 0);

    let mut engine = initialized(PuzzleConfig::swap(2));
    assert!(matches!(
        engine.attempt_swap(0, 4),
        Err(PuzzleError::InvalidArgument { slot: 4, .. })
    ));
}

#[test]
fn test_moves_outside_legal_targets_change_nothing() {
    for line_slides in [false, true] {
        let config = PuzzleConfig {
            line_slides,
            ..PuzzleConfig::sliding(4).with_seed(11)
        };
        let engine = PuzzleEngine::start(&config).unwrap();
        let legal = engine.legal_targets();

        for slot in 0..16 {
            if legal.contains(&slot) {
                continue;
            }
            let mut attempt = engine.clone();
            assert_eq!(attempt.attempt_move(slot).unwrap(), MoveOutcome::Rejected);
            assert_eq!(ids(&attempt), ids(&engine));
            assert_eq!(attempt.move_count(), 0);
        }
    }
}

#[test]
fn test_random_play_preserves_bijection() {
    let mut rng = SmallRng::seed_from_u64(99);
    for size in 2..=5 {
        let mut engine = PuzzleEngine::start(&PuzzleConfig::sliding(size).with_seed(size as u64)).unwrap();
        let mut accepted = 0;

        for _ in 0..500 {
            let slot = rng.gen_range(0..size * size);
            if engine.attempt_move(slot).unwrap().is_accepted() {
                accepted += 1;
            }
            let board = ids(&engine);
            assert!(Board::from_ids(size, &board, true).is_ok());
            assert_eq!(engine.blank(), board.iter().position(Option::is_none));
            if engine.phase() == Phase::Solved {
                break;
            }
        }
        assert_eq!(engine.move_count(), accepted);
    }
}

#[test]
fn test_swap_reselect_is_a_no_op() {
    let mut engine = PuzzleEngine::start(&PuzzleConfig::swap(3).with_seed(5)).unwrap();
    let before = ids(&engine);

    assert_eq!(engine.attempt_move(4).unwrap(), MoveOutcome::Selected);
    assert_eq!(engine.selected(), Some(4));
    assert_eq!(engine.attempt_move(4).unwrap(), MoveOutcome::Cleared);
    assert_eq!(engine.selected(), None);
    assert_eq!(engine.attempt_swap(2, 2).unwrap(), MoveOutcome::Cleared);

    assert_eq!(ids(&engine), before);
    assert_eq!(engine.move_count(), 0);
}

#[test]
fn test_swap_mode_allows_any_pair() {
    let mut engine = initialized(PuzzleConfig::swap(3));
    assert_eq!(engine.legal_targets(), (0..9).collect::<Vec<_>>());

    assert_eq!(engine.attempt_swap(0, 8).unwrap(), MoveOutcome::Accepted);
    let board = ids(&engine);
    assert_eq!(board[0], Some(8));
    assert_eq!(board[8], Some(0));
    assert_eq!(engine.move_count(), 1);
}

#[test]
fn test_shuffle_resets_counter_and_never_leaves_solved() {
    for seed in 0..10 {
        for size in 2..=5 {
            for config in [PuzzleConfig::sliding(size), PuzzleConfig::swap(size)] {
                let mut engine = initialized(config.with_seed(seed));
                // Rack up a few moves first.
                for slot in engine.legal_targets().into_iter().take(2) {
                    engine.attempt_move(slot).unwrap();
                }

                engine.shuffle().unwrap();
                assert_eq!(engine.move_count(), 0);
                assert!(!engine.is_solved());
                assert_eq!(engine.selected(), None);
            }
        }
    }
}

#[test]
fn test_seeded_shuffles_are_reproducible() {
    let config = PuzzleConfig::sliding(4).with_seed(2024);
    let a = PuzzleEngine::start(&config).unwrap();
    let b = PuzzleEngine::start(&config).unwrap();
    assert_eq!(ids(&a), ids(&b));
}

#[test]
fn test_reset_starts_new_round_at_same_size() {
    let mut engine = PuzzleEngine::start(&PuzzleConfig::sliding(4).with_seed(8)).unwrap();
    let slot = engine.legal_targets()[0];
    engine.attempt_move(slot).unwrap();

    engine.reset().unwrap();
    assert_eq!(engine.grid_size(), Some(4));
    assert_eq!(engine.move_count(), 0);
    assert!(!engine.is_solved());
}

#[test]
fn test_unreachable_arrangement_is_refused() {
    let result = PuzzleEngine::from_arrangement(
        &PuzzleConfig::sliding(3),
        3,
        &[Some(1), Some(0), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7), None],
    );
    assert!(matches!(result, Err(PuzzleError::InvalidConfiguration { .. })));
}

#[test]
fn test_config_file_drives_engine() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "grid_size = 4\nmode = \"swap\"\nline_slides = false\nseed = 3").unwrap();

    let config = PuzzleConfig::from_file(file.path()).unwrap();
    let engine = PuzzleEngine::start(&config).unwrap();
    assert_eq!(engine.mode(), Mode::Swap);
    assert_eq!(engine.grid_size(), Some(4));
    assert_eq!(engine.tile_count(), 16);
}

#[test]
fn test_missing_config_file_reports_error() {
    let err = PuzzleConfig::from_file("/nonexistent/tile-puzzle.toml").unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}
