//! Integration tests for the game engine

use tetris_arcade::core::{Board, GameState, KickPolicy, Piece, TickOutcome};
use tetris_arcade::types::{GameStatus, InputEvent, PieceKind, Rotation, BOARD_HEIGHT};

const BOTTOM: i8 = BOARD_HEIGHT as i8 - 1;

/// Play random-ish inputs from a seed until game over or `limit` steps.
fn play(seed: u32, limit: usize, mut on_step: impl FnMut(&GameState)) -> GameState {
    const SCRIPT: [InputEvent; 7] = [
        InputEvent::MoveLeft,
        InputEvent::Rotate,
        InputEvent::MoveRight,
        InputEvent::MoveDown,
        InputEvent::RotateCcw,
        InputEvent::MoveRight,
        InputEvent::HardDrop,
    ];
    let mut state = GameState::new(seed);
    for step in 0..limit {
        if state.game_over() {
            break;
        }
        state.apply(SCRIPT[(step + seed as usize) % SCRIPT.len()]);
        state.advance(120);
        on_step(&state);
    }
    state
}

#[test]
fn test_game_lifecycle() {
    let state = GameState::new(12345);
    assert_eq!(state.status(), GameStatus::Running);
    assert!(state.active().is_some());
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
}

#[test]
fn test_same_seed_same_game() {
    let a = play(99, 400, |_| {});
    let b = play(99, 400, |_| {});
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.pieces_locked(), b.pieces_locked());
}

#[test]
fn test_score_never_decreases() {
    for seed in [1, 7, 4242] {
        let mut last = 0;
        play(seed, 2_000, |state| {
            assert!(state.score() >= last, "seed {seed}");
            last = state.score();
        });
    }
}

#[test]
fn test_stacking_ends_in_game_over_and_freezes() {
    let mut state = GameState::new(3);
    while !state.game_over() {
        state.apply(InputEvent::HardDrop);
    }
    assert!(state.active().is_none());

    let frozen = state.snapshot();
    for event in [
        InputEvent::MoveLeft,
        InputEvent::Rotate,
        InputEvent::HardDrop,
        InputEvent::TogglePause,
        InputEvent::Resume,
    ] {
        assert!(!state.apply(event));
    }
    assert!(!state.advance(10_000));
    assert_eq!(state.tick(), TickOutcome::Idle);
    assert_eq!(state.snapshot(), frozen);
}

#[test]
fn test_pause_blocks_gravity_and_moves() {
    let mut state = GameState::new(5);
    assert!(state.apply(InputEvent::Pause));
    let before = state.snapshot();

    assert!(!state.apply(InputEvent::MoveLeft));
    assert!(!state.advance(5_000));
    assert_eq!(state.snapshot(), before);

    assert!(state.apply(InputEvent::TogglePause));
    assert_eq!(state.status(), GameStatus::Running);
}

#[test]
fn test_gravity_follows_level_interval() {
    let mut state = GameState::new(8);
    let row = state.active().unwrap().row;

    assert!(!state.advance(state.gravity_interval_ms() - 1));
    assert_eq!(state.active().unwrap().row, row);
    assert!(state.advance(1));
    assert_eq!(state.active().unwrap().row, row + 1);
}

#[test]
fn test_hard_drop_scores_two_per_row() {
    let active = Piece::new(PieceKind::O, Rotation::North, 4, 0);
    let mut state = GameState::from_parts(Board::new(), active, 1);
    // O's lowest cells are on box row 1, so it can fall to row BOTTOM - 1.
    let event = state.hard_drop().unwrap();
    assert_eq!(event.rows_cleared, 0);
    assert_eq!(state.score(), 2 * (BOTTOM - 1) as u32);
}

#[test]
fn test_single_line_clear_scores_by_level() {
    let mut board = Board::new();
    board.fill_row_except(BOTTOM, PieceKind::J, &[0, 1, 2, 3]);
    let active = Piece::new(PieceKind::I, Rotation::North, 0, BOTTOM - 1);
    let mut state = GameState::from_parts(board, active, 1);

    let event = state.hard_drop().unwrap();
    assert_eq!(event.rows_cleared, 1);
    assert_eq!(event.line_score, 100);
    assert_eq!(state.lines(), 1);
    assert_eq!(state.score(), 100);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_kick_policy_decides_wall_rotation() {
    // Vertical I hugging the right wall; rotating to flat needs a kick.
    let active = Piece::new(PieceKind::I, Rotation::East, 7, 5);
    assert!(active.cells().all(|(col, _)| col == 9));

    let mut shift = GameState::from_parts(Board::new(), active, 1);
    assert!(shift.apply(InputEvent::Rotate));
    assert_eq!(shift.active().unwrap().rotation, Rotation::South);

    let mut strict = GameState::from_parts(Board::new(), active, 1).with_kicks(KickPolicy::None);
    assert!(!strict.apply(InputEvent::Rotate));
    assert_eq!(strict.active(), Some(active));
}

#[test]
fn test_soft_drop_locks_when_blocked() {
    let active = Piece::new(PieceKind::O, Rotation::North, 0, BOTTOM - 1);
    let mut state = GameState::from_parts(Board::new(), active, 1);

    assert!(state.apply(InputEvent::MoveDown));
    assert_eq!(state.pieces_locked(), 1);
    assert_eq!(state.board().filled_count(), 4);
    assert_ne!(state.active(), Some(active));
}
