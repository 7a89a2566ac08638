//! Game state module - the Tetris engine
//!
//! Ties together board, pieces, piece queue and scoring. Handles gravity
//! ticks, validated movement and rotation, locking, line clears and the
//! Running/Paused/GameOver lifecycle.

use crate::board::Board;
use crate::piece::{KickPolicy, Piece};
use crate::rng::PieceQueue;
use crate::scoring::{drop_score, gravity_interval_ms, level_for_lines, line_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Emitted every time a piece is written into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub rows_cleared: u32,
    /// Line clear points awarded by this lock (drop points excluded).
    pub line_score: u32,
    /// The following spawn collided and the game ended.
    pub game_over: bool,
}

/// Result of a single gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, or nothing to move.
    Idle,
    /// The active piece moved down one row.
    Moved,
    /// The active piece could not move down and was locked.
    Locked(LockEvent),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Piece>,
    next: PieceKind,
    queue: PieceQueue,
    kick_policy: KickPolicy,
    score: u32,
    lines: u32,
    level: u32,
    status: GameStatus,
    gravity_timer_ms: u32,
    pieces_locked: u32,
}

impl GameState {
    /// Create a running game with the given RNG seed and the default kick policy
    pub fn new(seed: u32) -> Self {
        Self::with_kick_policy(seed, KickPolicy::default())
    }

    pub fn with_kick_policy(seed: u32, kick_policy: KickPolicy) -> Self {
        let mut queue = PieceQueue::new(seed);
        let first = queue.draw();
        let mut state = Self::empty(Board::new(), queue, kick_policy);
        state.place_spawned(first);
        state
    }

    /// Build a running game from an explicit board and active piece.
    ///
    /// Used for fixtures and replays. If `active` does not fit the board the
    /// game starts over.
    pub fn from_parts(board: Board, active: Piece, seed: u32) -> Self {
        let queue = PieceQueue::new(seed);
        let mut state = Self::empty(board, queue, KickPolicy::default());
        if state.board.fits(&active) {
            state.active = Some(active);
        } else {
            state.status = GameStatus::GameOver;
        }
        state
    }

    fn empty(board: Board, mut queue: PieceQueue, kick_policy: KickPolicy) -> Self {
        let next = queue.draw();
        Self {
            board,
            active: None,
            next,
            queue,
            kick_policy,
            score: 0,
            lines: 0,
            level: START_LEVEL,
            status: GameStatus::Running,
            gravity_timer_ms: 0,
            pieces_locked: 0,
        }
    }

    pub fn with_kicks(mut self, kick_policy: KickPolicy) -> Self {
        self.kick_policy = kick_policy;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Kind of the piece that spawns after the active one locks.
    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn kick_policy(&self) -> KickPolicy {
        self.kick_policy
    }

    pub fn seed(&self) -> u32 {
        self.queue.seed()
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Current gravity interval based on level
    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.level)
    }

    /// Apply an input event. Returns whether the state changed.
    ///
    /// Illegal moves and rotations are silent no-ops. After game over every
    /// event is ignored.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        match (self.status, event) {
            (GameStatus::GameOver, _) => false,
            (GameStatus::Running, InputEvent::Pause | InputEvent::TogglePause) => {
                self.status = GameStatus::Paused;
                true
            }
            (GameStatus::Paused, InputEvent::Resume | InputEvent::TogglePause) => {
                self.status = GameStatus::Running;
                true
            }
            (GameStatus::Paused, _) => false,
            (GameStatus::Running, event) => match event {
                InputEvent::MoveLeft => self.try_move(-1, 0),
                InputEvent::MoveRight => self.try_move(1, 0),
                InputEvent::MoveDown => self.soft_drop(),
                InputEvent::Rotate => self.try_rotate(RotateDirection::Clockwise),
                InputEvent::RotateCcw => self.try_rotate(RotateDirection::CounterClockwise),
                InputEvent::HardDrop => self.hard_drop().is_some(),
                InputEvent::Pause
                | InputEvent::Resume
                | InputEvent::TogglePause
                | InputEvent::ShowLeaderboard => false,
            },
        }
    }

    /// Accumulate elapsed time and run one gravity step per elapsed
    /// interval, keeping the remainder. Returns whether the state changed.
    ///
    /// A lock spawns a fresh piece with an empty timer, so catch-up never
    /// carries over into the next piece.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }

        self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(elapsed_ms);
        let mut changed = false;
        while self.status == GameStatus::Running {
            let interval = self.gravity_interval_ms();
            if self.gravity_timer_ms < interval {
                break;
            }
            self.gravity_timer_ms -= interval;
            match self.tick() {
                TickOutcome::Idle => break,
                TickOutcome::Moved => changed = true,
                TickOutcome::Locked(_) => {
                    changed = true;
                    break;
                }
            }
        }
        changed
    }

    /// One gravity step: move down if possible, otherwise lock.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }
        if self.active.is_none() {
            return TickOutcome::Idle;
        }

        if self.try_move(0, 1) {
            TickOutcome::Moved
        } else {
            match self.lock_active() {
                Some(event) => TickOutcome::Locked(event),
                None => TickOutcome::Idle,
            }
        }
    }

    /// Try to move the active piece; applied only if the target fits
    fn try_move(&mut self, dcol: i8, drow: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.translate(dcol, drow);
        if self.board.fits(&moved) {
            self.active = Some(moved);
            true
        } else {
            false
        }
    }

    /// Rotate the active piece, trying the kick offsets of the current policy
    fn try_rotate(&mut self, direction: RotateDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.rotate(direction);
        for &dcol in self.kick_policy.offsets() {
            let candidate = rotated.translate(dcol, 0);
            if self.board.fits(&candidate) {
                self.active = Some(candidate);
                return true;
            }
        }
        false
    }

    /// Move down one row for a point; lock in place when blocked.
    fn soft_drop(&mut self) -> bool {
        if self.try_move(0, 1) {
            self.score = self.score.saturating_add(drop_score(1, false));
            true
        } else {
            self.lock_active().is_some()
        }
    }

    /// Drop the active piece to the bottom and lock it
    pub fn hard_drop(&mut self) -> Option<LockEvent> {
        if self.status != GameStatus::Running {
            return None;
        }
        let active = self.active?;

        let distance = self.drop_distance(&active);
        self.active = Some(active.translate(0, distance));
        self.score = self.score.saturating_add(drop_score(distance as u32, true));

        self.lock_active()
    }

    /// Rows the piece can fall before it is blocked
    fn drop_distance(&self, piece: &Piece) -> i8 {
        let mut distance = 0;
        while self.board.fits(&piece.translate(0, distance + 1)) {
            distance += 1;
        }
        distance
    }

    /// Lock the active piece onto the board, clear rows, score and spawn
    fn lock_active(&mut self) -> Option<LockEvent> {
        let piece = self.active.take()?;

        if self.board.commit(&piece).is_err() {
            // The active piece is validated on every move, so this only
            // happens with a hand-built inconsistent state.
            self.status = GameStatus::GameOver;
            return Some(LockEvent {
                rows_cleared: 0,
                line_score: 0,
                game_over: true,
            });
        }
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let rows = self.board.clear_full_rows().len();
        // Clear points use the level the lines were cleared at.
        let points = line_score(rows, self.level);
        self.score = self.score.saturating_add(points);
        self.lines += rows as u32;
        self.level = level_for_lines(self.lines);

        let spawned = self.spawn_next();
        Some(LockEvent {
            rows_cleared: rows as u32,
            line_score: points,
            game_over: !spawned,
        })
    }

    fn spawn_next(&mut self) -> bool {
        let kind = self.next;
        self.next = self.queue.draw();
        self.place_spawned(kind)
    }

    /// Place a new piece at the spawn position; game over if it collides
    fn place_spawned(&mut self, kind: PieceKind) -> bool {
        let piece = Piece::spawn(kind);
        self.gravity_timer_ms = 0;
        if self.board.fits(&piece) {
            self.active = Some(piece);
            true
        } else {
            self.active = None;
            self.status = GameStatus::GameOver;
            false
        }
    }

    /// Row the active piece would land on
    pub fn ghost_row(&self) -> Option<i8> {
        let active = self.active?;
        Some(active.row + self.drop_distance(&active))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_row = self.ghost_row();
        out.next = self.next;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.status = self.status;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_bottom_rows(rows: std::ops::RangeInclusive<i8>, holes: &[i8]) -> Board {
        let mut board = Board::new();
        for row in rows {
            board.fill_row_except(row, PieceKind::Z, holes);
        }
        board
    }

    #[test]
    fn test_new_game_is_running_with_a_piece() {
        let state = GameState::new(12345);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        let active = state.active.unwrap();
        assert_eq!((active.col, active.row), SPAWN_POSITION);
    }

    #[test]
    fn test_next_piece_becomes_active_after_lock() {
        let mut state = GameState::new(12345);
        let next = state.next;
        state.hard_drop();
        assert_eq!(state.active.unwrap().kind, next);
    }

    #[test]
    fn test_tick_moves_down_then_locks() {
        let active = Piece::new(PieceKind::O, Rotation::North, 0, 17);
        let mut state = GameState::from_parts(Board::new(), active, 1);

        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.active.unwrap().row, 18);

        match state.tick() {
            TickOutcome::Locked(ev) => {
                assert_eq!(ev.rows_cleared, 0);
                assert!(!ev.game_over);
            }
            other => panic!("expected lock, got {:?}", other),
        }
        assert!(state.board.is_occupied(1, 19));
        assert!(state.board.is_occupied(2, 18));
        assert_eq!(state.pieces_locked, 1);
    }

    #[test]
    fn test_single_line_clear_scores_by_level() {
        let board = board_with_bottom_rows(19..=19, &[3, 4, 5, 6]);
        let active = Piece::new(PieceKind::I, Rotation::North, 3, 18);
        let mut state = GameState::from_parts(board, active, 1);

        let outcome = state.tick();
        assert_eq!(
            outcome,
            TickOutcome::Locked(LockEvent {
                rows_cleared: 1,
                line_score: 100,
                game_over: false,
            })
        );
        assert_eq!(state.score, 100);
        assert_eq!(state.lines, 1);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_tetris_clears_four_rows() {
        let board = board_with_bottom_rows(16..=19, &[9]);
        let active = Piece::new(PieceKind::I, Rotation::East, 7, 16);
        let mut state = GameState::from_parts(board, active, 1);

        assert!(matches!(
            state.tick(),
            TickOutcome::Locked(LockEvent { rows_cleared: 4, line_score: 800, .. })
        ));
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_level_uses_cumulative_lines() {
        let board = board_with_bottom_rows(16..=19, &[9]);
        let active = Piece::new(PieceKind::I, Rotation::East, 7, 16);
        let mut state = GameState::from_parts(board, active, 1);
        state.lines = 8;
        state.level = level_for_lines(8);

        state.tick();
        // Cleared at level 1, then promoted.
        assert_eq!(state.score, 800);
        assert_eq!(state.lines, 12);
        assert_eq!(state.level, 2);
        assert_eq!(state.gravity_interval_ms(), 460);
    }

    #[test]
    fn test_rotation_kicks_off_the_wall() {
        // Vertical I hugging the left wall; a flat rotation needs a shift right.
        let active = Piece::new(PieceKind::I, Rotation::East, -2, 5);
        let mut state = GameState::from_parts(Board::new(), active, 1);

        assert!(state.apply(InputEvent::Rotate));
        let rotated = state.active.unwrap();
        assert_eq!(rotated.rotation, Rotation::South);
        assert_eq!(rotated.col, 0);
    }

    #[test]
    fn test_reject_only_rotation_leaves_piece_unchanged() {
        let active = Piece::new(PieceKind::I, Rotation::East, -2, 5);
        let mut state =
            GameState::from_parts(Board::new(), active, 1).with_kicks(KickPolicy::None);

        assert!(!state.apply(InputEvent::Rotate));
        assert_eq!(state.active, Some(active));
    }

    #[test]
    fn test_move_into_wall_is_noop() {
        let active = Piece::new(PieceKind::O, Rotation::North, -1, 5);
        let mut state = GameState::from_parts(Board::new(), active, 1);
        assert!(!state.apply(InputEvent::MoveLeft));
        assert_eq!(state.active, Some(active));
        assert!(state.apply(InputEvent::MoveRight));
    }

    #[test]
    fn test_soft_drop_scores_and_locks_when_blocked() {
        let active = Piece::new(PieceKind::O, Rotation::North, 0, 17);
        let mut state = GameState::from_parts(Board::new(), active, 1);

        assert!(state.apply(InputEvent::MoveDown));
        assert_eq!(state.score, 1);

        // Resting on the floor now: the next soft drop locks.
        assert!(state.apply(InputEvent::MoveDown));
        assert_eq!(state.score, 1);
        assert_eq!(state.board.filled_count(), 4);
    }

    #[test]
    fn test_hard_drop_scores_two_per_row() {
        let active = Piece::new(PieceKind::O, Rotation::North, 0, 10);
        let mut state = GameState::from_parts(Board::new(), active, 1);

        let ev = state.hard_drop().unwrap();
        assert_eq!(ev.rows_cleared, 0);
        assert_eq!(state.score, 16);
        assert!(state.board.is_occupied(1, 19));
    }

    #[test]
    fn test_spawn_collision_is_game_over_and_freezes_state() {
        // Row 1 blocked everywhere except column 0: every spawn shape collides.
        let mut board = Board::new();
        board.fill_row_except(1, PieceKind::J, &[0]);
        let active = Piece::new(PieceKind::O, Rotation::North, 0, 17);
        let mut state = GameState::from_parts(board, active, 1);

        let ev = state.hard_drop().unwrap();
        assert!(ev.game_over);
        assert_eq!(state.status, GameStatus::GameOver);
        assert!(state.active.is_none());
        assert_eq!(state.score, 2);

        let frozen = state.snapshot();
        for event in [
            InputEvent::MoveLeft,
            InputEvent::HardDrop,
            InputEvent::Pause,
            InputEvent::Resume,
            InputEvent::TogglePause,
        ] {
            assert!(!state.apply(event));
        }
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert!(!state.advance(10_000));
        assert_eq!(state.snapshot(), frozen);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut state = GameState::new(7);
        let before = state.active;

        assert!(state.apply(InputEvent::Pause));
        assert_eq!(state.status, GameStatus::Paused);
        assert!(!state.apply(InputEvent::MoveLeft));
        assert!(!state.apply(InputEvent::Pause));
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert!(!state.advance(5_000));
        assert_eq!(state.active, before);

        assert!(state.apply(InputEvent::Resume));
        assert_eq!(state.status, GameStatus::Running);
        assert!(!state.apply(InputEvent::Resume));

        assert!(state.apply(InputEvent::TogglePause));
        assert!(state.apply(InputEvent::TogglePause));
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn test_advance_waits_for_gravity_interval() {
        let mut state = GameState::new(1);
        let row = state.active.unwrap().row;

        assert!(!state.advance(499));
        assert_eq!(state.active.unwrap().row, row);
        assert!(state.advance(1));
        assert_eq!(state.active.unwrap().row, row + 1);
    }

    #[test]
    fn test_advance_keeps_leftover_time() {
        let mut state = GameState::new(1);
        let row = state.active.unwrap().row;

        // 700ms is one step plus 200ms towards the next one.
        assert!(state.advance(700));
        assert_eq!(state.active.unwrap().row, row + 1);
        assert_eq!(state.gravity_timer_ms, 200);
        assert!(state.advance(300));
        assert_eq!(state.active.unwrap().row, row + 2);
        assert_eq!(state.gravity_timer_ms, 0);
    }

    #[test]
    fn test_advance_catches_up_on_long_frames() {
        let mut state = GameState::new(1);
        let row = state.active.unwrap().row;

        assert!(state.advance(3 * 500 + 10));
        assert_eq!(state.active.unwrap().row, row + 3);
        assert_eq!(state.gravity_timer_ms, 10);
    }

    #[test]
    fn test_advance_stops_catching_up_at_lock() {
        let active = Piece::new(PieceKind::O, Rotation::North, 4, 16);
        let mut state = GameState::from_parts(Board::new(), active, 1);

        assert!(state.advance(10 * 500));
        assert_eq!(state.pieces_locked(), 1);
        assert_eq!(state.gravity_timer_ms, 0);
        let (col, row) = SPAWN_POSITION;
        let spawned = state.active.unwrap();
        assert_eq!((spawned.col, spawned.row), (col, row));
    }

    #[test]
    fn test_ghost_row_lands_on_floor() {
        let active = Piece::new(PieceKind::I, Rotation::North, 3, 0);
        let state = GameState::from_parts(Board::new(), active, 1);
        // I North occupies offset row 1, so the origin ends up on row 18.
        assert_eq!(state.ghost_row(), Some(18));
    }

    #[test]
    fn test_show_leaderboard_is_not_an_engine_event() {
        let mut state = GameState::new(3);
        let before = state.snapshot();
        assert!(!state.apply(InputEvent::ShowLeaderboard));
        assert_eq!(state.snapshot(), before);
    }
}
