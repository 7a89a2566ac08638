use tetris_arcade::core::GameState;
use tetris_arcade::term::{AnchorY, GameView, Hud, Viewport};
use tetris_arcade::types::{GameStatus, PieceKind};

// 10x20 cells at 2x1 plus border; the side panel gets 22 more columns.
const FRAME: u16 = 22;
const WIDE: u16 = FRAME + 22;

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, &Hud::new("Ada"), Viewport::new(WIDE, FRAME));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(FRAME - 1, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, FRAME - 1).unwrap().ch, '└');
    assert_eq!(fb.get(FRAME - 1, FRAME - 1).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[19][0] = PieceKind::I.color_id();
    snap.active = None;
    snap.ghost_row = None;

    let fb = GameView::default().render(&snap, &Hud::new("Ada"), Viewport::new(WIDE, FRAME));

    let y = 1 + 19;
    assert_eq!(fb.get(1, y).unwrap().ch, '█');
    assert_eq!(fb.get(2, y).unwrap().ch, '█');
    assert_eq!(fb.get(3, y).unwrap().ch, '·');
}

#[test]
fn term_view_side_panel_lists_stats() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, &Hud::new("Grace"), Viewport::new(60, 24));

    for text in ["PLAYER", "Grace", "SCORE", "1234", "LEVEL", "LINES", "NEXT"] {
        assert!(fb.contains_text(text), "missing {text}");
    }
}

#[test]
fn term_view_reuses_framebuffer_across_sizes() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();
    let hud = Hud::new("Ada");
    let mut fb = view.render(&snap, &hud, Viewport::new(80, 24));

    view.render_into(&snap, &hud, Viewport::new(50, 30), &mut fb);
    assert_eq!((fb.width(), fb.height()), (50, 30));
}

#[test]
fn term_view_game_over_panel() {
    let mut state = GameState::new(2);
    while !state.game_over() {
        state.hard_drop();
    }
    let snap = state.snapshot();
    assert_eq!(snap.status, GameStatus::GameOver);

    let hud = Hud::new("Ada").with_notice("score saved");
    let fb = GameView::default().render(&snap, &hud, Viewport::new(80, 24));
    assert!(fb.contains_text("GAME OVER"));
    assert!(fb.contains_text("score saved"));
}
