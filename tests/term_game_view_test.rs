use tick_tetris::core::{ActivePiece, ActiveSnapshot, GameSnapshot, GameState};
use tick_tetris::term::{
    AnchorY, FrameBuffer, GameView, TerminalRenderer, Viewport, ACTIVE_GLYPH, EMPTY_GLYPH,
    LOCKED_GLYPH,
};
use tick_tetris::types::{GameStatus, PieceKind};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1 the board is 20x20, 22x22 with the border.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_distinguishes_locked_active_and_empty_cells() {
    let mut snap = GameSnapshot::default();
    snap.board[19][0] = true;
    snap.active = Some(ActiveSnapshot::from(ActivePiece::spawn(PieceKind::O)));

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside the border the origin is (1,1); each cell is 2 chars wide.
    assert_eq!(fb.get(1, 20).unwrap().ch, LOCKED_GLYPH);
    assert_eq!(fb.get(2, 20).unwrap().ch, LOCKED_GLYPH);
    // O at spawn covers columns 5-6 of rows 0-1.
    assert_eq!(fb.get(11, 1).unwrap().ch, ACTIVE_GLYPH);
    assert_eq!(fb.get(14, 2).unwrap().ch, ACTIVE_GLYPH);
    assert_eq!(fb.get(3, 20).unwrap().ch, EMPTY_GLYPH);

    let locked = fb.get(1, 20).unwrap().style;
    let active = fb.get(11, 1).unwrap().style;
    let empty = fb.get(3, 20).unwrap().style;
    assert_ne!(locked, active);
    assert_ne!(locked, empty);
    assert_ne!(active, empty);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1234;
    snap.lines = 10;

    let fb = GameView::default().render(&snap, Viewport::new(60, 22));
    let all = screen_text(&fb);

    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("LINES"));
    assert!(!all.contains("FRAME"));
}

#[test]
fn term_view_frame_counter_is_optional() {
    let mut snap = GameState::new(1).snapshot();
    snap.frame = 777;

    let fb = GameView::default()
        .with_frame_counter(true)
        .render(&snap, Viewport::new(60, 22));
    let all = screen_text(&fb);

    assert!(all.contains("FRAME"));
    assert!(all.contains("777"));
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut snap = GameState::new(1).snapshot();
    assert!(!screen_text(&GameView::default().render(&snap, Viewport::new(22, 22))).contains("GAME OVER"));

    snap.status = GameStatus::GameOver;
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(fb.row_text(11).contains("GAME OVER"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_tiny_viewport_does_not_panic() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(5, 3));
    assert_eq!((fb.width(), fb.height()), (5, 3));
}

#[test]
fn renderer_redraws_fully_after_resize() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();
    let mut renderer = TerminalRenderer::with_writer(Vec::new());

    let mut fb = FrameBuffer::new(0, 0);
    view.render_into(&snap, Viewport::new(22, 22), &mut fb);
    renderer.draw_swap(&mut fb).unwrap();
    let full = renderer.writer().len();

    view.render_into(&snap, Viewport::new(22, 22), &mut fb);
    renderer.draw_swap(&mut fb).unwrap();
    let diff = renderer.writer().len() - full;

    view.render_into(&snap, Viewport::new(30, 22), &mut fb);
    renderer.draw_swap(&mut fb).unwrap();
    let resized = renderer.writer().len() - full - diff;

    assert!(diff < full);
    assert!(resized > diff);
}
