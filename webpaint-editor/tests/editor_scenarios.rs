use webpaint_core::{Color, Point, Surface, Tool};
use webpaint_document::{EditorConfig, FillStrategy};
use webpaint_editor::{run_script, Editor, GestureOutcome, HistoryAction, ReplayScript, ScriptStep};
use webpaint_input::HostEvent;

fn blank_editor(width: u32, height: u32) -> Editor {
    Editor::new(EditorConfig {
        width,
        height,
        ..Default::default()
    })
    .unwrap()
}

fn all_background(editor: &Editor) -> bool {
    editor
        .canvas()
        .surface()
        .as_raw()
        .chunks_exact(4)
        .all(|px| px == [255, 255, 255, 255])
}

#[test]
fn zero_length_brush_stroke_commits_a_dot() {
    let mut editor = blank_editor(64, 64);
    editor.select_tool(Tool::Brush);
    editor.set_color("#000000");
    editor.set_stroke_width(5.0);

    editor.gesture_start(Point::new(10.0, 10.0)).unwrap();
    let outcome = editor.gesture_end(Point::new(10.0, 10.0), false);

    assert_eq!(outcome, GestureOutcome::Committed);
    assert_eq!(editor.canvas().surface().pixel(10, 10), Some(Color::BLACK));
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history().cursor(), Some(0));
}

#[test]
fn one_pixel_click_leaves_a_dot() {
    let mut editor = blank_editor(64, 64);
    editor.set_stroke_width(1.0);

    editor.gesture_start(Point::new(10.0, 10.0)).unwrap();
    editor.gesture_end(Point::new(10.0, 10.0), false);

    assert_eq!(editor.canvas().surface().pixel(10, 10), Some(Color::BLACK));
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn degenerate_ellipse_still_records_snapshot() {
    let mut editor = blank_editor(32, 32);
    editor.select_tool(Tool::Ellipse);

    editor.gesture_start(Point::new(12.0, 12.0)).unwrap();
    let outcome = editor.gesture_end(Point::new(12.0, 12.0), false);

    assert_eq!(outcome, GestureOutcome::Committed);
    assert!(all_background(&editor));
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history().cursor(), Some(0));
}

#[test]
fn block_fill_strategy_from_config() {
    let mut editor = Editor::new(EditorConfig {
        width: 10,
        height: 10,
        fill_strategy: FillStrategy::Block4,
        ..Default::default()
    })
    .unwrap();
    editor.select_tool(Tool::Fill);
    editor.set_color("#ff0000");

    editor.gesture_start(Point::new(1.0, 1.0)).unwrap();
    editor.gesture_end(Point::new(1.0, 1.0), false);

    let red = Some(Color::rgb(255, 0, 0));
    let surface = editor.canvas().surface();
    // blocks step from the origin, so row and column 0 are never reached
    assert_eq!(surface.pixel(0, 0), Some(Color::WHITE));
    assert_eq!(surface.pixel(0, 5), Some(Color::WHITE));
    assert_eq!(surface.pixel(1, 1), red);
    assert_eq!(surface.pixel(9, 9), red);
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn stroked_rectangle_leaves_interior_white() {
    let mut editor = blank_editor(64, 64);
    editor.select_tool(Tool::Rectangle);
    editor.set_stroke_width(2.0);
    editor.set_fill_mode(false);

    editor.gesture_start(Point::new(5.0, 5.0)).unwrap();
    editor.gesture_move(Point::new(12.0, 15.0));
    editor.gesture_move(Point::new(20.0, 20.0));
    editor.gesture_end(Point::new(20.0, 20.0), false);

    let surface = editor.canvas().surface();
    for i in 6..19 {
        assert_eq!(surface.pixel(5, i), Some(Color::BLACK), "left edge at {i}");
        assert_eq!(surface.pixel(20, i), Some(Color::BLACK), "right edge at {i}");
        assert_eq!(surface.pixel(i, 5), Some(Color::BLACK), "top edge at {i}");
        assert_eq!(surface.pixel(i, 20), Some(Color::BLACK), "bottom edge at {i}");
    }
    for y in 7..18 {
        for x in 7..18 {
            assert_eq!(surface.pixel(x, y), Some(Color::WHITE), "interior ({x}, {y})");
        }
    }
    assert_eq!(surface.pixel(40, 40), Some(Color::WHITE));
    assert!(editor.canvas().preview().is_blank());
}

#[test]
fn filled_rectangle_covers_interior() {
    let mut editor = blank_editor(64, 64);
    editor.select_tool(Tool::Rectangle);
    editor.set_color("rgb(0, 0, 255)");
    editor.set_fill_mode(true);

    editor.gesture_start(Point::new(20.0, 20.0)).unwrap();
    editor.gesture_move(Point::new(5.0, 5.0));
    editor.gesture_end(Point::new(5.0, 5.0), false);

    let blue = Some(Color::rgb(0, 0, 255));
    assert_eq!(editor.canvas().surface().pixel(12, 12), blue);
    assert_eq!(editor.canvas().surface().pixel(5, 5), blue);
    assert_eq!(editor.canvas().surface().pixel(20, 20), Some(Color::WHITE));
}

#[test]
fn n_commits_then_n_undos_is_blank() {
    let mut editor = blank_editor(32, 32);
    editor.set_stroke_width(1.0);
    for i in 0..15 {
        let y = 1.0 + i as f32 * 2.0;
        editor.gesture_start(Point::new(1.0, y)).unwrap();
        editor.gesture_move(Point::new(30.0, y));
        editor.gesture_end(Point::new(30.0, y), false);
    }
    assert_eq!(editor.history().len(), 15);

    for _ in 0..14 {
        assert_eq!(editor.undo(), HistoryAction::Restored);
    }
    assert_eq!(editor.undo(), HistoryAction::Blanked);
    assert!(all_background(&editor));
    assert_eq!(editor.undo(), HistoryAction::Blanked);
    assert_eq!(editor.history().cursor(), None);
}

#[test]
fn new_edit_after_undo_drops_redo() {
    let mut editor = blank_editor(32, 32);
    editor.set_stroke_width(1.0);
    for i in 0..10 {
        let x = 1.0 + i as f32 * 3.0;
        editor.gesture_start(Point::new(x, 1.0)).unwrap();
        editor.gesture_end(Point::new(x, 1.0), false);
    }
    for _ in 0..3 {
        editor.undo();
    }
    editor.gesture_start(Point::new(16.0, 16.0)).unwrap();
    editor.gesture_end(Point::new(16.0, 16.0), false);

    assert_eq!(editor.history().len(), 8);
    assert_eq!(editor.history().cursor(), Some(7));
    assert_eq!(editor.redo(), HistoryAction::Unchanged);
}

#[test]
fn fill_is_idempotent_and_recorded() {
    let mut editor = blank_editor(16, 16);
    editor.select_tool(Tool::Fill);
    editor.set_color("#ffffff");

    editor.gesture_start(Point::new(3.0, 3.0)).unwrap();
    editor.gesture_end(Point::new(3.0, 3.0), false);
    assert!(all_background(&editor));

    editor.set_color("#ff0000");
    editor.gesture_start(Point::new(3.0, 3.0)).unwrap();
    editor.gesture_end(Point::new(3.0, 3.0), false);
    assert_eq!(editor.canvas().surface().pixel(15, 15), Some(Color::rgb(255, 0, 0)));
    assert_eq!(editor.history().len(), 2);

    assert_eq!(editor.undo(), HistoryAction::Restored);
    assert!(all_background(&editor));
}

#[test]
fn resize_keeps_overlap_and_drops_history() {
    let mut editor = blank_editor(20, 20);
    editor.set_stroke_width(2.0);
    editor.gesture_start(Point::new(2.0, 2.0)).unwrap();
    editor.gesture_move(Point::new(18.0, 18.0));
    editor.gesture_end(Point::new(18.0, 18.0), false);
    let before = editor.canvas().surface().clone();

    editor.resize(30, 10).unwrap();
    let after = editor.canvas().surface();
    for y in 0..10 {
        for x in 0..30 {
            let expected = if x < 20 { before.pixel(x, y) } else { Some(Color::WHITE) };
            assert_eq!(after.pixel(x, y), expected, "({x}, {y})");
        }
    }
    assert!(editor.history().is_empty());
    assert_eq!(editor.undo(), HistoryAction::Blanked);
}

#[test]
fn preview_shape_only_touches_overlay_until_release() {
    let mut editor = blank_editor(40, 40);
    editor.select_tool(Tool::Ellipse);
    editor.set_stroke_width(2.0);

    editor.gesture_start(Point::new(5.0, 5.0)).unwrap();
    editor.gesture_move(Point::new(35.0, 25.0));
    assert!(all_background(&editor));
    assert!(!editor.canvas().preview().is_blank());
    // composited view shows the preview
    assert_ne!(editor.composited(), *editor.canvas().surface().as_image());

    editor.gesture_end(Point::new(35.0, 25.0), false);
    assert!(!all_background(&editor));
    assert!(editor.canvas().preview().is_blank());
}

#[test]
fn replay_script_saves_png() {
    let mut editor = blank_editor(24, 24);
    let script = ReplayScript {
        origin: Point::new(100.0, 50.0),
        steps: vec![
            ScriptStep::SelectTool { tool: Tool::Line },
            ScriptStep::SetStrokeWidth { width: 3.0 },
            ScriptStep::Event {
                event: HostEvent::MouseDown {
                    x: 102.0,
                    y: 52.0,
                    modifiers: Default::default(),
                },
            },
            ScriptStep::Event { event: HostEvent::MouseMove { x: 120.0, y: 70.0 } },
            ScriptStep::Event { event: HostEvent::MouseUp { x: 120.0, y: 70.0 } },
            ScriptStep::Save,
        ],
    };

    let out = std::path::Path::new("target/test_replay");
    let summary = run_script(&mut editor, &script, std::path::Path::new("."), out).unwrap();
    assert_eq!(summary.committed, 1);
    assert_eq!(summary.saved.len(), 1);
    assert!(summary.saved[0].ends_with("imageWebPaint.png"));

    let decoded = image::open(&summary.saved[0]).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (24, 24));
    assert_eq!(decoded.get_pixel(11, 11).0, [0, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(20, 3).0, [255, 255, 255, 255]);
}
