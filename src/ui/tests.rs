use super::*;
use crate::demo::{build_editable, build_logo};
use crate::direction::Direction;
use crate::label::Font;
use crate::text_edit::{EditKey, EditOutcome};
use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn test_app() -> DemoApp {
    let mut app = DemoApp::with_settings(DemoSettings::default(), StdRng::seed_from_u64(1));
    app.tree = build_logo(false).unwrap();
    app
}

fn screen_input(events: Vec<egui::Event>) -> egui::RawInput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.events = events;
    raw
}

/// Run one headless frame drawing only the canvas.
fn run_canvas(ctx: &egui::Context, app: &mut DemoApp, events: Vec<egui::Event>) {
    let _ = ctx.run(screen_input(events), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });
}

fn press(pos: egui::Pos2, pressed: bool) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    }
}

/// Move, press and release at `pos` over three frames.
fn click_at(ctx: &egui::Context, app: &mut DemoApp, pos: egui::Pos2) {
    run_canvas(ctx, app, vec![egui::Event::PointerMoved(pos)]);
    run_canvas(ctx, app, vec![egui::Event::PointerMoved(pos), press(pos, true)]);
    run_canvas(ctx, app, vec![press(pos, false)]);
}

#[test]
fn first_frame_lays_out_and_fits_graph() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_canvas(&ctx, &mut app, vec![]);

    assert!(!app.tree.needs_commit());
    assert!(!app.needs_fit);
    assert!(app.layout_error.is_none());
    let visible = app.camera.visible_rect().expand(1e-2);
    assert!(visible.contains_rect(app.tree.extent()));
}

#[test]
fn clicking_canvas_selects_node() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_canvas(&ctx, &mut app, vec![]);

    let root = app.tree.root();
    let below = app.tree.node_at(root, Direction::Downward).unwrap();
    let pos = app.node_screen_rect(below).center();
    click_at(&ctx, &mut app, pos);

    assert_eq!(app.interaction.selected, Some(below));
    assert!(app.tree.block(below).is_selected());
    assert!(app.tree.block(below).focused());
    assert!(!app.refresh.auto_refresh);
}

#[test]
fn selecting_another_node_clears_previous_selection() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_canvas(&ctx, &mut app, vec![]);

    let root = app.tree.root();
    let below = app.tree.node_at(root, Direction::Downward).unwrap();
    app.select_node(below);
    app.select_node(root);

    assert!(!app.tree.block(below).is_selected());
    assert!(!app.tree.block(below).focused());
    assert!(app.tree.block(root).is_selected());
}

#[test]
fn clicking_empty_canvas_toggles_auto_refresh() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_canvas(&ctx, &mut app, vec![]);

    let corner = app.canvas_rect.min + egui::vec2(3.0, 3.0);
    assert!(app.tree.node_at_point(app.screen_to_world(corner)).is_none());
    click_at(&ctx, &mut app, corner);

    assert!(app.refresh.auto_refresh);
    assert_eq!(app.refresh.refreshes, 1);
    assert!(app.needs_fit || !app.tree.needs_commit());
}

#[test]
fn dragging_pans_camera() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_canvas(&ctx, &mut app, vec![]);

    let start = app.canvas_rect.center();
    let before = app.camera.x();
    run_canvas(&ctx, &mut app, vec![egui::Event::PointerMoved(start), press(start, true)]);
    for step in 1..=4 {
        let pos = start + egui::vec2(20.0 * step as f32, 0.0);
        run_canvas(&ctx, &mut app, vec![egui::Event::PointerMoved(pos)]);
    }
    run_canvas(&ctx, &mut app, vec![press(start + egui::vec2(80.0, 0.0), false)]);

    assert!(app.camera.x() > before);
}

#[test]
fn wheel_zoom_keeps_cursor_point_fixed() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_canvas(&ctx, &mut app, vec![]);

    let cursor = app.canvas_rect.center() + egui::vec2(40.0, -25.0);
    let world = app.screen_to_world(cursor);
    let scale = app.camera.scale();

    app.zoom_at(cursor, true);
    assert!((app.camera.scale() - scale * 1.1).abs() < 1e-4);
    assert!((app.world_to_screen(world) - cursor).length() < 1e-2);

    app.zoom_at(cursor, false);
    assert!((app.camera.scale() - scale * 1.1 * 0.9).abs() < 1e-4);
    assert!((app.world_to_screen(world) - cursor).length() < 1e-2);
}

#[test]
fn clicking_editable_block_opens_text_field() {
    let mut app = test_app();
    app.tree = build_editable(false).unwrap();
    let ctx = egui::Context::default();
    run_canvas(&ctx, &mut app, vec![]);

    let node = app.tree.node_at(app.tree.root(), Direction::Downward).unwrap();
    let pos = app.node_screen_rect(node).center();
    click_at(&ctx, &mut app, pos);
    assert_eq!(app.editing_node(), Some(node));

    // Draw a frame with the field open
    run_canvas(&ctx, &mut app, vec![]);

    let edit = app.tree.text_edit(node).cloned().unwrap();
    edit.borrow_mut().set_draft("edited");
    assert_eq!(
        app.handle_edit_key(node, EditKey::Enter),
        EditOutcome::Committed("edited".into())
    );
    assert_eq!(app.editing_node(), None);
    assert_eq!(app.tree.block(node).label(), Some("edited"));

    run_canvas(&ctx, &mut app, vec![]);
    assert!(!app.tree.needs_commit());
}

#[test]
fn escape_in_text_field_restores_label() {
    let mut app = test_app();
    app.tree = build_editable(false).unwrap();
    let node = app.tree.node_at(app.tree.root(), Direction::Downward).unwrap();
    app.select_node(node);

    let edit = app.tree.text_edit(node).cloned().unwrap();
    edit.borrow_mut().set_draft("discarded");
    assert_eq!(app.handle_edit_key(node, EditKey::Escape), EditOutcome::Cancelled);
    assert_eq!(edit.borrow().draft(), "Click to edit");
    assert_eq!(app.tree.block(node).label(), Some("Click to edit"));
}

#[test]
fn timers_refresh_and_blink() {
    let mut app = test_app();
    app.toggle_auto_refresh(0.0);
    assert!(app.refresh.auto_refresh);
    assert_eq!(app.refresh.refreshes, 1);
    assert_eq!(app.refresh.dot_index, 1);

    app.tick_timers(1.0);
    assert_eq!(app.refresh.refreshes, 1);
    assert_eq!(app.refresh.dot_index, 0);

    app.tick_timers(3.0);
    assert_eq!(app.refresh.refreshes, 2);

    app.toggle_auto_refresh(3.5);
    assert!(!app.refresh.auto_refresh);
    app.tick_timers(10.0);
    assert_eq!(app.refresh.refreshes, 2);
}

#[test]
fn layout_failure_is_reported_and_survived() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_canvas(&ctx, &mut app, vec![]);

    let root = app.tree.root();
    app.tree
        .block_mut(root)
        .set_label_with_font("broken", Font::new(f32::NAN));
    run_canvas(&ctx, &mut app, vec![]);

    assert!(app.layout_error.as_deref().is_some_and(|err| err.contains("NaN")));
    assert!(app.tree.needs_commit());
}

#[test]
fn settings_fill_missing_fields_with_defaults() {
    let settings = DemoSettings::from_json(r#"{ "math_mode": true, "zoom_step": 0.2 }"#).unwrap();
    assert!(settings.math_mode);
    assert_eq!(settings.zoom_step, 0.2);
    assert_eq!(settings.refresh_interval_ms, 3000);
    assert_eq!(settings.dot_interval_ms, 500);
    assert_eq!(settings.background_grey, 149);

    let json = settings.to_json().unwrap();
    assert_eq!(DemoSettings::from_json(&json).unwrap(), settings);
}

#[test]
fn math_mode_setting_applies_to_refreshed_graphs() {
    let mut settings = DemoSettings::default();
    settings.math_mode = true;
    settings.graph = crate::demo::DemoGraph::Logo;
    let mut app = DemoApp::with_settings(settings, StdRng::seed_from_u64(5));
    app.refresh_graph();
    let below = app.tree.node_at(app.tree.root(), Direction::Downward).unwrap();
    assert!(app.tree.block(below).block_style().math_mode);
    assert!(!app.tree.block(app.tree.root()).block_style().math_mode);
    assert_eq!(app.refresh.refreshes, 1);
}

#[test]
fn labels_are_sized_by_the_painter_font() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_canvas(&ctx, &mut app, vec![]);

    let below = app.tree.node_at(app.tree.root(), Direction::Downward).unwrap();
    let block = app.tree.block(below);
    assert!(block.real_label().unwrap().is_measured());
    let font_size = block.block_style().font_size;

    let mut drawn = egui::Vec2::ZERO;
    let _ = ctx.run(screen_input(vec![]), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            drawn = ui
                .painter()
                .layout_no_wrap(
                    "Parsegraph".to_owned(),
                    egui::FontId::monospace(font_size),
                    egui::Color32::BLACK,
                )
                .size();
        });
    });
    let measured = app.tree.block(below).label_size().unwrap();
    assert!((measured - drawn).length() < 1e-3, "{measured:?} vs {drawn:?}");
    assert!(!app.tree.needs_commit());
}
