//! Canvas rendering for blocks, edges, labels and overlays.
//!
//! Blocks are drawn as rounded rectangles, or as circles for buds. Edges are
//! drawn first so blocks cover their ends; nested blocks are drawn after the
//! blocks that contain them.

use super::state::DemoApp;
use crate::constants::{LINE_THICKNESS, STATUS_DOT_INSET, STATUS_DOT_SIZE, TEXT_EDIT_MIN_WIDTH};
use crate::direction::Direction;
use crate::text_edit::EditKey;
use crate::tree::NodeId;
use eframe::egui;
use eframe::epaint::StrokeKind;

/// Status dot colors while auto-refresh runs, alternated on each blink.
const DOT_BLINK_COLORS: [egui::Color32; 2] = [
    egui::Color32::from_rgb(0xff, 0x00, 0x00),
    egui::Color32::from_rgb(0xcc, 0x00, 0x00),
];
/// Status dot color while auto-refresh is stopped.
const DOT_IDLE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x22, 0x22, 0x22);

impl DemoApp {
    /// Screen-space rectangle of the block of `id`.
    pub fn node_screen_rect(&self, id: NodeId) -> egui::Rect {
        let world = self.tree.node_rect(id);
        egui::Rect::from_min_max(self.world_to_screen(world.min), self.world_to_screen(world.max))
    }

    /// Renders the whole graph: edges first, then blocks in paint order.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    pub fn render_graph(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let painter = painter.with_clip_rect(canvas_rect);
        let order = self.tree.paint_order();
        for &id in &order {
            self.draw_edges(&painter, id);
        }
        for &id in &order {
            self.draw_block(&painter, id);
        }
    }

    /// Draws lines from `id` to its outer children.
    fn draw_edges(&self, painter: &egui::Painter, id: NodeId) {
        let block = self.tree.block(id);
        let from = self.world_to_screen(self.tree.layout(id).position);
        let width = LINE_THICKNESS * self.tree.layout(id).scale * self.camera.scale();
        let stroke = egui::Stroke::new(width, block.line_color().to_color32());
        for (dir, child) in self.tree.children(id) {
            if dir == Direction::Inward {
                continue;
            }
            let to = self.world_to_screen(self.tree.layout(child).position);
            painter.line_segment([from, to], stroke);
        }
    }

    /// Draws one block and its label.
    fn draw_block(&self, painter: &egui::Painter, id: NodeId) {
        let block = self.tree.block(id);
        let rect = self.node_screen_rect(id);
        let zoom = self.tree.layout(id).scale * self.camera.scale();

        let mut fill = block.backdrop_color();
        if block.focused() {
            fill = fill.scaled(block.block_style().brightness);
        }
        let fill = fill.to_color32();
        let stroke = egui::Stroke::new(
            (block.border_thickness() * zoom).max(1.0),
            block.border_color().to_color32(),
        );

        let square = (rect.width() - rect.height()).abs() <= 1e-3 * rect.height().max(1.0);
        if block.is_bud() && square {
            let radius = rect.width() / 2.0;
            painter.circle_filled(rect.center(), radius, fill);
            painter.circle_stroke(rect.center(), radius, stroke);
        } else {
            let rounding = block.border_roundness() * zoom;
            painter.rect_filled(rect, rounding, fill);
            match block.block_style().dashes.as_deref() {
                Some([dash, gap, ..]) => {
                    let points = [
                        rect.left_top(),
                        rect.right_top(),
                        rect.right_bottom(),
                        rect.left_bottom(),
                        rect.left_top(),
                    ];
                    painter.extend(egui::Shape::dashed_line(
                        &points,
                        stroke,
                        dash * zoom,
                        gap * zoom,
                    ));
                }
                _ => {
                    painter.rect_stroke(rect, rounding, stroke, StrokeKind::Inside);
                }
            }
        }

        let editing = self
            .tree
            .text_edit(id)
            .is_some_and(|edit| edit.borrow().is_editing());
        if editing {
            return;
        }
        if let Some(text) = block.label() {
            let font = egui::FontId::monospace(block.block_style().font_size * zoom);
            let color = block.font_color().to_color32();
            if self.tree.has_node(id, Direction::Inward) {
                let inset = egui::vec2(
                    block.horizontal_padding() + block.border_thickness(),
                    block.vertical_padding() + block.border_thickness(),
                ) * zoom;
                painter.text(rect.min + inset, egui::Align2::LEFT_TOP, text, font, color);
            } else {
                painter.text(rect.center(), egui::Align2::CENTER_CENTER, text, font, color);
            }
        }
    }

    /// Sizes new labels with the same monospace font `draw_block` paints them in.
    pub fn measure_labels(&mut self, painter: &egui::Painter) {
        self.tree.measure_labels(|text, font_size| {
            painter
                .layout_no_wrap(
                    text.to_owned(),
                    egui::FontId::monospace(font_size),
                    egui::Color32::BLACK,
                )
                .size()
        });
    }

    /// Shows the text field of the node being edited and forwards Enter and
    /// Escape to it.
    pub fn draw_text_edits(&mut self, ui: &mut egui::Ui, canvas_rect: egui::Rect) {
        let Some(id) = self.editing_node() else {
            return;
        };
        let Some(edit) = self.tree.text_edit(id).cloned() else {
            return;
        };

        let rect = self.node_screen_rect(id);
        if !canvas_rect.intersects(rect) {
            return;
        }
        let field_rect = egui::Rect::from_center_size(
            rect.center(),
            egui::vec2(rect.width().max(TEXT_EDIT_MIN_WIDTH), rect.height().max(20.0)),
        );
        let response = {
            let mut state = edit.borrow_mut();
            ui.put(field_rect, egui::TextEdit::singleline(state.draft_mut()))
        };

        let key = ui.input(|i| {
            if i.key_pressed(egui::Key::Enter) {
                Some(EditKey::Enter)
            } else if i.key_pressed(egui::Key::Escape) {
                Some(EditKey::Escape)
            } else {
                None
            }
        });
        match key {
            Some(key) => {
                self.handle_edit_key(id, key);
            }
            None if !response.has_focus() => response.request_focus(),
            None => {}
        }
    }

    /// Draws the scale readout and the auto-refresh status dot.
    pub fn draw_overlays(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        if self.settings.show_scale {
            painter.text(
                canvas_rect.min,
                egui::Align2::LEFT_TOP,
                format!("scale={}", self.camera.scale()),
                egui::FontId::proportional(18.0),
                egui::Color32::BLACK,
            );
        }

        let color = if self.refresh.auto_refresh {
            DOT_BLINK_COLORS[self.refresh.dot_index % DOT_BLINK_COLORS.len()]
        } else {
            DOT_IDLE_COLOR
        };
        let radius = STATUS_DOT_SIZE / 2.0;
        let center = egui::pos2(
            canvas_rect.max.x - STATUS_DOT_INSET - radius,
            canvas_rect.min.y + STATUS_DOT_INSET + radius,
        );
        painter.circle_filled(center, radius, color);
    }
}
