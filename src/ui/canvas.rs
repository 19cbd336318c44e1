//! Canvas navigation and node interaction.
//!
//! Handles drag panning, wheel and pinch zooming, node clicks, and conversions
//! between screen and world space.

use super::state::DemoApp;
use crate::tree::NodeId;
use eframe::egui;

impl DemoApp {
    /// Converts screen coordinates to world coordinates through the camera.
    ///
    /// # Arguments
    ///
    /// * `screen_pos` - Position in screen space (pixels)
    ///
    /// # Returns
    ///
    /// The corresponding position in world space
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        self.camera
            .screen_to_world(screen_pos - self.canvas_rect.min.to_vec2())
    }

    /// Converts world coordinates to screen coordinates through the camera.
    ///
    /// # Arguments
    ///
    /// * `world_pos` - Position in world space
    ///
    /// # Returns
    ///
    /// The corresponding position in screen space (pixels)
    pub fn world_to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        self.camera.world_to_screen(world_pos) + self.canvas_rect.min.to_vec2()
    }

    /// Pans the camera while the primary button or a touch drags the canvas.
    pub fn handle_canvas_panning(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary) {
            self.interaction.is_panning = true;
            let delta = response.drag_delta();
            let scale = self.camera.scale();
            self.camera.adjust_origin(delta.x / scale, delta.y / scale);
        } else {
            self.interaction.is_panning = false;
        }
    }

    /// Zooms at the cursor on wheel scroll or pinch.
    ///
    /// Each wheel event zooms by one step regardless of its magnitude. Only
    /// zooms if the cursor is over the canvas.
    pub fn handle_canvas_zoom(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let Some(mouse_pos) = ui.input(|i| i.pointer.hover_pos()) else {
            return;
        };
        if !response.rect.contains(mouse_pos) {
            return;
        }

        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            self.zoom_at(mouse_pos, scroll > 0.0);
        }

        let pinch = ui.input(|i| i.zoom_delta());
        if pinch != 1.0 {
            self.zoom_by(mouse_pos, pinch);
        }
    }

    /// Zooms one wheel step in or out, keeping `screen_pos` fixed.
    pub fn zoom_at(&mut self, screen_pos: egui::Pos2, zoom_in: bool) {
        let factor = if zoom_in {
            1.0 + self.settings.zoom_step
        } else {
            1.0 - self.settings.zoom_step
        };
        self.zoom_by(screen_pos, factor);
    }

    fn zoom_by(&mut self, screen_pos: egui::Pos2, factor: f32) {
        let local = screen_pos - self.canvas_rect.min.to_vec2();
        self.camera.zoom_to_point(factor, local.x, local.y);
    }

    /// Clicking a node selects it; clicking empty canvas toggles auto-refresh.
    pub fn handle_canvas_click(&mut self, response: &egui::Response, now: f64) {
        if !response.clicked() {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        match self.tree.node_at_point(self.screen_to_world(pos)) {
            Some(id) => self.select_node(id),
            None => self.toggle_auto_refresh(now),
        }
    }

    /// Moves focus and selection to `id` and delivers a click to its block.
    pub fn select_node(&mut self, id: NodeId) {
        if let Some(previous) = self.interaction.focused.take() {
            if previous != id {
                self.tree.focus(previous, false);
            }
        }
        if let Some(previous) = self.interaction.selected.take() {
            self.tree.block_mut(previous).set_selected(false);
        }

        self.tree.focus(id, true);
        self.tree.block_mut(id).set_selected(true);
        self.interaction.focused = Some(id);
        self.interaction.selected = Some(id);

        let consumed = self.tree.click(id);
        log::debug!("clicked node {} (consumed: {consumed})", id.index());
    }
}
