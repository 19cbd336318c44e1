//! 2D camera mapping world coordinates onto the canvas.
//!
//! Screen coordinates are relative to the canvas' top-left corner and relate to
//! world coordinates by `screen = (world + origin) * scale`.

use crate::constants::{CAMERA_FIT_MARGIN, MAX_CAMERA_SCALE, MIN_CAMERA_SCALE};
use eframe::egui;

/// Pan and zoom state of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    x: f32,
    y: f32,
    scale: f32,
    width: f32,
    height: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Camera {
    /// Creates a camera at the world origin with unit scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal origin, in world units.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Vertical origin, in world units.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Screen pixels per world unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Canvas width in screen pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Canvas height in screen pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Moves the origin to `(x, y)` in world units.
    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Sets the scale, clamped to the supported zoom range.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.clamp(MIN_CAMERA_SCALE, MAX_CAMERA_SCALE);
    }

    /// Sets the size of the canvas in screen pixels.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Moves the origin by a world-space delta.
    pub fn adjust_origin(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Multiplies the scale by `factor`, keeping the world point under the
    /// screen position `(sx, sy)` in place.
    ///
    /// # Arguments
    ///
    /// * `factor` - Zoom multiplier; values above 1 zoom in
    /// * `sx` - Horizontal screen position of the fixed point
    /// * `sy` - Vertical screen position of the fixed point
    pub fn zoom_to_point(&mut self, factor: f32, sx: f32, sy: f32) {
        let before = self.screen_to_world(egui::pos2(sx, sy));
        self.set_scale(self.scale * factor);
        let after = self.screen_to_world(egui::pos2(sx, sy));
        self.adjust_origin(after.x - before.x, after.y - before.y);
    }

    /// Maps a world position to a canvas position.
    pub fn world_to_screen(&self, world: egui::Pos2) -> egui::Pos2 {
        egui::pos2((world.x + self.x) * self.scale, (world.y + self.y) * self.scale)
    }

    /// Maps a canvas position to a world position.
    pub fn screen_to_world(&self, screen: egui::Pos2) -> egui::Pos2 {
        egui::pos2(screen.x / self.scale - self.x, screen.y / self.scale - self.y)
    }

    /// World-space rectangle covered by the canvas.
    pub fn visible_rect(&self) -> egui::Rect {
        egui::Rect::from_min_max(
            self.screen_to_world(egui::Pos2::ZERO),
            self.screen_to_world(egui::pos2(self.width, self.height)),
        )
    }

    /// Centers `bounds` on the canvas and zooms so it fills most of it.
    ///
    /// With `only_if_not_visible`, bounds already entirely on screen leave the
    /// camera untouched. Empty bounds or an unsized canvas only center.
    pub fn show_in_camera(&mut self, bounds: egui::Rect, only_if_not_visible: bool) {
        if only_if_not_visible && self.visible_rect().contains_rect(bounds) {
            return;
        }
        if bounds.width() > 0.0 && bounds.height() > 0.0 && self.width > 0.0 && self.height > 0.0 {
            let fit = (self.width / bounds.width()).min(self.height / bounds.height());
            self.set_scale(fit * CAMERA_FIT_MARGIN);
        }
        let center = bounds.center();
        self.x = self.width / (2.0 * self.scale) - center.x;
        self.y = self.height / (2.0 * self.scale) - center.y;
    }
}
