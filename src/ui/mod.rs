//! The demo viewer: an eframe app that shows sample block graphs.
//!
//! # Module Organization
//!
//! - `state` - Settings and the `DemoApp` struct
//! - `canvas` - Camera navigation and node clicks
//! - `rendering` - Drawing blocks, edges, labels, text fields and overlays

mod canvas;
mod rendering;
mod state;

pub use state::{DemoApp, DemoSettings, InteractionState, SETTINGS_KEY};

use crate::demo::DemoGraph;
use crate::text_edit::{EditKey, EditOutcome};
use crate::tree::NodeId;
use eframe::egui;
use std::time::Duration;

impl eframe::App for DemoApp {
    /// Persist settings between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.settings.to_json() {
            Ok(json) => storage.set_string(SETTINGS_KEY, json),
            Err(err) => log::error!("failed to serialize settings: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// Advances the refresh timers, polls pending text-edit commits, then
    /// draws the toolbar and the canvas.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.tick_timers(now);

        if self.tree.poll_text_edits() {
            // A commit callback is still running
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, now);
        });

        let background = egui::Color32::from_gray(self.settings.background_grey);
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(background))
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });

        if self.refresh.auto_refresh {
            let next = self
                .settings
                .refresh_interval_ms
                .min(self.settings.dot_interval_ms);
            ctx.request_repaint_after(Duration::from_millis(next));
        }
    }
}

impl DemoApp {
    /// Draws the toolbar with graph, refresh and display controls.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui, now: f64) {
        ui.horizontal(|ui| {
            if ui.button("Refresh").clicked() {
                self.refresh_graph();
            }

            let label = if self.refresh.auto_refresh {
                "Stop auto-refresh"
            } else {
                "Auto-refresh"
            };
            if ui.button(label).clicked() {
                self.toggle_auto_refresh(now);
            }

            ui.separator();

            egui::ComboBox::from_label("Graph")
                .selected_text(self.settings.graph.name())
                .show_ui(ui, |ui| {
                    for graph in DemoGraph::ALL {
                        ui.selectable_value(&mut self.settings.graph, graph, graph.name());
                    }
                });

            if ui.checkbox(&mut self.settings.math_mode, "Math mode").changed() {
                self.refresh_graph();
            }
            ui.checkbox(&mut self.settings.show_scale, "Show scale");

            if ui.button("Fit").clicked() {
                self.needs_fit = true;
            }

            if let Some(err) = &self.layout_error {
                ui.separator();
                ui.colored_label(egui::Color32::RED, format!("Layout failed: {err}"));
            }
        });
    }

    /// Replaces the graph with a freshly built sample and fits it on screen.
    pub fn refresh_graph(&mut self) {
        match self.settings.graph.build(&mut self.rng, self.settings.math_mode) {
            Ok(tree) => {
                log::info!(
                    "showing {} graph with {} nodes",
                    self.settings.graph.name(),
                    tree.len()
                );
                self.tree = tree;
                self.interaction = InteractionState::default();
                self.needs_fit = true;
                self.refresh.refreshes += 1;
            }
            Err(err) => log::error!("failed to build demo graph: {err}"),
        }
    }

    /// Starts or stops the auto-refresh timer.
    ///
    /// Starting refreshes immediately and sets the status dot blinking.
    /// Stopping turns the dot dark.
    pub fn toggle_auto_refresh(&mut self, now: f64) {
        if self.refresh.auto_refresh {
            self.refresh.auto_refresh = false;
            log::debug!("auto-refresh stopped");
            return;
        }
        self.refresh.auto_refresh = true;
        self.refresh_graph();
        self.refresh.dot_index = (self.refresh.dot_index + 1) % 2;
        self.refresh.last_refresh = now;
        self.refresh.last_dot = now;
        log::debug!("auto-refresh started");
    }

    /// Refreshes the graph and blinks the dot when their intervals elapse.
    pub fn tick_timers(&mut self, now: f64) {
        if !self.refresh.auto_refresh {
            return;
        }
        let refresh_interval = self.settings.refresh_interval_ms as f64 / 1000.0;
        if now - self.refresh.last_refresh >= refresh_interval {
            self.refresh.last_refresh = now;
            self.refresh_graph();
        }
        let dot_interval = self.settings.dot_interval_ms as f64 / 1000.0;
        if now - self.refresh.last_dot >= dot_interval {
            self.refresh.last_dot = now;
            self.refresh.dot_index = (self.refresh.dot_index + 1) % 2;
        }
    }

    /// Commits a pending layout. A failure is logged and the previous
    /// geometry is kept.
    pub fn commit_layout(&mut self) {
        if !self.tree.needs_commit() {
            return;
        }
        match self.tree.commit_layout() {
            Ok(()) => self.layout_error = None,
            Err(err) => {
                log::error!("layout failed: {err}");
                self.layout_error = Some(err.to_string());
            }
        }
    }

    /// Forwards a key to the text field of `id`.
    pub fn handle_edit_key(&mut self, id: NodeId, key: EditKey) -> EditOutcome {
        let outcome = self.tree.text_edit_key(id, key);
        if let EditOutcome::Committed(text) = &outcome {
            log::info!("label of node {} set to {text:?}", id.index());
        }
        outcome
    }

    /// Node whose text field is open, if any.
    pub fn editing_node(&self) -> Option<NodeId> {
        self.tree.nodes().find_map(|node| {
            node.text_edit()
                .filter(|edit| edit.borrow().is_editing())
                .map(|_| node.id())
        })
    }

    /// Renders the canvas and handles its interactions.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;
        self.canvas_rect = canvas_rect;
        self.camera.set_size(canvas_rect.width(), canvas_rect.height());

        self.measure_labels(&painter);
        self.commit_layout();
        if self.needs_fit && self.layout_error.is_none() {
            self.camera.show_in_camera(self.tree.extent(), false);
            self.needs_fit = false;
        }

        self.handle_canvas_panning(&response);
        self.handle_canvas_zoom(ui, &response);
        let now = ui.input(|i| i.time);
        self.handle_canvas_click(&response, now);

        // A click may have changed a label
        self.measure_labels(&painter);
        self.commit_layout();
        self.tree.take_repaint();

        self.render_graph(&painter, canvas_rect);
        self.draw_text_edits(ui, canvas_rect);
        self.draw_overlays(&painter, canvas_rect);
    }
}

// Headless egui-driven tests live inside `ui` so they can reach private
// methods like `draw_canvas`.
#[cfg(test)]
mod tests;
