//! Application state for the demo viewer.
//!
//! Persisted settings live in [`DemoSettings`]. Everything else is rebuilt on
//! start-up: the graph, the camera, and the interaction and refresh state.

use crate::camera::Camera;
use crate::constants::{BACKGROUND_GREY, DOT_INTERVAL_MS, REFRESH_INTERVAL_MS, ZOOM_STEP};
use crate::demo::{build_placeholder, DemoGraph};
use crate::tree::{BlockTree, NodeId};
use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Storage key the settings are persisted under.
pub const SETTINGS_KEY: &str = "demo_settings";

/// User-adjustable settings, persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Milliseconds between automatic graph refreshes
    pub refresh_interval_ms: u64,
    /// Milliseconds between blinks of the status dot
    pub dot_interval_ms: u64,
    /// Fractional zoom change per wheel notch
    pub zoom_step: f32,
    /// Whether graphs are built with the grid-like math mode styles
    pub math_mode: bool,
    /// Whether the current camera scale is shown in the corner
    pub show_scale: bool,
    /// Grey level of the canvas background
    pub background_grey: u8,
    /// Which sample graph a refresh builds
    pub graph: DemoGraph,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            refresh_interval_ms: REFRESH_INTERVAL_MS,
            dot_interval_ms: DOT_INTERVAL_MS,
            zoom_step: ZOOM_STEP,
            math_mode: false,
            show_scale: true,
            background_grey: BACKGROUND_GREY,
            graph: DemoGraph::Any,
        }
    }
}

impl DemoSettings {
    /// Serializes the settings to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// State of pointer interactions with the canvas.
#[derive(Debug, Default)]
pub struct InteractionState {
    /// Node most recently clicked
    pub selected: Option<NodeId>,
    /// Node whose block holds focus
    pub focused: Option<NodeId>,
    /// Whether a drag is moving the camera
    pub is_panning: bool,
}

/// State of the auto-refresh timer and the status dot that signals it.
#[derive(Debug, Default)]
pub struct RefreshState {
    /// Whether graphs are rebuilt on a timer
    pub auto_refresh: bool,
    /// Time of the last refresh, in seconds of egui input time
    pub last_refresh: f64,
    /// Time of the last dot blink, in seconds of egui input time
    pub last_dot: f64,
    /// Which of the two blink colors the dot shows
    pub dot_index: usize,
    /// Number of graphs built since start-up
    pub refreshes: u64,
}

/// The demo viewer.
pub struct DemoApp {
    /// Persisted settings
    pub settings: DemoSettings,
    /// Graph being shown
    pub tree: BlockTree,
    /// View onto the graph
    pub camera: Camera,
    /// Source of randomness for the graph builders
    pub rng: StdRng,
    /// Pointer interaction state
    pub interaction: InteractionState,
    /// Auto-refresh timer state
    pub refresh: RefreshState,
    /// Whether the camera should fit the graph after the next layout
    pub needs_fit: bool,
    /// Screen rectangle the canvas covered on the last frame
    pub canvas_rect: egui::Rect,
    /// Message from the last failed layout, shown in the toolbar
    pub layout_error: Option<String>,
}

impl Default for DemoApp {
    fn default() -> Self {
        Self::with_settings(DemoSettings::default(), StdRng::from_os_rng())
    }
}

impl DemoApp {
    /// Creates the app, restoring settings persisted by a previous run.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| storage.get_string(SETTINGS_KEY))
            .and_then(|json| match DemoSettings::from_json(&json) {
                Ok(settings) => Some(settings),
                Err(err) => {
                    log::warn!("ignoring unreadable settings: {err}");
                    None
                }
            })
            .unwrap_or_default();
        Self::with_settings(settings, StdRng::from_os_rng())
    }

    /// Creates the app with explicit settings and random source.
    pub fn with_settings(settings: DemoSettings, rng: StdRng) -> Self {
        let tree = build_placeholder(settings.math_mode);
        Self {
            settings,
            tree,
            camera: Camera::new(),
            rng,
            interaction: InteractionState::default(),
            refresh: RefreshState::default(),
            needs_fit: true,
            canvas_rect: egui::Rect::NOTHING,
            layout_error: None,
        }
    }
}
