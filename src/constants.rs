//! Shared constants for block styling, layout and the demo viewer.
//! Centralizes tweakable values used across sizing, rendering and interactions.

// Block geometry
/// Radius of a bud in world units. Most other block measurements derive from it.
pub const BUD_RADIUS: f32 = 16.0;
/// Default separation between a block and its horizontal neighbors.
pub const HORIZONTAL_SEPARATION_PADDING: f32 = 2.0 * BUD_RADIUS;
/// Default separation between a block and its vertical neighbors.
pub const VERTICAL_SEPARATION_PADDING: f32 = 2.0 * BUD_RADIUS;
/// Font size used by every canonical block style.
pub const FONT_SIZE: f32 = BUD_RADIUS;
/// Border thickness shared by every canonical block style.
pub const BORDER_THICKNESS: f32 = 0.05;
/// Thickness of the lines connecting a block to its neighbors.
pub const LINE_THICKNESS: f32 = BUD_RADIUS / 16.0;

// Math mode, which makes graphs appear grid-like
/// Minimum block width in math mode.
pub const MIN_BLOCK_WIDTH_MATH: f32 = BUD_RADIUS * 4.0;
/// Minimum block height in math mode.
pub const MIN_BLOCK_HEIGHT_MATH: f32 = MIN_BLOCK_WIDTH_MATH;
/// Horizontal separation unit in math mode.
pub const HORIZONTAL_SEPARATION_PADDING_MATH: f32 = 2.0;
/// Vertical separation unit in math mode.
pub const VERTICAL_SEPARATION_PADDING_MATH: f32 = 2.0;

// Separation rules
/// Multiplier applied to the horizontal separation between a block and a leaf bud.
pub const BUD_LEAF_SEPARATION: f32 = 1.0;
/// Extra vertical separation between two adjacent buds.
pub const BUD_TO_BUD_VERTICAL_SEPARATION: f32 = VERTICAL_SEPARATION_PADDING / 2.0;

// Labels
/// Reference size of the default label font. Labels are scaled from this to the style's font size.
pub const DEFAULT_FONT_SIZE: f32 = 72.0;
/// Advance width of one glyph of the default font, as a fraction of its size.
pub const DEFAULT_LETTER_WIDTH: f32 = 0.61;
/// Line height of the default font, as a fraction of its size.
pub const DEFAULT_LINE_HEIGHT: f32 = 1.2;

// Nested nodes
/// Scale applied by `BlockCaret::shrink` to a node and its subtree.
pub const SHRINK_SCALE: f32 = 0.85;

// Camera
/// Smallest scale the camera zooms out to.
pub const MIN_CAMERA_SCALE: f32 = 0.01;
/// Largest scale the camera zooms in to.
pub const MAX_CAMERA_SCALE: f32 = 20.0;
/// Fraction of the viewport a graph fills after being shown in the camera.
pub const CAMERA_FIT_MARGIN: f32 = 0.9;

// Demo viewer
/// Milliseconds between automatic graph refreshes.
pub const REFRESH_INTERVAL_MS: u64 = 3000;
/// Milliseconds between blinks of the status dot while auto-refresh runs.
pub const DOT_INTERVAL_MS: u64 = 500;
/// Fractional zoom change per wheel notch: in by `1 + step`, out by `1 - step`.
pub const ZOOM_STEP: f32 = 0.1;
/// Grey level of the canvas background.
pub const BACKGROUND_GREY: u8 = 149;
/// Size of the status dot in screen pixels.
pub const STATUS_DOT_SIZE: f32 = 16.0;
/// Inset of the status dot from the top right corner of the canvas.
pub const STATUS_DOT_INSET: f32 = 8.0;
/// Minimum width of the inline text editor in screen pixels.
pub const TEXT_EDIT_MIN_WIDTH: f32 = 120.0;
/// Number of spawns performed by the random graph builder.
pub const RANDOM_GRAPH_SPAWNS: usize = 20;
