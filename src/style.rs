//! Style records for buds, blocks and slots, and the table that selects them.
//!
//! Five canonical records exist: bud, block, slot, block-math and slot-math.
//! They are created once per process and shared by reference; [`style`] always
//! hands out the same [`StyleRef`] for the same inputs, so callers can compare
//! styles with [`Arc::ptr_eq`]. Use [`copy_style`] or [`clone_style`] to get a
//! record that can be mutated independently.

use crate::block_type::{read_type, BlockType};
use crate::constants::*;
use crate::error::BlockError;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component
    pub a: f32,
}

impl Color {
    /// Creates a color from unmultiplied components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns this color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Multiplies the color channels by `factor`, leaving alpha alone.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
            a: self.a,
        }
    }

    /// Converts to an egui color for painting.
    pub fn to_color32(self) -> egui::Color32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        egui::Color32::from_rgba_unmultiplied(
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        )
    }
}

/// Color of lines between blocks. Every canonical style borders with it too.
pub const LINE_COLOR: Color = Color::new(0.5, 0.4, 0.4, 1.0);
/// Color of lines leading to a selected block.
pub const SELECTED_LINE_COLOR: Color = Color::new(0.8, 0.8, 0.8, 1.0);

const BACKGROUND_COLOR: Color = Color::new(250.0 / 255.0, 244.0 / 255.0, 236.0 / 255.0, 0.2);
const SLOT_BACKGROUND_COLOR: Color = Color::new(0.73, 0.726, 0.719, 0.2);
const FONT_COLOR: Color = Color::new(0.125, 0.125, 0.125, 1.0);
const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Visual and spacing parameters of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStyle {
    /// Whether blocks with this style are buds, which render near-circular
    pub bud: bool,
    /// Whether this is one of the grid-like math mode styles
    pub math_mode: bool,
    /// Minimum content width of an empty block
    pub min_width: f32,
    /// Minimum content height of an empty block
    pub min_height: f32,
    /// Padding between the border and the content, left and right
    pub horizontal_padding: f32,
    /// Padding between the border and the content, top and bottom
    pub vertical_padding: f32,
    /// Border color when not selected
    pub border_color: Color,
    /// Border color when selected
    pub selected_border_color: Color,
    /// Fill color when not selected
    pub background_color: Color,
    /// Fill color when selected
    pub selected_background_color: Color,
    /// Brightness multiplier for highlights
    pub brightness: f32,
    /// Corner radius of the border
    pub border_roundness: f32,
    /// Thickness of the border
    pub border_thickness: f32,
    /// Label color when not selected
    pub font_color: Color,
    /// Label color when selected
    pub selected_font_color: Color,
    /// Size labels are drawn at
    pub font_size: f32,
    /// Advance width of one glyph as a fraction of the font size
    pub letter_width: f32,
    /// Separation from vertical neighbors
    pub vertical_separation: f32,
    /// Separation from horizontal neighbors
    pub horizontal_separation: f32,
    /// Color of lines to neighbors when not selected
    pub line_color: Color,
    /// Color of lines to neighbors when selected
    pub selected_line_color: Color,
    /// Dash pattern for the border, alternating drawn and skipped lengths
    #[serde(default)]
    pub dashes: Option<Vec<f32>>,
}

/// Shared handle to a style record.
pub type StyleRef = Arc<BlockStyle>;

fn bud_record() -> BlockStyle {
    BlockStyle {
        bud: true,
        math_mode: false,
        min_width: BUD_RADIUS,
        min_height: BUD_RADIUS,
        horizontal_padding: BUD_RADIUS / 4.0,
        vertical_padding: BUD_RADIUS / 4.0,
        border_color: LINE_COLOR,
        selected_border_color: LINE_COLOR,
        background_color: BACKGROUND_COLOR,
        selected_background_color: Color::new(1.0, 1.0, 0.7, 1.0),
        brightness: 1.5,
        border_roundness: BUD_RADIUS + BUD_RADIUS / 2.0,
        border_thickness: BORDER_THICKNESS,
        font_color: FONT_COLOR,
        selected_font_color: BLACK,
        font_size: FONT_SIZE,
        letter_width: DEFAULT_LETTER_WIDTH,
        vertical_separation: VERTICAL_SEPARATION_PADDING,
        horizontal_separation: HORIZONTAL_SEPARATION_PADDING,
        line_color: LINE_COLOR,
        selected_line_color: LINE_COLOR,
        dashes: None,
    }
}

fn block_record() -> BlockStyle {
    BlockStyle {
        bud: false,
        math_mode: false,
        min_width: BUD_RADIUS * 3.0,
        min_height: BUD_RADIUS,
        horizontal_padding: BUD_RADIUS / 2.0,
        vertical_padding: BUD_RADIUS / 4.0,
        border_color: LINE_COLOR,
        selected_border_color: LINE_COLOR,
        background_color: BACKGROUND_COLOR,
        selected_background_color: Color::new(0.75, 0.75, 1.0, 1.0),
        brightness: 0.75,
        border_roundness: BUD_RADIUS / 4.0,
        border_thickness: BORDER_THICKNESS,
        font_color: FONT_COLOR,
        selected_font_color: BLACK,
        font_size: FONT_SIZE,
        letter_width: DEFAULT_LETTER_WIDTH,
        vertical_separation: VERTICAL_SEPARATION_PADDING,
        horizontal_separation: HORIZONTAL_SEPARATION_PADDING,
        line_color: LINE_COLOR,
        selected_line_color: LINE_COLOR,
        dashes: None,
    }
}

fn slot_record() -> BlockStyle {
    BlockStyle {
        background_color: SLOT_BACKGROUND_COLOR,
        selected_background_color: Color::new(0.9, 1.0, 0.9, 1.0),
        ..block_record()
    }
}

fn block_math_record() -> BlockStyle {
    BlockStyle {
        math_mode: true,
        min_width: MIN_BLOCK_WIDTH_MATH,
        min_height: MIN_BLOCK_HEIGHT_MATH,
        horizontal_padding: 2.0 * BUD_RADIUS,
        vertical_padding: 0.5 * BUD_RADIUS,
        vertical_separation: 6.0 * VERTICAL_SEPARATION_PADDING_MATH,
        horizontal_separation: 7.0 * HORIZONTAL_SEPARATION_PADDING_MATH,
        ..block_record()
    }
}

fn slot_math_record() -> BlockStyle {
    let slot = slot_record();
    BlockStyle {
        border_color: slot.border_color,
        background_color: slot.background_color,
        selected_border_color: slot.selected_border_color,
        selected_background_color: slot.selected_background_color,
        brightness: slot.brightness,
        font_color: BLACK,
        ..block_math_record()
    }
}

/// Canonical bud style.
pub static BUD_STYLE: LazyLock<StyleRef> = LazyLock::new(|| Arc::new(bud_record()));
/// Canonical block style.
pub static BLOCK_STYLE: LazyLock<StyleRef> = LazyLock::new(|| Arc::new(block_record()));
/// Canonical slot style.
pub static SLOT_STYLE: LazyLock<StyleRef> = LazyLock::new(|| Arc::new(slot_record()));
/// Canonical math mode block style.
pub static BLOCK_MATH_STYLE: LazyLock<StyleRef> =
    LazyLock::new(|| Arc::new(block_math_record()));
/// Canonical math mode slot style.
pub static SLOT_MATH_STYLE: LazyLock<StyleRef> = LazyLock::new(|| Arc::new(slot_math_record()));

/// Returns the canonical style for a block type.
///
/// Buds have a single style; blocks and slots switch to their math mode
/// records when `math_mode` is set.
pub fn style(ty: BlockType, math_mode: bool) -> StyleRef {
    let shared: &StyleRef = match (ty, math_mode) {
        (BlockType::Bud, _) => &*BUD_STYLE,
        (BlockType::Slot, false) => &*SLOT_STYLE,
        (BlockType::Slot, true) => &*SLOT_MATH_STYLE,
        (BlockType::Block, false) => &*BLOCK_STYLE,
        (BlockType::Block, true) => &*BLOCK_MATH_STYLE,
    };
    Arc::clone(shared)
}

/// Returns the canonical style for a block type token such as `"u"` or `"slot"`.
pub fn style_named(name: &str, math_mode: bool) -> Result<StyleRef, BlockError> {
    Ok(style(read_type(name)?, math_mode))
}

/// Returns an independent copy of the canonical style for a block type.
pub fn copy_style(ty: BlockType) -> BlockStyle {
    clone_style(&style(ty, false))
}

/// Returns an independent copy of a style record.
pub fn clone_style(record: &BlockStyle) -> BlockStyle {
    record.clone()
}
