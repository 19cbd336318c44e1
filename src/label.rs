//! Text labels and the font metrics used to measure them.
//!
//! A label starts out with a fixed-advance estimate so layout works without a
//! renderer. Once the viewer has fonts loaded it replaces the estimate with the
//! size egui lays the text out at, see [`Label::measure_with`].

use crate::constants::{DEFAULT_FONT_SIZE, DEFAULT_LETTER_WIDTH, DEFAULT_LINE_HEIGHT};
use eframe::egui;
use serde::{Deserialize, Serialize};

/// Fixed-advance font metrics.
///
/// Labels are measured at the font's reference size and scaled to the block
/// style's font size when a block is sized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    font_size: f32,
    letter_width: f32,
    line_height: f32,
}

impl Default for Font {
    fn default() -> Self {
        default_font()
    }
}

impl Font {
    /// Creates a font with the given reference size and the default glyph proportions.
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            letter_width: DEFAULT_LETTER_WIDTH,
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }

    /// Sets the advance width of one glyph, as a fraction of the font size.
    pub fn with_letter_width(mut self, letter_width: f32) -> Self {
        self.letter_width = letter_width;
        self
    }

    /// Sets the height of one line, as a fraction of the font size.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Reference size of this font.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Advance width of one glyph in pixels.
    pub fn glyph_width(&self) -> f32 {
        self.font_size * self.letter_width
    }

    /// Height of one line in pixels.
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_height
    }

    /// Measures `text` in pixels at the reference size. Lines are split on `\n`.
    pub fn measure(&self, text: &str) -> (f32, f32) {
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        (widest as f32 * self.glyph_width(), lines as f32 * self.line_height())
    }
}

/// Returns the font labels use when none is given.
pub fn default_font() -> Font {
    Font::new(DEFAULT_FONT_SIZE)
}

/// A line or paragraph of text drawn inside a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    font: Font,
    text: String,
    width: f32,
    height: f32,
    measured: bool,
}

impl Label {
    /// Creates an empty label using `font`.
    pub fn new(font: Font) -> Self {
        Self {
            font,
            text: String::new(),
            width: 0.0,
            height: 0.0,
            measured: false,
        }
    }

    /// Replaces the text and re-estimates its size.
    pub fn set_text(&mut self, text: &str) {
        if self.text == text {
            return;
        }
        self.text = text.to_string();
        let (width, height) = if self.text.is_empty() {
            (0.0, 0.0)
        } else {
            self.font.measure(&self.text)
        };
        self.width = width;
        self.height = height;
        self.measured = false;
    }

    /// Whether the size came from a real text layout rather than the estimate.
    pub fn is_measured(&self) -> bool {
        self.measured
    }

    /// Measures the text with a renderer's font layout.
    ///
    /// `measure` lays out the text at `at_size` pixels; the result is rescaled
    /// to this label's reference size. Returns whether the size changed.
    pub fn measure_with(
        &mut self,
        at_size: f32,
        measure: impl FnOnce(&str, f32) -> egui::Vec2,
    ) -> bool {
        if self.text.is_empty() {
            return false;
        }
        let scaling = self.font.font_size / at_size;
        let size = measure(&self.text, at_size) * scaling;
        self.measured = true;
        if size.x == self.width && size.y == self.height {
            return false;
        }
        self.width = size.x;
        self.height = size.y;
        true
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the label has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Font the label is measured with.
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Width in pixels at the font's reference size.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height in pixels at the font's reference size.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of glyphs that must be drawn, ignoring line breaks.
    pub fn glyph_count(&self) -> usize {
        self.text.chars().filter(|c| *c != '\n').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_single_line() {
        let font = Font::new(16.0).with_letter_width(0.5).with_line_height(1.5);
        assert_eq!(font.measure("abcd"), (32.0, 24.0));
    }

    #[test]
    fn test_measure_uses_widest_line() {
        let font = Font::new(10.0).with_letter_width(1.0).with_line_height(1.0);
        assert_eq!(font.measure("ab\nabcde\nc"), (50.0, 30.0));
    }

    #[test]
    fn test_label_tracks_text() {
        let mut label = Label::new(default_font());
        assert!(label.is_empty());
        label.set_text("parsegraph");
        assert_eq!(label.text(), "parsegraph");
        assert_eq!(label.glyph_count(), 10);
        assert!((label.width() - 10.0 * 72.0 * 0.61).abs() < 1e-3);
        assert!((label.height() - 72.0 * 1.2).abs() < 1e-3);

        label.set_text("");
        assert!(label.is_empty());
        assert_eq!(label.width(), 0.0);
    }

    #[test]
    fn test_measured_size_replaces_estimate() {
        let mut label = Label::new(Font::new(32.0));
        label.set_text("abc");
        assert!(!label.is_measured());

        // Laid out at 16px, so the reference size is twice as large
        let changed = label.measure_with(16.0, |text, size| {
            assert_eq!(text, "abc");
            assert_eq!(size, 16.0);
            egui::vec2(30.0, 20.0)
        });
        assert!(changed);
        assert!(label.is_measured());
        assert_eq!((label.width(), label.height()), (60.0, 40.0));

        assert!(!label.measure_with(16.0, |_, _| egui::vec2(30.0, 20.0)));

        label.set_text("abcd");
        assert!(!label.is_measured());
    }
}
