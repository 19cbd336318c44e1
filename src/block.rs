//! The value held by every node of a block tree.
//!
//! A [`Block`] owns a node's label, selection and focus state and computes the
//! node's size and its separation from neighbors. It reads the surrounding
//! tree through the [`BlockNeighborhood`] trait, so it can be sized inside a
//! [`BlockTree`](crate::tree::BlockTree) or on its own with [`Detached`].

use crate::block_type::read_type;
use crate::constants::{BUD_LEAF_SEPARATION, BUD_TO_BUD_VERTICAL_SEPARATION};
use crate::direction::{Alignment, Axis, Direction};
use crate::error::BlockError;
use crate::interact::Interaction;
use crate::label::{default_font, Font, Label};
use crate::style::{copy_style, BlockStyle, Color, StyleRef};
use crate::tree::NodeId;
use eframe::egui;
use std::sync::Arc;

/// Width and height of a block, in the block's own units.
pub type Size = egui::Vec2;

/// Extent of a nested node as seen from the node that contains it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NestedExtent {
    /// Bounding size of the nested node and everything attached to it
    pub size: Size,
    /// Scale the nested node is drawn at, relative to its container
    pub scale: f32,
}

impl Default for NestedExtent {
    fn default() -> Self {
        Self {
            size: Size::ZERO,
            scale: 1.0,
        }
    }
}

/// Queries a block makes about its position in a tree.
pub trait BlockNeighborhood {
    /// Whether a node exists in `dir`.
    fn has_node(&self, dir: Direction) -> bool;

    /// Alignment of the node in `dir`.
    fn node_alignment_mode(&self, dir: Direction) -> Alignment;

    /// Laid-out extent of the inward node, if there is one.
    fn nested_extent(&self) -> Option<NestedExtent>;

    /// Whether the node in `dir` exists and is a bud.
    fn neighbor_is_bud(&self, dir: Direction) -> bool;

    /// Whether the node in `dir` exists and has children of its own.
    fn neighbor_has_children(&self, dir: Direction) -> bool;
}

/// Neighborhood of a block that is not part of any tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl BlockNeighborhood for Detached {
    fn has_node(&self, _dir: Direction) -> bool {
        false
    }

    fn node_alignment_mode(&self, _dir: Direction) -> Alignment {
        Alignment::None
    }

    fn nested_extent(&self) -> Option<NestedExtent> {
        None
    }

    fn neighbor_is_bud(&self, _dir: Direction) -> bool {
        false
    }

    fn neighbor_has_children(&self, _dir: Direction) -> bool {
        false
    }
}

/// Styled, labelled value of a tree node.
#[derive(Debug)]
pub struct Block {
    node: NodeId,
    style: StyleRef,
    label: Option<Label>,
    selected: bool,
    focused: bool,
    label_weight: f32,
    needs_layout: bool,
    needs_repaint: bool,
    interact: Interaction,
}

impl Block {
    /// Creates a block for the tree node `node`.
    pub fn new(node: NodeId, style: StyleRef) -> Self {
        Self {
            node,
            style,
            label: None,
            selected: false,
            focused: false,
            label_weight: 1.0,
            needs_layout: true,
            needs_repaint: true,
            interact: Interaction::new(),
        }
    }

    /// The tree node this block belongs to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Style currently applied to this block.
    pub fn block_style(&self) -> &StyleRef {
        &self.style
    }

    /// Applies `style`. Setting the style this block already shares is a no-op.
    pub fn set_block_style(&mut self, style: StyleRef) {
        if Arc::ptr_eq(&self.style, &style) {
            return;
        }
        log::debug!("block {:?} changed style", self.node);
        self.style = style;
        self.invalidate_layout();
    }

    /// Applies a fresh copy of the non-math style named by a block type token
    /// such as `"u"` or `"slot"`.
    ///
    /// The copy is never shared, so this always swaps the style and invalidates
    /// layout.
    pub fn set_block_style_named(&mut self, name: &str) -> Result<(), BlockError> {
        let style = copy_style(read_type(name)?);
        self.set_block_style_owned(style);
        Ok(())
    }

    /// Applies a private copy of `style`, for blocks styled independently of the table.
    pub fn set_block_style_owned(&mut self, style: BlockStyle) {
        self.set_block_style(Arc::new(style));
    }

    /// Whether this block is drawn as a bud.
    pub fn is_bud(&self) -> bool {
        self.style.bud
    }

    /// Padding left and right of the content.
    pub fn horizontal_padding(&self) -> f32 {
        self.style.horizontal_padding
    }

    /// Padding above and below the content.
    pub fn vertical_padding(&self) -> f32 {
        self.style.vertical_padding
    }

    /// Thickness of the border.
    pub fn border_thickness(&self) -> f32 {
        self.style.border_thickness
    }

    /// Corner radius of the border.
    pub fn border_roundness(&self) -> f32 {
        self.style.border_roundness
    }

    /// Color of the lines to this block's neighbors.
    pub fn line_color(&self) -> Color {
        if self.selected {
            self.style.selected_line_color
        } else {
            self.style.line_color
        }
    }

    /// Color of the border.
    pub fn border_color(&self) -> Color {
        if self.selected {
            self.style.selected_border_color
        } else {
            self.style.border_color
        }
    }

    /// Color of the fill behind the content.
    pub fn backdrop_color(&self) -> Color {
        if self.selected {
            self.style.selected_background_color
        } else {
            self.style.background_color
        }
    }

    /// Color of the label text.
    pub fn font_color(&self) -> Color {
        if self.selected {
            self.style.selected_font_color
        } else {
            self.style.font_color
        }
    }

    /// Whether the block has a label with text.
    pub fn has_label(&self) -> bool {
        self.label.as_ref().is_some_and(|label| !label.is_empty())
    }

    /// Text of the label, if it has any.
    pub fn label(&self) -> Option<&str> {
        self.label
            .as_ref()
            .filter(|label| !label.is_empty())
            .map(Label::text)
    }

    /// The label itself, even when empty.
    pub fn real_label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Number of glyphs the label draws.
    pub fn glyph_count(&self) -> usize {
        if !self.has_label() {
            return 0;
        }
        self.label.as_ref().map_or(0, Label::glyph_count)
    }

    /// Sets the label text using the default font. Empty text removes the label.
    pub fn set_label(&mut self, text: &str) {
        self.set_label_with_font(text, default_font());
    }

    /// Sets the label text. A new label is created with `font`; an existing one
    /// keeps its font. Empty text removes the label.
    pub fn set_label_with_font(&mut self, text: &str, font: Font) {
        if text.is_empty() {
            self.label = None;
            self.invalidate_layout();
            return;
        }
        self.label
            .get_or_insert_with(|| Label::new(font))
            .set_text(text);
        self.invalidate_layout();
    }

    /// Size of the label once scaled to this block's font size.
    pub fn label_size(&self) -> Option<Size> {
        let label = self.label.as_ref().filter(|label| !label.is_empty())?;
        let scaling = self.style.font_size / label.font().font_size();
        Some(egui::vec2(label.width() * scaling, label.height() * scaling))
    }

    /// Replaces the label's estimated size with one laid out by `measure` at
    /// this block's font size. Labels already measured are left alone.
    ///
    /// Returns whether the size changed, in which case layout is invalidated.
    pub fn measure_label(&mut self, measure: impl FnOnce(&str, f32) -> Size) -> bool {
        let font_size = self.style.font_size;
        let changed = match self.label.as_mut() {
            Some(label) if !label.is_measured() => label.measure_with(font_size, measure),
            _ => false,
        };
        if changed {
            self.invalidate_layout();
        }
        changed
    }

    /// Relative weight of the label when the painter picks what to draw.
    pub fn label_weight(&self) -> f32 {
        self.label_weight
    }

    /// Sets the relative weight of the label.
    pub fn set_label_weight(&mut self, label_weight: f32) {
        self.label_weight = label_weight;
    }

    /// Whether the block is selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Selects or deselects the block.
    pub fn set_selected(&mut self, selected: bool) {
        if self.selected != selected {
            self.selected = selected;
            self.schedule_repaint();
        }
    }

    /// Whether the block has focus.
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Default focus handler: records focus and schedules a repaint.
    pub fn on_focus(&mut self, focus: bool) -> bool {
        self.focused = focus;
        self.schedule_repaint();
        true
    }

    /// Delivers a focus change to the registered listener, or to
    /// [`Block::on_focus`] when there is none.
    pub fn handle_focus(&mut self, focus: bool) -> bool {
        match self.interact.focus(focus) {
            Some(handled) => handled,
            None => self.on_focus(focus),
        }
    }

    /// Delivers a click to the registered listener.
    pub fn handle_click(&mut self) -> bool {
        self.interact.click()
    }

    /// Listener registry for focus and click events.
    pub fn interact(&mut self) -> &mut Interaction {
        &mut self.interact
    }

    /// Marks the block's geometry as stale.
    pub fn invalidate_layout(&mut self) {
        self.needs_layout = true;
        self.needs_repaint = true;
    }

    /// Whether the geometry must be recomputed before the next paint.
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub(crate) fn mark_layout_clean(&mut self) {
        self.needs_layout = false;
    }

    /// Asks for the block to be drawn again on the next frame.
    pub fn schedule_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// Whether a repaint was requested since the last call, clearing the request.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }

    /// Outer size of the block, including padding and border.
    pub fn size(&self, ctx: &impl BlockNeighborhood) -> Result<Size, BlockError> {
        let mut body = Size::ZERO;
        self.size_into(ctx, &mut body)?;
        Ok(body)
    }

    /// Writes the outer size of the block into `body`.
    pub fn size_into(
        &self,
        ctx: &impl BlockNeighborhood,
        body: &mut Size,
    ) -> Result<(), BlockError> {
        self.size_without_padding_into(ctx, body)?;
        body.x += 2.0 * self.horizontal_padding() + 2.0 * self.border_thickness();
        body.y += 2.0 * self.vertical_padding() + 2.0 * self.border_thickness();
        Ok(())
    }

    /// Size of the block's content area.
    pub fn size_without_padding(&self, ctx: &impl BlockNeighborhood) -> Result<Size, BlockError> {
        let mut body = Size::ZERO;
        self.size_without_padding_into(ctx, &mut body)?;
        Ok(body)
    }

    /// Writes the size of the block's content area into `body`.
    ///
    /// The content is the scaled label, the style's minimum size, or a nested
    /// node stacked with the label. Buds without a nested node that are close
    /// to square are made exactly square.
    pub fn size_without_padding_into(
        &self,
        ctx: &impl BlockNeighborhood,
        body: &mut Size,
    ) -> Result<(), BlockError> {
        *body = Size::ZERO;
        let style = &*self.style;
        let has_inward = ctx.has_node(Direction::Inward);
        let labelled = self.has_label();

        if let Some(label_size) = self.label_size() {
            *body = label_size;
            if body.x.is_nan() || body.y.is_nan() {
                return Err(BlockError::NanLabelSize {
                    width: body.x,
                    height: body.y,
                });
            }
        } else if !has_inward {
            *body = egui::vec2(style.min_width, style.min_height);
        }

        if has_inward {
            let nested = ctx.nested_extent().unwrap_or_default();
            let nested_width = nested.scale * nested.size.x;
            let nested_height = nested.scale * nested.size.y;

            if ctx.node_alignment_mode(Direction::Inward) == Alignment::InwardVertical {
                body.x = body.x.max(nested_width);
                body.y = if labelled {
                    style
                        .min_height
                        .max(body.y + self.vertical_padding() + nested_height)
                } else {
                    body.y.max(nested_height)
                };
            } else {
                body.x = if labelled {
                    body.x + self.horizontal_padding() + nested_width
                } else {
                    body.x.max(nested_width)
                };
                body.y = body.y.max(nested_height);
            }
        }

        // Buds appear circular
        if self.is_bud() && !has_inward {
            let aspect = body.x / body.y;
            if aspect < 2.0 && aspect > 0.5 {
                let side = body.x.max(body.y);
                *body = egui::vec2(side, side);
            }
        }

        Ok(())
    }

    /// Distance to keep between this block and whatever lies in `dir` along `axis`.
    pub fn get_separation(&self, axis: Axis, dir: Direction, ctx: &impl BlockNeighborhood) -> f32 {
        match axis {
            Axis::Vertical => self.vertical_separation(dir, ctx),
            Axis::Horizontal => self.horizontal_separation(dir, ctx),
            Axis::Z => match ctx.node_alignment_mode(Direction::Inward) {
                Alignment::InwardVertical => self.vertical_padding() + self.border_thickness(),
                _ => 2.0 * self.horizontal_padding() + self.border_thickness(),
            },
            Axis::Null => 0.0,
        }
    }

    /// Separation from the vertical neighbor in `dir`. Adjacent buds sit further apart.
    pub fn vertical_separation(&self, dir: Direction, ctx: &impl BlockNeighborhood) -> f32 {
        if self.is_bud() && ctx.neighbor_is_bud(dir) {
            return self.style.vertical_separation + BUD_TO_BUD_VERTICAL_SEPARATION;
        }
        self.style.vertical_separation
    }

    /// Separation from the horizontal neighbor in `dir`. Leaf buds use the leaf factor.
    pub fn horizontal_separation(&self, dir: Direction, ctx: &impl BlockNeighborhood) -> f32 {
        if ctx.neighbor_is_bud(dir) && !ctx.neighbor_has_children(dir) {
            return BUD_LEAF_SEPARATION * self.style.horizontal_separation;
        }
        self.style.horizontal_separation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_type::BlockType;
    use crate::style::style;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeNeighborhood {
        inward: Option<(Alignment, NestedExtent)>,
        neighbors: HashMap<Direction, (bool, bool)>,
    }

    impl FakeNeighborhood {
        fn nested(alignment: Alignment, size: Size, scale: f32) -> Self {
            Self {
                inward: Some((alignment, NestedExtent { size, scale })),
                ..Default::default()
            }
        }

        fn with_neighbor(mut self, dir: Direction, is_bud: bool, has_children: bool) -> Self {
            self.neighbors.insert(dir, (is_bud, has_children));
            self
        }
    }

    impl BlockNeighborhood for FakeNeighborhood {
        fn has_node(&self, dir: Direction) -> bool {
            match dir {
                Direction::Inward => self.inward.is_some(),
                _ => self.neighbors.contains_key(&dir),
            }
        }

        fn node_alignment_mode(&self, dir: Direction) -> Alignment {
            match (dir, self.inward) {
                (Direction::Inward, Some((alignment, _))) => alignment,
                _ => Alignment::None,
            }
        }

        fn nested_extent(&self) -> Option<NestedExtent> {
            self.inward.map(|(_, extent)| extent)
        }

        fn neighbor_is_bud(&self, dir: Direction) -> bool {
            self.neighbors.get(&dir).is_some_and(|(bud, _)| *bud)
        }

        fn neighbor_has_children(&self, dir: Direction) -> bool {
            self.neighbors.get(&dir).is_some_and(|(_, children)| *children)
        }
    }

    fn block_of(ty: BlockType) -> Block {
        Block::new(NodeId(0), style(ty, false))
    }

    /// Font that measures "ab" as exactly 20 by 18 at block font size 16.
    fn square_ish_font() -> Font {
        Font::new(16.0).with_letter_width(0.625).with_line_height(1.125)
    }

    fn assert_close(actual: Size, expected: (f32, f32)) {
        assert!(
            (actual.x - expected.0).abs() < 1e-4 && (actual.y - expected.1).abs() < 1e-4,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_empty_block_uses_minimum_size() {
        let block = block_of(BlockType::Block);
        let size = block.size(&Detached).unwrap();
        assert_close(size, (48.0 + 16.0 + 0.1, 16.0 + 8.0 + 0.1));
    }

    #[test]
    fn test_size_adds_padding_and_border() {
        let mut labelled = block_of(BlockType::Slot);
        labelled.set_label("parsegraph");
        for block in [block_of(BlockType::Bud), block_of(BlockType::Block), labelled] {
            let inner = block.size_without_padding(&Detached).unwrap();
            let outer = block.size(&Detached).unwrap();
            let border = block.border_thickness();
            assert_close(
                outer,
                (
                    inner.x + 2.0 * (block.horizontal_padding() + border),
                    inner.y + 2.0 * (block.vertical_padding() + border),
                ),
            );
        }
    }

    #[test]
    fn test_size_into_overwrites_buffer() {
        let block = block_of(BlockType::Block);
        let mut buffer = egui::vec2(1000.0, 1000.0);
        block.size_without_padding_into(&Detached, &mut buffer).unwrap();
        assert_close(buffer, (48.0, 16.0));
        block.size_into(&Detached, &mut buffer).unwrap();
        assert_close(buffer, (64.1, 24.1));
    }

    #[test]
    fn test_labelled_block_scales_label_to_style_font() {
        let mut block = block_of(BlockType::Block);
        block.set_label("abcd");
        let size = block.size_without_padding(&Detached).unwrap();
        // Default font measures at 72px; the style draws at 16px.
        assert_close(size, (4.0 * 16.0 * 0.61, 16.0 * 1.2));
    }

    #[test]
    fn test_near_square_bud_becomes_square() {
        let mut bud = block_of(BlockType::Bud);
        bud.set_label_with_font("ab", square_ish_font());
        let size = bud.size_without_padding(&Detached).unwrap();
        assert_close(size, (20.0, 20.0));
        assert_eq!(size.x, size.y);
    }

    #[test]
    fn test_elongated_bud_keeps_its_shape() {
        let mut bud = block_of(BlockType::Bud);
        bud.set_label_with_font("abcdefgh", square_ish_font());
        let size = bud.size_without_padding(&Detached).unwrap();
        assert_close(size, (80.0, 18.0));
    }

    #[test]
    fn test_empty_bud_is_square() {
        let bud = block_of(BlockType::Bud);
        let size = bud.size(&Detached).unwrap();
        assert_close(size, (24.1, 24.1));
    }

    #[test]
    fn test_nan_label_measurement_is_fatal() {
        let mut block = block_of(BlockType::Block);
        block.set_label_with_font("broken", Font::new(f32::NAN));
        let err = block.size(&Detached).unwrap_err();
        assert!(matches!(err, BlockError::NanLabelSize { .. }));
    }

    #[test]
    fn test_vertical_nesting_with_label() {
        let mut block = block_of(BlockType::Block);
        block.set_label_with_font("ab", square_ish_font());
        let ctx = FakeNeighborhood::nested(Alignment::InwardVertical, egui::vec2(100.0, 50.0), 0.5);
        let size = block.size_without_padding(&ctx).unwrap();
        assert_close(size, (50.0, 18.0 + 4.0 + 25.0));
    }

    #[test]
    fn test_vertical_nesting_without_label_ignores_minimum() {
        let block = block_of(BlockType::Block);
        let ctx = FakeNeighborhood::nested(Alignment::InwardVertical, egui::vec2(30.0, 10.0), 1.0);
        let size = block.size_without_padding(&ctx).unwrap();
        assert_close(size, (30.0, 10.0));
    }

    #[test]
    fn test_horizontal_nesting_with_label_concatenates() {
        let mut block = block_of(BlockType::Block);
        block.set_label_with_font("ab", square_ish_font());
        let ctx =
            FakeNeighborhood::nested(Alignment::InwardHorizontal, egui::vec2(100.0, 50.0), 0.5);
        let size = block.size_without_padding(&ctx).unwrap();
        assert_close(size, (20.0 + 8.0 + 50.0, 25.0));
    }

    #[test]
    fn test_horizontal_nesting_without_label_ignores_minimum() {
        let block = block_of(BlockType::Block);
        let ctx =
            FakeNeighborhood::nested(Alignment::InwardHorizontal, egui::vec2(30.0, 10.0), 1.0);
        let size = block.size_without_padding(&ctx).unwrap();
        assert_close(size, (30.0, 10.0));
    }

    #[test]
    fn test_vertical_nesting_with_label_keeps_minimum_height() {
        let mut block = block_of(BlockType::Block);
        let tiny = Font::new(16.0).with_letter_width(0.1).with_line_height(0.1);
        block.set_label_with_font("ab", tiny);
        let ctx = FakeNeighborhood::nested(Alignment::InwardVertical, egui::vec2(1.0, 1.0), 0.1);
        let size = block.size_without_padding(&ctx).unwrap();
        assert_close(size, (3.2, 16.0));
    }

    #[test]
    fn test_unaligned_nesting_stacks_horizontally() {
        let mut block = block_of(BlockType::Block);
        block.set_label_with_font("ab", square_ish_font());
        let aligned =
            FakeNeighborhood::nested(Alignment::InwardHorizontal, egui::vec2(40.0, 10.0), 1.0);
        let unaligned = FakeNeighborhood::nested(Alignment::None, egui::vec2(40.0, 10.0), 1.0);
        assert_eq!(
            block.size_without_padding(&aligned).unwrap(),
            block.size_without_padding(&unaligned).unwrap()
        );
    }

    #[test]
    fn test_bud_with_nested_node_is_not_forced_square() {
        let bud = block_of(BlockType::Bud);
        let ctx = FakeNeighborhood::nested(Alignment::InwardVertical, egui::vec2(30.0, 20.0), 1.0);
        let size = bud.size_without_padding(&ctx).unwrap();
        assert_close(size, (30.0, 20.0));
    }

    #[test]
    fn test_z_separation_follows_nesting_alignment() {
        let mut block = block_of(BlockType::Block);
        let vertical = FakeNeighborhood::nested(Alignment::InwardVertical, Size::ZERO, 1.0);
        let horizontal = FakeNeighborhood::nested(Alignment::InwardHorizontal, Size::ZERO, 1.0);
        assert!((block.get_separation(Axis::Z, Direction::Inward, &vertical) - 4.05).abs() < 1e-5);
        assert!(
            (block.get_separation(Axis::Z, Direction::Inward, &horizontal) - 16.05).abs() < 1e-5
        );

        block.set_label("label");
        assert!((block.get_separation(Axis::Z, Direction::Inward, &vertical) - 4.05).abs() < 1e-5);
    }

    #[test]
    fn test_bud_to_bud_vertical_separation() {
        let bud = block_of(BlockType::Bud);
        let block = block_of(BlockType::Block);
        let bud_below = FakeNeighborhood::default().with_neighbor(Direction::Downward, true, false);
        let block_below =
            FakeNeighborhood::default().with_neighbor(Direction::Downward, false, false);

        assert_eq!(bud.vertical_separation(Direction::Downward, &bud_below), 48.0);
        assert_eq!(bud.vertical_separation(Direction::Downward, &block_below), 32.0);
        assert_eq!(block.vertical_separation(Direction::Downward, &bud_below), 32.0);
        assert_eq!(
            bud.get_separation(Axis::Vertical, Direction::Downward, &bud_below),
            48.0
        );
    }

    #[test]
    fn test_leaf_bud_horizontal_separation() {
        let block = block_of(BlockType::Block);
        let leaf = FakeNeighborhood::default().with_neighbor(Direction::Forward, true, false);
        let branch = FakeNeighborhood::default().with_neighbor(Direction::Forward, true, true);
        assert_eq!(
            block.horizontal_separation(Direction::Forward, &leaf),
            BUD_LEAF_SEPARATION * 32.0
        );
        assert_eq!(block.horizontal_separation(Direction::Forward, &branch), 32.0);
        assert_eq!(block.get_separation(Axis::Null, Direction::Null, &leaf), 0.0);
    }

    #[test]
    fn test_clearing_label_removes_it() {
        let mut block = block_of(BlockType::Block);
        block.set_label("text");
        assert!(block.has_label());
        assert_eq!(block.label(), Some("text"));

        block.set_label("");
        assert!(!block.has_label());
        assert!(block.real_label().is_none());
        assert_eq!(block.label(), None);
        assert_eq!(block.glyph_count(), 0);
    }

    #[test]
    fn test_label_changes_invalidate_layout() {
        let mut block = block_of(BlockType::Block);
        block.mark_layout_clean();
        block.set_label("text");
        assert!(block.needs_layout());

        block.mark_layout_clean();
        block.set_label("");
        assert!(block.needs_layout());
    }

    #[test]
    fn test_identical_style_is_a_no_op() {
        let mut block = block_of(BlockType::Block);
        block.mark_layout_clean();

        block.set_block_style(style(BlockType::Block, false));
        assert!(!block.needs_layout());

        block.set_block_style(style(BlockType::Slot, false));
        assert!(block.needs_layout());
    }

    #[test]
    fn test_measured_label_drives_size() {
        let mut block = block_of(BlockType::Block);
        block.set_label("parsegraph");
        block.mark_layout_clean();

        assert!(block.measure_label(|text, size| {
            assert_eq!(text, "parsegraph");
            assert_eq!(size, 16.0);
            egui::vec2(95.6, 19.0)
        }));
        assert!(block.needs_layout());
        assert_close(block.label_size().unwrap(), (95.6, 19.0));
        assert_close(block.size_without_padding(&Detached).unwrap(), (95.6, 19.0));

        block.mark_layout_clean();
        assert!(!block.measure_label(|_, _| egui::vec2(1.0, 1.0)));
        assert!(!block.needs_layout());
    }

    #[test]
    fn test_named_style_is_a_fresh_non_math_copy() {
        let mut block = Block::new(NodeId(0), style(BlockType::Block, true));
        block.mark_layout_clean();

        block.set_block_style_named("b").unwrap();
        assert!(block.needs_layout());
        assert!(!block.block_style().math_mode);
        assert_eq!(block.block_style().min_width, 48.0);
        assert!(!Arc::ptr_eq(block.block_style(), &style(BlockType::Block, false)));

        // Same name again still swaps
        block.mark_layout_clean();
        block.set_block_style_named("b").unwrap();
        assert!(block.needs_layout());
    }

    #[test]
    fn test_equal_but_distinct_style_is_applied() {
        let mut block = block_of(BlockType::Block);
        block.mark_layout_clean();
        block.set_block_style_owned((**block.block_style()).clone());
        assert!(block.needs_layout());
    }

    #[test]
    fn test_unknown_style_name_fails() {
        let mut block = block_of(BlockType::Block);
        assert!(matches!(
            block.set_block_style_named("nope"),
            Err(BlockError::UnknownBlockType(_))
        ));
    }

    #[test]
    fn test_selection_switches_colors() {
        let mut bud = block_of(BlockType::Bud);
        assert_eq!(bud.backdrop_color(), bud.block_style().background_color);
        bud.set_selected(true);
        assert!(bud.is_selected());
        assert_eq!(bud.backdrop_color(), Color::new(1.0, 1.0, 0.7, 1.0));
        assert_eq!(bud.font_color(), bud.block_style().selected_font_color);
    }

    #[test]
    fn test_focus_defaults_to_block_handler() {
        let mut block = block_of(BlockType::Block);
        block.take_repaint();
        assert!(block.handle_focus(true));
        assert!(block.focused());
        assert!(block.take_repaint());
        assert!(!block.take_repaint());
    }

    #[test]
    fn test_focus_listener_overrides_default() {
        let mut block = block_of(BlockType::Block);
        block.interact().set_focus_listener(|_| false);
        assert!(!block.handle_focus(true));
        assert!(!block.focused());
    }
}
