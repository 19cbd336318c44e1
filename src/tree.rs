//! Arena-backed directed tree of blocks and its layout pass.
//!
//! Every [`BlockNode`] binds a [`Block`] to a slot in a [`BlockTree`]. Nodes
//! link to neighbors in the four planar directions and to one nested node in
//! the inward direction. Blocks refer back to their slot by [`NodeId`], never
//! by ownership.
//!
//! Layout is committed lazily: mutations mark blocks dirty and
//! [`BlockTree::commit_layout`] recomputes sizes bottom-up, then offsets and
//! absolute positions top-down.

use crate::block::{Block, BlockNeighborhood, NestedExtent, Size};
use crate::block_type::{read_type, BlockType};
use crate::direction::{read_direction, Alignment, Axis, Direction, LayoutPreference};
use crate::error::BlockError;
use crate::style::style;
use crate::text_edit::SharedTextEdit;
use eframe::egui;

/// Index of a node within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its tree's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Geometry computed for a node by the last committed layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLayout {
    /// Outer size of the node's block, in the node's own units
    pub size: Size,
    /// Bounds of the node and everything attached to it, relative to the node's center
    pub extent: egui::Rect,
    /// Position of the node's center relative to its parent's center, in parent units
    pub offset: egui::Vec2,
    /// Absolute position of the node's center, in world units
    pub position: egui::Pos2,
    /// Absolute scale of the node
    pub scale: f32,
}

impl Default for NodeLayout {
    fn default() -> Self {
        Self {
            size: Size::ZERO,
            extent: egui::Rect::from_center_size(egui::Pos2::ZERO, egui::Vec2::ZERO),
            offset: egui::Vec2::ZERO,
            position: egui::Pos2::ZERO,
            scale: 1.0,
        }
    }
}

/// A block bound to its position in a tree.
#[derive(Debug)]
pub struct BlockNode {
    id: NodeId,
    block_type: BlockType,
    block: Block,
    neighbors: [Option<NodeId>; 6],
    alignments: [Alignment; 6],
    parent: Option<NodeId>,
    parent_direction: Direction,
    scale: f32,
    preference: LayoutPreference,
    layout: NodeLayout,
    text_edit: Option<SharedTextEdit>,
}

impl BlockNode {
    /// Creates a node whose block uses the canonical style for `ty`.
    pub fn new(id: NodeId, ty: BlockType, math_mode: bool) -> Self {
        Self {
            id,
            block_type: ty,
            block: Block::new(id, style(ty, math_mode)),
            neighbors: [None; 6],
            alignments: [Alignment::None; 6],
            parent: None,
            parent_direction: Direction::Null,
            scale: 1.0,
            preference: LayoutPreference::default(),
            layout: NodeLayout::default(),
            text_edit: None,
        }
    }

    /// Creates a node from a block type token such as `"u"`, `"b"` or `"s"`.
    pub fn from_token(id: NodeId, token: &str, math_mode: bool) -> Result<Self, BlockError> {
        Ok(Self::new(id, read_type(token)?, math_mode))
    }

    /// This node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Type the node was created with.
    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    /// The node's block.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// The node's block, mutably.
    pub fn block_mut(&mut self) -> &mut Block {
        &mut self.block
    }

    /// The node this one was spawned from.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direction from the parent to this node, or [`Direction::Null`] for a root.
    pub fn parent_direction(&self) -> Direction {
        self.parent_direction
    }

    /// Scale of this node relative to its parent.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Which axis this node lays out first.
    pub fn layout_preference(&self) -> LayoutPreference {
        self.preference
    }

    /// Geometry from the last committed layout.
    pub fn layout(&self) -> &NodeLayout {
        &self.layout
    }

    /// Text-edit overlay attached to this node, if any.
    pub fn text_edit(&self) -> Option<&SharedTextEdit> {
        self.text_edit.as_ref()
    }

    fn neighbor(&self, dir: Direction) -> Option<NodeId> {
        dir.index().and_then(|idx| self.neighbors[idx])
    }

    fn alignment(&self, dir: Direction) -> Alignment {
        dir.index().map_or(Alignment::None, |idx| self.alignments[idx])
    }

    fn child_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        let parent_link = self.parent.map(|_| self.parent_direction.reverse());
        Direction::ALL
            .into_iter()
            .filter(move |dir| Some(*dir) != parent_link)
    }
}

/// A tree of blocks rooted at a single node.
#[derive(Debug)]
pub struct BlockTree {
    nodes: Vec<BlockNode>,
    root: NodeId,
    math_mode: bool,
}

impl BlockTree {
    /// Creates a tree holding a single root node of type `root_type`.
    pub fn new(root_type: BlockType, math_mode: bool) -> Self {
        let root = NodeId(0);
        Self {
            nodes: vec![BlockNode::new(root, root_type, math_mode)],
            root,
            math_mode,
        }
    }

    /// Creates a tree whose root type is given by a token such as `"u"`.
    pub fn new_named(root_type: &str, math_mode: bool) -> Result<Self, BlockError> {
        Ok(Self::new(read_type(root_type)?, math_mode))
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether new nodes use the math mode styles.
    pub fn math_mode(&self) -> bool {
        self.math_mode
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes. A tree always has its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` belongs to this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// All nodes, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &BlockNode> {
        self.nodes.iter()
    }

    /// The node `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from another tree.
    pub fn node(&self, id: NodeId) -> &BlockNode {
        &self.nodes[id.0]
    }

    /// The node `id`, mutably.
    pub fn node_mut(&mut self, id: NodeId) -> &mut BlockNode {
        &mut self.nodes[id.0]
    }

    /// The block of node `id`.
    pub fn block(&self, id: NodeId) -> &Block {
        &self.nodes[id.0].block
    }

    /// The block of node `id`, mutably.
    pub fn block_mut(&mut self, id: NodeId) -> &mut Block {
        &mut self.nodes[id.0].block
    }

    /// Neighborhood of `id`, as consumed by its block.
    pub fn view(&self, id: NodeId) -> NodeView<'_> {
        NodeView { tree: self, id }
    }

    /// Spawns a node of type `ty` in direction `dir` from `parent`.
    pub fn spawn(
        &mut self,
        parent: NodeId,
        dir: Direction,
        ty: BlockType,
    ) -> Result<NodeId, BlockError> {
        let idx = match dir {
            Direction::Null | Direction::Outward => {
                return Err(BlockError::InvalidDirection { direction: dir })
            }
            _ => dir
                .index()
                .ok_or(BlockError::InvalidDirection { direction: dir })?,
        };
        if self.nodes[parent.0].neighbors[idx].is_some() {
            return Err(BlockError::NodeExists { direction: dir });
        }

        let id = NodeId(self.nodes.len());
        let mut node = BlockNode::new(id, ty, self.math_mode);
        node.parent = Some(parent);
        node.parent_direction = dir;
        if let Some(back) = dir.reverse().index() {
            node.neighbors[back] = Some(parent);
        }
        self.nodes.push(node);

        let parent_node = &mut self.nodes[parent.0];
        parent_node.neighbors[idx] = Some(id);
        parent_node.block.invalidate_layout();
        Ok(id)
    }

    /// Spawns a node from direction and type tokens, such as `("f", "u")`.
    pub fn spawn_named(
        &mut self,
        parent: NodeId,
        dir: &str,
        ty: &str,
    ) -> Result<NodeId, BlockError> {
        let dir = read_direction(dir)?;
        let ty = read_type(ty)?;
        self.spawn(parent, dir, ty)
    }

    /// The node in direction `dir` from `id`, including its parent.
    pub fn node_at(&self, id: NodeId, dir: Direction) -> Option<NodeId> {
        self.nodes[id.0].neighbor(dir)
    }

    /// Whether a node exists in direction `dir` from `id`.
    pub fn has_node(&self, id: NodeId, dir: Direction) -> bool {
        self.node_at(id, dir).is_some()
    }

    /// Children of `id` with the direction each lies in.
    pub fn children(&self, id: NodeId) -> Vec<(Direction, NodeId)> {
        let node = &self.nodes[id.0];
        node.child_directions()
            .filter_map(|dir| node.neighbor(dir).map(|child| (dir, child)))
            .collect()
    }

    /// Whether `id` has any children.
    pub fn has_any_children(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        node.child_directions().any(|dir| node.neighbor(dir).is_some())
    }

    /// Sets how the child in `dir` is aligned against `id`.
    pub fn align(
        &mut self,
        id: NodeId,
        dir: Direction,
        alignment: Alignment,
    ) -> Result<(), BlockError> {
        let idx = dir
            .index()
            .ok_or(BlockError::InvalidDirection { direction: dir })?;
        let node = &mut self.nodes[id.0];
        if node.neighbors[idx].is_none() {
            return Err(BlockError::NoNode { direction: dir });
        }
        node.alignments[idx] = alignment;
        node.block.invalidate_layout();
        Ok(())
    }

    /// Alignment of the child in `dir` from `id`.
    pub fn node_alignment_mode(&self, id: NodeId, dir: Direction) -> Alignment {
        self.nodes[id.0].alignment(dir)
    }

    /// Sets the scale of `id` relative to its parent.
    pub fn set_scale(&mut self, id: NodeId, scale: f32) {
        let node = &mut self.nodes[id.0];
        if node.scale == scale {
            return;
        }
        node.scale = scale;
        node.block.invalidate_layout();
    }

    /// Makes `id` lay out children on the axis of `dir` first.
    pub fn pull(&mut self, id: NodeId, dir: Direction) {
        let preference = match dir.axis() {
            Axis::Horizontal => LayoutPreference::Horizontal,
            Axis::Vertical => LayoutPreference::Vertical,
            Axis::Z | Axis::Null => return,
        };
        let node = &mut self.nodes[id.0];
        if node.preference != preference {
            node.preference = preference;
            node.block.invalidate_layout();
        }
    }

    pub(crate) fn set_text_edit(&mut self, id: NodeId, edit: SharedTextEdit) {
        self.nodes[id.0].text_edit = Some(edit);
    }

    /// Text-edit overlay attached to `id`, if any.
    pub fn text_edit(&self, id: NodeId) -> Option<&SharedTextEdit> {
        self.nodes[id.0].text_edit.as_ref()
    }

    /// Delivers a focus change to the block of `id`.
    pub fn focus(&mut self, id: NodeId, focused: bool) -> bool {
        self.block_mut(id).handle_focus(focused)
    }

    /// Delivers a click to the block of `id`. Returns whether it was consumed.
    pub fn click(&mut self, id: NodeId) -> bool {
        self.block_mut(id).handle_click()
    }

    /// Measures every label not yet measured with `measure`, which lays text out
    /// at a given pixel size. Returns whether any size changed.
    pub fn measure_labels(&mut self, mut measure: impl FnMut(&str, f32) -> egui::Vec2) -> bool {
        self.nodes.iter_mut().fold(false, |any, node| {
            node.block.measure_label(&mut measure) || any
        })
    }

    /// Whether any block changed since the last committed layout.
    pub fn needs_commit(&self) -> bool {
        self.nodes.iter().any(|node| node.block.needs_layout())
    }

    /// Whether any block asked to be repainted, clearing every request.
    pub fn take_repaint(&mut self) -> bool {
        self.nodes
            .iter_mut()
            .fold(false, |any, node| node.block.take_repaint() || any)
    }

    /// Recomputes the size and position of every node.
    ///
    /// Fails if a block cannot be measured. The geometry from the previous
    /// commit is then restored untouched and blocks stay dirty.
    pub fn commit_layout(&mut self) -> Result<(), BlockError> {
        let root = self.root;
        let saved: Vec<NodeLayout> = self.nodes.iter().map(|node| node.layout).collect();
        if let Err(err) = self.layout_node(root) {
            for (node, layout) in self.nodes.iter_mut().zip(saved) {
                node.layout = layout;
            }
            return Err(err);
        }
        let scale = self.nodes[root.0].scale;
        self.place(root, egui::Pos2::ZERO, scale);
        for node in &mut self.nodes {
            node.block.mark_layout_clean();
        }
        log::debug!("committed layout for {} nodes", self.nodes.len());
        Ok(())
    }

    /// Geometry of `id` from the last committed layout.
    pub fn layout(&self, id: NodeId) -> &NodeLayout {
        &self.nodes[id.0].layout
    }

    /// World-space rectangle covered by the block of `id`.
    pub fn node_rect(&self, id: NodeId) -> egui::Rect {
        let layout = &self.nodes[id.0].layout;
        egui::Rect::from_center_size(layout.position, layout.size * layout.scale)
    }

    /// World-space bounds of the whole tree.
    pub fn extent(&self) -> egui::Rect {
        let layout = &self.nodes[self.root.0].layout;
        let min = layout.position + layout.extent.min.to_vec2() * layout.scale;
        let max = layout.position + layout.extent.max.to_vec2() * layout.scale;
        egui::Rect::from_min_max(min, max)
    }

    /// Nodes in the order they should be painted: parents before children,
    /// so nested nodes land on top of the blocks containing them.
    pub fn paint_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            for (_, child) in self.children(id).into_iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    /// The topmost node whose block covers `point`, in world space.
    pub fn node_at_point(&self, point: egui::Pos2) -> Option<NodeId> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|id| self.node_rect(*id).contains(point))
    }

    fn layout_node(&mut self, id: NodeId) -> Result<(), BlockError> {
        let children = self.children(id);
        for &(_, child) in &children {
            self.layout_node(child)?;
        }

        let size = self.nodes[id.0].block.size(&self.view(id))?;
        let body = egui::Rect::from_center_size(egui::Pos2::ZERO, size);
        let mut extent = body;

        if let Some(&(_, inner)) = children.iter().find(|(dir, _)| *dir == Direction::Inward) {
            let offset = self.nested_offset(id, inner, body);
            self.nodes[inner.0].layout.offset = offset;
            extent = extent.union(self.scaled_extent(inner).translate(offset));
        }

        let vertical = [Direction::Downward, Direction::Upward];
        let horizontal = [Direction::Forward, Direction::Backward];
        let groups = match self.nodes[id.0].preference {
            LayoutPreference::Vertical => [vertical, horizontal],
            LayoutPreference::Horizontal => [horizontal, vertical],
        };

        let mut base = body;
        for group in groups {
            for dir in group {
                let Some(&(_, child)) = children.iter().find(|(d, _)| *d == dir) else {
                    continue;
                };
                let offset = self.outer_offset(id, dir, child, base, body);
                self.nodes[child.0].layout.offset = offset;
                extent = extent.union(self.scaled_extent(child).translate(offset));
            }
            base = extent;
        }

        let layout = &mut self.nodes[id.0].layout;
        layout.size = size;
        layout.extent = extent;
        Ok(())
    }

    /// Extent of `id` in its parent's units.
    fn scaled_extent(&self, id: NodeId) -> egui::Rect {
        let node = &self.nodes[id.0];
        let extent = node.layout.extent;
        egui::Rect::from_min_max(
            (extent.min.to_vec2() * node.scale).to_pos2(),
            (extent.max.to_vec2() * node.scale).to_pos2(),
        )
    }

    fn nested_offset(&self, id: NodeId, inner: NodeId, body: egui::Rect) -> egui::Vec2 {
        let block = &self.nodes[id.0].block;
        let inset = egui::vec2(
            block.horizontal_padding() + block.border_thickness(),
            block.vertical_padding() + block.border_thickness(),
        );
        let content_min = body.min + inset;
        let vertical = self.node_alignment_mode(id, Direction::Inward) == Alignment::InwardVertical;
        let target = match block.label_size() {
            Some(label) if vertical => content_min + egui::vec2(0.0, label.y + block.vertical_padding()),
            Some(label) => content_min + egui::vec2(label.x + block.horizontal_padding(), 0.0),
            None => content_min,
        };
        target - self.scaled_extent(inner).min
    }

    fn outer_offset(
        &self,
        id: NodeId,
        dir: Direction,
        child: NodeId,
        base: egui::Rect,
        body: egui::Rect,
    ) -> egui::Vec2 {
        let separation = self.nodes[id.0]
            .block
            .get_separation(dir.axis(), dir, &self.view(id));
        let ext = self.scaled_extent(child);
        let alignment = self.node_alignment_mode(id, dir);
        let cross = |body_min: f32, body_max: f32, ext_min: f32, ext_max: f32| match alignment {
            Alignment::Negative => body_min - ext_min,
            Alignment::Positive => body_max - ext_max,
            _ => 0.0,
        };
        match dir {
            Direction::Forward => egui::vec2(
                base.max.x + separation - ext.min.x,
                cross(body.min.y, body.max.y, ext.min.y, ext.max.y),
            ),
            Direction::Backward => egui::vec2(
                base.min.x - separation - ext.max.x,
                cross(body.min.y, body.max.y, ext.min.y, ext.max.y),
            ),
            Direction::Downward => egui::vec2(
                cross(body.min.x, body.max.x, ext.min.x, ext.max.x),
                base.max.y + separation - ext.min.y,
            ),
            Direction::Upward => egui::vec2(
                cross(body.min.x, body.max.x, ext.min.x, ext.max.x),
                base.min.y - separation - ext.max.y,
            ),
            Direction::Inward | Direction::Outward | Direction::Null => egui::Vec2::ZERO,
        }
    }

    fn place(&mut self, id: NodeId, position: egui::Pos2, scale: f32) {
        let layout = &mut self.nodes[id.0].layout;
        layout.position = position;
        layout.scale = scale;
        for (_, child) in self.children(id) {
            let node = &self.nodes[child.0];
            let child_position = position + node.layout.offset * scale;
            let child_scale = scale * node.scale;
            self.place(child, child_position, child_scale);
        }
    }
}

/// A node's neighborhood within a [`BlockTree`].
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a BlockTree,
    id: NodeId,
}

impl NodeView<'_> {
    /// The node being viewed.
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl BlockNeighborhood for NodeView<'_> {
    fn has_node(&self, dir: Direction) -> bool {
        self.tree.has_node(self.id, dir)
    }

    fn node_alignment_mode(&self, dir: Direction) -> Alignment {
        self.tree.node_alignment_mode(self.id, dir)
    }

    fn nested_extent(&self) -> Option<NestedExtent> {
        let inner = self.tree.node_at(self.id, Direction::Inward)?;
        let node = self.tree.node(inner);
        Some(NestedExtent {
            size: node.layout.extent.size(),
            scale: node.scale,
        })
    }

    fn neighbor_is_bud(&self, dir: Direction) -> bool {
        self.tree
            .node_at(self.id, dir)
            .is_some_and(|neighbor| self.tree.block(neighbor).is_bud())
    }

    fn neighbor_has_children(&self, dir: Direction) -> bool {
        self.tree
            .node_at(self.id, dir)
            .is_some_and(|neighbor| self.tree.has_any_children(neighbor))
    }
}
