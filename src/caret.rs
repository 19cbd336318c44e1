//! Cursor-style builder for block trees.
//!
//! A [`BlockCaret`] owns a [`BlockTree`] and remembers a current node.
//! Spawning, labelling and aligning act on that node, and `push`/`pop` save
//! and restore positions so branches can be built without tracking ids.

use crate::block::Block;
use crate::block_type::{read_type, BlockType};
use crate::constants::SHRINK_SCALE;
use crate::direction::{read_direction, Alignment, Direction};
use crate::error::BlockError;
use crate::tree::{BlockTree, NodeId};

/// Builds a [`BlockTree`] one node at a time.
#[derive(Debug)]
pub struct BlockCaret {
    tree: BlockTree,
    node: NodeId,
    saved: Vec<NodeId>,
}

impl BlockCaret {
    /// Creates a caret on the root of a new tree of type `root_type`.
    pub fn new(root_type: BlockType) -> Self {
        Self::with_math_mode(root_type, false)
    }

    /// Creates a caret on the root of a new tree, choosing the style set.
    pub fn with_math_mode(root_type: BlockType, math_mode: bool) -> Self {
        let tree = BlockTree::new(root_type, math_mode);
        let node = tree.root();
        Self {
            tree,
            node,
            saved: Vec::new(),
        }
    }

    /// Creates a caret from a root type token such as `"u"`.
    pub fn new_named(root_type: &str) -> Result<Self, BlockError> {
        Ok(Self::new(read_type(root_type)?))
    }

    /// Root of the tree being built.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Node the caret is on.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Block of the node the caret is on.
    pub fn block_mut(&mut self) -> &mut Block {
        self.tree.block_mut(self.node)
    }

    /// The tree being built.
    pub fn tree(&self) -> &BlockTree {
        &self.tree
    }

    /// The tree being built, mutably.
    pub fn tree_mut(&mut self) -> &mut BlockTree {
        &mut self.tree
    }

    /// Finishes building and hands over the tree.
    pub fn into_tree(self) -> BlockTree {
        self.tree
    }

    /// Whether a node exists in `dir` from the current node.
    pub fn has(&self, dir: Direction) -> bool {
        self.tree.has_node(self.node, dir)
    }

    /// Spawns a node in `dir` without moving.
    pub fn spawn(&mut self, dir: Direction, ty: BlockType) -> Result<NodeId, BlockError> {
        self.tree.spawn(self.node, dir, ty)
    }

    /// Spawns a node from direction and type tokens without moving.
    pub fn spawn_named(&mut self, dir: &str, ty: &str) -> Result<NodeId, BlockError> {
        self.tree.spawn_named(self.node, dir, ty)
    }

    /// Spawns a node in `dir` and moves onto it.
    pub fn spawn_move(&mut self, dir: Direction, ty: BlockType) -> Result<NodeId, BlockError> {
        self.node = self.spawn(dir, ty)?;
        Ok(self.node)
    }

    /// Spawns a node from tokens and moves onto it.
    pub fn spawn_move_named(&mut self, dir: &str, ty: &str) -> Result<NodeId, BlockError> {
        self.node = self.spawn_named(dir, ty)?;
        Ok(self.node)
    }

    /// Moves onto the node in `dir`, which may be the parent.
    pub fn move_to(&mut self, dir: Direction) -> Result<NodeId, BlockError> {
        self.node = self
            .tree
            .node_at(self.node, dir)
            .ok_or(BlockError::NoNode { direction: dir })?;
        Ok(self.node)
    }

    /// Moves onto the node in the direction named by `dir`.
    pub fn move_named(&mut self, dir: &str) -> Result<NodeId, BlockError> {
        self.move_to(read_direction(dir)?)
    }

    /// Makes the current node lay out the axis of `dir` first.
    pub fn pull(&mut self, dir: Direction) {
        self.tree.pull(self.node, dir);
    }

    /// Aligns the child in `dir` against the current node.
    pub fn align(&mut self, dir: Direction, alignment: Alignment) -> Result<(), BlockError> {
        self.tree.align(self.node, dir, alignment)
    }

    /// Sets the current node's label.
    pub fn label(&mut self, text: &str) {
        self.block_mut().set_label(text);
    }

    /// Draws the current node smaller than its parent.
    pub fn shrink(&mut self) {
        self.tree.set_scale(self.node, SHRINK_SCALE);
    }

    /// Restores the current node to its parent's scale.
    pub fn grow(&mut self) {
        self.tree.set_scale(self.node, 1.0);
    }

    /// Saves the current position.
    pub fn push(&mut self) {
        self.saved.push(self.node);
    }

    /// Returns to the most recently saved position.
    pub fn pop(&mut self) -> Result<NodeId, BlockError> {
        self.node = self.saved.pop().ok_or(BlockError::EmptyCaretStack)?;
        Ok(self.node)
    }
}
