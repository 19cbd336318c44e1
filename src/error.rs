//! Error type shared by the block, tree and caret modules.

use crate::direction::Direction;
use std::fmt;

/// Errors raised while building or laying out a block graph.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockError {
    /// A label measured as not-a-number. The font or label is broken and the
    /// layout pass must stop instead of producing a degenerate size.
    NanLabelSize {
        /// Scaled label width that was measured
        width: f32,
        /// Scaled label height that was measured
        height: f32,
    },
    /// A block type token did not name a bud, block or slot.
    UnknownBlockType(String),
    /// A direction token did not name a direction.
    UnknownDirection(String),
    /// A node already occupies the requested direction.
    NodeExists {
        /// Direction that is already taken
        direction: Direction,
    },
    /// No node exists in the requested direction.
    NoNode {
        /// Direction that was empty
        direction: Direction,
    },
    /// A direction that cannot hold a node, such as null or outward, was used.
    InvalidDirection {
        /// The rejected direction
        direction: Direction,
    },
    /// `BlockCaret::pop` was called without a matching push.
    EmptyCaretStack,
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NanLabelSize { width, height } => {
                write!(f, "label returned a NaN size ({width}, {height})")
            }
            Self::UnknownBlockType(token) => write!(f, "unknown block type: {token:?}"),
            Self::UnknownDirection(token) => write!(f, "unknown direction: {token:?}"),
            Self::NodeExists { direction } => {
                write!(f, "a node already exists in the {direction} direction")
            }
            Self::NoNode { direction } => write!(f, "no node exists in the {direction} direction"),
            Self::InvalidDirection { direction } => {
                write!(f, "the {direction} direction is not a valid node slot")
            }
            Self::EmptyCaretStack => write!(f, "caret position stack is empty"),
        }
    }
}

impl std::error::Error for BlockError {}
