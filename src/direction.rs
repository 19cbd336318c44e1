//! Directions, axes and alignments used to connect nodes in a block tree.

use crate::error::BlockError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A direction from one node to a neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// No direction
    Null,
    /// Right of the node
    Forward,
    /// Left of the node
    Backward,
    /// Below the node
    Downward,
    /// Above the node
    Upward,
    /// Nested inside the node's body
    Inward,
    /// The node that contains this one
    Outward,
}

impl Direction {
    /// Every non-null direction, in slot order.
    pub const ALL: [Direction; 6] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Downward,
        Direction::Upward,
        Direction::Inward,
        Direction::Outward,
    ];

    /// Returns the slot index of this direction, or `None` for [`Direction::Null`].
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Null => None,
            Self::Forward => Some(0),
            Self::Backward => Some(1),
            Self::Downward => Some(2),
            Self::Upward => Some(3),
            Self::Inward => Some(4),
            Self::Outward => Some(5),
        }
    }

    /// Returns the direction pointing back the way this one came.
    pub fn reverse(self) -> Self {
        match self {
            Self::Null => Self::Null,
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
            Self::Downward => Self::Upward,
            Self::Upward => Self::Downward,
            Self::Inward => Self::Outward,
            Self::Outward => Self::Inward,
        }
    }

    /// Returns the axis this direction lies on.
    pub fn axis(self) -> Axis {
        match self {
            Self::Null => Axis::Null,
            Self::Forward | Self::Backward => Axis::Horizontal,
            Self::Downward | Self::Upward => Axis::Vertical,
            Self::Inward | Self::Outward => Axis::Z,
        }
    }

    /// Returns the lowercase name of this direction.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Downward => "downward",
            Self::Upward => "upward",
            Self::Inward => "inward",
            Self::Outward => "outward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a direction from its one-letter token or full name, case-insensitively.
pub fn read_direction(token: &str) -> Result<Direction, BlockError> {
    match token.trim().to_ascii_lowercase().as_str() {
        "f" | "forward" => Ok(Direction::Forward),
        "b" | "backward" => Ok(Direction::Backward),
        "d" | "downward" => Ok(Direction::Downward),
        "u" | "upward" => Ok(Direction::Upward),
        "i" | "inward" => Ok(Direction::Inward),
        "o" | "outward" => Ok(Direction::Outward),
        "n" | "null" => Ok(Direction::Null),
        _ => Err(BlockError::UnknownDirection(token.to_string())),
    }
}

impl FromStr for Direction {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        read_direction(s)
    }
}

/// An axis of the layout plane, plus the depth axis used by nested nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// No axis
    Null,
    /// Up and down
    Vertical,
    /// Left and right
    Horizontal,
    /// In and out of a node's body
    Z,
}

/// How a child is aligned against its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    /// No explicit alignment; children are centered and nested nodes stack horizontally
    #[default]
    None,
    /// Align the child's leading edge with the parent's
    Negative,
    /// Center the child on the parent
    Center,
    /// Align the child's trailing edge with the parent's
    Positive,
    /// Stack a nested node below the parent's label
    InwardVertical,
    /// Stack a nested node beside the parent's label
    InwardHorizontal,
}

/// Which axis a node lays out first. Children on the preferred axis hug the
/// node's body; children on the other axis clear everything placed before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutPreference {
    /// Place horizontal children first
    Horizontal,
    /// Place vertical children first
    #[default]
    Vertical,
}
