//! The three kinds of block a parsegraph node can be.

use crate::error::BlockError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of block, which selects its canonical style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockType {
    /// Small near-circular connector or leaf
    Bud,
    /// Rectangular node with a light fill
    Slot,
    /// Rectangular node, the default
    #[default]
    Block,
}

impl BlockType {
    /// Every block type.
    pub const ALL: [BlockType; 3] = [BlockType::Bud, BlockType::Slot, BlockType::Block];
}

/// Parses a block type from its one-letter token or full name.
///
/// Accepts `u`/`bud`, `s`/`slot` and `b`/`block`, case-insensitively.
pub fn read_type(token: &str) -> Result<BlockType, BlockError> {
    match token.trim().to_ascii_lowercase().as_str() {
        "u" | "bud" => Ok(BlockType::Bud),
        "s" | "slot" => Ok(BlockType::Slot),
        "b" | "block" => Ok(BlockType::Block),
        _ => Err(BlockError::UnknownBlockType(token.to_string())),
    }
}

/// Returns the lowercase name of a block type.
pub fn name_type(ty: BlockType) -> &'static str {
    match ty {
        BlockType::Bud => "bud",
        BlockType::Slot => "slot",
        BlockType::Block => "block",
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(name_type(*self))
    }
}

impl FromStr for BlockType {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        read_type(s)
    }
}
