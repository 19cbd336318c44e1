//! # Parsegraph Block
//!
//! Styling, sizing and interaction for the nodes of a parsegraph: a directed
//! tree whose nodes sit forward, backward, above, below or inside each other.
//! Nodes come in three kinds:
//! - **Buds**: small, near-circular joints
//! - **Blocks**: labelled rounded rectangles
//! - **Slots**: placeholders for content still to be filled in
//!
//! ## Features
//! - Shared style records with math mode variants
//! - Block sizing from labels, minimum sizes and nested content
//! - Separation rules between neighboring blocks
//! - An arena-backed tree with lazy layout and a caret for building it
//! - Inline label editing with optional asynchronous validation
//! - A demo viewer with pan, zoom and click handling

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod block;
pub mod block_type;
pub mod camera;
pub mod caret;
pub mod constants;
pub mod demo;
pub mod direction;
pub mod error;
pub mod interact;
pub mod label;
pub mod style;
pub mod text_edit;
pub mod tree;
mod ui;

// Re-export the types most callers need
pub use block::{Block, BlockNeighborhood, Detached, NestedExtent, Size};
pub use block_type::{name_type, read_type, BlockType};
pub use camera::Camera;
pub use caret::BlockCaret;
pub use direction::{read_direction, Alignment, Axis, Direction, LayoutPreference};
pub use error::BlockError;
pub use style::{clone_style, copy_style, style, BlockStyle, Color, StyleRef};
pub use text_edit::{EditKey, EditMode, EditOutcome, TextEdit};
pub use tree::{BlockNode, BlockTree, NodeId};
pub use ui::{DemoApp, DemoSettings};

/// Runs the demo viewer with default window settings.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// fn main() -> Result<(), eframe::Error> {
///     parsegraph_block::run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Parsegraph Blocks",
        options,
        Box::new(|cc| Ok(Box::new(DemoApp::new(cc)))),
    )
}
