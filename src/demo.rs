//! Sample graphs shown by the demo viewer.
//!
//! Each builder returns a freshly built [`BlockTree`]. The random builders take
//! any [`Rng`] so tests can replay them from a seeded [`StdRng`].
//!
//! [`StdRng`]: rand::rngs::StdRng

use crate::block_type::BlockType;
use crate::caret::BlockCaret;
use crate::constants::RANDOM_GRAPH_SPAWNS;
use crate::direction::{Alignment, Direction};
use crate::error::BlockError;
use crate::text_edit::{CommitCallback, CommitFuture};
use crate::tree::BlockTree;
use futures::FutureExt;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Label used by every sample graph.
pub const DEMO_LABEL: &str = "parsegraph";

/// Sample graphs the viewer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DemoGraph {
    /// A random pick among the other samples, weighted toward random graphs
    #[default]
    Any,
    /// Three buds over a labelled block
    Logo,
    /// A chain of nested buds and blocks
    Buds,
    /// A nested switch-like structure
    Switch,
    /// A random walk of spawns
    Random,
    /// A block whose label can be edited
    Editable,
}

impl DemoGraph {
    /// Every sample, in picker order.
    pub const ALL: [DemoGraph; 6] = [
        DemoGraph::Any,
        DemoGraph::Logo,
        DemoGraph::Buds,
        DemoGraph::Switch,
        DemoGraph::Random,
        DemoGraph::Editable,
    ];

    /// Name shown in the picker.
    pub fn name(self) -> &'static str {
        match self {
            DemoGraph::Any => "Any",
            DemoGraph::Logo => "Logo",
            DemoGraph::Buds => "Buds",
            DemoGraph::Switch => "Switch",
            DemoGraph::Random => "Random",
            DemoGraph::Editable => "Editable",
        }
    }

    /// Builds this sample.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R, math_mode: bool) -> Result<BlockTree, BlockError> {
        match self {
            DemoGraph::Any => build_any(rng, math_mode),
            DemoGraph::Logo => build_logo(math_mode),
            DemoGraph::Buds => build_buds(rng, math_mode),
            DemoGraph::Switch => build_switch(math_mode),
            DemoGraph::Random => build_random(rng, math_mode),
            DemoGraph::Editable => build_editable(math_mode),
        }
    }
}

/// Graph shown before the first refresh.
pub fn build_placeholder(math_mode: bool) -> BlockTree {
    let mut car = BlockCaret::with_math_mode(BlockType::Block, math_mode);
    car.label("No time");
    car.into_tree()
}

/// A bud with buds on either side and a labelled block below.
pub fn build_logo(math_mode: bool) -> Result<BlockTree, BlockError> {
    let mut car = BlockCaret::with_math_mode(BlockType::Bud, math_mode);
    car.spawn(Direction::Forward, BlockType::Bud)?;
    car.spawn(Direction::Backward, BlockType::Bud)?;
    car.spawn_move(Direction::Downward, BlockType::Block)?;
    car.label("Parsegraph");
    Ok(car.into_tree())
}

/// Up to ten nested buds and blocks.
pub fn build_buds<R: Rng + ?Sized>(rng: &mut R, math_mode: bool) -> Result<BlockTree, BlockError> {
    let mut car = BlockCaret::with_math_mode(BlockType::Bud, math_mode);
    let count = rng.random_range(1..=10);
    for _ in 0..count {
        let ty = if rng.random_bool(0.5) { BlockType::Bud } else { BlockType::Block };
        car.spawn_move(Direction::Inward, ty)?;
    }
    Ok(car.into_tree())
}

/// Nested buds leading into a chain of blocks with a branch saved and restored.
pub fn build_switch(math_mode: bool) -> Result<BlockTree, BlockError> {
    let mut car = BlockCaret::with_math_mode(BlockType::Bud, math_mode);
    car.spawn_move_named("i", "u")?;
    car.spawn_move_named("f", "u")?;
    car.label(DEMO_LABEL);
    car.spawn_move_named("f", "b")?;
    car.spawn_move_named("f", "b")?;
    car.spawn_move_named("i", "u")?;
    car.push();
    car.spawn_move_named("i", "u")?;
    car.spawn_move_named("d", "u")?;
    car.pop()?;
    car.spawn_move_named("d", "u")?;
    car.label(DEMO_LABEL);
    car.spawn_move_named("d", "b")?;
    Ok(car.into_tree())
}

/// A random walk: each step spawns in a free direction, optionally labels the
/// current node, pulls toward the new node and moves onto it.
pub fn build_random<R: Rng + ?Sized>(rng: &mut R, math_mode: bool) -> Result<BlockTree, BlockError> {
    const DIRECTIONS: [Direction; 5] = [
        Direction::Forward,
        Direction::Downward,
        Direction::Inward,
        Direction::Upward,
        Direction::Backward,
    ];

    let mut car = BlockCaret::with_math_mode(BlockType::Bud, math_mode);
    for _ in 0..RANDOM_GRAPH_SPAWNS {
        let mut dir = DIRECTIONS[rng.random_range(0..DIRECTIONS.len())];
        while car.has(dir) {
            dir = DIRECTIONS[rng.random_range(0..DIRECTIONS.len())];
        }
        let ty = if rng.random_bool(0.5) { BlockType::Block } else { BlockType::Bud };
        car.spawn(dir, ty)?;
        if dir == Direction::Inward {
            let alignment = if rng.random_bool(0.5) {
                Alignment::InwardVertical
            } else {
                Alignment::InwardHorizontal
            };
            car.align(dir, alignment)?;
        }
        let label = if rng.random_bool(0.5) { DEMO_LABEL } else { "" };
        car.label(label);
        car.pull(dir);
        car.move_to(dir)?;
    }
    Ok(car.into_tree())
}

/// Picks one of logo, buds, switch or random, with random three times as likely.
pub fn build_any<R: Rng + ?Sized>(rng: &mut R, math_mode: bool) -> Result<BlockTree, BlockError> {
    match rng.random_range(0..6) {
        0 => build_logo(math_mode),
        1 => build_buds(rng, math_mode),
        2 => build_switch(math_mode),
        _ => build_random(rng, math_mode),
    }
}

/// A bud above a block whose label can be edited. Blank values are rejected.
pub fn build_editable(math_mode: bool) -> Result<BlockTree, BlockError> {
    let mut car = BlockCaret::with_math_mode(BlockType::Bud, math_mode);
    let node = car.spawn_move(Direction::Downward, BlockType::Block)?;
    let mut tree = car.into_tree();
    let callback: CommitCallback = Box::new(|value: &str| -> CommitFuture {
        let result = if value.trim().is_empty() {
            Err("label must not be blank".to_string())
        } else {
            Ok(())
        };
        futures::future::ready(result).boxed_local()
    });
    tree.attach_text_edit(node, "Click to edit", Some(callback));
    Ok(tree)
}
