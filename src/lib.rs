#![warn(missing_docs)]

//! # `nodal`
//!
//! Graph model and rule engine for small graph puzzles: coloring a graph properly, walking a Hamiltonian path,
//! untangling an embedding until it is planar, and playing the edge-claiming game [Sim](https://en.wikipedia.org/wiki/Sim_(game)).
//! Begin by feeding loaded level data to a [`LevelBuilder`], which checks it and yields a [`Level`].
//! Mutate the level as the player interacts (paint, drag, step, claim), then ask it whether it is solved.
//!
//! Rendering, input, animation, and persistence belong to the host. The crate only answers with uids, positions, and colors,
//! which the host maps onto whatever it draws.
//!
//! # Internals
//! A level's graph is an [`AdjacencyList`] of [`Node`] payloads keyed by uid. Every connection is stored as two directed edges,
//! and the rules in [`rules`] are written to give the same answer no matter how often a connection is visited.
//!
//! - Coloring: every directed edge must join two painted vertices of different colors.
//!   Whether a level *can* be colored with a palette at all is answered by encoding it as a Boolean satisfiability problem, see [`coloring`].
//! - Hamiltonian: every vertex must carry the walk color. Steps are only accepted along edges, see [`Walk`].
//! - Planar: no two connections may cross strictly inside both segments, see [`planar`].
//! - Sim: the automatic opponent samples random open edges, falling back to enumerating them, see [`sim`].
//!
//! A level is meant to be owned and driven from one thread; nothing in it is synchronized.

pub use builder::{BuilderInvalidReason, LevelBuilder};
pub use config::Config;
pub use graph::{AdjacencyList, Edge, EdgeKind, GraphError, Payload, Vertex};
pub use level::{Level, MoveError};
pub use node::{Color, Node, Position, Uid};
pub use rules::{Fault, PuzzleType, Verdict};
pub use sim::{ClaimOutcome, MoveHistory, Side};
pub use walk::Walk;

pub mod builder;
pub mod coloring;
pub(crate) mod config;
pub mod graph;
pub(crate) mod level;
pub(crate) mod logic;
pub(crate) mod node;
pub mod planar;
pub mod rules;
pub mod sim;
mod tests;
pub(crate) mod walk;
#[cfg(feature = "wasm")]
pub mod wasm;
