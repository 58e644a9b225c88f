use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantArray};

use crate::config::Config;
use crate::graph::{AdjacencyList, Edge, Vertex};
use crate::node::Node;
use crate::planar;

/// The rule a level is played under. Fixed for the life of a level.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Display, EnumString, VariantArray)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PuzzleType {
    /// Paint every vertex so that no edge joins two vertices of the same color.
    #[strum(serialize = "kColor")]
    #[cfg_attr(feature = "serde", serde(rename = "kColor"))]
    KColor,
    /// Walk through every vertex once along edges.
    #[strum(serialize = "hamiltonian")]
    #[cfg_attr(feature = "serde", serde(rename = "hamiltonian"))]
    Hamiltonian,
    /// Drag vertices until no two edges cross.
    #[strum(serialize = "planar")]
    #[cfg_attr(feature = "serde", serde(rename = "planar"))]
    Planar,
    /// Claim edges in turn without closing a triangle of your own.
    #[strum(serialize = "sim")]
    #[cfg_attr(feature = "serde", serde(rename = "sim"))]
    Sim,
}

/// Something about the graph that keeps it from being solved. Purely informational; the UI uses it for highlighting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fault {
    /// A directed edge whose endpoints share a color, or where either endpoint is unpainted.
    Clash(Edge),
    /// A vertex the walk has not reached.
    Unvisited(Vertex),
    /// Two connections that cross in the plane.
    Crossing(Edge, Edge),
}

/// Result of evaluating a graph against a [`PuzzleType`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Verdict {
    pub solved: bool,
    pub faults: Vec<Fault>,
}

impl Verdict {
    fn from_faults(faults: Vec<Fault>) -> Self {
        Self { solved: faults.is_empty(), faults }
    }
}

/// Evaluate `graph` under `puzzle`.
///
/// # Rules
/// - [`KColor`](PuzzleType::KColor): solved iff every directed edge has painted endpoints of different colors.
///   Undirected connections are visited once per direction, which changes nothing since the check is symmetric.
/// - [`Hamiltonian`](PuzzleType::Hamiltonian): solved iff every vertex carries the configured walk color.
///   Step adjacency and closing the cycle are checked as moves are made, not here.
/// - [`Planar`](PuzzleType::Planar): solved iff no two distinct connections cross in their `(x, y)` projection.
/// - [`Sim`](PuzzleType::Sim): never solved. A Sim game ends when no legal move is left or a side closes a triangle.
pub fn check(graph: &AdjacencyList<Node>, puzzle: PuzzleType, config: &Config) -> Verdict {
    match puzzle {
        PuzzleType::KColor => Verdict::from_faults(graph.edges()
            .filter(|edge| {
                let (from, to) = (graph.color_of(edge.source), graph.color_of(edge.destination));
                from.is_unset() || to.is_unset() || from == to
            })
            .map(Fault::Clash)
            .collect_vec()),
        PuzzleType::Hamiltonian => Verdict::from_faults(graph.vertices()
            .filter(|vertex| graph.color_of(*vertex) != config.walk_color)
            .map(Fault::Unvisited)
            .collect_vec()),
        PuzzleType::Planar => Verdict::from_faults(planar::crossings(graph)
            .into_iter()
            .map(|(e1, e2)| Fault::Crossing(e1, e2))
            .collect_vec()),
        PuzzleType::Sim => Verdict { solved: false, faults: Vec::new() },
    }
}

/// Shorthand for `check(..).solved`.
pub fn check_solved(graph: &AdjacencyList<Node>, puzzle: PuzzleType, config: &Config) -> bool {
    check(graph, puzzle, config).solved
}
