use itertools::Itertools;
use rand::seq::IndexedRandom;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, trace};
use unordered_pair::UnorderedPair;

use crate::graph::{AdjacencyList, Edge, Vertex};
use crate::node::{Node, Uid};

/// The two sides of a Sim game.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// The person at the screen.
    Player,
    /// The automatic responder.
    Opponent,
}

impl Side {
    pub fn other(&self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }
}

/// What a claim did to the game.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClaimOutcome {
    /// Play goes on.
    Open,
    /// The claiming side closed a triangle of its own edges and lost.
    Triangle,
}

/// Claimed edges, in the order they were claimed.
///
/// Pairs are kept whole, so a lookup never matches the second uid of one move against the first uid of the next.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveHistory {
    moves: Vec<(Uid, Uid)>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, x: Uid, y: Uid) {
        self.moves.push((x, y));
    }

    /// Whether `x` and `y` were claimed together, in either order.
    pub fn contains(&self, x: Uid, y: Uid) -> bool {
        let wanted = UnorderedPair(x, y);
        self.moves.iter().any(|(a, b)| UnorderedPair(*a, *b) == wanted)
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn moves(&self) -> &[(Uid, Uid)] {
        &self.moves
    }

    /// The history as one flat uid sequence, two entries per move.
    pub fn flat(&self) -> Vec<Uid> {
        self.moves.iter().flat_map(|(a, b)| [*a, *b]).collect_vec()
    }
}

impl FromIterator<(Uid, Uid)> for MoveHistory {
    fn from_iter<I: IntoIterator<Item = (Uid, Uid)>>(iter: I) -> Self {
        Self { moves: iter.into_iter().collect() }
    }
}

impl Extend<(Uid, Uid)> for MoveHistory {
    fn extend<I: IntoIterator<Item = (Uid, Uid)>>(&mut self, iter: I) {
        self.moves.extend(iter)
    }
}

/// An edge is legal while neither history holds it, in either order.
pub fn is_legal_move(current: &MoveHistory, used: &MoveHistory, x: Uid, y: Uid) -> bool {
    !current.contains(x, y) && !used.contains(x, y)
}

/// Every connection of `graph` still open for claiming, one entry per connection.
pub fn legal_moves(graph: &AdjacencyList<Node>, current: &MoveHistory, used: &MoveHistory) -> Vec<(Uid, Uid)> {
    graph.undirected_edges()
        .into_iter()
        .filter(|edge| edge.source != edge.destination)
        .map(|edge| (edge.source.uid(), edge.destination.uid()))
        .filter(|(x, y)| is_legal_move(current, used, *x, *y))
        .collect_vec()
}

/// Pick an automatic response: an edge present in `graph` that neither history holds.
///
/// Samples random vertex pairs up to `budget` times first. If sampling comes up empty the open edges are enumerated
/// instead, so [`None`] always means no legal move is left.
pub fn choose_automatic_move(
    graph: &AdjacencyList<Node>,
    current: &MoveHistory,
    used: &MoveHistory,
    budget: usize,
    rng: &mut impl Rng,
) -> Option<(Uid, Uid)> {
    let vertices = graph.vertices().collect_vec();

    if vertices.len() >= 2 {
        for attempt in 0..budget {
            let x = vertices[rng.random_range(0..vertices.len())];
            let y = vertices[rng.random_range(0..vertices.len())];
            if x == y {
                continue;
            }

            if graph.contains_edge(Edge::new(x, y)) && is_legal_move(current, used, x.uid(), y.uid()) {
                trace!(attempt, x = x.uid(), y = y.uid(), "sampled automatic move");
                return Some((x.uid(), y.uid()));
            }
        }
    }

    let choice = legal_moves(graph, current, used).choose(rng).copied();
    debug!(?choice, budget, "sampling exhausted, fell back to open edges");
    choice
}

/// Whether `side` owns both other edges of some triangle through the edge `(x, y)`.
pub fn completes_triangle(graph: &AdjacencyList<Node>, side: Side, x: Uid, y: Uid) -> bool {
    let owned = |a: Uid, b: Uid| {
        graph.mark(Edge::new(Vertex::from(a), Vertex::from(b)))
            .is_some_and(|mark| mark.claimed_by == Some(side))
    };

    graph.neighbours(x)
        .into_iter()
        .filter(|z| *z != x && *z != y)
        .any(|z| owned(x, z) && owned(y, z))
}
