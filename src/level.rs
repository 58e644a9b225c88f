use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::coloring::{self, SolverFailure};
use crate::config::Config;
use crate::graph::{AdjacencyList, Edge, EdgeMark, Vertex};
use crate::node::{Color, Node, Position, Uid};
use crate::rules::{self, PuzzleType, Verdict};
use crate::sim::{self, ClaimOutcome, MoveHistory, Side};
use crate::walk::Walk;

/// Reasons a move may be refused.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum MoveError {
    #[error("no vertex with uid {0}")]
    UnknownVertex(Uid),
    /// Sim: the two vertices are not connected.
    #[error("no edge between {0} and {1}")]
    NoSuchEdge(Uid, Uid),
    /// Sim: the edge is in this game's history or in the used set.
    #[error("edge between {0} and {1} is already claimed")]
    AlreadyClaimed(Uid, Uid),
    /// Hamiltonian: the walk cannot jump to a vertex that is not a neighbour of its last step.
    #[error("{to} is not a neighbour of {from}")]
    NotAdjacent { from: Uid, to: Uid },
    /// Hamiltonian: the walk already passed through this vertex.
    #[error("{0} has already been visited")]
    AlreadyVisited(Uid),
    /// The move belongs to a different kind of puzzle.
    #[error("move is not allowed in a {0} level")]
    WrongPuzzle(PuzzleType),
}

/// One playable level: the graph, its rule, and the in-progress state of a walk or Sim game.
///
/// [`Level`]s should be built using a [`LevelBuilder`](crate::builder::LevelBuilder).
/// A level is owned by a single caller; nothing in it is synchronized.
#[derive(Clone, Debug)]
pub struct Level {
    pub(crate) graph: AdjacencyList<Node>,
    pub(crate) puzzle: PuzzleType,
    pub(crate) config: Config,
    // this game's claims, then claims carried in from earlier games
    pub(crate) current: MoveHistory,
    pub(crate) used: MoveHistory,
    pub(crate) walk: Walk,
}

impl Level {
    pub fn puzzle(&self) -> PuzzleType {
        self.puzzle
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn graph(&self) -> &AdjacencyList<Node> {
        &self.graph
    }

    pub fn node(&self, uid: Uid) -> Option<&Node> {
        self.graph.node(uid)
    }

    /// Every node, in the order the loader added them.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.vertices().filter_map(|vertex| self.graph.payload(vertex))
    }

    pub fn edges_from(&self, uid: Uid) -> Option<Vec<Edge>> {
        self.graph.edges_from(Vertex::from(uid))
    }

    pub fn neighbours(&self, uid: Uid) -> Vec<Uid> {
        self.graph.neighbours(uid)
    }

    pub fn mirror_uid(&self, uid: Uid) -> Option<Uid> {
        self.graph.mirror_uid(uid)
    }

    /// Paint one vertex. Returns `false` and changes nothing if `uid` is unknown.
    pub fn set_color(&mut self, uid: Uid, color: Color) -> bool {
        self.graph.set_color(uid, color)
    }

    /// Paint a vertex and its mirror partner, if it has one.
    pub fn set_color_mirrored(&mut self, uid: Uid, color: Color) -> bool {
        let found = self.graph.set_color(uid, color);
        if let Some(mirror) = self.graph.mirror_uid(uid) {
            self.graph.set_color(mirror, color);
        }

        found
    }

    /// Move one vertex. Returns `false` and changes nothing if `uid` is unknown.
    pub fn set_position(&mut self, uid: Uid, position: impl Into<Position>) -> bool {
        self.graph.set_position(uid, position.into())
    }

    /// Evaluate the graph under this level's rule, with annotations for the UI.
    pub fn verdict(&self) -> Verdict {
        rules::check(&self.graph, self.puzzle, &self.config)
    }

    pub fn check_solved(&self) -> bool {
        self.verdict().solved
    }

    /// A proper coloring of this level's graph from the configured palette, ignoring current paint.
    pub fn coloring_hint(&self) -> Result<HashMap<Uid, Color>, SolverFailure> {
        coloring::solve(&self.graph, &self.config.palette)
    }

    /// Whether the graph can be colored at all with the configured palette.
    pub fn is_colorable(&self) -> bool {
        coloring::is_colorable(&self.graph, &self.config.palette)
    }

    /// Begin a Sim game: forget this game's moves and all claims, unpaint every claimed endpoint,
    /// then treat every edge in `used` as taken.
    pub fn start_sim(&mut self, used: MoveHistory) {
        let claimed = self.graph.edges()
            .filter(|edge| self.graph.mark(*edge).is_some_and(|mark| mark.claimed_by.is_some()))
            .collect_vec();
        for edge in claimed {
            self.graph.mark_both_ways(edge, |mark| *mark = EdgeMark::default());
            for endpoint in [edge.source, edge.destination] {
                self.graph.set_color(endpoint.uid(), Color::default());
            }
        }

        debug!(used = used.len(), "sim game started");
        self.current.clear();
        self.used = used;
    }

    /// Moves made in this game.
    pub fn history(&self) -> &MoveHistory {
        &self.current
    }

    /// Moves carried in from earlier games.
    pub fn used(&self) -> &MoveHistory {
        &self.used
    }

    pub fn is_legal_move(&self, x: Uid, y: Uid) -> bool {
        sim::is_legal_move(&self.current, &self.used, x, y)
    }

    /// Every connection still open for claiming.
    pub fn legal_moves(&self) -> Vec<(Uid, Uid)> {
        sim::legal_moves(&self.graph, &self.current, &self.used)
    }

    /// Whether the Sim game has run out of legal moves.
    pub fn sim_over(&self) -> bool {
        self.legal_moves().is_empty()
    }

    /// Claim the edge `(x, y)` for `side`: mark the edge, paint both endpoints, and record the move.
    pub fn claim(&mut self, side: Side, x: Uid, y: Uid) -> Result<ClaimOutcome, MoveError> {
        if self.puzzle != PuzzleType::Sim {
            return Err(MoveError::WrongPuzzle(self.puzzle));
        }
        for uid in [x, y] {
            if !self.graph.contains(uid) {
                return Err(MoveError::UnknownVertex(uid));
            }
        }

        let edge = Edge::new(Vertex::from(x), Vertex::from(y));
        if x == y || !self.graph.contains_edge(edge) {
            return Err(MoveError::NoSuchEdge(x, y));
        }
        if !self.is_legal_move(x, y) {
            return Err(MoveError::AlreadyClaimed(x, y));
        }

        let outcome = match sim::completes_triangle(&self.graph, side, x, y) {
            true => ClaimOutcome::Triangle,
            false => ClaimOutcome::Open,
        };

        self.graph.mark_both_ways(edge, |mark| mark.claimed_by = Some(side));
        let color = self.config.side_color(side);
        self.graph.set_color(x, color);
        self.graph.set_color(y, color);
        self.current.push(x, y);

        debug!(%side, x, y, ?outcome, "edge claimed");
        Ok(outcome)
    }

    /// Pick an open edge for the automatic opponent without claiming it. [`None`] means no legal move is left.
    pub fn choose_automatic_move(&self, rng: &mut impl Rng) -> Option<(Uid, Uid)> {
        sim::choose_automatic_move(&self.graph, &self.current, &self.used, self.config.retry_budget, rng)
    }

    /// Let the automatic opponent answer: choose an open edge and claim it.
    #[instrument(level = "debug", skip(self, rng), fields(moves = self.current.len()))]
    pub fn respond(&mut self, rng: &mut impl Rng) -> Result<Option<((Uid, Uid), ClaimOutcome)>, MoveError> {
        let Some((x, y)) = self.choose_automatic_move(rng) else {
            debug!("no legal move left");
            return Ok(None);
        };

        let outcome = self.claim(Side::Opponent, x, y)?;
        Ok(Some(((x, y), outcome)))
    }

    /// Extend the Hamiltonian walk onto `uid`, painting it with the walk color.
    pub fn step(&mut self, uid: Uid) -> Result<(), MoveError> {
        if self.puzzle != PuzzleType::Hamiltonian {
            return Err(MoveError::WrongPuzzle(self.puzzle));
        }

        self.walk.step(&mut self.graph, uid, self.config.walk_color)
    }

    /// Take back the last step of the walk.
    pub fn undo_step(&mut self) -> Option<Uid> {
        self.walk.undo(&mut self.graph)
    }

    /// Abandon the walk, unpainting every vertex on it.
    pub fn reset_walk(&mut self) {
        self.walk.clear(&mut self.graph)
    }

    pub fn walk(&self) -> &Walk {
        &self.walk
    }

    pub fn walk_closes(&self) -> bool {
        self.walk.closes(&self.graph)
    }

    /// Whether the level is won outright.
    ///
    /// For Hamiltonian levels this also requires the walk to close back on its start; other rules defer to [`Self::check_solved`].
    pub fn is_complete(&self) -> bool {
        match self.puzzle {
            PuzzleType::Hamiltonian => self.check_solved() && self.walk_closes(),
            _ => self.check_solved(),
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} level", self.puzzle)?;
        for node in self.nodes() {
            write!(f, "{} {} {}", node.uid, node.color, node.position)?;
            if let Some(mirror) = node.mirror {
                write!(f, " ~{}", mirror)?;
            }
            writeln!(f, " -> [{}]", self.neighbours(node.uid).iter().join(", "))?;
        }

        Ok(())
    }
}
