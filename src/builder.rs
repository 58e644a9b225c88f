use std::collections::HashMap;

use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::graph::{AdjacencyList, EdgeKind, Vertex};
use crate::level::Level;
use crate::node::{Node, Uid};
use crate::rules::PuzzleType;
use crate::sim::MoveHistory;
use crate::walk::Walk;

/// Reasons a builder may refuse to produce a [`Level`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// Two nodes were added with the same uid.
    #[error("uid {0} is used by more than one node")]
    DuplicateUid(Uid),
    /// A connection names a uid no node was added with.
    #[error("edge {from} -> {to} has an endpoint that is not a node")]
    DanglingEdge { from: Uid, to: Uid },
    /// A vertex was connected to itself.
    #[error("uid {0} is connected to itself")]
    SelfLoop(Uid),
    /// A node's mirror partner was never added.
    #[error("uid {uid} mirrors {mirror}, which is not a node")]
    MissingMirror { uid: Uid, mirror: Uid },
    /// A node's mirror partner does not mirror it back.
    #[error("uid {uid} mirrors {mirror}, but {mirror} does not mirror {uid}")]
    AsymmetricMirror { uid: Uid, mirror: Uid },
}

/// Assembles a [`Level`] from loaded level data.
///
/// Nodes and connections may be added in any order. Nothing is checked against the rest of the level until [`Self::build`],
/// which reports every problem found rather than stopping at the first.
///
/// ```
/// use nodal::{LevelBuilder, Node, PuzzleType};
///
/// let level = LevelBuilder::new(PuzzleType::KColor)
///     .add_node(Node::new(1, (0.0, 0.0)))
///     .add_node(Node::new(2, (1.0, 0.0)))
///     .connect(1, 2)
///     .build()
///     .unwrap();
///
/// assert_eq!(level.neighbours(1), vec![2]);
/// ```
#[derive(Clone, Debug)]
pub struct LevelBuilder {
    puzzle: PuzzleType,
    config: Config,
    nodes: Vec<Node>,
    connections: Vec<(Uid, Uid)>,
    used: MoveHistory,
}

impl LevelBuilder {
    pub fn new(puzzle: PuzzleType) -> Self {
        Self {
            puzzle,
            config: Config::default(),
            nodes: Default::default(),
            connections: Default::default(),
            used: Default::default(),
        }
    }

    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    pub fn add_node(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) -> &mut Self {
        self.nodes.extend(nodes);
        self
    }

    /// Connect two nodes in both directions.
    pub fn connect(&mut self, a: Uid, b: Uid) -> &mut Self {
        self.connections.push((a, b));
        self
    }

    /// Shorthand for multiple calls to [`Self::connect`].
    pub fn connect_all(&mut self, pairs: impl IntoIterator<Item = (Uid, Uid)>) -> &mut Self {
        self.connections.extend(pairs);
        self
    }

    /// Seed a Sim level with edges already claimed in earlier games.
    pub fn used_moves(&mut self, used: MoveHistory) -> &mut Self {
        self.used = used;
        self
    }

    /// Every problem with the data added so far. Empty if the builder would succeed.
    pub fn problems(&self) -> Vec<BuilderInvalidReason> {
        let mut reasons = Vec::new();

        let by_uid: HashMap<Uid, &Node> = self.nodes.iter().map(|node| (node.uid, node)).collect();

        reasons.extend(self.nodes.iter()
            .map(|node| node.uid)
            .duplicates()
            .map(BuilderInvalidReason::DuplicateUid));

        for &(from, to) in &self.connections {
            if from == to {
                reasons.push(BuilderInvalidReason::SelfLoop(from));
            } else if !by_uid.contains_key(&from) || !by_uid.contains_key(&to) {
                reasons.push(BuilderInvalidReason::DanglingEdge { from, to });
            }
        }

        for node in &self.nodes {
            let Some(mirror) = node.mirror else { continue };
            match by_uid.get(&mirror) {
                None => reasons.push(BuilderInvalidReason::MissingMirror { uid: node.uid, mirror }),
                Some(partner) if partner.mirror != Some(node.uid) => {
                    reasons.push(BuilderInvalidReason::AsymmetricMirror { uid: node.uid, mirror })
                }
                Some(_) => {}
            }
        }

        reasons
    }

    /// Convert the state of this builder into a [`Level`].
    /// If the data is inconsistent, every [`BuilderInvalidReason`] found is returned instead.
    pub fn build(&self) -> Result<Level, Vec<BuilderInvalidReason>> {
        let reasons = self.problems();
        if !reasons.is_empty() {
            warn!(count = reasons.len(), puzzle = %self.puzzle, "level data rejected");
            return Err(reasons);
        }

        let mut graph = AdjacencyList::with_capacity(self.nodes.len(), self.connections.len() * 2);
        for node in &self.nodes {
            graph.create_vertex(*node);
        }
        for &(from, to) in &self.connections {
            graph.add_edge(EdgeKind::Undirected, Vertex::from(from), Vertex::from(to))
                .map_err(|_| vec![BuilderInvalidReason::DanglingEdge { from, to }])?;
        }

        debug!(
            puzzle = %self.puzzle,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "level built"
        );

        Ok(Level {
            graph,
            puzzle: self.puzzle,
            config: self.config.clone(),
            current: MoveHistory::new(),
            used: self.used.clone(),
            walk: Walk::default(),
        })
    }
}
