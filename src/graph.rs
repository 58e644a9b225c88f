use std::collections::HashMap;

use itertools::Itertools;
use petgraph::graphmap::DiGraphMap;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::node::{Color, Node, Position, Uid};
use crate::sim::Side;

/// Constraint on payloads stored in an [`AdjacencyList`]: each one names the vertex it belongs to.
pub trait Payload {
    /// Stable identity of this payload. Two payloads with the same uid are the same vertex.
    fn uid(&self) -> Uid;
}

/// Handle to a vertex. Identity is the uid of the payload the vertex was created from.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Vertex(Uid);

impl Vertex {
    #[inline]
    pub fn uid(&self) -> Uid {
        self.0
    }
}

impl From<Uid> for Vertex {
    fn from(value: Uid) -> Self {
        Self(value)
    }
}

/// A directed edge. `(a, b)` and `(b, a)` are distinct edges; undirected adjacency stores both.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    pub source: Vertex,
    pub destination: Vertex,
}

impl Edge {
    pub fn new(source: Vertex, destination: Vertex) -> Self {
        Self { source, destination }
    }

    /// The same edge traversed the other way.
    pub fn reversed(&self) -> Self {
        Self::new(self.destination, self.source)
    }

    /// Both endpoints without orientation, used to collapse `(a, b)` and `(b, a)` into one key.
    pub fn undirected(&self) -> UnorderedPair<Vertex> {
        UnorderedPair(self.source, self.destination)
    }

    pub fn shares_endpoint_with(&self, other: &Edge) -> bool {
        self.source == other.source || self.source == other.destination
            || self.destination == other.source || self.destination == other.destination
    }
}

/// How [`AdjacencyList::add_edge`] should connect two vertices.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EdgeKind {
    /// One edge, `from -> to`.
    Directed,
    /// Two edges, `from -> to` and `to -> from`.
    Undirected,
}

/// Mutable per-edge state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EdgeMark {
    /// Which Sim side has claimed this edge, if any.
    pub claimed_by: Option<Side>,
}

/// Failures of structural graph operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum GraphError {
    /// An endpoint was never created with [`AdjacencyList::create_vertex`].
    #[error("no vertex with uid {0}")]
    UnknownVertex(Uid),
}

/// Adjacency-list graph over vertices carrying a payload of type `P`.
///
/// Vertices are only ever added; a level discards the whole graph on teardown.
/// Neighbour lists iterate in insertion order, so every scan over the graph is deterministic.
#[derive(Clone, Debug)]
pub struct AdjacencyList<P> {
    graph: DiGraphMap<Vertex, EdgeMark>,
    payloads: HashMap<Vertex, P>,
}

impl<P> Default for AdjacencyList<P> {
    fn default() -> Self {
        Self {
            graph: DiGraphMap::new(),
            payloads: HashMap::new(),
        }
    }
}

impl<P: Payload> AdjacencyList<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraphMap::with_capacity(nodes, edges),
            payloads: HashMap::with_capacity(nodes),
        }
    }

    /// Insert a vertex for `payload` with an empty edge list and return its handle.
    ///
    /// Idempotent on identity: if a vertex with the same uid exists, `payload` is dropped and the existing vertex is returned untouched.
    pub fn create_vertex(&mut self, payload: P) -> Vertex {
        let vertex = Vertex(payload.uid());
        if !self.graph.contains_node(vertex) {
            self.graph.add_node(vertex);
            self.payloads.insert(vertex, payload);
        }

        vertex
    }

    /// Connect `from` and `to`. Re-adding an edge that is already present leaves the graph unchanged.
    ///
    /// Both endpoints must already exist; otherwise nothing is added and the missing one is reported.
    pub fn add_edge(&mut self, kind: EdgeKind, from: Vertex, to: Vertex) -> Result<(), GraphError> {
        // graphmap silently creates unknown endpoints, so check first
        for endpoint in [from, to] {
            if !self.graph.contains_node(endpoint) {
                return Err(GraphError::UnknownVertex(endpoint.uid()));
            }
        }

        if !self.graph.contains_edge(from, to) {
            self.graph.add_edge(from, to, EdgeMark::default());
        }
        if kind == EdgeKind::Undirected && !self.graph.contains_edge(to, from) {
            self.graph.add_edge(to, from, EdgeMark::default());
        }

        Ok(())
    }

    /// Outgoing edges of `vertex`, or [`None`] if the vertex is unknown.
    pub fn edges_from(&self, vertex: Vertex) -> Option<Vec<Edge>> {
        if !self.graph.contains_node(vertex) {
            return None;
        }

        Some(self.graph.edges(vertex)
            .map(|(source, destination, _)| Edge::new(source, destination))
            .collect_vec())
    }

    /// Uids of the destinations of every outgoing edge of the vertex with `uid`. Empty if there is no such vertex.
    pub fn neighbours(&self, uid: Uid) -> Vec<Uid> {
        let vertex = Vertex(uid);
        if !self.graph.contains_node(vertex) {
            return Vec::new();
        }

        self.graph.neighbors(vertex).map(|n| n.uid()).collect_vec()
    }

    pub fn contains(&self, uid: Uid) -> bool {
        self.graph.contains_node(Vertex(uid))
    }

    pub fn contains_edge(&self, edge: Edge) -> bool {
        self.graph.contains_edge(edge.source, edge.destination)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges; an undirected connection counts twice.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Every vertex, in creation order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.graph.nodes()
    }

    /// Every directed edge. An undirected connection appears once per direction.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.all_edges().map(|(source, destination, _)| Edge::new(source, destination))
    }

    /// Every connection once, regardless of how many directions it is stored in.
    pub fn undirected_edges(&self) -> Vec<Edge> {
        self.edges().unique_by(Edge::undirected).collect_vec()
    }

    pub fn payload(&self, vertex: Vertex) -> Option<&P> {
        self.payloads.get(&vertex)
    }

    pub(crate) fn payload_mut(&mut self, vertex: Vertex) -> Option<&mut P> {
        self.payloads.get_mut(&vertex)
    }

    pub fn mark(&self, edge: Edge) -> Option<&EdgeMark> {
        self.graph.edge_weight(edge.source, edge.destination)
    }

    /// Apply `f` to the mark of `edge` and of its reverse, where either is stored. Returns whether any mark was touched.
    pub(crate) fn mark_both_ways(&mut self, edge: Edge, f: impl Fn(&mut EdgeMark)) -> bool {
        let mut touched = false;
        for directed in [edge, edge.reversed()] {
            if let Some(mark) = self.graph.edge_weight_mut(directed.source, directed.destination) {
                f(mark);
                touched = true;
            }
        }

        touched
    }
}

impl AdjacencyList<Node> {
    /// The node with `uid`, if any.
    pub fn node(&self, uid: Uid) -> Option<&Node> {
        self.payload(Vertex(uid))
    }

    /// Paint the vertex with `uid`. Returns whether a vertex was found; unknown uids change nothing.
    pub fn set_color(&mut self, uid: Uid, color: Color) -> bool {
        match self.payload_mut(Vertex(uid)) {
            Some(node) => {
                node.color = color;
                true
            }
            None => false,
        }
    }

    /// Move the vertex with `uid`. Returns whether a vertex was found; unknown uids change nothing.
    pub fn set_position(&mut self, uid: Uid, position: Position) -> bool {
        match self.payload_mut(Vertex(uid)) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Mirror partner of the vertex with `uid`; [`None`] if it has none or does not exist.
    pub fn mirror_uid(&self, uid: Uid) -> Option<Uid> {
        self.node(uid).and_then(|node| node.mirror)
    }

    #[inline]
    pub(crate) fn color_of(&self, vertex: Vertex) -> Color {
        self.payload(vertex).map(|node| node.color).unwrap_or_default()
    }

    #[inline]
    pub(crate) fn position_of(&self, vertex: Vertex) -> Position {
        self.payload(vertex).map(|node| node.position).unwrap_or_default()
    }
}
