use itertools::Itertools;

use crate::graph::{AdjacencyList, Edge};
use crate::node::{Node, Position};

type Point = (f32, f32);

/// A straight segment projected onto the `(x, y)` plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub fn new(a: impl Into<Position>, b: impl Into<Position>) -> Self {
        Self { a: a.into().xy(), b: b.into().xy() }
    }

    fn touches(&self, other: &Segment) -> bool {
        [self.a, self.b].iter().any(|p| *p == other.a || *p == other.b)
    }

    /// Whether the two segments cross strictly inside both of them.
    ///
    /// Meeting at an endpoint never counts. Parallel segments never count either, including collinear ones that overlap.
    pub fn crosses(&self, other: &Segment) -> bool {
        if self.touches(other) {
            return false;
        }

        let ((ax, ay), (bx, by)) = (self.a, self.b);
        let ((cx, cy), (dx, dy)) = (other.a, other.b);

        let d = (bx - ax) * (dy - cy) - (by - ay) * (dx - cx);
        if d == 0.0 {
            return false;
        }

        // a + u(b - a) == c + v(d - c)
        let u = ((cx - ax) * (dy - cy) - (cy - ay) * (dx - cx)) / d;
        let v = ((cx - ax) * (by - ay) - (cy - ay) * (bx - ax)) / d;

        0.0 < u && u < 1.0 && 0.0 < v && v < 1.0
    }
}

/// Whether two edges of `graph` cross in the plane. Edges sharing a vertex never do.
pub fn edges_intersect(graph: &AdjacencyList<Node>, e1: Edge, e2: Edge) -> bool {
    if e1.shares_endpoint_with(&e2) {
        return false;
    }

    segment_of(graph, e1).crosses(&segment_of(graph, e2))
}

/// Every pair of distinct connections that cross, each reported once.
pub fn crossings(graph: &AdjacencyList<Node>) -> Vec<(Edge, Edge)> {
    graph.undirected_edges()
        .into_iter()
        .tuple_combinations()
        .filter(|(e1, e2)| edges_intersect(graph, *e1, *e2))
        .collect_vec()
}

/// Edges that cross at least one other edge, for highlighting.
pub fn crossing_edges(graph: &AdjacencyList<Node>) -> Vec<Edge> {
    crossings(graph)
        .into_iter()
        .flat_map(|(e1, e2)| [e1, e2])
        .unique_by(Edge::undirected)
        .collect_vec()
}

fn segment_of(graph: &AdjacencyList<Node>, edge: Edge) -> Segment {
    Segment::new(graph.position_of(edge.source), graph.position_of(edge.destination))
}
