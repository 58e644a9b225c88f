use std::collections::HashMap;
use std::convert::identity;

use itertools::Itertools;
use thiserror::Error;
use tracing::debug;
use varisat::{CnfFormula, Solver, Var};

use crate::graph::{AdjacencyList, Vertex};
use crate::logic::exactly_one;
use crate::node::{Color, Node, Uid};

/// Reasons [`solve`] may fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SolverFailure {
    /// The SAT solver proved no proper coloring with the given palette exists.
    #[error("no proper coloring exists with this palette")]
    Inconsistent,
    /// The SAT solver reported a model with no color for at least one vertex.
    /// This should probably never happen.
    #[error("solver model left a vertex uncolored")]
    NoColorFound,
}

struct Encoding<'a> {
    vertices: HashMap<Vertex, usize>,
    palette: &'a [Color],
}

impl Encoding<'_> {
    #[inline]
    fn var(&self, vertex: Vertex, color_index: usize) -> Var {
        Var::from_index(self.vertices[&vertex] * self.palette.len() + color_index)
    }
}

/// Find a proper coloring of `graph` using only colors from `palette`: every connection joins two differently colored vertices.
///
/// Current vertex colors are ignored, and so are the unset color and repeats in `palette`.
/// Returns the color for every uid, or [`SolverFailure::Inconsistent`] when the palette is too small.
///
/// # Logical setup
/// For every vertex V and palette entry C there is one variable, true iff V has color C.
/// Every vertex has exactly one color.
/// For every edge (U, V) and every color C, at least one of U and V does not have C; (!U_C + !V_C).
pub fn solve(graph: &AdjacencyList<Node>, palette: &[Color]) -> Result<HashMap<Uid, Color>, SolverFailure> {
    // an unset or repeated entry would yield a coloring the kColor rule rejects
    let palette = palette.iter().copied().filter(|color| !color.is_unset()).unique().collect_vec();
    let palette = palette.as_slice();
    let encoding = Encoding {
        vertices: graph.vertices().enumerate().map(|(index, vertex)| (vertex, index)).collect(),
        palette,
    };

    let mut formulae: Vec<CnfFormula> = Vec::with_capacity(graph.vertex_count() + graph.edge_count());

    for vertex in graph.vertices() {
        formulae.push(CnfFormula::from(exactly_one(
            &(0..palette.len()).map(|c| encoding.var(vertex, c).positive()).collect_vec()
        )));
    }

    for edge in graph.undirected_edges() {
        formulae.push(CnfFormula::from((0..palette.len())
            .map(|c| vec![encoding.var(edge.source, c).negative(), encoding.var(edge.destination, c).negative()])
            .collect_vec()));
    }

    let mut solver = Solver::new();
    formulae.iter().for_each(|formula| solver.add_formula(formula));
    if !solver.solve().is_ok_and(identity) {
        debug!(vertices = graph.vertex_count(), colors = palette.len(), "coloring is inconsistent");
        return Err(SolverFailure::Inconsistent);
    }

    let model = solver.model().ok_or(SolverFailure::NoColorFound)?;
    let truths = model.into_iter()
        .filter(|lit| lit.is_positive())
        .map(|lit| lit.var())
        .collect::<std::collections::HashSet<Var>>();

    let mut coloring = HashMap::with_capacity(graph.vertex_count());
    for vertex in graph.vertices() {
        let color = (0..palette.len())
            .find(|c| truths.contains(&encoding.var(vertex, *c)))
            .map(|c| palette[c])
            .ok_or(SolverFailure::NoColorFound)?;
        coloring.insert(vertex.uid(), color);
    }

    Ok(coloring)
}

/// Whether `graph` admits any proper coloring from `palette`.
pub fn is_colorable(graph: &AdjacencyList<Node>, palette: &[Color]) -> bool {
    solve(graph, palette).is_ok()
}
