use tracing::trace;

use crate::graph::AdjacencyList;
use crate::level::MoveError;
use crate::node::{Color, Node, Uid};

/// The vertices a Hamiltonian walk has stepped on, in order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Walk {
    steps: Vec<Uid>,
}

impl Walk {
    pub fn steps(&self) -> &[Uid] {
        &self.steps
    }

    pub fn start(&self) -> Option<Uid> {
        self.steps.first().copied()
    }

    pub fn last(&self) -> Option<Uid> {
        self.steps.last().copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step onto `uid` and paint it `color`.
    ///
    /// The first step may land anywhere. Every later one must follow an edge out of the last step onto a vertex not yet walked.
    pub(crate) fn step(&mut self, graph: &mut AdjacencyList<Node>, uid: Uid, color: Color) -> Result<(), MoveError> {
        if !graph.contains(uid) {
            return Err(MoveError::UnknownVertex(uid));
        }
        if self.steps.contains(&uid) {
            return Err(MoveError::AlreadyVisited(uid));
        }
        if let Some(last) = self.last() {
            if !graph.neighbours(last).contains(&uid) {
                return Err(MoveError::NotAdjacent { from: last, to: uid });
            }
        }

        graph.set_color(uid, color);
        self.steps.push(uid);
        trace!(uid, len = self.steps.len(), "walk advanced");

        Ok(())
    }

    /// Take back the last step, returning its vertex to the unset color.
    pub(crate) fn undo(&mut self, graph: &mut AdjacencyList<Node>) -> Option<Uid> {
        let uid = self.steps.pop()?;
        graph.set_color(uid, Color::default());

        Some(uid)
    }

    pub(crate) fn clear(&mut self, graph: &mut AdjacencyList<Node>) {
        while self.undo(graph).is_some() {}
    }

    /// Whether the walk can close: its last step has an edge back to the start, or to the start's mirror partner.
    pub fn closes(&self, graph: &AdjacencyList<Node>) -> bool {
        let (Some(start), Some(last)) = (self.start(), self.last()) else {
            return false;
        };
        if self.steps.len() < 2 {
            return false;
        }

        let exits = graph.neighbours(last);
        exits.contains(&start) || graph.mirror_uid(start).is_some_and(|mirror| exits.contains(&mirror))
    }
}
