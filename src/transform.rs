//! Reduction of a multi-entrance, multi-exit network to a single source
//! and a single sink.

use log::debug;
use pathfinding::matrix::Matrix;

use crate::flow_graph::{FlowGraph, UNBOUNDED};

/// The single-source network actually handed to the solver loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transformed {
    pub source: usize,
    pub sink: usize,
    pub capacity: Matrix<i64>,
    /// Whether a synthetic source and sink were added, shifting every room
    /// index by one.
    pub extended: bool,
}

impl Transformed {
    /// Index in the solved network of caller room `room`.
    pub fn to_solved(&self, room: usize) -> usize {
        if self.extended {
            room + 1
        } else {
            room
        }
    }

    /// Caller room for a node of the solved network, or `None` for the
    /// synthetic source and sink.
    pub fn to_room(&self, node: usize) -> Option<usize> {
        if !self.extended {
            return Some(node);
        }
        if node == self.source || node == self.sink {
            None
        } else {
            Some(node - 1)
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.capacity.rows
    }
}

/// Build the single-source, single-sink network for `graph`.
///
/// With one entrance and one exit the capacities are copied unchanged.
/// Otherwise node 0 becomes a synthetic source feeding every entrance and
/// node `N + 1` a synthetic sink drained by every exit, both through
/// [`UNBOUNDED`] edges. The caller's graph is never modified.
pub fn to_single_source(graph: &FlowGraph) -> Transformed {
    if graph.is_single_terminal() {
        debug!("Single entrance and exit, network used as is");
        return Transformed {
            source: graph.entrances()[0],
            sink: graph.exits()[0],
            capacity: graph.capacities().clone(),
            extended: false,
        };
    }

    let rooms = graph.num_rooms();
    let source = 0;
    let sink = rooms + 1;
    let mut capacity = Matrix::new_square(rooms + 2, 0i64);
    for from in 0..rooms {
        for to in 0..rooms {
            capacity[(from + 1, to + 1)] = graph.capacity(from, to);
        }
    }
    for &entrance in graph.entrances() {
        capacity[(source, entrance + 1)] = UNBOUNDED;
    }
    for &exit in graph.exits() {
        capacity[(exit + 1, sink)] = UNBOUNDED;
    }

    debug!(
        "Added synthetic source 0 for {} entrances and synthetic sink {} for {} exits",
        graph.entrances().len(),
        sink,
        graph.exits().len()
    );

    Transformed {
        source,
        sink,
        capacity,
        extended: true,
    }
}
