//! Maximum flow of bunnies from entrance rooms to escape pods.
//!
//! Rooms are nodes of a dense capacity matrix. Several entrances or exits
//! are folded into one synthetic source and sink, then augmenting paths are
//! pushed until none is left.
//!
//! ```
//! let path = [
//!     [0i64, 0, 4, 6, 0, 0],
//!     [0, 0, 5, 2, 0, 0],
//!     [0, 0, 0, 0, 4, 4],
//!     [0, 0, 0, 0, 6, 6],
//!     [0, 0, 0, 0, 0, 0],
//!     [0, 0, 0, 0, 0, 0],
//! ];
//! assert_eq!(escape_pods::solution(&[0, 1], &[4, 5], &path).unwrap(), 16);
//! ```

pub mod augmenting_path;
pub mod error;
pub mod flow_graph;
pub mod solver;
pub mod transform;
mod utils;

#[cfg(feature = "python")]
mod python;

pub use augmenting_path::SearchPolicy;
pub use error::{RangeError, ShapeError, SolveError, Terminal};
pub use flow_graph::{FlowGraph, UNBOUNDED};
pub use solver::{FlowSolution, SolverOptions};

/// How many bunnies can reach the escape pods at once.
///
/// `path[u][v]` is the capacity of the corridor from room `u` to room `v`.
/// Uses the greedy search with no augmentation bound.
pub fn solution<R: AsRef<[i64]>>(
    entrances: &[usize],
    exits: &[usize],
    path: &[R],
) -> Result<i64, SolveError> {
    let graph = FlowGraph::new(entrances, exits, path)?;
    Ok(graph.solve()?.value())
}
