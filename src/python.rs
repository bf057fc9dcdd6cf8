use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::{FlowGraph, SearchPolicy, SolveError, SolverOptions};

impl From<SolveError> for PyErr {
    fn from(err: SolveError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn policy(shortest_path: bool) -> SearchPolicy {
    if shortest_path {
        SearchPolicy::ShortestPath
    } else {
        SearchPolicy::Greedy
    }
}

#[pyclass]
pub struct EscapePods {
    graph: FlowGraph,
}

#[pymethods]
impl EscapePods {
    #[new]
    fn new(entrances: Vec<usize>, exits: Vec<usize>, path: Vec<Vec<i64>>) -> PyResult<Self> {
        Ok(EscapePods {
            graph: FlowGraph::new(&entrances, &exits, &path)?,
        })
    }

    #[pyo3(signature = (shortest_path=false))]
    fn max_flow(&self, shortest_path: bool) -> PyResult<i64> {
        let options = SolverOptions::default().with_policy(policy(shortest_path));
        Ok(self.graph.solve_with(&options)?.value())
    }

    /// Source-side rooms and the corridors crossing the cut.
    #[pyo3(signature = (shortest_path=true))]
    fn min_cut(&self, shortest_path: bool) -> PyResult<(Vec<usize>, Vec<((usize, usize), i64)>)> {
        let options = SolverOptions::default().with_policy(policy(shortest_path));
        let solution = self.graph.solve_with(&options)?;
        Ok((solution.source_side(), solution.cut_edges()))
    }
}

#[pyfunction]
fn solution(entrances: Vec<usize>, exits: Vec<usize>, path: Vec<Vec<i64>>) -> PyResult<i64> {
    Ok(crate::solution(&entrances, &exits, &path)?)
}

#[pymodule]
fn escape_pods(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init(); // send Rust logs to Python logger
    m.add_class::<EscapePods>()?;
    m.add_function(wrap_pyfunction!(solution, m)?)?;
    Ok(())
}
