use std::time::Instant;

use log::{debug, info, Level};
use pathfinding::directed::bfs::bfs_reach;
use pathfinding::directed::edmonds_karp::Edge;
use pathfinding::matrix::Matrix;

use crate::augmenting_path::{find_path, residual, residual_successors, SearchPolicy};
use crate::error::SolveError;
use crate::flow_graph::FlowGraph;
use crate::transform::{to_single_source, Transformed};
use crate::utils;

/// Knobs for a single solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverOptions {
    pub policy: SearchPolicy,
    /// Give up with [`SolveError::AugmentationLimit`] if the flow still has
    /// an augmenting path after this many augmentations.
    pub max_augmentations: Option<usize>,
}

impl SolverOptions {
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_augmentations(mut self, limit: usize) -> Self {
        self.max_augmentations = Some(limit);
        self
    }
}

/// Result of a solve: the flow value plus the flow itself.
///
/// The flow matrix is indexed like the solved network, which has a
/// synthetic source and sink when the caller gave several entrances or
/// exits. Methods taking rooms use the caller's indices.
#[derive(Clone, Debug)]
pub struct FlowSolution {
    network: Transformed,
    flow: Matrix<i64>,
    value: i64,
    augmentations: usize,
}

impl FlowSolution {
    /// Total flow from the entrances to the escape pods.
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    pub fn network(&self) -> &Transformed {
        &self.network
    }

    pub fn flows(&self) -> &Matrix<i64> {
        &self.flow
    }

    /// Net flow along the corridor `from -> to` between two caller rooms.
    pub fn flow(&self, from: usize, to: usize) -> i64 {
        self.flow[(self.network.to_solved(from), self.network.to_solved(to))]
    }

    /// Residual capacity between two nodes of the solved network.
    pub fn residual(&self, from: usize, to: usize) -> i64 {
        residual(&self.network.capacity, &self.flow, from, to)
    }

    /// Rooms still reachable from the source through the residual graph,
    /// sorted.
    ///
    /// When the flow is maximum this is the source side of a minimum cut.
    /// Greedy solves can stop short of the maximum, so pair this with
    /// [`SearchPolicy::ShortestPath`].
    pub fn source_side(&self) -> Vec<usize> {
        let mut rooms: Vec<usize> = self
            .reachable()
            .into_iter()
            .filter_map(|node| self.network.to_room(node))
            .collect();
        rooms.sort_unstable();
        rooms
    }

    /// Corridors leaving the source side, with their capacities.
    ///
    /// Their capacities sum to the flow value whenever the flow is maximum.
    pub fn cut_edges(&self) -> Vec<Edge<usize, i64>> {
        let reachable = self.reachable();
        let n = self.network.num_nodes();
        let mut on_source_side = vec![false; n];
        for &node in &reachable {
            on_source_side[node] = true;
        }

        let mut edges = Vec::new();
        for from in 0..n {
            if !on_source_side[from] {
                continue;
            }
            for to in (0..n).filter(|&to| !on_source_side[to]) {
                let capacity = self.network.capacity[(from, to)];
                if capacity == 0 {
                    continue;
                }
                if let (Some(u), Some(v)) = (self.network.to_room(from), self.network.to_room(to)) {
                    edges.push(((u, v), capacity));
                }
            }
        }
        edges
    }

    fn reachable(&self) -> Vec<usize> {
        let capacity = &self.network.capacity;
        let flow = &self.flow;
        bfs_reach(self.network.source, |&node| {
            residual_successors(capacity, flow, node)
        })
        .collect()
    }
}

impl FlowGraph {
    /// Maximum flow with the default options (greedy search, no bound).
    pub fn solve(&self) -> Result<FlowSolution, SolveError> {
        self.solve_with(&SolverOptions::default())
    }

    pub fn solve_with(&self, options: &SolverOptions) -> Result<FlowSolution, SolveError> {
        let profiling_start = Instant::now();
        let network = to_single_source(self);
        let profiling_end = Instant::now();
        debug!(
            "PROFILING escape_pods::solve transform time: {:.10}s",
            utils::get_duration(profiling_start, profiling_end)
        );
        solve_network(network, options)
    }
}

/// Smallest residual capacity along `path`, or `None` for a path with no
/// edges.
pub fn bottleneck(capacity: &Matrix<i64>, flow: &Matrix<i64>, path: &[usize]) -> Option<i64> {
    path.windows(2)
        .map(|edge| residual(capacity, flow, edge[0], edge[1]))
        .min()
}

/// Push `amount` along every edge of `path`, keeping `flow` skew symmetric.
pub fn augment(flow: &mut Matrix<i64>, path: &[usize], amount: i64) {
    for edge in path.windows(2) {
        let (from, to) = (edge[0], edge[1]);
        flow[(from, to)] += amount;
        flow[(to, from)] -= amount;
    }
}

/// Run the augmenting loop on an already single-source network.
pub fn solve_network(
    network: Transformed,
    options: &SolverOptions,
) -> Result<FlowSolution, SolveError> {
    let profiling_start = Instant::now();
    let (source, sink) = (network.source, network.sink);
    let n = network.num_nodes();
    let mut flow = Matrix::new_square(n, 0i64);
    let mut augmentations = 0;

    while let Some(path) = find_path(options.policy, &network.capacity, &flow, source, sink) {
        let Some(amount) = bottleneck(&network.capacity, &flow, &path) else {
            // Source and sink coincide; nothing to carry.
            break;
        };
        if let Some(limit) = options.max_augmentations {
            if augmentations >= limit {
                return Err(SolveError::AugmentationLimit { limit });
            }
        }
        augment(&mut flow, &path, amount);
        augmentations += 1;
        debug!("Augmentation {}: {} along {:?}", augmentations, amount, path);
    }

    let value: i64 = (0..n).map(|to| flow[(source, to)]).sum();
    let profiling_end = Instant::now();

    if log::log_enabled!(Level::Debug) {
        let saturated = (0..n)
            .flat_map(|u| (0..n).map(move |v| (u, v)))
            .filter(|&(u, v)| network.capacity[(u, v)] > 0 && flow[(u, v)] == network.capacity[(u, v)])
            .count();
        debug!("Number of nodes: {}", n);
        debug!("Number of saturated edges: {}", saturated);
    }
    info!(
        "PROFILING escape_pods::solve {:?} flow {} after {} augmentations time: {:.10}s",
        options.policy,
        value,
        augmentations,
        utils::get_duration(profiling_start, profiling_end)
    );

    Ok(FlowSolution {
        network,
        flow,
        value,
        augmentations,
    })
}
