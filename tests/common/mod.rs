#![allow(dead_code)]

use escape_pods::FlowSolution;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Assert skew symmetry, the capacity bound and conservation on a solved
/// flow.
pub fn assert_valid_flow(solution: &FlowSolution) {
    let network = solution.network();
    let flow = solution.flows();
    let n = network.num_nodes();
    for u in 0..n {
        for v in 0..n {
            assert_eq!(flow[(u, v)], -flow[(v, u)], "skew symmetry at ({u}, {v})");
            assert!(
                flow[(u, v)] <= network.capacity[(u, v)],
                "flow {} over capacity {} at ({u}, {v})",
                flow[(u, v)],
                network.capacity[(u, v)]
            );
        }
        if u != network.source && u != network.sink {
            let net: i64 = (0..n).map(|v| flow[(u, v)]).sum();
            assert_eq!(net, 0, "conservation at {u}");
        }
    }
}

/// Smallest total capacity over every room split that keeps all entrances
/// on one side and all exits on the other.
pub fn brute_force_min_cut(entrances: &[usize], exits: &[usize], rows: &[Vec<i64>]) -> i64 {
    let n = rows.len();
    (0u32..1 << n)
        .filter(|mask| entrances.iter().all(|&e| mask & (1 << e) != 0))
        .filter(|mask| exits.iter().all(|&x| mask & (1 << x) == 0))
        .map(|mask| {
            let mut crossing = 0;
            for u in (0..n).filter(|&u| mask & (1 << u) != 0) {
                for v in (0..n).filter(|&v| mask & (1 << v) == 0) {
                    crossing += rows[u][v];
                }
            }
            crossing
        })
        .min()
        .unwrap_or(0)
}
