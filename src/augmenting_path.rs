use std::cmp::Reverse;

use log::trace;
use pathfinding::directed::bfs::bfs;
use pathfinding::matrix::Matrix;

/// How the solver looks for the next augmenting path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchPolicy {
    /// Walk from the source along real corridors, always taking the
    /// unvisited neighbour with the most residual capacity (lowest index on
    /// ties). Never backtracks and never walks a reverse residual edge, so
    /// it can miss a path that exists.
    #[default]
    Greedy,
    /// Breadth-first search over the whole residual graph, reverse edges
    /// included. Returns a shortest augmenting path (Edmonds-Karp).
    ShortestPath,
}

/// Remaining capacity on `from -> to`.
#[inline]
pub fn residual(capacity: &Matrix<i64>, flow: &Matrix<i64>, from: usize, to: usize) -> i64 {
    capacity[(from, to)] - flow[(from, to)]
}

/// Nodes reachable from `node` through one edge with positive residual
/// capacity, in index order.
pub(crate) fn residual_successors<'a>(
    capacity: &'a Matrix<i64>,
    flow: &'a Matrix<i64>,
    node: usize,
) -> impl Iterator<Item = usize> + 'a {
    (0..capacity.columns).filter(move |&to| residual(capacity, flow, node, to) > 0)
}

/// Find an augmenting path from `source` to `sink` with `policy`.
///
/// The returned path starts at `source` and ends at `sink`. When they are
/// the same node the path is `[source]`, which carries no flow. `None`
/// means the search found nothing; the solver stops there.
pub fn find_path(
    policy: SearchPolicy,
    capacity: &Matrix<i64>,
    flow: &Matrix<i64>,
    source: usize,
    sink: usize,
) -> Option<Vec<usize>> {
    match policy {
        SearchPolicy::Greedy => greedy_path(capacity, flow, source, sink),
        SearchPolicy::ShortestPath => shortest_path(capacity, flow, source, sink),
    }
}

pub fn greedy_path(
    capacity: &Matrix<i64>,
    flow: &Matrix<i64>,
    source: usize,
    sink: usize,
) -> Option<Vec<usize>> {
    if source == sink {
        return Some(vec![source]);
    }

    let mut on_path = vec![false; capacity.rows];
    let mut path = vec![source];
    on_path[source] = true;

    let mut current = source;
    loop {
        let (next, room_left) = (0..capacity.columns)
            .filter(|&to| !on_path[to] && capacity[(current, to)] > 0)
            .map(|to| (to, residual(capacity, flow, current, to)))
            .filter(|&(_, room_left)| room_left > 0)
            .min_by_key(|&(to, room_left)| (Reverse(room_left), to))?;

        trace!("Greedy step {} -> {} (residual {})", current, next, room_left);
        path.push(next);
        if next == sink {
            return Some(path);
        }
        on_path[next] = true;
        current = next;
    }
}

pub fn shortest_path(
    capacity: &Matrix<i64>,
    flow: &Matrix<i64>,
    source: usize,
    sink: usize,
) -> Option<Vec<usize>> {
    bfs(
        &source,
        |&node| residual_successors(capacity, flow, node),
        |&node| node == sink,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(rows: &[&[i64]]) -> Matrix<i64> {
        let mut m = Matrix::new_square(rows.len(), 0);
        for (u, row) in rows.iter().enumerate() {
            for (v, &c) in row.iter().enumerate() {
                m[(u, v)] = c;
            }
        }
        m
    }

    #[test]
    fn same_source_and_sink_is_a_single_node_path() {
        let c = square(&[&[0, 1], &[0, 0]]);
        let f = Matrix::new_square(2, 0);
        assert_eq!(greedy_path(&c, &f, 1, 1), Some(vec![1]));
        assert_eq!(shortest_path(&c, &f, 1, 1), Some(vec![1]));
    }

    #[test]
    fn greedy_follows_largest_residual() {
        // 0 -> 1 (5) -> 3, 0 -> 2 (9) -> 3
        let c = square(&[&[0, 5, 9, 0], &[0, 0, 0, 4], &[0, 0, 0, 3], &[0, 0, 0, 0]]);
        let f = Matrix::new_square(4, 0);
        assert_eq!(greedy_path(&c, &f, 0, 3), Some(vec![0, 2, 3]));
    }

    #[test]
    fn greedy_breaks_ties_on_lowest_index() {
        let c = square(&[&[0, 0, 4, 4], &[0, 0, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0]]);
        let f = Matrix::new_square(4, 0);
        assert_eq!(greedy_path(&c, &f, 0, 1), Some(vec![0, 2, 1]));
    }

    #[test]
    fn greedy_does_not_step_straight_to_a_smaller_sink_edge() {
        // The sink is adjacent but the detour has more room.
        let c = square(&[&[0, 2, 8], &[0, 0, 0], &[0, 6, 0]]);
        let f = Matrix::new_square(3, 0);
        assert_eq!(greedy_path(&c, &f, 0, 1), Some(vec![0, 2, 1]));
    }

    #[test]
    fn greedy_gives_up_without_backtracking() {
        // Best first hop (2) is a dead end, the real path goes through 1.
        let c = square(&[&[0, 1, 5, 0], &[0, 0, 0, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        let f = Matrix::new_square(4, 0);
        assert_eq!(greedy_path(&c, &f, 0, 3), None);
        assert_eq!(shortest_path(&c, &f, 0, 3), Some(vec![0, 1, 3]));
    }

    #[test]
    fn saturated_edges_are_skipped() {
        let c = square(&[&[0, 3, 0], &[0, 0, 3], &[0, 0, 0]]);
        let mut f = Matrix::new_square(3, 0);
        f[(0, 1)] = 3;
        f[(1, 0)] = -3;
        assert_eq!(greedy_path(&c, &f, 0, 2), None);
        assert_eq!(shortest_path(&c, &f, 0, 2), None);
    }

    #[test]
    fn only_breadth_first_uses_reverse_edges() {
        // Flow 0 -> 1 -> 2 -> 3 is in place; the second path must cancel
        // the 1 -> 2 flow: 0 -> 2 -> 1 -> 3.
        let c = square(&[&[0, 1, 1, 0], &[0, 0, 1, 1], &[0, 0, 0, 1], &[0, 0, 0, 0]]);
        let mut f = Matrix::new_square(4, 0);
        for (u, v) in [(0, 1), (1, 2), (2, 3)] {
            f[(u, v)] = 1;
            f[(v, u)] = -1;
        }
        assert_eq!(greedy_path(&c, &f, 0, 3), None);
        assert_eq!(shortest_path(&c, &f, 0, 3), Some(vec![0, 2, 1, 3]));
    }

    #[test]
    fn breadth_first_prefers_fewest_hops() {
        let c = square(&[&[0, 9, 1, 1], &[0, 0, 0, 9], &[0, 0, 0, 1], &[0, 0, 0, 0]]);
        let f = Matrix::new_square(4, 0);
        assert_eq!(shortest_path(&c, &f, 0, 3), Some(vec![0, 3]));
        assert_eq!(greedy_path(&c, &f, 0, 3), Some(vec![0, 1, 3]));
    }

    #[test]
    fn residual_successors_lists_open_edges_in_order() {
        let c = square(&[&[0, 2, 0, 1], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        let mut f = Matrix::new_square(4, 0);
        f[(0, 1)] = 2;
        f[(1, 0)] = -2;
        assert_eq!(residual_successors(&c, &f, 0).collect::<Vec<_>>(), vec![3]);
        assert_eq!(residual_successors(&c, &f, 1).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn find_path_dispatches_on_policy() {
        let c = square(&[&[0, 1, 5, 0], &[0, 0, 0, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        let f = Matrix::new_square(4, 0);
        assert_eq!(find_path(SearchPolicy::default(), &c, &f, 0, 3), None);
        assert_eq!(
            find_path(SearchPolicy::ShortestPath, &c, &f, 0, 3),
            Some(vec![0, 1, 3])
        );
    }
}
