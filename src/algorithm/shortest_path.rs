//! 全源最短路径
//!
//! Johnson 算法：Bellman-Ford 求势能，重赋权后对每个源点运行 Dijkstra。
//! 复杂度 O(V·E) + O(V·E·log V)。
//!
//! 势能、重赋权与约化距离在 i128 中计算，任意 i64 边权都不会溢出；
//! 只有最终距离和势能需要落在 (-UNREACHABLE, UNREACHABLE) 内。

use crate::error::{Error, Result};
use crate::graph::Graph;
use priority_queue::PriorityQueue;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::debug;

/// 不可达距离的哨兵值
///
/// 足够大以压过真实距离，两个哨兵相加也不会溢出。
/// 绝对值达到它的真实距离无法与哨兵区分，返回 [`Error::DistanceOverflow`]。
pub const UNREACHABLE: i64 = i64::MAX / 2;

/// 把 i128 中间结果收窄为可表示的距离
fn narrow(value: i128, vertex: usize) -> Result<i64> {
    i64::try_from(value)
        .ok()
        .filter(|&d| d > -UNREACHABLE && d < UNREACHABLE)
        .ok_or(Error::DistanceOverflow {
            vertex,
            limit: UNREACHABLE,
        })
}

/// 全源最短路径结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllPairsShortestPaths {
    /// 源点 -> (目标 -> 距离)，不可达为 [`UNREACHABLE`]
    pub distances: BTreeMap<usize, BTreeMap<usize, i64>>,
    /// 每个顶点的势能 h(v)
    pub potentials: Vec<i64>,
    /// predecessors[s][v]：以 s 为源的最短路径树中 v 的前驱
    pub predecessors: Vec<Vec<Option<usize>>>,
}

impl AllPairsShortestPaths {
    /// 查询距离，不可达或越界返回 None
    pub fn distance(&self, source: usize, target: usize) -> Option<i64> {
        self.distances
            .get(&source)
            .and_then(|row| row.get(&target))
            .copied()
            .filter(|&d| d != UNREACHABLE)
    }

    /// 重构一条最短路径（含两端顶点）
    pub fn path(&self, source: usize, target: usize) -> Option<Vec<usize>> {
        self.distance(source, target)?;

        let preds = self.predecessors.get(source)?;
        let mut path = vec![target];
        let mut current = target;
        while current != source {
            current = preds.get(current).copied().flatten()?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Johnson 全源最短路径
pub struct Johnson<'a> {
    graph: &'a Graph,
}

impl<'a> Johnson<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// 计算所有顶点对之间的最短距离
    ///
    /// 存在负权环时返回 [`Error::NegativeCycle`]，不返回部分结果。
    /// 自环被忽略（包括负权自环）。
    /// 某个可达距离或势能的绝对值不小于 [`UNREACHABLE`] 时返回 [`Error::DistanceOverflow`]。
    pub fn all_pairs(&self) -> Result<AllPairsShortestPaths> {
        let n = self.graph.vertex_count();
        let adj = self.graph.weighted_adjacency();

        let h = self.potentials(&adj)?;

        // 重赋权：w'(u, v) = w(u, v) + h(u) - h(v) >= 0
        let reweighted: Vec<Vec<(usize, i128)>> = adj
            .iter()
            .enumerate()
            .map(|(u, targets)| {
                targets
                    .iter()
                    .map(|(&v, &w)| (v, i128::from(w) + h[u] - h[v]))
                    .collect()
            })
            .collect();

        let mut distances = BTreeMap::new();
        let mut predecessors = Vec::with_capacity(n);

        for source in 0..n {
            let (reduced, preds) = dijkstra(&reweighted, source);
            let row = reduced
                .into_iter()
                .enumerate()
                .map(|(v, d)| match d {
                    Some(d) => Ok((v, narrow(d - h[source] + h[v], v)?)),
                    None => Ok((v, UNREACHABLE)),
                })
                .collect::<Result<BTreeMap<usize, i64>>>()?;
            distances.insert(source, row);
            predecessors.push(preds);
        }

        let potentials = h
            .iter()
            .enumerate()
            .map(|(v, &p)| narrow(p, v))
            .collect::<Result<Vec<i64>>>()?;

        debug!(vertices = n, edges = self.graph.edge_count(), "Johnson 计算完成");

        Ok(AllPairsShortestPaths {
            distances,
            potentials,
            predecessors,
        })
    }

    /// Bellman-Ford 计算势能
    ///
    /// 虚拟源点编号为 n，以零权边连向每个真实顶点，因此所有顶点都可达。
    fn potentials(&self, adj: &[BTreeMap<usize, i64>]) -> Result<Vec<i128>> {
        let n = adj.len();
        let virtual_source = n;

        let mut edges: Vec<(usize, usize, i128)> = adj
            .iter()
            .enumerate()
            .flat_map(|(u, targets)| targets.iter().map(move |(&v, &w)| (u, v, i128::from(w))))
            .collect();
        edges.extend((0..n).map(|v| (virtual_source, v, 0)));

        let mut h: Vec<Option<i128>> = vec![None; n + 1];
        h[virtual_source] = Some(0);

        // |V'| - 1 = n 轮松弛
        for _ in 0..n {
            let mut updated = false;
            for &(u, v, w) in &edges {
                let Some(hu) = h[u] else { continue };
                if h[v].map_or(true, |hv| hu + w < hv) {
                    h[v] = Some(hu + w);
                    updated = true;
                }
            }
            if !updated {
                break;
            }
        }

        // 额外一轮：仍可松弛说明存在负权环
        for &(u, v, w) in &edges {
            if let (Some(hu), Some(hv)) = (h[u], h[v]) {
                if hu + w < hv {
                    debug!(vertex = v, "检测到负权环");
                    return Err(Error::NegativeCycle { vertex: v });
                }
            }
        }

        h.truncate(n);
        Ok(h.into_iter().map(|p| p.unwrap_or(0)).collect())
    }
}

/// 单源 Dijkstra（非负权），返回约化距离与前驱；不可达为 None
fn dijkstra(adj: &[Vec<(usize, i128)>], source: usize) -> (Vec<Option<i128>>, Vec<Option<usize>>) {
    let n = adj.len();
    let mut dist: Vec<Option<i128>> = vec![None; n];
    let mut preds = vec![None; n];
    let mut queue = PriorityQueue::new();

    dist[source] = Some(0);
    queue.push(source, Reverse(0i128));

    while let Some((u, Reverse(d))) = queue.pop() {
        for &(v, w) in &adj[u] {
            let candidate = d + w;
            if dist[v].map_or(true, |current| candidate < current) {
                dist[v] = Some(candidate);
                preds[v] = Some(u);
                queue.push_increase(v, Reverse(candidate));
            }
        }
    }

    (dist, preds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::graph::GraphDescription;

    fn johnson(n: usize, edges: &[(i64, i64, i64)]) -> Result<AllPairsShortestPaths> {
        let graph =
            Graph::from_description(&GraphDescription::from_weighted_edges(n, edges)).unwrap();
        Johnson::new(&graph).all_pairs()
    }

    #[test]
    fn test_textbook_example() {
        let result = johnson(
            5,
            &[
                (0, 1, 3),
                (0, 2, 8),
                (0, 4, -4),
                (1, 3, 1),
                (1, 4, 7),
                (2, 1, 4),
                (3, 0, 2),
                (3, 2, -5),
                (4, 3, 6),
            ],
        )
        .unwrap();

        let expected = [
            [0, 1, -3, 2, -4],
            [3, 0, -4, 1, -1],
            [7, 4, 0, 5, 3],
            [2, -1, -5, 0, -2],
            [8, 5, 1, 6, 0],
        ];
        for (s, row) in expected.iter().enumerate() {
            for (t, &d) in row.iter().enumerate() {
                assert_eq!(result.distance(s, t), Some(d), "d({s}, {t})");
            }
        }

        assert_eq!(result.path(0, 2), Some(vec![0, 4, 3, 2]));
    }

    #[test]
    fn test_negative_cycle() {
        let err = johnson(3, &[(0, 1, 1), (1, 2, -3), (2, 0, 1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NegativeCycle);
        assert!(matches!(err, Error::NegativeCycle { .. }));
    }

    #[test]
    fn test_self_distance_with_self_loops() {
        let result = johnson(3, &[(0, 0, 5), (1, 1, -5), (0, 1, 2), (1, 2, 2)]).unwrap();
        for v in 0..3 {
            assert_eq!(result.distances[&v][&v], 0);
        }
        assert_eq!(result.distance(0, 2), Some(4));
    }

    #[test]
    fn test_unreachable_uses_sentinel() {
        let result = johnson(3, &[(0, 1, 2)]).unwrap();

        assert_eq!(result.distances[&1][&0], UNREACHABLE);
        assert_eq!(result.distances[&0][&2], UNREACHABLE);
        assert_eq!(result.distance(1, 0), None);
        assert_eq!(result.path(1, 0), None);
        // 每个源点的结果都包含全部目标
        assert!(result.distances.values().all(|row| row.len() == 3));
    }

    #[test]
    fn test_duplicate_edges_last_writer_wins() {
        let result = johnson(2, &[(0, 1, 1), (0, 1, 9)]).unwrap();
        assert_eq!(result.distance(0, 1), Some(9));
    }

    #[test]
    fn test_empty_graph() {
        let result = johnson(0, &[]).unwrap();
        assert!(result.distances.is_empty());
        assert!(result.potentials.is_empty());
    }

    #[test]
    fn test_distance_beyond_sentinel_is_rejected() {
        // d(2, 1) = 9e18 可用 i64 表示，但会与不可达哨兵混淆
        let edges = [(0, 1, -4_000_000_000_000_000_000), (2, 1, 9_000_000_000_000_000_000)];
        let err = johnson(3, &edges).unwrap_err();
        assert!(matches!(err, Error::DistanceOverflow { vertex: 1, .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = johnson(2, &[(0, 1, UNREACHABLE)]).unwrap_err();
        assert!(matches!(err, Error::DistanceOverflow { vertex: 1, .. }));

        // 两段都可表示，但路径总长超出范围
        let half = UNREACHABLE / 2 + 1;
        let err = johnson(3, &[(0, 1, half), (1, 2, half)]).unwrap_err();
        assert!(matches!(err, Error::DistanceOverflow { vertex: 2, .. }));

        let err = johnson(3, &[(0, 1, -half), (1, 2, -half)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_extreme_weights_within_range() {
        let max = UNREACHABLE - 1;
        let result = johnson(3, &[(0, 1, max), (1, 2, -max), (0, 2, i64::MAX)]).unwrap();
        assert_eq!(result.distance(0, 1), Some(max));
        assert_eq!(result.distance(0, 2), Some(0));
        assert_eq!(result.path(0, 2), Some(vec![0, 1, 2]));
        assert_eq!(result.distance(1, 2), Some(-max));

        // 不在任何最短路径上的极端边不影响结果
        let result = johnson(3, &[(1, 0, i64::MAX), (1, 2, 1), (2, 0, 1)]).unwrap();
        assert_eq!(result.distance(1, 0), Some(2));
        assert_eq!(result.path(1, 0), Some(vec![1, 2, 0]));
    }

    #[test]
    fn test_negative_cycle_with_extreme_weights() {
        let err = johnson(2, &[(0, 1, i64::MIN), (1, 0, i64::MAX)]).unwrap_err();
        assert!(matches!(err, Error::NegativeCycle { .. }));
    }

    #[test]
    fn test_idempotent() {
        let edges = [(0, 1, 4), (1, 2, -2), (0, 2, 5), (2, 3, 1)];
        assert_eq!(johnson(4, &edges).unwrap(), johnson(4, &edges).unwrap());
    }
}
