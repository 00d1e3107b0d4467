//! 关键连接分析
//!
//! 一次深度优先遍历同时求出桥和割点

use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

const UNVISITED: usize = usize::MAX;

/// 桥（无序端点对，`u < v`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bridge {
    pub u: usize,
    pub v: usize,
}

impl Bridge {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            u: a.min(b),
            v: a.max(b),
        }
    }
}

impl fmt::Display for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.u, self.v)
    }
}

/// 分析结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalConnections {
    /// 桥，按端点升序
    pub bridges: Vec<Bridge>,
    /// 割点，升序
    pub articulation_points: Vec<usize>,
}

/// DFS 栈帧
struct Frame {
    vertex: usize,
    /// 进入该顶点所用的边，回边判断时排除
    parent_edge: Option<EdgeId>,
    /// 下一个待检查的邻居位置
    next: usize,
}

/// 关键连接分析器
///
/// 遍历时记录进入顶点所用的边 ID 而不是父顶点，
/// 因此两个顶点之间的平行边互为回边，不会被判为桥。
pub struct CriticalConnectionAnalyzer<'a> {
    graph: &'a Graph,
}

impl<'a> CriticalConnectionAnalyzer<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// 计算桥和割点
    pub fn analyze(&self) -> Result<CriticalConnections> {
        if let Some(&index) = self.graph.null_edges().first() {
            return Err(Error::MalformedEdge { index }.context(format!(
                "关键连接分析失败: 边列表中第 {} 条边为空",
                index
            )));
        }

        let n = self.graph.vertex_count();
        let adj = self.graph.undirected_adjacency();

        let mut disc = vec![UNVISITED; n];
        let mut low = vec![UNVISITED; n];
        let mut time = 0;
        let mut bridges = BTreeSet::new();
        let mut articulation = BTreeSet::new();
        let mut stack: Vec<Frame> = Vec::new();

        for root in 0..n {
            if disc[root] != UNVISITED {
                continue;
            }

            disc[root] = time;
            low[root] = time;
            time += 1;
            let mut root_children = 0;
            stack.push(Frame {
                vertex: root,
                parent_edge: None,
                next: 0,
            });

            while let Some(frame) = stack.last_mut() {
                let u = frame.vertex;

                if let Some(&(v, edge)) = adj[u].get(frame.next) {
                    frame.next += 1;
                    if frame.parent_edge == Some(edge) {
                        continue;
                    }

                    if disc[v] == UNVISITED {
                        disc[v] = time;
                        low[v] = time;
                        time += 1;
                        if u == root {
                            root_children += 1;
                        }
                        stack.push(Frame {
                            vertex: v,
                            parent_edge: Some(edge),
                            next: 0,
                        });
                    } else {
                        low[u] = low[u].min(disc[v]);
                    }
                    continue;
                }

                // u 的所有邻居处理完毕，回溯到父顶点
                stack.pop();
                if let Some(parent) = stack.last() {
                    let p = parent.vertex;
                    low[p] = low[p].min(low[u]);

                    if low[u] > disc[p] {
                        bridges.insert(Bridge::new(p, u));
                    }
                    if p != root && low[u] >= disc[p] {
                        articulation.insert(p);
                    }
                }
            }

            if root_children > 1 {
                articulation.insert(root);
            }
        }

        debug!(
            vertices = n,
            bridges = bridges.len(),
            articulation_points = articulation.len(),
            "关键连接分析完成"
        );

        Ok(CriticalConnections {
            bridges: bridges.into_iter().collect(),
            articulation_points: articulation.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::graph::GraphDescription;

    fn analyze(n: usize, edges: &[(i64, i64)]) -> CriticalConnections {
        let graph = Graph::from_description(&GraphDescription::from_edges(n, edges)).unwrap();
        CriticalConnectionAnalyzer::new(&graph).analyze().unwrap()
    }

    #[test]
    fn test_example_graph() {
        let result = analyze(5, &[(0, 1), (1, 2), (2, 0), (1, 3), (3, 4)]);

        assert_eq!(result.bridges, vec![Bridge::new(1, 3), Bridge::new(3, 4)]);
        assert_eq!(result.articulation_points, vec![1, 3]);
        let names: Vec<String> = result.bridges.iter().map(|b| b.to_string()).collect();
        assert_eq!(names, vec!["1-3", "3-4"]);
    }

    #[test]
    fn test_path_all_bridges() {
        for n in [2usize, 5, 10] {
            let edges: Vec<(i64, i64)> = (0..n as i64 - 1).map(|u| (u, u + 1)).collect();
            let result = analyze(n, &edges);

            let expected: Vec<Bridge> = (0..n - 1).map(|u| Bridge::new(u, u + 1)).collect();
            assert_eq!(result.bridges, expected);
            assert_eq!(result.articulation_points, (1..n - 1).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_cycle_has_no_bridges() {
        let result = analyze(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert!(result.bridges.is_empty());
        assert!(result.articulation_points.is_empty());
    }

    #[test]
    fn test_star() {
        let result = analyze(5, &[(2, 0), (2, 1), (2, 3), (2, 4)]);
        assert_eq!(result.articulation_points, vec![2]);
        assert_eq!(result.bridges.len(), 4);
    }

    #[test]
    fn test_star_center_is_root() {
        let result = analyze(4, &[(0, 1), (0, 2), (0, 3)]);
        assert_eq!(result.articulation_points, vec![0]);
    }

    #[test]
    fn test_self_loop_is_inert() {
        let with_loop = analyze(3, &[(0, 1), (1, 1), (1, 2)]);
        let without = analyze(3, &[(0, 1), (1, 2)]);
        assert_eq!(with_loop, without);
    }

    #[test]
    fn test_parallel_edges_are_not_bridges() {
        let result = analyze(3, &[(0, 1), (1, 0), (1, 2)]);
        assert_eq!(result.bridges, vec![Bridge::new(1, 2)]);
        assert_eq!(result.articulation_points, vec![1]);
    }

    #[test]
    fn test_disconnected_components() {
        let result = analyze(6, &[(0, 1), (1, 2), (2, 0), (3, 4)]);
        assert_eq!(result.bridges, vec![Bridge::new(3, 4)]);
        assert!(result.articulation_points.is_empty());
    }

    #[test]
    fn test_null_edge_is_internal_error() {
        let desc = GraphDescription {
            vertex_count: 2,
            edges: vec![Some(vec![0, 1]), None],
        };
        let graph = Graph::from_description(&desc).unwrap();
        let err = CriticalConnectionAnalyzer::new(&graph).analyze().unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        match err {
            Error::Analysis { source, .. } => {
                assert!(matches!(*source, Error::MalformedEdge { index: 1 }))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_idempotent() {
        let graph = Graph::from_description(&GraphDescription::from_edges(
            5,
            &[(0, 1), (1, 2), (2, 0), (1, 3), (3, 4)],
        ))
        .unwrap();
        let analyzer = CriticalConnectionAnalyzer::new(&graph);
        assert_eq!(analyzer.analyze().unwrap(), analyzer.analyze().unwrap());
    }
}
