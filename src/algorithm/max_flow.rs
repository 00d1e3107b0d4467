//! 最大流算法
//!
//! 实现 Edmonds-Karp 算法（基于 BFS 的 Ford-Fulkerson）。
//! 每次沿最短增广路径推流，增广次数为 O(V·E)，总复杂度 O(V·E²)，与容量大小无关。

use crate::error::{Error, Result};
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// 一条边上的流量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowAssignment {
    pub from: usize,
    pub to: usize,
    pub flow: i64,
}

/// 最小割上的一条边
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutEdge {
    pub from: usize,
    pub to: usize,
    pub capacity: i64,
}

/// 最大流结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxFlow {
    /// 最大流量值
    pub value: i64,
    /// 流量分配（仅正流量）
    pub flows: Vec<FlowAssignment>,
    /// 最小割的源侧顶点集（升序）
    pub source_side: Vec<usize>,
    /// 最小割边，容量之和等于 value
    pub cut_edges: Vec<CutEdge>,
    /// 增广路径条数
    pub augmenting_paths: usize,
}

impl MaxFlow {
    /// 最小割容量
    ///
    /// 不超过网络容量总和，构建网络时已保证其可用 i64 表示。
    pub fn cut_capacity(&self) -> i64 {
        self.cut_edges.iter().map(|e| e.capacity).sum()
    }
}

/// 容量网络
///
/// 容量以稠密矩阵保存；平行边容量相加，自环被忽略。
/// 所有容量之和必须可用 i64 表示，否则返回 [`Error::CapacityOverflow`]；
/// 流量、残量与最小割都不超过该总和，因此计算过程不会溢出。
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    capacity: Vec<Vec<i64>>,
    /// 每个顶点在残量网络中的邻居（含反向边）
    neighbors: Vec<Vec<usize>>,
}

impl FlowNetwork {
    /// 由稀疏边构建，边的权重即容量
    pub fn from_graph(graph: &Graph) -> Result<Self> {
        if graph.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let n = graph.vertex_count();
        let mut capacity = vec![vec![0i64; n]; n];

        for edge in graph.edges() {
            if edge.weight() < 0 {
                return Err(Error::NegativeCapacity {
                    from: edge.src(),
                    to: edge.dst(),
                    capacity: edge.weight(),
                });
            }
            if edge.is_self_loop() {
                continue;
            }
            // 累加同一边的容量
            let cell = &mut capacity[edge.src()][edge.dst()];
            *cell = cell
                .checked_add(edge.weight())
                .ok_or(Error::CapacityOverflow)?;
        }

        Self::with_capacity(capacity)
    }

    /// 由稠密容量矩阵构建，矩阵必须为非空方阵
    pub fn from_matrix(matrix: Vec<Vec<i64>>) -> Result<Self> {
        let n = matrix.len();
        if n == 0 {
            return Err(Error::EmptyGraph);
        }

        for (row, values) in matrix.iter().enumerate() {
            if values.len() != n {
                return Err(Error::NonSquareMatrix {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
            if let Some((col, &capacity)) = values.iter().enumerate().find(|&(_, &c)| c < 0) {
                return Err(Error::NegativeCapacity {
                    from: row,
                    to: col,
                    capacity,
                });
            }
        }

        let mut capacity = matrix;
        for (v, row) in capacity.iter_mut().enumerate() {
            row[v] = 0;
        }

        Self::with_capacity(capacity)
    }

    fn with_capacity(capacity: Vec<Vec<i64>>) -> Result<Self> {
        capacity
            .iter()
            .flatten()
            .try_fold(0i64, |total, &c| total.checked_add(c))
            .ok_or(Error::CapacityOverflow)?;

        let n = capacity.len();
        let mut neighbors = vec![Vec::new(); n];

        for (u, row) in capacity.iter().enumerate() {
            for (v, &c) in row.iter().enumerate() {
                if c > 0 {
                    neighbors[u].push(v);
                    neighbors[v].push(u); // 反向边
                }
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        Ok(Self {
            capacity,
            neighbors,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.capacity.len()
    }

    pub fn capacity(&self, from: usize, to: usize) -> i64 {
        self.capacity
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0)
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(Error::VertexOutOfRange {
                edge: None,
                vertex: vertex as i64,
                vertex_count: self.vertex_count(),
            })
        }
    }
}

/// Edmonds-Karp 最大流算法
pub struct EdmondsKarp {
    network: FlowNetwork,
}

impl EdmondsKarp {
    /// 创建算法实例
    pub fn new(network: FlowNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &FlowNetwork {
        &self.network
    }

    /// 计算从 source 到 sink 的最大流
    pub fn max_flow(&self, source: usize, sink: usize) -> Result<MaxFlow> {
        self.network.check_vertex(source)?;
        self.network.check_vertex(sink)?;

        if source == sink {
            return Ok(MaxFlow {
                value: 0,
                flows: Vec::new(),
                source_side: vec![source],
                cut_edges: Vec::new(),
                augmenting_paths: 0,
            });
        }

        let n = self.network.vertex_count();
        // 流量矩阵，flow[v][u] = -flow[u][v]
        let mut flow = vec![vec![0i64; n]; n];
        let mut max_flow_value = 0i64;
        let mut augmenting_paths = 0;

        // 重复 BFS 找增广路径
        while let Some(parent) = self.bfs(source, sink, &flow) {
            // 沿父指针求瓶颈
            let mut bottleneck = i64::MAX;
            let mut v = sink;
            while v != source {
                let u = parent[v];
                bottleneck = bottleneck.min(self.residual(&flow, u, v));
                v = u;
            }

            // 沿路径增广
            let mut v = sink;
            while v != source {
                let u = parent[v];
                flow[u][v] += bottleneck;
                flow[v][u] -= bottleneck;
                v = u;
            }

            max_flow_value = max_flow_value
                .checked_add(bottleneck)
                .ok_or(Error::CapacityOverflow)?;
            augmenting_paths += 1;
            debug!(bottleneck, total = max_flow_value, "增广");
        }

        // 最小割：从源点出发残量可达的顶点属于源侧
        let reachable = self.reachable(source, &flow);
        let source_side: Vec<usize> = (0..n).filter(|&v| reachable[v]).collect();

        let mut cut_edges = Vec::new();
        for &u in &source_side {
            for &v in &self.network.neighbors[u] {
                let capacity = self.network.capacity[u][v];
                if !reachable[v] && capacity > 0 {
                    cut_edges.push(CutEdge {
                        from: u,
                        to: v,
                        capacity,
                    });
                }
            }
        }

        // 只保留正流量
        let mut flows = Vec::new();
        for (u, row) in flow.iter().enumerate() {
            for (v, &f) in row.iter().enumerate() {
                if f > 0 && self.network.capacity[u][v] > 0 {
                    flows.push(FlowAssignment {
                        from: u,
                        to: v,
                        flow: f,
                    });
                }
            }
        }

        Ok(MaxFlow {
            value: max_flow_value,
            flows,
            source_side,
            cut_edges,
            augmenting_paths,
        })
    }

    fn residual(&self, flow: &[Vec<i64>], u: usize, v: usize) -> i64 {
        self.network.capacity[u][v] - flow[u][v]
    }

    /// BFS 找增广路径，返回父指针数组；汇点不可达时返回 None
    fn bfs(&self, source: usize, sink: usize, flow: &[Vec<i64>]) -> Option<Vec<usize>> {
        let n = self.network.vertex_count();
        let mut parent = vec![usize::MAX; n];
        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();

        visited[source] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for &v in &self.network.neighbors[u] {
                if !visited[v] && self.residual(flow, u, v) > 0 {
                    visited[v] = true;
                    parent[v] = u;
                    if v == sink {
                        return Some(parent);
                    }
                    queue.push_back(v);
                }
            }
        }

        None
    }

    /// 残量网络中从 source 可达的顶点
    fn reachable(&self, source: usize, flow: &[Vec<i64>]) -> Vec<bool> {
        let mut visited = vec![false; self.network.vertex_count()];
        let mut queue = VecDeque::new();

        visited[source] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for &v in &self.network.neighbors[u] {
                if !visited[v] && self.residual(flow, u, v) > 0 {
                    visited[v] = true;
                    queue.push_back(v);
                }
            }
        }

        visited
    }
}
