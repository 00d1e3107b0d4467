//! 图数据结构
//!
//! 每次调用都从描述重新构建，构建后不可变

use super::edge::{Edge, EdgeId};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// 图描述：顶点数加边列表
///
/// 每条边为 `[from, to, weight?]`，`null` 条目会被记录在 [`Graph::null_edges`] 中。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDescription {
    pub vertex_count: usize,
    #[serde(default)]
    pub edges: Vec<Option<Vec<i64>>>,
}

impl GraphDescription {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
        }
    }

    /// 由无权边构建
    pub fn from_edges(vertex_count: usize, edges: &[(i64, i64)]) -> Self {
        Self {
            vertex_count,
            edges: edges.iter().map(|&(u, v)| Some(vec![u, v])).collect(),
        }
    }

    /// 由带权边构建
    pub fn from_weighted_edges(vertex_count: usize, edges: &[(i64, i64, i64)]) -> Self {
        Self {
            vertex_count,
            edges: edges.iter().map(|&(u, v, w)| Some(vec![u, v, w])).collect(),
        }
    }

    /// 追加一条原始边
    pub fn push(&mut self, raw: Vec<i64>) {
        self.edges.push(Some(raw));
    }
}

/// 图
#[derive(Debug, Clone)]
pub struct Graph {
    /// 顶点数
    vertex_count: usize,
    /// 有效边（保留输入顺序）
    edges: Vec<Edge>,
    /// 描述中为 null 的边下标
    null_edges: Vec<usize>,
}

impl Graph {
    /// 校验描述并构建图
    ///
    /// 任一端点越界即失败；缺少端点的边被丢弃。
    pub fn from_description(desc: &GraphDescription) -> Result<Self> {
        let mut edges = Vec::with_capacity(desc.edges.len());
        let mut null_edges = Vec::new();

        for (index, raw) in desc.edges.iter().enumerate() {
            match raw {
                None => null_edges.push(index),
                Some(raw) => match Edge::parse(index, raw, desc.vertex_count)? {
                    Some(edge) => edges.push(edge),
                    None => debug!(index, "跳过缺少端点的边"),
                },
            }
        }

        Ok(Self {
            vertex_count: desc.vertex_count,
            edges,
            null_edges,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn null_edges(&self) -> &[usize] {
        &self.null_edges
    }

    /// 检查顶点是否在范围内
    pub fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.vertex_count {
            Ok(())
        } else {
            Err(Error::VertexOutOfRange {
                edge: None,
                vertex: vertex as i64,
                vertex_count: self.vertex_count,
            })
        }
    }

    /// 无向邻接表
    ///
    /// 每条边在两个方向各出现一次，并带上边 ID 以区分平行边。
    /// 自环不出现在邻接表中。每个邻接列表按 (邻居, 边 ID) 升序排列。
    pub fn undirected_adjacency(&self) -> Vec<Vec<(usize, EdgeId)>> {
        let mut adj = vec![Vec::new(); self.vertex_count];
        for edge in self.edges.iter().filter(|e| !e.is_self_loop()) {
            adj[edge.src()].push((edge.dst(), edge.id()));
            adj[edge.dst()].push((edge.src(), edge.id()));
        }
        for neighbors in &mut adj {
            neighbors.sort_unstable();
        }
        adj
    }

    /// 有向带权邻接表（目标 -> 权重）
    ///
    /// 重复边后写入者生效；自环被忽略。
    pub fn weighted_adjacency(&self) -> Vec<BTreeMap<usize, i64>> {
        let mut adj = vec![BTreeMap::new(); self.vertex_count];
        for edge in self.edges.iter().filter(|e| !e.is_self_loop()) {
            adj[edge.src()].insert(edge.dst(), edge.weight());
        }
        adj
    }
}
