//! 边界请求/响应类型
//!
//! 与传输层无关的 JSON 形状，字段使用 camelCase

use crate::algorithm::{AllPairsShortestPaths, CriticalConnections, MaxFlow, Schedule};
use crate::error::Result;
use crate::graph::{GraphDescription, LabelMap, LabeledEdge};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 图请求：`{ vertexCount, edges: [[from, to, weight?]] }`
pub type GraphRequest = GraphDescription;

/// 最大流请求
///
/// 提供 `capacityMatrix` 时忽略 `vertexCount` 和 `edges`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxFlowRequest {
    #[serde(default)]
    pub vertex_count: usize,
    #[serde(default)]
    pub edges: Vec<Option<Vec<i64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_matrix: Option<Vec<Vec<i64>>>,
    pub source: usize,
    pub sink: usize,
}

impl MaxFlowRequest {
    pub fn graph(&self) -> GraphDescription {
        GraphDescription {
            vertex_count: self.vertex_count,
            edges: self.edges.clone(),
        }
    }
}

/// 调度请求：`{ taskCount, conflicts: [[i, j]] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub task_count: usize,
    #[serde(default)]
    pub conflicts: Vec<Option<Vec<i64>>>,
}

impl ScheduleRequest {
    pub fn new(task_count: usize, conflicts: &[(i64, i64)]) -> Self {
        Self {
            task_count,
            conflicts: conflicts.iter().map(|&(i, j)| Some(vec![i, j])).collect(),
        }
    }

    /// 冲突图描述：任务为顶点，冲突为边
    pub fn graph(&self) -> GraphDescription {
        GraphDescription {
            vertex_count: self.task_count,
            edges: self.conflicts.clone(),
        }
    }
}

/// 带标签的图请求：`{ vertices?, edges: [{ from, to, weight? }] }`
///
/// 顶点按 `vertices` 的顺序编号，之后按在边中首次出现的顺序编号。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledGraphRequest {
    #[serde(default)]
    pub vertices: Vec<String>,
    #[serde(default)]
    pub edges: Vec<LabeledEdge>,
}

impl LabeledGraphRequest {
    /// 转换为下标形式的图请求
    pub fn describe(&self) -> (GraphRequest, LabelMap) {
        LabelMap::describe(&self.edges, &self.vertices)
    }

    /// 视为冲突图：顶点为任务，边为冲突，权重被忽略
    pub fn schedule(&self) -> (ScheduleRequest, LabelMap) {
        let (graph, labels) = self.describe();
        let request = ScheduleRequest {
            task_count: graph.vertex_count,
            conflicts: graph.edges,
        };
        (request, labels)
    }
}

/// 带标签的最大流请求
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledMaxFlowRequest {
    #[serde(flatten)]
    pub graph: LabeledGraphRequest,
    pub source: String,
    pub sink: String,
}

impl LabeledMaxFlowRequest {
    /// 转换为下标形式，源点或汇点标签未知时返回错误
    pub fn resolve(&self) -> Result<(MaxFlowRequest, LabelMap)> {
        let (graph, labels) = self.graph.describe();
        let request = MaxFlowRequest {
            vertex_count: graph.vertex_count,
            edges: graph.edges,
            capacity_matrix: None,
            source: labels.resolve(&self.source)?,
            sink: labels.resolve(&self.sink)?,
        };
        Ok((request, labels))
    }
}

/// 关键连接响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalConnectionsResponse {
    /// `"u-v"` 形式的桥
    pub bridges: Vec<String>,
    pub articulation_points: Vec<usize>,
}

impl From<CriticalConnections> for CriticalConnectionsResponse {
    fn from(result: CriticalConnections) -> Self {
        Self {
            bridges: result.bridges.iter().map(ToString::to_string).collect(),
            articulation_points: result.articulation_points,
        }
    }
}

/// 最短路径响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortestPathsResponse {
    /// 源点 -> 目标 -> 距离，不可达为哨兵值
    pub distances: BTreeMap<usize, BTreeMap<usize, i64>>,
}

impl From<AllPairsShortestPaths> for ShortestPathsResponse {
    fn from(result: AllPairsShortestPaths) -> Self {
        Self {
            distances: result.distances,
        }
    }
}

/// 最大流响应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxFlowResponse {
    pub max_flow: i64,
}

impl From<&MaxFlow> for MaxFlowResponse {
    fn from(result: &MaxFlow) -> Self {
        Self {
            max_flow: result.value,
        }
    }
}

/// 调度响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub assignment: BTreeMap<usize, usize>,
    pub total_slots: usize,
}

impl From<Schedule> for ScheduleResponse {
    fn from(result: Schedule) -> Self {
        Self {
            assignment: result.assignment,
            total_slots: result.total_slots,
        }
    }
}
