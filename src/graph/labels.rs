//! 顶点标签映射
//!
//! 在边界处把字符串标签映射为 `[0, V)` 内的顶点下标，按首次出现顺序编号

use super::graph::GraphDescription;
use crate::error::{Error, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// 带标签的边：`{ from, to, weight? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledEdge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

impl LabeledEdge {
    pub fn new(from: &str, to: &str, weight: Option<i64>) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        }
    }
}

/// 标签 <-> 下标映射
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelMap {
    labels: IndexSet<String>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取标签的下标，不存在则分配新下标
    pub fn intern(&mut self, label: &str) -> usize {
        match self.labels.get_index_of(label) {
            Some(index) => index,
            None => self.labels.insert_full(label.to_string()).0,
        }
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    /// 查找已存在的标签，未知标签返回错误
    pub fn resolve(&self, label: &str) -> Result<usize> {
        self.index_of(label)
            .ok_or_else(|| Error::UnknownLabel(label.to_string()))
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get_index(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 由带标签的边构建图描述
    ///
    /// `vertices` 中的标签先按顺序编号，即使没有出现在任何边上也会分配顶点。
    pub fn describe<S: AsRef<str>>(
        edges: &[LabeledEdge],
        vertices: &[S],
    ) -> (GraphDescription, Self) {
        let mut map = Self::new();
        for label in vertices {
            map.intern(label.as_ref());
        }

        let mut raw_edges = Vec::with_capacity(edges.len());
        for edge in edges {
            let u = map.intern(&edge.from) as i64;
            let v = map.intern(&edge.to) as i64;
            let mut raw = vec![u, v];
            raw.extend(edge.weight);
            raw_edges.push(Some(raw));
        }

        let desc = GraphDescription {
            vertex_count: map.len(),
            edges: raw_edges,
        };
        (desc, map)
    }
}
