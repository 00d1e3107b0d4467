//! 错误类型定义
//!
//! 所有组件共享同一个错误枚举，`Error::kind` 将其归入三类：
//! 输入校验错误、负权环（图本身的语义属性）以及内部错误。

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// 错误分类，供外部传输层映射为自己的失败码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 输入格式错误、缺失或越界
    Validation,
    /// Johnson 算法检测到负权环
    NegativeCycle,
    /// 未预期的内部错误
    Internal,
}

#[derive(Error, Debug)]
pub enum Error {
    /// `edge` 为出错边的下标；源点、汇点等非边上的顶点为 None
    #[error("{}顶点越界: {vertex} 不在 [0, {vertex_count}) 内", edge_prefix(.edge))]
    VertexOutOfRange {
        edge: Option<usize>,
        vertex: i64,
        vertex_count: usize,
    },

    #[error("未知的顶点标签: {0}")]
    UnknownLabel(String),

    #[error("图为空")]
    EmptyGraph,

    #[error("容量矩阵不是方阵: 第 {row} 行长度为 {len}, 期望 {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("负容量: {from} -> {to} 容量为 {capacity}")]
    NegativeCapacity { from: usize, to: usize, capacity: i64 },

    #[error("容量总和超出 i64 范围")]
    CapacityOverflow,

    #[error("顶点 {vertex} 处的距离超出可表示范围 (绝对值须小于 {limit})")]
    DistanceOverflow { vertex: usize, limit: i64 },

    #[error("输入规模超出限制: {what} = {actual}, 上限 {limit}")]
    SizeLimitExceeded {
        what: &'static str,
        actual: usize,
        limit: usize,
    },

    #[error("图中存在负权环 (经过顶点 {vertex})")]
    NegativeCycle { vertex: usize },

    #[error("第 {index} 条边为空")]
    MalformedEdge { index: usize },

    #[error("{context}")]
    Analysis {
        context: String,
        #[source]
        source: Box<Error>,
    },

    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// 错误分类
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NegativeCycle { .. } => ErrorKind::NegativeCycle,
            Error::Analysis { .. } | Error::MalformedEdge { .. } => ErrorKind::Internal,
            Error::VertexOutOfRange { .. }
            | Error::UnknownLabel(_)
            | Error::CapacityOverflow
            | Error::DistanceOverflow { .. }
            | Error::EmptyGraph
            | Error::NonSquareMatrix { .. }
            | Error::NegativeCapacity { .. }
            | Error::SizeLimitExceeded { .. }
            | Error::Config(_)
            | Error::Io(_)
            | Error::Serialization(_) => ErrorKind::Validation,
        }
    }

    /// 为错误附加上下文，原始错误保留为 source
    pub fn context(self, context: impl Into<String>) -> Self {
        Error::Analysis {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

fn edge_prefix(edge: &Option<usize>) -> String {
    edge.map(|e| format!("第 {} 条边的", e)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::EmptyGraph.kind(), ErrorKind::Validation);
        assert_eq!(
            Error::NegativeCycle { vertex: 1 }.kind(),
            ErrorKind::NegativeCycle
        );
        assert_eq!(
            Error::MalformedEdge { index: 0 }.kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_vertex_out_of_range_message() {
        let on_edge = Error::VertexOutOfRange {
            edge: Some(2),
            vertex: 7,
            vertex_count: 3,
        };
        assert_eq!(on_edge.to_string(), "第 2 条边的顶点越界: 7 不在 [0, 3) 内");

        let endpoint = Error::VertexOutOfRange {
            edge: None,
            vertex: 7,
            vertex_count: 3,
        };
        assert_eq!(endpoint.to_string(), "顶点越界: 7 不在 [0, 3) 内");
        assert_eq!(endpoint.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_overflow_is_validation() {
        assert_eq!(Error::CapacityOverflow.kind(), ErrorKind::Validation);
        let err = Error::DistanceOverflow {
            vertex: 1,
            limit: i64::MAX / 2,
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_context_preserves_source() {
        let err = Error::MalformedEdge { index: 3 }.context("关键连接分析失败");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.to_string(), "关键连接分析失败");

        let source = err.source().expect("source should be preserved");
        assert_eq!(source.to_string(), "第 3 条边为空");
    }
}
