//! 边定义
//!
//! 边由原始描述 `[from, to, weight?]` 解析而来

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 未声明权重/容量时使用的默认值
pub const DEFAULT_WEIGHT: i64 = 1;

/// 边 ID（即边在原始描述中的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl From<usize> for EdgeId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

/// 边
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// 边 ID
    id: EdgeId,
    /// 源顶点
    src: usize,
    /// 目标顶点
    dst: usize,
    /// 权重或容量
    weight: i64,
}

impl Edge {
    /// 创建新边
    pub fn new(id: EdgeId, src: usize, dst: usize, weight: i64) -> Self {
        Self {
            id,
            src,
            dst,
            weight,
        }
    }

    /// 从原始描述解析边
    ///
    /// 少于两个端点的边返回 `Ok(None)`；端点越界（包括负数）返回错误。
    /// 第三个元素之后的内容被忽略。
    pub fn parse(index: usize, raw: &[i64], vertex_count: usize) -> Result<Option<Self>> {
        if raw.len() < 2 {
            return Ok(None);
        }

        let src = Self::endpoint(index, raw[0], vertex_count)?;
        let dst = Self::endpoint(index, raw[1], vertex_count)?;
        let weight = raw.get(2).copied().unwrap_or(DEFAULT_WEIGHT);

        Ok(Some(Self::new(EdgeId::new(index), src, dst, weight)))
    }

    fn endpoint(index: usize, vertex: i64, vertex_count: usize) -> Result<usize> {
        usize::try_from(vertex)
            .ok()
            .filter(|&v| v < vertex_count)
            .ok_or(Error::VertexOutOfRange {
                edge: Some(index),
                vertex,
                vertex_count,
            })
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn src(&self) -> usize {
        self.src
    }

    pub fn dst(&self) -> usize {
        self.dst
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }

    pub fn is_self_loop(&self) -> bool {
        self.src == self.dst
    }

    /// 无序端点对，较小的顶点在前
    pub fn endpoints(&self) -> (usize, usize) {
        (self.src.min(self.dst), self.src.max(self.dst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_parse() {
        let edge = Edge::parse(0, &[2, 1, -7], 3).unwrap().unwrap();
        assert_eq!(edge.src(), 2);
        assert_eq!(edge.dst(), 1);
        assert_eq!(edge.weight(), -7);
        assert_eq!(edge.endpoints(), (1, 2));
        assert!(!edge.is_self_loop());
    }

    #[test]
    fn test_edge_default_weight() {
        let edge = Edge::parse(4, &[0, 0], 1).unwrap().unwrap();
        assert_eq!(edge.weight(), DEFAULT_WEIGHT);
        assert_eq!(edge.id(), EdgeId::new(4));
        assert!(edge.is_self_loop());
    }

    #[test]
    fn test_edge_missing_endpoint() {
        assert!(Edge::parse(0, &[1], 3).unwrap().is_none());
        assert!(Edge::parse(0, &[], 3).unwrap().is_none());
    }

    #[test]
    fn test_edge_out_of_range() {
        let err = Edge::parse(2, &[0, 3], 3).unwrap_err();
        assert!(matches!(
            err,
            Error::VertexOutOfRange {
                edge: Some(2),
                vertex: 3,
                vertex_count: 3
            }
        ));

        let err = Edge::parse(0, &[-1, 0], 3).unwrap_err();
        assert!(matches!(err, Error::VertexOutOfRange { vertex: -1, .. }));
    }
}
