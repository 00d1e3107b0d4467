//! 图模型模块
//!
//! 校验图描述并构建各算法共享的邻接结构

mod edge;
mod graph;
mod labels;

pub use edge::{Edge, EdgeId, DEFAULT_WEIGHT};
pub use graph::{Graph, GraphDescription};
pub use labels::{LabelMap, LabeledEdge};
