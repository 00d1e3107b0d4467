//! graph-toolkit - 图算法工具包
//!
//! 为外部服务提供无状态、同步的图算法：
//! - 关键连接分析（桥与割点）
//! - Johnson 全源最短路径（允许负权）
//! - Edmonds-Karp 最大流
//! - 冲突图贪心着色调度
//!
//! 调用方提供图描述，调用一个组件，得到结构化结果或带类型的错误。

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod toolkit;
pub mod types;

// 重导出常用类型
pub use algorithm::{
    AllPairsShortestPaths, ConflictScheduler, CriticalConnectionAnalyzer, CriticalConnections,
    EdmondsKarp, FlowNetwork, Johnson, MaxFlow, Schedule, UNREACHABLE,
};
pub use config::{Limits, ToolkitConfig};
pub use error::{Error, ErrorKind, Result};
pub use graph::{Edge, EdgeId, Graph, GraphDescription, LabelMap, LabeledEdge};
pub use metrics::{AlgorithmKind, AlgorithmObserver, Metrics};
pub use toolkit::Toolkit;
pub use types::{
    CriticalConnectionsResponse, GraphRequest, LabeledGraphRequest, LabeledMaxFlowRequest,
    MaxFlowRequest, MaxFlowResponse, ScheduleRequest, ScheduleResponse, ShortestPathsResponse,
};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
