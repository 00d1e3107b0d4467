//! 图算法模块
//!
//! 包含关键连接分析、全源最短路径、最大流和冲突调度。
//! 各算法只依赖图模型，彼此独立。

mod critical;
mod max_flow;
mod scheduler;
mod shortest_path;

pub use critical::{Bridge, CriticalConnectionAnalyzer, CriticalConnections};
pub use max_flow::{CutEdge, EdmondsKarp, FlowAssignment, FlowNetwork, MaxFlow};
pub use scheduler::{ConflictScheduler, Schedule};
pub use shortest_path::{AllPairsShortestPaths, Johnson, UNREACHABLE};
