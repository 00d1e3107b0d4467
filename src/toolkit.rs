//! 工具包入口
//!
//! 每个组件一个方法：构建并校验图、检查规模上限、运行算法，
//! 同时输出 tracing 事件并通知注入的观察者。

use crate::algorithm::{
    AllPairsShortestPaths, ConflictScheduler, CriticalConnectionAnalyzer, CriticalConnections,
    EdmondsKarp, FlowNetwork, Johnson, MaxFlow, Schedule,
};
use crate::config::ToolkitConfig;
use crate::error::Result;
use crate::graph::Graph;
use crate::metrics::{AlgorithmKind, AlgorithmObserver, NoopObserver};
use crate::types::{GraphRequest, MaxFlowRequest, ScheduleRequest};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span, warn};

/// 工具包
///
/// 不持有任何可变状态，可在多个线程间共享。
#[derive(Clone)]
pub struct Toolkit {
    config: ToolkitConfig,
    observer: Arc<dyn AlgorithmObserver>,
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::new(ToolkitConfig::default())
    }
}

impl Toolkit {
    pub fn new(config: ToolkitConfig) -> Self {
        Self {
            config,
            observer: Arc::new(NoopObserver),
        }
    }

    /// 设置观察者
    pub fn with_observer(mut self, observer: Arc<dyn AlgorithmObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// 桥与割点
    pub fn critical_connections(&self, request: &GraphRequest) -> Result<CriticalConnections> {
        self.run(
            AlgorithmKind::CriticalConnections,
            request.vertex_count,
            request.edges.len(),
            || {
                let graph = self.build(request)?;
                CriticalConnectionAnalyzer::new(&graph).analyze()
            },
        )
    }

    /// Johnson 全源最短路径
    pub fn shortest_paths(&self, request: &GraphRequest) -> Result<AllPairsShortestPaths> {
        self.run(
            AlgorithmKind::ShortestPaths,
            request.vertex_count,
            request.edges.len(),
            || {
                let graph = self.build(request)?;
                Johnson::new(&graph).all_pairs()
            },
        )
    }

    /// Edmonds-Karp 最大流
    pub fn max_flow(&self, request: &MaxFlowRequest) -> Result<MaxFlow> {
        let (vertices, edges) = match &request.capacity_matrix {
            Some(matrix) => (
                matrix.len(),
                matrix.iter().flatten().filter(|&&c| c != 0).count(),
            ),
            None => (request.vertex_count, request.edges.len()),
        };

        self.run(AlgorithmKind::MaxFlow, vertices, edges, || {
            let network = match &request.capacity_matrix {
                Some(matrix) => {
                    self.config.limits.check(vertices, edges)?;
                    FlowNetwork::from_matrix(matrix.clone())?
                }
                None => FlowNetwork::from_graph(&self.build(&request.graph())?)?,
            };
            EdmondsKarp::new(network).max_flow(request.source, request.sink)
        })
    }

    /// 冲突调度
    pub fn schedule(&self, request: &ScheduleRequest) -> Result<Schedule> {
        self.run(
            AlgorithmKind::Scheduling,
            request.task_count,
            request.conflicts.len(),
            || {
                let graph = self.build(&request.graph())?;
                Ok(ConflictScheduler::new(&graph).schedule())
            },
        )
    }

    fn build(&self, request: &GraphRequest) -> Result<Graph> {
        self.config
            .limits
            .check(request.vertex_count, request.edges.len())?;
        Graph::from_description(request)
    }

    fn run<T>(
        &self,
        kind: AlgorithmKind,
        vertices: usize,
        edges: usize,
        f: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let span = info_span!("algorithm", %kind, vertices, edges);
        let _guard = span.enter();

        self.observer.on_start(kind, vertices, edges);
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => info!(elapsed_us = elapsed.as_micros() as u64, "完成"),
            Err(e) => warn!(error = %e, kind = ?e.kind(), "失败"),
        }
        self.observer.on_complete(
            kind,
            elapsed,
            result.as_ref().map(|_| ()).map_err(|e| e.kind()),
        );

        result
    }
}
