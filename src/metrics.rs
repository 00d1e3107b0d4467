//! 可观测性钩子
//!
//! 调用方可注入 [`AlgorithmObserver`] 接收每次算法调用的开始与结束事件。
//! [`Metrics`] 是基于原子计数器的默认实现，可导出快照和 Prometheus 文本。
//! 不存在进程级全局实例。

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 算法种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    CriticalConnections,
    ShortestPaths,
    MaxFlow,
    Scheduling,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [
        AlgorithmKind::CriticalConnections,
        AlgorithmKind::ShortestPaths,
        AlgorithmKind::MaxFlow,
        AlgorithmKind::Scheduling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmKind::CriticalConnections => "critical_connections",
            AlgorithmKind::ShortestPaths => "shortest_paths",
            AlgorithmKind::MaxFlow => "max_flow",
            AlgorithmKind::Scheduling => "scheduling",
        }
    }

    fn index(&self) -> usize {
        match self {
            AlgorithmKind::CriticalConnections => 0,
            AlgorithmKind::ShortestPaths => 1,
            AlgorithmKind::MaxFlow => 2,
            AlgorithmKind::Scheduling => 3,
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 算法调用观察者
///
/// 所有方法都有空的默认实现。
pub trait AlgorithmObserver: Send + Sync {
    /// 输入校验通过、算法开始运行
    fn on_start(&self, _kind: AlgorithmKind, _vertices: usize, _edges: usize) {}

    /// 算法结束；`outcome` 为 `Err` 时携带错误分类
    fn on_complete(
        &self,
        _kind: AlgorithmKind,
        _elapsed: Duration,
        _outcome: std::result::Result<(), ErrorKind>,
    ) {
    }
}

/// 不做任何事的观察者
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl AlgorithmObserver for NoopObserver {}

/// 单个算法的统计
#[derive(Debug, Default)]
struct AlgorithmStats {
    /// 总调用数
    calls: AtomicU64,
    /// 成功数
    succeeded: AtomicU64,
    /// 校验失败数
    validation_errors: AtomicU64,
    /// 负权环数
    negative_cycles: AtomicU64,
    /// 内部错误数
    internal_errors: AtomicU64,
    /// 总耗时（微秒）
    total_duration_us: AtomicU64,
    /// 处理的顶点总数
    vertices: AtomicU64,
    /// 处理的边总数
    edges: AtomicU64,
}

/// 指标收集器
#[derive(Debug)]
pub struct Metrics {
    stats: [AlgorithmStats; 4],
    /// 创建时间
    start_time: Instant,
}

/// 单个算法的指标快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmSnapshot {
    pub algorithm: AlgorithmKind,
    pub calls: u64,
    pub succeeded: u64,
    pub validation_errors: u64,
    pub negative_cycles: u64,
    pub internal_errors: u64,
    pub avg_duration_ms: f64,
    pub vertices: u64,
    pub edges: u64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub algorithms: Vec<AlgorithmSnapshot>,
    pub uptime_seconds: u64,
}

impl MetricsSnapshot {
    pub fn get(&self, kind: AlgorithmKind) -> Option<&AlgorithmSnapshot> {
        self.algorithms.iter().find(|a| a.algorithm == kind)
    }
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            stats: Default::default(),
            start_time: Instant::now(),
        }
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let algorithms = AlgorithmKind::ALL
            .iter()
            .map(|&kind| {
                let stats = &self.stats[kind.index()];
                let calls = stats.calls.load(Ordering::Relaxed);
                let total_duration_us = stats.total_duration_us.load(Ordering::Relaxed);
                let completed = stats.succeeded.load(Ordering::Relaxed)
                    + stats.validation_errors.load(Ordering::Relaxed)
                    + stats.negative_cycles.load(Ordering::Relaxed)
                    + stats.internal_errors.load(Ordering::Relaxed);

                let avg_duration_ms = if completed > 0 {
                    (total_duration_us as f64) / (completed as f64) / 1000.0
                } else {
                    0.0
                };

                AlgorithmSnapshot {
                    algorithm: kind,
                    calls,
                    succeeded: stats.succeeded.load(Ordering::Relaxed),
                    validation_errors: stats.validation_errors.load(Ordering::Relaxed),
                    negative_cycles: stats.negative_cycles.load(Ordering::Relaxed),
                    internal_errors: stats.internal_errors.load(Ordering::Relaxed),
                    avg_duration_ms,
                    vertices: stats.vertices.load(Ordering::Relaxed),
                    edges: stats.edges.load(Ordering::Relaxed),
                }
            })
            .collect();

        MetricsSnapshot {
            algorithms,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();
        let mut content = String::new();

        content.push_str("# HELP graph_toolkit_calls_total Total number of algorithm calls\n");
        content.push_str("# TYPE graph_toolkit_calls_total counter\n");
        for a in &snapshot.algorithms {
            content.push_str(&format!(
                "graph_toolkit_calls_total{{algorithm=\"{}\"}} {}\n",
                a.algorithm, a.calls
            ));
        }

        content.push_str("# HELP graph_toolkit_failures_total Number of failed calls by error kind\n");
        content.push_str("# TYPE graph_toolkit_failures_total counter\n");
        for a in &snapshot.algorithms {
            for (kind, value) in [
                ("validation", a.validation_errors),
                ("negative_cycle", a.negative_cycles),
                ("internal", a.internal_errors),
            ] {
                content.push_str(&format!(
                    "graph_toolkit_failures_total{{algorithm=\"{}\",kind=\"{}\"}} {}\n",
                    a.algorithm, kind, value
                ));
            }
        }

        content.push_str("# HELP graph_toolkit_duration_avg_ms Average call duration in milliseconds\n");
        content.push_str("# TYPE graph_toolkit_duration_avg_ms gauge\n");
        for a in &snapshot.algorithms {
            content.push_str(&format!(
                "graph_toolkit_duration_avg_ms{{algorithm=\"{}\"}} {:.2}\n",
                a.algorithm, a.avg_duration_ms
            ));
        }

        content.push_str("# HELP graph_toolkit_uptime_seconds Collector uptime in seconds\n");
        content.push_str("# TYPE graph_toolkit_uptime_seconds counter\n");
        content.push_str(&format!(
            "graph_toolkit_uptime_seconds {}\n",
            snapshot.uptime_seconds
        ));

        PrometheusMetrics { content }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        for stats in &self.stats {
            stats.calls.store(0, Ordering::Relaxed);
            stats.succeeded.store(0, Ordering::Relaxed);
            stats.validation_errors.store(0, Ordering::Relaxed);
            stats.negative_cycles.store(0, Ordering::Relaxed);
            stats.internal_errors.store(0, Ordering::Relaxed);
            stats.total_duration_us.store(0, Ordering::Relaxed);
            stats.vertices.store(0, Ordering::Relaxed);
            stats.edges.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl AlgorithmObserver for Metrics {
    fn on_start(&self, kind: AlgorithmKind, vertices: usize, edges: usize) {
        let stats = &self.stats[kind.index()];
        stats.calls.fetch_add(1, Ordering::Relaxed);
        stats.vertices.fetch_add(vertices as u64, Ordering::Relaxed);
        stats.edges.fetch_add(edges as u64, Ordering::Relaxed);
    }

    fn on_complete(
        &self,
        kind: AlgorithmKind,
        elapsed: Duration,
        outcome: std::result::Result<(), ErrorKind>,
    ) {
        let stats = &self.stats[kind.index()];
        let counter = match outcome {
            Ok(()) => &stats.succeeded,
            Err(ErrorKind::Validation) => &stats.validation_errors,
            Err(ErrorKind::NegativeCycle) => &stats.negative_cycles,
            Err(ErrorKind::Internal) => &stats.internal_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        stats
            .total_duration_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();

        metrics.on_start(AlgorithmKind::MaxFlow, 6, 10);
        metrics.on_complete(AlgorithmKind::MaxFlow, Duration::from_millis(10), Ok(()));
        metrics.on_start(AlgorithmKind::ShortestPaths, 3, 3);
        metrics.on_complete(
            AlgorithmKind::ShortestPaths,
            Duration::from_millis(1),
            Err(ErrorKind::NegativeCycle),
        );

        let snapshot = metrics.snapshot();
        let max_flow = snapshot.get(AlgorithmKind::MaxFlow).unwrap();
        assert_eq!(max_flow.calls, 1);
        assert_eq!(max_flow.succeeded, 1);
        assert_eq!(max_flow.edges, 10);
        assert!(max_flow.avg_duration_ms >= 10.0);

        let shortest = snapshot.get(AlgorithmKind::ShortestPaths).unwrap();
        assert_eq!(shortest.negative_cycles, 1);
        assert_eq!(shortest.succeeded, 0);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        metrics.on_start(AlgorithmKind::Scheduling, 4, 3);

        let prom = metrics.to_prometheus();
        assert!(prom
            .content
            .contains("graph_toolkit_calls_total{algorithm=\"scheduling\"} 1"));
        assert!(prom.content.contains("graph_toolkit_failures_total"));
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.on_start(AlgorithmKind::CriticalConnections, 5, 5);
        metrics.reset();

        let snapshot = metrics.snapshot();
        assert!(snapshot.algorithms.iter().all(|a| a.calls == 0));
    }
}
