//! 冲突调度
//!
//! 在冲突图上做顺序贪心着色：按任务下标升序，为每个任务分配
//! 相邻任务尚未占用的最小时间槽。
//!
//! 这是启发式策略，不求最小色数：保证冲突任务不共享时间槽，
//! 使用的槽数不超过 Δ+1（Δ 为最大冲突度），但结果依赖处理顺序。

use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// 调度结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// 任务下标 -> 时间槽下标
    pub assignment: BTreeMap<usize, usize>,
    /// 使用的时间槽总数
    pub total_slots: usize,
    /// 最大冲突度 Δ
    pub max_degree: usize,
}

impl Schedule {
    /// 按时间槽分组的任务列表
    pub fn slots(&self) -> Vec<Vec<usize>> {
        let mut slots = vec![Vec::new(); self.total_slots];
        for (&task, &slot) in &self.assignment {
            slots[slot].push(task);
        }
        slots
    }

    pub fn slot_of(&self, task: usize) -> Option<usize> {
        self.assignment.get(&task).copied()
    }
}

/// 冲突调度器
pub struct ConflictScheduler<'a> {
    graph: &'a Graph,
}

impl<'a> ConflictScheduler<'a> {
    /// 图的顶点为任务，边为冲突关系（按无向处理）
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// 贪心分配时间槽
    pub fn schedule(&self) -> Schedule {
        let n = self.graph.vertex_count();

        // 冲突关系对称，重复冲突合并
        let conflicts: Vec<BTreeSet<usize>> = self
            .graph
            .undirected_adjacency()
            .into_iter()
            .map(|neighbors| neighbors.into_iter().map(|(v, _)| v).collect())
            .collect();
        let max_degree = conflicts.iter().map(BTreeSet::len).max().unwrap_or(0);

        let mut slots: Vec<Option<usize>> = vec![None; n];
        for task in 0..n {
            let taken: BTreeSet<usize> = conflicts[task]
                .iter()
                .filter_map(|&other| slots[other])
                .collect();
            let slot = (0..).find(|s| !taken.contains(s)).unwrap_or(0);
            slots[task] = Some(slot);
        }

        let assignment: BTreeMap<usize, usize> = slots
            .into_iter()
            .enumerate()
            .filter_map(|(task, slot)| slot.map(|s| (task, s)))
            .collect();
        let total_slots = assignment.values().collect::<BTreeSet<_>>().len();

        debug!(tasks = n, total_slots, max_degree, "调度完成");

        Schedule {
            assignment,
            total_slots,
            max_degree,
        }
    }
}
