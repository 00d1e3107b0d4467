//! 结果打印器
//!
//! 提供表格、垂直和 JSON 格式的结果输出

use crate::algorithm::{
    AllPairsShortestPaths, CriticalConnections, MaxFlow, Schedule, UNREACHABLE,
};
use crate::error::Result;
use crate::graph::LabelMap;
use crate::types::{
    CriticalConnectionsResponse, MaxFlowResponse, ScheduleResponse, ShortestPathsResponse,
};
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
    /// 边界 JSON 形状
    Json,
}

/// 结果打印器
///
/// 设置标签映射后，表格与垂直模式用标签显示顶点；JSON 模式保持下标形式。
#[derive(Debug, Clone)]
pub struct Printer {
    mode: PrintMode,
    labels: Option<LabelMap>,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode, labels: None }
    }

    pub fn with_labels(mut self, labels: LabelMap) -> Self {
        self.labels = Some(labels);
        self
    }

    /// 顶点的显示名
    fn vertex(&self, v: usize) -> String {
        self.labels
            .as_ref()
            .and_then(|labels| labels.label(v))
            .map(str::to_string)
            .unwrap_or_else(|| v.to_string())
    }

    pub fn mode(&self) -> PrintMode {
        self.mode
    }

    /// 打印关键连接
    pub fn critical_connections(
        &self,
        result: &CriticalConnections,
        elapsed_ms: u64,
    ) -> Result<String> {
        if self.mode == PrintMode::Json {
            return json(&CriticalConnectionsResponse::from(result.clone()));
        }

        let bridges: Vec<Vec<String>> = result
            .bridges
            .iter()
            .map(|b| vec![format!("{}-{}", self.vertex(b.u), self.vertex(b.v))])
            .collect();
        let points: Vec<Vec<String>> = result
            .articulation_points
            .iter()
            .map(|&v| vec![self.vertex(v)])
            .collect();

        Ok(format!(
            "{}{}",
            self.print_result(&["Bridge".to_string()], &bridges, elapsed_ms),
            self.print_result(&["Articulation Point".to_string()], &points, elapsed_ms)
        ))
    }

    /// 打印距离矩阵，不可达显示为 ∞
    pub fn shortest_paths(
        &self,
        result: &AllPairsShortestPaths,
        elapsed_ms: u64,
    ) -> Result<String> {
        if self.mode == PrintMode::Json {
            return json(&ShortestPathsResponse::from(result.clone()));
        }

        let n = result.distances.len();
        let mut columns = vec!["from \\ to".to_string()];
        columns.extend((0..n).map(|v| self.vertex(v)));

        let rows: Vec<Vec<String>> = result
            .distances
            .iter()
            .map(|(source, row)| {
                let mut cells = vec![self.vertex(*source)];
                cells.extend(row.values().map(|&d| {
                    if d == UNREACHABLE {
                        "∞".to_string()
                    } else {
                        d.to_string()
                    }
                }));
                cells
            })
            .collect();

        Ok(self.print_result(&columns, &rows, elapsed_ms))
    }

    /// 打印最大流
    pub fn max_flow(&self, result: &MaxFlow, elapsed_ms: u64) -> Result<String> {
        if self.mode == PrintMode::Json {
            return json(&MaxFlowResponse::from(result));
        }

        let mut summary = Table::new();
        summary.set_format(*format::consts::FORMAT_BOX_CHARS);
        summary.set_titles(row!["Property", "Value"]);
        summary.add_row(row!["Max Flow", result.value.to_string()]);
        summary.add_row(row!["Augmenting Paths", result.augmenting_paths.to_string()]);
        summary.add_row(row!["Min Cut Capacity", result.cut_capacity().to_string()]);
        let source_side: Vec<String> =
            result.source_side.iter().map(|&v| self.vertex(v)).collect();
        summary.add_row(row!["Source Side", source_side.join(", ")]);

        let columns = ["from".to_string(), "to".to_string(), "flow".to_string()];
        let rows: Vec<Vec<String>> = result
            .flows
            .iter()
            .map(|f| vec![self.vertex(f.from), self.vertex(f.to), f.flow.to_string()])
            .collect();

        Ok(format!(
            "{}\n{}",
            summary,
            self.print_result(&columns, &rows, elapsed_ms)
        ))
    }

    /// 打印调度结果
    pub fn schedule(&self, result: &Schedule, elapsed_ms: u64) -> Result<String> {
        if self.mode == PrintMode::Json {
            return json(&ScheduleResponse::from(result.clone()));
        }

        let columns = ["task".to_string(), "slot".to_string()];
        let rows: Vec<Vec<String>> = result
            .assignment
            .iter()
            .map(|(&task, slot)| vec![self.vertex(task), slot.to_string()])
            .collect();

        Ok(format!(
            "{}Total slots: {}\n",
            self.print_result(&columns, &rows, elapsed_ms),
            result.total_slots
        ))
    }

    /// 打印表格结果
    pub fn print_result(
        &self,
        columns: &[String],
        rows: &[Vec<String>],
        elapsed_ms: u64,
    ) -> String {
        if columns.is_empty() || rows.is_empty() {
            return format!("Empty set ({} ms)\n", elapsed_ms);
        }

        let output = match self.mode {
            PrintMode::Vertical => self.format_vertical(columns, rows),
            PrintMode::Table | PrintMode::Json => self.format_table(columns, rows),
        };

        format!("{}\n{} row(s) in set ({} ms)\n", output, rows.len(), elapsed_ms)
    }

    /// 表格格式
    fn format_table(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.chars().count()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }
}

fn json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)? + "\n")
}
