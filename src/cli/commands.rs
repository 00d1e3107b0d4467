//! 命令执行
//!
//! 每个命令读取一个 JSON 请求，运行一个组件并渲染结果

use super::printer::Printer;
use crate::error::Result;
use crate::toolkit::Toolkit;
use crate::types::{
    GraphRequest, LabeledGraphRequest, LabeledMaxFlowRequest, MaxFlowRequest, ScheduleRequest,
};
use std::io::Read;
use std::path::Path;
use std::time::Instant;

/// 可执行的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// 桥与割点
    CriticalConnections,
    /// 全源最短路径
    ShortestPaths,
    /// 最大流
    MaxFlow,
    /// 冲突调度
    Schedule,
}

/// 读取请求：路径为空或为 `-` 时读标准输入
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// 执行操作并返回渲染后的输出
pub fn execute(
    toolkit: &Toolkit,
    operation: Operation,
    input: &str,
    printer: &Printer,
) -> Result<String> {
    let start = Instant::now();
    let elapsed_ms = |start: Instant| start.elapsed().as_millis() as u64;

    match operation {
        Operation::CriticalConnections => {
            let request: GraphRequest = serde_json::from_str(input)?;
            let result = toolkit.critical_connections(&request)?;
            printer.critical_connections(&result, elapsed_ms(start))
        }
        Operation::ShortestPaths => {
            let request: GraphRequest = serde_json::from_str(input)?;
            let result = toolkit.shortest_paths(&request)?;
            printer.shortest_paths(&result, elapsed_ms(start))
        }
        Operation::MaxFlow => {
            let request: MaxFlowRequest = serde_json::from_str(input)?;
            let result = toolkit.max_flow(&request)?;
            printer.max_flow(&result, elapsed_ms(start))
        }
        Operation::Schedule => {
            let request: ScheduleRequest = serde_json::from_str(input)?;
            let result = toolkit.schedule(&request)?;
            printer.schedule(&result, elapsed_ms(start))
        }
    }
}

/// 执行带标签的请求，输出中的顶点显示为标签
pub fn execute_labeled(
    toolkit: &Toolkit,
    operation: Operation,
    input: &str,
    printer: &Printer,
) -> Result<String> {
    let start = Instant::now();
    let elapsed_ms = |start: Instant| start.elapsed().as_millis() as u64;

    match operation {
        Operation::CriticalConnections => {
            let request: LabeledGraphRequest = serde_json::from_str(input)?;
            let (request, labels) = request.describe();
            let result = toolkit.critical_connections(&request)?;
            let printer = printer.clone().with_labels(labels);
            printer.critical_connections(&result, elapsed_ms(start))
        }
        Operation::ShortestPaths => {
            let request: LabeledGraphRequest = serde_json::from_str(input)?;
            let (request, labels) = request.describe();
            let result = toolkit.shortest_paths(&request)?;
            let printer = printer.clone().with_labels(labels);
            printer.shortest_paths(&result, elapsed_ms(start))
        }
        Operation::MaxFlow => {
            let request: LabeledMaxFlowRequest = serde_json::from_str(input)?;
            let (request, labels) = request.resolve()?;
            let result = toolkit.max_flow(&request)?;
            let printer = printer.clone().with_labels(labels);
            printer.max_flow(&result, elapsed_ms(start))
        }
        Operation::Schedule => {
            let request: LabeledGraphRequest = serde_json::from_str(input)?;
            let (request, labels) = request.schedule();
            let result = toolkit.schedule(&request)?;
            let printer = printer.clone().with_labels(labels);
            printer.schedule(&result, elapsed_ms(start))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PrintMode;
    use crate::error::{Error, ErrorKind};
    use std::io::Write;

    #[test]
    fn test_execute_max_flow_json() {
        let input = r#"{"vertexCount": 3, "edges": [[0, 1, 4], [1, 2, 3]], "source": 0, "sink": 2}"#;
        let output = execute(
            &Toolkit::default(),
            Operation::MaxFlow,
            input,
            &Printer::new(PrintMode::Json),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value, serde_json::json!({"maxFlow": 3}));
    }

    #[test]
    fn test_execute_labeled_bridges() {
        let input = r#"{"edges": [
            {"from": "a", "to": "b"}, {"from": "b", "to": "c"},
            {"from": "c", "to": "a"}, {"from": "b", "to": "gateway"}
        ]}"#;
        let output = execute_labeled(
            &Toolkit::default(),
            Operation::CriticalConnections,
            input,
            &Printer::default(),
        )
        .unwrap();

        assert!(output.contains("b-gateway"));
        assert!(output.contains("Articulation Point"));
    }

    #[test]
    fn test_execute_labeled_unknown_sink() {
        let input = r#"{"edges": [{"from": "s", "to": "t", "weight": 2}], "source": "s", "sink": "x"}"#;
        let err = execute_labeled(
            &Toolkit::default(),
            Operation::MaxFlow,
            input,
            &Printer::default(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::UnknownLabel(_)));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_execute_labeled_schedule_json() {
        let input = r#"{"edges": [{"from": "build", "to": "deploy"}]}"#;
        let output = execute_labeled(
            &Toolkit::default(),
            Operation::Schedule,
            input,
            &Printer::new(PrintMode::Json),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["totalSlots"], serde_json::json!(2));
    }

    #[test]
    fn test_execute_bad_json() {
        let err = execute(
            &Toolkit::default(),
            Operation::Schedule,
            "{",
            &Printer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"taskCount": 2}}"#).unwrap();

        let input = read_input(Some(file.path())).unwrap();
        assert_eq!(input, r#"{"taskCount": 2}"#);
    }
}
