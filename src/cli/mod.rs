//! 命令行支持
//!
//! 读取 JSON 请求、调用工具包并格式化结果

mod commands;
mod printer;

pub use commands::{execute, execute_labeled, read_input, Operation};
pub use printer::{PrintMode, Printer};
