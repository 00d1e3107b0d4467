//! graph-toolkit 命令行工具
//!
//! 从文件或标准输入读取 JSON 请求，运行一个算法并输出结果

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use graph_toolkit::cli::{execute, execute_labeled, read_input, Operation, PrintMode, Printer};
use graph_toolkit::{Metrics, Toolkit, ToolkitConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "graph-toolkit")]
#[command(about = "图算法工具包命令行工具", version)]
struct Args {
    /// 配置文件路径（JSON）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: Format,

    /// 请求使用字符串标签表示顶点（`{"from", "to", "weight"}` 形式的边）
    #[arg(long, global = true)]
    labeled: bool,

    /// 结束时输出指标（Prometheus 格式，写到 stderr）
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Vertical,
    Json,
}

impl From<Format> for PrintMode {
    fn from(format: Format) -> Self {
        match format {
            Format::Table => PrintMode::Table,
            Format::Vertical => PrintMode::Vertical,
            Format::Json => PrintMode::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 计算桥与割点
    Bridges {
        /// 请求文件，省略或为 - 时读标准输入
        input: Option<PathBuf>,
    },
    /// Johnson 全源最短路径
    ShortestPaths {
        /// 请求文件，省略或为 - 时读标准输入
        input: Option<PathBuf>,
    },
    /// Edmonds-Karp 最大流
    MaxFlow {
        /// 请求文件，省略或为 - 时读标准输入
        input: Option<PathBuf>,
    },
    /// 冲突调度
    Schedule {
        /// 请求文件，省略或为 - 时读标准输入
        input: Option<PathBuf>,
    },
}

impl Command {
    fn split(self) -> (Operation, Option<PathBuf>) {
        match self {
            Command::Bridges { input } => (Operation::CriticalConnections, input),
            Command::ShortestPaths { input } => (Operation::ShortestPaths, input),
            Command::MaxFlow { input } => (Operation::MaxFlow, input),
            Command::Schedule { input } => (Operation::Schedule, input),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ToolkitConfig::load_or_default(args.config.as_deref())
        .context("加载配置失败")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("无效的日志过滤器")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let metrics = Arc::new(Metrics::new());
    let toolkit = Toolkit::new(config).with_observer(metrics.clone());
    let printer = Printer::new(args.format.into());

    let (operation, input) = args.command.split();
    let request = read_input(input.as_deref()).context("读取请求失败")?;

    let outcome = if args.labeled {
        execute_labeled(&toolkit, operation, &request, &printer)
    } else {
        execute(&toolkit, operation, &request, &printer)
    };

    if args.metrics {
        eprint!("{}", metrics.to_prometheus().content);
    }

    match outcome {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} [{:?}] {}", "错误:".red().bold(), e.kind(), e);
            std::process::exit(1);
        }
    }
}
