//! 工具包配置
//!
//! JSON 配置文件，所有字段可省略

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 输入规模上限，`None` 表示不限制
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Limits {
    pub max_vertices: Option<usize>,
    pub max_edges: Option<usize>,
}

impl Limits {
    /// 检查顶点数和边数是否超限
    pub fn check(&self, vertices: usize, edges: usize) -> Result<()> {
        if let Some(limit) = self.max_vertices.filter(|&limit| vertices > limit) {
            return Err(Error::SizeLimitExceeded {
                what: "vertices",
                actual: vertices,
                limit,
            });
        }
        if let Some(limit) = self.max_edges.filter(|&limit| edges > limit) {
            return Err(Error::SizeLimitExceeded {
                what: "edges",
                actual: edges,
                limit,
            });
        }
        Ok(())
    }
}

/// 工具包配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolkitConfig {
    /// 输入规模上限
    pub limits: Limits,
    /// 日志过滤器（`RUST_LOG` 未设置时使用）
    pub log_filter: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl ToolkitConfig {
    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("无法读取 {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("无法解析 {}: {}", path.display(), e)))
    }

    /// 加载配置：显式路径 > 用户配置目录 > 默认值
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// 默认配置文件位置
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("graph-toolkit").join("config.json"))
    }
}
