//! 配置文件加载（TOML）
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::options::ExtractOptions;

/// 配置文件结构；所有字段可选，缺省时沿用内置默认值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub min: Option<usize>,
    #[serde(default)]
    pub max: Option<usize>,
    #[serde(default)]
    pub display_gap: Option<usize>,
    #[serde(default)]
    pub raw_gap: Option<usize>,
    #[serde(default)]
    pub context_bytes: Option<usize>,
    /// 替换默认 GUI 关键字集合
    #[serde(default)]
    pub gui_keywords: Option<Vec<String>>,
}

impl FileConfig {
    pub fn from_toml_str(txt: &str) -> Result<Self> {
        Ok(toml::from_str(txt)?)
    }

    /// 将文件中的取值覆盖到选项上（关键字统一转为小写）
    pub fn apply(&self, opts: &mut ExtractOptions) {
        if let Some(v) = self.min { opts.min_len = v; }
        if let Some(v) = self.max { opts.max_len = v; }
        if let Some(v) = self.display_gap { opts.gaps.display = v; }
        if let Some(v) = self.raw_gap { opts.gaps.raw = v; }
        if let Some(v) = self.context_bytes { opts.context_half_width = v; }
        if let Some(kw) = &self.gui_keywords {
            opts.gui_keywords = kw
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
        }
    }
}

/// 读取并解析配置文件
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let txt = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    FileConfig::from_toml_str(&txt).with_context(|| format!("parse config {}", path.display()))
}
