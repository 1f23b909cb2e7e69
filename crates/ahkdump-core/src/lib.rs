//! 核心提取库
//!
//! 设计要点：
//! - 输入为整个文件的字节缓冲区，本库不做文件读写（配置文件除外）。
//! - 宽字符（UTF-16LE）与窄字符（ASCII）两次独立扫描，合并后按偏移稳定排序。
//! - 去重与 GUI 过滤均保持偏移顺序；分块编号只在渲染期计算。
//! - 节名查询为可插拔接口，PE 头解析失败时降级为无节信息。

mod builder;
mod config;
mod context;
mod detect;
mod extract;
mod filter;
mod group;
mod options;
mod scanner;
mod sections;
mod types;

pub use builder::{build_candidates, decode_run};
pub use config::{load_config, FileConfig};
pub use context::{context_window, CONTEXT_DISPLAY_CHARS, CONTEXT_SPAN};
pub use detect::{count_wide_units, detect_build, BuildHint};
pub use extract::{extract, extract_with_sections, Extraction};
pub use filter::{dedup, GuiFilter};
pub use group::{assign_blocks, BlockGrouper, BlockId};
pub use options::{ExtractOptions, ExtractStats, GroupGaps, DEFAULT_GUI_KEYWORDS, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN};
pub use scanner::{is_narrow_printable, is_wide_printable, scan_runs, Run, RunIter};
pub use sections::{NoSections, SectionError, SectionIndex, SectionLookup, SectionRecord};
pub use types::{Candidate, Encoding};
