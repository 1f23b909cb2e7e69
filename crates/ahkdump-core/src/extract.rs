//! 提取主流程：构建 → 去重 → GUI 过滤 → 节名 / 上下文标注
use anyhow::Result;
use tracing::{debug, info};

use crate::builder::{build_pass, merge_passes, EncodingPass};
use crate::context::context_window;
use crate::filter::{dedup, GuiFilter};
use crate::options::{ExtractOptions, ExtractStats};
use crate::sections::{NoSections, SectionIndex, SectionLookup};
use crate::types::{Candidate, Encoding};

/// 一次提取的完整结果
#[derive(Debug, Default)]
pub struct Extraction {
    /// 按偏移升序的候选列表
    pub candidates: Vec<Candidate>,
    pub stats: ExtractStats,
    /// 非致命诊断信息（例如节表解析失败）
    pub diagnostics: Vec<String>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// 对缓冲区执行完整提取
///
/// 若 `opts.sections` 为真则尝试解析 PE 节表；失败时记录一条诊断并降级为无节信息。
pub fn extract(buf: &[u8], opts: &ExtractOptions) -> Result<Extraction> {
    let mut diagnostics = Vec::new();
    let index = if opts.sections {
        match SectionIndex::from_pe(buf) {
            Ok(idx) => {
                debug!(sections = idx.records().len(), "section table loaded");
                Some(idx)
            }
            Err(e) => {
                debug!(error = %e, "section info unavailable");
                diagnostics.push(e.to_string());
                None
            }
        }
    } else {
        None
    };

    let mut out = match &index {
        Some(idx) => extract_with_sections(buf, opts, idx)?,
        None => extract_with_sections(buf, opts, &NoSections)?,
    };
    diagnostics.append(&mut out.diagnostics);
    out.diagnostics = diagnostics;
    Ok(out)
}

/// 使用外部提供的节查询执行提取（不解析可执行文件头）
pub fn extract_with_sections(buf: &[u8], opts: &ExtractOptions, sections: &dyn SectionLookup) -> Result<Extraction> {
    let mut stats = ExtractStats { bytes_scanned: buf.len(), ..Default::default() };

    let (wide, narrow) = run_passes(buf, opts)?;
    stats.wide_runs = wide.runs;
    stats.narrow_runs = narrow.runs;
    let mut candidates = merge_passes(wide.candidates, narrow.candidates);
    stats.candidates_built = candidates.len();
    debug!(wide_runs = stats.wide_runs, narrow_runs = stats.narrow_runs, built = stats.candidates_built, "scan passes done");

    if opts.dedup {
        let before = candidates.len();
        candidates = dedup(candidates);
        stats.dropped_duplicates = before - candidates.len();
    }

    if opts.gui_only {
        let filter = GuiFilter::new(&opts.gui_keywords)?;
        let before = candidates.len();
        candidates = filter.retain(candidates);
        stats.dropped_non_gui = before - candidates.len();
    }

    for c in candidates.iter_mut() {
        c.section = sections.section_for(c.offset).map(str::to_string);
        if opts.context_half_width > 0 {
            c.context = Some(context_window(buf, c.offset, opts.context_half_width));
        }
    }

    stats.candidates_kept = candidates.len();
    info!(kept = stats.candidates_kept, dropped_duplicates = stats.dropped_duplicates, dropped_non_gui = stats.dropped_non_gui, "extraction finished");
    Ok(Extraction { candidates, stats, diagnostics: Vec::new() })
}

/// 执行宽字符与窄字符两次扫描：线程数 > 1 时在 Rayon 线程池内并行
fn run_passes(buf: &[u8], opts: &ExtractOptions) -> Result<(EncodingPass, EncodingPass)> {
    let (min, max) = (opts.min_len, opts.max_len);
    let threads = opts.threads.unwrap_or_else(num_cpus::get);
    if threads <= 1 {
        let wide = build_pass(buf, Encoding::WideLe, min, max);
        let narrow = build_pass(buf, Encoding::Narrow, min, max);
        return Ok((wide, narrow));
    }

    // 每次扫描覆盖整个缓冲区，无需处理分片边界
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads.min(2)).build()?;
    Ok(pool.install(|| {
        rayon::join(
            || build_pass(buf, Encoding::WideLe, min, max),
            || build_pass(buf, Encoding::Narrow, min, max),
        )
    }))
}
