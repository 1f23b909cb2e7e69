//! 候选构建：双编码扫描 → 解码 → 长度过滤 → 按偏移稳定合并

use crate::scanner::{scan_runs, Run};
use crate::types::{Candidate, Encoding};

/// 单种编码的构建结果
#[derive(Debug, Default)]
pub(crate) struct EncodingPass {
    pub(crate) runs: usize,
    pub(crate) candidates: Vec<Candidate>,
}

/// 解码运行段（不会失败：无法表示的单元替换为 U+FFFD）
pub fn decode_run(buf: &[u8], run: &Run) -> String {
    let bytes = run.bytes(buf);
    match run.encoding {
        Encoding::WideLe => {
            let units = bytes.chunks_exact(2).map(|p| u16::from_le_bytes([p[0], p[1]]));
            char::decode_utf16(units)
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect()
        }
        Encoding::Narrow => bytes
            .iter()
            .map(|&b| if b.is_ascii() { char::from(b) } else { char::REPLACEMENT_CHARACTER })
            .collect(),
    }
}

/// 对单种编码执行扫描并构建候选
///
/// 过滤规则：
/// - 单元数超过 `max_len` 丢弃；
/// - 文本仅去除末尾 NUL 后保存；去除首尾空白后的字符数小于 `min_len` 丢弃。
pub(crate) fn build_pass(buf: &[u8], encoding: Encoding, min_len: usize, max_len: usize) -> EncodingPass {
    let mut pass = EncodingPass::default();
    for run in scan_runs(buf, encoding, min_len) {
        pass.runs += 1;
        let units = run.units();
        if units > max_len {
            continue;
        }
        let decoded = decode_run(buf, &run);
        let text = decoded.trim_end_matches('\0');
        if text.trim().chars().count() < min_len {
            continue;
        }
        pass.candidates.push(Candidate {
            text: text.to_string(),
            encoding,
            offset: run.start,
            length: units,
            section: None,
            context: None,
        });
    }
    pass
}

/// 合并宽字符与窄字符结果并按偏移稳定排序（同偏移时宽字符在前）
pub(crate) fn merge_passes(wide: Vec<Candidate>, narrow: Vec<Candidate>) -> Vec<Candidate> {
    let mut all = wide;
    all.extend(narrow);
    all.sort_by_key(|c| c.offset);
    all
}

/// 串行构建全部候选
pub fn build_candidates(buf: &[u8], min_len: usize, max_len: usize) -> Vec<Candidate> {
    let wide = build_pass(buf, Encoding::WideLe, min_len, max_len);
    let narrow = build_pass(buf, Encoding::Narrow, min_len, max_len);
    merge_passes(wide.candidates, narrow.candidates)
}
