//! 后处理过滤：去重 + GUI 内容过滤（均保持原有偏移顺序）
use std::collections::HashSet;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use regex::Regex;

use crate::types::Candidate;

/// 按文本去重：每个文本只保留首次出现（不区分编码与偏移）
pub fn dedup(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen: HashSet<String> = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.text.clone()))
        .collect()
}

/// GUI 相关性过滤器（启发式）：
/// - 小写文本包含任一关键字（AC 自动机）；
/// - 或包含“大写字母 + 至少三个小写字母”的片段。
pub struct GuiFilter {
    keywords: Option<AhoCorasick>,
    capitalized: Regex,
}

impl GuiFilter {
    pub fn new<I, S>(keywords: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        // 空关键字集合时只剩大写单词启发式
        let keywords = if patterns.is_empty() {
            None
        } else {
            Some(
                AhoCorasickBuilder::new()
                    .match_kind(MatchKind::LeftmostFirst)
                    .build(&patterns)?,
            )
        };
        let capitalized = Regex::new(r"[A-Z][a-z]{3,}")?;
        Ok(Self { keywords, capitalized })
    }

    pub fn is_gui(&self, text: &str) -> bool {
        if let Some(ac) = &self.keywords {
            if ac.is_match(&text.to_lowercase()) {
                return true;
            }
        }
        self.capitalized.is_match(text)
    }

    pub fn retain(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.into_iter().filter(|c| self.is_gui(&c.text)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DEFAULT_GUI_KEYWORDS;
    use crate::types::Encoding;

    fn cand(text: &str, offset: usize, encoding: Encoding) -> Candidate {
        Candidate { text: text.into(), encoding, offset, length: text.len(), section: None, context: None }
    }

    #[test]
    fn dedup_keeps_first_occurrence_across_encodings() {
        let list = vec![
            cand("MsgBox Hello", 10, Encoding::WideLe),
            cand("other", 20, Encoding::Narrow),
            cand("MsgBox Hello", 30, Encoding::Narrow),
        ];
        let out = dedup(list);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].offset, 10);
        assert_eq!(out[1].text, "other");
    }

    #[test]
    fn dedup_is_idempotent() {
        let list = vec![
            cand("aaaaa", 1, Encoding::Narrow),
            cand("bbbbb", 2, Encoding::Narrow),
            cand("aaaaa", 3, Encoding::WideLe),
            cand("bbbbb", 4, Encoding::Narrow),
        ];
        let once = dedup(list);
        let twice = dedup(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn gui_filter_scenarios() {
        let f = GuiFilter::new(DEFAULT_GUI_KEYWORDS).unwrap();
        assert!(f.is_gui("ClickButton"));
        assert!(!f.is_gui("the quick thing"));
        assert!(f.is_gui("some CHECKBOX label"));
        assert!(f.is_gui("Gui, Add, Edit"));
        assert!(!f.is_gui("ABCD efgh"));
    }

    #[test]
    fn capitalized_heuristic_needs_three_lowercase() {
        let f = GuiFilter::new(Vec::<String>::new()).unwrap();
        assert!(!f.is_gui("Xyz zz"));
        assert!(f.is_gui("zz Wxyz"));
    }

    #[test]
    fn retain_preserves_order() {
        let f = GuiFilter::new(DEFAULT_GUI_KEYWORDS).unwrap();
        let list = vec![
            cand("Window one", 5, Encoding::Narrow),
            cand("zzzzz", 6, Encoding::Narrow),
            cand("msgbox", 7, Encoding::Narrow),
        ];
        let out = f.retain(list);
        let offsets: Vec<usize> = out.iter().map(|c| c.offset).collect();
        assert_eq!(offsets, vec![5, 7]);
    }
}
