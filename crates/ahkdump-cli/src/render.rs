//! 文本渲染（raw / decompile / script-like / gui-only）与 JSON 输出
use ahkdump_core::{BlockGrouper, Candidate, GroupGaps};
use serde::Serialize;

/// 渲染参数（来自命令行）
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub with_offsets: bool,
    pub group: bool,
    pub sections: bool,
    pub gaps: GroupGaps,
}

/// JSON 输出结构
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub file: &'a str,
    pub count: usize,
    pub strings: &'a [Candidate],
}

const RULE: &str = "──────────────────────────────────────────────";

/// 控制字符替换为可见符号
fn escape(text: &str) -> String {
    text.replace('\r', "␍").replace('\n', "␊").replace('\t', "→")
}

pub fn render_raw(strings: &[Candidate], opts: &RenderOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    if opts.with_offsets {
        let mut header = String::from("  offset    | enc       | text");
        if opts.sections {
            header.push_str("   [section]");
        }
        lines.push(header);
        lines.push(RULE.to_string());
    }

    let mut grouper = BlockGrouper::new(opts.gaps.raw);
    for s in strings {
        let text = escape(&s.text);
        let text = text.trim_end();

        if opts.with_offsets {
            let mut line = format!("  0x{:06X}  {:<9}  {}", s.offset, s.encoding.label(), text);
            if let Some(sec) = &s.section {
                line.push_str(&format!("   [{sec}]"));
            }
            lines.push(line);
            if let Some(ctx) = &s.context {
                lines.push(format!("                    ↳ {ctx}"));
            }
        } else {
            // 块之间插入空行
            if opts.group && matches!(grouper.observe(s.offset), Some(id) if id > 1) {
                lines.push(String::new());
            }
            lines.push(text.to_string());
        }
    }

    lines.join("\n")
}

pub fn render_decompile(strings: &[Candidate], opts: &RenderOptions) -> String {
    let mut lines: Vec<String> = vec![
        String::new(),
        " ╔═════════════════════════════════════════════╗".to_string(),
        " ║       AutoHotkey Decompiler Strings         ║".to_string(),
        format!("╚═════════════════════════════════════════════╝  ({} found)", strings.len()),
        String::new(),
    ];

    let mut grouper = BlockGrouper::new(opts.gaps.display);
    for (i, s) in strings.iter().enumerate() {
        if opts.group {
            if let Some(id) = grouper.observe(s.offset) {
                lines.push(format!("┌─ Block #{id} ─ 0x{:06X} ───────┐", s.offset));
                lines.push(String::new());
            }
        }

        let prefix = if opts.with_offsets {
            format!("  0x{:06X} | {:<9} | ", s.offset, s.encoding.label())
        } else {
            format!("  {:3} | ", i + 1)
        };
        let mut line = prefix + &escape(&s.text);
        if let Some(sec) = &s.section {
            line.push_str(&format!("  [{sec}]"));
        }
        lines.push(line);

        if let Some(ctx) = &s.context {
            let short: String = ctx.chars().take(120).collect();
            lines.push(format!("                ↳ {short}"));
        }
    }

    lines.join("\n")
}

const STANDALONE_SUFFIXES: &[&str] = &[":", ";", "}", "{", "⇒", ")"];
const STANDALONE_PREFIXES: &[&str] = &["Gui", "Menu", "MsgBox", "InputBox", "FileSelect"];

/// 近似脚本片段：像语句的字符串单独成行，其余拼接为缩进片段
pub fn render_script_like(strings: &[Candidate]) -> String {
    let mut lines = vec!["# Approximate AHK-like fragments (heuristic)".to_string(), String::new()];
    let mut block: Vec<&str> = Vec::new();

    for s in strings {
        let t = s.text.trim();
        if t.is_empty() {
            continue;
        }
        let standalone = STANDALONE_SUFFIXES.iter().any(|x| t.ends_with(x))
            || STANDALONE_PREFIXES.iter().any(|x| t.starts_with(x));
        if standalone {
            if !block.is_empty() {
                lines.push(format!("    {}", block.join(" ")));
                block.clear();
            }
            lines.push(t.to_string());
        } else {
            block.push(t);
        }
    }
    if !block.is_empty() {
        lines.push(format!("    {}", block.join(" ")));
    }

    lines.join("\n")
}

pub fn render_gui_only(strings: &[Candidate]) -> String {
    strings
        .iter()
        .map(|s| format!("• {}", s.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(file: &str, strings: &[Candidate]) -> serde_json::Result<String> {
    let report = JsonReport { file, count: strings.len(), strings };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahkdump_core::Encoding;

    fn cand(text: &str, offset: usize) -> Candidate {
        Candidate { text: text.into(), encoding: Encoding::Narrow, offset, length: text.len(), section: None, context: None }
    }

    #[test]
    fn raw_groups_with_blank_lines() {
        let list = vec![cand("first", 0), cand("second", 100), cand("third", 5000)];
        let opts = RenderOptions { group: true, ..Default::default() };
        assert_eq!(render_raw(&list, &opts), "first\nsecond\n\nthird");
    }

    #[test]
    fn raw_blank_line_only_between_blocks() {
        // 单块输出不含空行；多块时空行只出现在块与块之间，不在开头或首行之后
        let one = vec![cand("solo-a", 0), cand("solo-b", 10)];
        let opts = RenderOptions { group: true, ..Default::default() };
        assert_eq!(render_raw(&one, &opts), "solo-a\nsolo-b");

        let three = vec![cand("a1", 0), cand("b1", 1000), cand("b2", 1010), cand("c1", 2000)];
        let out = render_raw(&three, &opts);
        assert_eq!(out, "a1\n\nb1\nb2\n\nc1");
        assert!(!out.starts_with('\n'));
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn raw_with_offsets_and_sections() {
        let mut c = cand("line\tone\r\n", 0x1234);
        c.section = Some(".rdata".into());
        let opts = RenderOptions { with_offsets: true, sections: true, ..Default::default() };
        let out = render_raw(&[c], &opts);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "  offset    | enc       | text   [section]");
        assert_eq!(lines[2], "  0x001234  ascii/utf8  line→one␍␊   [.rdata]");
    }

    #[test]
    fn decompile_blocks_use_display_gap() {
        let list = vec![cand("alpha", 100), cand("beta!", 800)];
        let opts = RenderOptions { group: true, ..Default::default() };
        let out = render_decompile(&list, &opts);
        assert!(out.contains("(2 found)"));
        let banner: Vec<&str> = out.lines().take(5).collect();
        assert_eq!(banner[0], "");
        assert!(banner[1].starts_with(" ╔"));
        assert!(banner[2].starts_with(" ║"));
        assert_eq!(banner[3], "╚═════════════════════════════════════════════╝  (2 found)");
        assert_eq!(banner[4], "");
        assert!(out.contains("┌─ Block #1 ─ 0x000064 ───────┐"));
        assert!(out.contains("┌─ Block #2 ─ 0x000320 ───────┐"));
        assert!(out.contains("    1 | alpha"));
        assert!(out.contains("    2 | beta!"));
    }

    #[test]
    fn decompile_truncates_context() {
        let mut c = cand("alpha", 0);
        c.context = Some("x".repeat(180));
        let out = render_decompile(&[c], &RenderOptions::default());
        let ctx_line = out.lines().last().unwrap();
        assert_eq!(ctx_line.trim_start().trim_start_matches("↳ ").len(), 120);
    }

    #[test]
    fn script_like_joins_fragments() {
        let list = vec![
            cand("Gui, Add, Text", 0),
            cand("hello", 10),
            cand("world", 20),
            cand("Label1:", 30),
            cand("   ", 40),
            cand("tail", 50),
        ];
        let out = render_script_like(&list);
        let expected = "# Approximate AHK-like fragments (heuristic)\n\nGui, Add, Text\n    hello world\nLabel1:\n    tail";
        assert_eq!(out, expected);
    }

    #[test]
    fn gui_only_bullets() {
        assert_eq!(render_gui_only(&[cand("OK", 0), cand("Cancel", 4)]), "• OK\n• Cancel");
    }

    #[test]
    fn json_omits_absent_fields() {
        let mut c = cand("hello", 7);
        c.section = Some(".data".into());
        let out = render_json("a.exe", &[c]).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["file"], "a.exe");
        assert_eq!(v["count"], 1);
        let s = &v["strings"][0];
        assert_eq!(s["text"], "hello");
        assert_eq!(s["enc"], "ascii/utf8");
        assert_eq!(s["offset"], 7);
        assert_eq!(s["len"], 5);
        assert_eq!(s["section"], ".data");
        assert!(s.get("context").is_none());
    }
}
