//! 候选周围的原始字节上下文
/// 窗口向后额外延伸的字节数
pub const CONTEXT_SPAN: usize = 200;
/// 展示宽度（字符）
pub const CONTEXT_DISPLAY_CHARS: usize = 180;

/// 截取 `[offset - k, offset + 200 + k)` 并做有损解码，CR/LF 替换为可见符号
pub fn context_window(buf: &[u8], offset: usize, half_width: usize) -> String {
    let start = offset.saturating_sub(half_width).min(buf.len());
    let end = offset
        .saturating_add(CONTEXT_SPAN)
        .saturating_add(half_width)
        .min(buf.len());
    String::from_utf8_lossy(&buf[start..end])
        .chars()
        .map(|ch| match ch {
            '\r' => '␍',
            '\n' => '␊',
            other => other,
        })
        .take(CONTEXT_DISPLAY_CHARS)
        .collect()
}
