//! 编译版本粗判（Unicode 版 vs. ANSI 版 AutoHotkey）
use crate::scanner::is_narrow_printable;

/// 粗判结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildHint {
    UnicodeHeavy,
    Mixed,
}

impl BuildHint {
    pub fn describe(self) -> &'static str {
        match self {
            BuildHint::UnicodeHeavy => "likely AHK v2 / Unicode heavy",
            BuildHint::Mixed => "likely AHK v1 / mixed encoding",
        }
    }
}

impl std::fmt::Display for BuildHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// 统计“可打印 ASCII + 0x00”字节对（从左到右、互不重叠）
pub fn count_wide_units(buf: &[u8]) -> usize {
    let mut hits = 0;
    let mut i = 0;
    while i + 1 < buf.len() {
        if is_narrow_printable(buf[i]) && buf[i + 1] == 0 {
            hits += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    hits
}

/// 宽字符单元数超过总长度的 1/35 视为 Unicode 版
pub fn detect_build(buf: &[u8]) -> BuildHint {
    if count_wide_units(buf) > buf.len() / 35 {
        BuildHint::UnicodeHeavy
    } else {
        BuildHint::Mixed
    }
}
