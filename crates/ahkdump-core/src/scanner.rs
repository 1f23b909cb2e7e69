//! 字节级运行段扫描（窄字符 / 宽字符两种宽度）
//!
//! 显式状态机实现，不依赖正则：
//! - 每个字节位置都可能成为运行段起点（宽字符可从奇数偏移开始）；
//! - 对每个对齐通道记录“已知过短区间”的终点，保证每个单元在每个通道内最多检查一次；
//! - 命中后从运行段末尾继续扫描（不重叠）。
use crate::types::Encoding;

/// 单个运行段：`[start, end)` 为字节区间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub end: usize,
    pub encoding: Encoding,
}

impl Run {
    /// 运行段长度（解码单元数）
    pub fn units(&self) -> usize {
        (self.end - self.start) / self.encoding.width()
    }

    pub fn bytes<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.start..self.end]
    }
}

/// 窄字符判定：可打印 ASCII（0x20..=0x7E）
#[inline]
pub fn is_narrow_printable(b: u8) -> bool {
    (0x20..=0x7E).contains(&b)
}

/// 宽字符判定：低字节为可打印 ASCII 或 Latin-1 扩展（0xA0..=0xFF），高字节必须为 0
#[inline]
pub fn is_wide_printable(lo: u8, hi: u8) -> bool {
    hi == 0 && (is_narrow_printable(lo) || lo >= 0xA0)
}

/// 惰性运行段迭代器（不可重启；同一缓冲区可同时存在多个互不干扰的实例）
pub struct RunIter<'a> {
    buf: &'a [u8],
    encoding: Encoding,
    min_units: usize,
    pos: usize,
    /// 每个对齐通道（pos % width）内：小于该值的起点都不可能形成足够长的运行段
    short_until: [usize; 2],
}

/// 在 `buf` 上按给定编码扫描长度不小于 `min_units` 的最大运行段
pub fn scan_runs(buf: &[u8], encoding: Encoding, min_units: usize) -> RunIter<'_> {
    RunIter { buf, encoding, min_units: min_units.max(1), pos: 0, short_until: [0; 2] }
}

impl RunIter<'_> {
    #[inline]
    fn unit_ok(&self, at: usize) -> bool {
        match self.encoding {
            Encoding::Narrow => is_narrow_printable(self.buf[at]),
            Encoding::WideLe => is_wide_printable(self.buf[at], self.buf[at + 1]),
        }
    }

    /// 从 `at` 开始连续满足判定的单元数
    fn units_from(&self, at: usize) -> usize {
        let width = self.encoding.width();
        let mut n = 0;
        let mut i = at;
        while i + width <= self.buf.len() && self.unit_ok(i) {
            n += 1;
            i += width;
        }
        n
    }
}

impl Iterator for RunIter<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let width = self.encoding.width();
        while self.pos + width <= self.buf.len() {
            let at = self.pos;
            let lane = at % width;
            if at < self.short_until[lane] {
                self.pos += 1;
                continue;
            }
            let units = self.units_from(at);
            let end = at + units * width;
            if units >= self.min_units {
                self.pos = end;
                return Some(Run { start: at, end, encoding: self.encoding });
            }
            // 同一通道内 [at, end] 的起点只会得到更短的运行段（end 处单元本身不满足判定）
            self.short_until[lane] = end + width;
            self.pos += 1;
        }
        self.pos = self.buf.len();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(s: &str) -> Vec<u8> {
        s.bytes().flat_map(|b| [b, 0]).collect()
    }

    #[test]
    fn narrow_runs_respect_min_and_maximality() {
        let buf = b"\x01abc\x02hello world\x00xy\x7fLONGER";
        let runs: Vec<Run> = scan_runs(buf, Encoding::Narrow, 4).collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].bytes(buf), b"hello world");
        assert_eq!(runs[1].bytes(buf), b"LONGER");
        for r in &runs {
            assert!(r.units() >= 4);
            if r.start > 0 {
                assert!(!is_narrow_printable(buf[r.start - 1]));
            }
            if r.end < buf.len() {
                assert!(!is_narrow_printable(buf[r.end]));
            }
        }
    }

    #[test]
    fn short_runs_are_dropped_whole() {
        let buf = b"abcd\x00efgh";
        assert_eq!(scan_runs(buf, Encoding::Narrow, 5).count(), 0);
    }

    #[test]
    fn wide_run_at_odd_alignment() {
        let mut buf = vec![0xFFu8];
        buf.extend(wide("World"));
        buf.push(0x01);
        let runs: Vec<Run> = scan_runs(&buf, Encoding::WideLe, 3).collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].start, 1);
        assert_eq!(runs[0].units(), 5);
    }

    #[test]
    fn wide_accepts_latin1_high_half() {
        let buf = [b'c', 0, b'a', 0, b'f', 0, 0xE9, 0, 0x01, 0x01];
        let runs: Vec<Run> = scan_runs(&buf, Encoding::WideLe, 4).collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].units(), 4);
    }

    #[test]
    fn wide_rejects_nonzero_high_byte() {
        let buf = [b'a', 0, b'b', 0, b'c', 0x30, b'd', 0, b'e', 0];
        let runs: Vec<Run> = scan_runs(&buf, Encoding::WideLe, 3).collect();
        assert!(runs.is_empty());
    }

    #[test]
    fn runs_are_increasing_and_disjoint() {
        let mut buf = Vec::new();
        for i in 0..50u8 {
            buf.extend(wide("Button"));
            buf.extend([i, 0x90, 0x90]);
            buf.extend(b"plain text");
            buf.push(0);
        }
        for enc in [Encoding::WideLe, Encoding::Narrow] {
            let runs: Vec<Run> = scan_runs(&buf, enc, 3).collect();
            assert!(!runs.is_empty());
            for pair in runs.windows(2) {
                assert!(pair[0].end <= pair[1].start);
            }
            let again: Vec<Run> = scan_runs(&buf, enc, 3).collect();
            assert_eq!(runs, again);
        }
    }

    #[test]
    fn trailing_odd_byte_is_ignored() {
        let mut buf = wide("abcde");
        buf.push(b'f');
        let runs: Vec<Run> = scan_runs(&buf, Encoding::WideLe, 5).collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].end, 10);
    }
}
