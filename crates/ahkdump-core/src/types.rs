//! 公共类型（对外暴露）
use serde::Serialize;

/// 文本编码：宽字符（UTF-16LE）或窄字符（ASCII）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Encoding {
    #[serde(rename = "utf-16le")]
    WideLe,
    #[serde(rename = "ascii/utf8")]
    Narrow,
}

impl Encoding {
    /// 对应的扫描宽度（字节）
    pub fn width(self) -> usize {
        match self {
            Encoding::WideLe => 2,
            Encoding::Narrow => 1,
        }
    }

    /// 展示用标签（与 JSON 中的 `enc` 一致）
    pub fn label(self) -> &'static str {
        match self {
            Encoding::WideLe => "utf-16le",
            Encoding::Narrow => "ascii/utf8",
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 候选字符串（提取结果的基本单位）
///
/// `(offset, encoding)` 唯一标识一个候选；同一偏移可分别出现一次宽字符与一次窄字符结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// 解码后的文本（仅去除末尾 NUL，不去除空白）
    pub text: String,
    #[serde(rename = "enc")]
    pub encoding: Encoding,
    /// 运行段首字节在缓冲区中的偏移
    pub offset: usize,
    /// 宽字符为字符数，窄字符为字节数
    #[serde(rename = "len")]
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}
