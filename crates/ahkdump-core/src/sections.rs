//! 偏移 → 节名查询
//!
//! - `SectionLookup`：抽象查询接口，构建流程只依赖该接口；
//! - `SectionIndex`：由节记录构建（可选从 PE 头解析，基于 goblin）；
//! - `NoSections`：空实现，始终返回 None。
use goblin::pe::PE;
use thiserror::Error;

/// 节记录：`virtual_start` 已包含映像基址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRecord {
    pub name: String,
    pub virtual_start: u64,
    pub virtual_size: u64,
}

impl SectionRecord {
    pub fn contains(&self, offset: u64) -> bool {
        offset >= self.virtual_start && offset - self.virtual_start < self.virtual_size
    }
}

/// 节信息加载失败（非致命，调用方降级为无节信息）
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("PE parse failed: {0}")]
    Parse(#[from] goblin::error::Error),
    #[error("section address overflow: image base {image_base:#x} + RVA {rva:#x}")]
    AddressOverflow { image_base: u64, rva: u32 },
}

/// 偏移到节名的查询接口
pub trait SectionLookup: Send + Sync {
    fn section_for(&self, offset: usize) -> Option<&str>;
}

/// 无节信息时使用的空实现
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSections;

impl SectionLookup for NoSections {
    fn section_for(&self, _offset: usize) -> Option<&str> {
        None
    }
}

/// 按声明顺序保存的节表；查询返回第一个包含该偏移的节
#[derive(Debug, Default, Clone)]
pub struct SectionIndex {
    records: Vec<SectionRecord>,
}

impl SectionIndex {
    pub fn new(records: Vec<SectionRecord>) -> Self {
        Self { records }
    }

    /// 从 PE 头构建节表：`virtual_start = VirtualAddress + ImageBase`
    pub fn from_pe(buf: &[u8]) -> Result<Self, SectionError> {
        let pe = PE::parse(buf)?;
        let image_base = pe
            .header
            .optional_header
            .map(|h| h.windows_fields.image_base)
            .unwrap_or(0);

        let records = pe
            .sections
            .iter()
            .map(|s| {
                let name = String::from_utf8_lossy(&s.name);
                Ok(SectionRecord {
                    name: name.trim_end_matches('\0').trim().to_string(),
                    virtual_start: section_start(image_base, s.virtual_address)?,
                    virtual_size: u64::from(s.virtual_size),
                })
            })
            .collect::<Result<Vec<_>, SectionError>>()?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[SectionRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 映像基址 + RVA；头部字段来自任意输入，溢出视为畸形头部
fn section_start(image_base: u64, rva: u32) -> Result<u64, SectionError> {
    image_base
        .checked_add(u64::from(rva))
        .ok_or(SectionError::AddressOverflow { image_base, rva })
}

impl SectionLookup for SectionIndex {
    fn section_for(&self, offset: usize) -> Option<&str> {
        let offset = offset as u64;
        self.records
            .iter()
            .find(|r| r.contains(offset))
            .map(|r| r.name.as_str())
    }
}
