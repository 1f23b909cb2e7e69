//! 按偏移间隔分块（渲染期计算，不写回候选）
use crate::types::Candidate;

/// 块编号，从 1 开始单调递增
pub type BlockId = usize;

/// 流式分块器：依次喂入（已过滤的）候选偏移
#[derive(Debug, Clone)]
pub struct BlockGrouper {
    gap: usize,
    prev: Option<usize>,
    current: BlockId,
}

impl BlockGrouper {
    pub fn new(gap: usize) -> Self {
        Self { gap, prev: None, current: 0 }
    }

    /// 若该偏移开启了新块，返回新块编号
    pub fn observe(&mut self, offset: usize) -> Option<BlockId> {
        let starts = match self.prev {
            None => true,
            Some(prev) => offset.saturating_sub(prev) > self.gap,
        };
        self.prev = Some(offset);
        if starts {
            self.current += 1;
            Some(self.current)
        } else {
            None
        }
    }

    /// 当前所在块编号（尚未喂入任何偏移时为 0）
    pub fn current(&self) -> BlockId {
        self.current
    }
}

/// 为每个候选计算所属块编号
pub fn assign_blocks(candidates: &[Candidate], gap: usize) -> Vec<BlockId> {
    let mut grouper = BlockGrouper::new(gap);
    candidates
        .iter()
        .map(|c| {
            grouper.observe(c.offset);
            grouper.current()
        })
        .collect()
}
