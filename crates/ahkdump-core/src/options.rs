//! 提取选项与统计信息（模块）

/// 默认最小长度（字符）
pub const DEFAULT_MIN_LEN: usize = 5;
/// 默认最大长度（字符）
pub const DEFAULT_MAX_LEN: usize = 600;

/// 默认 GUI 关键字（控件 / 对话框词汇）
pub const DEFAULT_GUI_KEYWORDS: &[&str] = &[
    "gui", "add", "show", "msgbox", "inputbox", "file", "select", "folder",
    "button", "edit", "text", "checkbox", "radio", "groupbox", "dropdownlist",
    "combobox", "listbox", "listview", "treeview", "statusbar", "tab", "monthcal",
    "slider", "progress", "hotkey", "datetime", "updown", "picture", "font", "color",
];

/// 分块阈值：两种渲染风格各自独立的偏移间隔
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupGaps {
    /// decompile 风格的块标题
    pub display: usize,
    /// raw 风格的空行分隔
    pub raw: usize,
}

impl Default for GroupGaps {
    fn default() -> Self {
        Self { display: 350, raw: 600 }
    }
}

/// 提取选项
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// 最小长度（去除首尾空白后的字符数）
    pub min_len: usize,
    /// 最大长度（宽字符为字符数，窄字符为字节数）
    pub max_len: usize,
    /// 按文本去重（保留首次出现）
    pub dedup: bool,
    /// 仅保留 GUI 相关字符串
    pub gui_only: bool,
    /// 尝试解析 PE 节表并标注节名
    pub sections: bool,
    /// 上下文窗口半宽（字节）；0 表示关闭
    pub context_half_width: usize,
    pub gaps: GroupGaps,
    /// GUI 过滤关键字（小写）
    pub gui_keywords: Vec<String>,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
            dedup: false,
            gui_only: false,
            sections: false,
            context_half_width: 0,
            gaps: GroupGaps::default(),
            gui_keywords: DEFAULT_GUI_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            threads: Some(1),
        }
    }
}

/// 提取统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractStats {
    pub bytes_scanned: usize,
    pub wide_runs: usize,
    pub narrow_runs: usize,
    pub candidates_built: usize,
    pub dropped_duplicates: usize,
    pub dropped_non_gui: usize,
    pub candidates_kept: usize,
}
