//! 单条链接的处理上下文
//!
//! 封装"我正在处理第几条链接"这一信息

use std::fmt::Display;

/// 单条链接的处理上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCtx {
    /// 链接在批次中的位置（从1开始）
    pub index: usize,

    /// 批次中的链接总数
    pub total: usize,

    pub link: String,
}

impl ItemCtx {
    pub fn new(index: usize, total: usize, link: impl Into<String>) -> Self {
        Self {
            index,
            total,
            link: link.into(),
        }
    }
}

impl Display for ItemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[链接 {}/{}]", self.index, self.total)
    }
}
