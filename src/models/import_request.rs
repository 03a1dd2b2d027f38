//! 导入请求与链接规范化
//!
//! 原始输入是多行文本，每行一个链接。规范化规则：
//! 1. 按行切分（兼容 `\r\n`）
//! 2. 去掉首尾空白，丢弃空行
//! 3. 按首次出现顺序去重

use std::collections::HashSet;

/// 一次批量导入的链接列表
///
/// 创建后不可修改：链接两两不同、非空，并保持首次出现的顺序。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportRequest {
    links: Vec<String>,
    duplicates_removed: usize,
}

impl ImportRequest {
    /// 待导入的链接
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// 规范化时去掉的重复链接数量
    pub fn duplicates_removed(&self) -> usize {
        self.duplicates_removed
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// 重新拼成每行一个链接的文本
    pub fn to_raw_text(&self) -> String {
        self.links.join("\n")
    }
}

/// 将原始文本规范化为导入请求
pub fn normalize(raw_text: &str) -> ImportRequest {
    let mut seen = HashSet::new();
    let mut links = Vec::new();
    let mut non_empty = 0;

    for line in raw_text.split('\n') {
        let link = line.trim();
        if link.is_empty() {
            continue;
        }
        non_empty += 1;
        if seen.insert(link) {
            links.push(link.to_string());
        }
    }

    ImportRequest {
        duplicates_removed: non_empty - links.len(),
        links,
    }
}
