//! NCX导航数据结构定义
//!
//! 定义NCX文件解析产出的中间条目、书籍信息和最终导航结果。

use crate::epub::spine::SpineEntry;

/// 书籍基本信息，来自NCX的docTitle/docAuthor
///
/// 两个字段都是可选的，缺失时保持空字符串，不影响解析。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookInfo {
    /// 书名
    pub title: String,
    /// 作者
    pub author: String,
}

impl BookInfo {
    /// 创建新的书籍信息
    pub fn new(title: String, author: String) -> Self {
        Self { title, author }
    }
}

/// 扁平化导航树得到的未验证条目
///
/// 路径可能带有多余的尾部字符（如URL片段），
/// 在路径修复阶段被纠正或丢弃后才会成为脊柱条目。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    /// 标签文本，navLabel缺少text节点时为None
    pub title: Option<String>,
    /// content元素的原始src值
    pub src: String,
}

impl NavEntry {
    /// 创建新的导航条目
    pub fn new(title: Option<String>, src: String) -> Self {
        Self { title, src }
    }

    /// 条目的显示标题，标签文本为空时退回到路径本身
    pub fn display_title(&self) -> &str {
        match &self.title {
            Some(text) if !text.is_empty() => text,
            _ => &self.src,
        }
    }
}

/// 导航解析的最终结果
///
/// 条目保持文档中出现的相对顺序；被丢弃的条目不留空位。
#[derive(Debug, Clone)]
pub struct Navigation {
    /// 按顺序排列的目录条目
    pub entries: Vec<SpineEntry>,
    /// 书籍基本信息
    pub info: BookInfo,
    /// 解析与修复过程中收集的诊断信息
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_info_defaults_to_empty() {
        let info = BookInfo::default();
        assert_eq!(info.title, "");
        assert_eq!(info.author, "");
    }

    #[test]
    fn test_display_title_falls_back_to_src() {
        let entry = NavEntry::new(Some(String::new()), "ch1.html".to_string());
        assert_eq!(entry.display_title(), "ch1.html");

        let titled = NavEntry::new(Some("第一章".to_string()), "ch1.html".to_string());
        assert_eq!(titled.display_title(), "第一章");
    }
}
