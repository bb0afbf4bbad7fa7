//! 脊柱模块
//!
//! 提供书籍线性阅读顺序（脊柱）中单个条目的结构定义。
//! 脊柱条目有两种来源：OPF的itemref序列（标签就是路径本身）
//! 和NCX的导航点序列（标签是人类可读的章节标题）。
//! 两种来源的顺序可能不一致，调用方只能选择其中一种，不做合并。

/// 脊柱条目(阅读顺序中的一个文档)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpineEntry {
    /// 标识或标题(OPF来源为路径本身，NCX来源为章节标题)
    pub label: String,
    /// 压缩包内部的文档路径
    pub path: String,
}

impl SpineEntry {
    /// 从OPF清单路径创建脊柱条目，标签与路径相同
    pub fn from_href(href: String) -> Self {
        Self {
            label: href.clone(),
            path: href,
        }
    }

    /// 从NCX导航点创建带标题的脊柱条目
    pub fn titled(title: String, path: String) -> Self {
        Self { label: title, path }
    }
}
