//! 章节文本提取模块
//!
//! 把已解析出的章节文档转换为纯文本，供命令行预览使用。
//! 只做标签剥离和空白归并，不做任何渲染。

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    // 选择器是静态字面量，解析不会失败
    Selector::parse("body").expect("body选择器解析失败")
});

/// 从HTML文档中提取纯文本
///
/// 优先处理body元素，没有body时处理整个文档。
/// 块级文本之间以换行分隔，连续空行被压缩。
///
/// # 参数
/// * `html` - 章节文档的HTML内容
///
/// # 返回值
/// * `String` - 纯文本内容
pub fn extract_plain_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let raw = match document.select(&BODY_SELECTOR).next() {
        Some(body) => collect_text(body),
        None => document
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" "),
    };

    normalize_whitespace(&raw)
}

/// 收集元素内的文本，段落间补换行
fn collect_text(element: ElementRef) -> String {
    let mut result = String::new();

    for text in element.text() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !result.is_empty() {
            result.push('\n');
        }
        result.push_str(trimmed);
    }

    result
}

/// 压缩连续的空白行
fn normalize_whitespace(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            // 最多保留一个空行
            if lines.last().is_some_and(|l| l.is_empty()) {
                continue;
            }
            lines.push("");
        } else {
            lines.push(trimmed);
        }
    }

    lines.join("\n").trim().to_string()
}
