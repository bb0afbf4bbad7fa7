//! 路径工具模块
//!
//! 提供解析EPUB内部相对路径所需的纯函数，供OPF/NCX解析器
//! 以及页面生成阶段的链接重写使用。所有路径都使用`/`分隔。

/// 计算从一个文档指向另一个文档的相对路径
///
/// 两个参数都是以`/`分隔的压缩包内部路径。算法先去掉两条路径
/// 共同的前缀目录（即两条路径的分叉点），再根据源文件剩余的
/// 目录层数决定需要多少个`../`。
///
/// # 参数
/// * `from` - 链接所在文档的路径
/// * `to` - 链接目标文件的路径
///
/// # 返回值
/// * `String` - 可直接写入超链接的相对路径
pub fn relative_path(from: &str, to: &str) -> String {
    let mut from_parts: Vec<&str> = from.split('/').collect();
    let mut to_parts: Vec<&str> = to.split('/').collect();

    // 逐段去掉公共前缀，源路径只剩文件名时停止
    while from_parts.len() > 1 {
        if !to_parts.is_empty() && from_parts[0] == to_parts[0] {
            from_parts.remove(0);
            to_parts.remove(0);
        } else {
            break;
        }
    }

    let mut relative = String::new();

    // 目标位于源文件目录的上层：每多一层目录补一个"../"
    if from_parts.len() > 1 {
        for _ in 0..from_parts.len() - 1 {
            relative.push_str("../");
        }
    }

    // 目标是同级或下级：直接拼接剩余的目标路径段
    relative.push_str(&to_parts.join("/"));
    relative
}

/// 如果字符串以指定后缀结尾则去掉该后缀，否则原样返回
///
/// 用于清理诸如模板化的id后缀、文件名中的固定结尾等。
pub fn trim_suffix<'a>(s: &'a str, suffix: &str) -> &'a str {
    s.strip_suffix(suffix).unwrap_or(s)
}

/// 在路径列表中查找第一个具有指定扩展名的路径
///
/// 扩展名比较不区分大小写，传入的扩展名可以带或不带前导点。
///
/// # 参数
/// * `paths` - 按顺序遍历的路径列表
/// * `extension` - 目标扩展名，如`"opf"`或`".ncx"`
///
/// # 返回值
/// * `Option<&str>` - 第一个匹配的路径，没有匹配时返回None
pub fn find_first_by_extension<'a>(paths: &'a [String], extension: &str) -> Option<&'a str> {
    let wanted = if extension.starts_with('.') {
        extension.to_lowercase()
    } else {
        format!(".{}", extension.to_lowercase())
    };

    paths.iter().map(|p| p.as_str()).find(|p| {
        // 扩展名只看最后一个路径段，目录名中的点不算
        let name = p.rsplit('/').next().unwrap_or(p);
        match name.rfind('.') {
            Some(pos) => name[pos..].eq_ignore_ascii_case(&wanted),
            None => false,
        }
    })
}

/// 逐字符的前缀判断
///
/// 前缀比待测字符串长时返回false，不会越界。
pub fn has_prefix(s: &str, prefix: &str) -> bool {
    let s_bytes = s.as_bytes();
    let prefix_bytes = prefix.as_bytes();

    if prefix_bytes.len() > s_bytes.len() {
        return false;
    }

    for index in 0..prefix_bytes.len() {
        if s_bytes[index] != prefix_bytes[index] {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_descendant() {
        // 目标在源文件目录的子目录中
        assert_eq!(relative_path("/a/b/c.html", "/a/b/img/x.png"), "img/x.png");
    }

    #[test]
    fn test_relative_path_above() {
        // 目标在源文件目录的上层
        assert_eq!(relative_path("/a/b/c/d.html", "/a/x.png"), "../../x.png");
    }

    #[test]
    fn test_relative_path_sibling() {
        assert_eq!(relative_path("text/ch1.html", "text/ch2.html"), "ch2.html");
    }

    #[test]
    fn test_trim_suffix() {
        assert_eq!(trim_suffix("book.epub", ".epub"), "book");
        assert_eq!(trim_suffix("book.epub", ".zip"), "book.epub");
        assert_eq!(trim_suffix("chapter_id", "_id"), "chapter");
    }

    #[test]
    fn test_find_first_by_extension() {
        let paths = vec![
            "x.html".to_string(),
            "y.ncx".to_string(),
            "z.opf".to_string(),
        ];

        assert_eq!(find_first_by_extension(&paths, "opf"), Some("z.opf"));
        assert_eq!(find_first_by_extension(&paths, ".ncx"), Some("y.ncx"));
        assert_eq!(find_first_by_extension(&paths, "pdf"), None);
    }

    #[test]
    fn test_find_first_by_extension_case_insensitive() {
        let paths = vec!["OEBPS/Content.OPF".to_string()];
        assert_eq!(
            find_first_by_extension(&paths, "opf"),
            Some("OEBPS/Content.OPF")
        );
    }

    #[test]
    fn test_find_first_by_extension_ignores_directory_dots() {
        // 目录名带点时不应误判为扩展名
        let paths = vec!["v1.0/readme".to_string(), "v1.0/toc.ncx".to_string()];
        assert_eq!(find_first_by_extension(&paths, "ncx"), Some("v1.0/toc.ncx"));
    }

    #[test]
    fn test_find_first_returns_first_match() {
        let paths = vec![
            "a/first.opf".to_string(),
            "b/second.opf".to_string(),
        ];
        assert_eq!(find_first_by_extension(&paths, "opf"), Some("a/first.opf"));
    }

    #[test]
    fn test_has_prefix() {
        assert!(has_prefix("OEBPS/text/ch1.html", "OEBPS/"));
        assert!(!has_prefix("OEBPS/text/ch1.html", "META-INF/"));
    }

    #[test]
    fn test_has_prefix_longer_than_input() {
        // 前缀比字符串长时必须返回false而不是越界
        assert!(!has_prefix("ab", "abc"));
        assert!(!has_prefix("", "a"));
    }
}
