pub mod epub;

// === 核心API重新导出 ===

/// EPUB容器（压缩包适配）
pub use epub::EpubArchive;

/// 错误处理
pub use epub::{EpubError, Result};

// === 数据结构 ===

/// 书籍基本信息
pub use epub::BookInfo;

/// 脊柱条目与导航结果
pub use epub::{NavEntry, Navigation, SpineEntry};

// === 底层组件（高级用法） ===

/// 工作目录组件
pub use epub::{copy_folder, Workspace};

/// 配置组件
pub use epub::{ConversionConfig, SpineSource};

/// OPF组件
pub use epub::{resolve_spine, ManifestItem, Opf};

/// NCX组件
pub use epub::{resolve_navigation, Ncx};

// === 库信息 ===

/// epubweb库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// epubweb库的描述
pub const DESCRIPTION: &str = "一个将EPUB解析为有序网页序列的Rust库";

// === 便捷函数 ===

/// 快速打开EPUB容器
///
/// 这是 `EpubArchive::open` 的便捷包装函数。
///
/// # 参数
/// * `path` - EPUB文件路径
///
/// # 返回值
/// * `Result<EpubArchive>` - 容器实例
pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<EpubArchive> {
    EpubArchive::open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    /// 创建一个完整的测试EPUB：包文档、导航文档和两个章节
    fn create_test_epub(path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut zip = ZipWriter::new(file);

        zip.start_file("mimetype", FileOptions::<()>::default())?;
        zip.write_all(b"application/epub+zip")?;

        zip.start_file("OEBPS/content.opf", FileOptions::<()>::default())?;
        let opf_xml = r#"<?xml version="1.0"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0">
    <manifest>
        <item id="p1" href="ch1.html" media-type="application/xhtml+xml"/>
        <item id="p2" href="ch2.html" media-type="application/xhtml+xml"/>
    </manifest>
    <spine>
        <itemref idref="p1"/>
        <itemref idref="p2"/>
    </spine>
</package>"#;
        zip.write_all(opf_xml.as_bytes())?;

        zip.start_file("OEBPS/toc.ncx", FileOptions::<()>::default())?;
        // 第一个导航点的src带有多余的URL片段，需要靠路径修复纠正
        let ncx_xml = r#"<?xml version="1.0"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
    <docTitle><text>端到端测试书</text></docTitle>
    <docAuthor><text>测试作者</text></docAuthor>
    <navMap>
        <navPoint id="n1" playOrder="1">
            <navLabel><text>第一章</text></navLabel>
            <content src="ch1.html#frag"/>
        </navPoint>
        <navPoint id="n2" playOrder="2">
            <navLabel><text>第二章</text></navLabel>
            <content src="ch2.html"/>
        </navPoint>
    </navMap>
</ncx>"#;
        zip.write_all(ncx_xml.as_bytes())?;

        zip.start_file("OEBPS/ch1.html", FileOptions::<()>::default())?;
        zip.write_all(b"<html><body><h1>ch1</h1></body></html>")?;

        zip.start_file("OEBPS/ch2.html", FileOptions::<()>::default())?;
        zip.write_all(b"<html><body><h1>ch2</h1></body></html>")?;

        zip.finish()?;
        Ok(())
    }

    #[test]
    fn test_end_to_end_spine_and_navigation() {
        let dir = TempDir::new().unwrap();
        let epub_path = dir.path().join("book.epub");
        create_test_epub(&epub_path).unwrap();

        // 提取容器
        let mut archive = open(&epub_path).unwrap();
        let workspace = Workspace::create(dir.path().join("book")).unwrap();
        archive.extract_all(workspace.root()).unwrap();

        // OPF：脊柱顺序与文档顺序一致，标识即路径
        let opf_path = workspace.package_document().unwrap();
        let spine = resolve_spine(&opf_path).unwrap();
        assert_eq!(spine.len(), 2);
        assert_eq!(spine[0], SpineEntry::from_href("ch1.html".to_string()));
        assert_eq!(spine[1], SpineEntry::from_href("ch2.html".to_string()));

        // NCX：目录条目修复后指向磁盘上实际存在的文件
        let ncx_path = workspace.navigation_document().unwrap();
        let ncx_content = fs::read_to_string(&ncx_path).unwrap();
        let base_dir = ncx_path.parent().unwrap();
        let navigation = resolve_navigation(&ncx_content, base_dir).unwrap();

        assert_eq!(navigation.info.title, "端到端测试书");
        assert_eq!(navigation.info.author, "测试作者");
        assert_eq!(navigation.entries.len(), 2);
        assert_eq!(navigation.entries[0].label, "第一章");
        assert_eq!(navigation.entries[0].path, "ch1.html");
        assert_eq!(navigation.entries[1].path, "ch2.html");
    }
}
