//! 工作目录模块
//!
//! 管理一本书提取后的文件树：枚举文件、按扩展名定位包文档和
//! 导航文档、复制资源目录。工作目录始终是显式传入的，
//! 不依赖进程的当前目录。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::epub::error::{EpubError, Result};
use crate::epub::paths;

/// 一本书的提取工作目录
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// 创建（或复用）一个工作目录
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Workspace> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Workspace { root })
    }

    /// 工作目录的根路径
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 枚举工作目录下的所有文件
    ///
    /// 使用显式栈迭代遍历，返回以`/`分隔的相对路径，
    /// 排序后保证结果顺序确定。
    ///
    /// # 返回值
    /// * `Result<Vec<String>>` - 相对路径列表
    pub fn list_files(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();

                if entry.file_type()?.is_dir() {
                    pending.push(path);
                } else if let Ok(relative) = path.strip_prefix(&self.root) {
                    let name = relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    files.push(name);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// 定位包文档(第一个.opf文件)
    pub fn package_document(&self) -> Result<PathBuf> {
        self.document_by_extension("opf")
    }

    /// 定位导航文档(第一个.ncx文件)
    pub fn navigation_document(&self) -> Result<PathBuf> {
        self.document_by_extension("ncx")
    }

    /// 按扩展名定位文档，META-INF下的条目不参与查找
    fn document_by_extension(&self, extension: &str) -> Result<PathBuf> {
        let files: Vec<String> = self
            .list_files()?
            .into_iter()
            .filter(|f| !paths::has_prefix(f, "META-INF/"))
            .collect();

        match paths::find_first_by_extension(&files, extension) {
            Some(name) => Ok(self.root.join(name)),
            None => Err(EpubError::DocumentNotFound {
                extension: format!(".{}", extension),
            }),
        }
    }

    /// 删除整个工作目录
    pub fn cleanup(self) -> Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }
}

/// 把一个目录及其全部内容复制到目标目录
///
/// 使用显式栈迭代遍历，病态深的目录树不会耗尽调用栈。
/// 每层目录内按文件名排序，复制顺序确定。
///
/// # 参数
/// * `origin` - 源目录
/// * `destination` - 目标目录，不存在时自动创建
///
/// # 返回值
/// * `Result<Vec<PathBuf>>` - 创建的目标路径列表，目标目录本身在最前
pub fn copy_folder(origin: &Path, destination: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(destination)?;

    let mut created = vec![destination.to_path_buf()];
    let mut pending = vec![(origin.to_path_buf(), destination.to_path_buf())];

    while let Some((src_dir, dst_dir)) = pending.pop() {
        let mut entries = fs::read_dir(&src_dir)?.collect::<io::Result<Vec<_>>>()?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let src = entry.path();
            let dst = dst_dir.join(entry.file_name());
            let file_type = entry.file_type()?;

            if file_type.is_dir() {
                fs::create_dir_all(&dst)?;
                created.push(dst.clone());
                pending.push((src, dst));
            } else if file_type.is_file() {
                fs::copy(&src, &dst)?;
                created.push(dst);
            }
        }
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// 搭建一个典型的提取后目录结构
    fn fixture_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("OEBPS/text")).unwrap();
        fs::create_dir_all(root.join("META-INF")).unwrap();
        fs::write(root.join("mimetype"), "application/epub+zip").unwrap();
        fs::write(root.join("META-INF/container.xml"), "<container/>").unwrap();
        fs::write(root.join("OEBPS/content.opf"), "<package/>").unwrap();
        fs::write(root.join("OEBPS/toc.ncx"), "<ncx/>").unwrap();
        fs::write(root.join("OEBPS/text/ch1.html"), "<html/>").unwrap();
        dir
    }

    #[test]
    fn test_list_files_is_relative_and_sorted() {
        let dir = fixture_tree();
        let workspace = Workspace::create(dir.path()).unwrap();

        let files = workspace.list_files().unwrap();
        assert_eq!(
            files,
            vec![
                "META-INF/container.xml".to_string(),
                "OEBPS/content.opf".to_string(),
                "OEBPS/text/ch1.html".to_string(),
                "OEBPS/toc.ncx".to_string(),
                "mimetype".to_string(),
            ]
        );
    }

    #[test]
    fn test_locate_documents_by_extension() {
        let dir = fixture_tree();
        let workspace = Workspace::create(dir.path()).unwrap();

        assert_eq!(
            workspace.package_document().unwrap(),
            dir.path().join("OEBPS/content.opf")
        );
        assert_eq!(
            workspace.navigation_document().unwrap(),
            dir.path().join("OEBPS/toc.ncx")
        );
    }

    #[test]
    fn test_missing_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("readme.txt"), "no opf here").unwrap();
        let workspace = Workspace::create(dir.path()).unwrap();

        match workspace.package_document() {
            Err(EpubError::DocumentNotFound { extension }) => assert_eq!(extension, ".opf"),
            other => panic!("期望DocumentNotFound错误，得到: {:?}", other),
        }
    }

    #[test]
    fn test_copy_folder_returns_created_paths() {
        let dir = TempDir::new().unwrap();
        let origin = dir.path().join("origin");
        fs::create_dir_all(origin.join("img")).unwrap();
        fs::write(origin.join("style.css"), "body{}").unwrap();
        fs::write(origin.join("img/cover.png"), [0u8; 4]).unwrap();

        let destination = dir.path().join("out");
        let created = copy_folder(&origin, &destination).unwrap();

        // 目标目录本身在最前，其余为复制出的条目
        assert_eq!(created[0], destination);
        assert_eq!(created.len(), 4);
        assert!(destination.join("style.css").is_file());
        assert!(destination.join("img/cover.png").is_file());
    }

    #[test]
    fn test_cleanup_removes_tree() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("book");
        let workspace = Workspace::create(&root).unwrap();
        fs::write(root.join("leftover.html"), "<html/>").unwrap();

        workspace.cleanup().unwrap();
        assert!(!root.exists());
    }
}
