//! 压缩包适配模块
//!
//! 把EPUB容器(zip)完整提取到工作目录，保持内部相对路径。
//! 解析器只消费提取后的目录树，不直接接触压缩包。

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

use crate::epub::error::{EpubError, Result};

/// EPUB容器的标准mimetype内容
const EPUB_MIMETYPE: &str = "application/epub+zip";

/// 表示一个待提取的EPUB容器
pub struct EpubArchive {
    archive: ZipArchive<File>,
}

impl EpubArchive {
    /// 打开一个EPUB容器
    ///
    /// mimetype条目存在但内容不对时判定为非EPUB文件；
    /// 条目缺失则容忍，产出可用脊柱不需要完整的格式校验。
    ///
    /// # 参数
    /// * `path` - epub文件的路径
    ///
    /// # 返回值
    /// * `Result<EpubArchive>` - 成功返回容器实例，失败返回错误
    pub fn open<P: AsRef<Path>>(path: P) -> Result<EpubArchive> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file)?;

        let mut epub = EpubArchive { archive };
        epub.check_mimetype()?;

        Ok(epub)
    }

    /// 宽松的mimetype检查
    fn check_mimetype(&mut self) -> Result<()> {
        match self.archive.by_name("mimetype") {
            Ok(mut file) => {
                let mut content = String::new();
                file.read_to_string(&mut content)?;

                let content = content.trim();
                if content != EPUB_MIMETYPE {
                    return Err(EpubError::InvalidMimetype {
                        expected: EPUB_MIMETYPE.to_string(),
                        found: content.to_string(),
                    });
                }
                Ok(())
            }
            // mimetype缺失不视为致命
            Err(zip::result::ZipError::FileNotFound) => Ok(()),
            Err(e) => Err(EpubError::Zip(e)),
        }
    }

    /// 容器内的条目数量
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// 容器是否为空
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// 列出容器中的所有条目名称
    pub fn list_entries(&mut self) -> Result<Vec<String>> {
        let mut entries = Vec::new();

        for i in 0..self.archive.len() {
            let file = self.archive.by_index(i)?;
            entries.push(file.name().to_string());
        }

        Ok(entries)
    }

    /// 把容器的全部条目提取到目标目录
    ///
    /// 每个条目保持其内部相对路径；路径越出目标目录的条目被忽略。
    ///
    /// # 参数
    /// * `destination` - 提取的目标目录，不存在时自动创建
    ///
    /// # 返回值
    /// * `Result<Vec<PathBuf>>` - 实际写入的文件和目录路径
    pub fn extract_all(&mut self, destination: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(destination)?;
        let mut created = Vec::new();

        for i in 0..self.archive.len() {
            let mut entry = self.archive.by_index(i)?;
            let Some(relative) = entry.enclosed_name() else {
                continue;
            };
            let target = destination.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut out = File::create(&target)?;
                io::copy(&mut entry, &mut out)?;
            }

            created.push(target);
        }

        Ok(created)
    }
}
