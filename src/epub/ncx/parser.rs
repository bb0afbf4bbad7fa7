//! NCX解析器模块
//!
//! 提供NCX（Navigation Control file for XML）导航文档的XML解析功能：
//! 读取书籍信息，把任意深度的导航点扁平化为有序的标签/内容对，
//! 并对照实际提取出的文件树修复路径。

use crate::epub::error::{EpubError, Result};
use crate::epub::ncx::navigation::{BookInfo, NavEntry, Navigation};
use crate::epub::spine::SpineEntry;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::path::Path;

/// NCX导航文档的标准命名空间
pub const NCX_NAMESPACE: &str = "http://www.daisy.org/z3986/2005/ncx/";

/// NCX文件解析结果
///
/// 条目尚未对照文件树验证，需经`resolve`修复路径后才能使用。
#[derive(Debug, Clone)]
pub struct Ncx {
    /// 根元素声明的命名空间
    pub namespace: String,
    /// 书籍基本信息
    pub info: BookInfo,
    /// 按文档顺序排列的未验证条目
    pub entries: Vec<NavEntry>,
    /// 解析过程中收集的诊断信息
    pub warnings: Vec<String>,
}

impl Ncx {
    /// 解析NCX文件内容
    ///
    /// navMap下任意深度的navLabel和content都会按文档顺序收集，
    /// 两者按位置配对。数量不一致说明目录结构不可信，
    /// 作为结构性错误返回；单个条目缺少src或标签文本则跳过该条目
    /// 并记录诊断信息。
    ///
    /// # 参数
    /// * `xml_content` - NCX文件的XML内容
    ///
    /// # 返回值
    /// * `Result<Ncx>` - 解析后的NCX信息
    pub fn parse_xml(xml_content: &str) -> Result<Ncx> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().expand_empty_elements = true;

        let mut namespace = NCX_NAMESPACE.to_string();
        let mut warnings = Vec::new();

        let mut doc_title: Option<String> = None;
        let mut doc_author: Option<String> = None;

        // navMap下按文档顺序收集的标签文本和src引用
        let mut labels: Vec<Option<String>> = Vec::new();
        let mut contents: Vec<Option<String>> = Vec::new();

        let mut buf = Vec::new();
        let mut current_section = String::new();
        let mut in_nav_label = false;
        let mut text_content = String::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let local_name_bytes = e.local_name();
                    let local_name = String::from_utf8_lossy(local_name_bytes.as_ref());

                    match local_name.as_ref() {
                        "ncx" => {
                            namespace = Self::parse_ncx_namespace(e, &mut warnings)?;
                        }
                        "docTitle" => {
                            current_section = "docTitle".to_string();
                        }
                        "docAuthor" => {
                            current_section = "docAuthor".to_string();
                        }
                        "navMap" => {
                            current_section = "navMap".to_string();
                        }
                        "navLabel" if current_section == "navMap" => {
                            // 先占位，text结束时再回填标签文本
                            labels.push(None);
                            in_nav_label = true;
                        }
                        "content" if current_section == "navMap" => {
                            contents.push(Self::parse_content_src(e)?);
                        }
                        _ => {}
                    }
                    text_content.clear();
                }
                Event::End(ref e) => {
                    let local_name_bytes = e.local_name();
                    let local_name = String::from_utf8_lossy(local_name_bytes.as_ref());

                    match local_name.as_ref() {
                        "docTitle" | "docAuthor" | "navMap" => {
                            current_section.clear();
                        }
                        "navLabel" if current_section == "navMap" => {
                            in_nav_label = false;
                        }
                        "text" => match current_section.as_str() {
                            "docTitle" => {
                                doc_title = Some(text_content.trim().to_string());
                            }
                            "docAuthor" => {
                                doc_author = Some(text_content.trim().to_string());
                            }
                            "navMap" if in_nav_label => {
                                if let Some(label) = labels.last_mut() {
                                    *label = Some(text_content.trim().to_string());
                                }
                            }
                            _ => {}
                        },
                        _ => {}
                    }
                }
                Event::Text(e) => {
                    text_content.push_str(&e.unescape()?);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        // 书名和作者各自可选，缺失只记录诊断不中断
        if doc_title.is_none() {
            warnings.push("无法读取书名。".to_string());
        }
        if doc_author.is_none() {
            warnings.push("无法读取作者。".to_string());
        }
        let info = BookInfo::new(
            doc_title.unwrap_or_default(),
            doc_author.unwrap_or_default(),
        );

        // 结构不变量：标签与内容数量必须一致，否则目录不可信
        if labels.len() != contents.len() {
            return Err(EpubError::NavCountMismatch {
                labels: labels.len(),
                contents: contents.len(),
            });
        }

        // 按位置配对，单个条目提取失败时跳过并继续
        let mut entries = Vec::with_capacity(labels.len());
        for (index, (label, content)) in labels.into_iter().zip(contents).enumerate() {
            let Some(src) = content else {
                warnings.push(format!("第{}个导航点缺少src属性，该条目已跳过。", index + 1));
                continue;
            };
            if label.is_none() {
                warnings.push(format!("第{}个导航点缺少标签文本，该条目已跳过。", index + 1));
                continue;
            }
            entries.push(NavEntry::new(label, src));
        }

        Ok(Ncx {
            namespace,
            info,
            entries,
            warnings,
        })
    }

    /// 解析ncx根元素声明的命名空间
    ///
    /// NCX的命名空间是标准化的常量；声明了别的命名空间时
    /// 按声明值继续解析并记录一条诊断信息。
    fn parse_ncx_namespace(e: &BytesStart, warnings: &mut Vec<String>) -> Result<String> {
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            if attr.key.as_ref() == b"xmlns" {
                let declared = String::from_utf8_lossy(&attr.value).to_string();
                if declared != NCX_NAMESPACE {
                    warnings.push(format!("导航文档声明了非标准命名空间: {}", declared));
                }
                return Ok(declared);
            }
        }
        Ok(NCX_NAMESPACE.to_string())
    }

    /// 解析content元素的src属性，缺失时返回None
    fn parse_content_src(e: &BytesStart) -> Result<Option<String>> {
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            if attr.key.local_name().as_ref() == b"src" {
                return Ok(Some(String::from_utf8_lossy(&attr.value).to_string()));
            }
        }
        Ok(None)
    }

    /// 对照实际文件树修复条目路径并产出最终导航结果
    ///
    /// 部分EPUB会在路径末尾附加多余字符（URL片段、杂散标点）。
    /// 修复方法：路径在`base_dir`下不存在时，从末尾逐字符去掉再试，
    /// 一旦存在立即停止；去空仍不存在的条目被丢弃并记录原始src。
    ///
    /// # 参数
    /// * `base_dir` - 导航文档所在的绝对目录
    ///
    /// # 返回值
    /// * `Navigation` - 修复后的有序目录、书籍信息与诊断列表
    pub fn resolve(&self, base_dir: &Path) -> Navigation {
        let mut entries = Vec::new();
        let mut warnings = self.warnings.clone();

        for item in &self.entries {
            let mut path = item.src.clone();

            // 从最长候选开始，失败才缩短，保证停在最长的有效前缀
            while !path.is_empty() && !base_dir.join(&path).exists() {
                path.pop();
            }

            if path.is_empty() {
                warnings.push(format!("{} 文件出现错误，该条目不会出现在目录中。", item.src));
            } else {
                entries.push(SpineEntry::titled(item.display_title().to_string(), path));
            }
        }

        Navigation {
            entries,
            info: self.info.clone(),
            warnings,
        }
    }
}

/// 从NCX文档内容解析目录的便捷入口
///
/// # 参数
/// * `content` - NCX文件的XML内容
/// * `base_dir` - 导航文档所在的绝对目录，用于验证修复后的路径
///
/// # 返回值
/// * `Result<Navigation>` - 修复后的目录与书籍信息；
///   XML格式错误或标签/内容数量不一致时失败
pub fn resolve_navigation<P: AsRef<Path>>(content: &str, base_dir: P) -> Result<Navigation> {
    let ncx = Ncx::parse_xml(content).map_err(|e| match e {
        EpubError::XmlError(xml_err) => {
            EpubError::NcxParseError(format!("XML解析错误: {}", xml_err))
        }
        other => other,
    })?;
    Ok(ncx.resolve(base_dir.as_ref()))
}
