//! OPF解析器模块
//!
//! 提供OPF（Open Packaging Format）包文档的XML解析功能，
//! 从manifest/spine两个区块还原书籍的线性阅读顺序。

use crate::epub::error::{EpubError, Result};
use crate::epub::opf::manifest::ManifestItem;
use crate::epub::spine::SpineEntry;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// OPF包文档的标准命名空间
pub const OPF_NAMESPACE: &str = "http://www.idpf.org/2007/opf";

/// OPF文件解析结果
#[derive(Debug, Clone)]
pub struct Opf {
    /// 根元素声明的命名空间
    pub namespace: String,
    /// 清单：id到清单项的映射
    pub manifest: HashMap<String, ManifestItem>,
    /// 脊柱：按文档顺序排列的itemref引用
    pub spine: Vec<String>,
    /// 解析过程中收集的非致命诊断信息
    pub warnings: Vec<String>,
}

impl Opf {
    /// 读取并解析一个OPF包文档
    ///
    /// # 参数
    /// * `path` - OPF文件的绝对路径
    ///
    /// # 返回值
    /// * `Result<Opf>` - 解析后的OPF信息，XML格式错误时失败
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Opf> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_xml(&content).map_err(|e| match e {
            EpubError::XmlError(xml_err) => EpubError::OpfParseError(format!(
                "{}: {}",
                path.as_ref().display(),
                xml_err
            )),
            other => other,
        })
    }

    /// 解析OPF文件内容
    ///
    /// # 参数
    /// * `xml_content` - OPF文件的XML内容
    ///
    /// # 返回值
    /// * `Result<Opf>` - 解析后的OPF信息
    pub fn parse_xml(xml_content: &str) -> Result<Opf> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().expand_empty_elements = true;

        let mut namespace = OPF_NAMESPACE.to_string();
        let mut manifest = HashMap::new();
        let mut spine = Vec::new();
        let mut warnings = Vec::new();

        let mut buf = Vec::new();
        let mut current_section = String::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let local_name_bytes = e.local_name();
                    let local_name = String::from_utf8_lossy(local_name_bytes.as_ref());

                    match local_name.as_ref() {
                        "package" => {
                            namespace = Self::parse_package_namespace(e, &mut warnings)?;
                        }
                        "manifest" => {
                            current_section = "manifest".to_string();
                        }
                        "spine" => {
                            current_section = "spine".to_string();
                        }
                        "item" if current_section == "manifest" => {
                            Self::parse_manifest_item(e, &mut manifest)?;
                        }
                        "itemref" if current_section == "spine" => {
                            Self::parse_spine_ref(e, &mut spine)?;
                        }
                        _ => {}
                    }
                }
                Event::End(ref e) => {
                    let local_name_bytes = e.local_name();
                    if matches!(local_name_bytes.as_ref(), b"manifest" | b"spine") {
                        current_section.clear();
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(Opf {
            namespace,
            manifest,
            spine,
            warnings,
        })
    }

    /// 解析package根元素声明的命名空间
    ///
    /// OPF的命名空间是标准化的常量；文档声明了别的命名空间时
    /// 按声明值继续解析并记录一条诊断信息。
    fn parse_package_namespace(e: &BytesStart, warnings: &mut Vec<String>) -> Result<String> {
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            if attr.key.as_ref() == b"xmlns" {
                let declared = String::from_utf8_lossy(&attr.value).to_string();
                if declared != OPF_NAMESPACE {
                    warnings.push(format!("包文档声明了非标准命名空间: {}", declared));
                }
                return Ok(declared);
            }
        }
        Ok(OPF_NAMESPACE.to_string())
    }

    /// 解析清单项，缺少id或href的item直接忽略
    fn parse_manifest_item(
        e: &BytesStart,
        manifest: &mut HashMap<String, ManifestItem>,
    ) -> Result<()> {
        let mut item = ManifestItem::new(String::new(), String::new());

        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            match attr.key.local_name().as_ref() {
                b"id" => {
                    item.id = String::from_utf8_lossy(&attr.value).to_string();
                }
                b"href" => {
                    item.href = String::from_utf8_lossy(&attr.value).to_string();
                }
                _ => {}
            }
        }

        if item.is_complete() {
            manifest.insert(item.id.clone(), item);
        }

        Ok(())
    }

    /// 解析脊柱项的idref引用，保持文档顺序
    ///
    /// 缺少idref的itemref是结构性错误：阅读顺序的长度
    /// 必须与itemref数量一致，不允许静默跳过。
    fn parse_spine_ref(e: &BytesStart, spine: &mut Vec<String>) -> Result<()> {
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            if attr.key.local_name().as_ref() == b"idref" {
                spine.push(String::from_utf8_lossy(&attr.value).to_string());
                return Ok(());
            }
        }
        Err(EpubError::OpfParseError(
            "spine中存在缺少idref属性的itemref".to_string(),
        ))
    }

    /// 按脊柱顺序解析出书籍的阅读顺序
    ///
    /// 每个itemref在清单中查找对应的href；查找失败是结构性错误，
    /// 立即返回而不是跳过。输出长度与脊柱itemref数量一致，
    /// 顺序与文档中出现的顺序完全相同。
    ///
    /// # 返回值
    /// * `Result<Vec<SpineEntry>>` - 按阅读顺序排列的脊柱条目
    pub fn reading_order(&self) -> Result<Vec<SpineEntry>> {
        let mut order = Vec::with_capacity(self.spine.len());

        for idref in &self.spine {
            let item = self
                .manifest
                .get(idref)
                .ok_or_else(|| EpubError::UnresolvedSpineRef {
                    idref: idref.clone(),
                })?;
            order.push(SpineEntry::from_href(item.href.clone()));
        }

        Ok(order)
    }
}

/// 从OPF包文档解析阅读顺序的便捷入口
///
/// # 参数
/// * `path` - OPF文件的绝对路径
///
/// # 返回值
/// * `Result<Vec<SpineEntry>>` - 按阅读顺序排列的脊柱条目
pub fn resolve_spine<P: AsRef<Path>>(path: P) -> Result<Vec<SpineEntry>> {
    Opf::from_file(path)?.reading_order()
}
