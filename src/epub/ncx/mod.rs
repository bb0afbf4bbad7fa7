//! NCX（Navigation Control file for XML）导航文档解析模块
//!
//! 此模块提供EPUB导航文档的解析功能：读取书籍信息，
//! 扁平化导航地图，并对照提取出的文件树修复目录条目的路径。

pub mod navigation;
pub mod parser;

pub use navigation::{BookInfo, NavEntry, Navigation};
pub use parser::{resolve_navigation, Ncx, NCX_NAMESPACE};
