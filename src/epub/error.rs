use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EpubError>;

/// Epub相关的错误类型
#[derive(Error, Debug)]
pub enum EpubError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("Zip文件错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("无效的mimetype: 期望 {expected}, 找到: {found}")]
    InvalidMimetype { expected: String, found: String },

    #[error("XML解析错误: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("OPF文件解析错误: {0}")]
    OpfParseError(String),

    #[error("NCX文件解析错误: {0}")]
    NcxParseError(String),

    #[error("脊柱项引用的清单ID不存在: {idref}")]
    UnresolvedSpineRef { idref: String },

    #[error("NCX结构错误: navLabel数量({labels})与content数量({contents})不一致")]
    NavCountMismatch { labels: usize, contents: usize },

    #[error("提取目录中未找到{extension}文档")]
    DocumentNotFound { extension: String },

    #[error("配置文件错误: {0}")]
    ConfigError(String),
}
