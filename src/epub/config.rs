//! 转换配置模块
//!
//! 提供转换运行的配置管理功能，支持从YAML文件加载配置。
//! 输出目录等路径全部来自配置或命令行，进程当前目录不参与解析。

use crate::epub::error::{EpubError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 脊柱来源
///
/// OPF的itemref顺序与NCX的导航点顺序可能不一致，
/// 二者不会被合并，只能选择其一驱动页面顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpineSource {
    /// 包文档的itemref顺序
    #[default]
    Opf,
    /// 导航文档的目录顺序
    Ncx,
}

/// 转换运行配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// 提取和输出的根目录
    pub output_dir: String,
    /// 转换结束后是否保留提取出的文件树
    pub keep_extracted: bool,
    /// 页面顺序的来源
    pub spine_source: SpineSource,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            output_dir: "output".to_string(),
            keep_extracted: false,
            spine_source: SpineSource::Opf,
        }
    }
}

impl ConversionConfig {
    /// 从YAML文件加载配置
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    /// * `Result<Self>` - 加载成功返回配置实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| EpubError::ConfigError(format!("无法读取配置文件: {}", e)))?;

        serde_yml::from_str(&content)
            .map_err(|e| EpubError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 把当前配置写为YAML文件
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml_content = serde_yml::to_string(self)
            .map_err(|e| EpubError::ConfigError(format!("序列化配置失败: {}", e)))?;

        let content_with_header = format!(
            "# epubweb转换配置文件\n# output_dir: 提取和输出的根目录\n# keep_extracted: 转换后是否保留提取出的文件树\n# spine_source: 页面顺序来源(opf或ncx)\n\n{}",
            yaml_content
        );

        fs::write(path, content_with_header)
            .map_err(|e| EpubError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }

    /// 加载配置文件，文件不存在时先生成默认配置再返回
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    /// * `Result<Self>` - 配置实例
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.write_to(path)?;
            Ok(config)
        }
    }
}
