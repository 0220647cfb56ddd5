use crate::error::{IndexError, IndexResult};

/// 默认章节文件扩展名
pub const DEFAULT_EXTENSION: &str = "xhtml";
/// 默认输出文件名
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "chapters.json";
/// 默认 JSON 缩进空格数
pub const DEFAULT_INDENT: usize = 2;

const MAX_INDENT: usize = 16;

/// 索引生成配置
///
/// 决定扫描哪些文件、输出写到哪里以及输出格式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// 章节文件扩展名（不含前导点，大小写不敏感）
    pub extension: String,
    /// 输出文件名，写在书籍目录内
    pub output_file_name: String,
    /// JSON 缩进空格数
    pub indent: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            indent: DEFAULT_INDENT,
        }
    }
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = name.into();
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// 校验并规范化配置
    ///
    /// 去掉扩展名的前导点；拒绝空扩展名、带路径分隔符的输出文件名和过大的缩进
    pub fn validate(mut self) -> IndexResult<Self> {
        let extension = self.extension.trim().trim_start_matches('.').to_string();
        if extension.is_empty() {
            return Err(IndexError::InvalidConfig("扩展名不能为空".to_string()));
        }
        self.extension = extension;

        let name = self.output_file_name.as_str();
        if name.is_empty() || name == "." || name == ".." {
            return Err(IndexError::InvalidConfig(format!("输出文件名无效: {:?}", name)));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(IndexError::InvalidConfig(format!(
                "输出文件名不能包含路径分隔符: {}",
                name
            )));
        }

        if self.indent > MAX_INDENT {
            return Err(IndexError::InvalidConfig(format!(
                "缩进不能超过 {} 个空格: {}",
                MAX_INDENT, self.indent
            )));
        }

        Ok(self)
    }

    /// 带前导点的小写后缀，例如 `.xhtml`
    pub fn suffix(&self) -> String {
        format!(".{}", self.extension.to_lowercase())
    }

    /// 判断文件名是否以配置的扩展名结尾（大小写不敏感）
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.to_lowercase().ends_with(&self.suffix())
    }
}
