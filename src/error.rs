use std::path::PathBuf;
use thiserror::Error;

/// 生成章节索引时可能出现的错误
///
/// 任何一个错误都会中止整次运行，不存在跳过单个文件的策略
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("读取目录失败 {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("读取文件失败 {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("文件无法解码为文本: {}", .path.display())]
    Decode { path: PathBuf },

    #[error("文件名不是有效的 UTF-8: {name}")]
    InvalidFileName { name: String },

    #[error("序列化索引失败: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("写入索引失败 {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置无效: {0}")]
    InvalidConfig(String),
}

pub type IndexResult<T> = Result<T, IndexError>;
