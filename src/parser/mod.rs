use serde::{Deserialize, Serialize};

// 子模块声明
pub mod natural_sort;
pub mod text_decoder;
pub mod title_extractor;

/// 章节记录
///
/// 表示目录索引中的一个章节：文件名与可读标题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// 相对于书籍目录的文件名
    pub file: String,
    /// 章节标题
    pub title: String,
}

impl ChapterRecord {
    pub fn new(file: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            title: title.into(),
        }
    }
}

/// 章节索引
///
/// 按文件名自然排序后的章节记录列表，序列化为 `{"chapters": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterIndex {
    pub chapters: Vec<ChapterRecord>,
}

impl ChapterIndex {
    pub fn new(chapters: Vec<ChapterRecord>) -> Self {
        Self { chapters }
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}
