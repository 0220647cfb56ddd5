use crate::config::IndexConfig;
use crate::error::{IndexError, IndexResult};
use crate::parser::natural_sort::sort_naturally;
use crate::parser::text_decoder::decode_text;
use crate::parser::title_extractor::TitleExtractor;
use crate::parser::{ChapterIndex, ChapterRecord};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// 一次成功运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    /// 写入的章节数量
    pub count: usize,
    /// 输出文件路径
    pub output_path: PathBuf,
}

/// 章节索引构建器
///
/// 扫描书籍目录 -> 自然排序 -> 提取标题 -> 生成并写入 chapters.json。
/// 任一文件读取或解码失败都会中止整个流程，不产生输出
pub struct IndexBuilder {
    config: IndexConfig,
    extractor: TitleExtractor,
}

impl IndexBuilder {
    /// 创建新的构建器，配置在此处校验
    pub fn new(config: IndexConfig) -> IndexResult<Self> {
        Ok(Self {
            config: config.validate()?,
            extractor: TitleExtractor::new(),
        })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// 列出目录下的章节文件名，已按自然顺序排序
    ///
    /// 只看目录的直接子项，不递归；目录项和输出文件本身会被跳过
    pub fn list_chapter_files(&self, dir: &Path) -> IndexResult<Vec<String>> {
        let read_err = |source| IndexError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    let lossy = raw.to_string_lossy().into_owned();
                    if self.config.matches(&lossy) {
                        return Err(IndexError::InvalidFileName { name: lossy });
                    }
                    continue;
                }
            };

            if !self.config.matches(&name) || name == self.config.output_file_name {
                continue;
            }

            // 元数据读取失败时保留该项，由后续读取报告错误
            if let Ok(metadata) = fs::metadata(entry.path()) {
                if !metadata.is_file() {
                    debug!(entry = %name, "跳过非文件目录项");
                    continue;
                }
            }

            names.push(name);
        }

        sort_naturally(&mut names);
        Ok(names)
    }

    /// 读取每个章节文件并提取标题，构建章节索引
    pub fn build_index(&self, dir: &Path) -> IndexResult<ChapterIndex> {
        let names = self.list_chapter_files(dir)?;
        debug!(count = names.len(), dir = %dir.display(), "找到章节文件");

        let mut chapters = Vec::with_capacity(names.len());
        for name in names {
            let path = dir.join(&name);
            let bytes = fs::read(&path).map_err(|source| IndexError::FileRead {
                path: path.clone(),
                source,
            })?;
            let content = decode_text(&bytes).ok_or_else(|| IndexError::Decode {
                path: path.clone(),
            })?;

            let fallback = fallback_title(&name);
            let title = self.extractor.extract(&content, &fallback);
            debug!(file = %name, title = %title, "提取章节标题");

            chapters.push(ChapterRecord::new(name, title));
        }

        Ok(ChapterIndex::new(chapters))
    }

    /// 将索引渲染为带缩进的 JSON
    ///
    /// 非 ASCII 字符原样输出为 UTF-8，末尾不带换行
    pub fn render(&self, index: &ChapterIndex) -> IndexResult<Vec<u8>> {
        let indent = " ".repeat(self.config.indent);
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        index.serialize(&mut serializer)?;
        Ok(buffer)
    }

    /// 原子地写入输出文件
    ///
    /// 先写入同目录下的临时文件，再重命名覆盖目标文件
    pub fn write(&self, dir: &Path, rendered: &[u8]) -> IndexResult<PathBuf> {
        let output_path = dir.join(&self.config.output_file_name);
        let write_err = |source| IndexError::Write {
            path: output_path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
        temp.write_all(rendered).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;

        // 临时文件默认权限为 0600
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))
                .map_err(write_err)?;
        }

        temp.persist(&output_path).map_err(|e| write_err(e.error))?;
        Ok(output_path)
    }

    /// 完整流程：构建、渲染、写入
    pub fn generate(&self, dir: &Path) -> IndexResult<IndexReport> {
        let index = self.build_index(dir)?;
        let rendered = self.render(&index)?;
        let output_path = self.write(dir, &rendered)?;

        info!(count = index.len(), path = %output_path.display(), "章节索引已写入");

        Ok(IndexReport {
            count: index.len(),
            output_path,
        })
    }
}

/// 回退标题：去掉最后一个扩展名的文件名
///
/// 前导的点不算扩展名分隔符，`.xhtml` 与 `..xhtml` 保持原样
pub fn fallback_title(file_name: &str) -> String {
    let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[leading_dots..].rfind('.') {
        Some(dot) => file_name[..leading_dots + dot].to_string(),
        None => file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> IndexBuilder {
        IndexBuilder::new(IndexConfig::default()).unwrap()
    }

    #[test]
    fn test_fallback_title_strips_last_extension() {
        assert_eq!(fallback_title("1.xhtml"), "1");
        assert_eq!(fallback_title("part.one.xhtml"), "part.one");
        assert_eq!(fallback_title("Chapter 3.XHTML"), "Chapter 3");
        // 以点开头且没有其它点的文件名没有扩展名
        assert_eq!(fallback_title(".xhtml"), ".xhtml");
        assert_eq!(fallback_title("..xhtml"), "..xhtml");
        assert_eq!(fallback_title(".hidden.xhtml"), ".hidden");
        assert_eq!(fallback_title("序章.xhtml"), "序章");
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = IndexBuilder::new(IndexConfig::new().with_extension(""));
        assert!(matches!(result, Err(IndexError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_normalizes_config() {
        let builder = IndexBuilder::new(IndexConfig::new().with_extension(".HTML")).unwrap();
        assert_eq!(builder.config().extension, "HTML");
        assert!(builder.config().matches("a.html"));
    }

    #[test]
    fn test_render_two_space_indent() {
        let index = ChapterIndex::new(vec![
            ChapterRecord::new("1.xhtml", "1"),
            ChapterRecord::new("2.xhtml", "Intro"),
        ]);
        let rendered = String::from_utf8(builder().render(&index).unwrap()).unwrap();
        let expected = "{\n  \"chapters\": [\n    {\n      \"file\": \"1.xhtml\",\n      \"title\": \"1\"\n    },\n    {\n      \"file\": \"2.xhtml\",\n      \"title\": \"Intro\"\n    }\n  ]\n}";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty_index() {
        let bytes = builder().render(&ChapterIndex::default()).unwrap();
        let rendered = String::from_utf8(bytes).unwrap();
        assert_eq!(rendered, "{\n  \"chapters\": []\n}");
    }

    #[test]
    fn test_render_custom_indent_and_unicode() {
        let builder = IndexBuilder::new(IndexConfig::new().with_indent(4)).unwrap();
        let index = ChapterIndex::new(vec![ChapterRecord::new("1.xhtml", "第一章 \"开端\"")]);
        let rendered = String::from_utf8(builder.render(&index).unwrap()).unwrap();
        assert!(rendered.contains("\n    \"chapters\": ["));
        assert!(rendered.contains("\"title\": \"第一章 \\\"开端\\\"\""));
        assert!(!rendered.ends_with('\n'));
    }
}
