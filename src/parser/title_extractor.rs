use once_cell::sync::Lazy;
use regex::Regex;

static SHARED: Lazy<TitleExtractor> = Lazy::new(TitleExtractor::new);

/// 标题提取器
///
/// 从章节文件内容中取第一个 `<title>...</title>` 的内容作为章节标题，
/// 标签匹配大小写不敏感，内容可以跨行
pub struct TitleExtractor {
    pattern: Regex,
}

impl TitleExtractor {
    /// 创建新的标题提取器实例
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"(?is)<title>(.*?)</title>").unwrap(),
        }
    }

    /// 提取章节标题
    ///
    /// # 参数
    /// - `content`: 文件内容
    /// - `fallback`: 找不到标题或标题为空时使用的回退标题
    ///
    /// # 返回
    /// 去掉首尾空白的标题；没有可用标题时原样返回 `fallback`
    pub fn extract(&self, content: &str, fallback: &str) -> String {
        self.find(content).unwrap_or(fallback).to_string()
    }

    /// 查找非空标题，找不到时返回 None
    pub fn find<'a>(&self, content: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|inner| inner.as_str().trim())
            .filter(|title| !title.is_empty())
    }
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// 使用共享的提取器提取标题，见 [`TitleExtractor::extract`]
pub fn extract_title(content: &str, fallback: &str) -> String {
    SHARED.extract(content, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_title() {
        assert_eq!(extract_title("<title>第一章</title>", "1"), "第一章");
    }

    #[test]
    fn test_title_is_trimmed() {
        let inputs = ["  Intro  ", "\n\tIntro\n", "Intro", " 前言　"];
        let expected = ["Intro", "Intro", "Intro", "前言"];
        for (input, want) in inputs.iter().zip(expected) {
            let content = format!("<title>{}</title>", input);
            assert_eq!(extract_title(&content, "fb"), want);
        }
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        assert_eq!(extract_title("<TITLE> Intro </TITLE>", "2"), "Intro");
        assert_eq!(extract_title("<Title>Mixed</tItLe>", "x"), "Mixed");
    }

    #[test]
    fn test_missing_tag_returns_fallback_unchanged() {
        let html = r#"<html><body><h1>第一章</h1><p>内容</p></body></html>"#;
        assert_eq!(extract_title(html, "1"), "1");
        // 回退标题不做 trim
        assert_eq!(extract_title("", "  chapter 1 "), "  chapter 1 ");
    }

    #[test]
    fn test_empty_tag_returns_fallback() {
        assert_eq!(extract_title("<title></title>", "3"), "3");
        assert_eq!(extract_title("<title>   \n </title>", "3"), "3");
    }

    #[test]
    fn test_title_spans_lines() {
        let html = "<head><title>\n  Part One:\n  The Beginning\n</title></head>";
        assert_eq!(extract_title(html, "fb"), "Part One:\n  The Beginning");
    }

    #[test]
    fn test_first_title_wins_and_match_is_non_greedy() {
        let html = "<title>A</title><title>B</title>";
        assert_eq!(extract_title(html, "fb"), "A");
    }

    #[test]
    fn test_empty_first_title_does_not_search_further() {
        let html = "<title></title><title>Second</title>";
        assert_eq!(extract_title(html, "fb"), "fb");
    }

    #[test]
    fn test_title_with_attributes_is_not_matched() {
        assert_eq!(extract_title(r#"<title lang="en">Intro</title>"#, "fb"), "fb");
    }

    #[test]
    fn test_unclosed_tag_returns_fallback() {
        assert_eq!(extract_title("<title>Never closed", "fb"), "fb");
    }

    #[test]
    fn test_inner_markup_is_kept_verbatim() {
        assert_eq!(
            extract_title("<title>Tom &amp; <i>Jerry</i></title>", "fb"),
            "Tom &amp; <i>Jerry</i>"
        );
    }

    #[test]
    fn test_find_reports_absence() {
        let extractor = TitleExtractor::new();
        assert_eq!(extractor.find("<title> x </title>"), Some("x"));
        assert_eq!(extractor.find("<title></title>"), None);
        assert_eq!(extractor.find("no tag"), None);
    }
}
