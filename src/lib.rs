pub mod config;
pub mod error;
pub mod index_builder;
pub mod parser;


pub use config::IndexConfig;
pub use error::{IndexError, IndexResult};
pub use index_builder::{IndexBuilder, IndexReport};
pub use parser::natural_sort::{natural_cmp, natural_key, sort_naturally};
pub use parser::title_extractor::extract_title;
pub use parser::{ChapterIndex, ChapterRecord};

/// 初始化日志，输出到 stderr
///
/// 优先使用 RUST_LOG，未设置时默认 warn，`verbose` 时为 debug
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "chapter_index_lib=debug"
    } else {
        "chapter_index_lib=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// 为目录生成章节索引，使用给定配置
pub fn generate(dir: &std::path::Path, config: IndexConfig) -> IndexResult<IndexReport> {
    IndexBuilder::new(config)?.generate(dir)
}
