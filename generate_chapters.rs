//! 章节索引生成工具
//!
//! 用法:
//!   generate_chapters <book_folder> [--extension xhtml] [--output chapters.json]

use chapter_index_lib::{init_logging, IndexBuilder, IndexConfig, IndexResult};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "generate_chapters",
    version,
    about = "Scan a book folder and write an ordered chapters.json index"
)]
struct Cli {
    /// Folder containing the chapter files
    book_folder: PathBuf,
    /// Chapter file extension (case-insensitive)
    #[arg(long, default_value = "xhtml")]
    extension: String,
    /// Name of the index file written inside the book folder
    #[arg(long, default_value = "chapters.json")]
    output: String,
    /// Number of spaces used to indent the JSON output
    #[arg(long, default_value_t = 2)]
    indent: usize,
    /// Print the index to stdout instead of writing the file
    #[arg(long)]
    print: bool,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: Cli) -> IndexResult<()> {
    let config = IndexConfig::new()
        .with_extension(cli.extension)
        .with_output_file_name(cli.output)
        .with_indent(cli.indent);
    let builder = IndexBuilder::new(config)?;

    if cli.print {
        let index = builder.build_index(&cli.book_folder)?;
        let rendered = builder.render(&index)?;
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&rendered)
            .and_then(|_| stdout.write_all(b"\n"))
            .map_err(|source| chapter_index_lib::IndexError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        return Ok(());
    }

    let report = builder.generate(&cli.book_folder)?;
    println!(
        "Wrote {} chapters to {}",
        report.count,
        report.output_path.display()
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
