use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the phz binary.
#[derive(Parser, Debug)]
#[command(
    name = "phz",
    version,
    about = "Associative-array shape inference and key completion for PHP"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Project root to index. Defaults to the current directory.
    #[arg(short = 'p', long = "project", global = true)]
    pub project: Option<PathBuf>,

    /// Path to phz.json. Defaults to `<project>/phz.json` when present.
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip files larger than this many bytes.
    #[arg(long = "max-file-size", global = true)]
    pub max_file_size: Option<usize>,

    /// Number of indices offered for list-shaped arrays.
    #[arg(long = "list-index-suggestions", global = true)]
    pub list_index_suggestions: Option<usize>,

    /// Glob patterns of files to leave out, replacing the configured ones.
    #[arg(long, value_delimiter = ',', global = true)]
    pub exclude: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Completion items at a position.
    Complete(CaretArgs),
    /// Shapes of the innermost resolvable expression at a position.
    Types(CaretArgs),
    /// Files the project index would contain.
    Files,
}

/// A caret in a file, 1-based like editor status bars.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CaretArgs {
    pub file: PathBuf,

    #[arg(short = 'l', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub line: u32,

    /// Column in UTF-16 code units.
    #[arg(short = 'C', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub column: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
