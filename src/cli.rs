use crate::config::{
    SplitOptions, DEFAULT_MAX_SLUG_LEN, DEFAULT_MERGED_FILE, DEFAULT_MIN_WORD_COUNT,
    DEFAULT_OUTPUT_DIR,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Split EPUB and PDF books into self-contained sections for summarization
#[derive(Parser, Debug)]
#[command(name = "bookleaf", version, about)]
pub struct Cli {
    /// Log per-section detail
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a book into one Markdown file per leaf section
    Split(SplitArgs),
    /// Concatenate the Markdown files of a folder in file-name order
    Merge(MergeArgs),
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Path to the input EPUB or PDF file
    pub input: PathBuf,

    /// Directory the section files are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Sections with fewer words than this are skipped
    #[arg(long, env = "BOOKLEAF_MIN_WORDS", default_value_t = DEFAULT_MIN_WORD_COUNT)]
    pub min_words: usize,

    /// Maximum length of the title part of a file name
    #[arg(long, default_value_t = DEFAULT_MAX_SLUG_LEN)]
    pub max_slug_len: usize,

    /// List the sections that would be written without writing them
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl SplitArgs {
    pub fn options(&self) -> SplitOptions {
        SplitOptions {
            min_word_count: self.min_words,
            max_slug_len: self.max_slug_len,
        }
    }
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Folder containing the Markdown files
    pub folder: PathBuf,

    /// Merged output file
    #[arg(short, long, default_value = DEFAULT_MERGED_FILE)]
    pub output: PathBuf,
}
