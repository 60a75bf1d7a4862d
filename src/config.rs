/// Leaves with fewer body words than this are not summarized.
pub const DEFAULT_MIN_WORD_COUNT: usize = 200;

pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Upper bound on slug length, keeps `{index}_{slug}_{lang}.md` well under filesystem limits.
pub const DEFAULT_MAX_SLUG_LEN: usize = 60;

pub const DEFAULT_MERGED_FILE: &str = "book.md";

/// Knobs for one split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    pub min_word_count: usize,
    pub max_slug_len: usize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            min_word_count: DEFAULT_MIN_WORD_COUNT,
            max_slug_len: DEFAULT_MAX_SLUG_LEN,
        }
    }
}
