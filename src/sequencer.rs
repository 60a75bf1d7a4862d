//! Final ordering and naming of summarization units.

use crate::config::SplitOptions;
use std::collections::HashSet;

const SLUG_SEPARATOR: char = '_';
const UNTITLED: &str = "untitled";

/// Intro text owned by one ancestor section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorIntro {
    pub title: String,
    pub text: String,
}

/// A leaf with its texts fetched, before filtering and numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDraft {
    pub title: String,
    pub ancestor_intros: Vec<AncestorIntro>,
    pub body_text: String,
}

/// One self-contained section handed to the summarizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizationUnit {
    /// 1-based position in document order after filtering.
    pub index: usize,
    pub title: String,
    pub slug: String,
    /// Outermost ancestor first.
    pub ancestor_intros: Vec<AncestorIntro>,
    pub body_text: String,
    /// Words in `body_text` alone.
    pub word_count: usize,
}

impl SummarizationUnit {
    /// `{index:03}_{slug}.md`, or `{index:03}_{slug}_{lang}.md` for a translation.
    pub fn file_name(&self, lang: Option<&str>) -> String {
        match lang {
            Some(lang) => format!("{:03}_{}_{}.md", self.index, self.slug, lang),
            None => format!("{:03}_{}.md", self.index, self.slug),
        }
    }

    /// Text sent to the summarizer: ancestor context blocks, then the body.
    pub fn render(&self) -> String {
        if self.ancestor_intros.is_empty() {
            return self.body_text.clone();
        }
        let context = self
            .ancestor_intros
            .iter()
            .map(|intro| format!("[Context from: {}]\n{}", intro.title, intro.text))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("{}\n\n---\n\n{}", context, self.body_text)
    }
}

/// Whitespace-separated words, not counting markdown heading markers.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|word| !word.chars().all(|c| c == '#'))
        .count()
}

/// Lowercase, collapse every run of non-alphanumerics into one separator,
/// bound the length.
pub fn slugify(title: &str, max_len: usize) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SLUG_SEPARATOR);
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    let truncated: String = slug.chars().take(max_len).collect();
    let trimmed = truncated.trim_matches(SLUG_SEPARATOR);
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Drop drafts below the word threshold, then number and name the rest.
///
/// Runs after context assignment: a dropped leaf takes its assigned intros
/// with it and leaves no gap in the numbering.
pub fn sequence(drafts: Vec<UnitDraft>, options: &SplitOptions) -> Vec<SummarizationUnit> {
    let mut used = HashSet::new();

    drafts
        .into_iter()
        .filter_map(|draft| {
            let words = word_count(&draft.body_text);
            if words < options.min_word_count {
                log::debug!(
                    "Skipping \"{}\": {} words (minimum {})",
                    draft.title,
                    words,
                    options.min_word_count
                );
                return None;
            }
            Some((draft, words))
        })
        .enumerate()
        .map(|(i, (draft, words))| {
            let index = i + 1;
            let slug = unique_slug(
                slugify(&draft.title, options.max_slug_len),
                index,
                &mut used,
            );
            SummarizationUnit {
                index,
                title: draft.title,
                slug,
                ancestor_intros: draft.ancestor_intros,
                body_text: draft.body_text,
                word_count: words,
            }
        })
        .collect()
}

fn unique_slug(base: String, index: usize, used: &mut HashSet<String>) -> String {
    let mut slug = base.clone();
    let mut attempt = 1;
    while used.contains(&slug) {
        slug = if attempt == 1 {
            format!("{base}{SLUG_SEPARATOR}{index}")
        } else {
            format!("{base}{SLUG_SEPARATOR}{index}{SLUG_SEPARATOR}{attempt}")
        };
        attempt += 1;
    }
    used.insert(slug.clone());
    slug
}
