//! Book → ordered summarization units.
//!
//! Everything is fetched and sequenced before anything is returned, so a
//! failure anywhere leaves the caller with no partial result.

use crate::config::SplitOptions;
use crate::context::{self, LeafContext};
use crate::error::{BookError, Result};
use crate::reader::BookReader;
use crate::sequencer::{self, AncestorIntro, SummarizationUnit, UnitDraft};

pub fn split<R: BookReader>(reader: &R, options: &SplitOptions) -> Result<Vec<SummarizationUnit>> {
    let outline = reader.outline()?;
    log::debug!(
        "Outline has {} top-level entries, {} nodes",
        outline.roots.len(),
        outline.node_count()
    );

    let assigned = context::assign(&outline);
    if assigned.is_empty() {
        return Err(BookError::EmptyDocument);
    }

    let drafts = assigned
        .iter()
        .map(|leaf| draft(reader, leaf))
        .collect::<Result<Vec<_>>>()?;

    if drafts.iter().all(|d| d.body_text.is_empty()) {
        return Err(BookError::Extraction {
            reason: "no section has any extractable text (scanned or image-only document?)"
                .to_string(),
        });
    }

    let leaf_count = drafts.len();
    let units = sequencer::sequence(drafts, options);
    log::info!(
        "{} of {} sections meet the {}-word minimum",
        units.len(),
        leaf_count,
        options.min_word_count
    );
    Ok(units)
}

fn draft<R: BookReader>(reader: &R, leaf: &LeafContext<'_, R::Position>) -> Result<UnitDraft> {
    let mut ancestor_intros = Vec::with_capacity(leaf.intros.len());
    for intro in &leaf.intros {
        let text = reader.fetch_text(&intro.span)?.trim().to_string();
        if !text.is_empty() {
            ancestor_intros.push(AncestorIntro {
                title: intro.ancestor.title.clone(),
                text,
            });
        }
    }

    let body_text = reader.fetch_text(&leaf.body)?.trim().to_string();
    log::debug!(
        "\"{}\": {} words, {} ancestor intros",
        leaf.leaf.title,
        sequencer::word_count(&body_text),
        ancestor_intros.len()
    );

    Ok(UnitDraft {
        title: leaf.leaf.title.clone(),
        ancestor_intros,
        body_text,
    })
}
