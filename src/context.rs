//! Assigns each branch's intro span to exactly one leaf.
//!
//! A branch's intro goes to the first leaf reached in pre-order under it and
//! to no other descendant, so lead-in text is read once, at the reader's first
//! encounter with the section.

use crate::outline::{Outline, OutlineNode, Position, Span};
use crate::resolver::{self, NodeKind};

/// An ancestor's intro span waiting for its first leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorSpan<'a, P> {
    pub ancestor: &'a OutlineNode<P>,
    pub span: Span<P>,
}

/// A leaf together with the intro spans it owns, outermost ancestor first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafContext<'a, P> {
    pub leaf: &'a OutlineNode<P>,
    pub body: Span<P>,
    pub intros: Vec<AncestorSpan<'a, P>>,
}

/// Walk the outline once and pair every leaf with the intros it owns.
///
/// Returns one entry per leaf, in document order.
pub fn assign<P: Position>(outline: &Outline<P>) -> Vec<LeafContext<'_, P>> {
    let mut out = Vec::new();
    for root in &outline.roots {
        walk(root, Vec::new(), &mut out);
    }
    out
}

/// `pending` holds intros of ancestors for which `node` lies on the
/// first-child path. It moves into the first child only; later siblings start
/// from an empty list.
fn walk<'a, P: Position>(
    node: &'a OutlineNode<P>,
    mut pending: Vec<AncestorSpan<'a, P>>,
    out: &mut Vec<LeafContext<'a, P>>,
) {
    match resolver::classify(node) {
        NodeKind::Leaf => out.push(LeafContext {
            leaf: node,
            body: resolver::body_span(node),
            intros: pending,
        }),
        NodeKind::Branch => {
            if let Some(span) = node.intro_span().filter(|span| !span.is_empty()) {
                pending.push(AncestorSpan {
                    ancestor: node,
                    span,
                });
            }
            let mut children = node.children.iter();
            if let Some(first) = children.next() {
                walk(first, pending, out);
            }
            for child in children {
                walk(child, Vec::new(), out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::TocEntry;
    use proptest::prelude::*;

    fn outline(entries: &[(usize, &str, usize)], end: usize) -> Outline<usize> {
        let entries = entries
            .iter()
            .map(|&(level, title, start)| TocEntry {
                level,
                title: title.to_string(),
                start,
            })
            .collect();
        Outline::from_entries(entries, end).unwrap()
    }

    fn intro_titles<'a>(ctx: &LeafContext<'a, usize>) -> Vec<&'a str> {
        ctx.intros.iter().map(|i| i.ancestor.title.as_str()).collect()
    }

    #[test]
    fn first_leaf_collects_every_ancestor_intro() {
        let outline = outline(
            &[
                (0, "Foundations", 0),
                (1, "Intro", 5),
                (2, "Section 1.1", 8),
                (2, "Section 1.2", 20),
            ],
            30,
        );
        let assigned = assign(&outline);
        assert_eq!(assigned.len(), 2);

        assert_eq!(assigned[0].leaf.title, "Section 1.1");
        assert_eq!(intro_titles(&assigned[0]), ["Foundations", "Intro"]);
        assert_eq!(assigned[0].intros[0].span, Span::new(0, 5));
        assert_eq!(assigned[0].intros[1].span, Span::new(5, 8));
        assert_eq!(assigned[0].body, Span::new(8, 20));

        assert_eq!(assigned[1].leaf.title, "Section 1.2");
        assert!(assigned[1].intros.is_empty());
    }

    #[test]
    fn intro_does_not_leak_into_later_children_of_first_child() {
        let outline = outline(
            &[
                (0, "Part", 0),
                (1, "Ch 1", 2),
                (2, "1.1", 2),
                (2, "1.2", 6),
                (1, "Ch 2", 9),
                (2, "2.1", 10),
            ],
            15,
        );
        let assigned = assign(&outline);
        let by_title: Vec<_> = assigned
            .iter()
            .map(|c| (c.leaf.title.as_str(), intro_titles(c)))
            .collect();
        assert_eq!(
            by_title,
            vec![
                ("1.1", vec!["Part"]),
                ("1.2", vec![]),
                ("2.1", vec!["Ch 2"]),
            ]
        );
    }

    #[test]
    fn flat_outline_has_no_intros() {
        let outline = outline(&[(0, "Intro", 3), (0, "Body", 10), (0, "Outro", 20)], 30);
        let assigned = assign(&outline);
        assert_eq!(assigned.len(), 3);
        assert!(assigned.iter().all(|c| c.intros.is_empty()));
    }

    #[test]
    fn subtrees_can_be_assigned_independently() {
        let outline = outline(&[(0, "A", 0), (1, "A.1", 1), (0, "B", 4), (1, "B.1", 6)], 9);
        let whole = assign(&outline);
        let subtree = Outline {
            roots: vec![outline.roots[1].clone()],
        };
        let second_only = assign(&subtree);
        assert_eq!(whole[1].intros.len(), 1);
        assert_eq!(second_only[0].intros[0].span, whole[1].intros[0].span);
    }

    /// Random document-ordered outlines: each entry's level may go at most one
    /// deeper than the previous one; starts never decrease.
    fn arb_outline() -> impl Strategy<Value = Outline<usize>> {
        prop::collection::vec((0usize..4, 0usize..4), 1..40).prop_map(|steps| {
            let mut level = 0usize;
            let mut start = 0usize;
            let entries: Vec<TocEntry<usize>> = steps
                .into_iter()
                .enumerate()
                .map(|(i, (depth_hint, gap))| {
                    level = if i == 0 { 0 } else { depth_hint.min(level + 1) };
                    start += gap;
                    TocEntry {
                        level,
                        title: format!("node-{i}"),
                        start,
                    }
                })
                .collect();
            Outline::from_entries(entries, start + 5).unwrap()
        })
    }

    fn branches(outline: &Outline<usize>) -> Vec<&OutlineNode<usize>> {
        fn walk<'a>(node: &'a OutlineNode<usize>, out: &mut Vec<&'a OutlineNode<usize>>) {
            if !node.is_leaf() {
                out.push(node);
            }
            node.children.iter().for_each(|c| walk(c, out));
        }
        let mut out = Vec::new();
        outline.roots.iter().for_each(|r| walk(r, &mut out));
        out
    }

    fn first_leaf(node: &OutlineNode<usize>) -> &OutlineNode<usize> {
        match node.children.first() {
            Some(child) => first_leaf(child),
            None => node,
        }
    }

    proptest! {
        #[test]
        fn one_context_per_leaf(outline in arb_outline()) {
            let assigned = assign(&outline);
            let leaves = resolver::leaves(&outline);
            prop_assert_eq!(assigned.len(), leaves.len());
            for (ctx, leaf) in assigned.iter().zip(leaves) {
                prop_assert!(std::ptr::eq(ctx.leaf, leaf));
            }
        }

        #[test]
        fn each_nonempty_intro_lands_on_exactly_the_first_leaf(outline in arb_outline()) {
            let assigned = assign(&outline);
            for branch in branches(&outline) {
                let holders: Vec<_> = assigned
                    .iter()
                    .filter(|c| c.intros.iter().any(|i| std::ptr::eq(i.ancestor, branch)))
                    .collect();
                if branch.intro_span().unwrap().is_empty() {
                    prop_assert!(holders.is_empty());
                } else {
                    prop_assert_eq!(holders.len(), 1);
                    prop_assert!(std::ptr::eq(holders[0].leaf, first_leaf(branch)));
                }
            }
        }

        #[test]
        fn intros_are_ordered_outermost_first(outline in arb_outline()) {
            for ctx in assign(&outline) {
                let levels: Vec<usize> = ctx.intros.iter().map(|i| i.ancestor.level).collect();
                prop_assert!(levels.windows(2).all(|w| w[0] < w[1]));
            }
        }

        #[test]
        fn assignment_is_deterministic(outline in arb_outline()) {
            prop_assert_eq!(assign(&outline), assign(&outline));
        }
    }
}
