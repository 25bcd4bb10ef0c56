//! Previous/next navigation over a flattened sequence
//!
//! Navigation is a pure O(1) lookup by `global_index`, never an id search.
//! `current` must come from the same flatten pass as `flat`; a node that does
//! not belong to `flat` navigates nowhere.

use serde::Serialize;

use crate::models::ContentNode;

/// Boundary state of a node, used to disable the previous/next controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Boundaries {
    pub at_first: bool,
    pub at_last: bool,
}

impl Boundaries {
    pub fn has_previous(&self) -> bool {
        !self.at_first
    }

    pub fn has_next(&self) -> bool {
        !self.at_last
    }
}

pub(crate) fn belongs_to(flat: &[ContentNode], current: &ContentNode) -> bool {
    flat.get(current.global_index)
        .is_some_and(|node| {
            node.kind == current.kind
                && node.id == current.id
                && node.lesson_id == current.lesson_id
                && node.module.id == current.module.id
        })
}

/// Node before `current`, or `None` at the first node
pub fn previous<'a>(flat: &'a [ContentNode], current: &ContentNode) -> Option<&'a ContentNode> {
    if !belongs_to(flat, current) {
        return None;
    }
    let index = current.global_index.checked_sub(1)?;
    flat.get(index)
}

/// Node after `current`, or `None` at the last node
pub fn next<'a>(flat: &'a [ContentNode], current: &ContentNode) -> Option<&'a ContentNode> {
    if !belongs_to(flat, current) {
        return None;
    }
    flat.get(current.global_index + 1)
}

/// Boundary state of `current`; a foreign node is treated as both first and last
pub fn boundaries(flat: &[ContentNode], current: &ContentNode) -> Boundaries {
    if !belongs_to(flat, current) {
        return Boundaries {
            at_first: true,
            at_last: true,
        };
    }
    Boundaries {
        at_first: current.global_index == 0,
        at_last: current.global_index + 1 == flat.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Lesson, Module, Topic};
    use crate::outline::flatten;

    fn scenario() -> Course {
        Course::new_with_id("C", "C").with_module(
            Module::new_with_id("M1", "M1", 1)
                .with_lesson(Lesson::new_with_id("L1", "L1", 1))
                .with_lesson(
                    Lesson::new_with_id("L2", "L2", 2).with_topic(Topic::new_with_id("Tx", "Tx", 1)),
                ),
        )
    }

    #[test]
    fn test_previous_and_next_scenario() {
        let outline = flatten(&scenario());
        let flat = outline.nodes();
        let (l1, l2, tx) = (&flat[0], &flat[1], &flat[2]);

        assert_eq!(next(flat, l1).map(|n| n.id.as_str()), Some("L2"));
        assert_eq!(next(flat, l2).map(|n| n.id.as_str()), Some("Tx"));
        assert_eq!(previous(flat, tx).map(|n| n.id.as_str()), Some("L2"));
        assert!(next(flat, tx).is_none());
        assert!(previous(flat, l1).is_none());
    }

    #[test]
    fn test_next_of_previous_is_identity() {
        let outline = flatten(&scenario());
        let flat = outline.nodes();
        for node in &flat[1..flat.len() - 1] {
            let back = previous(flat, node).unwrap();
            assert_eq!(next(flat, back), Some(node));
        }
    }

    #[test]
    fn test_boundaries() {
        let outline = flatten(&scenario());
        let flat = outline.nodes();

        let first = boundaries(flat, &flat[0]);
        assert!(first.at_first && !first.at_last);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let middle = boundaries(flat, &flat[1]);
        assert_eq!(middle, Boundaries::default());

        let last = boundaries(flat, &flat[2]);
        assert!(last.at_last && !last.at_first);
    }

    #[test]
    fn test_single_node_is_both_boundaries() {
        let course = Course::new_with_id("C", "C").with_module(
            Module::new_with_id("M1", "M1", 1).with_lesson(Lesson::new_with_id("L1", "L1", 1)),
        );
        let outline = flatten(&course);
        let only = &outline.nodes()[0];
        assert!(previous(outline.nodes(), only).is_none());
        assert!(next(outline.nodes(), only).is_none());
        let b = boundaries(outline.nodes(), only);
        assert!(b.at_first && b.at_last);
    }

    #[test]
    fn test_foreign_node_navigates_nowhere() {
        let outline = flatten(&scenario());
        let mut foreign = outline.nodes()[2].clone();
        foreign.id = "deleted".to_string();
        assert!(previous(outline.nodes(), &foreign).is_none());
        assert!(next(outline.nodes(), &foreign).is_none());

        let mut out_of_range = outline.nodes()[2].clone();
        out_of_range.global_index = 3;
        assert!(previous(outline.nodes(), &out_of_range).is_none());
        assert!(next(outline.nodes(), &out_of_range).is_none());
    }

    #[test]
    fn test_empty_sequence() {
        let outline = flatten(&Course::new_with_id("C", "Empty"));
        assert!(outline.is_empty());
        let phantom = flatten(&scenario()).nodes()[0].clone();
        assert!(previous(outline.nodes(), &phantom).is_none());
        assert!(next(outline.nodes(), &phantom).is_none());
    }
}
