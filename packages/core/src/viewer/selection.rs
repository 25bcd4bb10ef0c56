//! The currently viewed content node
//!
//! A selection stores id, kind and module id together and is always derived
//! from a node of the current outline, so the TOC highlight, the breadcrumb and
//! the viewer move in lockstep.

use serde::{Deserialize, Serialize};

use crate::models::{ContentKind, ContentNode};
use crate::outline::Outline;

/// Topic ids are only unique within a lesson and lesson ids within a module,
/// so a selection names its node by kind, id, owning lesson and module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub id: String,
    pub kind: ContentKind,
    pub module_id: String,
    pub lesson_id: String,
}

impl Selection {
    pub fn of(node: &ContentNode) -> Self {
        Self {
            id: node.id.clone(),
            kind: node.kind,
            module_id: node.module.id.clone(),
            lesson_id: node.lesson_id.clone(),
        }
    }

    /// Whether this selection points at `node`
    pub fn matches(&self, node: &ContentNode) -> bool {
        self.kind == node.kind
            && self.id == node.id
            && self.lesson_id == node.lesson_id
            && self.module_id == node.module.id
    }

    /// The selected node in `outline`, if it still exists there
    pub fn locate<'a>(&self, outline: &'a Outline) -> Option<&'a ContentNode> {
        outline.locate(self.kind, &self.module_id, &self.lesson_id, &self.id)
    }
}

/// Re-resolve a selection against a freshly flattened outline.
///
/// The previous selection is looked up by its scoped identity; when it is
/// gone (or there was none) the first node is selected. An empty outline
/// selects nothing.
pub fn resolve<'a>(outline: &'a Outline, previous: Option<&Selection>) -> Option<&'a ContentNode> {
    previous
        .and_then(|selection| selection.locate(outline))
        .or_else(|| outline.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Lesson, Module, Topic};
    use crate::outline::flatten;

    fn outline() -> Outline {
        flatten(
            &Course::new_with_id("c", "Course")
                .with_module(
                    Module::new_with_id("m1", "One", 1).with_lesson(
                        Lesson::new_with_id("l1", "L1", 1)
                            .with_topic(Topic::new_with_id("t1", "T1", 1)),
                    ),
                )
                .with_module(
                    Module::new_with_id("m2", "Two", 2)
                        .with_lesson(Lesson::new_with_id("l2", "L2", 1)),
                ),
        )
    }

    #[test]
    fn test_selection_of_node() {
        let outline = outline();
        let selection = Selection::of(&outline.nodes()[2]);
        assert_eq!(selection.id, "l2");
        assert_eq!(selection.kind, ContentKind::Lesson);
        assert_eq!(selection.module_id, "m2");
        assert!(selection.matches(&outline.nodes()[2]));
        assert!(!selection.matches(&outline.nodes()[0]));
    }

    #[test]
    fn test_resolve_keeps_existing_selection() {
        let outline = outline();
        let selection = Selection::of(&outline.nodes()[1]);
        let node = resolve(&outline, Some(&selection)).unwrap();
        assert_eq!(node.id, "t1");
    }

    #[test]
    fn test_resolve_falls_back_to_first() {
        let outline = outline();
        let stale = Selection {
            id: "deleted".to_string(),
            kind: ContentKind::Topic,
            module_id: "m1".to_string(),
            lesson_id: "l1".to_string(),
        };
        assert_eq!(resolve(&outline, Some(&stale)).unwrap().id, "l1");
        assert_eq!(resolve(&outline, None).unwrap().id, "l1");
    }

    #[test]
    fn test_resolve_distinguishes_kind() {
        let outline = outline();
        let wrong_kind = Selection {
            id: "t1".to_string(),
            kind: ContentKind::Lesson,
            module_id: "m1".to_string(),
            lesson_id: "t1".to_string(),
        };
        assert_eq!(resolve(&outline, Some(&wrong_kind)).unwrap().id, "l1");
    }

    #[test]
    fn test_resolve_empty_outline() {
        let empty = Outline::default();
        assert!(resolve(&empty, None).is_none());
    }

    #[test]
    fn test_resolve_repeated_topic_id_stays_in_its_lesson() {
        let outline = flatten(
            &Course::new_with_id("c", "Course").with_module(
                Module::new_with_id("m1", "One", 1)
                    .with_lesson(
                        Lesson::new_with_id("l1", "L1", 1)
                            .with_topic(Topic::new_with_id("intro", "Intro", 1)),
                    )
                    .with_lesson(
                        Lesson::new_with_id("l2", "L2", 2)
                            .with_topic(Topic::new_with_id("intro", "Intro", 1)),
                    ),
            ),
        );
        let second = Selection::of(&outline.nodes()[3]);
        assert_eq!(second.lesson_id, "l2");
        assert!(!second.matches(&outline.nodes()[1]));

        let node = resolve(&outline, Some(&second)).unwrap();
        assert_eq!(node.global_index, 3);
        assert_eq!(node.display_number, "2.1");
    }

    #[test]
    fn test_resolve_repeated_lesson_id_stays_in_its_module() {
        let outline = flatten(
            &Course::new_with_id("c", "Course")
                .with_module(
                    Module::new_with_id("m1", "One", 1)
                        .with_lesson(Lesson::new_with_id("welcome", "Welcome", 1)),
                )
                .with_module(
                    Module::new_with_id("m2", "Two", 2)
                        .with_lesson(Lesson::new_with_id("welcome", "Welcome", 1)),
                ),
        );
        let selection = Selection::of(&outline.nodes()[1]);
        assert_eq!(selection.module_id, "m2");
        assert_eq!(resolve(&outline, Some(&selection)).unwrap().global_index, 1);
    }
}
