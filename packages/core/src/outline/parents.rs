//! Parent candidates for the topic authoring form
//!
//! A new topic may be nested under any existing topic of the same lesson. The
//! candidates are listed in the same pre-order as the outline, with their
//! depth for indentation and their position number within the lesson.

use serde::Serialize;

use super::forest::TopicForest;
use crate::models::Lesson;

/// A topic that can be chosen as parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentOption {
    pub id: String,
    pub title: String,
    /// 0 for top-level topics
    pub depth: usize,
    /// Position within the lesson, e.g. "1.2" (without the lesson number)
    pub number: String,
}

impl ParentOption {
    /// Title indented by depth, as shown in the picker
    pub fn label(&self) -> String {
        format!("{}{}", "— ".repeat(self.depth), self.title)
    }
}

/// Every topic of `lesson`, in outline order, as a parent candidate
pub fn topic_parent_options(lesson: &Lesson) -> Vec<ParentOption> {
    TopicForest::build(lesson)
        .walk()
        .entries
        .into_iter()
        .map(|entry| ParentOption {
            id: entry.topic.id.clone(),
            title: entry.topic.title.clone(),
            depth: entry.depth() - 1,
            number: entry
                .path
                .iter()
                .map(|segment| segment.to_string())
                .collect::<Vec<_>>()
                .join("."),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Topic;

    #[test]
    fn test_options_follow_outline_order() {
        let lesson = Lesson::new_with_id("l1", "Lesson", 1)
            .with_topic(Topic::new_with_id("b", "Second", 2))
            .with_topic(
                Topic::new_with_id("a", "First", 1)
                    .with_child(Topic::new_with_id("a1", "Nested", 1)),
            );

        let options = topic_parent_options(&lesson);
        let summary: Vec<(&str, usize, &str)> = options
            .iter()
            .map(|o| (o.id.as_str(), o.depth, o.number.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("a", 0, "1"), ("a1", 1, "1.1"), ("b", 0, "2")]
        );
        assert_eq!(options[1].label(), "— Nested");
        assert_eq!(options[0].label(), "First");
    }

    #[test]
    fn test_no_topics_no_options() {
        let lesson = Lesson::new_with_id("l1", "Lesson", 1);
        assert!(topic_parent_options(&lesson).is_empty());
    }
}
