//! Content nodes: lessons and topics placed into the numbered viewing sequence

use serde::{Deserialize, Serialize};

use super::course::{HeroMedia, KeyTakeaway, Lesson, Module, Resource, Topic};
use super::exercise::Exercise;

/// Whether a content node is a lesson or a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Lesson,
    Topic,
}

/// The module a content node belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRef {
    pub id: String,
    pub title: String,
    /// 1-based position of the module in normalized order
    pub position: usize,
}

impl ModuleRef {
    pub(crate) fn of(module: &Module, position: usize) -> Self {
        Self {
            id: module.id.clone(),
            title: module.title.clone(),
            position,
        }
    }
}

/// A lesson or topic at its place in a flattened course.
///
/// Produced fresh by every flatten and never mutated afterwards. Side content
/// (takeaways, exercises, resources) is sorted by its `order` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    pub kind: ContentKind,
    pub id: String,
    pub title: String,
    pub content: String,

    /// Lesson this node belongs to (its own id for lesson nodes)
    pub lesson_id: String,
    pub module: ModuleRef,

    /// Dense 0-based position in the flattened sequence
    pub global_index: usize,

    /// Dotted human-facing number, e.g. "2.1.3"
    pub display_number: String,

    /// Course-wide 1-based number of the owning lesson
    pub lesson_number: usize,

    /// Topic this node was emitted under; `None` for lessons and top-level topics
    pub parent_topic_id: Option<String>,

    /// 0 for lessons, 1 for top-level topics, and so on
    pub depth: usize,

    pub hero_media: Option<HeroMedia>,
    pub takeaways: Vec<KeyTakeaway>,
    pub exercises: Vec<Exercise>,
    pub resources: Vec<Resource>,
}

fn sorted_by_order<T: Clone>(items: &[T], order: impl Fn(&T) -> i64) -> Vec<T> {
    let mut items = items.to_vec();
    items.sort_by_key(|item| order(item));
    items
}

impl ContentNode {
    pub(crate) fn lesson(
        lesson: &Lesson,
        module: &ModuleRef,
        global_index: usize,
        lesson_number: usize,
    ) -> Self {
        Self {
            kind: ContentKind::Lesson,
            id: lesson.id.clone(),
            title: lesson.title.clone(),
            content: lesson.content.clone(),
            lesson_id: lesson.id.clone(),
            module: module.clone(),
            global_index,
            display_number: lesson_number.to_string(),
            lesson_number,
            parent_topic_id: None,
            depth: 0,
            hero_media: lesson.hero_media(),
            takeaways: sorted_by_order(&lesson.takeaways, |t| t.order),
            exercises: sorted_by_order(&lesson.exercises, |e| e.order),
            resources: sorted_by_order(&lesson.resources, |r| r.order),
        }
    }

    pub(crate) fn topic(
        topic: &Topic,
        lesson_node: &ContentNode,
        parent: Option<&Topic>,
        global_index: usize,
        path: &[usize],
    ) -> Self {
        let mut display_number = lesson_node.display_number.clone();
        for segment in path {
            display_number.push('.');
            display_number.push_str(&segment.to_string());
        }

        Self {
            kind: ContentKind::Topic,
            id: topic.id.clone(),
            title: topic.title.clone(),
            content: topic.content.clone(),
            lesson_id: lesson_node.lesson_id.clone(),
            module: lesson_node.module.clone(),
            global_index,
            display_number,
            lesson_number: lesson_node.lesson_number,
            parent_topic_id: parent.map(|p| p.id.clone()),
            depth: path.len(),
            hero_media: topic.hero_media(),
            takeaways: sorted_by_order(&topic.takeaways, |t| t.order),
            exercises: sorted_by_order(&topic.exercises, |e| e.order),
            resources: sorted_by_order(&topic.resources, |r| r.order),
        }
    }

    pub fn is_lesson(&self) -> bool {
        self.kind == ContentKind::Lesson
    }

    pub fn is_topic(&self) -> bool {
        self.kind == ContentKind::Topic
    }
}
