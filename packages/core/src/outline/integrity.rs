//! Integrity diagnostics for course trees
//!
//! The flattener tolerates malformed trees; this check reports what it had to
//! tolerate so the session can log it. Findings are informational only and
//! never influence flattening.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::forest::TopicForest;
use super::ordering::normalize;
use crate::config::ViewerConfig;
use crate::models::Course;

/// A defect found in a course tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TreeIssue {
    /// Two modules of the course share an id
    DuplicateModuleId { module_id: String },

    /// Two lessons of a module share an id
    DuplicateLessonId { module_id: String, lesson_id: String },

    /// Two different topics of a lesson share an id; the first one is kept
    DuplicateTopicId { lesson_id: String, topic_id: String },

    /// A topic names a parent that is not a topic of the same lesson
    DanglingParent {
        lesson_id: String,
        topic_id: String,
        parent_id: String,
    },

    /// A topic names itself as parent
    SelfParent { lesson_id: String, topic_id: String },

    /// Parent links form a cycle; the topic was promoted to the top level
    ParentCycle { lesson_id: String, topic_id: String },

    /// A topic is nested deeper than the configured maximum
    TooDeep {
        lesson_id: String,
        topic_id: String,
        depth: usize,
        max_depth: usize,
    },
}

impl fmt::Display for TreeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeIssue::DuplicateModuleId { module_id } => {
                write!(f, "Duplicate module id '{}'", module_id)
            }
            TreeIssue::DuplicateLessonId {
                module_id,
                lesson_id,
            } => write!(
                f,
                "Duplicate lesson id '{}' in module '{}'",
                lesson_id, module_id
            ),
            TreeIssue::DuplicateTopicId {
                lesson_id,
                topic_id,
            } => write!(
                f,
                "Conflicting topics share id '{}' in lesson '{}'",
                topic_id, lesson_id
            ),
            TreeIssue::DanglingParent {
                lesson_id,
                topic_id,
                parent_id,
            } => write!(
                f,
                "Topic '{}' in lesson '{}' references missing parent '{}'",
                topic_id, lesson_id, parent_id
            ),
            TreeIssue::SelfParent {
                lesson_id,
                topic_id,
            } => write!(
                f,
                "Topic '{}' in lesson '{}' references itself as parent",
                topic_id, lesson_id
            ),
            TreeIssue::ParentCycle {
                lesson_id,
                topic_id,
            } => write!(
                f,
                "Topic '{}' in lesson '{}' is part of a parent cycle",
                topic_id, lesson_id
            ),
            TreeIssue::TooDeep {
                lesson_id,
                topic_id,
                depth,
                max_depth,
            } => write!(
                f,
                "Topic '{}' in lesson '{}' is nested {} levels deep (max {})",
                topic_id, lesson_id, depth, max_depth
            ),
        }
    }
}

/// Report every defect in `course`, in normalized tree order
pub fn check_integrity(course: &Course, config: &ViewerConfig) -> Vec<TreeIssue> {
    let mut issues = Vec::new();
    let mut module_ids: HashSet<&str> = HashSet::new();

    for module in normalize(&course.modules) {
        if !module_ids.insert(module.id.as_str()) {
            issues.push(TreeIssue::DuplicateModuleId {
                module_id: module.id.clone(),
            });
        }

        let mut lesson_ids: HashSet<&str> = HashSet::new();
        for lesson in normalize(&module.lessons) {
            if !lesson_ids.insert(lesson.id.as_str()) {
                issues.push(TreeIssue::DuplicateLessonId {
                    module_id: module.id.clone(),
                    lesson_id: lesson.id.clone(),
                });
            }

            let forest = TopicForest::build(lesson);
            for conflict in forest.conflicts() {
                issues.push(TreeIssue::DuplicateTopicId {
                    lesson_id: lesson.id.clone(),
                    topic_id: conflict.id.clone(),
                });
            }

            let walk = forest.walk();
            let topic_ids: HashSet<&str> = walk
                .entries
                .iter()
                .map(|entry| entry.topic.id.as_str())
                .collect();

            for entry in &walk.entries {
                let topic = entry.topic;
                match topic.parent_id.as_deref() {
                    Some(parent_id) if parent_id == topic.id => {
                        issues.push(TreeIssue::SelfParent {
                            lesson_id: lesson.id.clone(),
                            topic_id: topic.id.clone(),
                        });
                    }
                    Some(parent_id) if !topic_ids.contains(parent_id) => {
                        issues.push(TreeIssue::DanglingParent {
                            lesson_id: lesson.id.clone(),
                            topic_id: topic.id.clone(),
                            parent_id: parent_id.to_string(),
                        });
                    }
                    _ => {}
                }

                if entry.depth() > config.max_topic_depth {
                    issues.push(TreeIssue::TooDeep {
                        lesson_id: lesson.id.clone(),
                        topic_id: topic.id.clone(),
                        depth: entry.depth(),
                        max_depth: config.max_topic_depth,
                    });
                }
            }

            for promoted in &walk.promoted {
                issues.push(TreeIssue::ParentCycle {
                    lesson_id: lesson.id.clone(),
                    topic_id: promoted.id.clone(),
                });
            }
        }
    }

    issues
}
