//! Flattener / numbering engine
//!
//! Turns a course tree into the linear, numbered sequence shared by the table
//! of contents and the lesson viewer:
//!
//! 1. Modules are normalized, then the lessons of each module.
//! 2. Every lesson advances a course-wide lesson counter `L` (topics never do)
//!    and is emitted as `"L"`.
//! 3. The lesson's topics follow in pre-order; the i-th sibling under a node
//!    numbered `P` is `"P.i"`.
//! 4. Lessons and topics share one running `global_index`.
//!
//! Flattening is pure: the input is never mutated and the same tree always
//! yields the same outline.

use super::forest::TopicForest;
use super::ordering::normalize;
use super::sequence::{ModuleEntry, Outline};
use crate::models::{ContentNode, Course, ModuleRef};

/// Flatten a course into its numbered content sequence
pub fn flatten(course: &Course) -> Outline {
    let mut nodes: Vec<ContentNode> = Vec::new();
    let mut modules: Vec<ModuleEntry> = Vec::with_capacity(course.modules.len());
    let mut lesson_number = 0;

    for (module_index, module) in normalize(&course.modules).into_iter().enumerate() {
        let module_ref = ModuleRef::of(module, module_index + 1);
        let first_index = nodes.len();

        for lesson in normalize(&module.lessons) {
            lesson_number += 1;
            let lesson_node = ContentNode::lesson(lesson, &module_ref, nodes.len(), lesson_number);

            let forest = TopicForest::build(lesson);
            nodes.reserve(1 + forest.len());
            let walk = forest.walk();
            let topic_nodes: Vec<ContentNode> = walk
                .entries
                .iter()
                .enumerate()
                .map(|(offset, entry)| {
                    ContentNode::topic(
                        entry.topic,
                        &lesson_node,
                        entry.parent,
                        lesson_node.global_index + 1 + offset,
                        &entry.path,
                    )
                })
                .collect();

            nodes.push(lesson_node);
            nodes.extend(topic_nodes);
        }

        modules.push(ModuleEntry {
            module: module_ref,
            description: module.description.clone(),
            nodes: first_index..nodes.len(),
        });
    }

    Outline::from_parts(nodes, modules)
}
