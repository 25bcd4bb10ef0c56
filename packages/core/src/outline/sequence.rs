//! The flattened content sequence of a course
//!
//! An [`Outline`] is the single source of truth consumed by every surface that
//! needs numbering or navigation: the table of contents, the lesson viewer and
//! the breadcrumb. It is rebuilt from scratch whenever the course tree changes.

use std::collections::HashMap;
use std::ops::Range;

use serde::Serialize;

use super::navigator::{self, Boundaries};
use crate::models::{ContentKind, ContentNode, ModuleRef};

/// A module of the outline with the slice of content nodes it owns
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleEntry {
    pub module: ModuleRef,
    pub description: String,
    /// Global indices of the module's lessons and topics (empty for modules without lessons)
    pub nodes: Range<usize>,
}

/// One step of a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Crumb {
    pub kind: ContentKind,
    pub id: String,
    pub title: String,
    pub display_number: String,
}

/// Module, lesson and ancestor topics leading to a content node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    pub module: ModuleRef,
    /// From the owning lesson down to the node itself
    pub trail: Vec<Crumb>,
}

impl Breadcrumb {
    /// Titles joined with `separator`, starting at the module
    pub fn render(&self, separator: &str) -> String {
        std::iter::once(self.module.title.as_str())
            .chain(self.trail.iter().map(|crumb| crumb.title.as_str()))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Flattened, numbered content sequence of one course snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    nodes: Vec<ContentNode>,
    modules: Vec<ModuleEntry>,
    /// Scoped identity to position; ids repeat across lessons and modules
    #[serde(skip)]
    index: HashMap<ScopedId, usize>,
}

/// (kind, module id, lesson id, node id)
type ScopedId = (ContentKind, String, String, String);

fn scoped_id(kind: ContentKind, module_id: &str, lesson_id: &str, id: &str) -> ScopedId {
    (
        kind,
        module_id.to_string(),
        lesson_id.to_string(),
        id.to_string(),
    )
}

impl Outline {
    pub(crate) fn from_parts(nodes: Vec<ContentNode>, modules: Vec<ModuleEntry>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for node in &nodes {
            // First occurrence wins when a malformed tree repeats an id
            index
                .entry(scoped_id(node.kind, &node.module.id, &node.lesson_id, &node.id))
                .or_insert(node.global_index);
        }
        Self {
            nodes,
            modules,
            index,
        }
    }

    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, global_index: usize) -> Option<&ContentNode> {
        self.nodes.get(global_index)
    }

    pub fn first(&self) -> Option<&ContentNode> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&ContentNode> {
        self.nodes.last()
    }

    /// Modules in normalized order, including modules without lessons
    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    pub fn module(&self, module_id: &str) -> Option<&ModuleEntry> {
        self.modules.iter().find(|entry| entry.module.id == module_id)
    }

    /// Content nodes owned by a module
    pub fn module_nodes(&self, entry: &ModuleEntry) -> &[ContentNode] {
        self.nodes.get(entry.nodes.clone()).unwrap_or(&[])
    }

    /// First node with this id and kind in outline order.
    ///
    /// Topic ids only need to be unique within a lesson and lesson ids within
    /// a module, so this is for callers that know the id is unambiguous. Use
    /// [`Outline::locate`] to address one node exactly.
    pub fn find(&self, id: &str, kind: ContentKind) -> Option<&ContentNode> {
        self.nodes
            .iter()
            .find(|node| node.kind == kind && node.id == id)
    }

    /// The node with this id and kind inside the given module and lesson
    pub fn locate(
        &self,
        kind: ContentKind,
        module_id: &str,
        lesson_id: &str,
        id: &str,
    ) -> Option<&ContentNode> {
        self.index
            .get(&scoped_id(kind, module_id, lesson_id, id))
            .and_then(|&global_index| self.nodes.get(global_index))
    }

    /// Whether the module owns a node with this id and kind
    pub fn module_contains(&self, module_id: &str, id: &str, kind: ContentKind) -> bool {
        self.module(module_id).is_some_and(|entry| {
            self.module_nodes(entry)
                .iter()
                .any(|node| node.kind == kind && node.id == id)
        })
    }

    /// Whether `node` is the node at its `global_index` in this outline
    pub fn contains(&self, node: &ContentNode) -> bool {
        navigator::belongs_to(&self.nodes, node)
    }

    /// Course-wide lesson number of every lesson, keyed by (module id, lesson id)
    pub fn lesson_numbers(&self) -> HashMap<(String, String), usize> {
        let mut numbers = HashMap::new();
        for node in self.nodes.iter().filter(|node| node.is_lesson()) {
            numbers
                .entry((node.module.id.clone(), node.id.clone()))
                .or_insert(node.lesson_number);
        }
        numbers
    }

    pub fn previous(&self, current: &ContentNode) -> Option<&ContentNode> {
        navigator::previous(&self.nodes, current)
    }

    pub fn next(&self, current: &ContentNode) -> Option<&ContentNode> {
        navigator::next(&self.nodes, current)
    }

    pub fn boundaries(&self, current: &ContentNode) -> Boundaries {
        navigator::boundaries(&self.nodes, current)
    }

    /// Breadcrumb for a node of this outline.
    ///
    /// Relies on pre-order: the parent of a node at depth `d` is the closest
    /// preceding node at depth `d - 1`.
    pub fn breadcrumb(&self, node: &ContentNode) -> Option<Breadcrumb> {
        if !self.contains(node) {
            return None;
        }

        let mut trail = vec![Crumb::of(node)];
        let mut depth = node.depth;
        for candidate in self.nodes[..node.global_index].iter().rev() {
            if depth == 0 {
                break;
            }
            if candidate.depth < depth {
                trail.push(Crumb::of(candidate));
                depth = candidate.depth;
            }
        }
        trail.reverse();

        Some(Breadcrumb {
            module: node.module.clone(),
            trail,
        })
    }
}

impl Crumb {
    fn of(node: &ContentNode) -> Self {
        Self {
            kind: node.kind,
            id: node.id.clone(),
            title: node.title.clone(),
            display_number: node.display_number.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a ContentNode;
    type IntoIter = std::slice::Iter<'a, ContentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
