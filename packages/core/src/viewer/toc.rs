//! Table of contents state
//!
//! Expansion is tracked per module id and is independent of the selection:
//! toggling a module never moves the current node, and selecting a node never
//! changes which modules are expanded. The only coupling is presentational:
//! on a narrow viewport the panel closes after a selection.

use std::collections::HashSet;

use serde::Serialize;

use super::progress::CompletionSet;
use super::selection::Selection;
use crate::config::ViewerConfig;
use crate::models::ContentKind;
use crate::outline::Outline;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocState {
    expanded: HashSet<String>,
    known_modules: HashSet<String>,
    panel_open: bool,
}

/// One rendered line of the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "row", rename_all = "camelCase")]
pub enum TocRow {
    #[serde(rename_all = "camelCase")]
    Module {
        id: String,
        title: String,
        position: usize,
        expanded: bool,
        /// The current selection lives in this module
        contains_current: bool,
    },
    #[serde(rename_all = "camelCase")]
    Content {
        kind: ContentKind,
        id: String,
        module_id: String,
        lesson_id: String,
        title: String,
        display_number: String,
        /// 0 for lessons, topic nesting depth otherwise
        depth: usize,
        active: bool,
        completed: bool,
    },
}

impl TocState {
    /// Initial state for a freshly loaded course
    pub fn for_outline(outline: &Outline, config: &ViewerConfig) -> Self {
        let known_modules: HashSet<String> = outline
            .modules()
            .iter()
            .map(|entry| entry.module.id.clone())
            .collect();
        let expanded = if config.expand_all_on_load {
            known_modules.clone()
        } else {
            HashSet::new()
        };

        Self {
            expanded,
            known_modules,
            panel_open: true,
        }
    }

    pub fn is_expanded(&self, module_id: &str) -> bool {
        self.expanded.contains(module_id)
    }

    /// Flip one module; returns its new state
    pub fn toggle_module(&mut self, module_id: &str) -> bool {
        if self.expanded.remove(module_id) {
            false
        } else {
            self.expanded.insert(module_id.to_string());
            true
        }
    }

    pub fn set_expanded(&mut self, module_id: &str, expanded: bool) {
        if expanded {
            self.expanded.insert(module_id.to_string());
        } else {
            self.expanded.remove(module_id);
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded = self.known_modules.clone();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Carry expansion over to a reloaded outline.
    ///
    /// Modules that disappeared are forgotten, modules seen before keep their
    /// state, and modules seen for the first time follow `expand_new_modules`.
    pub fn sync_modules(&mut self, outline: &Outline, config: &ViewerConfig) {
        let current: HashSet<String> = outline
            .modules()
            .iter()
            .map(|entry| entry.module.id.clone())
            .collect();

        self.expanded.retain(|id| current.contains(id));
        if config.expand_new_modules {
            for id in current.difference(&self.known_modules) {
                self.expanded.insert(id.clone());
            }
        }
        self.known_modules = current;
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    pub fn toggle_panel(&mut self) -> bool {
        self.panel_open = !self.panel_open;
        self.panel_open
    }

    /// Presentation side effect of choosing an entry in the TOC
    pub fn on_select(&mut self, viewport_width: u32, config: &ViewerConfig) {
        if config.is_narrow(viewport_width) {
            self.panel_open = false;
        }
    }

    /// Rows to render, in outline order; collapsed modules show only their header
    pub fn rows(
        &self,
        outline: &Outline,
        selection: Option<&Selection>,
        completed: &CompletionSet,
    ) -> Vec<TocRow> {
        let mut rows = Vec::with_capacity(outline.len() + outline.modules().len());

        for entry in outline.modules() {
            let expanded = self.is_expanded(&entry.module.id);
            let contains_current = selection.is_some_and(|s| {
                s.module_id == entry.module.id && s.locate(outline).is_some()
            });
            rows.push(TocRow::Module {
                id: entry.module.id.clone(),
                title: entry.module.title.clone(),
                position: entry.module.position,
                expanded,
                contains_current,
            });

            if !expanded {
                continue;
            }

            for node in outline.module_nodes(entry) {
                rows.push(TocRow::Content {
                    kind: node.kind,
                    id: node.id.clone(),
                    module_id: node.module.id.clone(),
                    lesson_id: node.lesson_id.clone(),
                    title: node.title.clone(),
                    display_number: node.display_number.clone(),
                    depth: node.depth,
                    active: selection.is_some_and(|s| s.matches(node)),
                    completed: node.is_lesson() && completed.is_completed(&node.id),
                });
            }
        }

        rows
    }
}
