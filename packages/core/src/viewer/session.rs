//! Viewer session: one course snapshot with its outline and UI state
//!
//! Every snapshot is flattened to completion and the selection re-resolved
//! before `apply_snapshot` returns, so the outline and the selection a caller
//! reads always come from the same tree version.

use tracing::{debug, warn};

use super::progress::CompletionSet;
use super::selection::{self, Selection};
use super::toc::{TocRow, TocState};
use crate::config::ViewerConfig;
use crate::models::{ContentNode, Course};
use crate::outline::{check_integrity, flatten, Boundaries, Breadcrumb, Outline, TreeIssue};

#[derive(Debug, Clone)]
pub struct CourseSession {
    config: ViewerConfig,
    version: u64,
    course: Option<Course>,
    outline: Outline,
    issues: Vec<TreeIssue>,
    toc: TocState,
    selection: Option<Selection>,
    completed: CompletionSet,
}

impl CourseSession {
    /// An empty session; nothing is selected until a snapshot is applied
    pub fn new(config: ViewerConfig) -> Self {
        let outline = Outline::default();
        let toc = TocState::for_outline(&outline, &config);
        Self {
            config,
            version: 0,
            course: None,
            outline,
            issues: Vec::new(),
            toc,
            selection: None,
            completed: CompletionSet::new(),
        }
    }

    /// Replace the course tree with a newly fetched snapshot.
    ///
    /// Returns the new snapshot version.
    pub fn apply_snapshot(&mut self, course: Course) -> u64 {
        let outline = flatten(&course);
        let issues = check_integrity(&course, &self.config);
        for issue in &issues {
            warn!(course_id = %course.id, "Course tree issue: {}", issue);
        }

        let same_course = self.course.as_ref().is_some_and(|c| c.id == course.id);
        if same_course {
            self.toc.sync_modules(&outline, &self.config);
        } else {
            self.toc = TocState::for_outline(&outline, &self.config);
        }

        let previous = self.selection.take();
        self.selection = selection::resolve(&outline, previous.as_ref()).map(Selection::of);
        if let (Some(before), Some(after)) = (&previous, &self.selection) {
            if before != after {
                debug!(
                    "Selection '{}' no longer exists, falling back to '{}'",
                    before.id, after.id
                );
            }
        }

        self.completed
            .retain_known(outline.iter().filter(|n| n.is_lesson()).map(|n| n.id.as_str()));

        self.version += 1;
        debug!(
            course_id = %course.id,
            version = self.version,
            nodes = outline.len(),
            "Applied course snapshot"
        );

        self.outline = outline;
        self.issues = issues;
        self.course = Some(course);
        self.version
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Integrity findings of the current snapshot
    pub fn issues(&self) -> &[TreeIssue] {
        &self.issues
    }

    pub fn toc(&self) -> &TocState {
        &self.toc
    }

    pub fn toc_mut(&mut self) -> &mut TocState {
        &mut self.toc
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn completed(&self) -> &CompletionSet {
        &self.completed
    }

    pub fn completed_mut(&mut self) -> &mut CompletionSet {
        &mut self.completed
    }

    pub fn current_node(&self) -> Option<&ContentNode> {
        self.selection
            .as_ref()
            .and_then(|s| s.locate(&self.outline))
    }

    /// Select a node from the TOC. Targets missing from the outline leave the
    /// selection unchanged.
    pub fn select(&mut self, target: &Selection, viewport_width: u32) -> Option<&ContentNode> {
        let selection = Selection::of(target.locate(&self.outline)?);
        self.selection = Some(selection);
        self.toc.on_select(viewport_width, &self.config);
        self.current_node()
    }

    /// Move to the previous node; `None` at the first node
    pub fn go_previous(&mut self) -> Option<&ContentNode> {
        let target = self
            .current_node()
            .and_then(|node| self.outline.previous(node))
            .map(Selection::of)?;
        self.selection = Some(target);
        self.current_node()
    }

    /// Move to the next node; `None` at the last node
    pub fn go_next(&mut self) -> Option<&ContentNode> {
        let target = self
            .current_node()
            .and_then(|node| self.outline.next(node))
            .map(Selection::of)?;
        self.selection = Some(target);
        self.current_node()
    }

    /// Boundary state of the current node; with no selection both controls are disabled
    pub fn boundaries(&self) -> Boundaries {
        match self.current_node() {
            Some(node) => self.outline.boundaries(node),
            None => Boundaries {
                at_first: true,
                at_last: true,
            },
        }
    }

    pub fn breadcrumb(&self) -> Option<Breadcrumb> {
        self.current_node()
            .and_then(|node| self.outline.breadcrumb(node))
    }

    pub fn toc_rows(&self) -> Vec<TocRow> {
        self.toc
            .rows(&self.outline, self.selection.as_ref(), &self.completed)
    }
}
