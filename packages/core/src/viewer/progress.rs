//! Learner progress shown alongside the outline

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Lessons the learner has completed, used for the TOC check marks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet {
    lessons: HashSet<String>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a lesson complete; returns false if it already was
    pub fn complete(&mut self, lesson_id: impl Into<String>) -> bool {
        self.lessons.insert(lesson_id.into())
    }

    pub fn uncomplete(&mut self, lesson_id: &str) -> bool {
        self.lessons.remove(lesson_id)
    }

    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.lessons.contains(lesson_id)
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Drop lessons that no longer exist in the course
    pub fn retain_known<'a>(&mut self, lesson_ids: impl IntoIterator<Item = &'a str>) {
        let known: HashSet<&str> = lesson_ids.into_iter().collect();
        self.lessons.retain(|id| known.contains(id.as_str()));
    }
}

impl<S: Into<String>> FromIterator<S> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lessons: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Course score as recorded by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    #[serde(default)]
    pub obtained_score: f64,
    #[serde(default)]
    pub total_score: f64,
    #[serde(default)]
    pub is_completed: bool,
}

impl ScoreCard {
    /// Score as a percentage in `0..=100`; 0 when nothing can be scored
    pub fn percentage(&self) -> f64 {
        if self.total_score <= 0.0 {
            return 0.0;
        }
        (self.obtained_score / self.total_score * 100.0).clamp(0.0, 100.0)
    }
}
