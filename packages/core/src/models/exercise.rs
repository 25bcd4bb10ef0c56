//! Exercise payloads
//!
//! Exercises arrive with a free-form `description`. Structured activities
//! (match, quiz, drag-and-drop) are encoded as a JSON object in that field;
//! anything else is rich text. The payload is decoded once, when the exercise
//! is deserialized, into [`ExercisePayload`].

use serde::{Deserialize, Serialize};

/// A left/right pair of a match activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

/// A multiple-choice question of a quiz activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// A prompt with its accepted answers in a drag-and-drop activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragItem {
    pub prompt: String,
    pub matches: Vec<String>,
}

/// Structured activity encodings, discriminated by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum StructuredPayload {
    Match { pairs: Vec<MatchPair> },
    Quiz { questions: Vec<QuizQuestion> },
    DragDrop { items: Vec<DragItem> },
}

/// Decoded exercise payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExercisePayload {
    Match(Vec<MatchPair>),
    Quiz(Vec<QuizQuestion>),
    DragDrop(Vec<DragItem>),
    /// Plain rich-text exercise; holds the raw description
    RichText(String),
}

impl ExercisePayload {
    /// Decode a description; never fails, unknown shapes become rich text
    pub fn parse(description: &str) -> Self {
        match serde_json::from_str::<StructuredPayload>(description) {
            Ok(StructuredPayload::Match { pairs }) => ExercisePayload::Match(pairs),
            Ok(StructuredPayload::Quiz { questions }) => ExercisePayload::Quiz(questions),
            Ok(StructuredPayload::DragDrop { items }) => ExercisePayload::DragDrop(items),
            Err(_) => ExercisePayload::RichText(description.to_string()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ExercisePayload::Match(_) => "match",
            ExercisePayload::Quiz(_) => "quiz",
            ExercisePayload::DragDrop(_) => "drag-drop",
            ExercisePayload::RichText(_) => "richtext",
        }
    }
}

/// Wire representation of an exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_order")]
    order: i64,
}

fn default_order() -> i64 {
    1
}

/// An exercise attached to a lesson or topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExerciseRecord", into = "ExerciseRecord")]
pub struct Exercise {
    pub id: String,
    pub title: String,
    /// Raw description as stored by the backend
    pub description: String,
    pub order: i64,
    /// Payload decoded from `description`
    pub payload: ExercisePayload,
}

impl Exercise {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        ExerciseRecord {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            order: default_order(),
        }
        .into()
    }
}

impl From<ExerciseRecord> for Exercise {
    fn from(record: ExerciseRecord) -> Self {
        let payload = ExercisePayload::parse(&record.description);
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            order: record.order,
            payload,
        }
    }
}

impl From<Exercise> for ExerciseRecord {
    fn from(exercise: Exercise) -> Self {
        Self {
            id: exercise.id,
            title: exercise.title,
            description: exercise.description,
            order: exercise.order,
        }
    }
}
