//! Data Models
//!
//! This module contains the data structures shared throughout CourseTree:
//!
//! - `Course`, `Module`, `Lesson`, `Topic` - the content tree as delivered by the backend
//! - `Exercise` / `ExercisePayload` - exercises with their payload decoded at load time
//! - `ContentNode` - a lesson or topic placed into the flattened, numbered sequence

mod content_node;
mod course;
mod exercise;

pub use content_node::{ContentKind, ContentNode, ModuleRef};
pub use course::{
    Course, HeroMedia, HeroMediaType, KeyTakeaway, Lesson, Module, Resource, Topic,
};
pub use exercise::{DragItem, Exercise, ExercisePayload, MatchPair, QuizQuestion};
