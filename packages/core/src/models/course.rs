//! Course Tree Data Structures
//!
//! This module defines the content tree the backend delivers for a course:
//! `Course → Module[] → Lesson[] → Topic[]`, where topics nest recursively.
//!
//! # Wire Shape
//!
//! The backend serializes camelCase JSON. Each lesson's `topics` list holds
//! every topic of the lesson (each carrying its `parentId`), and every topic
//! additionally carries its own `children` nested underneath. The outline
//! engine accepts both this shape and a purely nested one (roots in `topics`,
//! descendants only in `children`), which is what the builders below produce.
//!
//! # Examples
//!
//! ```rust
//! use coursetree_core::models::{Course, Lesson, Module, Topic};
//!
//! let course = Course::new_with_id("c1", "Algebra").with_module(
//!     Module::new_with_id("m1", "Foundations", 1).with_lesson(
//!         Lesson::new_with_id("l1", "Variables", 1)
//!             .with_topic(Topic::new_with_id("t1", "Naming", 1)),
//!     ),
//! );
//! assert_eq!(course.modules[0].lessons[0].topics[0].lesson_id.as_deref(), Some("l1"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exercise::Exercise;
use crate::error::Result;

/// Default order value for serde deserialization (the backend's default)
fn default_order() -> i64 {
    1
}

/// Kind of hero media shown above lesson or topic content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroMediaType {
    Image,
    Video,
}

/// Resolved hero media descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroMedia {
    pub media_type: HeroMediaType,
    pub url: String,
}

/// A short "key takeaway" bullet attached to a lesson or topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyTakeaway {
    pub id: String,
    pub content: String,
    #[serde(default = "default_order")]
    pub order: i64,
}

/// An external resource (link) attached to a lesson or topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default = "default_order")]
    pub order: i64,
}

/// A topic within a lesson; topics nest to arbitrary depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,

    /// Opaque rich-text content
    #[serde(default)]
    pub content: String,

    #[serde(default = "default_order")]
    pub order: i64,

    /// Owning lesson, when the backend includes it
    #[serde(default)]
    pub lesson_id: Option<String>,

    /// Parent topic within the same lesson (`None` for top-level topics)
    #[serde(default)]
    pub parent_id: Option<String>,

    #[serde(default)]
    pub children: Vec<Topic>,

    #[serde(default)]
    pub hero_media_type: Option<HeroMediaType>,
    #[serde(default)]
    pub hero_media_url: Option<String>,

    #[serde(default)]
    pub takeaways: Vec<KeyTakeaway>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub resources: Vec<Resource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A lesson within a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,

    /// Opaque rich-text content
    #[serde(default)]
    pub content: String,

    #[serde(default = "default_order")]
    pub order: i64,

    #[serde(default)]
    pub module_id: Option<String>,

    #[serde(default)]
    pub topics: Vec<Topic>,

    #[serde(default)]
    pub hero_media_type: Option<HeroMediaType>,
    #[serde(default)]
    pub hero_media_url: Option<String>,

    #[serde(default)]
    pub takeaways: Vec<KeyTakeaway>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub resources: Vec<Resource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A module groups lessons within a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_order")]
    pub order: i64,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Root of the content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub teacher_class_id: Option<String>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn hero_media(media_type: Option<HeroMediaType>, url: Option<&str>) -> Option<HeroMedia> {
    match (media_type, url) {
        (Some(media_type), Some(url)) if !url.is_empty() => Some(HeroMedia {
            media_type,
            url: url.to_string(),
        }),
        _ => None,
    }
}

impl Topic {
    /// Create a new Topic with auto-generated UUID
    pub fn new(title: impl Into<String>, order: i64) -> Self {
        Self::new_with_id(Uuid::new_v4().to_string(), title, order)
    }

    /// Create a new Topic with an explicit id
    pub fn new_with_id(id: impl Into<String>, title: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            order,
            lesson_id: None,
            parent_id: None,
            children: Vec::new(),
            hero_media_type: None,
            hero_media_url: None,
            takeaways: Vec::new(),
            exercises: Vec::new(),
            resources: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the rich-text content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Nest a child topic under this one, linking its `parent_id`
    pub fn with_child(mut self, mut child: Topic) -> Self {
        child.parent_id = Some(self.id.clone());
        self.children.push(child);
        self
    }

    /// Hero media, when both type and url are present
    pub fn hero_media(&self) -> Option<HeroMedia> {
        hero_media(self.hero_media_type, self.hero_media_url.as_deref())
    }

    /// Number of topics nested below this one (all depths)
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    fn assign_lesson(&mut self, lesson_id: &str) {
        self.lesson_id = Some(lesson_id.to_string());
        for child in &mut self.children {
            child.assign_lesson(lesson_id);
        }
    }
}

impl Lesson {
    /// Create a new Lesson with auto-generated UUID
    pub fn new(title: impl Into<String>, order: i64) -> Self {
        Self::new_with_id(Uuid::new_v4().to_string(), title, order)
    }

    /// Create a new Lesson with an explicit id
    pub fn new_with_id(id: impl Into<String>, title: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            order,
            module_id: None,
            topics: Vec::new(),
            hero_media_type: None,
            hero_media_url: None,
            takeaways: Vec::new(),
            exercises: Vec::new(),
            resources: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the rich-text content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Attach a top-level topic (and its nested children) to this lesson
    pub fn with_topic(mut self, mut topic: Topic) -> Self {
        topic.assign_lesson(&self.id);
        self.topics.push(topic);
        self
    }

    /// Hero media, when both type and url are present
    pub fn hero_media(&self) -> Option<HeroMedia> {
        hero_media(self.hero_media_type, self.hero_media_url.as_deref())
    }
}

impl Module {
    /// Create a new Module with auto-generated UUID
    pub fn new(title: impl Into<String>, order: i64) -> Self {
        Self::new_with_id(Uuid::new_v4().to_string(), title, order)
    }

    /// Create a new Module with an explicit id
    pub fn new_with_id(id: impl Into<String>, title: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            order,
            course_id: None,
            lessons: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_lesson(mut self, mut lesson: Lesson) -> Self {
        lesson.module_id = Some(self.id.clone());
        self.lessons.push(lesson);
        self
    }
}

impl Course {
    /// Create a new Course with auto-generated UUID
    pub fn new(title: impl Into<String>) -> Self {
        Self::new_with_id(Uuid::new_v4().to_string(), title)
    }

    /// Create a new Course with an explicit id
    pub fn new_with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            teacher_class_id: None,
            modules: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_module(mut self, mut module: Module) -> Self {
        module.course_id = Some(self.id.clone());
        self.modules.push(module);
        self
    }

    /// Decode a course tree from the backend's JSON representation
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Find a lesson anywhere in the course
    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.modules
            .iter()
            .flat_map(|module| module.lessons.iter())
            .find(|lesson| lesson.id == lesson_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builders_link_parents() {
        let lesson = Lesson::new_with_id("l1", "Intro", 1).with_topic(
            Topic::new_with_id("t1", "Root", 1).with_child(Topic::new_with_id("t1a", "Child", 1)),
        );
        let root = &lesson.topics[0];
        assert_eq!(root.lesson_id.as_deref(), Some("l1"));
        assert!(root.parent_id.is_none());
        assert_eq!(root.children[0].parent_id.as_deref(), Some("t1"));
        assert_eq!(root.children[0].lesson_id.as_deref(), Some("l1"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Topic::new("A", 1);
        let b = Topic::new("A", 1);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_identically_built_courses_are_equal() {
        let build = || {
            Course::new_with_id("c", "Course").with_module(
                Module::new_with_id("m1", "One", 1).with_lesson(Lesson::new_with_id("l1", "L1", 1)),
            )
        };
        assert_eq!(build(), build());
        assert!(build().created_at.is_none());
    }

    #[test]
    fn test_descendant_count() {
        let topic = Topic::new_with_id("t1", "Root", 1)
            .with_child(Topic::new_with_id("t1a", "A", 1).with_child(Topic::new_with_id("t1a1", "A1", 1)))
            .with_child(Topic::new_with_id("t1b", "B", 2));
        assert_eq!(topic.descendant_count(), 3);
    }

    #[test]
    fn test_deserialize_backend_payload() {
        let payload = json!({
            "id": "c1",
            "title": "Course",
            "description": "",
            "createdAt": "2025-01-03T10:00:00Z",
            "modules": [{
                "id": "m1",
                "title": "Module",
                "description": "",
                "courseId": "c1",
                "lessons": [{
                    "id": "l1",
                    "title": "Lesson",
                    "content": "<p>Hello</p>",
                    "moduleId": "m1",
                    "order": 3,
                    "heroMediaType": "video",
                    "heroMediaUrl": "https://example.com/v.mp4",
                    "topics": [{
                        "id": "t1",
                        "title": "Topic",
                        "content": "",
                        "order": 1,
                        "lessonId": "l1",
                        "parentId": null,
                        "children": [],
                        "takeaways": [],
                        "exercises": [],
                        "resources": []
                    }],
                    "takeaways": [{"id": "k1", "content": "Remember", "order": 1}],
                    "exercises": [],
                    "resources": [{"id": "r1", "title": "Docs", "url": "https://example.com"}]
                }]
            }]
        });

        let course: Course = serde_json::from_value(payload).unwrap();
        let module = &course.modules[0];
        // Missing order falls back to the backend default
        assert_eq!(module.order, 1);

        let lesson = &module.lessons[0];
        assert_eq!(lesson.order, 3);
        assert_eq!(
            lesson.hero_media(),
            Some(HeroMedia {
                media_type: HeroMediaType::Video,
                url: "https://example.com/v.mp4".to_string()
            })
        );
        assert_eq!(lesson.topics[0].lesson_id.as_deref(), Some("l1"));
        assert_eq!(lesson.resources[0].order, 1);
        assert!(course.created_at.is_some());
    }

    #[test]
    fn test_hero_media_requires_url() {
        let mut lesson = Lesson::new_with_id("l1", "Lesson", 1);
        lesson.hero_media_type = Some(HeroMediaType::Image);
        assert!(lesson.hero_media().is_none());

        lesson.hero_media_url = Some(String::new());
        assert!(lesson.hero_media().is_none());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Course::from_json("not json").is_err());
    }

    #[test]
    fn test_lesson_lookup() {
        let course = Course::new_with_id("c1", "C").with_module(
            Module::new_with_id("m1", "M", 1).with_lesson(Lesson::new_with_id("l1", "L", 1)),
        );
        assert_eq!(course.lesson("l1").map(|l| l.title.as_str()), Some("L"));
        assert!(course.lesson("missing").is_none());
    }
}
