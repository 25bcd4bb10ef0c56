//! CourseTree Core
//!
//! Course outline engine for the learning platform: turns a course tree
//! (modules, lessons and arbitrarily nested topics) into one numbered viewing
//! sequence, and keeps the table of contents and the lesson viewer in sync.
//!
//! # Architecture
//!
//! - **One flattener**: every surface that needs numbering or navigation reads
//!   the same [`Outline`]
//! - **Snapshots, not patches**: any edit triggers a full refetch and a fresh
//!   flatten; nothing is updated incrementally
//! - **Tolerant**: malformed trees degrade (dangling parents become roots,
//!   cycles are broken) and are reported by [`check_integrity`]
//!
//! # Modules
//!
//! - [`models`] - Course tree and content node types
//! - [`outline`] - Ordering, flattening, numbering and navigation
//! - [`viewer`] - Session, TOC state, selection and reloads
//! - [`config`] - Viewer configuration
//!
//! ```
//! use coursetree_core::models::{Course, Lesson, Module, Topic};
//! use coursetree_core::outline::flatten;
//!
//! let course = Course::new_with_id("c", "Rust").with_module(
//!     Module::new_with_id("m1", "Basics", 1).with_lesson(
//!         Lesson::new_with_id("l1", "Ownership", 1)
//!             .with_topic(Topic::new_with_id("t1", "Borrowing", 1)),
//!     ),
//! );
//!
//! let outline = flatten(&course);
//! let numbers: Vec<&str> = outline.iter().map(|n| n.display_number.as_str()).collect();
//! assert_eq!(numbers, vec!["1", "1.1"]);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod outline;
pub mod viewer;

// Re-export commonly used types
pub use config::ViewerConfig;
pub use error::{CourseError, Result};
pub use models::*;
pub use outline::{check_integrity, flatten, Boundaries, Breadcrumb, Outline, TreeIssue};
pub use viewer::{
    CompletionSet, CourseLoader, CourseSession, CourseSource, ReloadOutcome, ScoreCard, Selection,
    TocRow, TocState,
};
