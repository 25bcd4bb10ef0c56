//! Viewer state built on top of the outline
//!
//! - [`CourseSession`] - the current snapshot, its outline, TOC state and selection
//! - [`CourseLoader`] - last-write-wins reloads from a [`CourseSource`]
//! - [`TocState`] - per-module expansion and the TOC panel
//! - [`CompletionSet`] / [`ScoreCard`] - learner progress

pub mod loader;
pub mod progress;
pub mod selection;
pub mod session;
pub mod toc;

pub use loader::{CourseLoader, CourseSource, JsonDirSource, ReloadOutcome, ReloadTicket};
pub use progress::{CompletionSet, ScoreCard};
pub use selection::Selection;
pub use session::CourseSession;
pub use toc::{TocRow, TocState};
