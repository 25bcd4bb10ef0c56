//! Outline engine
//!
//! Ordering, flattening, numbering and navigation of course trees. Every
//! surface that shows numbers or moves between lessons goes through this
//! module, so the table of contents and the viewer can never disagree.
//!
//! - [`ordering`] - `(order, title)` sibling normalization
//! - [`flatten()`] - pre-order flattening into a numbered [`Outline`]
//! - [`navigator`] - previous/next lookups by global index
//! - [`integrity`] - diagnostics for malformed trees
//! - [`parents`] - parent candidates for topic authoring

mod flatten;
mod forest;
pub mod integrity;
pub mod navigator;
pub mod ordering;
pub mod parents;
mod sequence;


pub use flatten::flatten;
pub use integrity::{check_integrity, TreeIssue};
pub use navigator::Boundaries;
pub use ordering::{compare_siblings, normalize, SiblingOrder};
pub use parents::{topic_parent_options, ParentOption};
pub use sequence::{Breadcrumb, Crumb, ModuleEntry, Outline};
