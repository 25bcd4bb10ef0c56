//! Sibling ordering
//!
//! Every sibling list in a course (modules of a course, lessons of a module,
//! topics sharing a parent) is ordered by `order` ascending, then `title`
//! ascending. Exact ties keep their input order, so normalizing the same input
//! twice always yields the same sequence.

use std::cmp::Ordering;

use crate::models::{Lesson, Module, Topic};

/// Anything that takes part in sibling ordering
pub trait SiblingOrder {
    fn sort_order(&self) -> i64;
    fn sort_title(&self) -> &str;
}

impl SiblingOrder for Module {
    fn sort_order(&self) -> i64 {
        self.order
    }

    fn sort_title(&self) -> &str {
        &self.title
    }
}

impl SiblingOrder for Lesson {
    fn sort_order(&self) -> i64 {
        self.order
    }

    fn sort_title(&self) -> &str {
        &self.title
    }
}

impl SiblingOrder for Topic {
    fn sort_order(&self) -> i64 {
        self.order
    }

    fn sort_title(&self) -> &str {
        &self.title
    }
}

/// Composite `(order, title)` comparison
pub fn compare_siblings<T: SiblingOrder + ?Sized>(a: &T, b: &T) -> Ordering {
    a.sort_order()
        .cmp(&b.sort_order())
        .then_with(|| a.sort_title().cmp(b.sort_title()))
}

/// Return the siblings in normalized order without touching the input
pub fn normalize<'a, T, I>(siblings: I) -> Vec<&'a T>
where
    T: SiblingOrder + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut sorted: Vec<&'a T> = siblings.into_iter().collect();
    // sort_by is stable: exact ties stay in input order
    sorted.sort_by(|a, b| compare_siblings(*a, *b));
    sorted
}
