//! Topic forest of a single lesson
//!
//! Resolves the topics of a lesson into a forest with one effective parent per
//! topic, then walks it in pre-order. Shared by the flattener, the admin
//! parent picker and the integrity check so they all agree on structure.
//!
//! # Resolution Rules
//!
//! - Topics are gathered from `lesson.topics` and, recursively, from every
//!   `children` list. The first occurrence of an id wins.
//! - A `parent_id` naming another gathered topic is the effective parent.
//! - A dangling or self-referencing `parent_id` makes the topic a root.
//! - A topic without `parent_id` that was found nested in a `children` list
//!   belongs to the enclosing topic; otherwise it is a root.
//!
//! # Cycles
//!
//! Parent links that form a cycle leave topics unreachable from any root.
//! After the real roots are walked, the normalized-first member of each cycle
//! is promoted to the root level and its subtree walked. Topics that hang off
//! a cycle stay under their own parent. Every topic is emitted exactly once
//! and the walk always terminates.

use std::collections::HashMap;

use super::ordering::compare_siblings;
use crate::models::{Lesson, Topic};

/// A topic at its place in the pre-order walk
#[derive(Debug, Clone)]
pub(crate) struct ForestEntry<'a> {
    pub topic: &'a Topic,
    /// Topic this entry was emitted under
    pub parent: Option<&'a Topic>,
    /// 1-based sibling positions from the root level down to this topic
    pub path: Vec<usize>,
}

impl ForestEntry<'_> {
    /// 1 for top-level topics
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// Result of walking a forest
#[derive(Debug, Clone, Default)]
pub(crate) struct ForestWalk<'a> {
    pub entries: Vec<ForestEntry<'a>>,
    /// Topics promoted to the root level because a parent cycle hid them
    pub promoted: Vec<&'a Topic>,
}

pub(crate) struct TopicForest<'a> {
    topics: Vec<&'a Topic>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    parents: Vec<Option<usize>>,
    /// Second occurrences of an id that disagree with the first one
    conflicts: Vec<&'a Topic>,
}

impl<'a> TopicForest<'a> {
    pub fn build(lesson: &'a Lesson) -> Self {
        let mut topics: Vec<&'a Topic> = Vec::new();
        let mut containers: Vec<Option<usize>> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut conflicts: Vec<&'a Topic> = Vec::new();

        // Iterative gather: (topic, index of the enclosing gathered topic)
        let mut pending: Vec<(&'a Topic, Option<usize>)> =
            lesson.topics.iter().rev().map(|t| (t, None)).collect();
        while let Some((topic, container)) = pending.pop() {
            let slot = match index.get(topic.id.as_str()) {
                Some(&existing) => {
                    let kept = topics[existing];
                    if kept.title != topic.title
                        || kept.order != topic.order
                        || kept.parent_id != topic.parent_id
                    {
                        conflicts.push(topic);
                    }
                    existing
                }
                None => {
                    let slot = topics.len();
                    index.insert(topic.id.as_str(), slot);
                    topics.push(topic);
                    containers.push(container);
                    slot
                }
            };
            for child in topic.children.iter().rev() {
                pending.push((child, Some(slot)));
            }
        }

        let parents: Vec<Option<usize>> = topics
            .iter()
            .enumerate()
            .map(|(slot, topic)| match topic.parent_id.as_deref() {
                Some(parent_id) => index
                    .get(parent_id)
                    .copied()
                    .filter(|&parent| parent != slot),
                None => containers[slot].filter(|&container| container != slot),
            })
            .collect();

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); topics.len()];
        let mut roots: Vec<usize> = Vec::new();
        for (slot, parent) in parents.iter().enumerate() {
            match parent {
                Some(parent) => children[*parent].push(slot),
                None => roots.push(slot),
            }
        }

        let by_key = |a: &usize, b: &usize| compare_siblings(topics[*a], topics[*b]);
        roots.sort_by(by_key);
        for siblings in &mut children {
            siblings.sort_by(by_key);
        }

        Self {
            topics,
            children,
            roots,
            parents,
            conflicts,
        }
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn conflicts(&self) -> &[&'a Topic] {
        &self.conflicts
    }

    /// Walk the forest in pre-order
    pub fn walk(&self) -> ForestWalk<'a> {
        let mut visited = vec![false; self.topics.len()];
        let mut walk = ForestWalk {
            entries: Vec::with_capacity(self.topics.len()),
            promoted: Vec::new(),
        };

        let mut root_position = 0;
        for &root in &self.roots {
            root_position += 1;
            self.emit_subtree(root, vec![root_position], &mut visited, &mut walk.entries);
        }

        if walk.entries.len() < self.topics.len() {
            for slot in self.cycle_representatives(&visited) {
                if visited[slot] {
                    continue;
                }
                root_position += 1;
                walk.promoted.push(self.topics[slot]);
                self.emit_subtree(slot, vec![root_position], &mut visited, &mut walk.entries);
            }
        }

        walk
    }

    /// Normalized order with ties broken by first occurrence
    fn compare_slots(&self, a: usize, b: usize) -> std::cmp::Ordering {
        compare_siblings(self.topics[a], self.topics[b]).then(a.cmp(&b))
    }

    /// One promoted topic per parent cycle among the unvisited slots, sorted.
    ///
    /// Every unvisited topic has a parent chain that ends in a cycle, so each
    /// chain is followed until it either closes on itself or reaches a slot
    /// whose cycle is already known.
    fn cycle_representatives(&self, visited: &[bool]) -> Vec<usize> {
        let mut representative: Vec<Option<usize>> = vec![None; self.topics.len()];
        let mut position_on_path: Vec<Option<usize>> = vec![None; self.topics.len()];
        let mut found: Vec<usize> = Vec::new();

        for start in 0..self.topics.len() {
            if visited[start] || representative[start].is_some() {
                continue;
            }

            let mut path: Vec<usize> = Vec::new();
            let mut cursor = start;
            let rep = loop {
                if let Some(rep) = representative[cursor] {
                    break rep;
                }
                if let Some(position) = position_on_path[cursor] {
                    let rep = path[position..]
                        .iter()
                        .copied()
                        .min_by(|a, b| self.compare_slots(*a, *b))
                        .unwrap_or(cursor);
                    found.push(rep);
                    break rep;
                }
                position_on_path[cursor] = Some(path.len());
                path.push(cursor);
                match self.parents[cursor] {
                    Some(parent) if !visited[parent] => cursor = parent,
                    _ => {
                        found.push(cursor);
                        break cursor;
                    }
                }
            };

            for slot in path {
                representative[slot] = Some(rep);
            }
        }

        found.sort_by(|a, b| self.compare_slots(*a, *b));
        found
    }

    fn emit_subtree(
        &self,
        root: usize,
        root_path: Vec<usize>,
        visited: &mut [bool],
        out: &mut Vec<ForestEntry<'a>>,
    ) {
        visited[root] = true;
        out.push(ForestEntry {
            topic: self.topics[root],
            parent: None,
            path: root_path.clone(),
        });

        // Frames: (topic slot, next child cursor, children emitted so far)
        let mut stack: Vec<(usize, usize, usize)> = vec![(root, 0, 0)];
        let mut path = root_path;
        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            match self.children[node].get(frame.1) {
                Some(&child) => {
                    frame.1 += 1;
                    if visited[child] {
                        continue;
                    }
                    frame.2 += 1;
                    path.push(frame.2);
                    visited[child] = true;
                    out.push(ForestEntry {
                        topic: self.topics[child],
                        parent: Some(self.topics[node]),
                        path: path.clone(),
                    });
                    stack.push((child, 0, 0));
                }
                None => {
                    stack.pop();
                    if !stack.is_empty() {
                        path.pop();
                    }
                }
            }
        }
    }
}
