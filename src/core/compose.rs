//! # Activity Composition
//!
//! Turns the flat stack into the nested tree the UI mounts, and diffs two
//! trees by full path.
//!
//! ```text
//! flat:  [0] /funnel → /funnel/name        tree:  /funnel        (0)
//!        [1] /funnel → /funnel/email              ├── /funnel/name  (0)
//!                                                 └── /funnel/email (1)
//! ```
//!
//! A parent shared by several stack entries appears once, so its nested
//! outlet can host all of their leaves. Trees are rebuilt from scratch on
//! every transition, never patched.

use std::collections::HashSet;

use serde::Serialize;

use crate::core::route::MatchedSegment;
use crate::core::state::FlatActivity;

/// A node of the composed navigation tree.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Activity<R> {
    pub full_path: String,
    pub depth: usize,
    /// Index of the flat activity that created this node.
    pub index: usize,
    pub render: R,
    /// False once a POP has moved the present window below the owner.
    pub is_present: bool,
    pub children: Vec<Activity<R>>,
}

/// Builds the forest for `flat_activities`, marking nodes whose owning
/// activity index is at most `present_index` as present.
pub fn compose_activities<R: Clone>(
    flat_activities: &[FlatActivity<R>],
    present_index: usize,
) -> Vec<Activity<R>> {
    let mut roots = Vec::new();
    for activity in flat_activities {
        insert_chain(
            &mut roots,
            &activity.matched_routes,
            0,
            activity.index,
            activity.index <= present_index,
        );
    }
    roots
}

fn insert_chain<R: Clone>(
    level: &mut Vec<Activity<R>>,
    chain: &[MatchedSegment<R>],
    depth: usize,
    index: usize,
    is_present: bool,
) {
    let Some((segment, rest)) = chain.split_first() else {
        return;
    };

    let position = match level.iter().position(|n| n.full_path == segment.full_path) {
        Some(position) => position,
        None => {
            level.push(Activity {
                full_path: segment.full_path.clone(),
                depth,
                index,
                render: segment.route.render.clone(),
                is_present,
                children: Vec::new(),
            });
            level.len() - 1
        }
    };

    insert_chain(&mut level[position].children, rest, depth + 1, index, is_present);
}

/// Full paths that appear only in `after` (`added`) or only in `before`
/// (`removed`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

pub fn diff_activities<R>(before: &[Activity<R>], after: &[Activity<R>]) -> ActivityDiff {
    let before_paths: Vec<&str> = flatten(before).map(|a| a.full_path.as_str()).collect();
    let after_paths: Vec<&str> = flatten(after).map(|a| a.full_path.as_str()).collect();
    let before_set: HashSet<&str> = before_paths.iter().copied().collect();
    let after_set: HashSet<&str> = after_paths.iter().copied().collect();

    ActivityDiff {
        added: unique_missing(&after_paths, &before_set),
        removed: unique_missing(&before_paths, &after_set),
    }
}

fn unique_missing(paths: &[&str], other: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .filter(|p| !other.contains(*p) && seen.insert(**p))
        .map(|p| p.to_string())
        .collect()
}

/// Depth-first, parents before children.
pub fn flatten<R>(activities: &[Activity<R>]) -> impl Iterator<Item = &Activity<R>> {
    let mut stack: Vec<&Activity<R>> = activities.iter().rev().collect();
    std::iter::from_fn(move || {
        let node = stack.pop()?;
        stack.extend(node.children.iter().rev());
        Some(node)
    })
}

/// Copy of `activities` with every non-present node dropped.
pub fn present_only<R: Clone>(activities: &[Activity<R>]) -> Vec<Activity<R>> {
    activities
        .iter()
        .filter(|a| a.is_present)
        .map(|a| Activity {
            children: present_only(&a.children),
            ..a.clone()
        })
        .collect()
}
