//! # Route Matching
//!
//! Matches a pathname against a nested route configuration and returns the
//! chain of matched segments, outermost first.
//!
//! ```text
//! routes:                         "/funnel/name" matches:
//!   funnel                          [0] /funnel       (leftover "name")
//!   ├── name                        [1] /funnel/name  (leftover "")
//!   └── email
//!   /
//!   *            ← fallback, only when no sibling matches
//! ```
//!
//! Rules:
//! - Routes are tried in declaration order; the first exact match wins.
//! - A route with children is entered when the pathname continues past its
//!   full path with a `/`. The chain only counts if a child matched.
//! - The first `"*"` at a level is that level's fallback.
//! - Matching never fails. No match and no fallback is an empty chain.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Path of the per-level fallback route.
pub const FALLBACK_PATH: &str = "*";

/// One entry of the static route configuration. `render` is whatever handle
/// the UI layer uses to mount a screen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RouteConfig<R> {
    /// Absolute (`/x`) or relative to the parent route; `"*"` for fallback.
    pub path: String,
    pub render: R,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Arc<RouteConfig<R>>>,
}

impl<R> RouteConfig<R> {
    pub fn new(path: impl Into<String>, render: R) -> Self {
        Self {
            path: path.into(),
            render,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, route: RouteConfig<R>) -> Self {
        self.children.push(Arc::new(route));
        self
    }

    pub fn with_children(mut self, routes: impl IntoIterator<Item = RouteConfig<R>>) -> Self {
        self.children.extend(routes.into_iter().map(Arc::new));
        self
    }

    pub fn is_fallback(&self) -> bool {
        self.path == FALLBACK_PATH
    }
}

/// One element of a match chain.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MatchedSegment<R> {
    #[serde(skip)]
    pub route: Arc<RouteConfig<R>>,
    /// Fully resolved absolute path of this segment.
    pub full_path: String,
    /// Part of the pathname below this segment.
    pub leftover_path: String,
}

/// The ordered top-level route list a navigator is built with.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable<R> {
    routes: Vec<Arc<RouteConfig<R>>>,
}

impl<R> RouteTable<R> {
    pub fn new(routes: impl IntoIterator<Item = RouteConfig<R>>) -> Self {
        Self {
            routes: routes.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn routes(&self) -> &[Arc<RouteConfig<R>>] {
        &self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn match_path(&self, pathname: &str) -> Vec<MatchedSegment<R>> {
        match_routes(&self.routes, pathname, "")
    }
}

impl<R> From<Vec<RouteConfig<R>>> for RouteTable<R> {
    fn from(routes: Vec<RouteConfig<R>>) -> Self {
        Self::new(routes)
    }
}

impl<R> From<Vec<Arc<RouteConfig<R>>>> for RouteTable<R> {
    fn from(routes: Vec<Arc<RouteConfig<R>>>) -> Self {
        Self { routes }
    }
}

/// Recursively matches `pathname` against `routes`, resolving relative
/// route paths under `parent_path`.
pub fn match_routes<R>(
    routes: &[Arc<RouteConfig<R>>],
    pathname: &str,
    parent_path: &str,
) -> Vec<MatchedSegment<R>> {
    let fallback = routes.iter().find(|route| route.is_fallback());

    for route in routes.iter().filter(|route| !route.is_fallback()) {
        let full_path = resolve_path(parent_path, &route.path);

        if pathname == full_path {
            return vec![MatchedSegment {
                route: Arc::clone(route),
                full_path,
                leftover_path: String::new(),
            }];
        }

        if route.children.is_empty() {
            continue;
        }

        let prefix = format!("{full_path}/");
        let Some(leftover) = pathname.strip_prefix(prefix.as_str()) else {
            continue;
        };

        let child_matches = match_routes(&route.children, pathname, &full_path);
        if !child_matches.is_empty() {
            let mut chain = Vec::with_capacity(child_matches.len() + 1);
            chain.push(MatchedSegment {
                route: Arc::clone(route),
                full_path,
                leftover_path: leftover.to_string(),
            });
            chain.extend(child_matches);
            return chain;
        }
    }

    match fallback {
        Some(route) => vec![MatchedSegment {
            route: Arc::clone(route),
            full_path: route.path.clone(),
            leftover_path: String::new(),
        }],
        None => Vec::new(),
    }
}

/// Joins a parent path and a route path. Absolute route paths win.
pub fn resolve_path(parent_path: &str, route_path: &str) -> String {
    if route_path.starts_with('/') {
        return route_path.to_string();
    }
    if parent_path.is_empty() || parent_path == "/" {
        return format!("/{route_path}");
    }
    format!("{parent_path}/{route_path}")
}

/// Same length, same full paths on every segment except possibly the last.
pub fn is_sibling<R>(a: &[MatchedSegment<R>], b: &[MatchedSegment<R>]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let shared = a.len().saturating_sub(1);
    a[..shared]
        .iter()
        .zip(&b[..shared])
        .all(|(x, y)| x.full_path == y.full_path)
}

/// `a` is strictly shorter than `b` and is a prefix of it.
pub fn is_ancestor<R>(a: &[MatchedSegment<R>], b: &[MatchedSegment<R>]) -> bool {
    a.len() < b.len() && a.iter().zip(b).all(|(x, y)| x.full_path == y.full_path)
}

/// Relation checked before stacking `target` above `existing`.
pub fn is_related<R>(existing: &[MatchedSegment<R>], target: &[MatchedSegment<R>]) -> bool {
    is_ancestor(existing, target) || is_sibling(existing, target)
}
