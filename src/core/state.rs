//! # Navigator State
//!
//! Everything the navigator knows about the stack, in one value.
//!
//! ```text
//! NavigatorState
//! ├── flat_activities: Vec<FlatActivity>  // stack entries, ascending index
//! ├── activity_index: usize               // position of the top entry
//! ├── activities: Vec<Activity>           // tree composed from the flat list
//! ├── location: Location                  // location of the last event
//! └── next_index: usize                   // next activity index to hand out
//! ```
//!
//! `flat_activities[..=activity_index]` is the present window. Entries past
//! it were popped and are only kept so the UI can animate them out; an
//! `ExitFinished` action discards them.
//!
//! State is replaced wholesale by `reduce()` in action.rs, never mutated in
//! place.

use serde::Serialize;

use crate::core::compose::{Activity, compose_activities, present_only};
use crate::core::location::Location;
use crate::core::route::{MatchedSegment, RouteTable};

/// One stack entry before composition.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FlatActivity<R> {
    pub pathname: String,
    /// `matched_routes.len() - 1`, or 0 when nothing matched.
    pub depth: usize,
    /// Assigned on push, inherited on replace, never reused.
    pub index: usize,
    pub matched_routes: Vec<MatchedSegment<R>>,
}

impl<R> FlatActivity<R> {
    pub fn new(routes: &RouteTable<R>, pathname: &str, index: usize) -> Self {
        let matched_routes = routes.match_path(pathname);
        Self {
            pathname: pathname.to_string(),
            depth: matched_routes.len().saturating_sub(1),
            index,
            matched_routes,
        }
    }

    /// True when some segment of the chain resolves to `full_path`.
    pub fn contains_path(&self, full_path: &str) -> bool {
        self.matched_routes.iter().any(|s| s.full_path == full_path)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NavigatorState<R> {
    pub activity_index: usize,
    pub flat_activities: Vec<FlatActivity<R>>,
    pub activities: Vec<Activity<R>>,
    pub location: Location,
    pub next_index: usize,
}

impl<R: Clone> NavigatorState<R> {
    /// A single activity at index 0 for the starting location.
    pub fn initial(routes: &RouteTable<R>, location: Location) -> Self {
        let flat_activities = vec![FlatActivity::new(routes, &location.pathname, 0)];
        Self::compose(flat_activities, 0, location, 1)
    }

    /// Builds a state, deriving `activities` from the flat list.
    pub(crate) fn compose(
        flat_activities: Vec<FlatActivity<R>>,
        activity_index: usize,
        location: Location,
        next_index: usize,
    ) -> Self {
        let present_index = flat_activities
            .get(activity_index)
            .map(|a| a.index)
            .unwrap_or_default();
        let activities = compose_activities(&flat_activities, present_index);
        Self {
            activity_index,
            flat_activities,
            activities,
            location,
            next_index,
        }
    }

    /// The tree restricted to present nodes.
    pub fn present_activities(&self) -> Vec<Activity<R>> {
        present_only(&self.activities)
    }
}

impl<R> NavigatorState<R> {
    pub fn top(&self) -> &FlatActivity<R> {
        &self.flat_activities[self.activity_index]
    }

    pub fn present(&self) -> &[FlatActivity<R>] {
        &self.flat_activities[..=self.activity_index]
    }

    /// Entries popped but still waiting for their exit to finish.
    pub fn exiting(&self) -> &[FlatActivity<R>] {
        &self.flat_activities[self.activity_index + 1..]
    }
}
