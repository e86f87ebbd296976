//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::action::{Action, HistoryAction, HistoryEvent};
use crate::core::location::Location;
use crate::core::route::{RouteConfig, RouteTable};
use crate::core::state::NavigatorState;

/// The funnel demo table: a parent with two nested steps, the root screen,
/// and a catch-all.
pub fn funnel_routes() -> RouteTable<&'static str> {
    RouteTable::new(vec![
        RouteConfig::new("funnel", "Funnel")
            .child(RouteConfig::new("name", "FunnelName"))
            .child(RouteConfig::new("email", "FunnelEmail")),
        RouteConfig::new("/", "Main"),
        RouteConfig::new("main", "Main"),
        RouteConfig::new("*", "NotFound"),
    ])
}

pub fn event(action: HistoryAction, from: &str, to: &str) -> Action {
    Action::History(HistoryEvent {
        action,
        from: Location::parse(from),
        to: Location::parse(to),
    })
}

pub fn push(from: &str, to: &str) -> Action {
    event(HistoryAction::Push, from, to)
}

pub fn pop(from: &str, to: &str) -> Action {
    event(HistoryAction::Pop, from, to)
}

pub fn replace(from: &str, to: &str) -> Action {
    event(HistoryAction::Replace, from, to)
}

/// Initial state at `start` followed by a chain of pushes, each from the
/// previous path.
pub fn stacked(routes: &RouteTable<&'static str>, paths: &[&str]) -> NavigatorState<&'static str> {
    let (first, rest) = paths.split_first().expect("at least one path");
    let mut state = NavigatorState::initial(routes, Location::parse(first));
    let mut from = *first;
    for to in rest {
        state = crate::core::action::reduce(routes, &state, &push(from, to))
            .expect("test stack should be valid");
        from = to;
    }
    state
}

pub fn pathnames<R>(state: &NavigatorState<R>) -> Vec<&str> {
    state
        .flat_activities
        .iter()
        .map(|a| a.pathname.as_str())
        .collect()
}
