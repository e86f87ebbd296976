//! # Actions
//!
//! Everything that can move the stack becomes an `Action`.
//! The history adapter reports a push? That's `Action::History(event)`.
//! The UI finished animating a popped screen out? That's `Action::ExitFinished`.
//!
//! `reduce()` takes the route table, the current state and an action, and
//! returns the next state. No side effects here. Result resolution and
//! observer notification happen in the navigator.
//!
//! ```text
//! State + Action  →  reduce()  →  New State   (or an error, state untouched)
//! ```
//!
//! Removal is two-phase: POP moves the present window down at once and
//! leaves the popped entries in place; `ExitFinished` drops them later.

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::error::{NavigationError, Result};
use crate::core::location::Location;
use crate::core::route::{RouteTable, is_related};
use crate::core::state::{FlatActivity, NavigatorState};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryAction {
    Push,
    Pop,
    Replace,
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HistoryAction::Push => "PUSH",
            HistoryAction::Pop => "POP",
            HistoryAction::Replace => "REPLACE",
        })
    }
}

/// What the history port emits for every location change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
    #[serde(rename = "type")]
    pub action: HistoryAction,
    pub from: Location,
    pub to: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    History(HistoryEvent),
    /// The UI finished the exit transition of popped screens.
    ExitFinished,
}

pub fn reduce<R: Clone>(
    routes: &RouteTable<R>,
    state: &NavigatorState<R>,
    action: &Action,
) -> Result<NavigatorState<R>> {
    match action {
        Action::History(event) => {
            let top = state.top();
            if top.pathname != event.from.pathname {
                return Err(NavigationError::LocationMismatch {
                    expected: top.pathname.clone(),
                    found: event.from.pathname.clone(),
                });
            }
            debug!("Reducing {} {} -> {}", event.action, event.from, event.to);
            match event.action {
                HistoryAction::Push => reduce_push(routes, state, &event.to),
                HistoryAction::Pop => reduce_pop(state, &event.to),
                HistoryAction::Replace => reduce_replace(routes, state, &event.to),
            }
        }
        Action::ExitFinished => Ok(reduce_exit_finished(state)),
    }
}

fn reduce_push<R: Clone>(
    routes: &RouteTable<R>,
    state: &NavigatorState<R>,
    to: &Location,
) -> Result<NavigatorState<R>> {
    let new_activity = FlatActivity::new(routes, &to.pathname, state.next_index);
    let present = state.present();

    // A screen can only go on top of its own ancestor/sibling chain.
    if let Some(position) = present
        .iter()
        .position(|a| is_related(&a.matched_routes, &new_activity.matched_routes))
        && position != state.activity_index
    {
        return Err(NavigationError::AncestorNotAtTop {
            target: to.pathname.clone(),
            blocking: present[position].pathname.clone(),
        });
    }

    let mut flat_activities = present.to_vec();
    flat_activities.push(new_activity);
    let activity_index = flat_activities.len() - 1;

    Ok(NavigatorState::compose(
        flat_activities,
        activity_index,
        to.clone(),
        state.next_index + 1,
    ))
}

fn reduce_pop<R: Clone>(state: &NavigatorState<R>, to: &Location) -> Result<NavigatorState<R>> {
    let below_top = &state.present()[..state.activity_index];
    let Some(position) = below_top.iter().rposition(|a| a.pathname == to.pathname) else {
        if state.activity_index == 0 {
            warn!("Cannot pop the last activity ({})", state.top().pathname);
            return Ok(NavigatorState {
                location: to.clone(),
                ..state.clone()
            });
        }
        return Err(NavigationError::NoMatchingActivity {
            pathname: to.pathname.clone(),
        });
    };

    // Entries above `position` stay until ExitFinished.
    Ok(NavigatorState::compose(
        state.flat_activities.clone(),
        position,
        to.clone(),
        state.next_index,
    ))
}

fn reduce_replace<R: Clone>(
    routes: &RouteTable<R>,
    state: &NavigatorState<R>,
    to: &Location,
) -> Result<NavigatorState<R>> {
    let top = state.top();
    let replaced = FlatActivity::new(routes, &to.pathname, top.index);
    let below_top = &state.present()[..state.activity_index];

    // The nearest related entry below must sit directly under the top.
    if let Some(position) = below_top
        .iter()
        .position(|a| is_related(&a.matched_routes, &replaced.matched_routes))
        && position + 1 != state.activity_index
    {
        return Err(NavigationError::AncestorNotAtTop {
            target: to.pathname.clone(),
            blocking: below_top[position].pathname.clone(),
        });
    }

    let mut flat_activities = below_top.to_vec();
    flat_activities.push(replaced);

    Ok(NavigatorState::compose(
        flat_activities,
        state.activity_index,
        to.clone(),
        state.next_index,
    ))
}

fn reduce_exit_finished<R: Clone>(state: &NavigatorState<R>) -> NavigatorState<R> {
    if state.exiting().is_empty() {
        debug!("ExitFinished with nothing exiting");
        return state.clone();
    }
    debug!("Discarding {} exited activities", state.exiting().len());
    NavigatorState::compose(
        state.present().to_vec(),
        state.activity_index,
        state.location.clone(),
        state.next_index,
    )
}
