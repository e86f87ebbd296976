//! # Navigator
//!
//! Owns the stack state and drives it from history events.
//!
//! ```text
//! push / pop / replace / go ──▶ History ──event──▶ mpsc queue
//!                                                     │ drained by sync()
//!                                                     ▼
//!                                    reduce(routes, state, action)
//!                                                     │
//!                      diff(previous present tree, next present tree)
//!                                                     │ removed paths
//!                                                     ▼
//!                               ResultChannel::dismiss → commit → observers
//! ```
//!
//! Events are reduced strictly in arrival order, one at a time. A failed
//! reduction returns the error and keeps the previous state. When the
//! failure comes from one of the navigator's own calls, the history is
//! moved back to where it was so the two stay aligned. A bare `sync()`
//! leaves events queued after the failure for the next call.

pub mod result;

pub use result::{PushOutcome, PushResult, ResultChannel};

use std::sync::mpsc;

use log::{debug, info, warn};
use serde_json::Value;

use crate::core::action::{Action, HistoryEvent, reduce};
use crate::core::compose::diff_activities;
use crate::core::error::{NavigationError, Result};
use crate::core::location::{Location, To};
use crate::core::route::RouteTable;
use crate::core::state::{FlatActivity, NavigatorState};
use crate::history::{History, ListenerId};

pub type Observer<R> = Box<dyn FnMut(&NavigatorState<R>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

pub struct Navigator<H: History, R: Clone> {
    history: H,
    routes: RouteTable<R>,
    state: NavigatorState<R>,
    results: ResultChannel,
    events: mpsc::Receiver<HistoryEvent>,
    listener: ListenerId,
    observers: Vec<(ObserverId, Observer<R>)>,
    next_observer: u64,
}

impl<H: History, R: Clone> Navigator<H, R> {
    pub fn new(mut history: H, routes: impl Into<RouteTable<R>>) -> Self {
        let routes = routes.into();
        let state = NavigatorState::initial(&routes, history.current_location());

        let (tx, events) = mpsc::channel();
        let listener = history.subscribe(Box::new(move |event: &HistoryEvent| {
            if tx.send(event.clone()).is_err() {
                warn!("History event dropped: navigator is gone");
            }
        }));
        info!("Navigator started at {}", state.location);

        Self {
            history,
            routes,
            state,
            results: ResultChannel::new(),
            events,
            listener,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn state(&self) -> &NavigatorState<R> {
        &self.state
    }

    pub fn routes(&self) -> &RouteTable<R> {
        &self.routes
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Direct access for navigation the app does not own (e.g. a browser
    /// back button). Call `sync()` afterwards.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Pushes `to` and returns a result that completes when that screen is
    /// popped or dismissed.
    pub fn push(&mut self, to: impl Into<To>) -> Result<PushResult> {
        let to = to.into();
        let pathname = to.resolve(&self.history.current_location()).pathname;
        self.navigate(|history| history.push(&to))?;
        Ok(self.results.register(&pathname))
    }

    /// Pops the top screen, completing its push with `value`.
    pub fn pop(&mut self, value: Option<Value>) -> Result<()> {
        let pathname = self.state.top().pathname.clone();
        self.results.resolve(&pathname, PushOutcome::Popped(value));
        self.navigate(|history| history.pop())
    }

    /// Completes the push registered under `path` and goes back past the
    /// first present screen whose chain contains it.
    pub fn pop_from(&mut self, path: &str, value: Option<Value>) -> Result<()> {
        let present = self.state.present();
        let Some(position) = present.iter().position(|a| a.contains_path(path)) else {
            return Err(NavigationError::NoMatchingActivity {
                pathname: path.to_string(),
            });
        };
        let steps = present.len() - position;
        self.results.resolve(path, PushOutcome::Popped(value));
        self.go_back(steps)
    }

    /// Goes back to the first present activity matching `predicate`.
    pub fn pop_until(&mut self, predicate: impl Fn(&FlatActivity<R>) -> bool) -> Result<()> {
        let present = self.state.present();
        let Some(position) = present.iter().position(predicate) else {
            return Err(NavigationError::NoMatchingActivity {
                pathname: self.state.top().pathname.clone(),
            });
        };
        let steps = present.len() - 1 - position;
        self.go_back(steps)
    }

    pub fn replace(&mut self, to: impl Into<To>) -> Result<()> {
        let to = to.into();
        self.navigate(|history| history.replace(&to))
    }

    /// Moves through the history like a browser back/forward button. A
    /// move the stack rejects is undone.
    pub fn go(&mut self, delta: isize) -> Result<()> {
        self.navigate(|history| history.go(delta))
    }

    /// Called by the UI once the exit transition of popped screens is done.
    pub fn exit_finished(&mut self) -> Result<()> {
        self.dispatch(Action::ExitFinished)
    }

    /// Reduces every event the history has emitted since the last call.
    pub fn sync(&mut self) -> Result<()> {
        while let Ok(event) = self.events.try_recv() {
            self.dispatch(Action::History(event))?;
        }
        Ok(())
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&NavigatorState<R>) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// True while a push to `pathname` is waiting for its result.
    pub fn is_pending(&self, pathname: &str) -> bool {
        self.results.is_pending(pathname)
    }

    fn go_back(&mut self, steps: usize) -> Result<()> {
        if steps == 0 {
            debug!("Already at the requested activity");
            return Ok(());
        }
        self.go(-(steps as isize))
    }

    /// Applies `op` to the history and reduces what it emitted. On failure
    /// the history is put back at the position and location it had before.
    fn navigate(&mut self, op: impl FnOnce(&mut H)) -> Result<()> {
        let position = self.history.position();
        let location = self.history.current_location();
        op(&mut self.history);
        match self.sync() {
            Ok(()) => Ok(()),
            Err(e) => {
                self.restore(position, location);
                Err(e)
            }
        }
    }

    fn restore(&mut self, position: usize, location: Location) {
        self.discard_events();
        let moved = self.history.position() as isize - position as isize;
        if moved != 0 {
            self.history.go(-moved);
        }
        if self.history.current_location() != location {
            self.history.replace(&To::from(location.clone()));
        }
        self.discard_events();
        warn!("History restored to {}", location);
    }

    fn discard_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!("Discarding {} {} -> {}", event.action, event.from, event.to);
        }
    }

    fn dispatch(&mut self, action: Action) -> Result<()> {
        let next = reduce(&self.routes, &self.state, &action).inspect_err(|e| {
            warn!("Navigation rejected: {}", e);
        })?;

        let diff = diff_activities(&self.state.present_activities(), &next.present_activities());
        // Fallback screens have "*" as full path, so pathnames are checked too.
        let departed = self
            .state
            .present()
            .iter()
            .map(|a| &a.pathname)
            .filter(|p| !next.present().iter().any(|a| &a.pathname == *p));
        for path in diff.removed.iter().chain(departed) {
            if self.results.dismiss(path) {
                warn!("Dismissed pending result for {}", path);
            }
        }

        debug!(
            "Stack now {:?} (top {})",
            next.flat_activities
                .iter()
                .map(|a| a.pathname.as_str())
                .collect::<Vec<_>>(),
            next.activity_index
        );
        self.state = next;
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.state);
        }
        Ok(())
    }
}

impl<H: History, R: Clone> Drop for Navigator<H, R> {
    fn drop(&mut self) {
        self.history.unsubscribe(self.listener);
    }
}
