//! # History Port
//!
//! The navigator never touches a real location source. It drives one
//! through this trait and learns about changes from the events it emits.
//!
//! Contract for implementors: every successful `push`, `replace`, `pop` or
//! `go` emits exactly one matching event to the subscribed listeners, with
//! accurate `from`/`to`. `pop` and `go(n)` report a POP even when the
//! underlying source has no native back event.

pub mod memory;

pub use memory::MemoryHistory;

use crate::core::action::HistoryEvent;
use crate::core::location::{Location, To};

pub type Listener = Box<dyn FnMut(&HistoryEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub trait History {
    fn push(&mut self, to: &To);

    fn pop(&mut self);

    fn replace(&mut self, to: &To);

    /// Moves `delta` entries: negative goes back, positive goes forward.
    fn go(&mut self, delta: isize);

    fn subscribe(&mut self, listener: Listener) -> ListenerId;

    /// Returns false when `id` was not subscribed.
    fn unsubscribe(&mut self, id: ListenerId) -> bool;

    fn current_location(&self) -> Location;

    /// Position of the current entry in the session history.
    fn position(&self) -> usize;
}
