//! In-memory history: a list of locations and a cursor, the way a browser
//! tab keeps its session history.

use log::debug;

use super::{History, Listener, ListenerId};
use crate::core::action::{HistoryAction, HistoryEvent};
use crate::core::location::{Location, To};

pub struct MemoryHistory {
    entries: Vec<Location>,
    cursor: usize,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl MemoryHistory {
    pub fn new(initial_path: &str) -> Self {
        Self {
            entries: vec![Location::parse(initial_path)],
            cursor: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn emit(&mut self, action: HistoryAction, from: Location) {
        let event = HistoryEvent {
            action,
            from,
            to: self.current_location(),
        };
        debug!("MemoryHistory emits {} {} -> {}", event.action, event.from, event.to);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn push(&mut self, to: &To) {
        let from = self.current_location();
        let next = to.resolve(&from);
        // Forward entries are gone once a new one is pushed.
        self.entries.truncate(self.cursor + 1);
        self.entries.push(next);
        self.cursor += 1;
        self.emit(HistoryAction::Push, from);
    }

    fn pop(&mut self) {
        if self.cursor == 0 {
            debug!("MemoryHistory pop at the first entry ignored");
            return;
        }
        let from = self.current_location();
        self.cursor -= 1;
        self.emit(HistoryAction::Pop, from);
    }

    fn replace(&mut self, to: &To) {
        let from = self.current_location();
        self.entries[self.cursor] = to.resolve(&from);
        self.emit(HistoryAction::Replace, from);
    }

    fn go(&mut self, delta: isize) {
        if delta == 0 {
            return;
        }
        let last = self.entries.len() - 1;
        let target = self.cursor.saturating_add_signed(delta).min(last);
        if target == self.cursor {
            return;
        }
        let from = self.current_location();
        self.cursor = target;
        self.emit(HistoryAction::Pop, from);
    }

    fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn current_location(&self) -> Location {
        self.entries[self.cursor].clone()
    }

    fn position(&self) -> usize {
        self.cursor
    }
}
