//! # Push Results
//!
//! Pushing a screen behaves like a modal call: the caller gets a
//! `PushResult` that completes when the screen is popped with a value, or
//! when it is torn down without one.
//!
//! ```text
//! push("/pick")  ──register──▶  pending["/pick"] = Sender
//!      │                               │
//!      ▼                               ▼
//! PushResult ◀── Popped(value) ── pop(value)
//!            ◀── Dismissed ────── ancestor replaced / popped past
//! ```
//!
//! At most one result is pending per path. Registering the same path again
//! drops the previous sender, which completes the older `PushResult` as
//! `Dismissed`.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use log::debug;
use serde_json::Value;
use tokio::sync::oneshot::{self, error::TryRecvError};

#[derive(Debug, Clone, PartialEq)]
pub enum PushOutcome {
    /// Popped explicitly. `None` means no value was given.
    Popped(Option<Value>),
    /// Torn down without a pop.
    Dismissed,
}

impl PushOutcome {
    pub fn is_dismissed(&self) -> bool {
        matches!(self, PushOutcome::Dismissed)
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            PushOutcome::Popped(value) => value.as_ref(),
            PushOutcome::Dismissed => None,
        }
    }
}

/// Completes exactly once with the outcome of a push.
#[derive(Debug)]
pub struct PushResult {
    pathname: String,
    receiver: oneshot::Receiver<PushOutcome>,
}

impl PushResult {
    /// Path the result is registered under.
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Non-blocking check. `None` while the screen is still up.
    pub fn try_outcome(&mut self) -> Option<PushOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(PushOutcome::Dismissed),
        }
    }
}

impl Future for PushResult {
    type Output = PushOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(PushOutcome::Dismissed))
    }
}

/// Pending push results, keyed by pathname.
#[derive(Debug, Default)]
pub struct ResultChannel {
    pending: HashMap<String, oneshot::Sender<PushOutcome>>,
}

impl ResultChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, pathname: &str) -> PushResult {
        let (sender, receiver) = oneshot::channel();
        if self.pending.insert(pathname.to_string(), sender).is_some() {
            debug!("Replaced pending result for {}", pathname);
        }
        PushResult {
            pathname: pathname.to_string(),
            receiver,
        }
    }

    /// Completes and forgets the registration for `pathname`. Returns false
    /// when nothing was pending.
    pub fn resolve(&mut self, pathname: &str, outcome: PushOutcome) -> bool {
        let Some(sender) = self.pending.remove(pathname) else {
            return false;
        };
        // The receiver may already be gone; the caller stopped waiting.
        if sender.send(outcome).is_err() {
            debug!("Result for {} had no listener", pathname);
        }
        true
    }

    pub fn dismiss(&mut self, pathname: &str) -> bool {
        self.resolve(pathname, PushOutcome::Dismissed)
    }

    pub fn is_pending(&self, pathname: &str) -> bool {
        self.pending.contains_key(pathname)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_pending, assert_ready_eq, task};

    #[test]
    fn test_resolve_completes_with_value() {
        let mut channel = ResultChannel::new();
        let mut result = task::spawn(channel.register("/pick"));
        assert_pending!(result.poll());

        assert!(channel.resolve("/pick", PushOutcome::Popped(Some(json!({"id": 7})))));
        assert!(result.is_woken());
        assert_ready_eq!(result.poll(), PushOutcome::Popped(Some(json!({"id": 7}))));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_resolve_without_registration_is_false() {
        let mut channel = ResultChannel::new();
        assert!(!channel.resolve("/nothing", PushOutcome::Popped(None)));
    }

    #[test]
    fn test_second_register_dismisses_first() {
        let mut channel = ResultChannel::new();
        let mut first = channel.register("/pick");
        let mut second = channel.register("/pick");
        assert_eq!(channel.len(), 1);
        assert_eq!(first.try_outcome(), Some(PushOutcome::Dismissed));
        assert_eq!(second.try_outcome(), None);
        channel.resolve("/pick", PushOutcome::Popped(None));
        assert_eq!(second.try_outcome(), Some(PushOutcome::Popped(None)));
    }

    #[test]
    fn test_dropped_channel_dismisses() {
        let mut channel = ResultChannel::new();
        let mut result = channel.register("/pick");
        drop(channel);
        assert_eq!(result.try_outcome(), Some(PushOutcome::Dismissed));
    }

    #[test]
    fn test_undefined_and_null_are_distinct_from_dismissal() {
        let undefined = PushOutcome::Popped(None);
        let null = PushOutcome::Popped(Some(Value::Null));
        assert!(!undefined.is_dismissed());
        assert!(!null.is_dismissed());
        assert_ne!(undefined, null);
        assert_eq!(null.value(), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_await_after_resolution() {
        let mut channel = ResultChannel::new();
        let result = channel.register("/pick");
        channel.dismiss("/pick");
        assert_eq!(result.await, PushOutcome::Dismissed);
    }
}
