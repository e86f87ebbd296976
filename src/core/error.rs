//! # Navigation Errors
//!
//! Every variant here means a navigation invariant was broken by the caller
//! or by a history adapter that fell out of sync. None of them are retried.
//! The reducer returns them before touching state, so the previous
//! `NavigatorState` stays authoritative.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The event's `from` location is not the current top of the stack.
    #[error("location mismatch: top activity is `{expected}` but the event came from `{found}`")]
    LocationMismatch { expected: String, found: String },

    /// A related activity (ancestor or sibling) is present below some
    /// unrelated screen, so the target cannot be stacked here.
    #[error(
        "`{target}` cannot be stacked: related activity `{blocking}` is present but not at the top; pop to it first"
    )]
    AncestorNotAtTop { target: String, blocking: String },

    /// No present activity corresponds to the requested location.
    #[error("no present activity matches `{pathname}`")]
    NoMatchingActivity { pathname: String },
}

/// Plain tag for callers that branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LocationMismatch,
    AncestorNotAtTop,
    NoMatchingActivity,
}

impl NavigationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NavigationError::LocationMismatch { .. } => ErrorKind::LocationMismatch,
            NavigationError::AncestorNotAtTop { .. } => ErrorKind::AncestorNotAtTop,
            NavigationError::NoMatchingActivity { .. } => ErrorKind::NoMatchingActivity,
        }
    }
}

pub type Result<T> = std::result::Result<T, NavigationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = NavigationError::AncestorNotAtTop {
            target: "/funnel/email".to_string(),
            blocking: "/funnel/name".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::AncestorNotAtTop);
    }

    #[test]
    fn test_display_names_both_paths() {
        let err = NavigationError::LocationMismatch {
            expected: "/a".to_string(),
            found: "/b".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("`/a`"));
        assert!(msg.contains("`/b`"));
    }
}
