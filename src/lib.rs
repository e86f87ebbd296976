//! navstack library exports

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod history;
pub mod navigator;
pub mod shell;

#[cfg(test)]
pub mod test_support;

pub use crate::core::action::{Action, HistoryAction, HistoryEvent};
pub use crate::core::compose::{Activity, ActivityDiff};
pub use crate::core::error::{ErrorKind, NavigationError, Result};
pub use crate::core::location::{Location, PartialLocation, To};
pub use crate::core::route::{MatchedSegment, RouteConfig, RouteTable};
pub use crate::core::state::{FlatActivity, NavigatorState};
pub use crate::history::{History, MemoryHistory};
pub use crate::navigator::{Navigator, PushOutcome, PushResult};

/// How popped screens leave the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitMode {
    /// Popped screens stay until the UI reports `exit-finished`.
    #[default]
    Animated,
    /// Popped screens are discarded right after the pop.
    Instant,
}
