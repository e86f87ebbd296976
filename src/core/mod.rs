//! # Core Navigation Logic
//!
//! This module contains the stack state machine.
//! It knows nothing about any specific history source or UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • route matching       │
//!                    │  • State (the stack)    │
//!                    │  • Action (events)      │
//!                    │  • reduce() (reducer)   │
//!                    │  • compose / diff       │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │ Navigator  │      │  History   │      │   Shell    │
//!     │ (results,  │      │  adapters  │      │  adapter   │
//!     │ observers) │      │  (memory)  │      │  (stdin)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`route`]: `RouteConfig`, `RouteTable` and the matcher
//! - [`state`]: `FlatActivity` and `NavigatorState`
//! - [`action`]: the `Action` enum and `reduce()`
//! - [`compose`]: flat stack → activity tree, and tree diffing

pub mod action;
pub mod compose;
pub mod config;
pub mod error;
pub mod location;
pub mod route;
pub mod state;
