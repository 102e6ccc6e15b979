//! # Core Application Logic
//!
//! Payment and stars state, and the pure transforms over it.
//! It knows nothing about who dispatches updates or how state is stored.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • GlobalState (data)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │   Replay   │      │   Report   │      │   Store    │
//!     │  (files)   │      │ (summary)  │      │ (external) │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `GlobalState`, `TabState`, `Payment`, `StarsLedger`
//! - [`patch`]: tri-state field updates used by every merge
//! - [`tabs`]: per-tab lookup and merge
//! - [`payments`]: in-flight purchase transforms
//! - [`stars`]: ledger and transaction modal transforms
//! - [`action`]: the `Action` enum and `update()`
//! - [`replay`], [`report`], [`config`]: the file-facing edge

pub mod action;
pub mod config;
pub mod patch;
pub mod payments;
pub mod replay;
pub mod report;
pub mod stars;
pub mod state;
pub mod tabs;

// Re-export commonly used types for convenience
pub use action::{Action, update};
pub use patch::Patch;
pub use state::{GlobalState, Payment, PaymentPatch, TabId};
