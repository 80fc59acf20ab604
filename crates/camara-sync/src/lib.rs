//! Synchronisation of upstream legislative data into a local store.
//!
//! Two procedures are exposed through [`SyncPipeline`]: a legislator sync
//! and a per-year expense sync. [`SyncPipeline::run_full`] chains them behind
//! a single-flight [`SyncGate`]. Proposals are read through and never stored.
//!
//! All writes go through idempotent store operations, so re-running a sync
//! after a crash repairs whatever the interrupted run left behind.

pub mod config;
pub mod error;
pub mod gate;
pub mod pagination;
pub mod pipeline;
pub mod report;

pub use config::SyncConfig;
pub use error::{Result, SyncError, SyncStep};
pub use gate::{SyncGate, SyncPermit};
pub use pipeline::SyncPipeline;
pub use report::{ExpenseReport, LegislatorReport, RunSummary};
