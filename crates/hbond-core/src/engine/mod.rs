//! # Detection Engine
//!
//! The engine turns parsed structures and contact tables into counts. It owns
//! the analysis thresholds ([`config`]), the per-donor hydrogen lookup
//! ([`hydrogens`]), the count types ([`counts`]) and the aggregation tasks
//! ([`tasks`]) that the workflows drive.
//!
//! Progress is surfaced through [`progress::ProgressReporter`] so that callers
//! such as the CLI can render it without the engine depending on any UI crate.

pub mod config;
pub mod counts;
pub mod error;
pub mod hydrogens;
pub mod progress;
pub mod tasks;
