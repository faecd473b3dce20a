//! # Workflows
//!
//! Batch entry points that tie the reader, the engine and the report writers
//! together. Each workflow degrades per-item failures to a diagnostic and keeps
//! going; only directory-level and output errors abort.
//!
//! - [`batch`]: hydrogen-bond counts for a list of structure files.
//! - [`ratio`]: intra/inter-chain hydrogen-bond ratios from contact tables.
//! - [`rmsd`]: per-residue RMSD between two structures.

pub mod batch;
pub mod ratio;
pub mod rmsd;
