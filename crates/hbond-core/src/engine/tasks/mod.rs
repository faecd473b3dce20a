//! Aggregation tasks.
//!
//! Each task reduces one input unit to a count: [`hbond_count`] walks the
//! donor-acceptor pairs of a structure, [`contact_ratio`] tallies the hydrogen
//! bond rows of a contact table.

pub mod contact_ratio;
pub mod hbond_count;
