//! Provides input/output functionality for structure files and result tables.
//!
//! Structure files are read through the [`traits::StructureFile`] interface
//! ([`pdb`] implements the fixed-column coordinate format). Contact tables are
//! CSV files consumed by the ratio statistics, and [`report`] writes the
//! line-oriented result files.

pub mod contacts;
pub mod pdb;
pub mod report;
pub mod traits;
