//! # Core Module
//!
//! Stateless building blocks of the library: the structure hierarchy, the file
//! readers and writers, the residue chemistry tables and the geometry kernels.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Models, chains, residues and atoms in arenas
//! - **File I/O** ([`io`]) - Fixed-column coordinate reader, contact tables, line reports
//! - **Structural Knowledge** ([`topology`]) - Donor/acceptor classification tables
//! - **Geometry** ([`utils`]) - Distances, D-H-A angles, amide hydrogen placement, RMSD
//!
//! Nothing in this layer logs more than `debug!` detail or holds state across calls;
//! decisions about thresholds and batching belong to the engine.

pub mod io;
pub mod models;
pub mod topology;
pub mod utils;
