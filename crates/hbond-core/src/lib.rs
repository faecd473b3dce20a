//! # hbondkit
//!
//! Geometric hydrogen-bond detection for macromolecular structures read from
//! fixed-column coordinate files.
//!
//! For every model of a structure, atoms are partitioned into donors and
//! acceptors by residue and atom name. Each donor-acceptor pair from different
//! residues within the distance cutoff is counted once under a distance-only
//! policy and, if one of the donor's hydrogens forms a wide enough D-H-A angle,
//! once more under the angle policy.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Structure hierarchy, readers and writers,
//!   classification tables and geometry helpers.
//!
//! - **[`engine`]: The Logic Core.** Analysis thresholds, hydrogen resolution and
//!   the aggregation tasks that turn a structure or a contact table into counts.
//!
//! - **[`workflows`]: The Public API.** Batch entry points over directories of
//!   structures and contact tables, plus the per-residue RMSD comparison.
//!
//! ## Example
//!
//! ```ignore
//! use hbondkit::core::io::pdb::PdbFile;
//! use hbondkit::core::io::traits::StructureFile;
//! use hbondkit::engine::config::AnalysisConfig;
//! use hbondkit::engine::tasks::hbond_count::count_structure;
//!
//! let (structure, _) = PdbFile::read_from_path("dataset/1k0p.pdb", "1k0p")?;
//! let counts = count_structure(&structure, &AnalysisConfig::default());
//! println!("{counts}");
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
