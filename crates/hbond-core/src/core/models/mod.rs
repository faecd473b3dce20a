//! # Core Models Module
//!
//! The structure hierarchy consumed by the analysis engine: a [`Structure`](structure::Structure)
//! owns models, chains, residues and atoms in slot-map arenas, and every child keeps
//! a non-owning key to its parent.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom record with name, element, and coordinates
//! - [`residue`] - Residue with ordered atoms and name lookup
//! - [`chain`] - Ordered residues of one chain
//! - [`model`] - One coordinate set (NMR ensembles carry several)
//! - [`structure`] - The arena owning the whole hierarchy
//! - [`builder`] - Record-by-record construction used by readers
//! - [`ids`] - Typed keys for every level
//!
//! ## Usage
//!
//! ```ignore
//! use hbondkit::core::models::builder::StructureBuilder;
//! use nalgebra::Point3;
//!
//! let mut builder = StructureBuilder::new("demo");
//! builder.start_chain('A');
//! builder.start_residue(1, None, "SER");
//! builder.add_atom("OG", "O", Point3::new(0.0, 0.0, 0.0));
//! let structure = builder.build();
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod ids;
pub mod model;
pub mod residue;
pub mod structure;
