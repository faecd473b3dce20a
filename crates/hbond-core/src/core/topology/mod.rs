//! # Topology Module
//!
//! Static chemical knowledge about residues: which atoms can donate or accept a
//! hydrogen bond, and which one-letter codes name the canonical amino acids.
//!
//! ## Key Components
//!
//! - [`classification`] - Donor/acceptor tables for amino acids and nucleotides,
//!   including the backbone wildcard entries
//!
//! ## Usage
//!
//! ```ignore
//! use hbondkit::core::topology::classification::{classify, HBondRole};
//!
//! assert_eq!(classify("NZ", "LYS"), HBondRole::Donor);
//! assert_eq!(classify("OG", "SER"), HBondRole::Both);
//! ```

pub mod classification;
