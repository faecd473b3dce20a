use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::contacts::ContactTableError;
use crate::core::io::pdb::PdbError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid analysis configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Structure directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Structure file not found: {}", path.display())]
    StructureNotFound { path: PathBuf },

    #[error("Failed to read structure '{id}': {source}")]
    StructureLoad {
        id: String,
        #[source]
        source: PdbError,
    },

    #[error(transparent)]
    ContactTable(#[from] ContactTableError),

    #[error("Residue {residue} not found in structure '{structure}'")]
    ResidueNotFound { structure: String, residue: String },

    #[error("Residue {residue} shares no selected atoms between the two structures")]
    NoCommonAtoms { residue: String },

    #[error("Failed to read id list '{}': {source}", path.display())]
    IdList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write results to '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
