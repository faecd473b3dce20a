use hbondkit::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Failures surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// Anything raised while analyzing structures or contact tables.
    #[error(transparent)]
    Core(#[from] EngineError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Could not download structure: {0}")]
    Fetch(String),

    /// A TOML config or id list that could not be read.
    #[error("Could not parse '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Bad command-line argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
