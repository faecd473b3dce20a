use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const CONTACT_TABLE_SUFFIX: &str = "_contacts.csv";

const REQUIRED_COLUMNS: [&str; 7] = [
    "Type", "ResName1", "ResName2", "Chain1", "Chain2", "Res1", "Res2",
];

/// One row of a pre-computed residue contact table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ContactRecord {
    /// Contact type code (e.g. "HB" for hydrogen bond).
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "ResName1")]
    pub res_name1: String,
    #[serde(rename = "ResName2")]
    pub res_name2: String,
    #[serde(rename = "Chain1")]
    pub chain1: String,
    #[serde(rename = "Chain2")]
    pub chain2: String,
    #[serde(rename = "Res1")]
    pub res1: String,
    #[serde(rename = "Res2")]
    pub res2: String,
}

#[derive(Debug, Error)]
pub enum ContactTableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Contact table '{path}' has no '{column}' column")]
    MissingColumn { path: String, column: &'static str },
}

/// Reads a contact table. Rows that do not fit the record layout are skipped.
pub fn read_contact_table(path: &Path) -> Result<Vec<ContactRecord>, ContactTableError> {
    let path_str = || path.to_string_lossy().to_string();

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ContactTableError::Csv {
            path: path_str(),
            source: e,
        })?;

    let headers = reader.headers().map_err(|e| ContactTableError::Csv {
        path: path_str(),
        source: e,
    })?;
    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .copied()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(ContactTableError::MissingColumn {
            path: path_str(),
            column,
        });
    }

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<ContactRecord>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => debug!(row = row + 1, "Skipping malformed contact row: {}", e),
        }
    }
    Ok(records)
}

/// Locates the contact table for `id` under `<dir>/<id>/`, picking the first
/// `*_contacts.csv` file in lexicographic order.
pub fn find_contact_table(dir: &Path, id: &str) -> Option<PathBuf> {
    if id.is_empty() {
        return None;
    }
    let entries = fs::read_dir(dir.join(id)).ok()?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(CONTACT_TABLE_SUFFIX))
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}
