use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::core::io::pdb::PdbFile;
use crate::core::io::report::write_lines;
use crate::core::io::traits::StructureFile;
use crate::engine::config::AnalysisConfig;
use crate::engine::counts::BondCounts;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::hbond_count;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub const STRUCTURE_EXTENSION: &str = "pdb";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    Analyzed,
    /// `<dir>/<id>.pdb` does not exist.
    Missing,
    /// The file exists but could not be read.
    Failed(String),
}

/// Result of analyzing one structure identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub id: String,
    pub counts: BondCounts,
    pub status: EntryStatus,
}

impl BatchEntry {
    fn sentinel(id: &str, status: EntryStatus) -> Self {
        Self {
            id: id.to_string(),
            counts: BondCounts::SENTINEL,
            status,
        }
    }
}

pub fn structure_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.{STRUCTURE_EXTENSION}"))
}

/// Lists the identifiers of every `*.pdb` file in `dir`, sorted.
pub fn discover_ids(dir: &Path) -> Result<Vec<String>, EngineError> {
    if !dir.is_dir() {
        return Err(EngineError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut ids = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(STRUCTURE_EXTENSION));
        if let (true, Some(stem)) = (has_extension, path.file_stem().and_then(|s| s.to_str())) {
            ids.push(stem.to_string());
        }
    }
    ids.sort();
    Ok(ids)
}

/// Loads and analyzes a single structure. Never fails: unreadable input
/// degrades to the sentinel counts.
pub fn analyze_structure(dir: &Path, id: &str, config: &AnalysisConfig) -> BatchEntry {
    let path = structure_path(dir, id);
    if !path.is_file() {
        warn!(id, "{}", EngineError::StructureNotFound { path });
        return BatchEntry::sentinel(id, EntryStatus::Missing);
    }

    match PdbFile::read_from_path(&path, id) {
        Ok((structure, metadata)) => {
            if metadata.skipped_records > 0 {
                warn!(
                    id,
                    skipped = metadata.skipped_records,
                    "Skipped malformed coordinate records."
                );
            }
            BatchEntry {
                id: id.to_string(),
                counts: hbond_count::count_structure(&structure, config),
                status: EntryStatus::Analyzed,
            }
        }
        Err(source) => {
            let error = EngineError::StructureLoad {
                id: id.to_string(),
                source,
            };
            warn!("{error}");
            BatchEntry::sentinel(id, EntryStatus::Failed(error.to_string()))
        }
    }
}

/// Analyzes each identifier's structure in `structure_dir`. The result holds
/// one entry per identifier, in input order.
#[instrument(skip_all, name = "batch_workflow")]
pub fn run(
    ids: &[String],
    structure_dir: &Path,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<BatchEntry>, EngineError> {
    if !structure_dir.is_dir() {
        return Err(EngineError::DirectoryNotFound {
            path: structure_dir.to_path_buf(),
        });
    }

    info!(
        structures = ids.len(),
        dir = %structure_dir.display(),
        "Starting hydrogen-bond batch analysis."
    );
    reporter.report(Progress::BatchStart {
        total: ids.len() as u64,
    });

    let analyze = |id: &String| {
        reporter.report(Progress::ItemStart { id: id.clone() });
        let entry = analyze_structure(structure_dir, id, config);
        match &entry.status {
            EntryStatus::Analyzed => reporter.report(Progress::ItemFinish { id: id.clone() }),
            EntryStatus::Missing => reporter.report(Progress::ItemFailed {
                id: id.clone(),
                reason: EngineError::StructureNotFound {
                    path: structure_path(structure_dir, id),
                }
                .to_string(),
            }),
            EntryStatus::Failed(reason) => reporter.report(Progress::ItemFailed {
                id: id.clone(),
                reason: reason.clone(),
            }),
        }
        entry
    };

    #[cfg(not(feature = "parallel"))]
    let entries: Vec<BatchEntry> = ids.iter().map(analyze).collect();
    #[cfg(feature = "parallel")]
    let entries: Vec<BatchEntry> = ids.par_iter().map(analyze).collect();

    reporter.report(Progress::BatchFinish);
    let analyzed = entries
        .iter()
        .filter(|e| e.status == EntryStatus::Analyzed)
        .count();
    info!(
        analyzed,
        failed = entries.len() - analyzed,
        "Batch analysis complete."
    );
    Ok(entries)
}

/// Writes one `<distance_only>,<angle_satisfying>` line per entry.
pub fn write_report(path: &Path, entries: &[BatchEntry]) -> Result<(), EngineError> {
    write_lines(path, entries.iter().map(|entry| entry.counts)).map_err(|source| {
        EngineError::Output {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SERINE_ASPARTATE: &str = "\
ATOM      1  OG  SER A   1       0.000   0.000   0.000  1.00  0.00           O
ATOM      2  HG  SER A   1       1.000   0.000   0.000  1.00  0.00           H
ATOM      3  OD1 ASP A   2       2.800   0.000   0.000  1.00  0.00           O
END
";

    #[test]
    fn run_reports_counts_in_input_order_with_sentinels() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.pdb"), SERINE_ASPARTATE).unwrap();
        fs::write(dir.path().join("empty.pdb"), "").unwrap();

        let ids = vec!["missing".to_string(), "good".to_string(), "empty".to_string()];
        let entries = run(&ids, dir.path(), &AnalysisConfig::default(), &ProgressReporter::new())
            .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, "missing");
        assert_eq!(entries[0].status, EntryStatus::Missing);
        assert_eq!(entries[0].counts, BondCounts::SENTINEL);
        assert_eq!(entries[1].counts, BondCounts::new(1, 1));
        assert_eq!(entries[1].status, EntryStatus::Analyzed);
        assert_eq!(entries[2].counts, BondCounts::SENTINEL);
        assert_eq!(entries[2].status, EntryStatus::Analyzed);
    }

    #[test]
    fn missing_structure_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let failures = std::sync::Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::ItemFailed { id, reason } = event {
                failures.lock().unwrap().push((id, reason));
            }
        }));

        run(&["4abc".to_string()], dir.path(), &AnalysisConfig::default(), &reporter).unwrap();
        drop(reporter);

        let failures = failures.into_inner().unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "4abc");
        assert!(failures[0].1.starts_with("Structure file not found"));
        assert!(failures[0].1.contains("4abc.pdb"));
    }

    #[test]
    fn run_fails_for_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let result = run(&[], &missing, &AnalysisConfig::default(), &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::DirectoryNotFound { .. })));
    }

    #[test]
    fn discover_ids_lists_sorted_pdb_stems() {
        let dir = tempdir().unwrap();
        for name in ["7quu.pdb", "1k0p.pdb", "notes.txt", "5jxv.PDB"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("sub.pdb")).unwrap();

        let ids = discover_ids(dir.path()).unwrap();
        assert_eq!(ids, vec!["1k0p", "5jxv", "7quu"]);
    }

    #[test]
    fn write_report_emits_one_line_per_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let entries = vec![
            BatchEntry {
                id: "a".into(),
                counts: BondCounts::new(12, 5),
                status: EntryStatus::Analyzed,
            },
            BatchEntry::sentinel("b", EntryStatus::Missing),
        ];
        write_report(&path, &entries).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "12,5\n0,0\n");
    }
}
