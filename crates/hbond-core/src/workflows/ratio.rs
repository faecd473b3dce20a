use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::core::io::contacts::{find_contact_table, read_contact_table};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::contact_ratio::{HbTally, tally};

/// Written in place of a ratio when an identifier has no contact table.
pub const TABLE_NOT_FOUND: &str = "Arquivo CSV não encontrado";
/// Written in place of a ratio when the contact table could not be processed.
pub const RATIO_FAILED: &str = "Erro ao calcular a razão";

pub const DEFAULT_ID_LIST: &str = "lista_pdbs.txt";
pub const DEFAULT_RATIO_OUTPUT: &str = "razoes_aa_canonicos_hb.txt";
pub const DEFAULT_CONTACTS_DIR: &str = "output";

/// One output line of the ratio report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatioLine {
    Ratio(HbTally),
    TableNotFound,
    /// The table exists but could not be read; `reason` is logged, never written.
    Failed { reason: String },
}

impl fmt::Display for RatioLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioLine::Ratio(tally) => f.write_str(&tally.ratio_string()),
            RatioLine::TableNotFound => f.write_str(TABLE_NOT_FOUND),
            RatioLine::Failed { .. } => f.write_str(RATIO_FAILED),
        }
    }
}

/// Reads one identifier per line, trimmed. Blank lines are kept so that the
/// report stays aligned with the list.
pub fn read_id_list(path: &Path) -> Result<Vec<String>, EngineError> {
    let content = fs::read_to_string(path).map_err(|source| EngineError::IdList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(|line| line.trim().to_string()).collect())
}

pub fn ratio_for(contacts_dir: &Path, id: &str) -> RatioLine {
    let Some(table) = find_contact_table(contacts_dir, id) else {
        warn!(id, "No contact table found.");
        return RatioLine::TableNotFound;
    };

    match read_contact_table(&table) {
        Ok(records) => RatioLine::Ratio(tally(&records)),
        Err(e) => {
            let error = EngineError::from(e);
            warn!(id, %error, "Failed to compute hydrogen-bond ratio.");
            RatioLine::Failed {
                reason: error.to_string(),
            }
        }
    }
}

/// Computes one ratio line per identifier, in input order.
#[instrument(skip_all, name = "ratio_workflow")]
pub fn run(ids: &[String], contacts_dir: &Path, reporter: &ProgressReporter) -> Vec<RatioLine> {
    info!(
        ids = ids.len(),
        dir = %contacts_dir.display(),
        "Computing intra/inter-chain hydrogen-bond ratios."
    );
    reporter.report(Progress::BatchStart {
        total: ids.len() as u64,
    });

    let lines = ids
        .iter()
        .map(|id| {
            reporter.report(Progress::ItemStart { id: id.clone() });
            let line = ratio_for(contacts_dir, id);
            match &line {
                RatioLine::Ratio(_) => reporter.report(Progress::ItemFinish { id: id.clone() }),
                RatioLine::TableNotFound => reporter.report(Progress::ItemFailed {
                    id: id.clone(),
                    reason: TABLE_NOT_FOUND.to_string(),
                }),
                RatioLine::Failed { reason } => reporter.report(Progress::ItemFailed {
                    id: id.clone(),
                    reason: reason.clone(),
                }),
            }
            line
        })
        .collect();

    reporter.report(Progress::BatchFinish);
    lines
}
