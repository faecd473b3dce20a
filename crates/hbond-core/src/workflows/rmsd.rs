use nalgebra::Point3;
use std::collections::HashMap;
use std::fmt;
use tracing::{info, warn};

use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::calculate_named_rmsd;
use crate::engine::error::EngineError;

pub const BACKBONE_ATOMS: [&str; 4] = ["N", "CA", "C", "O"];

/// Which residue, and which of its atoms, to superimpose by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueSelector {
    pub residue_number: isize,
    pub chain_id: Option<char>,
    pub atom_names: Vec<String>,
}

impl ResidueSelector {
    /// Selects the backbone atoms of `residue_number` in any chain.
    pub fn backbone(residue_number: isize) -> Self {
        Self {
            residue_number,
            chain_id: None,
            atom_names: BACKBONE_ATOMS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_chain(mut self, chain_id: char) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn with_atoms<I, S>(mut self, atom_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.atom_names = atom_names.into_iter().map(Into::into).collect();
        self
    }

    fn describe(&self) -> String {
        match self.chain_id {
            Some(chain) => format!("{}{}", chain, self.residue_number),
            None => self.residue_number.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissingAtom {
    pub structure: String,
    pub atom_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RmsdReport {
    pub residue_name: String,
    pub residue_number: isize,
    pub rmsd: f64,
    /// Selected atoms present in both structures, in selector order.
    pub compared: Vec<String>,
    pub missing: Vec<MissingAtom>,
}

impl fmt::Display for RmsdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RMSD for {}{}: {:.2} Å",
            title_case(&self.residue_name),
            self.residue_number,
            self.rmsd
        )
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn find_residue<'s>(structure: &'s Structure, selector: &ResidueSelector) -> Option<&'s Residue> {
    let &model_id = structure.model_ids().first()?;
    let model = structure.model(model_id)?;
    model
        .chains()
        .iter()
        .filter_map(|&chain_id| structure.chain(chain_id))
        .filter(|chain| selector.chain_id.is_none_or(|id| id == chain.id))
        .flat_map(|chain| chain.residues().iter())
        .filter_map(|&residue_id| structure.residue(residue_id))
        .find(|residue| residue.number == selector.residue_number)
}

fn require_residue<'s>(
    structure: &'s Structure,
    selector: &ResidueSelector,
) -> Result<&'s Residue, EngineError> {
    find_residue(structure, selector).ok_or_else(|| EngineError::ResidueNotFound {
        structure: structure.id().to_string(),
        residue: selector.describe(),
    })
}

fn selected_coordinates(
    structure: &Structure,
    residue: &Residue,
    selector: &ResidueSelector,
) -> HashMap<String, Point3<f64>> {
    selector
        .atom_names
        .iter()
        .filter_map(|name| {
            let atom = structure.atom(residue.atom_by_name(name)?)?;
            Some((name.clone(), atom.position))
        })
        .collect()
}

/// RMSD over the selected atoms of one residue between two structures,
/// matched by atom name. Only the first model of each structure is used.
pub fn residue_rmsd(
    reference: &Structure,
    model: &Structure,
    selector: &ResidueSelector,
) -> Result<RmsdReport, EngineError> {
    let reference_residue = require_residue(reference, selector)?;
    let model_residue = require_residue(model, selector)?;

    let reference_coords = selected_coordinates(reference, reference_residue, selector);
    let model_coords = selected_coordinates(model, model_residue, selector);

    let mut missing = Vec::new();
    for name in &selector.atom_names {
        for (structure, coords) in [(reference, &reference_coords), (model, &model_coords)] {
            if !coords.contains_key(name) {
                warn!(structure = structure.id(), atom = %name, "Selected atom is missing.");
                missing.push(MissingAtom {
                    structure: structure.id().to_string(),
                    atom_name: name.clone(),
                });
            }
        }
    }

    let rmsd = calculate_named_rmsd(&reference_coords, &model_coords).ok_or_else(|| {
        EngineError::NoCommonAtoms {
            residue: selector.describe(),
        }
    })?;

    let compared = selector
        .atom_names
        .iter()
        .filter(|name| reference_coords.contains_key(*name) && model_coords.contains_key(*name))
        .cloned()
        .collect();

    info!(
        residue = %selector.describe(),
        rmsd,
        "Computed residue RMSD."
    );
    Ok(RmsdReport {
        residue_name: reference_residue.name.clone(),
        residue_number: selector.residue_number,
        rmsd,
        compared,
        missing,
    })
}
