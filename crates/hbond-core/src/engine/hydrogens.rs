use nalgebra::Point3;
use tracing::trace;

use super::config::{AnalysisConfig, HydrogenMode, VIRTUAL_HYDROGEN_BOND_LENGTH};
use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::{calculate_hn_position, distance};

const BACKBONE_NITROGEN: &str = "N";
const BACKBONE_ALPHA_CARBON: &str = "CA";
const BACKBONE_CARBONYL_CARBON: &str = "C";

/// Resolves the hydrogen positions bonded to a donor atom.
///
/// Explicit hydrogens are collected once from every model of the structure and
/// matched to a donor purely by distance, so a hydrogen listed in another model
/// still qualifies when it happens to lie within the covalent cutoff.
pub struct HydrogenResolver<'a> {
    structure: &'a Structure,
    hydrogens: Vec<Point3<f64>>,
    covalent_cutoff: f64,
    mode: HydrogenMode,
}

impl<'a> HydrogenResolver<'a> {
    pub fn new(structure: &'a Structure, config: &AnalysisConfig) -> Self {
        let hydrogens: Vec<_> = structure
            .atoms_iter()
            .filter(|(_, atom)| atom.is_hydrogen())
            .map(|(_, atom)| atom.position)
            .collect();
        trace!(
            count = hydrogens.len(),
            structure = structure.id(),
            "Collected explicit hydrogens."
        );

        Self {
            structure,
            hydrogens,
            covalent_cutoff: config.criteria.covalent_bond_cutoff,
            mode: config.hydrogen_mode,
        }
    }

    pub fn explicit_hydrogen_count(&self) -> usize {
        self.hydrogens.len()
    }

    /// Hydrogens strictly within the covalent cutoff of `donor`, in input order.
    pub fn explicit(&self, donor: &Atom) -> Vec<Point3<f64>> {
        self.hydrogens
            .iter()
            .filter(|h| distance(&donor.position, h) < self.covalent_cutoff)
            .copied()
            .collect()
    }

    /// Hydrogens used for the angle test of `donor_id`. Under
    /// [`HydrogenMode::VirtualBackbone`] a backbone nitrogen without explicit
    /// hydrogens receives one synthesized amide hydrogen when its geometry allows.
    pub fn resolve(&self, donor_id: AtomId) -> Vec<Point3<f64>> {
        let Some(donor) = self.structure.atom(donor_id) else {
            return Vec::new();
        };

        let explicit = self.explicit(donor);
        if !explicit.is_empty() || self.mode == HydrogenMode::ExplicitOnly {
            return explicit;
        }

        self.virtual_backbone_hydrogen(donor)
            .into_iter()
            .collect()
    }

    fn virtual_backbone_hydrogen(&self, donor: &Atom) -> Option<Point3<f64>> {
        if donor.name != BACKBONE_NITROGEN {
            return None;
        }
        let residue = self.structure.residue(donor.residue_id)?;
        let ca = self
            .structure
            .atom(residue.atom_by_name(BACKBONE_ALPHA_CARBON)?)?;
        // The residue's own carbonyl must exist for it to count as a backbone residue.
        residue.atom_by_name(BACKBONE_CARBONYL_CARBON)?;

        let previous = self
            .structure
            .residue(self.structure.previous_residue(donor.residue_id)?)?;
        let prev_c = self
            .structure
            .atom(previous.atom_by_name(BACKBONE_CARBONYL_CARBON)?)?;

        calculate_hn_position(
            &donor.position,
            &ca.position,
            &prev_c.position,
            VIRTUAL_HYDROGEN_BOND_LENGTH,
        )
    }
}
