use super::ids::ResidueId;
use nalgebra::Point3;

/// A single atom record of a structure.
///
/// Atoms are immutable once inserted into a [`Structure`](super::structure::Structure).
/// The owning residue is referenced by key, never owned, so lookups from an atom
/// to its residue (for classification and same-residue exclusion) go through the
/// structure's arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "OG1").
    pub name: String,
    /// The element symbol, upper-case (e.g., "C", "H", "SE").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
}

impl Atom {
    pub fn new(name: &str, element: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            element: element.to_ascii_uppercase(),
            position,
            residue_id,
        }
    }

    /// Returns `true` for protium hydrogens. Deuterium is reported under its
    /// own element symbol and is not matched.
    pub fn is_hydrogen(&self) -> bool {
        self.element.eq_ignore_ascii_case("H")
    }
}

/// Infers an element symbol from an atom name when the element columns are blank.
///
/// Leading digits (as in `1HB`) are skipped and the first alphabetic character
/// is taken, which is the convention for standard residue atom names.
pub fn infer_element(atom_name: &str) -> Option<String> {
    atom_name
        .trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
}
