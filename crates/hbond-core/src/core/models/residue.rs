use super::ids::{AtomId, ChainId};

const WATER_NAMES: [&str; 2] = ["HOH", "WAT"];

/// Distinguishes polymer residues from heterogens sharing a sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum HeteroFlag {
    #[default]
    Standard,
    Water,
    Hetero(String),
}

impl HeteroFlag {
    /// Flag for a coordinate record: `ATOM` records are standard, `HETATM`
    /// records are water or a named heterogen.
    pub fn from_record(is_hetatm: bool, residue_name: &str) -> Self {
        if !is_hetatm {
            Self::Standard
        } else if WATER_NAMES.contains(&residue_name) {
            Self::Water
        } else {
            Self::Hetero(residue_name.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: isize,                 // Residue sequence number from source file
    pub insertion_code: Option<char>,  // PDB insertion code, if any
    pub name: String,                  // Name of the residue (e.g., "ALA", "DG")
    pub chain_id: ChainId,             // ID of the parent chain
    pub hetero: HeteroFlag,            // ATOM vs HETATM origin
    pub(crate) atoms: Vec<AtomId>,     // Atoms in file order
    atom_names: Vec<(String, AtomId)>, // First occurrence of each atom name
}

impl Residue {
    pub(crate) fn new(
        number: isize,
        insertion_code: Option<char>,
        name: &str,
        chain_id: ChainId,
        hetero: HeteroFlag,
    ) -> Self {
        Self {
            number,
            insertion_code,
            name: name.to_string(),
            chain_id,
            hetero,
            atoms: Vec::new(),
            atom_names: Vec::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        if self.atom_by_name(atom_name).is_none() {
            self.atom_names.push((atom_name.to_string(), atom_id));
        }
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn atom_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_names
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, id)| id)
    }
}
