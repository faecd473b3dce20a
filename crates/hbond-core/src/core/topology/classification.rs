use phf::{Map, Set, phf_map, phf_set};

/// Wildcard key whose atom names apply to every residue, standard or not.
pub const ANY_RESIDUE: &str = "ANY";

static DONORS_BY_RESIDUE: Map<&'static str, &'static [&'static str]> = phf_map! {
    "ALA" => &[],
    "ARG" => &["NE", "NH1", "NH2"],
    "ASN" => &["ND2"],
    "ASP" => &[],
    "CYS" => &["SG"],
    "GLN" => &["NE2"],
    "GLU" => &[],
    "GLY" => &[],
    "HIS" => &["ND1", "NE2"],
    "ILE" => &[],
    "LEU" => &[],
    "LYS" => &["NZ"],
    "MET" => &[],
    "PHE" => &[],
    "PRO" => &[],
    "SER" => &["OG"],
    "THR" => &["OG1"],
    "TRP" => &["NE1"],
    "TYR" => &["OH"],
    "VAL" => &[],
    "ANY" => &["N"],
};

static ACCEPTORS_BY_RESIDUE: Map<&'static str, &'static [&'static str]> = phf_map! {
    "ALA" => &[],
    "ARG" => &[],
    "ASN" => &["OD1"],
    "ASP" => &["OD1", "OD2"],
    "CYS" => &[],
    "GLN" => &["OE1"],
    "GLU" => &["OE1", "OE2"],
    "GLY" => &[],
    "HIS" => &["ND1", "NE2"],
    "ILE" => &[],
    "LEU" => &[],
    "LYS" => &[],
    "MET" => &["SD"],
    "PHE" => &[],
    "PRO" => &["O"],
    "SER" => &["OG"],
    "THR" => &["OG1"],
    "TRP" => &[],
    "TYR" => &["OH"],
    "VAL" => &[],
    "ANY" => &["O"],
};

static NUCLEOTIDE_RESIDUES: Set<&'static str> = phf_set! {
    "A", "G", "C", "T", "U", "DA", "DG", "DC", "DT",
};

static NUCLEOTIDE_DONOR_ATOMS: Set<&'static str> = phf_set! {
    "N1", "N2", "N3", "N4", "N6", "N7", "N9", "O2", "O4", "O6",
};

static NUCLEOTIDE_ACCEPTOR_ATOMS: Set<&'static str> = phf_set! {
    "O2", "O4", "O6", "OP1", "OP2", "N1", "N3", "N7",
};

static CANONICAL_ONE_LETTER: Set<&'static str> = phf_set! {
    "A", "R", "N", "D", "C", "Q", "E", "G", "H", "I",
    "L", "K", "M", "F", "P", "S", "T", "W", "Y", "V",
};

/// Hydrogen-bonding capability of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HBondRole {
    #[default]
    None,
    Donor,
    Acceptor,
    Both,
}

impl HBondRole {
    pub fn is_donor(self) -> bool {
        matches!(self, HBondRole::Donor | HBondRole::Both)
    }

    pub fn is_acceptor(self) -> bool {
        matches!(self, HBondRole::Acceptor | HBondRole::Both)
    }
}

fn lookup(
    table: &Map<&'static str, &'static [&'static str]>,
    nucleotide_atoms: &Set<&'static str>,
    atom_name: &str,
    residue_name: &str,
) -> bool {
    if residue_name != ANY_RESIDUE
        && table
            .get(residue_name)
            .is_some_and(|names| names.contains(&atom_name))
    {
        return true;
    }

    if table
        .get(ANY_RESIDUE)
        .is_some_and(|names| names.contains(&atom_name))
    {
        return true;
    }

    is_nucleotide(residue_name) && nucleotide_atoms.contains(atom_name)
}

/// Returns `true` if the atom can donate a hydrogen bond.
///
/// Checked in order: the residue-specific table, the backbone wildcard, and the
/// nucleotide base atoms (only for recognized nucleotide codes). Unknown residues
/// still match the wildcard, so backbone `N` of ligands and modified residues
/// participates.
pub fn is_donor_name(atom_name: &str, residue_name: &str) -> bool {
    lookup(
        &DONORS_BY_RESIDUE,
        &NUCLEOTIDE_DONOR_ATOMS,
        atom_name,
        residue_name,
    )
}

/// Returns `true` if the atom can accept a hydrogen bond. Same lookup order as
/// [`is_donor_name`].
pub fn is_acceptor_name(atom_name: &str, residue_name: &str) -> bool {
    lookup(
        &ACCEPTORS_BY_RESIDUE,
        &NUCLEOTIDE_ACCEPTOR_ATOMS,
        atom_name,
        residue_name,
    )
}

pub fn classify(atom_name: &str, residue_name: &str) -> HBondRole {
    match (
        is_donor_name(atom_name, residue_name),
        is_acceptor_name(atom_name, residue_name),
    ) {
        (true, true) => HBondRole::Both,
        (true, false) => HBondRole::Donor,
        (false, true) => HBondRole::Acceptor,
        (false, false) => HBondRole::None,
    }
}

/// Recognized DNA/RNA residue codes; only these match the nucleotide atom lists.
pub fn is_nucleotide(residue_name: &str) -> bool {
    NUCLEOTIDE_RESIDUES.contains(residue_name)
}

/// Membership in the 20 standard one-letter amino-acid codes, case-insensitive.
pub fn is_canonical_one_letter(code: &str) -> bool {
    CANONICAL_ONE_LETTER.contains(code.trim().to_ascii_uppercase().as_str())
}
