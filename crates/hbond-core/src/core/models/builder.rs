use super::atom::Atom;
use super::ids::{AtomId, ChainId, ModelId, ResidueId};
use super::residue::HeteroFlag;
use super::structure::Structure;
use nalgebra::Point3;
use std::collections::HashMap;

const IMPLICIT_MODEL_SERIAL: usize = 1;
const IMPLICIT_CHAIN_ID: char = ' ';

/// Incremental constructor for [`Structure`], driven record by record by a reader.
pub struct StructureBuilder {
    structure: Structure,

    // --- Builder-specific state for efficient construction ---
    chain_map: HashMap<(ModelId, char), ChainId>,
    residue_map: HashMap<(ChainId, HeteroFlag, isize, Option<char>), ResidueId>,
    current_model: Option<ModelId>,
    current_chain: Option<ChainId>,
    current_residue: Option<ResidueId>,
}

impl StructureBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            structure: Structure::new(id),
            chain_map: HashMap::new(),
            residue_map: HashMap::new(),
            current_model: None,
            current_chain: None,
            current_residue: None,
        }
    }

    /// Opens a new model. Subsequent chains and residues belong to it.
    pub fn start_model(&mut self, serial: usize) -> ModelId {
        let id = self.structure.insert_model(serial);
        self.current_model = Some(id);
        self.current_chain = None;
        self.current_residue = None;
        id
    }

    /// Opens (or reopens) a chain in the current model, creating an implicit
    /// model when none is open.
    pub fn start_chain(&mut self, chain_id: char) -> ChainId {
        let model_id = match self.current_model {
            Some(id) => id,
            None => self.start_model(IMPLICIT_MODEL_SERIAL),
        };
        let id = match self.chain_map.get(&(model_id, chain_id)) {
            Some(&id) => id,
            None => {
                let id = self
                    .structure
                    .insert_chain(model_id, chain_id)
                    .expect("current model is always present in the arena");
                self.chain_map.insert((model_id, chain_id), id);
                id
            }
        };
        self.current_chain = Some(id);
        self.current_residue = None;
        id
    }

    /// Opens (or reopens) a polymer residue in the current chain. Residues are
    /// keyed by sequence number and insertion code; the name of the first
    /// opening wins.
    pub fn start_residue(
        &mut self,
        number: isize,
        insertion_code: Option<char>,
        name: &str,
    ) -> ResidueId {
        self.open_residue(number, insertion_code, name, HeteroFlag::Standard)
    }

    /// Opens (or reopens) a heterogen (`HETATM`) residue. Heterogens never
    /// merge with a polymer residue carrying the same number.
    pub fn start_heterogen(
        &mut self,
        number: isize,
        insertion_code: Option<char>,
        name: &str,
    ) -> ResidueId {
        let flag = HeteroFlag::from_record(true, name);
        self.open_residue(number, insertion_code, name, flag)
    }

    fn open_residue(
        &mut self,
        number: isize,
        insertion_code: Option<char>,
        name: &str,
        hetero: HeteroFlag,
    ) -> ResidueId {
        let chain_id = match self.current_chain {
            Some(id) => id,
            None => self.start_chain(IMPLICIT_CHAIN_ID),
        };
        let key = (chain_id, hetero, number, insertion_code);
        let id = match self.residue_map.get(&key) {
            Some(&id) => id,
            None => {
                let id = self
                    .structure
                    .insert_residue(chain_id, number, insertion_code, name, key.1.clone())
                    .expect("current chain is always present in the arena");
                self.residue_map.insert(key, id);
                id
            }
        };
        self.current_residue = Some(id);
        id
    }

    /// Adds an atom to the current residue. Returns `None` when no residue is open.
    pub fn add_atom(&mut self, name: &str, element: &str, position: Point3<f64>) -> Option<AtomId> {
        let residue_id = self.current_residue?;
        self.structure
            .insert_atom(Atom::new(name, element, residue_id, position))
    }

    /// Replaces the coordinates of an atom added earlier.
    pub fn relocate_atom(&mut self, atom_id: AtomId, position: Point3<f64>) -> bool {
        self.structure.relocate_atom(atom_id, position)
    }

    pub fn build(self) -> Structure {
        self.structure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residue_without_model_or_chain_opens_implicit_ones() {
        let mut builder = StructureBuilder::new("implicit");
        builder.start_residue(1, None, "ALA");
        builder.add_atom("CA", "C", Point3::origin()).unwrap();
        let structure = builder.build();
        assert_eq!(structure.model_count(), 1);
        let (_, model) = structure.models_iter().next().unwrap();
        assert_eq!(model.serial, IMPLICIT_MODEL_SERIAL);
        let chain = structure.chain(model.chains()[0]).unwrap();
        assert_eq!(chain.id, IMPLICIT_CHAIN_ID);
    }

    #[test]
    fn add_atom_without_residue_is_rejected() {
        let mut builder = StructureBuilder::new("orphan");
        builder.start_chain('A');
        assert!(builder.add_atom("N", "N", Point3::origin()).is_none());
        assert!(builder.build().is_empty());
    }

    #[test]
    fn reopening_a_residue_appends_to_the_same_residue() {
        let mut builder = StructureBuilder::new("reopen");
        builder.start_chain('A');
        let first = builder.start_residue(5, None, "LYS");
        builder.add_atom("N", "N", Point3::origin());
        builder.start_residue(6, None, "GLY");
        let again = builder.start_residue(5, None, "XXX");
        builder.add_atom("NZ", "N", Point3::origin());
        assert_eq!(first, again);
        let structure = builder.build();
        let residue = structure.residue(first).unwrap();
        assert_eq!(residue.name, "LYS");
        assert_eq!(residue.atoms().len(), 2);
    }

    #[test]
    fn insertion_codes_separate_residues() {
        let mut builder = StructureBuilder::new("icode");
        builder.start_chain('A');
        let plain = builder.start_residue(52, None, "ALA");
        let inserted = builder.start_residue(52, Some('A'), "ALA");
        assert_ne!(plain, inserted);
    }

    #[test]
    fn heterogens_do_not_merge_with_polymer_residues() {
        let mut builder = StructureBuilder::new("hetero");
        builder.start_chain('A');
        let alanine = builder.start_residue(1, None, "ALA");
        let water = builder.start_heterogen(1, None, "HOH");
        let ligand = builder.start_heterogen(1, None, "SO4");
        assert_ne!(alanine, water);
        assert_ne!(water, ligand);
        assert_eq!(builder.start_heterogen(1, None, "HOH"), water);
        let structure = builder.build();
        assert_eq!(structure.residue(water).unwrap().hetero, HeteroFlag::Water);
        assert_eq!(
            structure.residue(ligand).unwrap().hetero,
            HeteroFlag::Hetero("SO4".to_string())
        );
    }

    #[test]
    fn chains_are_scoped_per_model() {
        let mut builder = StructureBuilder::new("models");
        builder.start_model(1);
        let a1 = builder.start_chain('A');
        builder.start_model(2);
        let a2 = builder.start_chain('A');
        assert_ne!(a1, a2);
    }
}
