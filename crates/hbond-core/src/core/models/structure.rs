use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ModelId, ResidueId};
use super::model::Model;
use super::residue::{HeteroFlag, Residue};
use nalgebra::Point3;
use slotmap::SlotMap;

/// A complete macromolecular structure: models, chains, residues and atoms.
///
/// Ownership is strictly top-down and held by the arenas below; parent links
/// (`Atom::residue_id`, `Residue::chain_id`, `Chain::model_id`) are plain keys
/// used for lookups only. Structures are append-only, so arena iteration order
/// equals insertion (file) order.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    /// Identifier of the structure (usually the file stem, e.g. "1k0p").
    id: String,
    models: SlotMap<ModelId, Model>,
    /// Models in the order they were opened.
    model_order: Vec<ModelId>,
    chains: SlotMap<ChainId, Chain>,
    residues: SlotMap<ResidueId, Residue>,
    atoms: SlotMap<AtomId, Atom>,
}

impl Structure {
    /// Creates a new, empty structure with the given identifier.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id)
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Model IDs in file order.
    pub fn model_ids(&self) -> &[ModelId] {
        &self.model_order
    }

    /// Returns an iterator over all models in file order.
    pub fn models_iter(&self) -> impl Iterator<Item = (ModelId, &Model)> {
        self.model_order
            .iter()
            .filter_map(|&id| self.models.get(id).map(|model| (id, model)))
    }

    /// Returns an iterator over every atom of every model, in file order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Returns an iterator over the atoms of one model, walking chains,
    /// residues and atoms in their stored order.
    pub fn model_atoms(&self, model_id: ModelId) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.models
            .get(model_id)
            .into_iter()
            .flat_map(|model| model.chains.iter())
            .filter_map(|&chain_id| self.chains.get(chain_id))
            .flat_map(|chain| chain.residues.iter())
            .filter_map(|&residue_id| self.residues.get(residue_id))
            .flat_map(|residue| residue.atoms.iter())
            .filter_map(|&atom_id| self.atoms.get(atom_id).map(|atom| (atom_id, atom)))
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn model_count(&self) -> usize {
        self.model_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns the residue immediately preceding `residue_id` in its chain.
    pub fn previous_residue(&self, residue_id: ResidueId) -> Option<ResidueId> {
        let residue = self.residues.get(residue_id)?;
        let chain = self.chains.get(residue.chain_id)?;
        let index = chain.residues.iter().position(|&id| id == residue_id)?;
        index.checked_sub(1).map(|prev| chain.residues[prev])
    }

    pub(crate) fn insert_model(&mut self, serial: usize) -> ModelId {
        let id = self.models.insert(Model::new(serial));
        self.model_order.push(id);
        id
    }

    pub(crate) fn insert_chain(&mut self, model_id: ModelId, chain_id: char) -> Option<ChainId> {
        if !self.models.contains_key(model_id) {
            return None;
        }
        let id = self.chains.insert(Chain::new(chain_id, model_id));
        self.models[model_id].chains.push(id);
        Some(id)
    }

    pub(crate) fn insert_residue(
        &mut self,
        chain_id: ChainId,
        number: isize,
        insertion_code: Option<char>,
        name: &str,
        hetero: HeteroFlag,
    ) -> Option<ResidueId> {
        if !self.chains.contains_key(chain_id) {
            return None;
        }
        let id = self
            .residues
            .insert(Residue::new(number, insertion_code, name, chain_id, hetero));
        self.chains[chain_id].residues.push(id);
        Some(id)
    }

    pub(crate) fn insert_atom(&mut self, atom: Atom) -> Option<AtomId> {
        let residue_id = atom.residue_id;
        if !self.residues.contains_key(residue_id) {
            return None;
        }
        let name = atom.name.clone();
        let id = self.atoms.insert(atom);
        self.residues[residue_id].add_atom(&name, id);
        Some(id)
    }

    /// Moves an existing atom. Used when a later alternate location replaces
    /// the conformer read first.
    pub(crate) fn relocate_atom(&mut self, atom_id: AtomId, position: Point3<f64>) -> bool {
        match self.atoms.get_mut(atom_id) {
            Some(atom) => {
                atom.position = position;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::StructureBuilder;

    fn two_model_structure() -> Structure {
        let mut builder = StructureBuilder::new("test");
        for serial in 1..=2 {
            builder.start_model(serial);
            builder.start_chain('A');
            builder.start_residue(1, None, "GLY");
            builder.add_atom("N", "N", Point3::new(0.0, 0.0, 0.0));
            builder.add_atom("CA", "C", Point3::new(1.5, 0.0, 0.0));
            builder.start_residue(2, None, "SER");
            builder.add_atom("N", "N", Point3::new(3.0, 0.0, 0.0));
        }
        builder.build()
    }

    #[test]
    fn model_atoms_are_scoped_to_one_model() {
        let structure = two_model_structure();
        assert_eq!(structure.model_count(), 2);
        assert_eq!(structure.atom_count(), 6);
        for &model_id in structure.model_ids() {
            let names: Vec<_> = structure
                .model_atoms(model_id)
                .map(|(_, atom)| atom.name.as_str())
                .collect();
            assert_eq!(names, vec!["N", "CA", "N"]);
        }
    }

    #[test]
    fn relocate_atom_moves_only_that_atom() {
        let mut structure = two_model_structure();
        let (atom_id, _) = structure.atoms_iter().nth(2).unwrap();
        assert!(structure.relocate_atom(atom_id, Point3::new(9.0, 9.0, 9.0)));
        let positions: Vec<_> = structure.atoms_iter().map(|(_, a)| a.position).collect();
        assert_eq!(positions[2], Point3::new(9.0, 9.0, 9.0));
        assert_eq!(positions[1], Point3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn previous_residue_walks_chain_order() {
        let structure = two_model_structure();
        let model_id = structure.model_ids()[0];
        let chain_id = structure.model(model_id).unwrap().chains()[0];
        let residues = structure.chain(chain_id).unwrap().residues().to_vec();
        assert_eq!(structure.previous_residue(residues[1]), Some(residues[0]));
        assert_eq!(structure.previous_residue(residues[0]), None);
    }

    #[test]
    fn equal_residue_numbers_in_different_models_are_distinct_residues() {
        let structure = two_model_structure();
        let ids: Vec<_> = structure
            .atoms_iter()
            .filter(|(_, atom)| atom.name == "CA")
            .map(|(_, atom)| atom.residue_id)
            .collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn empty_structure_reports_no_atoms() {
        let structure = Structure::new("empty");
        assert!(structure.is_empty());
        assert_eq!(structure.id(), "empty");
        assert_eq!(structure.models_iter().count(), 0);
    }
}
