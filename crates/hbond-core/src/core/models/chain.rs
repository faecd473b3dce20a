use super::ids::{ModelId, ResidueId};

/// A chain within one model. Residues keep the order they appeared in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub id: char,
    pub model_id: ModelId,
    pub(crate) residues: Vec<ResidueId>,
}

impl Chain {
    pub(crate) fn new(id: char, model_id: ModelId) -> Self {
        Self {
            id,
            model_id,
            residues: Vec::new(),
        }
    }

    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }
}
