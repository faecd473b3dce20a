use super::ids::ChainId;

/// One coordinate set of a structure (a `MODEL` block, or the whole file when
/// no `MODEL` records are present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub serial: usize,
    pub(crate) chains: Vec<ChainId>,
}

impl Model {
    pub(crate) fn new(serial: usize) -> Self {
        Self {
            serial,
            chains: Vec::new(),
        }
    }

    pub fn chains(&self) -> &[ChainId] {
        &self.chains
    }
}
