use super::{CrosslinkCandidate, CrosslinkSelector, Selection};
use crate::forge::error::Error;
use crate::model::network::Network;
use crate::model::types::{CROSSLINK_BOND, TypeParameters};

/// Proposes a fixed, caller-supplied list of candidates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplicitSelector {
    pub candidates: Vec<CrosslinkCandidate>,
    pub bond_types: Vec<(String, TypeParameters)>,
}

impl ExplicitSelector {
    pub fn new(candidates: Vec<CrosslinkCandidate>) -> Self {
        Self {
            candidates,
            bond_types: Vec::new(),
        }
    }

    /// Candidates from bare bead pairs, all tagged `"crosslink"`.
    pub fn from_pairs(pairs: &[(usize, usize)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|&(i, j)| CrosslinkCandidate::new(i, j, CROSSLINK_BOND))
                .collect(),
        )
    }

    pub fn with_bond_type(mut self, name: impl Into<String>, params: TypeParameters) -> Self {
        self.bond_types.push((name.into(), params));
        self
    }
}

impl CrosslinkSelector for ExplicitSelector {
    fn select_bonds(&mut self, _network: &Network) -> Result<Selection, Error> {
        Ok(Selection {
            candidates: self.candidates.clone(),
            bond_types: self.bond_types.clone(),
        })
    }
}
