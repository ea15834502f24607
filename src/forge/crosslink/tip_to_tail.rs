use super::{CrosslinkCandidate, CrosslinkSelector, Selection};
use crate::forge::error::Error;
use crate::forge::strands::StrandLayout;
use crate::model::network::Network;
use crate::model::types::POLYMER_BOND;

/// Chains consecutive strands into one long polymer by joining the last
/// bead of strand `s` to the first bead of strand `s + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct TipToTailSelector {
    pub beads_per_strand: usize,
    pub strand_count: usize,
    pub first_bead: usize,
    pub kind: String,
}

impl TipToTailSelector {
    pub fn new(beads_per_strand: usize, strand_count: usize) -> Self {
        Self {
            beads_per_strand,
            strand_count,
            first_bead: 0,
            kind: POLYMER_BOND.to_string(),
        }
    }

    /// Selector over the strands of one [`StrandLayout`].
    pub fn for_layout(layout: &StrandLayout) -> Self {
        Self::new(layout.beads_per_strand, layout.strand_count).starting_at(layout.first_bead)
    }

    pub fn starting_at(mut self, first_bead: usize) -> Self {
        self.first_bead = first_bead;
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }
}

impl CrosslinkSelector for TipToTailSelector {
    fn select_bonds(&mut self, _network: &Network) -> Result<Selection, Error> {
        if self.beads_per_strand == 0 {
            return Err(Error::invalid_parameter(
                "beads_per_strand",
                "tip-to-tail crosslinking needs at least one bead per strand",
            ));
        }

        let b = self.beads_per_strand;
        let first = self.first_bead;
        let candidates = (1..self.strand_count)
            .map(|s| {
                let tail = first + s * b - 1;
                let head = first + s * b;
                CrosslinkCandidate::new(tail, head, self.kind.clone())
            })
            .collect();

        Ok(Selection::new(candidates))
    }
}
