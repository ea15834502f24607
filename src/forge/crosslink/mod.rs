//! Crosslink selection and conflict-free distribution.
//!
//! Every crosslinking strategy is a [`CrosslinkSelector`]: it proposes an
//! ordered list of candidate bonds and leaves the acceptance decision to the
//! shared [`distribute`] scan. The scan is a greedy matching: earlier
//! candidates win, and no bead ends up in more than one new crosslink.
//!
//! # Overview
//!
//! - [`TipToTailSelector`] — Joins the last bead of each strand to the first bead of the next
//! - [`DensitySelector`] — Proposes inter-strand pairs within a maximum radius
//! - [`ExplicitSelector`] — Proposes a caller-supplied candidate list verbatim
//! - [`CrosslinkPolicy`] — Tagged enumeration of the above plus custom selectors

mod density;
mod explicit;
mod spatial;
mod tip_to_tail;

pub use density::{DENSITY_BOND_PREFIX, DensityParameters, DensitySelector, density_bond_type};
pub use explicit::ExplicitSelector;
pub use tip_to_tail::TipToTailSelector;

use super::error::Error;
use crate::model::network::{Bond, Network, sorted_pair};
use crate::model::types::TypeParameters;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// A proposed crosslink bond. Only accepted candidates become bonds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrosslinkCandidate {
    pub i: usize,
    pub j: usize,
    pub kind: String,
}

impl CrosslinkCandidate {
    pub fn new(i: usize, j: usize, kind: impl Into<String>) -> Self {
        Self {
            i,
            j,
            kind: kind.into(),
        }
    }
}

/// Output of [`CrosslinkSelector::select_bonds`].
///
/// `bond_types` lists the physical parameters of any bond type the
/// candidates introduce; they are registered on the network together with
/// the accepted bonds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub candidates: Vec<CrosslinkCandidate>,
    pub bond_types: Vec<(String, TypeParameters)>,
}

impl Selection {
    pub fn new(candidates: Vec<CrosslinkCandidate>) -> Self {
        Self {
            candidates,
            bond_types: Vec::new(),
        }
    }

    pub fn with_bond_type(mut self, name: impl Into<String>, params: TypeParameters) -> Self {
        self.bond_types.push((name.into(), params));
        self
    }
}

/// Outcome of one distribution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrosslinkReport {
    pub proposed: usize,
    pub accepted: usize,
}

/// A crosslinking strategy.
pub trait CrosslinkSelector {
    /// Proposes candidate bonds in priority order.
    ///
    /// Implementations only read the network; everything they want added
    /// goes into the returned [`Selection`].
    fn select_bonds(&mut self, network: &Network) -> Result<Selection, Error>;

    /// Selects candidates and commits the conflict-free subset to `network`.
    fn distribute_crosslinkers(&mut self, network: &mut Network) -> Result<CrosslinkReport, Error> {
        let selection = self.select_bonds(network)?;
        distribute(network, selection)
    }
}

/// Resolves a selection into a matching and appends it to `network`.
///
/// Candidates are scanned strictly left to right. A candidate is skipped if
/// its unordered pair was already accepted, if either endpoint already
/// carries a crosslink from this pass, or if both endpoints are the same
/// bead. Accepted bonds keep the endpoint order given by the selector.
///
/// # Errors
///
/// Returns [`Error::InvalidCrosslinkCandidate`] if any candidate references a
/// bead outside the network. Nothing is committed in that case.
pub fn distribute(network: &mut Network, selection: Selection) -> Result<CrosslinkReport, Error> {
    let bead_count = network.bead_count();
    if let Some(bad) = selection
        .candidates
        .iter()
        .find(|c| c.i >= bead_count || c.j >= bead_count)
    {
        return Err(Error::invalid_crosslink_candidate(bad.i, bad.j, bead_count));
    }

    let proposed = selection.candidates.len();
    let accepted = select_matching(selection.candidates);

    for (name, params) in selection.bond_types {
        if let Some(previous) = network.bond_type_parameters.insert(name.clone(), params) {
            if previous != params {
                warn!(
                    bond_type = %name,
                    %previous,
                    replacement = %params,
                    "crosslink selector replaced bond type parameters"
                );
            }
        }
    }

    let report = CrosslinkReport {
        proposed,
        accepted: accepted.len(),
    };
    network.bonds.extend(accepted);

    debug!(
        proposed = report.proposed,
        accepted = report.accepted,
        "distributed crosslinks"
    );
    Ok(report)
}

fn select_matching(candidates: Vec<CrosslinkCandidate>) -> Vec<Bond> {
    let mut accepted_pairs: HashSet<(usize, usize)> = HashSet::new();
    let mut used_beads: HashSet<usize> = HashSet::new();
    let mut accepted = Vec::new();

    for candidate in candidates {
        let key = sorted_pair(candidate.i, candidate.j);
        if candidate.i == candidate.j
            || accepted_pairs.contains(&key)
            || used_beads.contains(&candidate.i)
            || used_beads.contains(&candidate.j)
        {
            continue;
        }

        accepted_pairs.insert(key);
        used_beads.insert(candidate.i);
        used_beads.insert(candidate.j);
        accepted.push(Bond::new(candidate.i, candidate.j, candidate.kind));
    }

    accepted
}

/// The known crosslinking strategies plus an open-ended custom one.
pub enum CrosslinkPolicy {
    TipToTail(TipToTailSelector),
    Density(DensitySelector),
    Explicit(ExplicitSelector),
    Custom(Box<dyn CrosslinkSelector>),
}

impl CrosslinkPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            CrosslinkPolicy::TipToTail(_) => "tip-to-tail",
            CrosslinkPolicy::Density(_) => "density",
            CrosslinkPolicy::Explicit(_) => "explicit",
            CrosslinkPolicy::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for CrosslinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrosslinkPolicy::TipToTail(s) => f.debug_tuple("TipToTail").field(s).finish(),
            CrosslinkPolicy::Density(s) => f.debug_tuple("Density").field(s).finish(),
            CrosslinkPolicy::Explicit(s) => f.debug_tuple("Explicit").field(s).finish(),
            CrosslinkPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl CrosslinkSelector for CrosslinkPolicy {
    fn select_bonds(&mut self, network: &Network) -> Result<Selection, Error> {
        match self {
            CrosslinkPolicy::TipToTail(s) => s.select_bonds(network),
            CrosslinkPolicy::Density(s) => s.select_bonds(network),
            CrosslinkPolicy::Explicit(s) => s.select_bonds(network),
            CrosslinkPolicy::Custom(s) => s.select_bonds(network),
        }
    }
}

impl From<TipToTailSelector> for CrosslinkPolicy {
    fn from(s: TipToTailSelector) -> Self {
        CrosslinkPolicy::TipToTail(s)
    }
}

impl From<DensitySelector> for CrosslinkPolicy {
    fn from(s: DensitySelector) -> Self {
        CrosslinkPolicy::Density(s)
    }
}

impl From<ExplicitSelector> for CrosslinkPolicy {
    fn from(s: ExplicitSelector) -> Self {
        CrosslinkPolicy::Explicit(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::domain::Domain;
    use crate::model::types::BeadType;

    fn network_with_beads(n: usize) -> Network {
        let mut net = Network::new(Domain::new(10.0, 10.0));
        for k in 0..n {
            net.add_bead(vec![k as f64, 0.0], BeadType::Free);
        }
        net
    }

    fn selection(pairs: &[(usize, usize)]) -> Selection {
        Selection::new(
            pairs
                .iter()
                .map(|&(i, j)| CrosslinkCandidate::new(i, j, "x"))
                .collect(),
        )
    }

    fn assert_is_matching(bonds: &[Bond]) {
        let mut seen = HashSet::new();
        for bond in bonds {
            assert!(seen.insert(bond.i), "bead {} used twice", bond.i);
            assert!(seen.insert(bond.j), "bead {} used twice", bond.j);
        }
    }

    #[test]
    fn earlier_candidate_wins_shared_bead() {
        let mut net = network_with_beads(3);
        let report = distribute(&mut net, selection(&[(0, 1), (1, 2)])).unwrap();
        assert_eq!(report, CrosslinkReport { proposed: 2, accepted: 1 });
        assert_eq!(net.bonds, vec![Bond::new(0, 1, "x")]);
    }

    #[test]
    fn order_changes_the_result() {
        let mut net = network_with_beads(3);
        distribute(&mut net, selection(&[(1, 2), (0, 1)])).unwrap();
        assert_eq!(net.bonds, vec![Bond::new(1, 2, "x")]);
    }

    #[test]
    fn duplicate_and_reversed_pairs_are_dropped() {
        let mut net = network_with_beads(6);
        distribute(
            &mut net,
            selection(&[(0, 1), (1, 0), (0, 1), (2, 3), (3, 2), (4, 5)]),
        )
        .unwrap();
        assert_eq!(
            net.bonds,
            vec![Bond::new(0, 1, "x"), Bond::new(2, 3, "x"), Bond::new(4, 5, "x")]
        );
    }

    #[test]
    fn self_pairs_are_skipped() {
        let mut net = network_with_beads(3);
        let report = distribute(&mut net, selection(&[(1, 1), (1, 2)])).unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(net.bonds, vec![Bond::new(1, 2, "x")]);
    }

    #[test]
    fn result_is_a_matching_for_dense_conflicts() {
        let mut net = network_with_beads(12);
        let pairs: Vec<(usize, usize)> = (0..12)
            .flat_map(|i| (0..12).map(move |j| (i, (i * 5 + j * 7) % 12)))
            .collect();
        distribute(&mut net, selection(&pairs)).unwrap();

        assert!(!net.bonds.is_empty());
        assert_is_matching(&net.bonds);
        let keys: HashSet<_> = net.bonds.iter().map(Bond::key).collect();
        assert_eq!(keys.len(), net.bonds.len());
    }

    #[test]
    fn existing_bonds_do_not_block_crosslinks() {
        let mut net = network_with_beads(3);
        net.add_bond(0, 1, "polymer").unwrap();
        distribute(&mut net, selection(&[(0, 1)])).unwrap();
        assert_eq!(net.bond_count(), 2);
    }

    #[test]
    fn out_of_range_candidate_aborts_without_commit() {
        let mut net = network_with_beads(3);
        let sel = selection(&[(0, 1), (2, 7)]).with_bond_type("x", TypeParameters::new(1.0, 1.0));
        let result = distribute(&mut net, sel);
        assert!(matches!(
            result,
            Err(Error::InvalidCrosslinkCandidate {
                i: 2,
                j: 7,
                bead_count: 3
            })
        ));
        assert!(net.bonds.is_empty());
        assert!(net.bond_type_parameters.is_empty());
    }

    #[test]
    fn bond_types_are_registered() {
        let mut net = network_with_beads(2);
        let sel = selection(&[(0, 1)]).with_bond_type("x", TypeParameters::new(2.0, 0.5));
        distribute(&mut net, sel).unwrap();
        assert_eq!(net.bond_type_parameters["x"], TypeParameters::new(2.0, 0.5));
    }

    struct Reversed(Vec<(usize, usize)>);

    impl CrosslinkSelector for Reversed {
        fn select_bonds(&mut self, _network: &Network) -> Result<Selection, Error> {
            Ok(selection(&self.0.iter().rev().copied().collect::<Vec<_>>()))
        }
    }

    #[test]
    fn custom_policy_uses_shared_scan() {
        let mut net = network_with_beads(3);
        let mut policy = CrosslinkPolicy::Custom(Box::new(Reversed(vec![(0, 1), (1, 2)])));
        assert_eq!(policy.name(), "custom");

        let report = policy.distribute_crosslinkers(&mut net).unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(net.bonds, vec![Bond::new(1, 2, "x")]);
    }
}
