use super::spatial::SpatialGrid;
use super::{CrosslinkCandidate, CrosslinkSelector, Selection};
use crate::forge::distribution::rng_from_seed;
use crate::forge::error::Error;
use crate::forge::strands::StrandLayout;
use crate::model::network::Network;
use crate::model::types::TypeParameters;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Prefix of the bond types emitted by [`DensitySelector`].
pub const DENSITY_BOND_PREFIX: &str = "crosslink_";

/// Tuning of the radius-based crosslinker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityParameters {
    /// Largest bead separation that can be crosslinked.
    pub max_radius: f64,
    /// Upper bound on the number of proposed candidates.
    pub max_candidates: usize,
    /// Width of the distance bins that define crosslink bond types.
    pub bin_size: f64,
    pub spring_constant: f64,
}

impl DensityParameters {
    pub fn new(max_radius: f64, max_candidates: usize, bin_size: f64, spring_constant: f64) -> Self {
        Self {
            max_radius,
            max_candidates,
            bin_size,
            spring_constant,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless the radius and bin size are
    /// positive and finite and the spring constant is finite.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [("max_radius", self.max_radius), ("bin_size", self.bin_size)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::invalid_parameter(
                    name,
                    format!("must be positive and finite, got {}", value),
                ));
            }
        }
        if !self.spring_constant.is_finite() {
            return Err(Error::invalid_parameter(
                "spring_constant",
                format!("must be finite, got {}", self.spring_constant),
            ));
        }
        Ok(())
    }

    /// Distance bin of a separation `distance`.
    #[inline]
    pub fn bin_of(&self, distance: f64) -> usize {
        (distance / self.bin_size).floor() as usize
    }

    /// Rest length registered for bin `bin`: the bin center, capped at `max_radius`.
    #[inline]
    pub fn rest_length(&self, bin: usize) -> f64 {
        ((bin as f64 + 0.5) * self.bin_size).min(self.max_radius)
    }
}

/// Bond type name for distance bin `bin`.
pub fn density_bond_type(bin: usize) -> String {
    format!("{}{}", DENSITY_BOND_PREFIX, bin)
}

/// Proposes crosslinks between nearby beads of different strands.
///
/// Strands are the consecutive equal-length runs of a [`StrandLayout`].
/// [`DensitySelector::new`] assumes they start at bead 0 and run to the end of
/// the network; [`DensitySelector::for_layout`] restricts the search to the
/// strands of one generation pass. Beads outside the layout are never
/// proposed. Every pair within `max_radius` is a candidate; the candidates
/// are shuffled with the selector's own random source and truncated to
/// `max_candidates`. Each candidate is typed by its distance bin.
#[derive(Debug, Clone)]
pub struct DensitySelector {
    params: DensityParameters,
    layout: StrandLayout,
    rng: StdRng,
}

impl DensitySelector {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for invalid [`DensityParameters`]
    /// or a zero strand length.
    pub fn new(
        params: DensityParameters,
        beads_per_strand: usize,
        seed: Option<u64>,
    ) -> Result<Self, Error> {
        params.validate()?;
        if beads_per_strand == 0 {
            return Err(Error::invalid_parameter(
                "beads_per_strand",
                "must be at least 1",
            ));
        }
        Ok(Self {
            params,
            layout: StrandLayout {
                first_bead: 0,
                beads_per_strand,
                strand_count: usize::MAX,
            },
            rng: rng_from_seed(seed),
        })
    }

    /// Selector over the strands of one [`StrandLayout`].
    ///
    /// # Errors
    ///
    /// Same as [`DensitySelector::new`].
    pub fn for_layout(
        params: DensityParameters,
        layout: &StrandLayout,
        seed: Option<u64>,
    ) -> Result<Self, Error> {
        let mut selector = Self::new(params, layout.beads_per_strand, seed)?;
        selector.layout = *layout;
        Ok(selector)
    }
}

impl CrosslinkSelector for DensitySelector {
    fn select_bonds(&mut self, network: &Network) -> Result<Selection, Error> {
        let params = self.params;
        let layout = self.layout;

        let positions: Vec<[f64; 2]> = network.beads.iter().map(|bead| [bead.x(), bead.y()]).collect();
        let grid = SpatialGrid::from_positions(&positions, params.max_radius);

        let mut pairs: Vec<(usize, usize, usize)> = grid
            .pairs_within(&positions, params.max_radius)
            .into_iter()
            .filter(|&(i, j, _)| match (layout.strand_of(i), layout.strand_of(j)) {
                (Some(si), Some(sj)) => si != sj,
                _ => false,
            })
            .map(|(i, j, distance)| (i, j, params.bin_of(distance)))
            .collect();
        let in_range = pairs.len();

        pairs.shuffle(&mut self.rng);
        pairs.truncate(params.max_candidates);

        let bins: BTreeSet<usize> = pairs.iter().map(|&(_, _, bin)| bin).collect();
        let bond_types = bins
            .into_iter()
            .map(|bin| {
                (
                    density_bond_type(bin),
                    TypeParameters::new(params.spring_constant, params.rest_length(bin)),
                )
            })
            .collect();

        let candidates: Vec<CrosslinkCandidate> = pairs
            .into_iter()
            .map(|(i, j, bin)| CrosslinkCandidate::new(i, j, density_bond_type(bin)))
            .collect();

        debug!(
            in_range,
            proposed = candidates.len(),
            max_radius = params.max_radius,
            "selected density crosslink candidates"
        );

        Ok(Selection {
            candidates,
            bond_types,
        })
    }
}
