//! Batched placement of straight polymer strands.

use super::distribution::PlacementDistribution;
use super::error::Error;
use crate::model::bead::Bead;
use crate::model::network::{Angle, Bond, Network};
use crate::model::types::{BeadType, POLYMER_BEND, POLYMER_BOND};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Geometry shared by every strand of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrandParameters {
    pub beads_per_strand: usize,
    pub strand_count: usize,
    pub contour_length: f64,
}

impl StrandParameters {
    pub fn new(beads_per_strand: usize, strand_count: usize, contour_length: f64) -> Self {
        Self {
            beads_per_strand,
            strand_count,
            contour_length,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a strand would have fewer than
    /// two beads or the contour length is not positive and finite.
    pub fn validate(&self) -> Result<(), Error> {
        if self.beads_per_strand < 2 {
            return Err(Error::invalid_parameter(
                "beads_per_strand",
                format!("must be at least 2, got {}", self.beads_per_strand),
            ));
        }
        if !self.contour_length.is_finite() || self.contour_length <= 0.0 {
            return Err(Error::invalid_parameter(
                "contour_length",
                format!("must be positive and finite, got {}", self.contour_length),
            ));
        }
        Ok(())
    }

    /// Distance between consecutive beads of a strand.
    #[inline]
    pub fn bond_length(&self) -> f64 {
        self.contour_length / (self.beads_per_strand - 1) as f64
    }

    /// Index of the bead placed exactly at the strand anchor.
    #[inline]
    pub fn middle_index(&self) -> usize {
        self.beads_per_strand / 2
    }

    #[inline]
    pub fn bead_count(&self) -> usize {
        self.strand_count * self.beads_per_strand
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.strand_count * self.beads_per_strand.saturating_sub(1)
    }

    #[inline]
    pub fn angle_count(&self) -> usize {
        self.strand_count * self.beads_per_strand.saturating_sub(2)
    }
}

/// Ids of the first bead of each strand appended by one [`StrandGenerator::build_strands`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrandLayout {
    pub first_bead: usize,
    pub beads_per_strand: usize,
    pub strand_count: usize,
}

impl StrandLayout {
    /// Id of bead `k` of strand `s`.
    #[inline]
    pub fn bead(&self, strand: usize, k: usize) -> usize {
        self.first_bead + strand * self.beads_per_strand + k
    }

    /// Strand index of a bead id that belongs to this layout.
    #[inline]
    pub fn strand_of(&self, bead: usize) -> Option<usize> {
        let rel = bead.checked_sub(self.first_bead)?;
        let strand = rel / self.beads_per_strand;
        (strand < self.strand_count).then_some(strand)
    }
}

/// Lays out many straight strands at once from a placement distribution.
#[derive(Debug)]
pub struct StrandGenerator<D> {
    distribution: D,
}

impl<D: PlacementDistribution> StrandGenerator<D> {
    pub fn new(distribution: D) -> Self {
        Self { distribution }
    }

    /// Appends `strand_count` strands to `network`.
    ///
    /// Anchors and angles for all strands are drawn in three batched calls,
    /// in the order x, y, angle. Bead `k` of a strand sits at
    /// `anchor + (middle − k) · spacing · (cos θ, sin θ)`, so the middle bead
    /// lies exactly on the anchor. Consecutive beads are joined by
    /// `"polymer"` bonds and every consecutive triple by a `"polymer_bend"`
    /// angle. Ids continue after the beads already in the network.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for invalid strand parameters or
    /// a distribution that cannot supply `strand_count` samples. The network
    /// is untouched on error.
    pub fn build_strands(
        &mut self,
        network: &mut Network,
        params: &StrandParameters,
    ) -> Result<StrandLayout, Error> {
        params.validate()?;

        let n = params.strand_count;
        let anchor_x = self.distribution.sample_x(n)?;
        let anchor_y = self.distribution.sample_y(n)?;
        let angles = self.distribution.sample_angle(n)?;

        let b = params.beads_per_strand;
        let spacing = params.bond_length();
        let middle = params.middle_index() as f64;
        let first_bead = network.bead_count();

        let directions: Vec<(f64, f64)> = angles
            .iter()
            .map(|angle| {
                let (sin, cos) = angle.sin_cos();
                (spacing * cos, spacing * sin)
            })
            .collect();

        let beads = anchor_x
            .iter()
            .zip(&anchor_y)
            .zip(&directions)
            .flat_map(|((&ax, &ay), &(vx, vy))| {
                (0..b).map(move |k| {
                    let offset = middle - k as f64;
                    Bead::new(vec![ax + offset * vx, ay + offset * vy], BeadType::Free)
                })
            });

        let bonds = (0..n).flat_map(|s| {
            let base = first_bead + s * b;
            (0..b - 1).map(move |k| Bond::new(base + k, base + k + 1, POLYMER_BOND))
        });

        let angle_constraints = (0..n).flat_map(|s| {
            let base = first_bead + s * b;
            (0..b.saturating_sub(2))
                .map(move |k| Angle::new(base + k, base + k + 1, base + k + 2, POLYMER_BEND))
        });

        network.beads.reserve(params.bead_count());
        network.beads.extend(beads);
        network.bonds.reserve(params.bond_count());
        network.bonds.extend(bonds);
        network.angles.reserve(params.angle_count());
        network.angles.extend(angle_constraints);

        debug!(
            strands = n,
            beads_per_strand = b,
            spacing,
            first_bead,
            "placed strands"
        );

        Ok(StrandLayout {
            first_bead,
            beads_per_strand: b,
            strand_count: n,
        })
    }

    /// Tags beads outside the domain as boundary beads according to the
    /// network's boundary-fixing configuration.
    ///
    /// Returns the number of boundary beads.
    pub fn fix_boundaries(&self, network: &mut Network) -> usize {
        let pinned = network.fix_boundaries();
        debug!(pinned, "tagged boundary beads");
        pinned
    }
}
