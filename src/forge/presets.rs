//! Ready-made network recipes.
//!
//! Each preset wires a [`NetworkType`] for a commonly used configuration and
//! runs it once.

use super::crosslink::{
    CrosslinkCandidate, CrosslinkSelector, DensityParameters, DensitySelector, ExplicitSelector,
    TipToTailSelector,
};
use super::distribution::{DeterministicDistribution, DirectionalDistribution, UniformDistribution};
use super::error::Error;
use super::network_type::NetworkType;
use super::strands::StrandParameters;
use crate::model::domain::Domain;
use crate::model::network::Network;
use crate::model::types::CROSSLINK_BOND;

/// Isotropic network: uniformly placed strands joined by density crosslinks.
pub fn random_network(
    domain: Domain,
    strands: StrandParameters,
    crosslink: DensityParameters,
    seed: Option<u64>,
) -> Result<Network, Error> {
    let distribution = UniformDistribution::new(domain.size_x, domain.size_y, seed)?;
    let crosslinker = DensitySelector::new(crosslink, strands.beads_per_strand, seed)?;
    NetworkType::new(domain, distribution, strands, Some(crosslinker.into())).generate()
}

/// Anisotropic network: strand orientations follow a von Mises distribution
/// around `mean_angle` with the given `concentration`.
pub fn directed_network(
    domain: Domain,
    strands: StrandParameters,
    mean_angle: f64,
    concentration: f64,
    crosslink: DensityParameters,
    seed: Option<u64>,
) -> Result<Network, Error> {
    let distribution = DirectionalDistribution::new(
        domain.size_x,
        domain.size_y,
        mean_angle,
        concentration,
        seed,
    )?;
    let crosslinker = DensitySelector::new(crosslink, strands.beads_per_strand, seed)?;
    NetworkType::new(domain, distribution, strands, Some(crosslinker.into())).generate()
}

/// One straight strand whose first bead sits at `start`.
///
/// Bead `k` lies `k` bond lengths from `start` in the direction opposite to
/// `angle`. The domain pins beads on every side.
pub fn single_strand(
    size_x: f64,
    size_y: f64,
    start: [f64; 2],
    angle: f64,
    beads_per_strand: usize,
    contour_length: f64,
) -> Result<Network, Error> {
    let strands = StrandParameters::new(beads_per_strand, 1, contour_length);
    strands.validate()?;

    let reach = strands.middle_index() as f64 * strands.bond_length();
    let (sin, cos) = angle.sin_cos();
    let anchor_x = start[0] - cos * reach;
    let anchor_y = start[1] - sin * reach;

    let distribution = DeterministicDistribution::new(vec![anchor_x], vec![anchor_y], vec![angle])?;
    let domain = Domain::new(size_x, size_y).with_fixed_boundary(true);
    NetworkType::new(domain, distribution, strands, None).generate()
}

/// Zig-zag spring of `strand_count` strands joined tip to tail.
///
/// Strands alternate between a rising and a falling orientation; anchors
/// are spread along `y = 100` starting at `x = 100`. `strand_count` must be
/// odd and at least 3.
pub fn single_spring(
    size_x: f64,
    size_y: f64,
    strand_count: usize,
    beads_per_strand: usize,
    contour_length: f64,
) -> Result<Network, Error> {
    if strand_count < 3 || strand_count % 2 == 0 {
        return Err(Error::invalid_parameter(
            "strand_count",
            format!("must be odd and at least 3, got {}", strand_count),
        ));
    }
    let half = ((strand_count - 1) / 2) as f64;
    let rise_sq = contour_length.powi(2) - (1.0 / half).powi(2);
    if !rise_sq.is_finite() || rise_sq < 0.0 {
        return Err(Error::invalid_parameter(
            "contour_length",
            format!("too short for a spring of {} strands", strand_count),
        ));
    }

    let angle_up = (rise_sq.sqrt() * 2.0 * half).atan();
    let angle_down = -angle_up;

    let x: Vec<f64> = (0..strand_count)
        .map(|k| 100.0 + 100.0 * k as f64 / (2.0 * half))
        .collect();
    let y = vec![100.0; strand_count];
    let angles: Vec<f64> = (0..strand_count)
        .map(|k| if k % 2 == 0 { angle_up } else { angle_down })
        .collect();

    let strands = StrandParameters::new(beads_per_strand, strand_count, contour_length);
    let distribution = DeterministicDistribution::new(x, y, angles)?;
    let domain = Domain::new(size_x, size_y).with_fixed_boundary(true);
    let crosslinker = TipToTailSelector::new(beads_per_strand, strand_count);

    NetworkType::new(domain, distribution, strands, Some(crosslinker.into())).generate()
}

/// Two parallel four-bead strands with bond length `r0`, one unit apart,
/// joined by a single `"crosslink"` bond between bead 1 and bead 5.
pub fn two_crosslinked_strands(r0: f64) -> Result<Network, Error> {
    const BEADS: usize = 4;
    let contour_length = (BEADS - 1) as f64 * r0;

    let upper = single_strand(10.0, 10.0, [5.0, 5.0], 0.0, BEADS, contour_length)?;
    let lower = single_strand(10.0, 10.0, [5.0, 4.0], 0.0, BEADS, contour_length)?;
    let mut network = Network::merge(&upper, &lower)?;

    ExplicitSelector::new(vec![CrosslinkCandidate::new(1, 5, CROSSLINK_BOND)])
        .distribute_crosslinkers(&mut network)?;

    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::crosslink::DENSITY_BOND_PREFIX;
    use crate::model::network::Bond;
    use crate::model::types::{BeadType, POLYMER_BOND};
    use std::collections::HashSet;
    use std::f64::consts::PI;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn default_density() -> DensityParameters {
        DensityParameters::new(1.0, 50, 1.0 / 3.0, 1.0)
    }

    #[test]
    fn random_network_counts_and_crosslink_types() {
        let net = random_network(
            Domain::new(200.0, 200.0),
            StrandParameters::new(9, 100, 50.0),
            default_density(),
            Some(10),
        )
        .unwrap();

        assert_eq!(net.bead_count(), 900);
        assert_eq!(net.count_bonds_of_type(POLYMER_BOND), 800);
        assert_eq!(net.angle_count(), 700);

        let crosslinks = net.bond_count() - 800;
        assert!(crosslinks <= 50);
        for (name, params) in &net.bond_type_parameters {
            assert!(name.starts_with(DENSITY_BOND_PREFIX));
            assert!(params.rest_length <= 1.0);
        }
    }

    #[test]
    fn random_network_is_reproducible() {
        let build = || {
            random_network(
                Domain::new(100.0, 100.0),
                StrandParameters::new(6, 60, 20.0),
                default_density(),
                Some(21),
            )
            .unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn directed_network_concentrates_orientations() {
        let net = directed_network(
            Domain::new(200.0, 200.0),
            StrandParameters::new(5, 200, 8.0),
            0.0,
            50.0,
            default_density(),
            Some(2),
        )
        .unwrap();

        // bead 0 minus the last bead points along the strand angle
        let mut aligned = 0;
        for s in 0..200 {
            let head = &net.beads[s * 5];
            let tail = &net.beads[s * 5 + 4];
            let (dx, dy) = (head.x() - tail.x(), head.y() - tail.y());
            if dy.atan2(dx).abs() < 0.5 {
                aligned += 1;
            }
        }
        assert!(aligned > 180, "only {} of 200 strands aligned", aligned);
    }

    #[test]
    fn single_strand_starts_at_given_point() {
        let net = single_strand(200.0, 200.0, [50.0, 50.0], PI, 9, 8.0).unwrap();

        assert_eq!(net.bead_count(), 9);
        assert_eq!(net.bond_count(), 8);
        assert_eq!(net.angle_count(), 7);
        for (i, bead) in net.beads.iter().enumerate() {
            assert!(approx_eq(bead.x(), 50.0 + i as f64, 1e-12));
            assert!(approx_eq(bead.y(), 50.0, 1e-12));
            assert_eq!(bead.kind, BeadType::Free);
        }
    }

    #[test]
    fn single_strand_pins_beads_outside_domain() {
        let net = single_strand(10.0, 10.0, [8.0, 5.0], PI, 5, 8.0).unwrap();
        // beads at x = 8, 10, 12, 14, 16
        assert_eq!(net.count_beads_of_type(&BeadType::Boundary), 3);
    }

    #[test]
    fn single_spring_is_one_connected_chain() {
        let net = single_spring(400.0, 400.0, 5, 4, 3.0).unwrap();

        assert_eq!(net.bead_count(), 20);
        assert_eq!(net.count_bonds_of_type(POLYMER_BOND), 5 * 3 + 4);
        let joins: HashSet<_> = net.bonds[15..].iter().map(Bond::key).collect();
        let expected: HashSet<_> = [(3, 4), (7, 8), (11, 12), (15, 16)].into_iter().collect();
        assert_eq!(joins, expected);
    }

    #[test]
    fn single_spring_rejects_even_strand_count() {
        assert!(matches!(
            single_spring(400.0, 400.0, 4, 4, 3.0),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(single_spring(400.0, 400.0, 1, 4, 3.0).is_err());
    }

    #[test]
    fn two_crosslinked_strands_layout() {
        let net = two_crosslinked_strands(1.0).unwrap();

        assert_eq!(net.bead_count(), 8);
        assert_eq!(net.count_bonds_of_type(POLYMER_BOND), 6);
        assert_eq!(net.bonds.last(), Some(&Bond::new(1, 5, CROSSLINK_BOND)));
        assert!(approx_eq(net.beads[0].x(), 5.0, 1e-12));
        assert!(approx_eq(net.beads[0].y(), 5.0, 1e-12));
        assert!(approx_eq(net.beads[4].y(), 4.0, 1e-12));
        assert!(approx_eq(net.beads[5].x(), net.beads[1].x(), 1e-12));
    }
}
