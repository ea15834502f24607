use super::bead::Bead;
use super::domain::Domain;
use super::types::{BeadType, TypeCategory, TypeParameters};
use crate::forge::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub kind: String,
}

impl Bond {
    /// Creates a bond; the endpoint order is stored as given.
    pub fn new(i: usize, j: usize, kind: impl Into<String>) -> Self {
        Self {
            i,
            j,
            kind: kind.into(),
        }
    }

    /// Order-independent identity of the bead pair.
    #[inline]
    pub fn key(&self) -> (usize, usize) {
        sorted_pair(self.i, self.j)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Angle {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub kind: String,
}

impl Angle {
    pub fn new(i: usize, j: usize, k: usize, kind: impl Into<String>) -> Self {
        Self {
            i,
            j,
            k,
            kind: kind.into(),
        }
    }
}

#[inline]
pub(crate) fn sorted_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// How [`Network::merge_with`] decides that two parameter records disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Any difference in spring constant or rest length is a conflict.
    #[default]
    AnyMismatch,
    /// Only a difference in both fields is a conflict; otherwise the first
    /// network's record is kept.
    BothMismatch,
}

impl ConflictPolicy {
    fn conflicts(&self, first: &TypeParameters, second: &TypeParameters) -> bool {
        let k_differs = first.spring_constant != second.spring_constant;
        let r_differs = first.rest_length != second.rest_length;
        match self {
            ConflictPolicy::AnyMismatch => k_differs || r_differs,
            ConflictPolicy::BothMismatch => k_differs && r_differs,
        }
    }
}

/// Bead/bond/angle graph of a fibrous network.
///
/// Beads are addressed by their index, which is assigned in insertion order
/// and never reused. Bonds and angles refer to beads only through these
/// indices, so a network can be offset and concatenated without rewriting
/// anything but the index tuples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub domain: Domain,
    pub beads: Vec<Bead>,
    pub bonds: Vec<Bond>,
    pub angles: Vec<Angle>,
    #[serde(default)]
    pub bond_type_parameters: BTreeMap<String, TypeParameters>,
    #[serde(default)]
    pub angle_type_parameters: BTreeMap<String, TypeParameters>,
}

impl Network {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            beads: Vec::new(),
            bonds: Vec::new(),
            angles: Vec::new(),
            bond_type_parameters: BTreeMap::new(),
            angle_type_parameters: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn bead_count(&self) -> usize {
        self.beads.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn angle_count(&self) -> usize {
        self.angles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.beads.is_empty()
    }

    /// Appends a bead and returns its id.
    pub fn add_bead(&mut self, position: impl Into<Vec<f64>>, kind: BeadType) -> usize {
        self.beads.push(Bead::new(position, kind));
        self.beads.len() - 1
    }

    /// Appends a bond between two existing beads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if either id is not a bead of this network.
    pub fn add_bond(&mut self, i: usize, j: usize, kind: impl Into<String>) -> Result<(), Error> {
        self.check_ids(&[i, j], "bond")?;
        self.bonds.push(Bond::new(i, j, kind));
        Ok(())
    }

    /// Appends an angle constraint over three existing beads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any id is not a bead of this network.
    pub fn add_angle(
        &mut self,
        i: usize,
        j: usize,
        k: usize,
        kind: impl Into<String>,
    ) -> Result<(), Error> {
        self.check_ids(&[i, j, k], "angle")?;
        self.angles.push(Angle::new(i, j, k, kind));
        Ok(())
    }

    fn check_ids(&self, ids: &[usize], what: &'static str) -> Result<(), Error> {
        let n = self.beads.len();
        match ids.iter().find(|&&id| id >= n) {
            Some(id) => Err(Error::invalid_parameter(
                what,
                format!("bead id {} out of range (bead count = {})", id, n),
            )),
            None => Ok(()),
        }
    }

    /// Checks that every bond and angle references an existing bead.
    ///
    /// Networks built through [`add_bond`](Self::add_bond) and
    /// [`add_angle`](Self::add_angle) always pass; networks read from disk
    /// or assembled field by field may not.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the first dangling reference.
    pub fn validate(&self) -> Result<(), Error> {
        for bond in &self.bonds {
            self.check_ids(&[bond.i, bond.j], "bond")?;
        }
        for angle in &self.angles {
            self.check_ids(&[angle.i, angle.j, angle.k], "angle")?;
        }
        Ok(())
    }

    /// Number of bonds carrying the given type tag.
    pub fn count_bonds_of_type(&self, kind: &str) -> usize {
        self.bonds.iter().filter(|b| b.kind == kind).count()
    }

    /// Number of beads with the given kind.
    pub fn count_beads_of_type(&self, kind: &BeadType) -> usize {
        self.beads.iter().filter(|b| &b.kind == kind).count()
    }

    /// Re-tags free and boundary beads according to the domain's
    /// boundary-fixing configuration. Custom bead kinds are left as they are.
    ///
    /// Returns the number of beads tagged as boundary afterwards.
    pub fn fix_boundaries(&mut self) -> usize {
        let domain = self.domain;
        let mut pinned = 0;
        for bead in self.beads.iter_mut().filter(|b| b.kind.is_boundary_managed()) {
            if domain.is_fixed_position(bead.x(), bead.y()) {
                bead.kind = BeadType::Boundary;
                pinned += 1;
            } else {
                bead.kind = BeadType::Free;
            }
        }
        pinned
    }

    /// Rigidly rotates all beads by `angle` radians (counter-clockwise)
    /// about the domain center.
    ///
    /// Only the first two coordinates are rotated; further coordinates and
    /// all topology are untouched.
    pub fn rotate(&mut self, angle: f64) {
        let [cx, cy] = self.domain.center();
        let (sin, cos) = angle.sin_cos();

        for bead in &mut self.beads {
            if bead.position.len() < 2 {
                continue;
            }
            let dx = bead.position[0] - cx;
            let dy = bead.position[1] - cy;
            bead.position[0] = cx + cos * dx - sin * dy;
            bead.position[1] = cy + sin * dx + cos * dy;
        }
    }

    /// Disjoint union of two networks, rejecting any disagreement in shared
    /// type parameters. See [`merge_with`](Self::merge_with).
    pub fn merge(a: &Network, b: &Network) -> Result<Network, Error> {
        Self::merge_with(a, b, ConflictPolicy::default())
    }

    /// Disjoint union of two networks.
    ///
    /// The result is bound to `a`'s domain. `a`'s beads, bonds and angles are
    /// copied unchanged; `b`'s beads follow, and every bead reference in
    /// `b`'s bonds and angles is shifted by `a.bead_count()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if either input has a dangling
    /// bead reference, and [`Error::ConflictingTypeParameters`] if a type tag
    /// has parameters in both networks that conflict under `policy`.
    pub fn merge_with(a: &Network, b: &Network, policy: ConflictPolicy) -> Result<Network, Error> {
        a.validate()?;
        b.validate()?;

        let bond_type_parameters = merge_parameters(
            &a.bond_type_parameters,
            &b.bond_type_parameters,
            TypeCategory::Bond,
            policy,
        )?;
        let angle_type_parameters = merge_parameters(
            &a.angle_type_parameters,
            &b.angle_type_parameters,
            TypeCategory::Angle,
            policy,
        )?;

        let offset = a.beads.len();

        let mut beads = Vec::with_capacity(a.beads.len() + b.beads.len());
        beads.extend_from_slice(&a.beads);
        beads.extend_from_slice(&b.beads);

        let mut bonds = Vec::with_capacity(a.bonds.len() + b.bonds.len());
        bonds.extend_from_slice(&a.bonds);
        bonds.extend(
            b.bonds
                .iter()
                .map(|bond| Bond::new(bond.i + offset, bond.j + offset, bond.kind.clone())),
        );

        let mut angles = Vec::with_capacity(a.angles.len() + b.angles.len());
        angles.extend_from_slice(&a.angles);
        angles.extend(b.angles.iter().map(|angle| {
            Angle::new(
                angle.i + offset,
                angle.j + offset,
                angle.k + offset,
                angle.kind.clone(),
            )
        }));

        Ok(Network {
            domain: a.domain,
            beads,
            bonds,
            angles,
            bond_type_parameters,
            angle_type_parameters,
        })
    }
}

fn merge_parameters(
    first: &BTreeMap<String, TypeParameters>,
    second: &BTreeMap<String, TypeParameters>,
    category: TypeCategory,
    policy: ConflictPolicy,
) -> Result<BTreeMap<String, TypeParameters>, Error> {
    let mut merged = first.clone();
    for (name, params) in second {
        match first.get(name) {
            Some(existing) if policy.conflicts(existing, params) => {
                return Err(Error::conflicting_type_parameters(
                    category, name, *existing, *params,
                ));
            }
            Some(_) => {}
            None => {
                merged.insert(name.clone(), *params);
            }
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{POLYMER_BEND, POLYMER_BOND};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn make_chain(domain: Domain, origin: [f64; 2], beads: usize) -> Network {
        let mut net = Network::new(domain);
        for k in 0..beads {
            net.add_bead(vec![origin[0] + k as f64, origin[1]], BeadType::Free);
        }
        for k in 1..beads {
            net.add_bond(k - 1, k, POLYMER_BOND).unwrap();
        }
        for k in 2..beads {
            net.add_angle(k - 2, k - 1, k, POLYMER_BEND).unwrap();
        }
        net
    }

    #[test]
    fn bond_key_is_order_independent() {
        assert_eq!(Bond::new(4, 2, "x").key(), (2, 4));
        assert_eq!(Bond::new(2, 4, "x").key(), (2, 4));
        let bond = Bond::new(4, 2, "x");
        assert_eq!((bond.i, bond.j), (4, 2));
    }

    #[test]
    fn add_bead_returns_dense_ids() {
        let mut net = Network::new(Domain::new(10.0, 10.0));
        assert_eq!(net.add_bead(vec![0.0, 0.0], BeadType::Free), 0);
        assert_eq!(net.add_bead(vec![1.0, 0.0], BeadType::Free), 1);
        assert_eq!(net.bead_count(), 2);
    }

    #[test]
    fn add_bond_rejects_unknown_bead() {
        let mut net = Network::new(Domain::new(10.0, 10.0));
        net.add_bead(vec![0.0, 0.0], BeadType::Free);
        let result = net.add_bond(0, 1, POLYMER_BOND);
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
        assert!(net.bonds.is_empty());
    }

    #[test]
    fn validate_rejects_dangling_references() {
        let mut net = Network::new(Domain::new(10.0, 10.0));
        net.add_bead(vec![0.0, 0.0], BeadType::Free);
        net.add_bead(vec![1.0, 0.0], BeadType::Free);
        net.add_bond(0, 1, POLYMER_BOND).unwrap();
        assert!(net.validate().is_ok());

        let mut dangling_bond = net.clone();
        dangling_bond.bonds.push(Bond::new(1, 7, POLYMER_BOND));
        assert!(matches!(
            dangling_bond.validate(),
            Err(Error::InvalidParameter { .. })
        ));

        let mut dangling_angle = net.clone();
        dangling_angle.angles.push(Angle::new(0, 1, 2, "bend"));
        assert!(matches!(
            dangling_angle.validate(),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn merge_refuses_a_dangling_input() {
        let mut good = Network::new(Domain::new(10.0, 10.0));
        good.add_bead(vec![0.0, 0.0], BeadType::Free);
        let mut bad = good.clone();
        bad.bonds.push(Bond::new(0, 3, POLYMER_BOND));

        assert!(matches!(
            Network::merge(&good, &bad),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(
            Network::merge(&bad, &good),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn merge_shifts_second_network_ids() {
        let domain = Domain::new(20.0, 20.0);
        let a = make_chain(domain, [0.0, 0.0], 4);
        let b = make_chain(domain, [0.0, 5.0], 3);

        let merged = Network::merge(&a, &b).unwrap();

        assert_eq!(merged.bead_count(), 7);
        assert_eq!(merged.bond_count(), 3 + 2);
        assert_eq!(merged.angle_count(), 2 + 1);
        assert_eq!(&merged.bonds[..3], &a.bonds[..]);
        assert_eq!(merged.bonds[3], Bond::new(4, 5, POLYMER_BOND));
        assert_eq!(merged.bonds[4], Bond::new(5, 6, POLYMER_BOND));
        assert_eq!(merged.angles[2], Angle::new(4, 5, 6, POLYMER_BEND));
        assert_eq!(merged.beads[4], b.beads[0]);
    }

    #[test]
    fn merge_uses_first_domain() {
        let a = Network::new(Domain::new(10.0, 10.0));
        let b = Network::new(Domain::new(99.0, 99.0));
        let merged = Network::merge(&a, &b).unwrap();
        assert_eq!(merged.domain, a.domain);
    }

    #[test]
    fn merge_unions_parameter_tables() {
        let domain = Domain::new(10.0, 10.0);
        let mut a = Network::new(domain);
        let mut b = Network::new(domain);
        a.bond_type_parameters
            .insert("a".into(), TypeParameters::new(1.0, 1.0));
        b.bond_type_parameters
            .insert("b".into(), TypeParameters::new(2.0, 0.5));
        b.angle_type_parameters
            .insert("bend".into(), TypeParameters::new(3.0, PI));

        let merged = Network::merge(&a, &b).unwrap();
        assert_eq!(merged.bond_type_parameters.len(), 2);
        assert_eq!(merged.angle_type_parameters["bend"].spring_constant, 3.0);
    }

    #[test]
    fn merge_accepts_identical_shared_parameters() {
        let domain = Domain::new(10.0, 10.0);
        let mut a = Network::new(domain);
        let mut b = Network::new(domain);
        a.bond_type_parameters
            .insert("x".into(), TypeParameters::new(1.0, 2.0));
        b.bond_type_parameters
            .insert("x".into(), TypeParameters::new(1.0, 2.0));
        assert!(Network::merge(&a, &b).is_ok());
    }

    #[test]
    fn merge_default_policy_rejects_rest_length_mismatch() {
        let domain = Domain::new(10.0, 10.0);
        let mut a = Network::new(domain);
        let mut b = Network::new(domain);
        a.bond_type_parameters
            .insert("x".into(), TypeParameters::new(1.0, 2.0));
        b.bond_type_parameters
            .insert("x".into(), TypeParameters::new(1.0, 3.0));

        let result = Network::merge(&a, &b);
        assert!(matches!(
            result,
            Err(Error::ConflictingTypeParameters {
                category: TypeCategory::Bond,
                ..
            })
        ));
    }

    #[test]
    fn merge_legacy_policy_keeps_first_on_partial_mismatch() {
        let domain = Domain::new(10.0, 10.0);
        let mut a = Network::new(domain);
        let mut b = Network::new(domain);
        a.bond_type_parameters
            .insert("x".into(), TypeParameters::new(1.0, 2.0));
        b.bond_type_parameters
            .insert("x".into(), TypeParameters::new(1.0, 3.0));

        let merged = Network::merge_with(&a, &b, ConflictPolicy::BothMismatch).unwrap();
        assert_eq!(merged.bond_type_parameters["x"].rest_length, 2.0);
    }

    #[test]
    fn merge_legacy_policy_rejects_full_mismatch() {
        let domain = Domain::new(10.0, 10.0);
        let mut a = Network::new(domain);
        let mut b = Network::new(domain);
        a.angle_type_parameters
            .insert("bend".into(), TypeParameters::new(1.0, 2.0));
        b.angle_type_parameters
            .insert("bend".into(), TypeParameters::new(5.0, 3.0));

        let result = Network::merge_with(&a, &b, ConflictPolicy::BothMismatch);
        assert!(matches!(
            result,
            Err(Error::ConflictingTypeParameters {
                category: TypeCategory::Angle,
                ..
            })
        ));
    }

    #[test]
    fn rotate_quarter_turn_about_center() {
        let mut net = Network::new(Domain::new(10.0, 10.0));
        net.add_bead(vec![10.0, 5.0], BeadType::Free);
        net.rotate(FRAC_PI_2);
        assert!(approx_eq(net.beads[0].position[0], 5.0, 1e-12));
        assert!(approx_eq(net.beads[0].position[1], 10.0, 1e-12));
    }

    #[test]
    fn rotate_leaves_extra_coordinates_and_topology() {
        let mut net = make_chain(Domain::new(10.0, 10.0), [1.0, 2.0], 3);
        net.beads[1].position.push(7.5);
        let bonds = net.bonds.clone();
        net.rotate(1.234);
        assert_eq!(net.beads[1].position[2], 7.5);
        assert_eq!(net.bonds, bonds);
    }

    #[test]
    fn rotate_round_trip_restores_positions() {
        let original = make_chain(Domain::new(30.0, 12.0), [3.0, 4.0], 6);
        for theta in [0.3, -2.0, PI, 17.0] {
            let mut net = original.clone();
            net.rotate(theta);
            net.rotate(-theta);
            for (a, b) in net.beads.iter().zip(&original.beads) {
                assert!(approx_eq(a.position[0], b.position[0], 1e-9));
                assert!(approx_eq(a.position[1], b.position[1], 1e-9));
            }
        }
    }

    #[test]
    fn fix_boundaries_tags_outside_beads() {
        let mut net = Network::new(Domain::new(200.0, 200.0).with_fixed_boundary(true));
        net.add_bead(vec![-1.0, 100.0], BeadType::Free);
        net.add_bead(vec![100.0, 100.0], BeadType::Free);
        net.add_bead(vec![100.0, 201.0], BeadType::Free);

        assert_eq!(net.fix_boundaries(), 2);
        assert_eq!(net.beads[0].kind, BeadType::Boundary);
        assert_eq!(net.beads[1].kind, BeadType::Free);
        assert_eq!(net.beads[2].kind, BeadType::Boundary);
    }

    #[test]
    fn fix_boundaries_is_idempotent_and_skips_custom_kinds() {
        let mut net = Network::new(Domain::new(10.0, 10.0).with_fixed_boundary(true));
        net.add_bead(vec![50.0, 5.0], BeadType::Custom("anchor".into()));
        net.add_bead(vec![5.0, 5.0], BeadType::Boundary);
        net.add_bead(vec![50.0, 5.0], BeadType::Free);

        net.fix_boundaries();
        let once = net.clone();
        net.fix_boundaries();

        assert_eq!(net, once);
        assert_eq!(net.beads[0].kind, BeadType::Custom("anchor".into()));
        assert_eq!(net.beads[1].kind, BeadType::Free);
        assert_eq!(net.beads[2].kind, BeadType::Boundary);
    }

    #[test]
    fn fix_boundaries_without_fixing_keeps_everything_free() {
        let mut net = Network::new(Domain::new(10.0, 10.0));
        net.add_bead(vec![-50.0, 5.0], BeadType::Free);
        assert_eq!(net.fix_boundaries(), 0);
        assert_eq!(net.count_beads_of_type(&BeadType::Free), 1);
    }
}
