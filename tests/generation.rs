use std::collections::HashSet;

use fibre_forge::{
    BeadType, ConflictPolicy, CrosslinkPolicy, CrosslinkSelector, DensityParameters, Domain,
    ExplicitSelector, ForgeError, GenerationConfig, Network, NetworkType, POLYMER_BEND,
    POLYMER_BOND, StrandParameters, TypeParameters, UniformDistribution, generate, random_network,
};

fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

fn assert_references_are_valid(net: &Network) {
    let n = net.bead_count();
    for bond in &net.bonds {
        assert!(bond.i < n && bond.j < n, "dangling bond {:?}", bond);
    }
    for angle in &net.angles {
        assert!(angle.i < n && angle.j < n && angle.k < n, "dangling angle {:?}", angle);
    }
}

fn crosslinks(net: &Network) -> Vec<&fibre_forge::Bond> {
    net.bonds.iter().filter(|b| b.kind != POLYMER_BOND).collect()
}

#[test]
fn default_config_reproduces_reference_counts() {
    let mut config = GenerationConfig::default();
    config.seed = Some(10);

    let net = generate(&config).unwrap();

    assert_eq!(net.bead_count(), 900);
    assert_eq!(net.count_bonds_of_type(POLYMER_BOND), 800);
    assert_eq!(net.angles.iter().filter(|a| a.kind == POLYMER_BEND).count(), 700);
    assert!(crosslinks(&net).len() <= 50);
    assert_references_are_valid(&net);
}

#[test]
fn same_seed_same_network_different_seed_different_network() {
    let config = |seed| {
        let mut config = GenerationConfig::default();
        config.seed = Some(seed);
        config
    };

    let a = generate(&config(5)).unwrap();
    let b = generate(&config(5)).unwrap();
    let c = generate(&config(6)).unwrap();

    assert_eq!(a, b);
    assert_ne!(a.beads, c.beads);
}

#[test]
fn crosslinks_form_a_matching_with_registered_short_types() {
    let net = random_network(
        Domain::new(60.0, 60.0),
        StrandParameters::new(9, 120, 12.0),
        DensityParameters::new(1.5, 500, 0.25, 2.0),
        Some(77),
    )
    .unwrap();

    let links = crosslinks(&net);
    assert!(!links.is_empty());

    let mut used = HashSet::new();
    for bond in &links {
        assert!(used.insert(bond.i));
        assert!(used.insert(bond.j));
        assert_ne!(bond.i / 9, bond.j / 9);

        let params = net.bond_type_parameters[&bond.kind];
        assert!(params.rest_length <= 1.5);
        assert_eq!(params.spring_constant, 2.0);
    }
}

#[test]
fn polymer_bonds_match_strand_spacing() {
    let net = random_network(
        Domain::new(100.0, 100.0),
        StrandParameters::new(5, 30, 10.0),
        DensityParameters::new(1.0, 10, 0.5, 1.0),
        Some(1),
    )
    .unwrap();

    for bond in net.bonds.iter().filter(|b| b.kind == POLYMER_BOND) {
        let a = &net.beads[bond.i];
        let b = &net.beads[bond.j];
        let d = ((a.x() - b.x()).powi(2) + (a.y() - b.y()).powi(2)).sqrt();
        assert!(approx_eq(d, 2.5, 1e-9));
    }
}

#[test]
fn fixed_boundary_tags_exactly_the_outside_beads() {
    let mut config = GenerationConfig::default();
    config.seed = Some(8);
    config.domain.fix_boundary = true;

    let net = generate(&config).unwrap();

    for bead in &net.beads {
        let outside = bead.x() < 0.0 || bead.x() > 200.0 || bead.y() < 0.0 || bead.y() > 200.0;
        let expected = if outside { BeadType::Boundary } else { BeadType::Free };
        assert_eq!(bead.kind, expected);
    }
}

#[test]
fn merge_then_rotate_keeps_topology() {
    let domain = Domain::new(50.0, 50.0);
    let build = |seed| {
        NetworkType::new(
            domain,
            UniformDistribution::new(50.0, 50.0, Some(seed)).unwrap(),
            StrandParameters::new(4, 10, 3.0),
            None,
        )
        .generate()
        .unwrap()
    };
    let a = build(1);
    let b = build(2);

    let mut merged = Network::merge(&a, &b).unwrap();
    assert_eq!(merged.bead_count(), 80);
    assert_eq!(merged.bonds[30].i, b.bonds[0].i + 40);
    assert_references_are_valid(&merged);

    let bonds = merged.bonds.clone();
    merged.rotate(std::f64::consts::PI);
    assert_eq!(merged.bonds, bonds);
    assert!(approx_eq(merged.beads[0].x(), 50.0 - a.beads[0].x(), 1e-9));
    assert!(approx_eq(merged.beads[0].y(), 50.0 - a.beads[0].y(), 1e-9));
}

#[test]
fn merge_policies_differ_on_partial_disagreement() {
    let domain = Domain::new(10.0, 10.0);
    let mut a = Network::new(domain);
    let mut b = Network::new(domain);
    a.bond_type_parameters
        .insert("crosslink_1".into(), TypeParameters::new(1.0, 0.5));
    b.bond_type_parameters
        .insert("crosslink_1".into(), TypeParameters::new(2.0, 0.5));

    assert!(matches!(
        Network::merge_with(&a, &b, ConflictPolicy::AnyMismatch),
        Err(ForgeError::ConflictingTypeParameters { .. })
    ));
    let legacy = Network::merge_with(&a, &b, ConflictPolicy::BothMismatch).unwrap();
    assert_eq!(legacy.bond_type_parameters["crosslink_1"].spring_constant, 1.0);
}

#[test]
fn network_round_trips_through_json() {
    let mut config = GenerationConfig::default();
    config.seed = Some(3);
    config.strands.strand_count = 10;
    let net = generate(&config).unwrap();

    let json = serde_json::to_string(&net).unwrap();
    let back: Network = serde_json::from_str(&json).unwrap();

    assert_eq!(back.domain, net.domain);
    assert_eq!(back.bonds, net.bonds);
    assert_eq!(back.angles, net.angles);
    assert_eq!(back.bond_type_parameters.len(), net.bond_type_parameters.len());
    for (a, b) in back.beads.iter().zip(&net.beads) {
        assert_eq!(a.kind, b.kind);
        assert!(approx_eq(a.x(), b.x(), 1e-9));
        assert!(approx_eq(a.y(), b.y(), 1e-9));
    }
}

#[test]
fn explicit_policy_after_density_keeps_both_matchings_separate() {
    let mut net = random_network(
        Domain::new(30.0, 30.0),
        StrandParameters::new(6, 40, 5.0),
        DensityParameters::new(1.0, 100, 0.5, 1.0),
        Some(12),
    )
    .unwrap();
    let before = net.bond_count();

    let first_link = crosslinks(&net).first().map(|b| (b.i, b.j));
    let Some((i, j)) = first_link else {
        return;
    };

    // a second pass may reuse beads from the first one
    let mut policy: CrosslinkPolicy = ExplicitSelector::from_pairs(&[(i, j)]).into();
    let report = policy.distribute_crosslinkers(&mut net).unwrap();
    assert_eq!(report.accepted, 1);
    assert_eq!(net.bond_count(), before + 1);
}

#[test]
fn toml_tip_to_tail_run_builds_one_chain() {
    let config = GenerationConfig::from_toml_str(
        r#"
        seed = 2

        [domain]
        size_x = 20.0
        size_y = 20.0

        [strands]
        beads_per_strand = 3
        strand_count = 5
        contour_length = 2.0

        [placement]
        kind = "deterministic"
        x = [2.0, 6.0, 10.0, 14.0, 18.0]
        y = [10.0, 10.0, 10.0, 10.0, 10.0]
        angle = [0.0, 0.0, 0.0, 0.0, 0.0]

        [crosslink]
        kind = "tip-to-tail"
        "#,
    )
    .unwrap();

    let net = generate(&config).unwrap();

    assert_eq!(net.bead_count(), 15);
    assert_eq!(net.count_bonds_of_type(POLYMER_BOND), 5 * 2 + 4);
    let joins: Vec<(usize, usize)> = net.bonds[10..].iter().map(|b| (b.i, b.j)).collect();
    assert_eq!(joins, vec![(2, 3), (5, 6), (8, 9), (11, 12)]);
}
