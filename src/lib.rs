//! A pure Rust generator for coarse-grained fibrous network topologies.
//! It scatters straight bead-spring polymer strands over a rectangular domain,
//! pins beads that leave the domain, and joins strands with crosslinks, producing
//! bead/bond/angle graphs ready to be handed to a mechanical simulation.
//!
//! # Features
//!
//! - **Strand placement** — Uniform, von Mises directional, deterministic, or
//!   user-supplied distributions of strand anchors and orientations
//! - **Boundary pinning** — Beads outside the domain become boundary beads, on
//!   all sides or on selected edges
//! - **Crosslinking** — Radius-based, tip-to-tail, or explicit crosslinks,
//!   resolved into a conflict-free matching
//! - **Network algebra** — Disjoint merge with type-parameter conflict checks
//!   and rigid rotation about the domain center
//! - **Configuration** — Whole generation runs described in TOML
//!
//! # Quick Start
//!
//! The main entry point is the [`generate`] function, which takes a
//! [`GenerationConfig`] and produces a [`Network`]:
//!
//! ```
//! use fibre_forge::{generate, GenerationConfig, ForgeError};
//! use fibre_forge::{BeadType, POLYMER_BOND};
//!
//! let config = GenerationConfig::from_toml_str(
//!     r#"
//!     seed = 10
//!
//!     [domain]
//!     size_x = 100.0
//!     size_y = 100.0
//!     fix_boundary = true
//!
//!     [strands]
//!     beads_per_strand = 9
//!     strand_count = 40
//!     contour_length = 16.0
//!
//!     [crosslink]
//!     kind = "density"
//!     max_radius = 1.0
//!     max_candidates = 30
//!     "#,
//! )?;
//!
//! let network = generate(&config)?;
//!
//! // 40 strands of 9 beads, 8 backbone bonds and 7 bending angles each
//! assert_eq!(network.bead_count(), 360);
//! assert_eq!(network.count_bonds_of_type(POLYMER_BOND), 320);
//! assert_eq!(network.angle_count(), 280);
//!
//! // At most 30 crosslinks were proposed, so at most 30 were accepted
//! assert!(network.bond_count() - 320 <= 30);
//!
//! // Every bead is either free or pinned to the boundary
//! let free = network.count_beads_of_type(&BeadType::Free);
//! let pinned = network.count_beads_of_type(&BeadType::Boundary);
//! assert_eq!(free + pinned, 360);
//! # Ok::<(), ForgeError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`generate`] — Config-driven generation
//! - [`NetworkType`] — Generation pipeline assembled by hand
//! - [`GenerationConfig`] — TOML-backed description of a run
//!
//! # Data Types
//!
//! ## Network Model
//!
//! - [`Network`] — Beads, bonds, angles and per-type physical parameters
//! - [`Bead`] — Position and kind of one bead
//! - [`Bond`] / [`Angle`] — Typed two- and three-bead constraints
//! - [`Domain`] — Rectangular region with boundary pinning flags
//! - [`BeadType`] — Free, boundary, or custom bead kind
//! - [`TypeParameters`] — Spring constant and rest length of a type
//!
//! ## Strands
//!
//! - [`StrandGenerator`] — Batched placement of straight strands
//! - [`StrandParameters`] — Beads per strand, strand count, contour length
//! - [`PlacementDistribution`] — Source of anchors and angles
//!
//! ## Crosslinks
//!
//! - [`CrosslinkSelector`] — Strategy proposing candidate bonds
//! - [`CrosslinkPolicy`] — Built-in strategies plus custom ones
//! - [`distribute`] — Greedy conflict-free acceptance of candidates
//!
//! ## Presets
//!
//! - [`random_network`], [`directed_network`], [`single_strand`],
//!   [`single_spring`], [`two_crosslinked_strands`]

mod forge;
mod model;

pub use model::bead::Bead;
pub use model::domain::{BoundaryFixing, Domain};
pub use model::network::{Angle, Bond, ConflictPolicy, Network};
pub use model::types::{
    BeadType, CROSSLINK_BOND, POLYMER_BEND, POLYMER_BOND, ParseBeadTypeError, TypeCategory,
    TypeParameters,
};

pub use forge::{
    CrosslinkCandidate, CrosslinkConfig, CrosslinkPolicy, CrosslinkReport, CrosslinkSelector,
    DENSITY_BOND_PREFIX, DensityParameters, DensitySelector, DeterministicDistribution,
    DirectionalDistribution, DomainConfig, ExplicitSelector, GeneralDistribution,
    GenerationConfig, NetworkType, PlacementConfig, PlacementDistribution, Sampler, Selection,
    Stage, StrandDistribution, StrandGenerator, StrandLayout, StrandParameters, StrandsConfig,
    TipToTailSelector, UniformDistribution, density_bond_type, directed_network, distribute,
    generate, load_config, random_network, rng_from_seed, single_spring, single_strand,
    two_crosslinked_strands,
};

pub use forge::Error as ForgeError;
