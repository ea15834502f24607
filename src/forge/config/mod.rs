//! Configuration for network generation.
//!
//! A [`GenerationConfig`] describes one complete generation run: the
//! domain, the strand geometry, how strands are placed and how they are
//! crosslinked. It is usually read from TOML; every field has a default so
//! a partial file is enough.
//!
//! # Overview
//!
//! - [`GenerationConfig`] — Complete description of a generation run
//! - [`DomainConfig`] — Domain size and boundary pinning
//! - [`StrandsConfig`] — Strand count and geometry
//! - [`PlacementConfig`] — Strand placement strategy
//! - [`CrosslinkConfig`] — Crosslinking strategy

mod crosslink;
mod placement;

pub use crosslink::CrosslinkConfig;
pub use placement::PlacementConfig;

use super::error::Error;
use super::strands::StrandParameters;
use crate::model::domain::{BoundaryFixing, Domain};
use serde::{Deserialize, Serialize};

/// Complete description of a generation run.
///
/// # Examples
///
/// ```
/// use fibre_forge::{CrosslinkConfig, GenerationConfig};
///
/// let config = GenerationConfig::from_toml_str(
///     r#"
///     seed = 7
///
///     [strands]
///     strand_count = 20
///
///     [crosslink]
///     kind = "none"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.strands.strand_count, 20);
/// assert_eq!(config.crosslink, CrosslinkConfig::None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Seed shared by every random component; `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub domain: DomainConfig,
    #[serde(default)]
    pub strands: StrandsConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub crosslink: CrosslinkConfig,
}

impl GenerationConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] for malformed TOML or unknown variants.
    pub fn from_toml_str(toml: &str) -> Result<Self, Error> {
        let config: GenerationConfig = toml::from_str(toml)?;
        Ok(config)
    }
}

const DEFAULT_CONFIG_TOML: &str = include_str!("../../../resources/default.network.toml");

/// Loads a configuration from optional TOML text.
///
/// Without custom text the embedded reference configuration is used: the
/// built-in defaults with seed 10.
///
/// # Errors
///
/// Returns [`Error::ConfigParse`] if the TOML cannot be parsed.
pub fn load_config(custom_toml: Option<&str>) -> Result<GenerationConfig, Error> {
    GenerationConfig::from_toml_str(custom_toml.unwrap_or(DEFAULT_CONFIG_TOML))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    #[serde(default = "default_size")]
    pub size_x: f64,
    #[serde(default = "default_size")]
    pub size_y: f64,
    /// Pins beads leaving the domain on any side.
    #[serde(default)]
    pub fix_boundary: bool,
    #[serde(default)]
    pub fix_north: bool,
    #[serde(default)]
    pub fix_south: bool,
    #[serde(default)]
    pub fix_east: bool,
    #[serde(default)]
    pub fix_west: bool,
}

fn default_size() -> f64 {
    200.0
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            size_x: default_size(),
            size_y: default_size(),
            fix_boundary: false,
            fix_north: false,
            fix_south: false,
            fix_east: false,
            fix_west: false,
        }
    }
}

impl DomainConfig {
    pub fn to_domain(&self) -> Domain {
        Domain::new(self.size_x, self.size_y).with_boundary_fixing(BoundaryFixing {
            all: self.fix_boundary,
            north: self.fix_north,
            south: self.fix_south,
            east: self.fix_east,
            west: self.fix_west,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrandsConfig {
    #[serde(default = "default_beads_per_strand")]
    pub beads_per_strand: usize,
    #[serde(default = "default_strand_count")]
    pub strand_count: usize,
    #[serde(default = "default_contour_length")]
    pub contour_length: f64,
}

fn default_beads_per_strand() -> usize {
    9
}
fn default_strand_count() -> usize {
    100
}
fn default_contour_length() -> f64 {
    50.0
}

impl Default for StrandsConfig {
    fn default() -> Self {
        Self {
            beads_per_strand: default_beads_per_strand(),
            strand_count: default_strand_count(),
            contour_length: default_contour_length(),
        }
    }
}

impl StrandsConfig {
    pub fn to_parameters(&self) -> StrandParameters {
        StrandParameters::new(self.beads_per_strand, self.strand_count, self.contour_length)
    }
}
