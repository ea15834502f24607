//! Strand placement configuration.

use crate::forge::distribution::{
    DeterministicDistribution, DirectionalDistribution, StrandDistribution, UniformDistribution,
};
use crate::forge::error::Error;
use crate::model::domain::Domain;
use serde::{Deserialize, Serialize};

/// How strand anchors and orientations are drawn.
///
/// Random variants place anchors uniformly over the whole domain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PlacementConfig {
    /// Isotropic orientations.
    #[default]
    Uniform,

    /// Von Mises distributed orientations around `mean_angle` (radians).
    Directional {
        #[serde(default)]
        mean_angle: f64,
        #[serde(default = "default_concentration")]
        concentration: f64,
    },

    /// Fixed anchors and angles, one entry per strand.
    Deterministic {
        x: Vec<f64>,
        y: Vec<f64>,
        angle: Vec<f64>,
    },
}

fn default_concentration() -> f64 {
    1.0
}

impl PlacementConfig {
    pub fn name(&self) -> &'static str {
        match self {
            PlacementConfig::Uniform => "uniform",
            PlacementConfig::Directional { .. } => "directional",
            PlacementConfig::Deterministic { .. } => "deterministic",
        }
    }

    /// Builds the distribution for `domain`, seeding random variants with `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a degenerate domain, a negative
    /// concentration, or deterministic arrays of unequal length.
    pub fn build(&self, domain: &Domain, seed: Option<u64>) -> Result<StrandDistribution, Error> {
        let distribution = match self {
            PlacementConfig::Uniform => {
                UniformDistribution::new(domain.size_x, domain.size_y, seed)?.into()
            }
            PlacementConfig::Directional {
                mean_angle,
                concentration,
            } => DirectionalDistribution::new(
                domain.size_x,
                domain.size_y,
                *mean_angle,
                *concentration,
                seed,
            )?
            .into(),
            PlacementConfig::Deterministic { x, y, angle } => {
                DeterministicDistribution::new(x.clone(), y.clone(), angle.clone())?.into()
            }
        };
        Ok(distribution)
    }
}
