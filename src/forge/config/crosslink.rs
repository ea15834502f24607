//! Crosslinking configuration.

use crate::forge::crosslink::{
    CrosslinkPolicy, DensityParameters, DensitySelector, TipToTailSelector,
};
use crate::forge::error::Error;
use crate::forge::strands::StrandParameters;
use crate::model::types::POLYMER_BOND;
use serde::{Deserialize, Serialize};

/// Which crosslinker, if any, runs after strand placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CrosslinkConfig {
    /// Strands are left unconnected.
    None,

    /// Radius-based crosslinks between nearby beads of different strands.
    Density {
        #[serde(default = "default_max_radius")]
        max_radius: f64,
        #[serde(default = "default_max_candidates")]
        max_candidates: usize,
        #[serde(default = "default_bin_size")]
        bin_size: f64,
        #[serde(default = "default_spring_constant")]
        spring_constant: f64,
    },

    /// Consecutive strands joined into a single chain.
    TipToTail {
        #[serde(default = "default_tip_to_tail_bond")]
        bond_type: String,
    },
}

fn default_max_radius() -> f64 {
    1.0
}
fn default_max_candidates() -> usize {
    50
}
fn default_bin_size() -> f64 {
    1.0 / 3.0
}
fn default_spring_constant() -> f64 {
    1.0
}
fn default_tip_to_tail_bond() -> String {
    POLYMER_BOND.to_string()
}

impl Default for CrosslinkConfig {
    fn default() -> Self {
        CrosslinkConfig::Density {
            max_radius: default_max_radius(),
            max_candidates: default_max_candidates(),
            bin_size: default_bin_size(),
            spring_constant: default_spring_constant(),
        }
    }
}

impl CrosslinkConfig {
    pub fn name(&self) -> &'static str {
        match self {
            CrosslinkConfig::None => "none",
            CrosslinkConfig::Density { .. } => "density",
            CrosslinkConfig::TipToTail { .. } => "tip-to-tail",
        }
    }

    /// Builds the crosslink policy for strands laid out by `strands`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for invalid density parameters.
    pub fn build(
        &self,
        strands: &StrandParameters,
        seed: Option<u64>,
    ) -> Result<Option<CrosslinkPolicy>, Error> {
        let policy = match self {
            CrosslinkConfig::None => return Ok(None),
            CrosslinkConfig::Density {
                max_radius,
                max_candidates,
                bin_size,
                spring_constant,
            } => {
                let params =
                    DensityParameters::new(*max_radius, *max_candidates, *bin_size, *spring_constant);
                DensitySelector::new(params, strands.beads_per_strand, seed)?.into()
            }
            CrosslinkConfig::TipToTail { bond_type } => {
                TipToTailSelector::new(strands.beads_per_strand, strands.strand_count)
                    .with_kind(bond_type.clone())
                    .into()
            }
        };
        Ok(Some(policy))
    }
}
