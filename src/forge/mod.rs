mod config;
mod crosslink;
mod distribution;
mod error;
mod network_type;
mod presets;
mod strands;

pub use config::{
    CrosslinkConfig, DomainConfig, GenerationConfig, PlacementConfig, StrandsConfig, load_config,
};
pub use crosslink::{
    CrosslinkCandidate, CrosslinkPolicy, CrosslinkReport, CrosslinkSelector, DENSITY_BOND_PREFIX,
    DensityParameters, DensitySelector, ExplicitSelector, Selection, TipToTailSelector,
    density_bond_type, distribute,
};
pub use distribution::{
    DeterministicDistribution, DirectionalDistribution, GeneralDistribution,
    PlacementDistribution, Sampler, StrandDistribution, UniformDistribution, rng_from_seed,
};
pub use error::Error;
pub use network_type::{NetworkType, Stage};
pub use presets::{
    directed_network, random_network, single_spring, single_strand, two_crosslinked_strands,
};
pub use strands::{StrandGenerator, StrandLayout, StrandParameters};

use crate::model::network::Network;

pub fn generate(config: &GenerationConfig) -> Result<Network, Error> {
    let network_type = NetworkType::from_config(config)?;

    let network = network_type.generate()?;

    Ok(network)
}
