//! Generation pipeline.

use super::config::GenerationConfig;
use super::crosslink::{CrosslinkPolicy, CrosslinkSelector};
use super::distribution::{PlacementDistribution, StrandDistribution};
use super::error::Error;
use super::strands::{StrandGenerator, StrandParameters};
use crate::model::domain::Domain;
use crate::model::network::Network;
use std::fmt;
use tracing::{debug, info};

/// Completed step of [`NetworkType::generate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    StrandsBuilt,
    BoundariesFixed,
    /// Only reported when a crosslinker is configured.
    Crosslinked,
    Complete,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::StrandsBuilt => "strands built",
            Stage::BoundariesFixed => "boundaries fixed",
            Stage::Crosslinked => "crosslinks distributed",
            Stage::Complete => "network complete",
        };
        f.write_str(label)
    }
}

/// Recipe for one network: a domain, a strand generator, and an optional
/// crosslinker.
///
/// Generation consumes the recipe, so each `NetworkType` produces exactly
/// one network.
#[derive(Debug)]
pub struct NetworkType<D = StrandDistribution> {
    domain: Domain,
    strand_generator: StrandGenerator<D>,
    strand_parameters: StrandParameters,
    crosslinker: Option<CrosslinkPolicy>,
}

impl NetworkType<StrandDistribution> {
    /// Assembles the whole pipeline from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any configured component
    /// rejects its parameters.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, Error> {
        let domain = config.domain.to_domain();
        let strand_parameters = config.strands.to_parameters();
        strand_parameters.validate()?;

        let distribution = config.placement.build(&domain, config.seed)?;
        let crosslinker = config.crosslink.build(&strand_parameters, config.seed)?;

        debug!(
            placement = config.placement.name(),
            crosslink = config.crosslink.name(),
            seed = ?config.seed,
            "assembled network type from config"
        );

        Ok(Self::new(domain, distribution, strand_parameters, crosslinker))
    }
}

impl<D: PlacementDistribution> NetworkType<D> {
    pub fn new(
        domain: Domain,
        distribution: D,
        strand_parameters: StrandParameters,
        crosslinker: Option<CrosslinkPolicy>,
    ) -> Self {
        Self {
            domain,
            strand_generator: StrandGenerator::new(distribution),
            strand_parameters,
            crosslinker,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn strand_parameters(&self) -> &StrandParameters {
        &self.strand_parameters
    }

    pub fn crosslinker(&self) -> Option<&CrosslinkPolicy> {
        self.crosslinker.as_ref()
    }

    /// Builds the network: strands, then boundary tagging, then crosslinks.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by any stage. No partial network is
    /// returned.
    pub fn generate(self) -> Result<Network, Error> {
        self.generate_with(|_, _| {})
    }

    /// Like [`generate`](Self::generate), calling `observer` after each
    /// completed stage.
    pub fn generate_with<F>(self, mut observer: F) -> Result<Network, Error>
    where
        F: FnMut(Stage, &Network),
    {
        let Self {
            domain,
            mut strand_generator,
            strand_parameters,
            crosslinker,
        } = self;

        let mut network = Network::new(domain);

        strand_generator.build_strands(&mut network, &strand_parameters)?;
        observer(Stage::StrandsBuilt, &network);

        let pinned = strand_generator.fix_boundaries(&mut network);
        observer(Stage::BoundariesFixed, &network);

        let mut crosslinks = 0;
        if let Some(mut policy) = crosslinker {
            let report = policy.distribute_crosslinkers(&mut network)?;
            crosslinks = report.accepted;
            observer(Stage::Crosslinked, &network);
        }

        info!(
            beads = network.bead_count(),
            bonds = network.bond_count(),
            angles = network.angle_count(),
            boundary_beads = pinned,
            crosslinks,
            "generated network"
        );
        observer(Stage::Complete, &network);

        Ok(network)
    }
}
