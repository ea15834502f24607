//! Error types for network generation.
//!
//! This module defines the error type used throughout the forge module.
//! Errors are categorized by source: invalid generation parameters,
//! disagreeing type parameters on merge, crosslink candidates that point
//! outside the network, and configuration parsing.

use crate::model::types::{TypeCategory, TypeParameters};
use thiserror::Error;

/// Errors that can occur while generating or combining networks.
///
/// None of these are retried internally; they describe programming or
/// configuration mistakes and are meant to reach the caller unmodified.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to parse a generation configuration TOML.
    #[error("failed to parse generation config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A generation parameter is out of its valid range.
    ///
    /// Raised before any mutation, so the target network is left untouched.
    #[error("invalid parameter '{parameter}': {detail}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: String,
        /// Description of the problem.
        detail: String,
    },

    /// Two merged networks disagree on the physical constants of a shared type.
    #[error("conflicting {category} type parameters for '{type_name}': {first} vs {second}")]
    ConflictingTypeParameters {
        /// Bond or angle parameter table.
        category: TypeCategory,
        /// The shared type tag.
        type_name: String,
        /// Record held by the first network.
        first: TypeParameters,
        /// Record held by the second network.
        second: TypeParameters,
    },

    /// A crosslink selector proposed a bead id outside the network.
    #[error("invalid crosslink candidate ({i}, {j}): bead id out of range (bead count = {bead_count})")]
    InvalidCrosslinkCandidate {
        /// First proposed bead id.
        i: usize,
        /// Second proposed bead id.
        j: usize,
        /// Number of beads in the network at selection time.
        bead_count: usize,
    },
}

impl Error {
    /// Creates an [`InvalidParameter`](Error::InvalidParameter) error.
    ///
    /// # Arguments
    ///
    /// * `parameter` — Name of the offending parameter
    /// * `details` — Description of the problem
    pub fn invalid_parameter(parameter: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            detail: details.into(),
        }
    }

    /// Creates a [`ConflictingTypeParameters`](Error::ConflictingTypeParameters) error.
    pub fn conflicting_type_parameters(
        category: TypeCategory,
        type_name: &str,
        first: TypeParameters,
        second: TypeParameters,
    ) -> Self {
        Self::ConflictingTypeParameters {
            category,
            type_name: type_name.to_string(),
            first,
            second,
        }
    }

    /// Creates an [`InvalidCrosslinkCandidate`](Error::InvalidCrosslinkCandidate) error.
    pub fn invalid_crosslink_candidate(i: usize, j: usize, bead_count: usize) -> Self {
        Self::InvalidCrosslinkCandidate { i, j, bead_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message() {
        let err = Error::invalid_parameter("beads_per_strand", "must be at least 2, got 1");
        assert_eq!(
            err.to_string(),
            "invalid parameter 'beads_per_strand': must be at least 2, got 1"
        );
    }

    #[test]
    fn conflicting_type_parameters_message() {
        let err = Error::conflicting_type_parameters(
            TypeCategory::Bond,
            "crosslink",
            TypeParameters::new(1.0, 0.5),
            TypeParameters::new(2.0, 0.5),
        );
        assert_eq!(
            err.to_string(),
            "conflicting bond type parameters for 'crosslink': (k = 1, r0 = 0.5) vs (k = 2, r0 = 0.5)"
        );
    }

    #[test]
    fn invalid_crosslink_candidate_message() {
        let err = Error::invalid_crosslink_candidate(3, 40, 10);
        assert!(err.to_string().contains("(3, 40)"));
        assert!(err.to_string().contains("bead count = 10"));
    }
}
