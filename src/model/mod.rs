//! Core data structures representing fibrous networks.
//!
//! This module provides the foundational types that flow through `fibre-forge`:
//!
//! - [`bead`] – Point mass with an n-dimensional position and a type tag.
//! - [`types`] – Bead type tags, bond/angle type constants, and per-type physical parameters.
//! - [`domain`] – Simulation region extents and boundary-fixing configuration.
//! - [`network`] – The bead/bond/angle aggregate with merge and rotation.
//!
//! The [`Network`] is an arena: beads live in a single growing table and bonds
//! and angles are index tuples into it. Generation stages in [`crate::forge`]
//! only ever append to it, which keeps ids stable and makes merging a matter
//! of offsetting indices.
//!
//! [`Network`]: network::Network

pub mod bead;
pub mod domain;
pub mod network;
pub mod types;
