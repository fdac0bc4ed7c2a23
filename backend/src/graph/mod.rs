//! Eligibility graph over participants and cycle search
//!
//! - [`ExclusionGraph`]: who may give to whom under the current exclusions
//! - [`ExclusionGraph::random_cycle`]: randomized exhaustive Hamiltonian cycle search
//!
//! A graph is built fresh for every planning attempt and dropped afterwards.

pub mod exclusion;

pub use exclusion::{ExclusionGraph, NoCycleFound, SearchError};
