//! Shared utilities: topology validation.

pub mod validation;

pub use validation::validate_topology;
