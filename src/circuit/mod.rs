//! Circuit graph representation and validation.
//!
//! This module provides the internal representation of a circuit after
//! parsing. The [`Circuit`] struct owns all components and the unknown
//! registry in a form suitable for transient simulation.

mod graph;
mod registry;
mod types;
mod validate;

pub use graph::Circuit;
pub use registry::UnknownRegistry;
pub use types::*;
pub use validate::validate_circuit;
