//! Core types for circuit representation.

use std::fmt;

/// A unique identifier for a node in the circuit, as declared in the
/// netlist. The ground node is whichever node id the `GROUND` directive
/// names; by convention netlists use `0`, but nothing in this crate assumes
/// that numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A symbolic unknown in the circuit's KCL system: either a node voltage
/// or a branch current through a named component.
///
/// Unknowns are registered by label during circuit construction and
/// resolved to dense integer indices once the registry is frozen (see
/// [`crate::circuit::UnknownRegistry`]). Component implementations should
/// never hash this type on the hot path — indices are cached once in
/// `bind()` and reused in every subsequent `stamp()` call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unknown {
    /// Node voltage `V(node)`.
    Voltage(NodeId),
    /// Branch current `I(name)` through the named component.
    Current(String),
}

impl Unknown {
    /// Construct a node-voltage unknown.
    pub fn voltage(node: NodeId) -> Self {
        Unknown::Voltage(node)
    }

    /// Construct a branch-current unknown for the named component.
    pub fn current(name: impl Into<String>) -> Self {
        Unknown::Current(name.into())
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unknown::Voltage(n) => write!(f, "V({})", n),
            Unknown::Current(name) => write!(f, "I({})", name),
        }
    }
}
