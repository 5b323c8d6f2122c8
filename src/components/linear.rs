//! Linear passive components: Resistor, Capacitor, Inductor.
//!
//! Capacitors and inductors are represented by their backward-Euler
//! companion models, which keeps every per-sample system linear in the
//! reactive state (the diode's Newton linearization is the only
//! nonlinearity). `x_prev_timestep` — the solution frozen at the start of
//! the sample — supplies the history term; it must never be touched during
//! Newton iteration.

use crate::circuit::{NodeId, Unknown, UnknownRegistry};
use crate::error::Result;
use crate::solver::LinearSystem;

/// A resistor between two nodes.
#[derive(Debug, Clone)]
pub struct Resistor {
    pub name: String,
    pub nodes: [NodeId; 2], // [npos, nneg]
    pub resistance: f64,
    n1: usize,
    n2: usize,
}

impl Resistor {
    pub fn new(name: impl Into<String>, npos: NodeId, nneg: NodeId, resistance: f64) -> Self {
        Self {
            name: name.into(),
            nodes: [npos, nneg],
            resistance,
            n1: 0,
            n2: 0,
        }
    }

    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }

    pub fn unknowns(&self) -> Vec<Unknown> {
        vec![Unknown::voltage(self.nodes[0]), Unknown::voltage(self.nodes[1])]
    }

    pub fn bind(&mut self, registry: &UnknownRegistry) -> Result<()> {
        self.n1 = registry.lookup(&Unknown::voltage(self.nodes[0]))?;
        self.n2 = registry.lookup(&Unknown::voltage(self.nodes[1]))?;
        Ok(())
    }

    pub fn stamp(&self, sys: &mut LinearSystem, _x_prev_timestep: &[f64], _x_prev_newton: &[f64], _dt: f64) {
        let g = self.conductance();
        sys.increment_lhs(self.n1, self.n1, g);
        sys.increment_lhs(self.n2, self.n2, g);
        sys.increment_lhs(self.n1, self.n2, -g);
        sys.increment_lhs(self.n2, self.n1, -g);
    }
}

/// A capacitor modeled with the backward-Euler companion conductance
/// `G = C/dt`.
#[derive(Debug, Clone)]
pub struct Capacitor {
    pub name: String,
    pub nodes: [NodeId; 2],
    pub capacitance: f64,
    n1: usize,
    n2: usize,
}

impl Capacitor {
    pub fn new(name: impl Into<String>, npos: NodeId, nneg: NodeId, capacitance: f64) -> Self {
        Self {
            name: name.into(),
            nodes: [npos, nneg],
            capacitance,
            n1: 0,
            n2: 0,
        }
    }

    pub fn conductance(&self, dt: f64) -> f64 {
        self.capacitance / dt
    }

    pub fn unknowns(&self) -> Vec<Unknown> {
        vec![Unknown::voltage(self.nodes[0]), Unknown::voltage(self.nodes[1])]
    }

    pub fn bind(&mut self, registry: &UnknownRegistry) -> Result<()> {
        self.n1 = registry.lookup(&Unknown::voltage(self.nodes[0]))?;
        self.n2 = registry.lookup(&Unknown::voltage(self.nodes[1]))?;
        Ok(())
    }

    pub fn stamp(&self, sys: &mut LinearSystem, x_prev_timestep: &[f64], _x_prev_newton: &[f64], dt: f64) {
        let g = self.conductance(dt);
        sys.increment_lhs(self.n1, self.n1, g);
        sys.increment_lhs(self.n2, self.n2, g);
        sys.increment_lhs(self.n1, self.n2, -g);
        sys.increment_lhs(self.n2, self.n1, -g);

        let v_prev = x_prev_timestep[self.n1] - x_prev_timestep[self.n2];
        sys.increment_rhs(self.n1, g * v_prev);
        sys.increment_rhs(self.n2, -g * v_prev);
    }
}

/// An inductor modeled with the backward-Euler companion resistance
/// `L/dt`, introducing an explicit branch-current unknown.
#[derive(Debug, Clone)]
pub struct Inductor {
    pub name: String,
    pub nodes: [NodeId; 2],
    pub inductance: f64,
    n1: usize,
    n2: usize,
    ni: usize,
}

impl Inductor {
    pub fn new(name: impl Into<String>, npos: NodeId, nneg: NodeId, inductance: f64) -> Self {
        let name = name.into();
        Self {
            name,
            nodes: [npos, nneg],
            inductance,
            n1: 0,
            n2: 0,
            ni: 0,
        }
    }

    fn branch_unknown(&self) -> Unknown {
        Unknown::current(format!("L:{}", self.name))
    }

    pub fn unknowns(&self) -> Vec<Unknown> {
        vec![
            Unknown::voltage(self.nodes[0]),
            Unknown::voltage(self.nodes[1]),
            self.branch_unknown(),
        ]
    }

    pub fn bind(&mut self, registry: &UnknownRegistry) -> Result<()> {
        self.n1 = registry.lookup(&Unknown::voltage(self.nodes[0]))?;
        self.n2 = registry.lookup(&Unknown::voltage(self.nodes[1]))?;
        self.ni = registry.lookup(&self.branch_unknown())?;
        Ok(())
    }

    pub fn stamp(&self, sys: &mut LinearSystem, x_prev_timestep: &[f64], _x_prev_newton: &[f64], dt: f64) {
        let r_eq = self.inductance / dt;

        sys.increment_lhs(self.n1, self.ni, 1.0);
        sys.increment_lhs(self.n2, self.ni, -1.0);
        sys.increment_lhs(self.ni, self.n1, -1.0);
        sys.increment_lhs(self.ni, self.n2, 1.0);
        sys.increment_lhs(self.ni, self.ni, r_eq);

        sys.increment_rhs(self.n1, -x_prev_timestep[self.ni]);
        sys.increment_rhs(self.n2, x_prev_timestep[self.ni]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound_resistor() -> Resistor {
        let mut registry = UnknownRegistry::new();
        registry.register(Unknown::voltage(NodeId(1))).unwrap();
        registry.register(Unknown::voltage(NodeId(0))).unwrap();
        registry.freeze();
        let mut r = Resistor::new("R1", NodeId(1), NodeId(0), 1000.0);
        r.bind(&registry).unwrap();
        r
    }

    #[test]
    fn resistor_conductance() {
        let r = bound_resistor();
        assert!((r.conductance() - 0.001).abs() < 1e-12);
    }

    #[test]
    fn capacitor_companion_conductance() {
        let c = Capacitor::new("C1", NodeId(1), NodeId(0), 1e-6);
        let dt = 1.0 / 44100.0;
        // G = C/dt (backward-Euler, not the trapezoidal 2C/dt)
        assert!((c.conductance(dt) - 1e-6 * 44100.0).abs() < 1e-9);
    }

    #[test]
    fn inductor_introduces_branch_current() {
        let l = Inductor::new("L1", NodeId(1), NodeId(2), 1e-3);
        let unknowns = l.unknowns();
        assert_eq!(unknowns.len(), 3);
        assert!(unknowns.contains(&Unknown::current("L:L1")));
    }
}
