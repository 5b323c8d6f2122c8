//! Voltage sources and the circuit's input/output terminals.
//!
//! `DcInput` and `VoltageIn` both enforce `V(npos) - V(nneg) = V_enforced`
//! through a branch-current unknown; they differ only in where the
//! enforced voltage comes from (a netlist constant vs. the streamed audio
//! sample pulled once per sample). `VoltageOut` introduces no unknowns —
//! it only measures an existing voltage difference.

use crate::circuit::{NodeId, Unknown, UnknownRegistry};
use crate::error::Result;
use crate::solver::LinearSystem;

/// Stamp the branch-current constraint `V(n1) - V(n2) = v_enforced` shared
/// by [`DcInput`] and [`VoltageIn`].
fn stamp_voltage_constraint(
    sys: &mut LinearSystem,
    n1: usize,
    n2: usize,
    ni: usize,
    v_enforced: f64,
    x_prev_newton: &[f64],
) {
    sys.increment_lhs(ni, n1, 1.0);
    sys.increment_lhs(ni, n2, -1.0);
    sys.increment_lhs(n1, ni, -1.0);
    sys.increment_lhs(n2, ni, 1.0);

    sys.increment_rhs(ni, v_enforced - (x_prev_newton[n1] - x_prev_newton[n2]));
    sys.increment_rhs(n1, x_prev_newton[ni]);
    sys.increment_rhs(n2, -x_prev_newton[ni]);
}

/// A constant DC voltage source, as parsed from a `DC_INPUT` netlist line.
#[derive(Debug, Clone)]
pub struct DcInput {
    pub name: String,
    pub nodes: [NodeId; 2], // [npos, nneg]
    pub voltage: f64,
    n1: usize,
    n2: usize,
    ni: usize,
}

impl DcInput {
    pub fn new(name: impl Into<String>, npos: NodeId, nneg: NodeId, voltage: f64) -> Self {
        let name = name.into();
        Self {
            name,
            nodes: [npos, nneg],
            voltage,
            n1: 0,
            n2: 0,
            ni: 0,
        }
    }

    fn branch_unknown(&self) -> Unknown {
        Unknown::current(format!("dc:{}", self.name))
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

    pub fn stamp(&self, sys: &mut LinearSystem, _x_prev_timestep: &[f64], x_prev_newton: &[f64], _dt: f64) {
        stamp_voltage_constraint(sys, self.n1, self.n2, self.ni, self.voltage, x_prev_newton);
    }
}

/// The circuit's unique audio input terminal.
///
/// Enforces `V(npos) - V(nneg) = v_in`, where `v_in` is pulled once per
/// sample from the external audio source and cached here by
/// [`VoltageIn::set_input`] before the Newton loop starts.
#[derive(Debug, Clone)]
pub struct VoltageIn {
    pub name: String,
    pub nodes: [NodeId; 2], // [npos, nneg]
    input_voltage: f64,
    n1: usize,
    n2: usize,
    ni: usize,
}

impl VoltageIn {
    pub fn new(name: impl Into<String>, npos: NodeId, nneg: NodeId) -> Self {
        Self {
            name: name.into(),
            nodes: [npos, nneg],
            input_voltage: 0.0,
            n1: 0,
            n2: 0,
            ni: 0,
        }
    }

    fn branch_unknown(&self) -> Unknown {
        Unknown::current("vin")
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

    /// Cache the current sample's input voltage, pulled from the audio
    /// source once per sample by the transient driver.
    pub fn set_input(&mut self, voltage: f64) {
        self.input_voltage = voltage;
    }

    pub fn stamp(&self, sys: &mut LinearSystem, _x_prev_timestep: &[f64], x_prev_newton: &[f64], _dt: f64) {
        stamp_voltage_constraint(sys, self.n1, self.n2, self.ni, self.input_voltage, x_prev_newton);
    }
}

/// The circuit's unique audio output probe.
///
/// Contributes no stamp; the transient driver reads [`VoltageOut::measure`]
/// once per sample after the Newton loop converges.
#[derive(Debug, Clone)]
pub struct VoltageOut {
    pub name: String,
    pub nodes: [NodeId; 2], // [npos, nneg]
    n1: usize,
    n2: usize,
}

impl VoltageOut {
    pub fn new(name: impl Into<String>, npos: NodeId, nneg: NodeId) -> Self {
        Self {
            name: name.into(),
            nodes: [npos, nneg],
            n1: 0,
            n2: 0,
        }
    }

    pub fn unknowns(&self) -> Vec<Unknown> {
        vec![Unknown::voltage(self.nodes[0]), Unknown::voltage(self.nodes[1])]
    }

    pub fn bind(&mut self, registry: &UnknownRegistry) -> Result<()> {
        self.n1 = registry.lookup(&Unknown::voltage(self.nodes[0]))?;
        self.n2 = registry.lookup(&Unknown::voltage(self.nodes[1]))?;
        Ok(())
    }

    /// `x[n1] - x[n2]`, the output sample.
    pub fn measure(&self, x: &[f64]) -> f64 {
        x[self.n1] - x[self.n2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voltage_in_branch_unknown_is_fixed_name() {
        let vin = VoltageIn::new("vin1", NodeId(1), NodeId(0));
        assert!(vin.unknowns().contains(&Unknown::current("vin")));
    }

    #[test]
    fn dc_input_branch_unknown_is_per_component() {
        let dc = DcInput::new("VB", NodeId(2), NodeId(0), 9.0);
        assert!(dc.unknowns().contains(&Unknown::current("dc:VB")));
    }
}
