//! Diode model.
//!
//! Shockley equation: `I = Is * (exp(V / (N*Vt)) - 1)`. Linearized around
//! the previous Newton iterate each pass:
//!   `g = dI/dV |_{V0} = (Is/(N*Vt)) * exp(V0/(N*Vt))`
//!   `i0 = Is * (exp(V0/(N*Vt)) - 1)`
//! and stamped as a conductance plus a companion current source so the
//! linearized equation `I ≈ i0 + g*(V - V0)` holds exactly at `V0`.

use crate::circuit::{NodeId, Unknown, UnknownRegistry};
use crate::error::Result;
use crate::solver::LinearSystem;

/// Clamp applied to the exponent argument to keep `exp()` finite.
const MAX_EXPONENT: f64 = 40.0;

/// Parameters for the Shockley diode equation.
#[derive(Debug, Clone, Copy)]
pub struct DiodeParams {
    /// Saturation current (A).
    pub is: f64,
    /// Ideality factor.
    pub n: f64,
    /// Thermal voltage (V).
    pub vt: f64,
}

impl Default for DiodeParams {
    fn default() -> Self {
        Self {
            is: 1e-12,
            n: 1.5,
            vt: 0.026,
        }
    }
}

impl DiodeParams {
    pub fn n_vt(&self) -> f64 {
        self.n * self.vt
    }
}

/// A diode between anode (`npos`) and cathode (`nneg`).
#[derive(Debug, Clone)]
pub struct Diode {
    pub name: String,
    pub nodes: [NodeId; 2], // [anode, cathode]
    pub params: DiodeParams,
    n1: usize,
    n2: usize,
}

impl Diode {
    pub fn new(name: impl Into<String>, anode: NodeId, cathode: NodeId, params: DiodeParams) -> Self {
        Self {
            name: name.into(),
            nodes: [anode, cathode],
            params,
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

    /// Linearize the Shockley equation around `v0`, returning `(g, i0)`.
    fn linearize(&self, v0: f64) -> (f64, f64) {
        let n_vt = self.params.n_vt();
        let exponent = (v0 / n_vt).min(MAX_EXPONENT);
        let exp_v = exponent.exp();
        let g = self.params.is / n_vt * exp_v;
        let i0 = self.params.is * (exp_v - 1.0);
        (g, i0)
    }

    pub fn stamp(&self, sys: &mut LinearSystem, _x_prev_timestep: &[f64], x_prev_newton: &[f64], _dt: f64) {
        let v0 = x_prev_newton[self.n1] - x_prev_newton[self.n2];
        let (g, i0) = self.linearize(v0);

        sys.increment_lhs(self.n1, self.n1, g);
        sys.increment_lhs(self.n2, self.n2, g);
        sys.increment_lhs(self.n1, self.n2, -g);
        sys.increment_lhs(self.n2, self.n1, -g);

        sys.increment_rhs(self.n1, -i0);
        sys.increment_rhs(self.n2, i0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diode() -> Diode {
        Diode::new("D1", NodeId(1), NodeId(0), DiodeParams::default())
    }

    #[test]
    fn forward_bias_current_grows_with_voltage() {
        let d = diode();
        let (_, i_small) = d.linearize(0.3);
        let (_, i_large) = d.linearize(0.6);
        assert!(i_large > i_small * 10.0);
    }

    #[test]
    fn reverse_bias_approaches_negative_saturation_current() {
        let d = diode();
        let (_, i_rev) = d.linearize(-1.0);
        assert!(i_rev < 0.0);
        assert!(i_rev > -2.0 * d.params.is);
    }

    #[test]
    fn exponent_is_clamped_for_large_forward_bias() {
        let d = diode();
        let (g, i0) = d.linearize(100.0);
        assert!(g.is_finite());
        assert!(i0.is_finite());
    }
}
