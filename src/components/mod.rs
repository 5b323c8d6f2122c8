//! Component models for circuit simulation.
//!
//! This module provides models for every component the netlist format
//! supports: the linear passives (`Resistor`, `Capacitor`, `Inductor`),
//! the one nonlinear device (`Diode`), and the three source/probe
//! components (`DcInput`, `VoltageIn`, `VoltageOut`).
//!
//! Each variant implements the stamping contract: `unknowns()` during
//! circuit build, `bind()` once after the unknown registry is frozen, and
//! `stamp()` on every Newton iteration of every sample.

mod diode;
mod linear;
mod sources;

pub use diode::{Diode, DiodeParams};
pub use linear::{Capacitor, Inductor, Resistor};
pub use sources::{DcInput, VoltageIn, VoltageOut};

use crate::circuit::{Unknown, UnknownRegistry};
use crate::error::Result;
use crate::solver::LinearSystem;

/// A circuit component.
#[derive(Debug, Clone)]
pub enum Component {
    Resistor(Resistor),
    Capacitor(Capacitor),
    Inductor(Inductor),
    Diode(Diode),
    DcInput(DcInput),
    VoltageIn(VoltageIn),
    VoltageOut(VoltageOut),
}

impl Component {
    /// The component's name, as declared in the netlist.
    pub fn name(&self) -> &str {
        match self {
            Component::Resistor(c) => &c.name,
            Component::Capacitor(c) => &c.name,
            Component::Inductor(c) => &c.name,
            Component::Diode(c) => &c.name,
            Component::DcInput(c) => &c.name,
            Component::VoltageIn(c) => &c.name,
            Component::VoltageOut(c) => &c.name,
        }
    }

    /// The unknowns this component introduces, for registration during
    /// circuit build.
    pub fn unknowns(&self) -> Vec<Unknown> {
        match self {
            Component::Resistor(c) => c.unknowns(),
            Component::Capacitor(c) => c.unknowns(),
            Component::Inductor(c) => c.unknowns(),
            Component::Diode(c) => c.unknowns(),
            Component::DcInput(c) => c.unknowns(),
            Component::VoltageIn(c) => c.unknowns(),
            Component::VoltageOut(c) => c.unknowns(),
        }
    }

    /// Cache this component's matrix indices. Must run once, after the
    /// unknown registry has been frozen.
    pub fn bind(&mut self, registry: &UnknownRegistry) -> Result<()> {
        match self {
            Component::Resistor(c) => c.bind(registry),
            Component::Capacitor(c) => c.bind(registry),
            Component::Inductor(c) => c.bind(registry),
            Component::Diode(c) => c.bind(registry),
            Component::DcInput(c) => c.bind(registry),
            Component::VoltageIn(c) => c.bind(registry),
            Component::VoltageOut(c) => c.bind(registry),
        }
    }

    /// Contribute this component's stamp to `sys`. Pure: reads
    /// `x_prev_timestep`/`x_prev_newton`, writes only `sys`.
    pub fn stamp(&self, sys: &mut LinearSystem, x_prev_timestep: &[f64], x_prev_newton: &[f64], dt: f64) {
        match self {
            Component::Resistor(c) => c.stamp(sys, x_prev_timestep, x_prev_newton, dt),
            Component::Capacitor(c) => c.stamp(sys, x_prev_timestep, x_prev_newton, dt),
            Component::Inductor(c) => c.stamp(sys, x_prev_timestep, x_prev_newton, dt),
            Component::Diode(c) => c.stamp(sys, x_prev_timestep, x_prev_newton, dt),
            Component::DcInput(c) => c.stamp(sys, x_prev_timestep, x_prev_newton, dt),
            Component::VoltageIn(c) => c.stamp(sys, x_prev_timestep, x_prev_newton, dt),
            // VoltageOut contributes no stamp; it only probes the solution.
            Component::VoltageOut(_) => {}
        }
    }
}
