//! # ampsim_core
//!
//! A transient nodal-analysis simulator for analog audio-effect circuits.
//!
//! This library provides:
//! - A line-oriented netlist format describing resistors, capacitors,
//!   inductors, diodes, DC sources, and the circuit's audio input/output
//!   terminals.
//! - Per-sample Newton-Raphson transient analysis of the resulting KCL
//!   system, with backward-Euler companion models for reactive elements.
//! - A thin audio-boundary contract (`AudioSource`/`AudioSink`) so the
//!   engine can be driven by any concrete source of samples.
//!
//! ## Architecture
//!
//! - [`netlist`] - parses the netlist text format into a [`Circuit`]
//! - [`circuit`] - the unknown registry and circuit graph
//! - [`components`] - component stamping models (R, C, L, diode, sources)
//! - [`solver`] - the per-sample linear system and the transient driver
//! - [`audio`] - the `AudioSource`/`AudioSink` contract and a raw-PCM CLI adapter
//!
//! ## Usage
//!
//! ```bash
//! ffmpeg -i input.wav -f f32le -ac 1 -ar 48000 - | ampsim circuit.net | ffmpeg -f f32le -ac 1 -ar 48000 -i - output.wav
//! ```
//!
//! ## Circuit simulation method
//!
//! For each time step `dt = 1/sample_rate`:
//!
//! 1. Stamp every component's contribution into the KCL matrix `A` and
//!    RHS vector `B`, linearizing nonlinear devices around the previous
//!    Newton iterate.
//! 2. Solve `A x = B` for node voltages and branch currents.
//! 3. Repeat until the Newton step converges or `MAX_ITER` is reached,
//!    then commit the iterate as the state for the next sample.
//!
//! Capacitors and inductors are discretized with the backward-Euler
//! companion model, so every per-sample system is linear apart from the
//! diode's Newton linearization.

pub mod audio;
pub mod circuit;
pub mod components;
pub mod error;
pub mod netlist;
pub mod solver;

// Re-export main types for convenience.
pub use circuit::Circuit;
pub use error::{Result, SimError};
pub use solver::{Simulator, SimulatorConfig};

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: f64 = 48_000.0;
