//! Transient nodal-analysis solver.
//!
//! ## Modified nodal analysis, ground-pinned
//!
//! Every sample assembles a dense `N x N` system `A x = B` covering all
//! node voltages and branch currents, including ground's own row (pinned
//! to `V(ground) = 0` rather than excluded from the system). Linear
//! components stamp directly; the one nonlinear device (the diode) is
//! linearized around the previous Newton iterate and re-stamped every
//! iteration.

mod linear_system;
mod newton;
mod simulator;

pub use linear_system::LinearSystem;
pub use newton::{update_and_check, DEFAULT_TOLERANCE, MAX_ITER};
pub use simulator::{Simulator, SimulatorConfig};
