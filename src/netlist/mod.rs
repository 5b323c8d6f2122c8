//! Netlist loading: the line-oriented text format described in the audio
//! engine's external interface.
//!
//! ```text
//! GROUND <id>
//! RESISTOR   <name> <npos> <nneg> <value>
//! CAPACITOR  <name> <npos> <nneg> <value>
//! INDUCTOR   <name> <npos> <nneg> <value>
//! DIODE      <name> <npos> <nneg>
//! DC_INPUT   <name> <npos> <nneg> <volts>
//! VOLTAGE_IN  <name> <npos> <nneg>
//! VOLTAGE_OUT <name> <npos> <nneg>
//! ```
//!
//! `#` starts a comment that runs to end-of-line; blank lines are ignored.
//! Numeric values may carry a unit suffix (see [`lexer::parse_value`]).

mod lexer;
mod parser;

pub use parser::{parse, parse_file};
