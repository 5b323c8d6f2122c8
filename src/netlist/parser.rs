//! Dispatches tokenized netlist lines to component constructors and
//! assembles a finalized [`Circuit`].

use std::path::Path;

use super::lexer::{parse_node_id, parse_value, tokenize_line};
use crate::circuit::{validate_circuit, Circuit, NodeId};
use crate::components::{Capacitor, Component, DcInput, Diode, DiodeParams, Inductor, Resistor, VoltageIn, VoltageOut};
use crate::error::{Result, SimError};

/// Parse a netlist string into a finalized, validated [`Circuit`].
pub fn parse(source: &str) -> Result<Circuit> {
    let mut circuit = Circuit::new();

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let tokens = tokenize_line(line);
        if tokens.is_empty() {
            continue;
        }

        dispatch(&mut circuit, &tokens, line_no)?;
    }

    circuit.finalize()?;
    validate_circuit(&circuit)?;
    Ok(circuit)
}

/// Parse a netlist file into a finalized, validated [`Circuit`].
#[cfg(feature = "cli")]
pub fn parse_file(path: &Path) -> Result<Circuit> {
    let content = std::fs::read_to_string(path).map_err(|e| SimError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

fn dispatch(circuit: &mut Circuit, tokens: &[&str], line: usize) -> Result<()> {
    let keyword = tokens[0].to_ascii_uppercase();

    match keyword.as_str() {
        "GROUND" => {
            let id = require(tokens, 1, "GROUND", line)?;
            circuit.register_ground(NodeId(parse_node_id(id, line)?))
        }
        "RESISTOR" => {
            let (name, npos, nneg, value) = component_fields(tokens, line)?;
            circuit.register_component(Component::Resistor(Resistor::new(name, npos, nneg, value)))
        }
        "CAPACITOR" => {
            let (name, npos, nneg, value) = component_fields(tokens, line)?;
            circuit.register_component(Component::Capacitor(Capacitor::new(name, npos, nneg, value)))
        }
        "INDUCTOR" => {
            let (name, npos, nneg, value) = component_fields(tokens, line)?;
            circuit.register_component(Component::Inductor(Inductor::new(name, npos, nneg, value)))
        }
        "DIODE" => {
            let name = require(tokens, 1, "DIODE", line)?.to_string();
            let npos = NodeId(parse_node_id(require(tokens, 2, "DIODE", line)?, line)?);
            let nneg = NodeId(parse_node_id(require(tokens, 3, "DIODE", line)?, line)?);
            circuit.register_component(Component::Diode(Diode::new(name, npos, nneg, DiodeParams::default())))
        }
        "DC_INPUT" => {
            let (name, npos, nneg, value) = component_fields(tokens, line)?;
            circuit.register_component(Component::DcInput(DcInput::new(name, npos, nneg, value)))
        }
        "VOLTAGE_IN" => {
            let name = require(tokens, 1, "VOLTAGE_IN", line)?.to_string();
            let npos = NodeId(parse_node_id(require(tokens, 2, "VOLTAGE_IN", line)?, line)?);
            let nneg = NodeId(parse_node_id(require(tokens, 3, "VOLTAGE_IN", line)?, line)?);
            circuit.register_component(Component::VoltageIn(VoltageIn::new(name, npos, nneg)))
        }
        "VOLTAGE_OUT" => {
            let name = require(tokens, 1, "VOLTAGE_OUT", line)?.to_string();
            let npos = NodeId(parse_node_id(require(tokens, 2, "VOLTAGE_OUT", line)?, line)?);
            let nneg = NodeId(parse_node_id(require(tokens, 3, "VOLTAGE_OUT", line)?, line)?);
            circuit.register_component(Component::VoltageOut(VoltageOut::new(name, npos, nneg)))
        }
        other => Err(SimError::netlist(line, format!("unknown directive '{other}'"))),
    }
}

/// Pull the four common fields (`name npos nneg value`) shared by
/// `RESISTOR`/`CAPACITOR`/`INDUCTOR`/`DC_INPUT`.
fn component_fields(tokens: &[&str], line: usize) -> Result<(String, NodeId, NodeId, f64)> {
    let keyword = tokens[0];
    let name = require(tokens, 1, keyword, line)?.to_string();
    let npos = NodeId(parse_node_id(require(tokens, 2, keyword, line)?, line)?);
    let nneg = NodeId(parse_node_id(require(tokens, 3, keyword, line)?, line)?);
    let value = parse_value(require(tokens, 4, keyword, line)?, line)?;
    Ok((name, npos, nneg, value))
}

fn require<'a>(tokens: &[&'a str], index: usize, keyword: &str, line: usize) -> Result<&'a str> {
    tokens
        .get(index)
        .copied()
        .ok_or_else(|| SimError::netlist(line, format!("{keyword} requires at least {index} argument(s)")))
}
