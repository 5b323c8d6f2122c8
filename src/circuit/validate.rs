//! Circuit validation.

use crate::error::{Result, SimError};

use super::Circuit;

/// Validate a circuit's topology before simulation.
///
/// Checks:
/// - At least one component is present
/// - A ground node was declared
/// - Exactly one `VOLTAGE_IN` and one `VOLTAGE_OUT` are present
///
/// Duplicate `VOLTAGE_IN`/`VOLTAGE_OUT` declarations are rejected earlier,
/// at registration time (see [`Circuit::register_component`]); this pass
/// catches the complementary case of *missing* singletons.
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    if circuit.components.is_empty() {
        return Err(SimError::InvalidTopology {
            message: "circuit has no components".to_string(),
        });
    }

    if circuit.ground_node().is_none() {
        return Err(SimError::MissingGround);
    }

    if circuit.voltage_in().is_none() {
        return Err(SimError::MissingInput);
    }

    if circuit.voltage_out().is_none() {
        return Err(SimError::MissingOutput);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::NodeId;
    use crate::components::{Component, VoltageIn, VoltageOut};

    #[test]
    fn empty_circuit_is_rejected() {
        let circuit = Circuit::new();
        let err = validate_circuit(&circuit).unwrap_err();
        assert!(matches!(err, SimError::InvalidTopology { .. }));
    }

    #[test]
    fn missing_input_is_rejected() {
        let mut circuit = Circuit::new();
        circuit.register_ground(NodeId(0)).unwrap();
        circuit
            .register_component(Component::VoltageOut(VoltageOut::new(
                "vout",
                NodeId(1),
                NodeId(0),
            )))
            .unwrap();
        let err = validate_circuit(&circuit).unwrap_err();
        assert!(matches!(err, SimError::MissingInput));
    }

    #[test]
    fn missing_output_is_rejected() {
        let mut circuit = Circuit::new();
        circuit.register_ground(NodeId(0)).unwrap();
        circuit
            .register_component(Component::VoltageIn(VoltageIn::new(
                "vin",
                NodeId(1),
                NodeId(0),
            )))
            .unwrap();
        let err = validate_circuit(&circuit).unwrap_err();
        assert!(matches!(err, SimError::MissingOutput));
    }

    #[test]
    fn complete_circuit_is_accepted() {
        let mut circuit = Circuit::new();
        circuit.register_ground(NodeId(0)).unwrap();
        circuit
            .register_component(Component::VoltageIn(VoltageIn::new(
                "vin",
                NodeId(1),
                NodeId(0),
            )))
            .unwrap();
        circuit
            .register_component(Component::VoltageOut(VoltageOut::new(
                "vout",
                NodeId(1),
                NodeId(0),
            )))
            .unwrap();
        assert!(validate_circuit(&circuit).is_ok());
    }
}
