//! Circuit graph structure.

use super::registry::UnknownRegistry;
use super::types::{NodeId, Unknown};
use crate::components::Component;
use crate::error::{Result, SimError};

/// A complete circuit ready for transient simulation.
///
/// Built once by the netlist loader via the `register_*` methods, then
/// [`finalize`]d (which freezes the unknown registry and binds every
/// component's cached indices). Immutable in structure for the lifetime of
/// a [`crate::solver::Simulator`] run — only component *state* (reactive
/// history, diode operating points, source values) mutates per sample.
///
/// [`finalize`]: Circuit::finalize
#[derive(Debug)]
pub struct Circuit {
    /// All components, in netlist declaration order.
    pub components: Vec<Component>,

    /// Registry mapping symbolic unknowns to dense matrix indices.
    registry: UnknownRegistry,

    /// The designated ground node, if one has been declared.
    ground_node: Option<NodeId>,

    /// Matrix index of `V(ground)`, set once the registry is frozen.
    ground_index: Option<usize>,

    /// Index into `components` of the unique `VoltageIn`.
    vin_index: Option<usize>,

    /// Index into `components` of the unique `VoltageOut`.
    vout_index: Option<usize>,
}

impl Circuit {
    /// Create an empty circuit with no components and no declared ground.
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            registry: UnknownRegistry::new(),
            ground_node: None,
            ground_index: None,
            vin_index: None,
            vout_index: None,
        }
    }

    /// Declare the ground node. The ground node's `V(ground)` unknown is
    /// registered immediately so that index 0 is reliably available even
    /// for circuits whose only reference to ground is implicit.
    pub fn register_ground(&mut self, id: NodeId) -> Result<()> {
        self.ground_node = Some(id);
        self.registry.register(Unknown::voltage(id))?;
        Ok(())
    }

    /// Append a component to the circuit, registering every unknown it
    /// introduces. Tracks the unique `VoltageIn`/`VoltageOut` by index.
    pub fn register_component(&mut self, component: Component) -> Result<()> {
        for unknown in component.unknowns() {
            self.registry.register(unknown)?;
        }

        let idx = self.components.len();
        match &component {
            Component::VoltageIn(_) => {
                if self.vin_index.is_some() {
                    return Err(SimError::DuplicateSingleton {
                        kind: "VOLTAGE_IN",
                        name: component.name().to_string(),
                    });
                }
                self.vin_index = Some(idx);
            }
            Component::VoltageOut(_) => {
                if self.vout_index.is_some() {
                    return Err(SimError::DuplicateSingleton {
                        kind: "VOLTAGE_OUT",
                        name: component.name().to_string(),
                    });
                }
                self.vout_index = Some(idx);
            }
            _ => {}
        }

        self.components.push(component);
        Ok(())
    }

    /// Freeze the unknown registry and bind every component's cached
    /// indices. Must be called exactly once, after all components have
    /// been registered and before `transient`/`step` is used.
    pub fn finalize(&mut self) -> Result<()> {
        let ground_node = self.ground_node.ok_or(SimError::MissingGround)?;
        self.registry.freeze();

        let ground_index = self.registry.lookup(&Unknown::voltage(ground_node))?;
        self.ground_index = Some(ground_index);

        for component in &mut self.components {
            component.bind(&self.registry)?;
        }

        Ok(())
    }

    /// Total number of unknowns (matrix dimension `N`).
    pub fn num_unknowns(&self) -> usize {
        self.registry.len()
    }

    /// Matrix index of the ground node's voltage unknown.
    ///
    /// Panics if called before [`finalize`](Circuit::finalize).
    pub fn ground_index(&self) -> usize {
        self.ground_index.expect("circuit not finalized")
    }

    /// The declared ground node, if any.
    pub fn ground_node(&self) -> Option<NodeId> {
        self.ground_node
    }

    /// The unique `VoltageIn` component, if registered.
    pub fn voltage_in(&self) -> Option<&Component> {
        self.vin_index.map(|i| &self.components[i])
    }

    /// Mutable access to the unique `VoltageIn` component, if registered.
    pub fn voltage_in_mut(&mut self) -> Option<&mut Component> {
        self.vin_index.map(move |i| &mut self.components[i])
    }

    /// The unique `VoltageOut` component, if registered.
    pub fn voltage_out(&self) -> Option<&Component> {
        self.vout_index.map(|i| &self.components[i])
    }

    /// Look up an unknown's index. Intended for tests and diagnostics;
    /// components should rely on indices cached in `bind()` instead.
    pub fn unknown_index(&self, unknown: &Unknown) -> Result<usize> {
        self.registry.lookup(unknown)
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}
