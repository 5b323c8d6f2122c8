//! The transient driver: the per-sample Newton loop that ties the circuit,
//! the linear system, and the audio boundary together.

use log::{debug, info, warn};

use crate::audio::{AudioSink, AudioSource};
use crate::circuit::Circuit;
use crate::components::Component;
use crate::error::Result;

use super::linear_system::LinearSystem;
use super::newton::{update_and_check, DEFAULT_TOLERANCE, MAX_ITER};

/// Tunables for the Newton-Raphson loop.
#[derive(Debug, Clone, Copy)]
pub struct SimulatorConfig {
    /// Maximum Newton-Raphson iterations per sample.
    pub max_iterations: usize,
    /// Convergence tolerance on `max_i |delta_i|`.
    pub tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SimulatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Owns a finalized [`Circuit`] and runs its transient analysis against an
/// [`AudioSource`]/[`AudioSink`] pair.
pub struct Simulator {
    circuit: Circuit,
    config: SimulatorConfig,
}

impl Simulator {
    /// Wrap an already-[`finalize`](Circuit::finalize)d circuit with the
    /// default Newton configuration.
    pub fn new(circuit: Circuit) -> Self {
        Self::with_config(circuit, SimulatorConfig::default())
    }

    /// Wrap an already-finalized circuit with a custom Newton
    /// configuration.
    pub fn with_config(circuit: Circuit, config: SimulatorConfig) -> Self {
        Self { circuit, config }
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Run the transient analysis: pull samples from `source` until
    /// exhausted or cancelled, pushing one output sample per input sample
    /// to `sink`.
    ///
    /// Per-sample loop: freeze `x_prev_timestep`, warm-start the Newton
    /// iterate from it, re-stamp and re-solve up to `max_iterations` times,
    /// commit whatever iterate is reached (converged or not) as the next
    /// sample's starting state, and emit the output probe. A Newton step
    /// whose delta contains NaN is treated as converged by design — the
    /// audio stream must keep flowing rather than abort on one bad sample.
    pub fn transient<S: AudioSource, K: AudioSink>(&mut self, source: &mut S, sink: &mut K) -> Result<()> {
        let dt = source.sampling_period();
        let n = self.circuit.num_unknowns();
        let mut sys = LinearSystem::new(n, self.circuit.ground_index());
        let mut x = vec![0.0; n];

        info!(
            "transient run starting: {} unknowns, {:.1} Hz sample rate",
            n,
            1.0 / dt
        );
        let start = std::time::Instant::now();

        let mut samples_processed: u64 = 0;
        let mut warned_nonconvergence = false;
        let mut warned_nan = false;

        while let Some(v_in) = source.next_sample() {
            if let Some(Component::VoltageIn(vin)) = self.circuit.voltage_in_mut() {
                vin.set_input(v_in);
            }

            let x_prev_timestep = x.clone();
            let mut x_newton = x_prev_timestep.clone();
            let mut converged = false;
            let mut iterations_used = 0usize;

            for iter in 0..self.config.max_iterations {
                sys.clear();
                for component in &self.circuit.components {
                    component.stamp(&mut sys, &x_prev_timestep, &x_newton, dt);
                }
                let delta = sys.solve();
                let (step_converged, m) = update_and_check(&mut x_newton, delta, self.config.tolerance);
                iterations_used = iter + 1;

                if m.is_nan() && !warned_nan {
                    warn!(
                        "NaN Newton delta at sample {} (iteration {}); treating as converged",
                        samples_processed, iterations_used
                    );
                    warned_nan = true;
                }

                converged = step_converged;
                if converged {
                    break;
                }
            }

            if !converged && !warned_nonconvergence {
                warn!(
                    "Newton-Raphson did not converge within {} iterations at sample {}",
                    self.config.max_iterations, samples_processed
                );
                warned_nonconvergence = true;
            }

            debug!(
                "sample {}: {} Newton iteration(s), converged={}",
                samples_processed, iterations_used, converged
            );

            x = x_newton;

            if let Some(Component::VoltageOut(vout)) = self.circuit.voltage_out() {
                sink.emit(vout.measure(&x));
            }

            samples_processed += 1;
        }

        sink.finish();
        info!(
            "transient run complete: {} samples in {:.3}s",
            samples_processed,
            start.elapsed().as_secs_f64()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::NodeId;
    use crate::components::{Resistor, VoltageIn, VoltageOut};

    struct FixedSource {
        samples: std::vec::IntoIter<f64>,
        dt: f64,
    }

    impl AudioSource for FixedSource {
        fn next_sample(&mut self) -> Option<f64> {
            self.samples.next()
        }
        fn sampling_period(&self) -> f64 {
            self.dt
        }
    }

    #[derive(Default)]
    struct VecSink {
        samples: Vec<f64>,
        finished: bool,
    }

    impl AudioSink for VecSink {
        fn emit(&mut self, sample: f64) {
            self.samples.push(sample);
        }
        fn finish(&mut self) {
            self.finished = true;
        }
    }

    fn wire_through_circuit() -> Circuit {
        let mut circuit = Circuit::new();
        circuit.register_ground(NodeId(0)).unwrap();
        circuit
            .register_component(Component::VoltageIn(VoltageIn::new("vin", NodeId(1), NodeId(0))))
            .unwrap();
        circuit
            .register_component(Component::VoltageOut(VoltageOut::new(
                "vout",
                NodeId(1),
                NodeId(0),
            )))
            .unwrap();
        circuit.finalize().unwrap();
        circuit
    }

    #[test]
    fn wire_through_reproduces_input() {
        let circuit = wire_through_circuit();
        let mut sim = Simulator::new(circuit);
        let mut source = FixedSource {
            samples: vec![0.0, 0.5, -0.5, 1.0, -1.0].into_iter(),
            dt: 1.0 / 44100.0,
        };
        let mut sink = VecSink::default();

        sim.transient(&mut source, &mut sink).unwrap();

        assert!(sink.finished);
        assert_eq!(sink.samples.len(), 5);
        for (got, want) in sink.samples.iter().zip([0.0, 0.5, -0.5, 1.0, -1.0]) {
            assert!((got - want).abs() < 1e-6, "{got} != {want}");
        }
    }

    #[test]
    fn resistor_divider_halves_the_input() {
        let mut circuit = Circuit::new();
        circuit.register_ground(NodeId(0)).unwrap();
        circuit
            .register_component(Component::VoltageIn(VoltageIn::new("vin", NodeId(1), NodeId(0))))
            .unwrap();
        circuit
            .register_component(Component::Resistor(Resistor::new(
                "R1",
                NodeId(1),
                NodeId(2),
                1000.0,
            )))
            .unwrap();
        circuit
            .register_component(Component::Resistor(Resistor::new(
                "R2",
                NodeId(2),
                NodeId(0),
                1000.0,
            )))
            .unwrap();
        circuit
            .register_component(Component::VoltageOut(VoltageOut::new(
                "vout",
                NodeId(2),
                NodeId(0),
            )))
            .unwrap();
        circuit.finalize().unwrap();

        let mut sim = Simulator::new(circuit);
        let mut source = FixedSource {
            samples: vec![1.0].into_iter(),
            dt: 1.0 / 44100.0,
        };
        let mut sink = VecSink::default();
        sim.transient(&mut source, &mut sink).unwrap();

        assert!((sink.samples[0] - 0.5).abs() < 1e-6);
    }
}
