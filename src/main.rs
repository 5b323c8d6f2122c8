//! ampsim - transient circuit simulator CLI.
//!
//! Reads raw little-endian `f32` PCM samples from stdin, runs them through
//! a netlist's transient analysis, and writes the output samples to
//! stdout as raw `f32` PCM:
//!
//! ```bash
//! ffmpeg -i input.wav -f f32le -ac 1 -ar 48000 - | ampsim circuit.net | ffmpeg -f f32le -ac 1 -ar 48000 -i - output.wav
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use ampsim_core::audio::{StdinPcmSource, StdoutPcmSink};
use ampsim_core::error::Result;
use ampsim_core::{netlist, Simulator, SimulatorConfig, DEFAULT_SAMPLE_RATE};
use clap::Parser;

/// Transient nodal-analysis simulator for analog audio-effect circuits.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the circuit netlist file.
    #[arg(value_name = "NETLIST_FILE")]
    netlist_file: PathBuf,

    /// Sample rate in Hz.
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: f64,

    /// Maximum Newton-Raphson iterations per sample.
    #[arg(long, default_value_t = ampsim_core::solver::MAX_ITER)]
    max_iterations: usize,

    /// Newton-Raphson convergence tolerance.
    #[arg(long, default_value_t = ampsim_core::solver::DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Increase logging verbosity (repeatable: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all logging below errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        log::LevelFilter::Error
    } else {
        match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn run(args: Args) -> Result<()> {
    let circuit = netlist::parse_file(&args.netlist_file)?;

    let config = SimulatorConfig::new()
        .with_max_iterations(args.max_iterations)
        .with_tolerance(args.tolerance);
    let mut simulator = Simulator::with_config(circuit, config);

    let mut source = StdinPcmSource::new(args.sample_rate);
    let mut sink = StdoutPcmSink::new();
    simulator.transient(&mut source, &mut sink)
}
