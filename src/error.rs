//! Error types for the transient circuit simulator.
//!
//! This module provides a unified error type [`SimError`] that covers
//! all error conditions that can occur during netlist parsing, circuit
//! validation, and transient simulation.

use thiserror::Error;

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

/// Unified error type for all simulator operations.
#[derive(Error, Debug)]
pub enum SimError {
    // ============ Netlist Errors ============
    /// Malformed token on a netlist line.
    #[error("netlist error at line {line}: {message}")]
    NetlistError { line: usize, message: String },

    /// A component referenced an unresolvable unit suffix.
    #[error("netlist error at line {line}: unknown unit suffix '{suffix}'")]
    UnknownUnitSuffix { line: usize, suffix: String },

    /// No `GROUND` directive was present.
    #[error("circuit has no ground node (use 'GROUND <id>')")]
    MissingGround,

    /// No `VOLTAGE_IN` component was present.
    #[error("no VOLTAGE_IN component specified")]
    MissingInput,

    /// No `VOLTAGE_OUT` component was present.
    #[error("no VOLTAGE_OUT component specified")]
    MissingOutput,

    /// More than one `VOLTAGE_IN`/`VOLTAGE_OUT` was declared.
    #[error("duplicate {kind} component '{name}' (only one is allowed per circuit)")]
    DuplicateSingleton { kind: &'static str, name: String },

    /// Invalid circuit topology (empty circuit, input/output tied to ground).
    #[error("invalid circuit topology: {message}")]
    InvalidTopology { message: String },

    // ============ Registry Errors (programming errors) ============
    /// Lookup of an unknown that was never registered.
    #[error("unknown '{label}' was never registered")]
    UnknownNotFound { label: String },

    /// Attempt to register a new unknown after the registry was frozen.
    #[error("cannot register '{label}': unknown registry is already frozen")]
    RegistryFrozen { label: String },

    // ============ I/O Errors ============
    /// Error reading the netlist file.
    #[error("failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error reading audio input.
    #[error("audio input error: {message}")]
    AudioInputError { message: String },
}

impl SimError {
    /// Create a netlist error.
    pub fn netlist(line: usize, message: impl Into<String>) -> Self {
        Self::NetlistError {
            line,
            message: message.into(),
        }
    }
}
