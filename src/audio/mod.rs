//! Audio I/O boundary: the external collaborators the transient driver
//! pulls input from and pushes output to.
//!
//! The core engine only depends on the [`AudioSource`]/[`AudioSink`]
//! traits below; concrete adapters (raw f32 PCM over stdin/stdout here)
//! live in this module as the CLI's reference implementation. A hardware
//! backend would implement the same two traits behind a bounded buffered
//! channel from its capture/playback callback thread.

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Result, SimError};

/// Buffer size for block I/O (in samples).
pub const BUFFER_SIZE: usize = 256;

/// Supplies one input voltage sample at a time to `VoltageIn`.
pub trait AudioSource {
    /// The next input sample, or `None` on end-of-stream or cancellation.
    fn next_sample(&mut self) -> Option<f64>;

    /// Seconds per sample; constant for the life of a run.
    fn sampling_period(&self) -> f64;
}

/// Consumes one output voltage sample at a time from `VoltageOut`.
pub trait AudioSink {
    /// Enqueue one output sample.
    fn emit(&mut self, sample: f64);

    /// Flush and close. Called exactly once, after the source is
    /// exhausted or the run is cancelled.
    fn finish(&mut self);
}

/// Cooperative cancellation handle for a running `transient` loop.
///
/// Replaces the source program's process-wide `stop_simulation` flag with
/// an explicit, clonable handle: an external signal handler calls
/// [`cancel`](CancellationToken::cancel), and [`Cancellable`] checks it at
/// the top of every sample.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Wraps an [`AudioSource`] so that `next_sample` returns `None` once a
/// [`CancellationToken`] has been tripped, regardless of what the inner
/// source would otherwise yield.
pub struct Cancellable<S> {
    inner: S,
    token: CancellationToken,
}

impl<S: AudioSource> Cancellable<S> {
    pub fn new(inner: S, token: CancellationToken) -> Self {
        Self { inner, token }
    }
}

impl<S: AudioSource> AudioSource for Cancellable<S> {
    fn next_sample(&mut self) -> Option<f64> {
        if self.token.is_cancelled() {
            return None;
        }
        self.inner.next_sample()
    }

    fn sampling_period(&self) -> f64 {
        self.inner.sampling_period()
    }
}

/// Reads raw little-endian `f32` PCM samples from stdin, one sample at a
/// time, buffered in blocks of [`BUFFER_SIZE`].
pub struct StdinPcmSource {
    sample_rate: f64,
    buffer: Vec<f32>,
    pos: usize,
    filled: usize,
    exhausted: bool,
}

impl StdinPcmSource {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            buffer: vec![0.0; BUFFER_SIZE],
            pos: 0,
            filled: 0,
            exhausted: false,
        }
    }

    fn refill(&mut self) -> Result<()> {
        let mut bytes = vec![0u8; BUFFER_SIZE * 4];
        let bytes_read = io::stdin()
            .read(&mut bytes)
            .map_err(|e| SimError::AudioInputError {
                message: e.to_string(),
            })?;

        if bytes_read == 0 {
            self.exhausted = true;
            self.filled = 0;
            self.pos = 0;
            return Ok(());
        }

        let samples_read = bytes_read / 4;
        for i in 0..samples_read {
            let b = [bytes[i * 4], bytes[i * 4 + 1], bytes[i * 4 + 2], bytes[i * 4 + 3]];
            self.buffer[i] = f32::from_le_bytes(b);
        }
        self.filled = samples_read;
        self.pos = 0;
        Ok(())
    }
}

impl AudioSource for StdinPcmSource {
    fn next_sample(&mut self) -> Option<f64> {
        if self.exhausted {
            return None;
        }
        if self.pos >= self.filled {
            if self.refill().is_err() {
                self.exhausted = true;
                return None;
            }
            if self.exhausted {
                return None;
            }
        }
        let sample = self.buffer[self.pos] as f64;
        self.pos += 1;
        Some(sample)
    }

    fn sampling_period(&self) -> f64 {
        1.0 / self.sample_rate
    }
}

/// Writes raw little-endian `f32` PCM samples to stdout, buffered in
/// blocks of [`BUFFER_SIZE`].
pub struct StdoutPcmSink {
    buffer: Vec<u8>,
    pending: usize,
}

impl StdoutPcmSink {
    pub fn new() -> Self {
        Self {
            buffer: vec![0u8; BUFFER_SIZE * 4],
            pending: 0,
        }
    }

    fn flush_buffer(&mut self) {
        if self.pending == 0 {
            return;
        }
        if let Err(e) = io::stdout().write_all(&self.buffer[..self.pending * 4]) {
            log::error!("audio output error: {e}");
        }
        self.pending = 0;
    }
}

impl Default for StdoutPcmSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSink for StdoutPcmSink {
    fn emit(&mut self, sample: f64) {
        if self.pending == BUFFER_SIZE {
            self.flush_buffer();
        }
        let bytes = (sample as f32).to_le_bytes();
        let offset = self.pending * 4;
        self.buffer[offset..offset + 4].copy_from_slice(&bytes);
        self.pending += 1;
    }

    fn finish(&mut self) {
        self.flush_buffer();
        if let Err(e) = io::stdout().flush() {
            log::error!("audio output error: {e}");
        }
    }
}
