//! One-shot batch acquisition of microphone samples.
//!
//! Provides [`Sampler`], which owns the sample buffer and drives a
//! [`SampleSource`] through a single bounded transfer per call. Unlike a bare
//! "wait for DMA" loop, the wait is capped by a deadline read from the
//! injected clock; a stalled transfer is aborted and reported as
//! [`AcquisitionError::Timeout`].

use crate::config::Config;
use crate::hal::{InitError, SampleSource};
use crate::time::{TimeInstant, TimeSource, has_elapsed};

/// Fixed-capacity batch of raw 12-bit ADC readings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer<const N: usize> {
    samples: [u16; N],
}

impl<const N: usize> SampleBuffer<N> {
    /// Buffer of `N` zero readings.
    pub const fn new() -> Self {
        Self { samples: [0; N] }
    }

    /// The readings, oldest first.
    #[inline]
    pub fn as_slice(&self) -> &[u16] {
        &self.samples
    }

    /// Capacity, always `N`.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// True only for a zero-capacity buffer.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    fn as_mut_slice(&mut self) -> &mut [u16] {
        &mut self.samples
    }
}

impl<const N: usize> Default for SampleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during an acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquisitionError {
    /// The transfer did not finish before the deadline and was aborted.
    Timeout {
        /// Deadline that was exceeded, in milliseconds.
        after_ms: u64,
    },
}

impl core::fmt::Display for AcquisitionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AcquisitionError::Timeout { after_ms } => {
                write!(f, "sample transfer did not complete within {} ms", after_ms)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AcquisitionError {}

/// Drives batch acquisitions of `N` samples.
///
/// # Type Parameters
/// * `A` - Analog front-end / transfer engine
/// * `N` - Samples per batch
pub struct Sampler<A: SampleSource, const N: usize> {
    source: A,
    buffer: SampleBuffer<N>,
    timeout_ms: u64,
}

impl<A: SampleSource, const N: usize> Sampler<A, N> {
    /// Configures the source for the microphone channel and clock divisor.
    ///
    /// # Errors
    /// Whatever the source reports from `configure`; fatal at startup.
    pub fn new(mut source: A, config: &Config) -> Result<Self, InitError> {
        source.configure(config.mic_channel, config.adc_clock_divisor)?;
        info!(
            "sampler ready: channel {}, {} samples per batch",
            config.mic_channel,
            N
        );

        Ok(Self {
            source,
            buffer: SampleBuffer::new(),
            timeout_ms: config.acquisition_timeout_ms,
        })
    }

    /// Captures a fresh batch, blocking until it is complete.
    ///
    /// Stale readings are drained first, so the batch only holds samples
    /// converted after this call. On timeout the previous batch is kept.
    pub fn acquire<I, T>(&mut self, clock: &T) -> Result<&SampleBuffer<N>, AcquisitionError>
    where
        I: TimeInstant,
        T: TimeSource<I>,
    {
        self.source.drain();
        self.source.start(N);

        let started = clock.now();
        while !self.source.is_complete() {
            if has_elapsed(started, clock.now(), self.timeout_ms) {
                self.source.abort();
                self.source.halt();
                warn!("sample transfer timed out after {} ms", self.timeout_ms);
                return Err(AcquisitionError::Timeout {
                    after_ms: self.timeout_ms,
                });
            }
        }

        self.source.halt();
        self.source.read_into(self.buffer.as_mut_slice());
        Ok(&self.buffer)
    }

    /// Last completed batch.
    pub fn samples(&self) -> &SampleBuffer<N> {
        &self.buffer
    }

    /// Returns a reference to the underlying source.
    pub fn source(&self) -> &A {
        &self.source
    }

    /// Returns a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut A {
        &mut self.source
    }
}
