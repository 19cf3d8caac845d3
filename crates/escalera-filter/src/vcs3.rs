//! Prepared per-block filter pipeline.
//!
//! [`Vcs3Filter`] is what a host drives: it owns the 4x [`Oversampler`],
//! the [`DiodeLadder`] core running at the oversampled rate, and a handle
//! to the [`SharedParams`] store. Per block it does exactly what the
//! original instrument's processor did:
//!
//! ```text
//! input -> upsample 4x -> ladder solve per sample -> downsample -> L = R = out
//! ```
//!
//! Parameters are snapshotted once at block start; the block buffers are
//! pre-allocated in [`prepare`](Vcs3Filter::prepare). Nothing on the
//! processing path allocates, locks, or blocks.

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

use escalera_core::{
    Effect, OVERSAMPLE_FACTOR, Oversampler, ParamDescriptor, ParamId, ParamScale, ParameterInfo,
};

use crate::ladder::DiodeLadder;
use crate::params::{ParamSnapshot, SharedParams};

/// Block-level VCS3 filter: oversampled nonlinear ladder with mono input
/// and broadcast stereo output.
///
/// # Lifecycle
///
/// - [`prepare`](Self::prepare) on stream start or sample-rate change:
///   allocates buffers, derives the oversampled rate, zeroes all state
/// - [`process_block`](Self::process_block) once per host block
/// - [`release`](Self::release) on stream stop
///
/// The filter is exclusively owned by the audio thread; the only shared
/// surface is the lock-free [`SharedParams`] store.
///
/// # Example
///
/// ```rust
/// use escalera_filter::Vcs3Filter;
///
/// let mut filter = Vcs3Filter::new();
/// filter.params().set_bias_hz(1000.0);
/// filter.params().set_gain(1.0);
/// filter.prepare(44100.0, 512);
///
/// let input = vec![0.0f32; 512];
/// let mut left = vec![0.0f32; 512];
/// let mut right = vec![0.0f32; 512];
/// filter.process_block(&input, &mut left, &mut right);
/// assert_eq!(left, right);
/// ```
pub struct Vcs3Filter {
    params: Arc<SharedParams>,
    ladder: DiodeLadder,
    oversampler: Oversampler,
    sample_rate: f32,
    prepared: bool,
}

impl Vcs3Filter {
    /// Create an unprepared filter with default parameters (bias 10 kHz,
    /// gain 1.0). Call [`prepare`](Self::prepare) before processing.
    pub fn new() -> Self {
        Self::with_params(Arc::new(SharedParams::default()))
    }

    /// Create a filter sharing an existing parameter store, e.g. one also
    /// held by a control thread.
    pub fn with_params(params: Arc<SharedParams>) -> Self {
        Self {
            params,
            ladder: DiodeLadder::new(44100.0 * OVERSAMPLE_FACTOR as f32),
            oversampler: Oversampler::new(),
            sample_rate: 44100.0,
            prepared: false,
        }
    }

    /// Handle to the shared parameter store. Clone the `Arc` to hand it to
    /// a control thread.
    pub fn params(&self) -> &Arc<SharedParams> {
        &self.params
    }

    /// (Re)initialize for a host sample rate and maximum block length.
    ///
    /// Sets the ladder's effective rate to `sample_rate * 4`, zeroes every
    /// piece of filter and oversampler state, and pre-allocates the
    /// oversampled work buffer. Must be called again whenever the host
    /// rate changes — integrator memory from another rate is stale.
    pub fn prepare(&mut self, sample_rate: f32, max_block_len: usize) {
        debug_assert!(sample_rate > 0.0);
        self.sample_rate = sample_rate;
        self.ladder
            .set_sample_rate(sample_rate * OVERSAMPLE_FACTOR as f32);
        self.oversampler.prepare(max_block_len);
        self.prepared = true;
    }

    /// Release the oversampler buffers. The filter must be re-prepared
    /// before the next `process_block`.
    pub fn release(&mut self) {
        self.oversampler.release();
        self.prepared = false;
    }

    /// Zero all filter state without touching parameters or buffers.
    pub fn reset(&mut self) {
        self.ladder.reset();
        self.oversampler.reset();
    }

    /// Process one block: mono `input`, identical `left`/`right` output.
    ///
    /// All three slices must have the same length, at most the
    /// `max_block_len` given to [`prepare`](Self::prepare). Parameters are
    /// read once, up front, from the shared store.
    pub fn process_block(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        debug_assert!(self.prepared, "process_block before prepare");
        debug_assert_eq!(input.len(), left.len());
        debug_assert_eq!(input.len(), right.len());
        if !self.prepared {
            left.fill(0.0);
            right.fill(0.0);
            return;
        }

        self.apply_params(self.params.snapshot());

        let frames = input.len().min(left.len()).min(right.len());
        let oversampled = self.oversampler.upsample(&input[..frames]);
        self.ladder.process_block_inplace(oversampled);
        self.oversampler.downsample(&mut left[..frames]);
        right[..frames].copy_from_slice(&left[..frames]);
    }

    /// Apply a parameter snapshot to the ladder. Exposed for hosts that
    /// manage their own snapshotting; `process_block` calls it internally.
    pub fn apply_params(&mut self, snapshot: ParamSnapshot) {
        self.ladder.set_bias_hz(snapshot.bias_hz);
        self.ladder.set_gain(snapshot.gain);
    }

    /// Host sample rate given to the last [`prepare`](Self::prepare).
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Pipeline latency in host-rate samples (the oversampler's two
    /// linear-phase FIRs; the ladder itself is zero-latency).
    pub fn latency_samples(&self) -> usize {
        self.oversampler.latency_samples()
    }

    /// Solver passes used for the most recent oversampled sample.
    pub fn last_iterations(&self) -> u32 {
        self.ladder.last_iterations()
    }

    /// True when all ladder state is exactly zero.
    pub fn is_quiescent(&self) -> bool {
        self.ladder.is_quiescent()
    }
}

impl Default for Vcs3Filter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterInfo for Vcs3Filter {
    fn param_count(&self) -> usize {
        2
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            // Power(4.0) reproduces the 0.25 skew of the hardware's
            // frequency knob.
            0 => Some(
                ParamDescriptor::frequency_hz("Bias", "Bias", 30.0, 20000.0, 10000.0)
                    .with_id(ParamId(100), "vcs3_bias")
                    .with_scale(ParamScale::Power(4.0)),
            ),
            1 => Some(
                ParamDescriptor::ratio("Gain", "Gain", 0.0, 10.0, 1.0)
                    .with_id(ParamId(101), "vcs3_gain"),
            ),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        let snap = self.params.snapshot();
        match index {
            0 => snap.bias_hz,
            1 => snap.gain,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.params.set_bias_hz(value),
            1 => self.params.set_gain(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_channels_are_identical() {
        let mut filter = Vcs3Filter::new();
        filter.prepare(44100.0, 128);

        let input: Vec<f32> = (0..128).map(|n| libm::sinf(0.05 * n as f32) * 0.5).collect();
        let mut left = vec![0.0f32; 128];
        let mut right = vec![0.0f32; 128];
        filter.process_block(&input, &mut left, &mut right);

        assert_eq!(left, right);
    }

    #[test]
    fn param_info_exposes_bias_and_gain() {
        let mut filter = Vcs3Filter::new();
        assert_eq!(filter.param_count(), 2);
        assert_eq!(filter.find_param_by_name("bias"), Some(0));
        assert_eq!(filter.find_param_by_name("gain"), Some(1));

        filter.set_param(0, 440.0);
        assert_eq!(filter.get_param(0), 440.0);
        filter.set_param(1, 25.0); // clamped
        assert_eq!(filter.get_param(1), 10.0);
    }

    #[test]
    fn prepare_zeroes_all_state() {
        let mut filter = Vcs3Filter::new();
        filter.prepare(44100.0, 64);

        let input = [0.9f32; 64];
        let mut l = [0.0f32; 64];
        let mut r = [0.0f32; 64];
        filter.process_block(&input, &mut l, &mut r);
        assert!(!filter.is_quiescent());

        filter.prepare(48000.0, 64);
        assert!(filter.is_quiescent());
    }
}
