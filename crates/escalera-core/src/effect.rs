//! Core Effect trait.
//!
//! Every audio processor in escalera implements [`Effect`]: a mono,
//! sample-at-a-time interface with block helpers layered on top. The
//! trait is object-safe so processors can be boxed behind `dyn Effect`
//! when a host needs runtime dispatch, while static dispatch remains the
//! fast path.
//!
//! All methods are designed to be callable from a real-time audio thread:
//! no allocations, no locking, no unbounded loops.

/// Trait for mono audio processors.
///
/// The processor advances its internal state by one sample per
/// [`process`](Self::process) call. Sample-rate-dependent coefficients are
/// re-derived in [`set_sample_rate`](Self::set_sample_rate), and
/// [`reset`](Self::reset) clears state without touching parameters.
pub trait Effect {
    /// Process a single sample and advance internal state.
    ///
    /// Input is typically in `[-1.0, 1.0]`; implementations must return a
    /// finite value for any finite input.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls [`process`](Self::process) per sample.
    ///
    /// # Panics
    /// Debug builds panic if `input.len() != output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate this processor runs at.
    ///
    /// Implementations recalculate coefficients here. State captured at a
    /// different rate is meaningless, so implementations with memory should
    /// also clear it.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear all internal state without changing parameters.
    fn reset(&mut self);

    /// Processing latency in samples at the rate the effect runs at.
    ///
    /// Default returns 0.
    fn latency_samples(&self) -> usize {
        0
    }
}
