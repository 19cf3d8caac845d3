//! Block-based 4x oversampling for anti-aliased nonlinear processing.
//!
//! Saturating stages generate harmonics that can exceed Nyquist and alias
//! back into the audible band. The [`Oversampler`] mitigates this by
//! running the nonlinear stage at four times the host rate:
//!
//! 1. [`upsample`](Oversampler::upsample): zero-stuff by 4 and interpolate
//!    with a linear-phase lowpass FIR
//! 2. the caller processes the oversampled block in place
//! 3. [`downsample`](Oversampler::downsample): lowpass again and keep every
//!    fourth sample
//!
//! Both paths share one 63-tap Kaiser windowed-sinc filter (cutoff at
//! 0.108 x the oversampled rate, stopband below -90 dB past 0.15), stored
//! as a precomputed static array. The interpolation path scales by 4 to
//! make up for the energy lost to zero-stuffing.
//!
//! The work buffer is allocated once in [`prepare`](Oversampler::prepare);
//! `upsample`/`downsample` never allocate, so they are safe to call from a
//! real-time audio callback.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Fixed oversampling ratio.
pub const OVERSAMPLE_FACTOR: usize = 4;

/// Number of anti-aliasing filter taps.
const FIR_TAPS: usize = 63;

/// Block-based 4x oversampler.
///
/// Owns the oversampled work buffer so the hot path stays allocation-free:
/// [`upsample`](Self::upsample) hands out a mutable slice of the internal
/// buffer, the caller processes it in place, and
/// [`downsample`](Self::downsample) folds it back to the base rate.
///
/// ```rust
/// use escalera_core::Oversampler;
///
/// let mut os = Oversampler::new();
/// os.prepare(512);
///
/// let input = [0.25f32; 512];
/// let mut output = [0.0f32; 512];
///
/// let over = os.upsample(&input);
/// for s in over.iter_mut() {
///     *s = s.tanh(); // nonlinear stage at 4x rate
/// }
/// os.downsample(&mut output);
/// ```
pub struct Oversampler {
    /// Zero-stuffed delay line for the interpolation filter.
    up_state: [f32; FIR_TAPS],
    /// Delay line for the decimation filter.
    down_state: [f32; FIR_TAPS],
    /// Oversampled work buffer, `OVERSAMPLE_FACTOR x max_block_len`.
    work: Vec<f32>,
    /// Base-rate block capacity set by `prepare`.
    max_block_len: usize,
    /// Oversampled length of the block currently held in `work`.
    current_len: usize,
}

impl Oversampler {
    /// Create an unprepared oversampler.
    ///
    /// [`prepare`](Self::prepare) must be called before processing.
    pub fn new() -> Self {
        Self {
            up_state: [0.0; FIR_TAPS],
            down_state: [0.0; FIR_TAPS],
            work: Vec::new(),
            max_block_len: 0,
            current_len: 0,
        }
    }

    /// Allocate the work buffer for blocks of up to `max_block_len` base-rate
    /// samples and clear all filter state.
    ///
    /// This is the only method that allocates. Call it from the host's
    /// stream-start hook, never from the audio callback.
    pub fn prepare(&mut self, max_block_len: usize) {
        self.max_block_len = max_block_len;
        self.work.clear();
        self.work.resize(max_block_len * OVERSAMPLE_FACTOR, 0.0);
        self.reset();
    }

    /// Drop the work buffer. The oversampler must be re-`prepare`d before use.
    pub fn release(&mut self) {
        self.work = Vec::new();
        self.max_block_len = 0;
        self.current_len = 0;
    }

    /// Clear both filter delay lines without touching the buffer capacity.
    pub fn reset(&mut self) {
        self.up_state = [0.0; FIR_TAPS];
        self.down_state = [0.0; FIR_TAPS];
        self.current_len = 0;
    }

    /// Upsample a base-rate block into the internal work buffer and return
    /// the oversampled slice for in-place processing.
    ///
    /// Blocks longer than the prepared capacity are truncated (debug builds
    /// assert instead).
    pub fn upsample(&mut self, input: &[f32]) -> &mut [f32] {
        debug_assert!(
            input.len() <= self.max_block_len,
            "block longer than prepared capacity"
        );
        let len = input.len().min(self.max_block_len);
        self.current_len = len * OVERSAMPLE_FACTOR;

        let mut w = 0;
        for &sample in &input[..len] {
            // Zero-stuff: the input sample followed by three zeros, each
            // pushed through the interpolation filter. The factor-of-4 gain
            // restores unity passband level.
            for k in 0..OVERSAMPLE_FACTOR {
                shift_in(&mut self.up_state, if k == 0 { sample } else { 0.0 });
                self.work[w] = convolve(&self.up_state) * OVERSAMPLE_FACTOR as f32;
                w += 1;
            }
        }

        &mut self.work[..self.current_len]
    }

    /// Filter the processed work buffer and decimate into `output`.
    ///
    /// `output` must be the same length as the block last passed to
    /// [`upsample`](Self::upsample).
    pub fn downsample(&mut self, output: &mut [f32]) {
        debug_assert_eq!(output.len() * OVERSAMPLE_FACTOR, self.current_len);
        let frames = output.len().min(self.current_len / OVERSAMPLE_FACTOR);

        for (n, out) in output[..frames].iter_mut().enumerate() {
            // Push all four oversampled samples through the decimation
            // filter, computing the convolution only at the kept sample.
            let base = n * OVERSAMPLE_FACTOR;
            for k in 0..OVERSAMPLE_FACTOR {
                shift_in(&mut self.down_state, self.work[base + k]);
            }
            *out = convolve(&self.down_state);
        }
    }

    /// Round-trip latency in base-rate samples.
    ///
    /// Each FIR is linear phase with group delay `(FIR_TAPS - 1) / 2` at
    /// the oversampled rate, so the interpolation and decimation filters
    /// together delay `FIR_TAPS - 1` oversampled samples. For the 63-tap
    /// design that is 15.5 base samples; the half sample cannot be
    /// expressed at the base rate, so the reported value rounds down to 15.
    pub fn latency_samples(&self) -> usize {
        (FIR_TAPS - 1) / OVERSAMPLE_FACTOR
    }

    /// Base-rate block capacity set by the last [`prepare`](Self::prepare).
    pub fn max_block_len(&self) -> usize {
        self.max_block_len
    }
}

impl Default for Oversampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Shift a sample into the front of a FIR delay line.
#[inline]
fn shift_in(state: &mut [f32; FIR_TAPS], sample: f32) {
    for j in (1..FIR_TAPS).rev() {
        state[j] = state[j - 1];
    }
    state[0] = sample;
}

/// Dot product of the delay line with the anti-aliasing taps.
#[inline]
fn convolve(state: &[f32; FIR_TAPS]) -> f32 {
    let mut acc = 0.0;
    for (s, c) in state.iter().zip(LOWPASS_TAPS.iter()) {
        acc += s * c;
    }
    acc
}

// Anti-aliasing lowpass, shared by the interpolation and decimation paths.
//
// Design: 63-point windowed sinc, Kaiser window beta = 8, cutoff at
// 0.108 x the oversampled rate. Normalized to unity DC gain. Measured
// response: flat to ~0.09, -3 dB at 0.1, below -90 dB past 0.15 -- the
// folded images from 4x decimation land well under the noise floor.
// Symmetric taps give constant group delay of 31 samples at the
// oversampled rate.
#[allow(clippy::excessive_precision)]
#[rustfmt::skip]
static LOWPASS_TAPS: [f32; FIR_TAPS] = [
     0.0000196055,  0.0000570776,  0.0000804193,  0.0000278677,
    -0.0001478504, -0.0004123694, -0.0006069027, -0.0004887217,
     0.0001226552,  0.0011484174,  0.0021322956,  0.0023415770,
     0.0011343990, -0.0015337784, -0.0047540403, -0.0067768457,
    -0.0057341702, -0.0007672397,  0.0069865642,  0.0142141983,
     0.0164714681,  0.0102881988, -0.0044873893, -0.0233008026,
    -0.0374644406, -0.0369196966, -0.0143560361,  0.0309776851,
     0.0915715039,  0.1531385539,  0.1990329141,  0.2160097659,
     0.1990329141,  0.1531385539,  0.0915715039,  0.0309776851,
    -0.0143560361, -0.0369196966, -0.0374644406, -0.0233008026,
    -0.0044873893,  0.0102881988,  0.0164714681,  0.0142141983,
     0.0069865642, -0.0007672397, -0.0057341702, -0.0067768457,
    -0.0047540403, -0.0015337784,  0.0011343990,  0.0023415770,
     0.0021322956,  0.0011484174,  0.0001226552, -0.0004887217,
    -0.0006069027, -0.0004123694, -0.0001478504,  0.0000278677,
     0.0000804193,  0.0000570776,  0.0000196055,
];
