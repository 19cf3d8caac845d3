//! Nonlinear diode ladder core.
//!
//! Models the EMS VCS3 voltage-controlled lowpass as a nonlinear filter
//! network: four cascaded poles whose instantaneous transconductance is a
//! tanh function of the voltage across them, discretized with trapezoidal
//! integrators. Pole 1 is driven by `vin - vout_prev`, so the output feeds
//! back into the equation that produces it — each sample is solved by
//! fixed-point iteration rather than in closed form.
//!
//! The per-stage tanh keeps every intermediate term inside `(-1, 1)`, which
//! is what makes the network unconditionally stable: no state variable can
//! run away no matter how hard the input drives it.
//!
//! # Iteration policy
//!
//! The solver is bounded, not convergent. A hard cap
//! ([`DiodeLadder::MAX_ITERATIONS`]) limits worst-case per-sample cost so a
//! real-time deadline can never be blown; when the cap is hit, the last
//! estimate is accepted as-is. The loop's exit test is kept exactly as the
//! circuit model shipped it — see [`DiodeLadder::process`] — including its
//! inverted-looking comparison. Changing it changes the sound.
//!
//! The ladder is meant to run at an oversampled rate (the tanh stages
//! generate harmonics well past Nyquist); see `Vcs3Filter` for the wrapped
//! 4x pipeline.
//!
//! Reference: Fontana & Civolani, "Modeling of the EMS VCS3 Voltage-
//! Controlled Filter as a Nonlinear Filter Network", IEEE TASLP 2010.

use core::f64::consts::PI;
use escalera_core::Effect;
use libm::{tan, tanh};

/// Four-pole nonlinear ladder lowpass with tanh pole saturation.
///
/// State is `f64` throughout; input and output narrow to `f32` at the
/// edges. All physical constants live on the instance, so independent
/// instances (one per channel, one per plugin slot) never interfere.
///
/// # Example
///
/// ```rust
/// use escalera_filter::DiodeLadder;
/// use escalera_core::Effect;
///
/// // Runs at 4 x 44.1 kHz inside an oversampled pipeline.
/// let mut ladder = DiodeLadder::new(176_400.0);
/// ladder.set_bias_hz(1000.0);
/// ladder.set_gain(1.0);
///
/// let out = ladder.process(0.5);
/// assert!(out.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct DiodeLadder {
    // Physical constants, fixed at construction.
    /// Thermal voltage (V).
    vt: f64,
    /// Ladder slope factor, `eta * vt`.
    gamma: f64,
    /// Pole capacitance (F).
    c: f64,
    /// Relative convergence tolerance.
    mp: f64,

    // Parameters.
    bias_hz: f64,
    gain: f64,

    // Derived per parameter change.
    /// Effective (oversampled) sample rate.
    fs: f64,
    /// Bias current from the tangent pre-warp.
    i0: f64,
    /// Per-stage integration gain, `i0 / (4 c fs)`.
    stage_gain: f64,

    // Integrator outputs, one per pole.
    vc1: f64,
    vc2: f64,
    vc3: f64,
    vc4: f64,
    // Saturating transconductance terms; `u5` is the feedback diode pair.
    u1: f64,
    u2: f64,
    u3: f64,
    u4: f64,
    u5: f64,
    // Trapezoidal integration memory, one per pole.
    s1: f64,
    s2: f64,
    s3: f64,
    s4: f64,

    vout: f64,
    vout_prev: f64,

    /// Passes through the solver loop for the most recent sample.
    last_iterations: u32,
}

impl DiodeLadder {
    /// Ladder diode ideality factor.
    const ETA: f64 = 1.836;
    /// Thermal voltage in volts.
    const VT: f64 = 0.026;
    /// Pole capacitance in farads.
    const C: f64 = 1.0e-7;
    /// Relative tolerance in the solver exit test.
    const MP: f64 = 1.0e-4;
    /// Hard cap on solver iterations per sample.
    pub const MAX_ITERATIONS: u32 = 100;

    /// Lowest usable bias frequency in Hz.
    pub const MIN_BIAS_HZ: f64 = 30.0;
    /// Highest usable bias frequency in Hz.
    pub const MAX_BIAS_HZ: f64 = 20000.0;
    /// Maximum output gain factor.
    pub const MAX_GAIN: f64 = 10.0;

    /// Create a ladder running at `sample_rate` (the rate samples will
    /// actually arrive at — the oversampled rate when wrapped).
    ///
    /// Defaults: bias 10 kHz, gain 1.0, all state zero.
    pub fn new(sample_rate: f32) -> Self {
        let mut ladder = Self {
            vt: Self::VT,
            gamma: Self::ETA * Self::VT,
            c: Self::C,
            mp: Self::MP,
            bias_hz: 10000.0,
            gain: 1.0,
            fs: f64::from(sample_rate),
            i0: 0.0,
            stage_gain: 0.0,
            vc1: 0.0,
            vc2: 0.0,
            vc3: 0.0,
            vc4: 0.0,
            u1: 0.0,
            u2: 0.0,
            u3: 0.0,
            u4: 0.0,
            u5: 0.0,
            s1: 0.0,
            s2: 0.0,
            s3: 0.0,
            s4: 0.0,
            vout: 0.0,
            vout_prev: 0.0,
            last_iterations: 0,
        };
        ladder.update_coefficients();
        ladder
    }

    /// Set the bias (cutoff) frequency in Hz.
    ///
    /// Clamped to `[30, 20000]` and kept below half the effective rate so
    /// the tangent pre-warp can never be driven into its singularity.
    pub fn set_bias_hz(&mut self, bias_hz: f32) {
        self.bias_hz = f64::from(bias_hz).clamp(Self::MIN_BIAS_HZ, Self::MAX_BIAS_HZ);
        self.update_coefficients();
    }

    /// Set the output gain `K`, clamped to `[0, 10]`. The output stage
    /// scales pole 4 by `K + 0.5`.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = f64::from(gain).clamp(0.0, Self::MAX_GAIN);
    }

    /// Current bias frequency in Hz (after clamping).
    pub fn bias_hz(&self) -> f32 {
        self.bias_hz as f32
    }

    /// Current output gain `K`.
    pub fn gain(&self) -> f32 {
        self.gain as f32
    }

    /// Passes through the solver loop for the most recently processed
    /// sample. Never exceeds [`Self::MAX_ITERATIONS`]` + 2`.
    pub fn last_iterations(&self) -> u32 {
        self.last_iterations
    }

    /// True when every state variable is exactly zero (freshly created,
    /// reset, or fully decayed with zero input).
    pub fn is_quiescent(&self) -> bool {
        [
            self.vc1, self.vc2, self.vc3, self.vc4, self.u1, self.u2, self.u3, self.u4, self.u5,
            self.s1, self.s2, self.s3, self.s4, self.vout, self.vout_prev,
        ]
        .iter()
        .all(|&v| v == 0.0)
    }

    /// Parameter mapper: derive the bias current `i0` from the bias
    /// frequency via the tangent pre-warp
    /// `i0 = 8 c vt * 2 fs * tan(pi * bias / fs)`.
    ///
    /// The pre-warp compensates the frequency compression of the
    /// trapezoidal discretization, like a bilinear-transform pre-warp. The
    /// bias is held below `0.499 fs` first; `tan` is singular at `fs / 2`.
    fn update_coefficients(&mut self) {
        let bias = self.bias_hz.min(0.499 * self.fs);
        self.i0 = 8.0 * self.c * self.vt * 2.0 * self.fs * tan(PI * bias / self.fs);
        self.stage_gain = self.i0 / (4.0 * self.c * self.fs);
    }

    /// Zero all filter state without touching parameters.
    fn clear_state(&mut self) {
        self.vc1 = 0.0;
        self.vc2 = 0.0;
        self.vc3 = 0.0;
        self.vc4 = 0.0;
        self.u1 = 0.0;
        self.u2 = 0.0;
        self.u3 = 0.0;
        self.u4 = 0.0;
        self.u5 = 0.0;
        self.s1 = 0.0;
        self.s2 = 0.0;
        self.s3 = 0.0;
        self.s4 = 0.0;
        self.vout = 0.0;
        self.vout_prev = 0.0;
    }
}

impl Effect for DiodeLadder {
    /// Solve one sample of the implicit ladder equations.
    ///
    /// The loop body evaluates all four poles plus the feedback diode pair,
    /// then tests `|vout - vout_prev| >= mp * |vout_prev|` to *break*.
    /// Read twice: the loop exits when the change is still large (or the
    /// cap is passed), and spins to the cap when the change is small. That
    /// is the original model's literal behavior and it is preserved for
    /// output compatibility; treat it as an at-least-once evaluation with a
    /// bounded tail, not as a convergence test.
    fn process(&mut self, input: f32) -> f32 {
        let vin = f64::from(input);
        let a = self.stage_gain;
        let two_vt = 2.0 * self.vt;
        let two_gamma = 2.0 * self.gamma;
        let k = self.gain;

        let mut iteration: u32 = 0;
        loop {
            self.u1 = tanh((vin - self.vout_prev) / two_vt);
            self.vc1 = a * (self.u2 + self.u1) + self.s1;
            self.u2 = tanh((self.vc2 - self.vc1) / two_gamma);
            self.vc2 = a * (self.u3 - self.u2) + self.s2;
            self.u3 = tanh((self.vc3 - self.vc2) / two_gamma);
            self.vc3 = a * (self.u4 - self.u3) + self.s3;
            self.u4 = tanh((self.vc4 - self.vc3) / two_gamma);
            self.vc4 = a * (-self.u5 - self.u4) + self.s4;
            self.u5 = tanh(self.vc4 / (6.0 * self.gamma));
            self.vout = (k + 0.5) * self.vc4;

            let delta_large = (self.vout - self.vout_prev).abs() >= self.mp * self.vout_prev.abs();
            self.vout_prev = self.vout;
            if delta_large || iteration > Self::MAX_ITERATIONS {
                break;
            }
            iteration += 1;
        }
        self.last_iterations = iteration + 1;

        // Trapezoidal integrator memory carried to the next sample.
        self.s1 = self.u1 / (2.0 * self.fs) + self.vc1;
        self.s2 = self.u2 / (2.0 * self.fs) + self.vc2;
        self.s3 = self.u3 / (2.0 * self.fs) + self.vc3;
        self.s4 = self.u4 / (2.0 * self.fs) + self.vc4;

        if !self.vout.is_finite() {
            // tanh bounds every u term, so this cannot happen unless the
            // input itself was non-finite. Recover rather than propagate.
            debug_assert!(false, "non-finite ladder output for input {input}");
            self.clear_state();
            return 0.0;
        }

        self.vout as f32
    }

    /// Change the effective sample rate and zero all state.
    ///
    /// Integrator memory captured at a different time step is invalid, so
    /// a rate change is always a full reset.
    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.fs = f64::from(sample_rate);
        self.update_coefficients();
        self.clear_state();
    }

    fn reset(&mut self) {
        self.clear_state();
    }
}
