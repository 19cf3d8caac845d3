//! Shared filter parameters.
//!
//! A control thread (GUI, MIDI, CLI flags) writes `bias` and `gain` into a
//! [`SharedParams`] store; the audio thread takes one [`ParamSnapshot`] per
//! block and never looks at the store again until the next block. Values
//! live in `AtomicU32`s as `f32` bit patterns — no locks anywhere near the
//! audio thread, and a snapshot can never observe a torn value.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::ladder::DiodeLadder;

/// Plain parameter values captured at one instant.
///
/// Taken once at block start and applied for the whole block; the solver
/// must never re-read parameters mid-block, or two iterations of the same
/// sample could disagree about the coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    /// Bias (cutoff) frequency in Hz, within `[30, 20000]`.
    pub bias_hz: f32,
    /// Output gain `K`, within `[0, 10]`.
    pub gain: f32,
}

impl ParamSnapshot {
    /// Build a snapshot, clamping both values into their valid ranges.
    pub fn new(bias_hz: f32, gain: f32) -> Self {
        Self {
            bias_hz: bias_hz.clamp(DiodeLadder::MIN_BIAS_HZ as f32, DiodeLadder::MAX_BIAS_HZ as f32),
            gain: gain.clamp(0.0, DiodeLadder::MAX_GAIN as f32),
        }
    }
}

impl Default for ParamSnapshot {
    /// Bias 10 kHz, gain 1.0 — the original instrument's resting position.
    fn default() -> Self {
        Self {
            bias_hz: 10000.0,
            gain: 1.0,
        }
    }
}

/// Lock-free parameter store shared between a control thread and the audio
/// thread.
///
/// Writers publish with release ordering; [`snapshot`](Self::snapshot)
/// reads with acquire ordering, so a snapshot sees values at least as new
/// as the last completed write on any thread.
#[derive(Debug)]
pub struct SharedParams {
    bias_hz: AtomicU32,
    gain: AtomicU32,
}

impl SharedParams {
    /// Create a store holding the given initial values.
    pub fn new(initial: ParamSnapshot) -> Self {
        Self {
            bias_hz: AtomicU32::new(initial.bias_hz.to_bits()),
            gain: AtomicU32::new(initial.gain.to_bits()),
        }
    }

    /// Publish a new bias frequency in Hz (clamped).
    pub fn set_bias_hz(&self, bias_hz: f32) {
        let clamped =
            bias_hz.clamp(DiodeLadder::MIN_BIAS_HZ as f32, DiodeLadder::MAX_BIAS_HZ as f32);
        self.bias_hz.store(clamped.to_bits(), Ordering::Release);
    }

    /// Publish a new output gain (clamped).
    pub fn set_gain(&self, gain: f32) {
        let clamped = gain.clamp(0.0, DiodeLadder::MAX_GAIN as f32);
        self.gain.store(clamped.to_bits(), Ordering::Release);
    }

    /// Publish both parameters at once from a snapshot, which
    /// [`ParamSnapshot::new`] has already clamped.
    pub fn set(&self, snapshot: ParamSnapshot) {
        self.bias_hz.store(snapshot.bias_hz.to_bits(), Ordering::Release);
        self.gain.store(snapshot.gain.to_bits(), Ordering::Release);
    }

    /// Capture both parameters. Called once per block by the audio thread.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            bias_hz: f32::from_bits(self.bias_hz.load(Ordering::Acquire)),
            gain: f32::from_bits(self.gain.load(Ordering::Acquire)),
        }
    }
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new(ParamSnapshot::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_last_write() {
        let params = SharedParams::default();
        params.set_bias_hz(440.0);
        params.set_gain(2.5);

        let snap = params.snapshot();
        assert_eq!(snap.bias_hz, 440.0);
        assert_eq!(snap.gain, 2.5);
    }

    #[test]
    fn writes_are_clamped() {
        let params = SharedParams::default();
        params.set_bias_hz(1.0);
        params.set_gain(100.0);

        let snap = params.snapshot();
        assert_eq!(snap.bias_hz, 30.0);
        assert_eq!(snap.gain, 10.0);
    }

    #[test]
    fn snapshot_constructor_clamps_both_fields() {
        let snap = ParamSnapshot::new(50000.0, -3.0);
        assert_eq!(snap.bias_hz, 20000.0);
        assert_eq!(snap.gain, 0.0);

        let params = SharedParams::default();
        params.set(ParamSnapshot::new(10.0, 99.0));
        let read = params.snapshot();
        assert_eq!(read.bias_hz, 30.0);
        assert_eq!(read.gain, 10.0);
    }

    #[test]
    fn snapshot_is_a_plain_copy() {
        let params = SharedParams::default();
        let before = params.snapshot();
        params.set_gain(9.0);
        // The already-taken snapshot must not move underneath the block.
        assert_eq!(before.gain, 1.0);
    }
}
