//! Property-based invariants for the ladder solver.
//!
//! Uses proptest to verify the guarantees the real-time contract rests on:
//! finite output for any valid input and parameters, the hard iteration
//! bound, and state-free reset.

use escalera_core::Effect;
use escalera_filter::{DiodeLadder, Vcs3Filter};
use proptest::prelude::*;

const OVERSAMPLED_RATE: f32 = 176_400.0;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any finite input in [-1, 1] with any valid (bias, gain) must come
    /// out finite after the full oversampled pipeline.
    #[test]
    fn pipeline_output_is_always_finite(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        bias_hz in 30.0f32..=20000.0f32,
        gain in 0.0f32..=10.0f32,
    ) {
        let mut filter = Vcs3Filter::new();
        filter.params().set_bias_hz(bias_hz);
        filter.params().set_gain(gain);
        filter.prepare(48000.0, 32);

        let mut left = [0.0f32; 32];
        let mut right = [0.0f32; 32];
        filter.process_block(&input, &mut left, &mut right);

        for (&l, &r) in left.iter().zip(right.iter()) {
            prop_assert!(l.is_finite(), "non-finite output {l} (bias {bias_hz}, gain {gain})");
            prop_assert_eq!(l.to_bits(), r.to_bits(), "stereo channels must match");
        }
    }

    /// The solver loop must terminate within the hard cap for every sample,
    /// converged or not. The cap is what bounds worst-case block time.
    #[test]
    fn solver_iterations_never_exceed_cap(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        bias_hz in 30.0f32..=20000.0f32,
        gain in 0.0f32..=10.0f32,
    ) {
        let mut ladder = DiodeLadder::new(OVERSAMPLED_RATE);
        ladder.set_bias_hz(bias_hz);
        ladder.set_gain(gain);

        for &sample in &input {
            ladder.process(sample);
            // The cap comparison happens after the counter increment.
            prop_assert!(ladder.last_iterations() <= DiodeLadder::MAX_ITERATIONS + 2);
        }
    }

    /// After reset(), the ladder must behave exactly like a fresh instance
    /// with the same parameters.
    #[test]
    fn reset_is_equivalent_to_fresh(
        warmup in prop::array::uniform32(-1.0f32..=1.0f32),
        probe in prop::array::uniform32(-1.0f32..=1.0f32),
        bias_hz in 30.0f32..=20000.0f32,
        gain in 0.0f32..=10.0f32,
    ) {
        let mut used = DiodeLadder::new(OVERSAMPLED_RATE);
        used.set_bias_hz(bias_hz);
        used.set_gain(gain);
        for &s in &warmup {
            used.process(s);
        }
        used.reset();
        prop_assert!(used.is_quiescent());

        let mut fresh = DiodeLadder::new(OVERSAMPLED_RATE);
        fresh.set_bias_hz(bias_hz);
        fresh.set_gain(gain);

        for &s in &probe {
            let a = used.process(s);
            let b = fresh.process(s);
            prop_assert_eq!(a.to_bits(), b.to_bits(), "reset state diverged from fresh");
        }
    }
}
