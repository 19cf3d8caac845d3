//! Property-based tests for the core DSP primitives.
//!
//! Covers parameter normalization round-trips across every scale and the
//! oversampler's stability guarantees using proptest for randomized input
//! generation.

use escalera_core::{Oversampler, ParamDescriptor, ParamScale};
use proptest::prelude::*;

/// Scale variants indexed 0..3 (Linear, Logarithmic, Power).
fn scale_variant(index: usize) -> ParamScale {
    match index % 3 {
        0 => ParamScale::Linear,
        1 => ParamScale::Logarithmic,
        _ => ParamScale::Power(4.0),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// normalize and denormalize are inverse maps over the whole range,
    /// for every scale.
    #[test]
    fn normalization_round_trips(
        plain in 30.0f32..=20000.0f32,
        variant in 0usize..3,
    ) {
        let d = ParamDescriptor::frequency_hz("Bias", "Bias", 30.0, 20000.0, 10000.0)
            .with_scale(scale_variant(variant));

        let t = d.normalize(plain);
        prop_assert!((0.0..=1.0).contains(&t), "normalized {t} out of [0, 1]");

        let back = d.denormalize(t);
        prop_assert!(
            (back - plain).abs() <= plain * 1e-3 + 0.5,
            "scale {variant}: {plain} -> {t} -> {back}"
        );
    }

    /// Out-of-range plain values normalize to the endpoints, never outside
    /// [0, 1], for every scale.
    #[test]
    fn normalization_clamps_out_of_range(
        below in -1000.0f32..30.0f32,
        above in 20000.0f32..100000.0f32,
        variant in 0usize..3,
    ) {
        let d = ParamDescriptor::frequency_hz("Bias", "Bias", 30.0, 20000.0, 10000.0)
            .with_scale(scale_variant(variant));

        prop_assert_eq!(d.normalize(below), 0.0);
        prop_assert_eq!(d.normalize(above), 1.0);
    }

    /// A bounded input block stays finite and bounded through the full
    /// upsample/downsample round trip, including across block boundaries.
    #[test]
    fn oversampler_round_trip_is_finite_and_bounded(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut os = Oversampler::new();
        os.prepare(32);

        let mut output = [0.0f32; 32];
        for _ in 0..4 {
            let over = os.upsample(&input);
            for &s in over.iter() {
                prop_assert!(s.is_finite());
            }
            os.downsample(&mut output);
        }

        for &s in &output {
            prop_assert!(s.is_finite());
            // Loose bound from the FIR's absolute tap sum and the 4x
            // interpolation gain.
            prop_assert!(s.abs() <= 8.0, "output {s} exceeds the filter gain bound");
        }
    }

    /// After reset(), the oversampler is bit-identical to a fresh instance.
    #[test]
    fn oversampler_reset_equals_fresh(
        warmup in prop::array::uniform32(-1.0f32..=1.0f32),
        signal in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut used = Oversampler::new();
        used.prepare(32);
        let mut sink = [0.0f32; 32];
        used.upsample(&warmup);
        used.downsample(&mut sink);
        used.reset();

        let mut fresh = Oversampler::new();
        fresh.prepare(32);

        let mut a = [0.0f32; 32];
        let mut b = [0.0f32; 32];
        used.upsample(&signal);
        used.downsample(&mut a);
        fresh.upsample(&signal);
        fresh.downsample(&mut b);

        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert_eq!(x.to_bits(), y.to_bits(), "reset state diverged from fresh");
        }
    }
}
