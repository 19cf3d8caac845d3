//! Criterion benchmarks for the ladder solver and the full pipeline.
//!
//! Run with: cargo bench
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use escalera_core::Effect;
use escalera_filter::{DiodeLadder, Vcs3Filter};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 256, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_ladder_core(c: &mut Criterion) {
    let mut group = c.benchmark_group("DiodeLadder");

    for &bias in &[200.0f32, 10000.0] {
        let input = generate_test_signal(1024);
        let mut ladder = DiodeLadder::new(SAMPLE_RATE * 4.0);
        ladder.set_bias_hz(bias);
        ladder.set_gain(1.0);

        group.bench_with_input(BenchmarkId::new("bias_hz", bias as u32), &bias, |b, _| {
            let mut output = vec![0.0f32; 1024];
            b.iter(|| {
                ladder.process_block(black_box(&input), &mut output);
                black_box(output[0])
            })
        });
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Vcs3Filter");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut filter = Vcs3Filter::new();
        filter.params().set_bias_hz(1000.0);
        filter.prepare(SAMPLE_RATE, block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut left = vec![0.0f32; block_size];
                let mut right = vec![0.0f32; block_size];
                b.iter(|| {
                    filter.process_block(black_box(&input), &mut left, &mut right);
                    black_box(left[0])
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_ladder_core, bench_full_pipeline);
criterion_main!(benches);
