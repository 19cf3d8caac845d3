//! Offline file rendering through the filter.

use anyhow::Context;
use clap::Args;
use escalera_filter::{ParamSnapshot, Vcs3Filter};
use escalera_io::{WavSpec, read_wav, write_wav_stereo};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (read as mono)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (stereo, both channels identical)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Bias (cutoff) frequency in Hz, 30-20000
    #[arg(long, default_value = "10000.0")]
    bias: f32,

    /// Output gain, 0-10
    #[arg(long, default_value = "1.0")]
    gain: f32,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.block_size > 0, "block size must be positive");

    let (samples, spec) = read_wav(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "Processing {} ({} samples, {} Hz) with bias {} Hz, gain {}",
        args.input.display(),
        samples.len(),
        spec.sample_rate,
        args.bias,
        args.gain,
    );

    let mut filter = Vcs3Filter::new();
    filter.params().set(ParamSnapshot::new(args.bias, args.gain));
    filter.prepare(sample_rate, args.block_size);
    info!(
        latency_samples = filter.latency_samples(),
        "filter prepared"
    );

    let mut left = vec![0.0f32; samples.len()];
    let mut right = vec![0.0f32; samples.len()];

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    for (offset, chunk) in samples.chunks(args.block_size).enumerate() {
        let start = offset * args.block_size;
        let end = start + chunk.len();
        filter.process_block(chunk, &mut left[start..end], &mut right[start..end]);
        pb.set_position(end as u64);
    }
    pb.finish_and_clear();

    filter.release();

    let out_spec = WavSpec {
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };
    write_wav_stereo(&args.output, &left, &right, out_spec)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("Wrote {}", args.output.display());
    Ok(())
}
