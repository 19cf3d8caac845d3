//! Test signal generation.

use clap::{Args, Subcommand};
use escalera_io::{WavSpec, write_wav};
use std::f32::consts::TAU;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a single impulse followed by silence
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Length in samples
        #[arg(long, default_value = "1000")]
        length: usize,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,

        /// Impulse amplitude
        #[arg(long, default_value = "1.0")]
        amplitude: f32,
    },

    /// Generate a sine tone
    Tone {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },

    /// Generate an exponential sine sweep (chirp)
    Sweep {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Start frequency in Hz
        #[arg(long, default_value = "20.0")]
        start: f32,

        /// End frequency in Hz
        #[arg(long, default_value = "20000.0")]
        end: f32,

        /// Duration in seconds
        #[arg(long, default_value = "2.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Impulse {
            output,
            length,
            sample_rate,
            amplitude,
        } => {
            anyhow::ensure!(length > 0, "length must be positive");
            let mut samples = vec![0.0f32; length];
            samples[0] = amplitude;
            write(&output, &samples, sample_rate)?;
        }
        GenerateCommand::Tone {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => {
            let n = (duration * sample_rate as f32) as usize;
            let samples: Vec<f32> = (0..n)
                .map(|i| amplitude * (TAU * freq * i as f32 / sample_rate as f32).sin())
                .collect();
            write(&output, &samples, sample_rate)?;
        }
        GenerateCommand::Sweep {
            output,
            start,
            end,
            duration,
            sample_rate,
            amplitude,
        } => {
            anyhow::ensure!(start > 0.0 && end > start, "need 0 < start < end");
            let n = (duration * sample_rate as f32) as usize;
            let rate = (end / start).ln() / duration;
            let samples: Vec<f32> = (0..n)
                .map(|i| {
                    let t = i as f32 / sample_rate as f32;
                    // Exponential chirp: phase integral of start * e^(rate t).
                    let phase = TAU * start * ((rate * t).exp() - 1.0) / rate;
                    amplitude * phase.sin()
                })
                .collect();
            write(&output, &samples, sample_rate)?;
        }
    }
    Ok(())
}

fn write(output: &Path, samples: &[f32], sample_rate: u32) -> anyhow::Result<()> {
    let spec = WavSpec {
        sample_rate,
        bits_per_sample: 32,
    };
    write_wav(output, samples, spec)?;
    println!("Wrote {} ({} samples)", output.display(), samples.len());
    Ok(())
}
