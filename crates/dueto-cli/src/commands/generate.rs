//! Test signal generation command.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use dueto_io::{WavSpec, write_wav};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Waveform {
    /// Pure sine tone at `--freq`
    Sine,
    /// Logarithmic sweep from 20 Hz to --freq
    Sweep,
    /// Digital silence
    Silence,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Signal type
    #[arg(short, long, value_enum, default_value_t = Waveform::Sine)]
    waveform: Waveform,

    /// Tone frequency (sine) or sweep end frequency, in Hz
    #[arg(short, long, default_value = "1000.0")]
    freq: f32,

    /// Peak amplitude (0.0 to 1.0)
    #[arg(short, long, default_value = "0.5")]
    amplitude: f32,

    /// Duration in seconds
    #[arg(short, long, default_value = "2.0")]
    duration: f32,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Number of channels
    #[arg(long, default_value = "1")]
    channels: u16,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.sample_rate > 0, "sample rate must be positive");
    anyhow::ensure!(args.channels > 0, "need at least one channel");
    anyhow::ensure!(args.duration > 0.0, "duration must be positive");

    let sample_rate = args.sample_rate as f32;
    let num_samples = (args.duration * sample_rate) as usize;
    let amplitude = args.amplitude.clamp(0.0, 1.0);

    let signal: Vec<f32> = match args.waveform {
        Waveform::Sine => (0..num_samples)
            .map(|n| {
                let t = n as f32 / sample_rate;
                amplitude * (2.0 * std::f32::consts::PI * args.freq * t).sin()
            })
            .collect(),
        Waveform::Sweep => {
            // Exponential sweep: 20 Hz up to the requested frequency, with
            // phase integrated so there are no discontinuities.
            let start = 20.0_f32;
            let end = args.freq.max(start + 1.0);
            let ratio = end / start;
            let total = args.duration;
            (0..num_samples)
                .map(|n| {
                    let t = n as f32 / sample_rate;
                    let phase = 2.0 * std::f32::consts::PI * start * total
                        * ((ratio.powf(t / total) - 1.0) / ratio.ln());
                    amplitude * phase.sin()
                })
                .collect()
        }
        Waveform::Silence => vec![0.0; num_samples],
    };

    let channels: Vec<Vec<f32>> = (0..args.channels).map(|_| signal.clone()).collect();
    let spec = WavSpec {
        channels: args.channels,
        sample_rate: args.sample_rate,
        bits_per_sample: 32,
    };
    write_wav(&args.output, &channels, spec)?;

    println!(
        "Wrote {:?} signal: {} samples x {} channel(s) at {} Hz to {}",
        args.waveform,
        num_samples,
        args.channels,
        args.sample_rate,
        args.output.display()
    );
    Ok(())
}
