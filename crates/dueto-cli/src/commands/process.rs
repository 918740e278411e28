//! File-based EQ processing command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use dueto_config::EqState;
use dueto_core::ParameterInfo;
use dueto_eq::{EqParams, TwoBandEq};
use dueto_io::{WavSpec, read_wav, write_wav};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// State file (TOML) to load before processing
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Parameter overrides by key (e.g., "EQ1_GAIN=6" or "EQ2_ON=0")
    #[arg(short, long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, f32)>,

    /// Write the effective state to this file after processing
    #[arg(long)]
    save_state: Option<PathBuf>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

fn parse_key_val(s: &str) -> Result<(String, f32), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!("invalid parameter format: '{s}' (expected KEY=value)"));
    }
    let value: f32 = parts[1]
        .parse()
        .map_err(|_| format!("invalid numeric value in '{s}'"))?;
    Ok((parts[0].to_string(), value))
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (mut channels, spec) = read_wav(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let sample_rate = spec.sample_rate as f32;
    let frames = channels.first().map_or(0, Vec::len);

    println!(
        "  {} channel(s), {} frames, {} Hz, {:.2}s",
        channels.len(),
        frames,
        spec.sample_rate,
        frames as f32 / sample_rate
    );

    // Build the parameter store: state file first, explicit overrides on top.
    let params = Arc::new(EqParams::new());
    if let Some(state_path) = &args.state {
        EqState::load_or_default(state_path).apply_to(&params);
        println!("Loaded state from {}", state_path.display());
    }
    for (key, value) in &args.param {
        let idx = params
            .param_index_by_key(key)
            .with_context(|| format!("unknown parameter key '{key}' (see `dueto params`)"))?;
        params.set(idx, *value);
    }

    let mut eq = TwoBandEq::new(Arc::clone(&params));
    eq.prepare(sample_rate, args.block_size, channels.len());
    eq.mark_state_restored();

    let b1 = params.band1();
    let b2 = params.band2();
    println!(
        "Band 1: {} | Band 2: {}",
        format_band(b1.freq_hz, b1.gain_db, b1.q, b1.enabled),
        format_band(b2.freq_hz, b2.gain_db, b2.q, b2.enabled),
    );

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );

    let block_size = args.block_size;
    let mut start = 0;
    while start < frames {
        let end = (start + block_size).min(frames);
        let mut block: Vec<&mut [f32]> = channels
            .iter_mut()
            .map(|channel| &mut channel[start..end])
            .collect();
        eq.process_block(&mut block)?;
        pb.set_position(end as u64);
        start = end;
    }
    pb.finish_and_clear();
    eq.release_resources();

    let out_spec = WavSpec {
        channels: channels.len() as u16,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };
    write_wav(&args.output, &channels, out_spec)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());

    if let Some(save_path) = &args.save_state {
        EqState::capture(&params)
            .save(save_path)
            .with_context(|| format!("saving state to {}", save_path.display()))?;
        println!("Saved state to {}", save_path.display());
    }

    Ok(())
}

fn format_band(freq_hz: f32, gain_db: f32, q: f32, enabled: bool) -> String {
    if enabled {
        format!("{freq_hz:.0} Hz {gain_db:+.1} dB Q {q:.2}")
    } else {
        "off".to_string()
    }
}
