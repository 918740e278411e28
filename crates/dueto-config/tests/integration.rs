//! Save/restore integration tests.
//!
//! Verifies the spec's round-trip property: persisting state and replaying
//! it reproduces identical coefficients and identical audio output,
//! including at every parameter boundary value.

use std::sync::Arc;

use dueto_config::EqState;
use dueto_eq::{EqParams, TwoBandEq, index};
use tempfile::tempdir;

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZE: usize = 256;

fn process(eq: &mut TwoBandEq, input: &[f32]) -> Vec<f32> {
    let mut output = input.to_vec();
    for chunk in output.chunks_mut(BLOCK_SIZE) {
        let mut channels: Vec<&mut [f32]> = vec![chunk];
        eq.process_block(&mut channels).unwrap();
    }
    output
}

fn test_signal() -> Vec<f32> {
    (0..2048)
        .map(|n| {
            let t = n as f32 / SAMPLE_RATE;
            0.4 * (2.0 * std::f32::consts::PI * 1000.0 * t).sin()
                + 0.3 * (2.0 * std::f32::consts::PI * 5000.0 * t).sin()
        })
        .collect()
}

#[test]
fn file_round_trip_reproduces_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("eq_state.toml");

    let params = Arc::new(EqParams::new());
    params.set(index::EQ1_FREQ, 314.0);
    params.set(index::EQ1_GAIN, 7.5);
    params.set(index::EQ1_Q, 2.2);
    params.set(index::EQ2_FREQ, 8000.0);
    params.set(index::EQ2_GAIN, -4.25);
    params.set(index::EQ2_ON, 1.0);

    EqState::capture(&params).save(&path).unwrap();

    // A second store restored from disk must drive the engine identically.
    let restored = Arc::new(EqParams::new());
    EqState::load_or_default(&path).apply_to(&restored);

    let mut eq_a = TwoBandEq::new(params);
    eq_a.prepare(SAMPLE_RATE, BLOCK_SIZE, 1);
    let mut eq_b = TwoBandEq::new(restored);
    eq_b.prepare(SAMPLE_RATE, BLOCK_SIZE, 1);

    let signal = test_signal();
    assert_eq!(process(&mut eq_a, &signal), process(&mut eq_b, &signal));
}

#[test]
fn round_trip_at_every_boundary_value() {
    // Min, max, and default for each scalar; both toggle states. The blob
    // must reproduce identical coefficients for every combination of one
    // band's extremes (the other held at defaults).
    let freqs = [20.0, 20000.0, 1000.0];
    let gains = [-24.0, 24.0, 0.0];
    let qs = [0.1, 10.0, 1.0];
    let toggles = [0.0, 1.0];

    let signal = test_signal();
    for &freq in &freqs {
        for &gain in &gains {
            for &q in &qs {
                for &on in &toggles {
                    let params = Arc::new(EqParams::new());
                    params.set(index::EQ1_FREQ, freq);
                    params.set(index::EQ1_GAIN, gain);
                    params.set(index::EQ1_Q, q);
                    params.set(index::EQ1_ON, on);

                    let blob = EqState::capture(&params).to_toml().unwrap();
                    let restored = Arc::new(EqParams::new());
                    EqState::from_toml(&blob).unwrap().apply_to(&restored);

                    let mut eq_a = TwoBandEq::new(Arc::clone(&params));
                    eq_a.prepare(SAMPLE_RATE, BLOCK_SIZE, 1);
                    let mut eq_b = TwoBandEq::new(Arc::clone(&restored));
                    eq_b.prepare(SAMPLE_RATE, BLOCK_SIZE, 1);

                    let out_a = process(&mut eq_a, &signal);
                    let out_b = process(&mut eq_b, &signal);
                    assert_eq!(
                        out_a, out_b,
                        "round trip diverged at freq={freq} gain={gain} q={q} on={on}"
                    );

                    // Identical coefficients, not merely close output.
                    let (band_a, _) = eq_a.bands();
                    let (band_b, _) = eq_b.bands();
                    assert_eq!(band_a.coefficients(), band_b.coefficients());
                }
            }
        }
    }
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let state = EqState::load_or_default(dir.path().join("does_not_exist.toml"));
    assert_eq!(state, EqState::default());
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corrupt.toml");
    std::fs::write(&path, "this is { not toml ]").unwrap();

    let state = EqState::load_or_default(&path);
    assert_eq!(state, EqState::default());
}

#[test]
fn restore_after_processing_forces_refresh() {
    // Load state mid-session: after apply + mark_state_restored the next
    // block must already run with the restored coefficients.
    let params = Arc::new(EqParams::new());
    let mut eq = TwoBandEq::new(Arc::clone(&params));
    eq.prepare(SAMPLE_RATE, BLOCK_SIZE, 1);

    let signal = test_signal();
    process(&mut eq, &signal);

    let mut boosted = EqState::capture(&params);
    boosted.band1.gain_db = 24.0;
    boosted.apply_to(&params);
    eq.mark_state_restored();

    process(&mut eq, &signal);
    let (band1, _) = eq.bands();
    let installed = band1.coefficients().unwrap();

    // Reference coefficients computed by a fresh engine at the same state.
    let reference_params = Arc::new(EqParams::new());
    boosted.apply_to(&reference_params);
    let mut reference = TwoBandEq::new(reference_params);
    reference.prepare(SAMPLE_RATE, BLOCK_SIZE, 1);
    process(&mut reference, &signal);
    let (ref_band1, _) = reference.bands();

    assert_eq!(Some(installed), ref_band1.coefficients());
}
