//! A single EQ band: one biquad per audio channel plus the enable flag.

use dueto_core::{Biquad, Coefficients, db_to_linear};

use crate::params::BandValues;

/// Lowest usable center frequency in Hz.
pub const MIN_FREQ_HZ: f32 = 20.0;

/// Fraction of the sample rate a center frequency may reach.
///
/// 95% of Nyquist: the peaking design degenerates as ω approaches π, so the
/// frequency is capped with a margin regardless of what the parameter store
/// holds. This keeps a previously valid frequency from destabilizing the
/// filter after a sample-rate drop.
const NYQUIST_FRACTION: f32 = 0.475;

/// Inputs that determine a tap set. Refresh skips recomputation while the
/// observed tuple is unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CoeffKey {
    freq_hz: f32,
    gain_db: f32,
    q: f32,
    sample_rate: f32,
}

/// One peaking band applied across all channels of a block.
///
/// The band owns one [`Biquad`] per channel so channel histories never mix.
/// While disabled it keeps its filters silent and recomputes nothing, which
/// guarantees that re-enabling starts from silence rather than from whatever
/// energy was resident at disable time.
#[derive(Debug, Default)]
pub struct Band {
    filters: Vec<Biquad>,
    enabled: bool,
    cached: Option<CoeffKey>,
}

impl Band {
    /// Creates an unprepared band (no channels allocated).
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            enabled: false,
            cached: None,
        }
    }

    /// Allocates one filter per channel and clears all state.
    ///
    /// Runs on the non-real-time path; this is the only place the band
    /// allocates.
    pub fn prepare(&mut self, channel_count: usize) {
        self.filters.clear();
        self.filters.resize_with(channel_count, Biquad::new);
        self.enabled = false;
        self.cached = None;
    }

    /// Drops the per-channel filters.
    pub fn release(&mut self) {
        self.filters.clear();
        self.filters.shrink_to_fit();
        self.enabled = false;
        self.cached = None;
    }

    /// Zeroes every channel's delay registers.
    pub fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
    }

    /// Forgets the cached coefficient key so the next refresh recomputes
    /// unconditionally. Called after bulk state restoration.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Number of prepared channels.
    pub fn channel_count(&self) -> usize {
        self.filters.len()
    }

    /// Whether the band was enabled at the last refresh.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Per-block parameter sync, called once before [`process`](Self::process).
    ///
    /// Disabled: resets the filters and skips coefficient work entirely.
    /// Enabled: clamps the frequency into `[20 Hz, 0.475 * sample_rate]`,
    /// converts the gain to linear, and installs fresh peaking coefficients
    /// on every channel — but only if (freq, gain, q, sample_rate) actually
    /// changed since the last refresh.
    pub fn refresh(&mut self, values: &BandValues, sample_rate: f32) {
        if !values.enabled {
            self.reset();
            self.enabled = false;
            self.cached = None;
            return;
        }
        self.enabled = true;

        let max_freq = sample_rate * NYQUIST_FRACTION;
        let freq_hz = if values.freq_hz > max_freq {
            max_freq
        } else if values.freq_hz < MIN_FREQ_HZ {
            MIN_FREQ_HZ
        } else {
            values.freq_hz
        };

        let key = CoeffKey {
            freq_hz,
            gain_db: values.gain_db,
            q: values.q,
            sample_rate,
        };
        if self.cached == Some(key) {
            return;
        }

        let coeffs = Coefficients::peaking(sample_rate, freq_hz, values.q, db_to_linear(values.gain_db));
        for filter in &mut self.filters {
            filter.set_coefficients(coeffs);
        }
        self.cached = Some(key);
    }

    /// Applies the band to a block, in place, channel by channel.
    ///
    /// No-op while disabled. `channels` must hold exactly the prepared
    /// channel count; the engine checks this before delegating.
    #[inline]
    pub fn process(&mut self, channels: &mut [&mut [f32]]) {
        if !self.enabled {
            return;
        }
        for (filter, channel) in self.filters.iter_mut().zip(channels.iter_mut()) {
            filter.process_block(channel);
        }
    }

    /// The active tap set of channel 0, if prepared.
    ///
    /// All channels share identical taps, so one channel is representative.
    /// Used by tests and diagnostics.
    pub fn coefficients(&self) -> Option<Coefficients> {
        self.filters.first().map(Biquad::coefficients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(freq_hz: f32, gain_db: f32, q: f32, enabled: bool) -> BandValues {
        BandValues {
            freq_hz,
            gain_db,
            q,
            enabled,
        }
    }

    #[test]
    fn test_prepare_allocates_channels() {
        let mut band = Band::new();
        assert_eq!(band.channel_count(), 0);
        band.prepare(2);
        assert_eq!(band.channel_count(), 2);
        band.prepare(6);
        assert_eq!(band.channel_count(), 6);
    }

    #[test]
    fn test_disabled_band_is_passthrough() {
        let mut band = Band::new();
        band.prepare(1);
        band.refresh(&values(1000.0, 12.0, 1.0, false), 48000.0);

        let mut buffer = [0.5_f32, -0.25, 0.125];
        let mut channels: Vec<&mut [f32]> = vec![&mut buffer];
        band.process(&mut channels);
        assert_eq!(buffer, [0.5, -0.25, 0.125]);
    }

    #[test]
    fn test_refresh_caches_coefficients() {
        let mut band = Band::new();
        band.prepare(1);

        let v = values(1000.0, 6.0, 1.0, true);
        band.refresh(&v, 48000.0);
        let first = band.coefficients().unwrap();

        // Unchanged parameters: identical taps, no churn.
        band.refresh(&v, 48000.0);
        assert_eq!(band.coefficients().unwrap(), first);

        // A gain change must produce different taps.
        band.refresh(&values(1000.0, -6.0, 1.0, true), 48000.0);
        assert_ne!(band.coefficients().unwrap(), first);
    }

    #[test]
    fn test_sample_rate_change_recomputes() {
        let mut band = Band::new();
        band.prepare(1);

        let v = values(1000.0, 6.0, 1.0, true);
        band.refresh(&v, 48000.0);
        let at_48k = band.coefficients().unwrap();

        band.refresh(&v, 96000.0);
        assert_ne!(band.coefficients().unwrap(), at_48k);
    }

    #[test]
    fn test_disable_resets_filter_history() {
        let mut band = Band::new();
        band.prepare(1);
        band.refresh(&values(1000.0, 12.0, 2.0, true), 48000.0);

        let mut buffer = vec![1.0_f32; 64];
        let mut channels: Vec<&mut [f32]> = vec![&mut buffer];
        band.process(&mut channels);

        // Disabling clears history; re-enabling with the same parameters
        // starts from silence.
        band.refresh(&values(1000.0, 12.0, 2.0, false), 48000.0);
        band.refresh(&values(1000.0, 12.0, 2.0, true), 48000.0);

        let mut fresh = Band::new();
        fresh.prepare(1);
        fresh.refresh(&values(1000.0, 12.0, 2.0, true), 48000.0);

        let mut a = vec![0.25_f32; 64];
        let mut b = a.clone();
        let mut ch_a: Vec<&mut [f32]> = vec![&mut a];
        let mut ch_b: Vec<&mut [f32]> = vec![&mut b];
        band.process(&mut ch_a);
        fresh.process(&mut ch_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_nyquist_clamp_under_low_sample_rate() {
        let mut band = Band::new();
        band.prepare(1);

        // 20 kHz at 8 kHz sample rate: must clamp below Nyquist and stay
        // stable instead of producing a degenerate filter.
        band.refresh(&values(20000.0, 24.0, 10.0, true), 8000.0);
        let coeffs = band.coefficients().unwrap();
        assert!(coeffs.pole_magnitude() < 1.0);

        let mut buffer = vec![1.0_f32; 256];
        let mut channels: Vec<&mut [f32]> = vec![&mut buffer];
        band.process(&mut channels);
        assert!(buffer.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_channels_do_not_share_state() {
        let mut band = Band::new();
        band.prepare(2);
        band.refresh(&values(500.0, 6.0, 1.0, true), 48000.0);

        // Excite only channel 0; channel 1 must stay silent.
        let mut left = vec![1.0_f32; 32];
        let mut right = vec![0.0_f32; 32];
        let mut channels: Vec<&mut [f32]> = vec![&mut left, &mut right];
        band.process(&mut channels);

        assert!(left.iter().any(|s| *s != 0.0));
        assert!(right.iter().all(|s| *s == 0.0));
    }
}
