//! Lock-free parameter store for the two EQ bands.
//!
//! [`EqParams`] holds the eight control scalars as individual atomics: a
//! control surface (GUI, preset load, CLI flag) writes them from a
//! non-real-time thread, and the engine reads them once per block from the
//! audio thread, without locks. Each scalar is torn-read-free on its own,
//! but there is NO cross-parameter consistency: a frequency/gain/Q triple
//! written together may be observed across two adjacent blocks. A briefly
//! mismatched triple self-corrects within one block, so the relaxation is
//! deliberate — do not add a snapshot lock here.

use core::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

use dueto_core::{ParamDescriptor, ParameterInfo};

/// Total number of parameters (4 per band).
pub const PARAM_COUNT: usize = 8;

/// Parameter indices, matching the descriptor table order.
pub mod index {
    /// Band 1 center frequency.
    pub const EQ1_FREQ: usize = 0;
    /// Band 1 gain.
    pub const EQ1_GAIN: usize = 1;
    /// Band 1 resonance.
    pub const EQ1_Q: usize = 2;
    /// Band 1 enable toggle.
    pub const EQ1_ON: usize = 3;
    /// Band 2 center frequency.
    pub const EQ2_FREQ: usize = 4;
    /// Band 2 gain.
    pub const EQ2_GAIN: usize = 5;
    /// Band 2 resonance.
    pub const EQ2_Q: usize = 6;
    /// Band 2 enable toggle.
    pub const EQ2_ON: usize = 7;
}

const DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::freq_hz("Band 1 Frequency", "Freq1", "EQ1_FREQ", 20.0, 20000.0, 1000.0),
    ParamDescriptor::gain_db("Band 1 Gain", "Gain1", "EQ1_GAIN", -24.0, 24.0, 0.0),
    ParamDescriptor::q_factor("Band 1 Q", "Q1", "EQ1_Q", 0.1, 10.0, 1.0),
    ParamDescriptor::toggle("Band 1 On", "On1", "EQ1_ON", true),
    ParamDescriptor::freq_hz("Band 2 Frequency", "Freq2", "EQ2_FREQ", 20.0, 20000.0, 5000.0),
    ParamDescriptor::gain_db("Band 2 Gain", "Gain2", "EQ2_GAIN", -24.0, 24.0, 0.0),
    ParamDescriptor::q_factor("Band 2 Q", "Q2", "EQ2_Q", 0.1, 10.0, 1.0),
    ParamDescriptor::toggle("Band 2 On", "On2", "EQ2_ON", true),
];

/// Control values for one band, read scalar-by-scalar from the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandValues {
    /// Center frequency in Hz.
    pub freq_hz: f32,
    /// Gain in dB.
    pub gain_db: f32,
    /// Resonance (Q factor).
    pub q: f32,
    /// Whether the band is active.
    pub enabled: bool,
}

/// Change listener: receives the parameter index and the clamped new value.
type Listener = Box<dyn Fn(usize, f32) + Send + Sync>;

/// The shared parameter store.
///
/// Values live in `AtomicU32` cells as `f32` bit patterns (toggles as
/// 0.0/1.0). Writes clamp to the declared range — out-of-range values are
/// never rejected, only clamped. Listener notification happens on the
/// writer's thread; the audio thread never takes the listener lock because
/// it only ever reads values.
pub struct EqParams {
    values: [AtomicU32; PARAM_COUNT],
    listeners: RwLock<Vec<Listener>>,
}

impl EqParams {
    /// Creates a store with every parameter at its documented default:
    /// Band 1 at 1 kHz / 0 dB / Q 1 / on, Band 2 at 5 kHz / 0 dB / Q 1 / on.
    pub fn new() -> Self {
        Self {
            values: core::array::from_fn(|i| AtomicU32::new(DESCRIPTORS[i].default.to_bits())),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Returns the descriptor table (index order matches [`index`]).
    pub fn descriptors() -> &'static [ParamDescriptor; PARAM_COUNT] {
        &DESCRIPTORS
    }

    /// Reads one parameter. Safe from any thread, including the audio
    /// thread.
    #[inline]
    pub fn get(&self, idx: usize) -> f32 {
        f32::from_bits(self.values[idx].load(Ordering::Relaxed))
    }

    /// Writes one parameter, clamped to its declared range, and notifies
    /// subscribers. Non-real-time path only.
    pub fn set(&self, idx: usize, value: f32) {
        let clamped = DESCRIPTORS[idx].clamp(value);
        self.values[idx].store(clamped.to_bits(), Ordering::Relaxed);
        self.notify(idx, clamped);
    }

    /// Registers a change listener.
    ///
    /// Listeners run synchronously on the writing thread for every
    /// [`set`](Self::set). This is the seam a control surface hangs off;
    /// the engine never subscribes — it polls once per block.
    pub fn subscribe(&self, listener: impl Fn(usize, f32) + Send + Sync + 'static) {
        if let Ok(mut listeners) = self.listeners.write() {
            listeners.push(Box::new(listener));
        }
    }

    fn notify(&self, idx: usize, value: f32) {
        if let Ok(listeners) = self.listeners.read() {
            for listener in listeners.iter() {
                listener(idx, value);
            }
        }
    }

    /// Resets every parameter to its default value.
    pub fn reset_to_defaults(&self) {
        for (idx, desc) in DESCRIPTORS.iter().enumerate() {
            self.set(idx, desc.default);
        }
    }

    /// Reads Band 1's control values.
    ///
    /// Each scalar is loaded individually; see the module docs for the
    /// consistency model.
    pub fn band1(&self) -> BandValues {
        self.band_at(index::EQ1_FREQ)
    }

    /// Reads Band 2's control values.
    pub fn band2(&self) -> BandValues {
        self.band_at(index::EQ2_FREQ)
    }

    fn band_at(&self, base: usize) -> BandValues {
        BandValues {
            freq_hz: self.get(base),
            gain_db: self.get(base + 1),
            q: self.get(base + 2),
            enabled: self.get(base + 3) >= 0.5,
        }
    }
}

impl Default for EqParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterInfo for EqParams {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, idx: usize) -> Option<ParamDescriptor> {
        DESCRIPTORS.get(idx).copied()
    }

    fn get_param(&self, idx: usize) -> f32 {
        if idx < PARAM_COUNT { self.get(idx) } else { 0.0 }
    }

    fn set_param(&self, idx: usize, value: f32) {
        if idx < PARAM_COUNT {
            self.set(idx, value);
        }
    }
}

impl core::fmt::Debug for EqParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EqParams")
            .field("band1", &self.band1())
            .field("band2", &self.band2())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_defaults_match_spec() {
        let params = EqParams::new();
        let b1 = params.band1();
        assert_eq!(b1.freq_hz, 1000.0);
        assert_eq!(b1.gain_db, 0.0);
        assert_eq!(b1.q, 1.0);
        assert!(b1.enabled);

        let b2 = params.band2();
        assert_eq!(b2.freq_hz, 5000.0);
        assert_eq!(b2.gain_db, 0.0);
        assert_eq!(b2.q, 1.0);
        assert!(b2.enabled);
    }

    #[test]
    fn test_out_of_range_writes_are_clamped() {
        let params = EqParams::new();

        params.set(index::EQ1_FREQ, 5.0);
        assert_eq!(params.get(index::EQ1_FREQ), 20.0);

        params.set(index::EQ1_FREQ, 1e9);
        assert_eq!(params.get(index::EQ1_FREQ), 20000.0);

        params.set(index::EQ2_GAIN, -100.0);
        assert_eq!(params.get(index::EQ2_GAIN), -24.0);

        params.set(index::EQ2_Q, 0.0);
        assert_eq!(params.get(index::EQ2_Q), 0.1);
    }

    #[test]
    fn test_toggle_round_trip() {
        let params = EqParams::new();
        params.set(index::EQ1_ON, 0.0);
        assert!(!params.band1().enabled);
        params.set(index::EQ1_ON, 1.0);
        assert!(params.band1().enabled);
        // Clamped, not rejected
        params.set(index::EQ1_ON, 7.0);
        assert!(params.band1().enabled);
        assert_eq!(params.get(index::EQ1_ON), 1.0);
    }

    #[test]
    fn test_lookup_by_key() {
        let params = EqParams::new();
        assert_eq!(params.param_index_by_key("EQ1_FREQ"), Some(0));
        assert_eq!(params.param_index_by_key("EQ2_ON"), Some(7));
        assert_eq!(params.param_index_by_key("EQ3_FREQ"), None);
    }

    #[test]
    fn test_lookup_by_name() {
        let params = EqParams::new();
        assert_eq!(params.find_param_by_name("band 1 gain"), Some(1));
        assert_eq!(params.find_param_by_name("Freq2"), Some(4));
        assert_eq!(params.find_param_by_name("nothing"), None);
    }

    #[test]
    fn test_reset_to_defaults() {
        let params = EqParams::new();
        params.set(index::EQ1_FREQ, 440.0);
        params.set(index::EQ2_ON, 0.0);

        params.reset_to_defaults();
        assert_eq!(params.get(index::EQ1_FREQ), 1000.0);
        assert!(params.band2().enabled);
    }

    #[test]
    fn test_subscribe_sees_clamped_value() {
        let params = EqParams::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        params.subscribe(move |idx, value| {
            assert_eq!(idx, index::EQ1_GAIN);
            assert_eq!(value, 24.0);
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });

        params.set(index::EQ1_GAIN, 99.0);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let params = Arc::new(EqParams::new());
        let writer = Arc::clone(&params);

        let handle = std::thread::spawn(move || {
            for i in 0..1000 {
                writer.set(index::EQ1_FREQ, 20.0 + i as f32);
            }
        });

        // Reader side: every observed value must be in range.
        for _ in 0..1000 {
            let freq = params.get(index::EQ1_FREQ);
            assert!((20.0..=20000.0).contains(&freq));
        }
        handle.join().unwrap();
    }
}
