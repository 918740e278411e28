//! EQ state snapshot: capture, apply, and TOML (de)serialization.

use serde::{Deserialize, Serialize};
use std::path::Path;

use dueto_eq::{BandValues, EqParams, index};

use crate::error::StateError;

/// Persisted settings for one band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BandState {
    /// Center frequency in Hz.
    pub freq_hz: f32,
    /// Gain in dB.
    pub gain_db: f32,
    /// Resonance (Q factor).
    pub q: f32,
    /// Whether the band is active.
    pub enabled: bool,
}

impl From<BandValues> for BandState {
    fn from(values: BandValues) -> Self {
        Self {
            freq_hz: values.freq_hz,
            gain_db: values.gain_db,
            q: values.q,
            enabled: values.enabled,
        }
    }
}

/// Snapshot of all eight EQ parameters.
///
/// This is the persisted-state blob: what gets written on save and replayed
/// on load. Values are stored in plain physical units, so a hand-edited file
/// stays meaningful; anything out of range is clamped by the store on apply.
///
/// # TOML Format
///
/// ```toml
/// [band1]
/// freq_hz = 1000.0
/// gain_db = 3.0
/// q = 1.0
/// enabled = true
///
/// [band2]
/// freq_hz = 5000.0
/// gain_db = -2.5
/// q = 2.0
/// enabled = true
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EqState {
    /// Band 1 settings.
    pub band1: BandState,
    /// Band 2 settings.
    pub band2: BandState,
}

impl EqState {
    /// Captures the current values of every parameter in the store.
    pub fn capture(params: &EqParams) -> Self {
        Self {
            band1: params.band1().into(),
            band2: params.band2().into(),
        }
    }

    /// Writes the snapshot back into the store, one clamped write per
    /// parameter.
    ///
    /// After applying a loaded snapshot, call
    /// `TwoBandEq::mark_state_restored` so both bands rebuild their
    /// coefficients before the next block.
    pub fn apply_to(&self, params: &EqParams) {
        let writes = [
            (index::EQ1_FREQ, self.band1.freq_hz),
            (index::EQ1_GAIN, self.band1.gain_db),
            (index::EQ1_Q, self.band1.q),
            (index::EQ1_ON, if self.band1.enabled { 1.0 } else { 0.0 }),
            (index::EQ2_FREQ, self.band2.freq_hz),
            (index::EQ2_GAIN, self.band2.gain_db),
            (index::EQ2_Q, self.band2.q),
            (index::EQ2_ON, if self.band2.enabled { 1.0 } else { 0.0 }),
        ];
        for (idx, value) in writes {
            params.set(idx, value);
        }
    }

    /// Load a snapshot from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StateError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| StateError::read_file(path, e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load a snapshot, falling back to defaults on any failure.
    ///
    /// A missing or malformed state file is not fatal — the EQ comes up with
    /// its documented defaults and the failure is logged as a warning.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "state load failed, using defaults");
                Self::default()
            }
        }
    }

    /// Parse a snapshot from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, StateError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the snapshot to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StateError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| StateError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize the snapshot to a TOML string.
    pub fn to_toml(&self) -> Result<String, StateError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for EqState {
    /// The documented per-band defaults: Band 1 at 1 kHz, Band 2 at 5 kHz,
    /// both flat and enabled.
    fn default() -> Self {
        Self::capture(&EqParams::new())
    }
}
