//! Parameter introspection for discoverable EQ controls.
//!
//! [`ParameterInfo`] gives control surfaces, preset systems, and the CLI a
//! uniform way to enumerate and manipulate parameters without knowing the
//! concrete type behind them. Each parameter is described by a
//! [`ParamDescriptor`] with a stable string key, a declared range and
//! default, and a [`ParamScale`] mapping between a normalized \[0, 1\]
//! control position and the physical value.
//!
//! Frequency controls use [`ParamScale::Logarithmic`] so a linear fader
//! sweeps octaves evenly instead of spending most of its travel above 10 kHz.

/// Scaling curve for parameter normalization.
///
/// Determines how a parameter's plain value maps to normalized \[0.0, 1.0\]
/// space:
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)` — requires
///   `min > 0`, ideal for frequency ranges like 20 Hz–20 kHz
/// - **Power(exp)**: `normalized = ((value - min) / (max - min)).powf(1/exp)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Linear mapping (default). Equal resolution across the range.
    #[default]
    Linear,
    /// Logarithmic mapping. More resolution at low values.
    Logarithmic,
    /// Power curve mapping with configurable exponent.
    Power(f32),
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB) - gain parameters.
    Decibels,
    /// Hertz (Hz) - frequency parameters.
    Hertz,
    /// No unit - dimensionless parameters (Q, toggles).
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::None => "",
        }
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// The `key` is the parameter's stable identity: it is what presets store,
/// what the CLI accepts, and what a host would automate. Once published it
/// never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Band 1 Frequency").
    pub name: &'static str,

    /// Short name for hardware displays, max 8 characters.
    pub short_name: &'static str,

    /// Stable string key for persistence and lookup (e.g., "EQ1_FREQ").
    pub key: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Default value on initialization or reset.
    pub default: f32,

    /// Recommended increment for encoder-based control.
    pub step: f32,

    /// Normalization curve between plain and normalized values.
    pub scale: ParamScale,
}

impl ParamDescriptor {
    /// Frequency parameter in Hz with logarithmic control response.
    pub const fn freq_hz(
        name: &'static str,
        short_name: &'static str,
        key: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            key,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            step: 1.0,
            scale: ParamScale::Logarithmic,
        }
    }

    /// Gain parameter in dB.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        key: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            key,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.5,
            scale: ParamScale::Linear,
        }
    }

    /// Dimensionless resonance (Q) parameter.
    pub const fn q_factor(
        name: &'static str,
        short_name: &'static str,
        key: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            key,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.1,
            scale: ParamScale::Linear,
        }
    }

    /// On/off toggle parameter (0.0 = off, 1.0 = on).
    pub const fn toggle(
        name: &'static str,
        short_name: &'static str,
        key: &'static str,
        default_on: bool,
    ) -> Self {
        Self {
            name,
            short_name,
            key,
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default: if default_on { 1.0 } else { 0.0 },
            step: 1.0,
            scale: ParamScale::Linear,
        }
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// Out-of-range writes are clamped, never rejected.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
            ParamScale::Power(exp) => {
                let linear = (value - self.min) / range;
                libm::powf(linear, 1.0 / exp)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the plain parameter range.
    ///
    /// Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
            ParamScale::Power(exp) => {
                let curved = libm::powf(normalized, exp);
                self.min + curved * (self.max - self.min)
            }
        }
    }
}

/// Trait for components that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index; the index set is stable for
/// the lifetime of the implementor. Implementations clamp written values to
/// the descriptor range and ignore out-of-bounds indices.
pub trait ParameterInfo {
    /// Returns the number of parameters exposed.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at `index`, or `None` if
    /// out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at `index` (0.0 if out of
    /// range).
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`, clamping to the descriptor range.
    /// Out-of-bounds indices are ignored.
    fn set_param(&self, index: usize, value: f32);

    /// Finds a parameter index by its stable string key (exact match).
    fn param_index_by_key(&self, key: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.key == key))
    }

    /// Finds a parameter index by display name (case-insensitive, matches
    /// either the full or the short name).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i)
                && (desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name))
            {
                return Some(i);
            }
        }
        None
    }
}
