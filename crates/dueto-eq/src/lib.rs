//! Dueto EQ - two-band parametric equalizer engine.
//!
//! A block-driven peaking EQ with two bands in series. The pieces:
//!
//! - [`EqParams`] - lock-free shared parameter store (eight scalars, keyed
//!   `EQ1_FREQ` … `EQ2_ON`), written by control surfaces and polled by the
//!   engine once per block
//! - [`Band`] - one peaking biquad per audio channel with an enable flag
//! - [`TwoBandEq`] - prepare/process lifecycle and the Band 1 → Band 2
//!   cascade
//!
//! # Threading model
//!
//! Parameter writes happen on non-real-time threads; the audio thread reads
//! each scalar atomically at the block boundary. There is no cross-parameter
//! snapshot — a torn triple self-corrects within one block. The processing
//! path never blocks, allocates, or performs I/O.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use dueto_eq::{EqParams, TwoBandEq, index};
//!
//! let params = Arc::new(EqParams::new());
//! params.set(index::EQ1_FREQ, 250.0);
//! params.set(index::EQ1_GAIN, 4.5);
//!
//! let mut eq = TwoBandEq::new(params);
//! eq.prepare(48000.0, 512, 2);
//! ```

pub mod band;
pub mod engine;
pub mod params;

pub use band::{Band, MIN_FREQ_HZ};
pub use engine::{EqError, TwoBandEq};
pub use params::{BandValues, EqParams, PARAM_COUNT, index};

// Re-export the core types callers need alongside the engine.
pub use dueto_core::{Biquad, Coefficients, ParamDescriptor, ParamScale, ParamUnit, ParameterInfo};
