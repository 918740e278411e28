//! Dueto Core - DSP primitives for the dueto parametric EQ
//!
//! This crate provides the numeric foundation of the EQ: the peaking-filter
//! coefficient calculator, the biquad section that applies it, and the
//! parameter-introspection types shared by the engine, the persistence
//! layer, and the CLI.
//!
//! # Core Abstractions
//!
//! ## Filtering
//!
//! - [`Coefficients`] - Normalized biquad tap set with the RBJ peaking design
//! - [`Biquad`] - Direct Form I second-order section, per-channel state
//!
//! ## Parameters
//!
//! - [`ParamDescriptor`] - Range, default, unit, and normalization curve
//! - [`ParamScale`] - Linear/logarithmic/power control response
//! - [`ParameterInfo`] - Index-based parameter discovery and access
//!
//! ## Utilities
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Level conversions
//! - [`flush_denormal`] - Subnormal suppression for recursive filters
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocation, blocking, or I/O anywhere in this
//!   crate; everything is plain arithmetic on owned state
//! - **no_std compatible**: pure `libm` math, `std` only behind the default
//!   feature
//!
//! # Example
//!
//! ```rust
//! use dueto_core::{Biquad, Coefficients, db_to_linear};
//!
//! let mut filter = Biquad::new();
//! filter.set_coefficients(Coefficients::peaking(
//!     48000.0,
//!     1000.0,
//!     1.0,
//!     db_to_linear(6.0),
//! ));
//!
//! let mut buffer = [0.25_f32; 64];
//! filter.process_block(&mut buffer);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod math;
pub mod param_info;

// Re-export main types at crate root
pub use biquad::{Biquad, Coefficients};
pub use math::{db_to_linear, flush_denormal, linear_to_db};
pub use param_info::{ParamDescriptor, ParamScale, ParamUnit, ParameterInfo};
