//! Persisted parameter state for the dueto EQ.
//!
//! The host saves and restores the EQ as an opaque blob of the eight
//! parameter values. This crate owns that blob's format: a small TOML
//! document ([`EqState`]) captured from and applied to the shared
//! [`dueto_eq::EqParams`] store.
//!
//! Load failures never reach the audio path: [`EqState::load_or_default`]
//! falls back to the documented defaults and logs a warning.
//!
//! # Example
//!
//! ```rust,no_run
//! use dueto_eq::EqParams;
//! use dueto_config::EqState;
//!
//! let params = EqParams::new();
//! params.set(dueto_eq::index::EQ1_GAIN, 4.0);
//!
//! // Save on host request
//! EqState::capture(&params).save("session.toml").unwrap();
//!
//! // Restore later (missing/corrupt file falls back to defaults)
//! EqState::load_or_default("session.toml").apply_to(&params);
//! ```

mod error;
mod state;

pub use error::StateError;
pub use state::{BandState, EqState};
