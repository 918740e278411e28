//! The two-band EQ engine: prepare/process lifecycle and band cascade.

use std::sync::Arc;

use crate::band::Band;
use crate::params::EqParams;

/// Errors surfaced by the processing entry point.
///
/// These guard programming errors at the host boundary; a correctly driven
/// engine never produces them.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EqError {
    /// `process_block` was called before `prepare`.
    #[error("process_block called before prepare")]
    NotPrepared,

    /// The buffer's channel count does not match the prepared layout.
    #[error("buffer has {got} channels, engine prepared for {expected}")]
    ChannelMismatch {
        /// Channel count passed to `prepare`.
        expected: usize,
        /// Channel count of the offending buffer.
        got: usize,
    },
}

/// Session format fixed at `prepare` time.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SessionConfig {
    sample_rate: f32,
    max_block_size: usize,
    channel_count: usize,
}

/// Two peaking bands in series, driven per audio block.
///
/// Band 1's output feeds Band 2's input — the bands form a cascade, not
/// parallel taps, matching conventional parametric-EQ signal flow. Control
/// values come from a shared [`EqParams`] store, read once per block at the
/// block boundary; nothing is read mid-block.
///
/// # Real-time contract
///
/// [`process_block`](Self::process_block) never blocks, allocates, or
/// performs I/O. All allocation happens in [`prepare`](Self::prepare),
/// which the host calls from a non-real-time context before processing
/// starts and again on any format change.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use dueto_eq::{EqParams, TwoBandEq, index};
///
/// let params = Arc::new(EqParams::new());
/// params.set(index::EQ1_GAIN, 6.0);
///
/// let mut eq = TwoBandEq::new(Arc::clone(&params));
/// eq.prepare(48000.0, 512, 2);
///
/// let mut left = vec![0.0_f32; 512];
/// let mut right = vec![0.0_f32; 512];
/// let mut channels: Vec<&mut [f32]> = vec![&mut left, &mut right];
/// eq.process_block(&mut channels).unwrap();
/// ```
#[derive(Debug)]
pub struct TwoBandEq {
    params: Arc<EqParams>,
    band1: Band,
    band2: Band,
    config: Option<SessionConfig>,
}

impl TwoBandEq {
    /// Creates an unprepared engine reading from the given store.
    pub fn new(params: Arc<EqParams>) -> Self {
        Self {
            params,
            band1: Band::new(),
            band2: Band::new(),
            config: None,
        }
    }

    /// The shared parameter store this engine polls.
    pub fn params(&self) -> &Arc<EqParams> {
        &self.params
    }

    /// Allocates per-channel filter state and fixes the session format.
    ///
    /// May be called again at any non-real-time point to change format;
    /// re-preparing forces both bands through a full reset, so no energy
    /// from the previous regime survives. `max_block_size` is a hint only —
    /// delay-line storage is constant-size and does not depend on it.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize, channel_count: usize) {
        debug_assert!(sample_rate > 0.0, "sample rate must be positive");
        debug_assert!(channel_count > 0, "need at least one channel");

        self.band1.prepare(channel_count);
        self.band2.prepare(channel_count);
        self.config = Some(SessionConfig {
            sample_rate,
            max_block_size,
            channel_count,
        });

        tracing::info!(sample_rate, max_block_size, channel_count, "EQ engine prepared");
    }

    /// Releases per-channel filter state; the engine returns to the
    /// unprepared state and must see `prepare` again before processing.
    pub fn release_resources(&mut self) {
        self.band1.release();
        self.band2.release();
        self.config = None;
        tracing::info!("EQ engine released");
    }

    /// Whether `prepare` has been called since construction or the last
    /// `release_resources`.
    pub fn is_prepared(&self) -> bool {
        self.config.is_some()
    }

    /// The prepared sample rate, if any.
    pub fn sample_rate(&self) -> Option<f32> {
        self.config.map(|c| c.sample_rate)
    }

    /// The prepared channel count, if any.
    pub fn channel_count(&self) -> Option<usize> {
        self.config.map(|c| c.channel_count)
    }

    /// Forces both bands to recompute coefficients on the next block.
    ///
    /// Call after bulk parameter restoration (state load): the store may
    /// hold values identical to the cached ones while the filters carry
    /// state from before the load.
    pub fn mark_state_restored(&mut self) {
        self.band1.invalidate();
        self.band2.invalidate();
    }

    /// Processes one block in place: refresh Band 1, apply it, refresh
    /// Band 2, apply it.
    ///
    /// Strictly sequential — Band 1's output is Band 2's input. Parameter
    /// values are read from the store exactly once here, at the block
    /// boundary.
    pub fn process_block(&mut self, channels: &mut [&mut [f32]]) -> Result<(), EqError> {
        debug_assert!(self.config.is_some(), "process_block before prepare");
        let config = self.config.ok_or(EqError::NotPrepared)?;
        if channels.len() != config.channel_count {
            return Err(EqError::ChannelMismatch {
                expected: config.channel_count,
                got: channels.len(),
            });
        }

        self.band1.refresh(&self.params.band1(), config.sample_rate);
        self.band1.process(channels);

        self.band2.refresh(&self.params.band2(), config.sample_rate);
        self.band2.process(channels);

        Ok(())
    }

    /// Test/diagnostic access to the two bands.
    pub fn bands(&self) -> (&Band, &Band) {
        (&self.band1, &self.band2)
    }
}
