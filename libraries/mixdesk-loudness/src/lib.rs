//! Loudness measurement for Mixdesk
//!
//! This crate provides an ITU-R BS.1770-4 integrated loudness meter built
//! from first principles:
//! - Biquad filter sections (Direct-Form II Transposed)
//! - K-weighting filter design for any sample rate
//! - Block power with channel weighting, absolute and relative gating
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌────────────┐     ┌──────────┐
//! │ SampleBuffer │ ──► │ K-weighting  │ ──► │ 400 ms     │ ──► │ Gating   │ ──► LUFS
//! └──────────────┘     │ (2 biquads)  │     │ blocks     │     │ -70 / -10│
//!                      └──────────────┘     └────────────┘     └──────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use mixdesk_core::{SampleBuffer, SampleRate};
//!
//! let samples: Vec<f32> = (0..48_000 * 2)
//!     .map(|i| (2.0 * std::f32::consts::PI * 997.0 * i as f32 / 48_000.0).sin())
//!     .collect();
//! let buffer = SampleBuffer::new(vec![samples], SampleRate::DVD_QUALITY).unwrap();
//!
//! let lufs = mixdesk_loudness::measure(&buffer);
//! assert!((lufs - -3.01).abs() < 0.1);
//! ```

#![deny(unsafe_code)]

pub mod biquad;
mod error;
mod integrator;
pub mod k_weighting;

pub use biquad::{apply, Biquad, BiquadCoeffs};
pub use error::{LoudnessError, Result};
pub use integrator::{
    channel_weight, lufs_to_power, measure, measure_with_cancel, power_to_lufs, LoudnessMeter,
    LoudnessReport,
};
pub use k_weighting::design;

/// Block length for integrated loudness, in seconds
pub const BLOCK_SECONDS: f64 = 0.4;

/// Hop between block starts (75% overlap), in seconds
pub const HOP_SECONDS: f64 = 0.1;

/// Offset between K-weighted mean-square power and LUFS
pub const LUFS_OFFSET: f64 = -0.691;

/// Absolute gate threshold
pub const ABSOLUTE_GATE_LUFS: f64 = -70.0;

/// Relative gate: blocks below this fraction of the mean power (-10 LU) are dropped
pub const RELATIVE_GATE_FACTOR: f64 = 0.1;

/// Weight applied to channels 3 and 4 when there are more than three channels
pub const SURROUND_WEIGHT: f64 = 1.41;
