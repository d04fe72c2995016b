//! Integrated loudness (ITU-R BS.1770-4)
//!
//! Measures the integrated loudness of a whole buffer:
//! - K-weighting of each channel in turn (on a private copy)
//! - Mean-square power of 400 ms blocks hopped every 100 ms
//! - Absolute gate at -70 LUFS, then a relative gate 10 LU below the mean
//!
//! The result is in LUFS, or negative infinity when no block survives gating
//! or the sample rate is too low to K-weight.
//!
//! Channel weights assume L, R, C, LFE-or-Ls, Rs ordering: channels 3 and 4
//! get 1.41 whenever there are more than three channels. The actual channel
//! layout of the input is not checked.

use crate::biquad::{Biquad, BiquadCoeffs};
use crate::error::{LoudnessError, Result};
use crate::k_weighting;
use crate::{
    ABSOLUTE_GATE_LUFS, BLOCK_SECONDS, HOP_SECONDS, LUFS_OFFSET, RELATIVE_GATE_FACTOR,
    SURROUND_WEIGHT,
};
use mixdesk_core::SampleBuffer;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Outcome of one integrated loudness measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoudnessReport {
    /// Integrated loudness in LUFS, `-inf` if nothing passed gating
    pub integrated_lufs: f64,

    /// Number of 400 ms blocks measured
    pub block_count: usize,

    /// Number of blocks that passed both gates
    pub gated_block_count: usize,
}

impl LoudnessReport {
    fn silent(block_count: usize) -> Self {
        Self {
            integrated_lufs: f64::NEG_INFINITY,
            block_count,
            gated_block_count: 0,
        }
    }

    /// Whether no audio passed gating
    pub fn is_silent(&self) -> bool {
        self.integrated_lufs == f64::NEG_INFINITY
    }
}

impl fmt::Display for LoudnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Integrated: {:.1} LUFS ({} of {} blocks gated in)",
            self.integrated_lufs, self.gated_block_count, self.block_count
        )
    }
}

/// BS.1770-4 loudness meter for one sample rate
///
/// # Example
///
/// ```
/// use mixdesk_core::{SampleBuffer, SampleRate};
/// use mixdesk_loudness::LoudnessMeter;
///
/// let silence = SampleBuffer::new(vec![vec![0.0; 48_000]; 2], SampleRate::DVD_QUALITY).unwrap();
/// let report = LoudnessMeter::new(48_000).analyze(&silence);
/// assert!(report.is_silent());
/// ```
#[derive(Debug, Clone)]
pub struct LoudnessMeter {
    sample_rate: u32,
    pre_filter: BiquadCoeffs,
    high_pass: BiquadCoeffs,
    block_size: usize,
    hop_size: usize,
}

impl LoudnessMeter {
    /// Design the K-weighting filters and block sizes for `sample_rate`
    pub fn new(sample_rate: u32) -> Self {
        let (pre_filter, high_pass) = k_weighting::design(sample_rate);
        let rate = f64::from(sample_rate);

        Self {
            sample_rate,
            pre_filter,
            high_pass,
            block_size: (rate * BLOCK_SECONDS).round() as usize,
            hop_size: (rate * HOP_SECONDS).round() as usize,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples per 400 ms block
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Samples per 100 ms hop
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Number of blocks a signal of `frames` samples yields (zero if shorter than a block)
    pub fn block_count(&self, frames: usize) -> usize {
        if self.block_size == 0 || self.hop_size == 0 || frames < self.block_size {
            return 0;
        }
        (frames - self.block_size) / self.hop_size + 1
    }

    /// Measure a buffer to completion
    pub fn analyze(&self, buffer: &SampleBuffer) -> LoudnessReport {
        // Without a token nothing can cancel
        self.run(buffer, || false)
            .unwrap_or_else(|_| LoudnessReport::silent(0))
    }

    /// Measure a buffer, checking `cancel` every 100 ms of audio
    ///
    /// # Errors
    /// Returns `LoudnessError::Cancelled` once the token fires
    pub fn analyze_with_cancel(
        &self,
        buffer: &SampleBuffer,
        cancel: &CancellationToken,
    ) -> Result<LoudnessReport> {
        self.run(buffer, || cancel.is_cancelled())
    }

    fn run<C>(&self, buffer: &SampleBuffer, is_cancelled: C) -> Result<LoudnessReport>
    where
        C: Fn() -> bool,
    {
        if !k_weighting::is_supported_rate(self.sample_rate) {
            tracing::debug!(
                sample_rate = self.sample_rate,
                "Sample rate too low for K-weighting"
            );
            return Ok(LoudnessReport::silent(0));
        }

        let channel_count = buffer.channel_count();
        let block_count = self.block_count(buffer.frames());

        if channel_count == 0 || block_count == 0 {
            tracing::debug!(
                frames = buffer.frames(),
                block_size = self.block_size,
                "Audio shorter than one block"
            );
            return Ok(LoudnessReport::silent(0));
        }

        // One weighted channel in memory at a time; sums accumulate in channel order
        let mut block_powers = vec![0.0; block_count];
        for (index, channel) in buffer.channels().iter().enumerate() {
            let weighted = self.k_weight(channel, &is_cancelled)?;
            let weight = channel_weight(index, channel_count);

            for (block, power) in block_powers.iter_mut().enumerate() {
                if is_cancelled() {
                    return Err(LoudnessError::Cancelled);
                }

                let start = block * self.hop_size;
                let end = start + self.block_size;
                *power += weight * mean_square(&weighted[start..end]);
            }
        }

        Ok(gate(&block_powers))
    }

    /// K-weight a copy of one channel, one hop at a time
    fn k_weight<C>(&self, channel: &[f32], is_cancelled: &C) -> Result<Vec<f64>>
    where
        C: Fn() -> bool,
    {
        let mut samples: Vec<f64> = channel.iter().map(|&s| f64::from(s)).collect();
        let mut pre_filter = Biquad::new(self.pre_filter);
        let mut high_pass = Biquad::new(self.high_pass);

        for chunk in samples.chunks_mut(self.hop_size) {
            if is_cancelled() {
                return Err(LoudnessError::Cancelled);
            }
            pre_filter.process(chunk);
            high_pass.process(chunk);
        }

        Ok(samples)
    }
}

/// Integrated loudness of `buffer` in LUFS, `-inf` when nothing passes gating
pub fn measure(buffer: &SampleBuffer) -> f64 {
    LoudnessMeter::new(buffer.sample_rate().as_hz())
        .analyze(buffer)
        .integrated_lufs
}

/// Cancellable form of [`measure`]
///
/// # Errors
/// Returns `LoudnessError::Cancelled` once the token fires
pub fn measure_with_cancel(buffer: &SampleBuffer, cancel: &CancellationToken) -> Result<f64> {
    LoudnessMeter::new(buffer.sample_rate().as_hz())
        .analyze_with_cancel(buffer, cancel)
        .map(|report| report.integrated_lufs)
}

/// Weight of channel `index` in the block power sum
pub fn channel_weight(index: usize, channel_count: usize) -> f64 {
    if channel_count > 3 && (index == 3 || index == 4) {
        SURROUND_WEIGHT
    } else {
        1.0
    }
}

/// Mean-square power corresponding to a loudness in LUFS
pub fn lufs_to_power(lufs: f64) -> f64 {
    10.0_f64.powf((lufs - LUFS_OFFSET) / 10.0)
}

/// Loudness in LUFS of a mean-square power (`-inf` for zero or non-finite power)
pub fn power_to_lufs(power: f64) -> f64 {
    if !power.is_finite() || power <= 0.0 {
        return f64::NEG_INFINITY;
    }
    LUFS_OFFSET + 10.0 * power.log10()
}

fn mean_square(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Two-stage gating over block powers
fn gate(block_powers: &[f64]) -> LoudnessReport {
    let block_count = block_powers.len();

    let absolute_threshold = lufs_to_power(ABSOLUTE_GATE_LUFS);
    let above_absolute: Vec<f64> = block_powers
        .iter()
        .copied()
        .filter(|&power| power > absolute_threshold)
        .collect();

    if above_absolute.is_empty() {
        return LoudnessReport::silent(block_count);
    }

    let relative_threshold = mean(&above_absolute) * RELATIVE_GATE_FACTOR;
    let gated: Vec<f64> = above_absolute
        .into_iter()
        .filter(|&power| power >= relative_threshold)
        .collect();

    if gated.is_empty() {
        return LoudnessReport::silent(block_count);
    }

    LoudnessReport {
        integrated_lufs: power_to_lufs(mean(&gated)),
        block_count,
        gated_block_count: gated.len(),
    }
}
