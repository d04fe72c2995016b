/// Audio-related types
use crate::error::{MixdeskError, Result};
use serde::{Deserialize, Serialize};

/// Sample rate in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// Common sample rates
    pub const CD_QUALITY: Self = Self(44_100);
    pub const DVD_QUALITY: Self = Self(48_000);
    pub const HIGH_RES_88: Self = Self(88_200);
    pub const HIGH_RES_96: Self = Self(96_000);
    pub const HIGH_RES_176: Self = Self(176_400);
    pub const HIGH_RES_192: Self = Self(192_000);

    /// Create a new sample rate
    #[must_use]
    pub fn new(hz: u32) -> Self {
        Self(hz)
    }

    /// Get the sample rate as Hz
    pub fn as_hz(&self) -> u32 {
        self.0
    }
}

/// Decoded audio, one contiguous `f32` sequence per channel
///
/// Samples are nominally in the range [-1.0, 1.0]. All channels have the same
/// length; the constructors reject anything else. The buffer is read-only
/// once built, analysis code copies what it needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: SampleRate,
}

impl SampleBuffer {
    /// Create a buffer from planar channel data
    ///
    /// # Errors
    /// Returns `InvalidBuffer` if the channels differ in length
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: SampleRate) -> Result<Self> {
        if let Some(first) = channels.first() {
            let frames = first.len();
            if let Some((index, channel)) = channels
                .iter()
                .enumerate()
                .find(|(_, c)| c.len() != frames)
            {
                return Err(MixdeskError::invalid_buffer(format!(
                    "channel {} has {} samples, channel 0 has {}",
                    index,
                    channel.len(),
                    frames
                )));
            }
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Create a buffer by de-interleaving `[L, R, L, R, ...]` style samples
    ///
    /// # Errors
    /// Returns `InvalidBuffer` if `channel_count` is zero or does not divide
    /// the sample count
    pub fn from_interleaved(
        samples: &[f32],
        channel_count: usize,
        sample_rate: SampleRate,
    ) -> Result<Self> {
        if channel_count == 0 {
            return Err(MixdeskError::invalid_buffer("channel count is zero"));
        }
        if samples.len() % channel_count != 0 {
            return Err(MixdeskError::invalid_buffer(format!(
                "sample count {} is not divisible by channel count {}",
                samples.len(),
                channel_count
            )));
        }

        let frames = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in samples.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// All channels, in container order
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// A single channel, if it exists
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Sample rate of the decoded audio
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Duration in seconds (zero for a zero sample rate)
    pub fn duration_secs(&self) -> f64 {
        match self.sample_rate.as_hz() {
            0 => 0.0,
            hz => self.frames() as f64 / f64::from(hz),
        }
    }

    /// Check if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rate_common_values() {
        assert_eq!(SampleRate::CD_QUALITY.as_hz(), 44_100);
        assert_eq!(SampleRate::DVD_QUALITY.as_hz(), 48_000);
    }

    #[test]
    fn rejects_unequal_channels() {
        let result = SampleBuffer::new(vec![vec![0.0; 4], vec![0.0; 3]], SampleRate::CD_QUALITY);
        assert!(matches!(result, Err(MixdeskError::InvalidBuffer(_))));
    }

    #[test]
    fn deinterleaves_stereo() {
        let buffer =
            SampleBuffer::from_interleaved(&[0.1, -0.1, 0.2, -0.2], 2, SampleRate::CD_QUALITY)
                .unwrap();
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.channel(0).unwrap(), &[0.1, 0.2]);
        assert_eq!(buffer.channel(1).unwrap(), &[-0.1, -0.2]);
    }

    #[test]
    fn interleaved_requires_whole_frames() {
        assert!(SampleBuffer::from_interleaved(&[0.0; 5], 2, SampleRate::CD_QUALITY).is_err());
        assert!(SampleBuffer::from_interleaved(&[0.0; 4], 0, SampleRate::CD_QUALITY).is_err());
    }

    #[test]
    fn duration() {
        let buffer = SampleBuffer::new(vec![vec![0.0; 88_200]], SampleRate::CD_QUALITY).unwrap();
        assert!((buffer.duration_secs() - 2.0).abs() < 1e-9);

        let zero_rate = SampleBuffer::new(vec![vec![0.0; 10]], SampleRate::new(0)).unwrap();
        assert_eq!(zero_rate.duration_secs(), 0.0);
    }

    #[test]
    fn empty_buffer_has_no_frames() {
        let buffer = SampleBuffer::new(Vec::new(), SampleRate::DVD_QUALITY).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.channel_count(), 0);
    }
}
