/// Audio decoder implementation using Symphonia
use async_trait::async_trait;
use bytes::Bytes;
use mixdesk_core::{
    AudioDecoder, CancellationToken, MixdeskError, Result, SampleBuffer, SampleRate,
};
use std::io::Cursor;
use std::path::Path;
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use tracing::{debug, warn};

/// Decodes in-memory audio with Symphonia
///
/// Supports: WAV, AIFF, FLAC, MP3, AAC/M4A, OGG
///
/// Output is planar `f32` with every channel kept (no downmix). Decoding
/// runs on the blocking pool and checks the cancellation token before each
/// packet.
#[derive(Debug, Clone, Default)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode synchronously on the current thread
    ///
    /// # Errors
    /// Returns a decode error for unreadable input, or `Cancelled`
    pub fn decode_blocking(
        bytes: Bytes,
        extension: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<SampleBuffer> {
        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

        // Create a hint to help the format registry guess the format
        let mut hint = Hint::new();
        if let Some(ext) = extension {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| MixdeskError::decode(format!("Failed to probe audio: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| MixdeskError::decode("No audio tracks found"))?;
        let track_id = track.id;
        let mut sample_rate = track.codec_params.sample_rate;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| MixdeskError::decode(format!("Failed to create decoder: {}", e)))?;

        let mut channels: Vec<Vec<f32>> = Vec::new();
        let mut skipped_packets = 0usize;

        loop {
            if cancel.is_cancelled() {
                return Err(MixdeskError::Cancelled);
            }

            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => {
                    return Err(MixdeskError::decode(format!("Error reading packet: {}", e)));
                }
            };

            // Skip packets that are not for the default track
            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(reason)) => {
                    // A corrupt packet is dropped, the rest of the stream still decodes
                    skipped_packets += 1;
                    warn!(reason, "Skipping undecodable packet");
                    continue;
                }
                Err(e) => return Err(MixdeskError::decode(format!("Decode error: {}", e))),
            };

            let spec = *decoded.spec();
            let channel_count = spec.channels.count();
            if channels.is_empty() {
                channels = vec![Vec::new(); channel_count];
            } else if channels.len() != channel_count {
                return Err(MixdeskError::decode(format!(
                    "Channel count changed from {} to {} mid-stream",
                    channels.len(),
                    channel_count
                )));
            }
            sample_rate.get_or_insert(spec.rate);

            append_planar(decoded, &mut channels);
        }

        let sample_rate =
            sample_rate.ok_or_else(|| MixdeskError::decode("Unknown sample rate"))?;
        let buffer = SampleBuffer::new(channels, SampleRate::new(sample_rate))?;

        debug!(
            channels = buffer.channel_count(),
            frames = buffer.frames(),
            sample_rate,
            skipped_packets,
            "Audio decoded"
        );

        Ok(buffer)
    }
}

#[async_trait]
impl AudioDecoder for SymphoniaDecoder {
    async fn decode(
        &self,
        bytes: Bytes,
        file_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<SampleBuffer> {
        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_owned);
        let cancel = cancel.clone();

        tokio::task::spawn_blocking(move || {
            Self::decode_blocking(bytes, extension.as_deref(), &cancel)
        })
        .await
        .map_err(|e| MixdeskError::decode(format!("Decode task failed: {}", e)))?
    }
}

/// Append one decoded packet to the planar output as `f32`
///
/// Signed integers use symmetric scaling (divide by 2^(N-1)).
fn append_planar(decoded: AudioBufferRef<'_>, channels: &mut [Vec<f32>]) {
    match decoded {
        AudioBufferRef::F32(buf) => extend_channels(&buf, channels, |s| s),
        AudioBufferRef::F64(buf) => extend_channels(&buf, channels, |s| s as f32),
        AudioBufferRef::S32(buf) => extend_channels(&buf, channels, |s| s as f32 / 2147483648.0),
        AudioBufferRef::S24(buf) => {
            extend_channels(&buf, channels, |s| s.inner() as f32 / 8388608.0);
        }
        AudioBufferRef::S16(buf) => extend_channels(&buf, channels, |s| s as f32 / 32768.0),
        AudioBufferRef::S8(buf) => extend_channels(&buf, channels, |s| s as f32 / 128.0),
        AudioBufferRef::U32(buf) => extend_channels(&buf, channels, |s| {
            (s as f32 / u32::MAX as f32) * 2.0 - 1.0
        }),
        AudioBufferRef::U24(buf) => extend_channels(&buf, channels, |s| {
            (s.inner() as f32 / 16777215.0) * 2.0 - 1.0
        }),
        AudioBufferRef::U16(buf) => extend_channels(&buf, channels, |s| {
            (s as f32 / u16::MAX as f32) * 2.0 - 1.0
        }),
        AudioBufferRef::U8(buf) => extend_channels(&buf, channels, |s| {
            (s as f32 / u8::MAX as f32) * 2.0 - 1.0
        }),
    }
}

fn extend_channels<T, F>(buf: &AudioBuffer<T>, channels: &mut [Vec<f32>], normalize: F)
where
    T: Sample + Copy,
    F: Fn(T) -> f32,
{
    for (index, channel) in channels.iter_mut().enumerate() {
        channel.extend(buf.chan(index).iter().map(|&s| normalize(s)));
    }
}
