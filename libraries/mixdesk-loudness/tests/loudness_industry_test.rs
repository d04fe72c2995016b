//! ITU-R BS.1770-4 Compliance Tests
//!
//! These tests verify the meter against the standard's reference points:
//! - 997 Hz sine at 0 dBFS on one channel = -3.01 LKFS
//! - Equal-level channels sum in power (+3.01 LU for stereo)
//! - Surround channel weighting (1.41, about +1.5 dB)
//! - Agreement with an independent BS.1770 implementation (libebur128 port)
//!
//! Reference documents:
//! - https://www.itu.int/rec/R-REC-BS.1770
//! - https://tech.ebu.ch/docs/tech/tech3341.pdf

use ebur128::{EbuR128, Mode};
use mixdesk_core::{SampleBuffer, SampleRate};
use mixdesk_loudness::{measure, LoudnessMeter};
use std::f64::consts::PI;

// ============================================================================
// Test Signal Generators
// ============================================================================

/// Generate an interleaved sine wave, identical on every channel
fn generate_sine_wave(
    sample_rate: u32,
    channels: u32,
    frequency_hz: f64,
    amplitude_linear: f64,
    duration_secs: f64,
) -> Vec<f32> {
    let num_samples = (sample_rate as f64 * duration_secs) as usize;
    let mut samples = Vec::with_capacity(num_samples * channels as usize);

    for i in 0..num_samples {
        let t = i as f64 / sample_rate as f64;
        let sample = (amplitude_linear * (2.0 * PI * frequency_hz * t).sin()) as f32;
        for _ in 0..channels {
            samples.push(sample);
        }
    }

    samples
}

/// Generate a sine wave at specified dBFS level
fn generate_sine_at_dbfs(
    sample_rate: u32,
    channels: u32,
    frequency_hz: f64,
    level_dbfs: f64,
    duration_secs: f64,
) -> Vec<f32> {
    let amplitude = 10.0_f64.powf(level_dbfs / 20.0);
    generate_sine_wave(sample_rate, channels, frequency_hz, amplitude, duration_secs)
}

/// Generate interleaved noise alternating between a loud and a quiet section
///
/// Each channel gets its own noise sequence; the quiet sections are 40 dB
/// down so the relative gate has something to discard.
fn generate_gated_program(sample_rate: u32, channels: u32, duration_secs: f64) -> Vec<f32> {
    let frames = (sample_rate as f64 * duration_secs) as usize;
    let section = sample_rate as usize * 2;
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut samples = Vec::with_capacity(frames * channels as usize);

    for i in 0..frames {
        let level = if (i / section) % 2 == 0 { 0.5 } else { 0.005 };
        for _ in 0..channels {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let random = ((state >> 33) as f64 / (1u64 << 31) as f64) * 2.0 - 1.0;
            samples.push((random * level) as f32);
        }
    }

    samples
}

fn to_buffer(interleaved: &[f32], channels: u32, sample_rate: u32) -> SampleBuffer {
    SampleBuffer::from_interleaved(interleaved, channels as usize, SampleRate::new(sample_rate))
        .unwrap()
}

/// Integrated loudness from the reference meter
fn reference_lufs(interleaved: &[f32], channels: u32, sample_rate: u32) -> f64 {
    let mut meter = EbuR128::new(channels, sample_rate, Mode::I).unwrap();
    meter.add_frames_f32(interleaved).unwrap();
    meter.loudness_global().unwrap()
}

// ============================================================================
// Reference Tone
// ============================================================================

#[test]
fn test_997hz_full_scale_mono_at_48k() {
    let samples = generate_sine_wave(48_000, 1, 997.0, 1.0, 5.0);
    let lufs = measure(&to_buffer(&samples, 1, 48_000));

    assert!(
        (lufs - -3.01).abs() < 0.1,
        "0 dBFS 997 Hz should read -3.01 LUFS, got {:.3}",
        lufs
    );
}

#[test]
fn test_997hz_full_scale_mono_at_44k1() {
    let samples = generate_sine_wave(44_100, 1, 997.0, 1.0, 5.0);
    let lufs = measure(&to_buffer(&samples, 1, 44_100));

    assert!((lufs - -3.01).abs() < 0.1, "got {:.3} LUFS", lufs);
}

#[test]
fn test_997hz_full_scale_mono_at_96k() {
    // 96 kHz has no fixed table and goes through the bilinear design
    let samples = generate_sine_wave(96_000, 1, 997.0, 1.0, 5.0);
    let lufs = measure(&to_buffer(&samples, 1, 96_000));

    assert!((lufs - -3.01).abs() < 0.1, "got {:.3} LUFS", lufs);
}

#[test]
fn test_stereo_minus_20_dbfs_reads_minus_20() {
    // Each channel contributes -23.01 LUFS; two equal channels add 3.01 LU
    let samples = generate_sine_at_dbfs(48_000, 2, 997.0, -20.0, 5.0);
    let lufs = measure(&to_buffer(&samples, 2, 48_000));

    assert!((lufs - -20.0).abs() < 0.1, "got {:.3} LUFS", lufs);
}

#[test]
fn test_level_tracks_dbfs() {
    for level in [-6.0, -12.0, -24.0, -40.0] {
        let samples = generate_sine_at_dbfs(48_000, 1, 997.0, level, 3.0);
        let lufs = measure(&to_buffer(&samples, 1, 48_000));
        let expected = level - 3.01;

        assert!(
            (lufs - expected).abs() < 0.1,
            "{} dBFS: expected {:.2}, got {:.3}",
            level,
            expected,
            lufs
        );
    }
}

// ============================================================================
// Channel Weighting
// ============================================================================

#[test]
fn test_surround_channel_is_weighted_by_1_41() {
    let tone = generate_sine_at_dbfs(48_000, 1, 997.0, -20.0, 3.0);
    let silence = vec![0.0f32; tone.len()];

    let mut front = vec![silence.clone(); 5];
    front[0] = tone.clone();
    let mut surround = vec![silence; 5];
    surround[3] = tone;

    let rate = SampleRate::DVD_QUALITY;
    let front = measure(&SampleBuffer::new(front, rate).unwrap());
    let surround = measure(&SampleBuffer::new(surround, rate).unwrap());

    let expected_gain = 10.0 * 1.41f64.log10();
    assert!(
        ((surround - front) - expected_gain).abs() < 1e-9,
        "surround should be {:.4} LU louder, got {:.4}",
        expected_gain,
        surround - front
    );
}

#[test]
fn test_three_channels_are_unweighted() {
    let tone = generate_sine_at_dbfs(48_000, 1, 997.0, -20.0, 3.0);
    let silence = vec![0.0f32; tone.len()];

    let left = vec![tone.clone(), silence.clone(), silence.clone()];
    let centre = vec![silence.clone(), silence, tone];

    let rate = SampleRate::DVD_QUALITY;
    let left = measure(&SampleBuffer::new(left, rate).unwrap());
    let centre = measure(&SampleBuffer::new(centre, rate).unwrap());

    assert_eq!(left, centre);
}

// ============================================================================
// Cross-check against the reference meter
// ============================================================================

#[test]
fn test_matches_reference_meter_mono() {
    for rate in [44_100, 48_000, 96_000] {
        let samples = generate_gated_program(rate, 1, 12.0);
        let ours = measure(&to_buffer(&samples, 1, rate));
        let reference = reference_lufs(&samples, 1, rate);

        assert!(
            (ours - reference).abs() < 0.1,
            "{} Hz: ours {:.3}, reference {:.3}",
            rate,
            ours,
            reference
        );
    }
}

#[test]
fn test_matches_reference_meter_stereo() {
    let samples = generate_gated_program(48_000, 2, 12.0);
    let ours = measure(&to_buffer(&samples, 2, 48_000));
    let reference = reference_lufs(&samples, 2, 48_000);

    assert!(
        (ours - reference).abs() < 0.1,
        "ours {:.3}, reference {:.3}",
        ours,
        reference
    );
}

#[test]
fn test_matches_reference_meter_five_channels() {
    // Five channels map to L, R, C, Ls, Rs on both meters
    let samples = generate_gated_program(48_000, 5, 12.0);
    let ours = measure(&to_buffer(&samples, 5, 48_000));
    let reference = reference_lufs(&samples, 5, 48_000);

    assert!(
        (ours - reference).abs() < 0.1,
        "ours {:.3}, reference {:.3}",
        ours,
        reference
    );
}

#[test]
fn test_relative_gate_discards_quiet_sections() {
    let samples = generate_gated_program(48_000, 1, 12.0);
    let report = LoudnessMeter::new(48_000).analyze(&to_buffer(&samples, 1, 48_000));

    // Quiet sections sit 40 dB down, inside the absolute gate but far below the relative one
    assert!(report.gated_block_count < report.block_count);
    assert!(report.gated_block_count > report.block_count / 3);
}
