//! K-weighting filter design (ITU-R BS.1770-4)
//!
//! K-weighting is two cascaded biquads: a high-shelf "pre-filter" modelling
//! the acoustic effect of the head, followed by the RLB high-pass.
//!
//! For 48 kHz and 44.1 kHz the coefficients come from fixed tables. Every
//! other rate goes through a bilinear transform of the analog prototype,
//! using the prototype parameters fitted by pyloudnorm
//! (csteinmetz1/pyloudnorm, meter.py), which reproduce the 48 kHz table.

use crate::biquad::BiquadCoeffs;
use std::f64::consts::PI;

/// Stage 1 (high shelf) at 48 kHz, BS.1770-4 table 1
pub const PRE_FILTER_48K: BiquadCoeffs = BiquadCoeffs::new(
    1.53512485958697,
    -2.69169618940638,
    1.19839281085285,
    -1.69065929318241,
    0.73248077421585,
);

/// Stage 2 (high-pass) at 48 kHz, BS.1770-4 table 2
pub const HIGH_PASS_48K: BiquadCoeffs =
    BiquadCoeffs::new(1.0, -2.0, 1.0, -1.99004745483398, 0.99007225036621);

/// Stage 1 (high shelf) at 44.1 kHz
pub const PRE_FILTER_44K1: BiquadCoeffs = BiquadCoeffs::new(
    1.53084123005035,
    -2.65097999515473,
    1.16907907992159,
    -1.66365511325602,
    0.71259542807323,
);

/// Stage 2 (high-pass) at 44.1 kHz
pub const HIGH_PASS_44K1: BiquadCoeffs =
    BiquadCoeffs::new(1.0, -2.0, 1.0, -1.98916967362980, 0.98919903578704);

// Analog prototype of the pre-filter
const SHELF_CENTER_HZ: f64 = 1681.974450955533;
const SHELF_GAIN_DB: f64 = 3.999843853973347;
const SHELF_Q: f64 = 0.7071752369554196;
const SHELF_VB_EXPONENT: f64 = 0.4996667741545416;

// Analog prototype of the RLB high-pass
const HIGH_PASS_CORNER_HZ: f64 = 38.13547087602444;
const HIGH_PASS_Q: f64 = 0.5003270373238773;

/// Lowest rate the pre-filter can be designed for: the shelf must sit below Nyquist
pub const MIN_SAMPLE_RATE_HZ: f64 = 2.0 * SHELF_CENTER_HZ;

/// Whether `sample_rate` yields stable K-weighting filters
pub fn is_supported_rate(sample_rate: u32) -> bool {
    f64::from(sample_rate) > MIN_SAMPLE_RATE_HZ
}

/// K-weighting coefficients for `sample_rate`, as `(pre_filter, high_pass)`
pub fn design(sample_rate: u32) -> (BiquadCoeffs, BiquadCoeffs) {
    match sample_rate {
        48_000 => (PRE_FILTER_48K, HIGH_PASS_48K),
        44_100 => (PRE_FILTER_44K1, HIGH_PASS_44K1),
        other => design_bilinear(other),
    }
}

/// K-weighting coefficients derived by bilinear transform, for any rate
pub fn design_bilinear(sample_rate: u32) -> (BiquadCoeffs, BiquadCoeffs) {
    let fs = f64::from(sample_rate);
    (high_shelf(fs), high_pass(fs))
}

fn high_shelf(fs: f64) -> BiquadCoeffs {
    let k = (PI * SHELF_CENTER_HZ / fs).tan();
    let k2 = k * k;
    let vh = 10.0_f64.powf(SHELF_GAIN_DB / 20.0);
    let vb = vh.powf(SHELF_VB_EXPONENT);
    let a0 = 1.0 + k / SHELF_Q + k2;

    BiquadCoeffs {
        b0: (vh + vb * k / SHELF_Q + k2) / a0,
        b1: 2.0 * (k2 - vh) / a0,
        b2: (vh - vb * k / SHELF_Q + k2) / a0,
        a1: 2.0 * (k2 - 1.0) / a0,
        a2: (1.0 - k / SHELF_Q + k2) / a0,
    }
}

fn high_pass(fs: f64) -> BiquadCoeffs {
    let k = (PI * HIGH_PASS_CORNER_HZ / fs).tan();
    let k2 = k * k;
    let a0 = 1.0 + k / HIGH_PASS_Q + k2;

    BiquadCoeffs {
        b0: 1.0,
        b1: -2.0,
        b2: 1.0,
        a1: 2.0 * (k2 - 1.0) / a0,
        a2: (1.0 - k / HIGH_PASS_Q + k2) / a0,
    }
}
