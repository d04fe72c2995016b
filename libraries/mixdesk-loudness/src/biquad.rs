//! Second-order IIR filter sections
//!
//! Filters run in Direct-Form II Transposed, in place, in `f64`.

/// Coefficients of one biquad section
///
/// `a0` is implicitly 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Create coefficients from the feed-forward and feedback terms
    pub const fn new(b0: f64, b1: f64, b2: f64, a1: f64, a2: f64) -> Self {
        Self { b0, b1, b2, a1, a2 }
    }

    /// Coefficients that pass the signal through unchanged
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 0.0)
    }
}

/// A biquad with its running state
///
/// Processing a signal in several consecutive chunks gives exactly the same
/// output as processing it in one call.
#[derive(Debug, Clone)]
pub struct Biquad {
    coeffs: BiquadCoeffs,
    z1: f64,
    z2: f64,
}

impl Biquad {
    /// Create a filter with zeroed state
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            z1: 0.0,
            z2: 0.0,
        }
    }

    /// Filter `samples` in place, continuing from the previous call's state
    #[inline]
    pub fn process(&mut self, samples: &mut [f64]) {
        let BiquadCoeffs { b0, b1, b2, a1, a2 } = self.coeffs;
        let (mut z1, mut z2) = (self.z1, self.z2);

        for sample in samples.iter_mut() {
            let x = *sample;
            let y = b0 * x + z1;
            z1 = b1 * x - a1 * y + z2;
            z2 = b2 * x - a2 * y;
            *sample = y;
        }

        self.z1 = z1;
        self.z2 = z2;
    }

    /// Clear the state, keeping the coefficients
    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }

    pub fn coeffs(&self) -> &BiquadCoeffs {
        &self.coeffs
    }
}

/// Filter `samples` in place starting from zero state
pub fn apply(samples: &mut [f64], coeffs: &BiquadCoeffs) {
    Biquad::new(*coeffs).process(samples);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_passes_through() {
        let mut samples = vec![0.5, -0.25, 1.0, 0.0];
        apply(&mut samples, &BiquadCoeffs::identity());
        assert_eq!(samples, vec![0.5, -0.25, 1.0, 0.0]);
    }

    #[test]
    fn impulse_response_follows_recurrence() {
        // y[n] = b0 x[n] + b1 x[n-1] + b2 x[n-2] - a1 y[n-1] - a2 y[n-2]
        let c = BiquadCoeffs::new(0.5, 0.25, 0.125, -0.5, 0.25);
        let mut samples = vec![1.0, 0.0, 0.0, 0.0];
        apply(&mut samples, &c);

        let y0 = 0.5;
        let y1 = 0.25 - (-0.5) * y0;
        let y2 = 0.125 - (-0.5) * y1 - 0.25 * y0;
        let y3 = -(-0.5) * y2 - 0.25 * y1;
        assert_eq!(samples, vec![y0, y1, y2, y3]);
    }

    #[test]
    fn chunked_matches_one_shot() {
        let c = BiquadCoeffs::new(1.53, -2.69, 1.19, -1.69, 0.73);
        let signal: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37).sin()).collect();

        let mut one_shot = signal.clone();
        apply(&mut one_shot, &c);

        let mut chunked = signal;
        let mut filter = Biquad::new(c);
        for chunk in chunked.chunks_mut(37) {
            filter.process(chunk);
        }

        assert_eq!(one_shot, chunked);
    }

    #[test]
    fn reset_clears_state() {
        let c = BiquadCoeffs::new(0.5, 0.5, 0.0, -0.5, 0.0);
        let mut filter = Biquad::new(c);

        let mut first = vec![1.0, 0.0, 0.0];
        filter.process(&mut first);
        filter.reset();

        let mut second = vec![1.0, 0.0, 0.0];
        filter.process(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_is_fine() {
        let mut samples: Vec<f64> = Vec::new();
        apply(&mut samples, &BiquadCoeffs::identity());
        assert!(samples.is_empty());
    }
}
