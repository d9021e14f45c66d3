//! FFT processing for capture spectra

use std::sync::Arc;
use rustfft::{Fft, FftPlanner, num_complex::Complex};

/// Floor applied to magnitudes before taking the log, avoids -infinity
const MAGNITUDE_FLOOR: f32 = 1e-12;

/// Forward FFT of a fixed power-of-two size, centered and in dB
pub struct FftProcessor {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
}

impl FftProcessor {
    /// Create a new FFT processor with the given size
    pub fn new(fft_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        Self { fft, fft_size }
    }

    /// Size needed to hold `len` samples: the next power of two ≥ `len`
    pub fn padded_len(len: usize) -> usize {
        len.next_power_of_two()
    }

    /// Compute the zero-centered magnitude spectrum in dB.
    ///
    /// Input longer than `fft_size` is truncated, shorter input is
    /// zero-padded. No window is applied.
    pub fn compute(&self, samples: &[Complex<f32>]) -> Vec<f32> {
        let mut buffer: Vec<Complex<f32>> =
            samples.iter().take(self.fft_size).copied().collect();
        buffer.resize(self.fft_size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        // fftshift: move the zero-frequency bin to the middle
        buffer.rotate_right(self.fft_size / 2);

        buffer
            .iter()
            .map(|c| 20.0 * c.norm().max(MAGNITUDE_FLOOR).log10())
            .collect()
    }

    /// Get the FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(freq: f32, len: usize) -> Vec<Complex<f32>> {
        (0..len)
            .map(|i| {
                let phase = 2.0 * std::f32::consts::PI * freq * i as f32 / 48000.0;
                Complex::new(phase.cos(), phase.sin())
            })
            .collect()
    }

    #[test]
    fn test_fft_complex_tone_lands_right_of_center() {
        let processor = FftProcessor::new(1024);
        let spectrum = processor.compute(&tone(3000.0, 1024));

        let peak_bin = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(i, _)| i)
            .unwrap();

        // bin offset = freq * fft_size / sample_rate = 3000 * 1024 / 48000 = 64
        assert_eq!(peak_bin, 512 + 64);
    }

    #[test]
    fn dc_lands_in_the_center_bin() {
        let processor = FftProcessor::new(8);
        let spectrum = processor.compute(&[Complex::new(1.0, 0.0); 8]);
        // |X[0]| = 8 → 20·log10(8)
        assert!((spectrum[4] - 20.0 * 8f32.log10()).abs() < 1e-4);
        // every other bin is (numerically) empty
        assert!(spectrum[0] < -100.0);
    }

    #[test]
    fn padded_len_is_next_power_of_two() {
        assert_eq!(FftProcessor::padded_len(1000), 1024);
        assert_eq!(FftProcessor::padded_len(1024), 1024);
        assert_eq!(FftProcessor::padded_len(1025), 2048);
        assert_eq!(FftProcessor::padded_len(1), 1);
    }

    #[test]
    fn compute_repeated_calls_give_identical_results() {
        // The plan is cached on the processor; repeated runs over the same
        // input must stay bit-identical.
        let processor = FftProcessor::new(1024);
        let samples = tone(1000.0, 1000);

        let first = processor.compute(&samples);
        let second = processor.compute(&samples);

        assert_eq!(
            first, second,
            "repeated compute() calls must return identical results"
        );
    }
}
