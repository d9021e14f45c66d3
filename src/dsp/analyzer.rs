//! Capture analysis: amplitude over time, centered spectrum, raw IQ channels
//!
//! All series are computed at full resolution. `decimated` produces a
//! display copy by taking every n-th point; it never recomputes values.

use num_complex::Complex;
use serde::Serialize;

use crate::domain::IqSample;
use crate::dsp::fft::FftProcessor;

/// Magnitude of every sample against its timestamp
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmplitudeSeries {
    /// Seconds, `i / sample_rate`
    pub time: Vec<f64>,
    pub amplitude: Vec<f32>,
}

/// Zero-centered magnitude spectrum
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spectrum {
    /// Hz, linearly spanning `[-fs/2, fs/2]`
    pub freq: Vec<f64>,
    pub magnitude_db: Vec<f32>,
    /// Transform length after zero-padding
    pub fft_len: usize,
    /// Samples dropped by the `max_samples` limit
    pub dropped: usize,
}

/// Real and imaginary channels split apart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IqSeries {
    pub real: Vec<f32>,
    pub imag: Vec<f32>,
}

/// `amplitude[i] = |iq[i]|`, `time[i] = i / sample_rate`
pub fn amplitude_series(iq: &[IqSample], sample_rate: f64) -> AmplitudeSeries {
    strided_amplitude_series(iq, sample_rate, 1)
}

/// Amplitude series of samples taken every `stride`-th position of a capture.
///
/// Timestamps keep their position in the full capture, so this equals
/// `amplitude_series(full, fs).decimated(..)` with the same stride.
pub fn strided_amplitude_series(iq: &[IqSample], sample_rate: f64, stride: usize) -> AmplitudeSeries {
    let stride = stride.max(1);
    AmplitudeSeries {
        time: (0..iq.len()).map(|i| (i * stride) as f64 / sample_rate).collect(),
        amplitude: iq.iter().map(|s| s.norm()).collect(),
    }
}

/// Centered dB spectrum of at most `max_samples` leading samples.
///
/// The truncated input is zero-padded to the next power of two. Empty input
/// gives an empty spectrum.
pub fn spectrum(iq: &[IqSample], sample_rate: f64, max_samples: usize) -> Spectrum {
    let used = iq.len().min(max_samples);
    prefix_spectrum(&iq[..used], iq.len(), sample_rate)
}

/// Spectrum of the leading samples of a capture holding `total_len` samples.
///
/// For callers that decoded only the prefix; `dropped` reports the rest.
pub fn prefix_spectrum(prefix: &[IqSample], total_len: usize, sample_rate: f64) -> Spectrum {
    let used = prefix.len();
    let dropped = total_len.saturating_sub(used);
    if dropped > 0 {
        log::info!("FFT limited to {used} samples of {total_len}");
    }

    if used == 0 {
        return Spectrum {
            freq: Vec::new(),
            magnitude_db: Vec::new(),
            fft_len: 0,
            dropped,
        };
    }

    let processor = FftProcessor::new(FftProcessor::padded_len(used));
    let magnitude_db = processor.compute(prefix);
    let freq = linspace(-sample_rate / 2.0, sample_rate / 2.0, magnitude_db.len());

    Spectrum {
        freq,
        magnitude_db,
        fft_len: processor.fft_size(),
        dropped,
    }
}

pub fn iq_components(iq: &[IqSample]) -> IqSeries {
    IqSeries {
        real: iq.iter().map(|s| s.re).collect(),
        imag: iq.iter().map(|s| s.im).collect(),
    }
}

/// Display stride keeping roughly `max_points` of `len` points
pub fn decimation_stride(len: usize, max_points: usize) -> usize {
    if max_points == 0 {
        return 1;
    }
    (len / max_points).max(1)
}

fn every_nth<T: Copy>(values: &[T], stride: usize) -> Vec<T> {
    values.iter().step_by(stride).copied().collect()
}

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = stop;
            values
        }
    }
}

impl AmplitudeSeries {
    pub fn decimated(&self, max_points: usize) -> Self {
        let stride = decimation_stride(self.amplitude.len(), max_points);
        Self {
            time: every_nth(&self.time, stride),
            amplitude: every_nth(&self.amplitude, stride),
        }
    }

    /// Largest magnitude in the series
    pub fn peak(&self) -> f32 {
        self.amplitude.iter().copied().fold(0.0, f32::max)
    }
}

impl Spectrum {
    pub fn decimated(&self, max_points: usize) -> Self {
        let stride = decimation_stride(self.magnitude_db.len(), max_points);
        Self {
            freq: every_nth(&self.freq, stride),
            magnitude_db: every_nth(&self.magnitude_db, stride),
            fft_len: self.fft_len,
            dropped: self.dropped,
        }
    }

    /// Frequency and level of the strongest bin
    pub fn peak(&self) -> Option<(f64, f32)> {
        self.magnitude_db
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, &db)| (self.freq[i], db))
    }
}

impl IqSeries {
    pub fn decimated(&self, max_points: usize) -> Self {
        let stride = decimation_stride(self.real.len(), max_points);
        Self {
            real: every_nth(&self.real, stride),
            imag: every_nth(&self.imag, stride),
        }
    }
}

/// Complex view of a real waveform, imaginary channel at rest
pub fn to_iq(real: &[f32]) -> Vec<IqSample> {
    real.iter().map(|&re| Complex::new(re, 0.0)).collect()
}
