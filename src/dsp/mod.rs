//! Digital Signal Processing
//!
//! Pure functions for capture analysis. No I/O dependencies.

pub mod analyzer;
pub mod fft;

// Re-export commonly used items
pub use analyzer::{
    amplitude_series, decimation_stride, iq_components, prefix_spectrum, spectrum,
    strided_amplitude_series, AmplitudeSeries, IqSeries, Spectrum,
};
pub use fft::FftProcessor;
