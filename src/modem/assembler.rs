//! Sample assembler — converts timing tokens to one baseband waveform
//!
//! Pipeline: text → Morse tokens → per-token segments → concatenation → output scale
//!
//! The output amplitude is applied once to the concatenated waveform, not per
//! segment. The waveform is real-only; the CS8 codec synthesizes the
//! imaginary channel as exactly zero.

use crate::domain::{BasebandSample, ModemConfig, SecCwResult, Timing, Token};
use crate::modem::modulator::Modulation;
use crate::modem::morse;

/// Output scale matching the signed 8-bit sample range
pub const OUTPUT_AMPLITUDE: f32 = 127.0;

/// An assembled waveform plus the bookkeeping needed to check it
#[derive(Debug, Clone)]
pub struct Waveform {
    pub samples: Vec<BasebandSample>,
    /// Number of token segments concatenated
    pub segment_count: usize,
    /// Sum of token durations in dot units
    pub total_units: u32,
}

/// Sample assembler: tokens in, scaled waveform out
pub struct SampleAssembler {
    modulation: Modulation,
    timing: Timing,
    amplitude: f32,
}

impl SampleAssembler {
    pub fn new(modulation: Modulation, timing: Timing) -> Self {
        Self {
            modulation,
            timing,
            amplitude: OUTPUT_AMPLITUDE,
        }
    }

    pub fn from_config(config: &ModemConfig) -> Self {
        Self {
            modulation: Modulation::from_config(config),
            timing: config.timing,
            amplitude: config.amplitude,
        }
    }

    /// Override the output scale.
    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Largest output amplitude whose waveform fits in signed 8 bits.
    pub fn max_unclipped_amplitude(&self) -> f32 {
        (OUTPUT_AMPLITUDE as f64 / self.modulation.peak_factor()).floor() as f32
    }

    pub fn modulation(&self) -> Modulation {
        self.modulation
    }

    /// Concatenate every token's segment in order, then scale once.
    pub fn assemble(&self, tokens: &[Token]) -> Waveform {
        let total_units = morse::total_units(tokens);
        let mut samples = Vec::with_capacity(self.timing.samples_for(total_units));

        for token in tokens {
            samples.extend(self.modulation.generate(token.kind, token.units, &self.timing));
        }

        for sample in &mut samples {
            *sample *= self.amplitude;
        }

        Waveform {
            samples,
            segment_count: tokens.len(),
            total_units,
        }
    }

    /// Key a text message into a scaled baseband waveform.
    pub fn encode(&self, text: &str) -> SecCwResult<Waveform> {
        let tokens = morse::encode_text(text)?;
        let waveform = self.assemble(&tokens);
        log::debug!(
            "keyed {} chars → {} segments, {} units, {} samples ({})",
            text.chars().count(),
            waveform.segment_count,
            waveform.total_units,
            waveform.samples.len(),
            self.modulation.kind()
        );
        Ok(waveform)
    }
}
