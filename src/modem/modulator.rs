//! Baseband modulators — one sample segment per timing token
//!
//! Each variant is a pure function of (kind, duration, timing): no oscillator
//! state carries over between tokens, so every segment starts at t = 0.
//!
//! - AM: `scale × (1 + 0.5·sin(2π·f·t))`
//! - FM: `scale × sin(2π·f_c·t + (Δf/f_m)·sin(2π·f_m·t))`
//!
//! `scale` is 1 for dots and dashes and 0 for gaps, so a gap is an explicit
//! run of zero samples rather than an absent segment.

use std::f64::consts::PI;

use crate::domain::{BasebandSample, ModemConfig, ModulationKind, SymbolKind, Timing};

/// AM modulation depth
const AM_DEPTH: f64 = 0.5;

/// Closed set of supported modulations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modulation {
    Am {
        /// Tone frequency in Hz
        frequency: f64,
    },
    Fm {
        /// Carrier frequency in Hz
        carrier: f64,
        /// Modulating tone frequency in Hz
        modulation: f64,
        /// Peak deviation in Hz
        deviation: f64,
    },
}

impl Modulation {
    /// Build the variant selected by a modem profile.
    pub fn from_config(config: &ModemConfig) -> Self {
        match config.modulation {
            ModulationKind::Am => Self::Am {
                frequency: config.am_frequency.as_hz(),
            },
            ModulationKind::Fm => Self::Fm {
                carrier: config.fm_carrier.as_hz(),
                modulation: config.fm_modulation.as_hz(),
                deviation: config.fm_deviation.as_hz(),
            },
        }
    }

    /// Largest absolute sample before output scaling
    pub fn peak_factor(&self) -> f64 {
        match self {
            Self::Am { .. } => 1.0 + AM_DEPTH,
            Self::Fm { .. } => 1.0,
        }
    }

    pub fn kind(&self) -> ModulationKind {
        match self {
            Self::Am { .. } => ModulationKind::Am,
            Self::Fm { .. } => ModulationKind::Fm,
        }
    }

    /// Generate the segment for one token.
    ///
    /// Length is `round(units × unit_seconds × sample_rate)`; zero units
    /// yields an empty segment.
    pub fn generate(&self, kind: SymbolKind, units: u32, timing: &Timing) -> Vec<BasebandSample> {
        let len = timing.samples_for(units);
        let scale = kind.scale();
        let sample_rate = timing.sample_rate as f64;

        (0..len)
            .map(|i| {
                let t = i as f64 / sample_rate;
                (scale * self.value_at(t)) as BasebandSample
            })
            .collect()
    }

    fn value_at(&self, t: f64) -> f64 {
        match *self {
            Self::Am { frequency } => 1.0 + AM_DEPTH * (2.0 * PI * frequency * t).sin(),
            Self::Fm {
                carrier,
                modulation,
                deviation,
            } => {
                let phase = 2.0 * PI * carrier * t
                    + (deviation / modulation) * (2.0 * PI * modulation * t).sin();
                phase.sin()
            }
        }
    }
}
