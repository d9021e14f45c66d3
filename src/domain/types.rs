//! Core domain types

use std::fmt;
use std::str::FromStr;

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use super::error::{SecCwError, SecCwResult};

/// Real baseband sample, pre-amplitude range -1.5 to 1.5 (AM) or -1.0 to 1.0 (FM)
pub type BasebandSample = f32;

/// Complex IQ sample decoded from a capture
pub type IqSample = Complex<f32>;

/// Frequency in Hz
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frequency(pub f64);

impl Frequency {
    pub fn hz(hz: f64) -> Self {
        Self(hz)
    }

    pub fn khz(khz: f64) -> Self {
        Self(khz * 1_000.0)
    }

    pub fn as_hz(&self) -> f64 {
        self.0
    }
}

/// What a timing token keys: carrier on for a dot or dash, silence for a gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Dot,
    Dash,
    Gap,
}

impl SymbolKind {
    /// Amplitude scale applied to the modulator output for this kind.
    pub fn scale(self) -> f64 {
        match self {
            SymbolKind::Dot | SymbolKind::Dash => 1.0,
            SymbolKind::Gap => 0.0,
        }
    }
}

/// One timed element of a keyed message, measured in dot units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SymbolKind,
    pub units: u32,
}

impl Token {
    pub const fn new(kind: SymbolKind, units: u32) -> Self {
        Self { kind, units }
    }
}

/// Sampling grid shared by every segment of a waveform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Duration of one dot unit in seconds
    pub unit_seconds: f64,
}

impl Timing {
    /// Number of samples a token of `units` dot units occupies.
    pub fn samples_for(&self, units: u32) -> usize {
        (self.unit_seconds * units as f64 * self.sample_rate as f64).round() as usize
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            unit_seconds: 0.05,
        }
    }
}

/// Modulation selected for the keyed carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModulationKind {
    Am,
    Fm,
}

impl FromStr for ModulationKind {
    type Err = SecCwError;

    fn from_str(s: &str) -> SecCwResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Self::Am),
            "FM" => Ok(Self::Fm),
            other => Err(SecCwError::Configuration(format!(
                "Unsupported modulation type '{other}' (expected AM or FM)"
            ))),
        }
    }
}

impl fmt::Display for ModulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Am => f.write_str("AM"),
            Self::Fm => f.write_str("FM"),
        }
    }
}
