//! Configuration profiles
//!
//! A Configuration is a saved profile holding the keying parameters used when
//! generating a capture and the parameters used when analyzing one. Profiles
//! are plain JSON; any missing field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{SecCwError, SecCwResult};
use super::types::{Frequency, ModulationKind, Timing};

/// Parameters for turning a message into a baseband waveform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModemConfig {
    pub timing: Timing,
    pub modulation: ModulationKind,
    /// AM reference tone
    pub am_frequency: Frequency,
    /// FM carrier
    pub fm_carrier: Frequency,
    /// FM modulating tone
    pub fm_modulation: Frequency,
    /// FM peak deviation
    pub fm_deviation: Frequency,
    /// Output scale applied once to the assembled waveform (8-bit range)
    pub amplitude: f32,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            timing: Timing::default(),
            modulation: ModulationKind::Am,
            am_frequency: Frequency::hz(300.0),
            fm_carrier: Frequency::khz(100.0),
            fm_modulation: Frequency::khz(1.0),
            fm_deviation: Frequency::khz(75.0),
            amplitude: 127.0,
        }
    }
}

/// Parameters for analyzing a CS8 capture
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sample_rate: f64,
    /// Samples beyond this count are dropped before the FFT
    pub max_fft_samples: usize,
    /// Display budget for spectrum and IQ series
    pub max_plot_points: usize,
    /// Display budget for the amplitude series
    pub max_amplitude_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            max_fft_samples: 1 << 20,
            max_plot_points: 2_000,
            max_amplitude_points: 40_000,
        }
    }
}

/// A saved configuration profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Profile name (e.g., "Default", "FM 100k")
    pub name: String,
    pub modem: ModemConfig,
    pub analysis: AnalysisConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            modem: ModemConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Configuration {
    /// Load a profile from a JSON file.
    pub fn load(path: &Path) -> SecCwResult<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| {
            SecCwError::Configuration(format!("Failed to parse config '{}': {e}", path.display()))
        })
    }

    /// Write a profile as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> SecCwResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SecCwError::Configuration(format!("Serialization error: {e}")))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_has_sensible_values() {
        let config = Configuration::default();
        assert_eq!(config.name, "Default");
        assert_eq!(config.modem.timing.sample_rate, 48000);
        assert_eq!(config.modem.am_frequency.as_hz(), 300.0);
        assert_eq!(config.modem.amplitude, 127.0);
        assert_eq!(config.analysis.max_fft_samples, 1_048_576);
    }

    #[test]
    fn configuration_serializes_to_json() {
        let config = Configuration::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"name\":\"Default\""));
        assert!(json.contains("\"modulation\":\"AM\""));
    }

    #[test]
    fn partial_profile_falls_back_to_defaults() {
        let json = r#"{ "name": "FM profile", "modem": { "modulation": "FM" } }"#;
        let config: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(config.name, "FM profile");
        assert_eq!(config.modem.modulation, ModulationKind::Fm);
        assert_eq!(config.modem.fm_deviation.as_hz(), 75_000.0);
        assert_eq!(config.analysis.sample_rate, 48_000.0);
    }

    #[test]
    fn save_then_load_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let mut config = Configuration::default();
        config.name = "Field".into();
        config.modem.amplitude = 100.0;
        config.save(&path).unwrap();

        let loaded = Configuration::load(&path).unwrap();
        assert_eq!(loaded.name, "Field");
        assert_eq!(loaded.modem.amplitude, 100.0);
    }

    #[test]
    fn malformed_profile_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Configuration::load(&path),
            Err(SecCwError::Configuration(_))
        ));
    }
}
