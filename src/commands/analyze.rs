//! Analyze command — amplitude, spectrum and IQ views of CS8 captures
//!
//! Each capture is analyzed independently: a missing or malformed file is
//! reported and the rest of the batch still runs. With a save directory the
//! display-decimated series are exported as JSON for an external plotter.
//!
//! Captures are memory-mapped and never decoded whole: the spectrum reads
//! only its leading `max_fft_samples` pairs and the exported series read
//! only the pairs they display.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::cs8::{Cs8File, CS8_EXTENSION};
use crate::domain::{AnalysisConfig, SecCwError, SecCwResult};
use crate::dsp::{decimation_stride, iq_components, prefix_spectrum, strided_amplitude_series};

/// Which views to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    #[default]
    Amplitude,
    Fft,
    Iq,
    All,
}

impl AnalysisMode {
    fn amplitude(self) -> bool {
        matches!(self, Self::Amplitude | Self::All)
    }

    fn fft(self) -> bool {
        matches!(self, Self::Fft | Self::All)
    }

    fn iq(self) -> bool {
        matches!(self, Self::Iq | Self::All)
    }
}

impl FromStr for AnalysisMode {
    type Err = SecCwError;

    fn from_str(s: &str) -> SecCwResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amplitude" => Ok(Self::Amplitude),
            "fft" => Ok(Self::Fft),
            "iq" => Ok(Self::Iq),
            "all" => Ok(Self::All),
            other => Err(SecCwError::Configuration(format!(
                "Unknown analysis mode '{other}' (expected amplitude, fft, iq or all)"
            ))),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amplitude => f.write_str("amplitude"),
            Self::Fft => f.write_str("fft"),
            Self::Iq => f.write_str("iq"),
            Self::All => f.write_str("all"),
        }
    }
}

/// Per-capture summary
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub path: PathBuf,
    pub sample_count: usize,
    pub trailing_byte: bool,
    pub amplitude_peak: Option<f32>,
    /// (Hz, dB) of the strongest bin
    pub spectrum_peak: Option<(f64, f32)>,
    pub fft_len: Option<usize>,
    /// Samples past `max_fft_samples`, left out of the spectrum
    pub fft_dropped: Option<usize>,
    pub exported: Vec<PathBuf>,
}

/// Outcome of a batch: successes and per-file failures
#[derive(Debug, Default)]
pub struct BatchReport {
    pub reports: Vec<AnalysisReport>,
    pub failures: Vec<(PathBuf, SecCwError)>,
}

/// Analyze one capture.
pub fn analyze_file(
    path: &Path,
    mode: AnalysisMode,
    config: &AnalysisConfig,
    save_dir: Option<&Path>,
) -> SecCwResult<AnalysisReport> {
    if path.extension().and_then(|e| e.to_str()) != Some(CS8_EXTENSION) {
        log::warn!("{}: not a .{CS8_EXTENSION} file, reading it as CS8 anyway", path.display());
    }

    let capture = Cs8File::open(path)?;
    let total = capture.len();
    let prefix = export_prefix(path);
    let mut report = AnalysisReport {
        path: path.to_path_buf(),
        sample_count: total,
        trailing_byte: capture.trailing_byte(),
        amplitude_peak: None,
        spectrum_peak: None,
        fft_len: None,
        fft_dropped: None,
        exported: Vec::new(),
    };

    if mode.iq() {
        if let Some(dir) = save_dir {
            let stride = decimation_stride(total, config.max_plot_points);
            let series = iq_components(&capture.decode_strided(stride).samples);
            let out = dir.join(format!("{prefix}iq.json"));
            export(&series, &out)?;
            report.exported.push(out);
        }
    }

    if mode.amplitude() {
        log::info!("Amplitude vs Time...");
        report.amplitude_peak = Some(capture.samples().map(|s| s.norm()).fold(0.0, f32::max));
        if let Some(dir) = save_dir {
            let stride = decimation_stride(total, config.max_amplitude_points);
            let shown = capture.decode_strided(stride);
            let series = strided_amplitude_series(&shown.samples, config.sample_rate, stride);
            let out = dir.join(format!("{prefix}amplitude.json"));
            export(&series, &out)?;
            report.exported.push(out);
        }
    }

    if mode.fft() {
        log::info!("FFT...");
        let head = capture.decode_prefix(config.max_fft_samples);
        let spec = prefix_spectrum(&head.samples, total, config.sample_rate);
        report.spectrum_peak = spec.peak();
        report.fft_len = Some(spec.fft_len);
        report.fft_dropped = Some(spec.dropped);
        if let Some(dir) = save_dir {
            let out = dir.join(format!("{prefix}fft.json"));
            export(&spec.decimated(config.max_plot_points), &out)?;
            report.exported.push(out);
        }
    }

    Ok(report)
}

/// Analyze every capture, collecting failures instead of stopping on them.
pub fn analyze_batch(
    paths: &[PathBuf],
    mode: AnalysisMode,
    config: &AnalysisConfig,
    save_dir: Option<&Path>,
) -> BatchReport {
    let mut batch = BatchReport::default();

    for path in paths {
        match analyze_file(path, mode, config, save_dir) {
            Ok(report) => {
                log::info!(
                    "{}: {} samples{}",
                    path.display(),
                    report.sample_count,
                    if report.trailing_byte { " (odd byte count, last byte dropped)" } else { "" }
                );
                if let Some((freq, db)) = report.spectrum_peak {
                    log::info!("{}: spectral peak {db:.1} dB at {freq:.1} Hz", path.display());
                }
                for out in &report.exported {
                    log::info!("Series saved : {}", out.display());
                }
                batch.reports.push(report);
            }
            Err(e) => {
                log::error!("{}: {e}", path.display());
                batch.failures.push((path.clone(), e));
            }
        }
    }

    batch
}

/// `<file stem>_`, the prefix for exported series
fn export_prefix(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}_")
}

fn export<T: Serialize>(series: &T, out: &Path) -> SecCwResult<()> {
    let json = serde_json::to_vec(series)
        .map_err(|e| SecCwError::Format(format!("Failed to serialize series: {e}")))?;
    std::fs::write(out, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_capture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn analysis_mode_parses() {
        assert_eq!("FFT".parse::<AnalysisMode>().unwrap(), AnalysisMode::Fft);
        assert_eq!("all".parse::<AnalysisMode>().unwrap(), AnalysisMode::All);
        assert!("waterfall".parse::<AnalysisMode>().is_err());
    }

    #[test]
    fn all_mode_exports_three_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(dir.path(), "tone.cs8", &[3, 4, 0, 0, 6, 8, 0, 0]);

        let report =
            analyze_file(&path, AnalysisMode::All, &AnalysisConfig::default(), Some(dir.path()))
                .unwrap();

        assert_eq!(report.sample_count, 4);
        assert_eq!(report.amplitude_peak, Some(10.0));
        assert_eq!(report.fft_len, Some(4));
        assert_eq!(report.exported.len(), 3);
        for name in ["tone_iq.json", "tone_amplitude.json", "tone_fft.json"] {
            assert!(dir.path().join(name).exists(), "missing {name}");
        }

        let json = std::fs::read_to_string(dir.path().join("tone_amplitude.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["amplitude"][0], 5.0);
    }

    #[test]
    fn amplitude_mode_skips_the_spectrum() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(dir.path(), "a.cs8", &[1, 0, 2, 0]);
        let report =
            analyze_file(&path, AnalysisMode::Amplitude, &AnalysisConfig::default(), None).unwrap();
        assert!(report.spectrum_peak.is_none());
        assert!(report.fft_len.is_none());
        assert!(report.exported.is_empty());
    }

    #[test]
    fn spectrum_only_reads_the_leading_samples() {
        let dir = tempfile::tempdir().unwrap();
        // 5000 pairs; the tail is loud so any read past the prefix would show
        let mut bytes = vec![0u8; 2 * 5_000];
        for pair in bytes.chunks_exact_mut(2).skip(1_024) {
            pair[0] = 100;
        }
        let path = write_capture(dir.path(), "long.cs8", &bytes);
        let config = AnalysisConfig {
            max_fft_samples: 1_024,
            ..AnalysisConfig::default()
        };

        let report = analyze_file(&path, AnalysisMode::Fft, &config, None).unwrap();

        assert_eq!(report.sample_count, 5_000);
        assert_eq!(report.fft_len, Some(1_024));
        assert_eq!(report.fft_dropped, Some(3_976));
        let (_, peak_db) = report.spectrum_peak.unwrap();
        assert!(peak_db < -100.0, "silent prefix, got {peak_db} dB");
        assert!(report.amplitude_peak.is_none());
    }

    #[test]
    fn exported_iq_is_display_decimated() {
        let dir = tempfile::tempdir().unwrap();
        let bytes: Vec<u8> = (0..100u8).flat_map(|i| [i, 0]).collect();
        let path = write_capture(dir.path(), "ramp.cs8", &bytes);
        let config = AnalysisConfig {
            max_plot_points: 10,
            ..AnalysisConfig::default()
        };

        analyze_file(&path, AnalysisMode::Iq, &config, Some(dir.path())).unwrap();

        let json = std::fs::read_to_string(dir.path().join("ramp_iq.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let real = value["real"].as_array().unwrap();
        assert_eq!(real.len(), 10);
        assert_eq!(real[1], 10.0);
    }

    #[test]
    fn other_extensions_are_still_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(dir.path(), "capture.bin", &[3, 4]);
        let report =
            analyze_file(&path, AnalysisMode::Amplitude, &AnalysisConfig::default(), None).unwrap();
        assert_eq!(report.amplitude_peak, Some(5.0));
    }

    #[test]
    fn odd_capture_is_reported_not_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(dir.path(), "partial.cs8", &[1, 0, 2]);
        let report =
            analyze_file(&path, AnalysisMode::All, &AnalysisConfig::default(), None).unwrap();
        assert!(report.trailing_byte);
        assert_eq!(report.sample_count, 1);
    }

    #[test]
    fn batch_continues_past_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_capture(dir.path(), "good.cs8", &[10, 0, 20, 0]);
        let missing = dir.path().join("missing.cs8");
        let also_good = write_capture(dir.path(), "also.cs8", &[5, 5]);

        let batch = analyze_batch(
            &[good, missing.clone(), also_good],
            AnalysisMode::All,
            &AnalysisConfig::default(),
            None,
        );

        assert_eq!(batch.reports.len(), 2);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].0, missing);
        assert!(matches!(batch.failures[0].1, SecCwError::Io(_)));
    }

    #[test]
    fn export_prefix_uses_file_stem() {
        assert_eq!(export_prefix(Path::new("/tmp/capture.cs8")), "capture_");
    }
}
