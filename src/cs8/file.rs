//! CS8 file I/O
//!
//! Writes go through a temporary file in the destination directory and are
//! renamed into place only once every byte is on disk, so a failed encode
//! never leaves a truncated capture behind. Reads memory-map the capture;
//! `Cs8File` decodes only the pairs a caller asks for.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};
use tempfile::NamedTempFile;

use crate::domain::{BasebandSample, IqSample, SecCwResult};

use super::decode::{decode_prefix, decode_strided, pair_count, pairs};
use super::{decode, encode::write, Cs8Capture, RangePolicy};

/// Encode `samples` and atomically write them to `path`. Returns the clip count.
pub fn write_file(samples: &[BasebandSample], path: &Path, policy: RangePolicy) -> SecCwResult<usize> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    let clipped = write(samples, tmp.as_file_mut(), policy)?;
    tmp.as_file_mut().flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    log::debug!("wrote {} samples to {}", samples.len(), path.display());
    Ok(clipped)
}

/// A memory-mapped capture, decoded on demand
pub struct Cs8File {
    /// None for an empty file, which cannot be mapped
    mmap: Option<Mmap>,
}

impl Cs8File {
    pub fn open(path: &Path) -> SecCwResult<Self> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Self { mmap: None });
        }

        // SAFETY: read-only mapping; the capture is not modified while decoded.
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(Self { mmap: Some(mmap) })
    }

    fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    /// Complete pairs in the capture
    pub fn len(&self) -> usize {
        pair_count(self.bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn trailing_byte(&self) -> bool {
        self.bytes().len() % 2 == 1
    }

    /// Iterate every sample without materializing the capture.
    pub fn samples(&self) -> impl Iterator<Item = IqSample> + '_ {
        pairs(self.bytes())
    }

    pub fn decode(&self) -> Cs8Capture {
        decode(self.bytes())
    }

    /// First `max_pairs` samples only
    pub fn decode_prefix(&self, max_pairs: usize) -> Cs8Capture {
        decode_prefix(self.bytes(), max_pairs)
    }

    /// Every `stride`-th sample only
    pub fn decode_strided(&self, stride: usize) -> Cs8Capture {
        decode_strided(self.bytes(), stride)
    }
}

/// Memory-map and decode a whole capture.
pub fn read_file(path: &Path) -> SecCwResult<Cs8Capture> {
    Ok(Cs8File::open(path)?.decode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SecCwError;

    #[test]
    fn write_then_read_capture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.cs8");
        let waveform = [0.0, 63.5, 127.0, -127.0, -0.4];

        let clipped = write_file(&waveform, &path, RangePolicy::Reject).unwrap();
        assert_eq!(clipped, 0);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 10);

        let capture = read_file(&path).unwrap();
        let reals: Vec<f32> = capture.samples.iter().map(|s| s.re).collect();
        assert_eq!(reals, vec![0.0, 64.0, 127.0, -127.0, 0.0]);
        assert!(capture.samples.iter().all(|s| s.im == 0.0));
    }

    #[test]
    fn failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.cs8");

        let err = write_file(&[1.0, 500.0], &path, RangePolicy::Reject).unwrap_err();
        assert!(matches!(err, SecCwError::Format(_)));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn empty_file_reads_as_empty_capture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.cs8");
        std::fs::write(&path, b"").unwrap();
        let capture = read_file(&path).unwrap();
        assert!(capture.is_empty());
        assert!(!capture.trailing_byte);
    }

    #[test]
    fn mapped_file_decodes_only_the_requested_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.cs8");
        let waveform: Vec<f32> = (0..5_000).map(|i| (i % 100) as f32).collect();
        write_file(&waveform, &path, RangePolicy::Reject).unwrap();

        let file = Cs8File::open(&path).unwrap();
        assert_eq!(file.len(), 5_000);
        assert!(!file.trailing_byte());

        let prefix = file.decode_prefix(1_024);
        assert_eq!(prefix.len(), 1_024);
        assert_eq!(prefix.samples[1_023].re, 23.0);

        let strided = file.decode_strided(100);
        assert_eq!(strided.len(), 50);
        assert!(strided.samples.iter().all(|s| s.re == 0.0));

        let peak = file.samples().map(|s| s.norm()).fold(0.0f32, f32::max);
        assert_eq!(peak, 99.0);
    }

    #[test]
    fn empty_file_maps_to_no_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.cs8");
        std::fs::write(&path, b"").unwrap();
        let file = Cs8File::open(&path).unwrap();
        assert!(file.is_empty());
        assert_eq!(file.samples().count(), 0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(&dir.path().join("nope.cs8")).unwrap_err();
        assert!(matches!(err, SecCwError::Io(_)));
    }
}
