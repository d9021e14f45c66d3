//! CS8 sample codec.
//!
//! A CS8 capture is headerless: repeating `(int8 real, int8 imag)` pairs.
//!
//! This module separates the three concerns of handling captures:
//! - `encode`: real waveform → interleaved bytes (pure, no I/O)
//! - `decode`: bytes → complex samples, whole, prefix or strided (pure, no I/O)
//! - `file`: atomic writes and memory-mapped reads of `.cs8` files

pub mod decode;
pub mod encode;
pub mod file;

pub use decode::{decode, decode_prefix, decode_strided};
pub use encode::{encode, encode_with, write};
pub use file::{read_file, write_file, Cs8File};

use crate::domain::IqSample;

/// Conventional file extension for CS8 captures
pub const CS8_EXTENSION: &str = "cs8";

/// What to do with a rounded sample outside `[-128, 127]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePolicy {
    /// Fail with a format error naming the first offending sample
    #[default]
    Reject,
    /// Clamp to the nearest representable value and count it
    Saturate,
}

/// Result of encoding a waveform
#[derive(Debug, Clone, PartialEq)]
pub struct Cs8Frame {
    pub bytes: Vec<u8>,
    /// Samples clamped under `RangePolicy::Saturate`
    pub clipped: usize,
}

/// Decoded capture
#[derive(Debug, Clone, PartialEq)]
pub struct Cs8Capture {
    pub samples: Vec<IqSample>,
    /// The input had an odd byte count; its last byte was dropped
    pub trailing_byte: bool,
}

impl Cs8Capture {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
