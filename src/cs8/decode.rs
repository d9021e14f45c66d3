//! Pure decoding: CS8 bytes → complex samples.
//!
//! Even-indexed bytes are the real channel, odd-indexed bytes the imaginary
//! channel. An odd byte count means a partial capture: decoding keeps every
//! complete pair, drops the trailing byte and flags it on the result.

use num_complex::Complex;

use crate::domain::IqSample;

use super::Cs8Capture;

/// Decode interleaved signed 8-bit pairs.
pub fn decode(bytes: &[u8]) -> Cs8Capture {
    decode_prefix(bytes, usize::MAX)
}

/// Decode at most the first `max_pairs` pairs.
///
/// `trailing_byte` still describes the whole input, so a truncated read of
/// a partial capture is flagged the same way as a full one.
pub fn decode_prefix(bytes: &[u8], max_pairs: usize) -> Cs8Capture {
    Cs8Capture {
        samples: pairs(bytes).take(max_pairs).collect(),
        trailing_byte: check_trailing(bytes),
    }
}

/// Decode every `stride`-th pair, starting with the first.
pub fn decode_strided(bytes: &[u8], stride: usize) -> Cs8Capture {
    Cs8Capture {
        samples: pairs(bytes).step_by(stride.max(1)).collect(),
        trailing_byte: check_trailing(bytes),
    }
}

/// Lazily decoded samples of every complete pair.
pub fn pairs(bytes: &[u8]) -> impl Iterator<Item = IqSample> + '_ {
    bytes
        .chunks_exact(2)
        .map(|pair| Complex::new(pair[0] as i8 as f32, pair[1] as i8 as f32))
}

/// Number of complete pairs in `bytes`
pub fn pair_count(bytes: &[u8]) -> usize {
    bytes.len() / 2
}

fn check_trailing(bytes: &[u8]) -> bool {
    let trailing_byte = bytes.len() % 2 == 1;
    if trailing_byte {
        log::warn!(
            "CS8 data has an odd byte count ({}); dropping the trailing byte",
            bytes.len()
        );
    }
    trailing_byte
}
