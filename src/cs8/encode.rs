//! Pure encoding: real waveform → interleaved CS8 bytes.
//!
//! Each sample is rounded to the nearest integer (ties away from zero) and
//! paired with an imaginary value of exactly 0.

use std::io::Write;

use crate::domain::{BasebandSample, SecCwError, SecCwResult};

use super::{Cs8Frame, RangePolicy};

/// Encode with `RangePolicy::Reject`.
pub fn encode(samples: &[BasebandSample]) -> SecCwResult<Vec<u8>> {
    encode_with(samples, RangePolicy::Reject).map(|frame| frame.bytes)
}

/// Encode under an explicit range policy.
pub fn encode_with(samples: &[BasebandSample], policy: RangePolicy) -> SecCwResult<Cs8Frame> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    let mut clipped = 0;

    for (index, &sample) in samples.iter().enumerate() {
        let rounded = sample.round();
        let real = if (i8::MIN as f32..=i8::MAX as f32).contains(&rounded) {
            rounded as i8
        } else {
            match policy {
                RangePolicy::Reject => {
                    return Err(SecCwError::Format(format!(
                        "Sample {index} = {sample} does not fit in a signed 8-bit value"
                    )));
                }
                RangePolicy::Saturate => {
                    clipped += 1;
                    // NaN lands on 0; `as` saturates infinities
                    rounded as i8
                }
            }
        };
        bytes.push(real as u8);
        bytes.push(0);
    }

    Ok(Cs8Frame { bytes, clipped })
}

/// Encode under `policy` and write the bytes to `dest`. Returns the clip count.
pub fn write<W: Write>(samples: &[BasebandSample], dest: &mut W, policy: RangePolicy) -> SecCwResult<usize> {
    let frame = encode_with(samples, policy)?;
    dest.write_all(&frame.bytes)?;
    Ok(frame.clipped)
}
