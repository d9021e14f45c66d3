//! Encode command — message to keyed CS8 capture
//!
//! The pipeline:
//! 1. Resolve the text to key: plaintext as-is, an already encrypted base64
//!    envelope, or a freshly built compressed + base64 envelope
//! 2. Key the text into Morse tokens and assemble the baseband waveform
//! 3. Write the CS8 capture atomically (nothing is left behind on failure)

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::commands::keys::{load_or_create_keypair, KeyPaths};
use crate::crypto::CryptoEnvelope;
use crate::cs8::{self, RangePolicy};
use crate::domain::{ModemConfig, ModulationKind, SecCwError, SecCwResult};
use crate::modem::SampleAssembler;

/// How the message argument is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageMode {
    /// Key the message text directly
    Plaintext,
    /// Encrypt, compress and base64 the message, then key the base64 text
    #[default]
    Encrypt,
    /// The message is already an encrypted base64 envelope
    CipherB64,
}

impl FromStr for MessageMode {
    type Err = SecCwError;

    fn from_str(s: &str) -> SecCwResult<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "plaintext" => Ok(Self::Plaintext),
            "encrypt" => Ok(Self::Encrypt),
            "cipher-b64" => Ok(Self::CipherB64),
            other => Err(SecCwError::Configuration(format!(
                "Unknown mode '{other}' (expected plaintext, encrypt or cipher-b64)"
            ))),
        }
    }
}

impl fmt::Display for MessageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plaintext => f.write_str("plaintext"),
            Self::Encrypt => f.write_str("encrypt"),
            Self::CipherB64 => f.write_str("cipher-b64"),
        }
    }
}

/// Summary of a completed encode
#[derive(Debug, Clone)]
pub struct EncodeReport {
    /// The text that was keyed (base64 envelope unless plaintext mode)
    pub keyed_text: String,
    pub modulation: ModulationKind,
    pub segment_count: usize,
    pub total_units: u32,
    pub sample_count: usize,
    /// Samples clamped to the 8-bit range on write
    pub clipped: usize,
}

/// Resolve the text that will be keyed for `message` under `mode`.
pub fn keyed_text(message: &str, mode: MessageMode, keys: &KeyPaths) -> SecCwResult<String> {
    match mode {
        MessageMode::Plaintext => Ok(message.to_string()),
        MessageMode::CipherB64 => Ok(message.trim().to_string()),
        MessageMode::Encrypt => {
            let keypair = load_or_create_keypair(keys)?;
            let text = CryptoEnvelope::new()
                .encrypt_compressed_b64(message.as_bytes(), &keypair.public_key)?;
            log::info!("Ciphertext Base64 (start): {} ...", preview(&text, 80));
            Ok(text)
        }
    }
}

/// Key `message` and write the capture to `output`.
pub fn run_encode(
    message: &str,
    mode: MessageMode,
    output: &Path,
    config: &ModemConfig,
    keys: &KeyPaths,
) -> SecCwResult<EncodeReport> {
    let text = keyed_text(message, mode, keys)?;
    let assembler = SampleAssembler::from_config(config);
    let waveform = assembler.encode(&text)?;

    // AM peaks at 1.5× the output amplitude; saturate rather than wrap
    let clipped = cs8::write_file(&waveform.samples, output, RangePolicy::Saturate)?;
    if clipped > 0 {
        log::warn!(
            "{clipped} of {} samples exceeded the 8-bit range and were clamped; \
             set \"amplitude\": {} in the profile for an unclipped {} envelope",
            waveform.samples.len(),
            assembler.max_unclipped_amplitude(),
            config.modulation
        );
    }

    log::info!("CS8 file generated : {}", output.display());
    log::info!("Modulation         : {}", config.modulation);

    Ok(EncodeReport {
        keyed_text: text,
        modulation: config.modulation,
        segment_count: waveform.segment_count,
        total_units: waveform.total_units,
        sample_count: waveform.samples.len(),
        clipped,
    })
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
