//! SecCW — post-quantum encrypted Morse keying to CS8 baseband
//!
//! Encodes a text message as Morse-timed AM or FM baseband samples in the
//! CS8 format, optionally sealing it first in a Kyber-512 + AES-256-GCM
//! envelope, and analyzes captured CS8 recordings.
//!
//! ## Architecture (Hexagonal / Ports & Adapters)
//!
//! - `domain/` - Pure domain types, configuration and errors, no I/O
//! - `ports/` - Trait definitions for external primitives (KEM)
//! - `crypto/` - Envelope protocol (encapsulate, derive, seal, compress, base64)
//! - `modem/` - Morse timing, AM/FM modulation, waveform assembly
//! - `cs8/` - CS8 sample codec and capture file I/O
//! - `dsp/` - Capture analysis (pure functions, no I/O)
//! - `adapters/` - Implementations of ports (Kyber-512) and key files
//! - `commands/` - CLI command handlers (driving adapters)

// Core domain (pure, no I/O)
pub mod domain;
pub mod dsp;
pub mod modem;
pub mod ports;

// Protocol and formats
pub mod crypto;
pub mod cs8;

// Adapters (external I/O)
pub mod adapters;

// CLI integration
pub mod commands;
