//! Morse modem
//!
//! Morse timing, AM/FM baseband modulation and waveform assembly

pub mod assembler;
pub mod modulator;
pub mod morse;

pub use assembler::{SampleAssembler, Waveform};
pub use modulator::Modulation;
pub use morse::Morse;
