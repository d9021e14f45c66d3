//! Morse alphabet and timing
//!
//! Every character maps to a symbol string over `.`, `-` and ` `. Keying a
//! message turns those symbols into timed tokens measured in dot units:
//!
//! - dot = 1, dash = 3
//! - one intra-symbol gap (1) after every dot or dash
//! - one inter-letter gap (2) after every letter, so a letter is followed by
//!   3 units of silence in total
//! - a literal space is one inter-word gap (4); after a letter that makes the
//!   7 units of silence between words
//!
//! The message is framed as `" < MESSAGE > "` and the whole token stream is
//! bracketed by one inter-word gap on each side.

use crate::domain::{SecCwError, SecCwResult, SymbolKind, Token};

pub const DOT_UNITS: u32 = 1;
pub const DASH_UNITS: u32 = 3;
pub const INTRA_SYMBOL_GAP_UNITS: u32 = 1;
/// Added after the intra-symbol gap that follows a letter's last symbol
pub const INTER_LETTER_GAP_UNITS: u32 = 2;
/// Added after the silence already closing the previous letter
pub const INTER_WORD_GAP_UNITS: u32 = 4;

/// Start-of-message prosign, prepended to every keyed message
pub const FRAME_START: char = '<';
/// End-of-message prosign, appended to every keyed message
pub const FRAME_END: char = '>';

/// Single source of truth for character ↔ symbol mapping.
///
/// Covers the standard base64 alphabet once uppercased (`A–Z 0–9 + / =`), so
/// any text-safe envelope can be keyed.
pub const MORSE_TABLE: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('0', "-----"),
    (' ', " "),
    ('É', "..-.."),
    ('.', ".-.-.-"),
    (',', "--..--"),
    (':', "---..."),
    ('?', "..--.."),
    ('!', "-.-.--"),
    ('\'', ".----."),
    ('-', "-....-"),
    ('|', "-..-."),
    ('(', "-.--.-"),
    (')', "-.--.-"),
    ('À', ".--.-"),
    ('@', ".--.-."),
    ('<', "-.-.-"),
    ('>', ".-.-."),
    ('+', ".-.-."),
    ('/', "-..-."),
    ('=', "-...-"),
];

/// Morse alphabet lookup
pub struct Morse;

impl Morse {
    /// Symbol string for an (already uppercased) character.
    /// Returns None for unsupported characters.
    pub fn encode(ch: char) -> Option<&'static str> {
        MORSE_TABLE
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, symbols)| *symbols)
    }

    /// Append the tokens keying one character.
    pub fn key_character(ch: char, tokens: &mut Vec<Token>) -> SecCwResult<()> {
        let symbols = Self::encode(ch).ok_or(SecCwError::UnsupportedCharacter(ch))?;

        for symbol in symbols.chars() {
            match symbol {
                '.' => push_symbol(tokens, SymbolKind::Dot, DOT_UNITS),
                '-' => push_symbol(tokens, SymbolKind::Dash, DASH_UNITS),
                // Word separator: no intra-symbol wrapping, no letter gap
                ' ' => {
                    tokens.push(word_gap());
                    return Ok(());
                }
                other => unreachable!("MORSE_TABLE holds only '.', '-' and ' ', found {other:?}"),
            }
        }

        tokens.push(Token::new(SymbolKind::Gap, INTER_LETTER_GAP_UNITS));
        Ok(())
    }
}

fn push_symbol(tokens: &mut Vec<Token>, kind: SymbolKind, units: u32) {
    tokens.push(Token::new(kind, units));
    tokens.push(Token::new(SymbolKind::Gap, INTRA_SYMBOL_GAP_UNITS));
}

fn word_gap() -> Token {
    Token::new(SymbolKind::Gap, INTER_WORD_GAP_UNITS)
}

/// Frame a message the way it is keyed on air: `" < MESSAGE > "`, uppercased.
pub fn frame_message(message: &str) -> String {
    format!(" {FRAME_START} {} {FRAME_END} ", message.to_uppercase())
}

/// Convert a message to its ordered timing tokens.
///
/// Fails with `UnsupportedCharacter` on the first character (after
/// uppercasing) that has no Morse mapping.
pub fn encode_text(message: &str) -> SecCwResult<Vec<Token>> {
    let framed = frame_message(message);
    let mut tokens = Vec::with_capacity(framed.len() * 8 + 2);

    tokens.push(word_gap());
    for ch in framed.chars() {
        Morse::key_character(ch, &mut tokens)?;
    }
    tokens.push(word_gap());

    Ok(tokens)
}

/// Total duration of a token stream in dot units.
pub fn total_units(tokens: &[Token]) -> u32 {
    tokens.iter().map(|t| t.units).sum()
}
