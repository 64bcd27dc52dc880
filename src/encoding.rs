//! Character encoding of POCSAG message bodies.
//!
//! This module turns a message body into a stream of message codewords. POCSAG
//! defines two body formats, selected with [`MessageMode`]:
//!
//! - **Alphanumeric** (text): 7 bits per character, least significant bit
//!   first, so each character is bit-reversed relative to its ASCII value.
//! - **Numeric**: 4 bits per character drawn from a 16 symbol alphabet of
//!   digits, space, `U`, `-`, and brackets.
//!
//! Both formats pack their bits into 20-bit payloads; each full payload is
//! flagged as a message word and run through [`encode_codeword`]. A SYNC word
//! is inserted whenever a batch fills up, so the output can be copied straight
//! into a transmission.
//!
//! ## Functions
//!
//! - [`encode_digit`]: Maps one numeric character to its 4-bit symbol
//! - [`encode_text`]: Encodes a text body
//! - [`encode_numeric`]: Encodes a numeric body
//!
//! ## Limitations
//!
//! - Text mode silently drops the top bit of every byte
//! - Numeric mode maps any character outside its alphabet to symbol `5`

use crate::consts::{
    BATCH_SIZE, FLAG_MESSAGE, FLAG_NUMERIC_DATA, FLAG_TEXT_DATA, NUMERIC_BITS_PER_DIGIT,
    NUMERIC_BITS_PER_WORD, SYNC, TEXT_BITS_PER_CHAR, TEXT_BITS_PER_WORD,
};
use crate::crc::encode_codeword;
use crate::error::Error;
use crate::transmission::WordSink;

/// Numeric symbols for the digits `0`-`9`, bit-mirrored.
static MIRROR_TAB: [u8; 10] = [0x0, 0x8, 0x4, 0xc, 0x2, 0xa, 0x6, 0xe, 0x1, 0x9];

/// The two POCSAG message body formats.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum MessageMode {
    /// Numeric pages: digits and a handful of symbols, 4 bits per character.
    Numeric,
    /// Alphanumeric pages: 7-bit ASCII.
    #[default]
    Text,
}

impl MessageMode {
    /// Bits used to transmit one character in this mode.
    pub const fn bits_per_char(self) -> usize {
        match self {
            MessageMode::Numeric => NUMERIC_BITS_PER_DIGIT,
            MessageMode::Text => TEXT_BITS_PER_CHAR,
        }
    }

    /// Payload bits in one message codeword in this mode.
    pub const fn bits_per_word(self) -> usize {
        match self {
            MessageMode::Numeric => NUMERIC_BITS_PER_WORD,
            MessageMode::Text => TEXT_BITS_PER_WORD,
        }
    }

    /// Function bits pagers conventionally expect for this mode.
    pub const fn function_bits(self) -> u8 {
        match self {
            MessageMode::Numeric => FLAG_NUMERIC_DATA,
            MessageMode::Text => FLAG_TEXT_DATA,
        }
    }

    /// Short lowercase name, for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageMode::Numeric => "numeric",
            MessageMode::Text => "text",
        }
    }
}

/// Maps a numeric-page character to its 4-bit symbol.
///
/// Digits come from a mirrored lookup table; `' '`, `u`/`U`, `-`/`_`,
/// `(`/`[` and `)`/`]` have fixed symbols, and anything else becomes `0x5`.
pub fn encode_digit(ch: u8) -> u8 {
    match ch {
        b'0'..=b'9' => MIRROR_TAB[(ch - b'0') as usize],
        b' ' => 0x3,
        b'u' | b'U' => 0xd,
        b'-' | b'_' => 0xb,
        b'(' | b'[' => 0xf,
        b')' | b']' => 0x7,
        _ => 0x5,
    }
}

/// Swaps bit 0 with bit 3 and bit 1 with bit 2 of a nibble.
fn reverse_nibble(n: u8) -> u8 {
    ((n & 0x1) << 3) | ((n & 0x2) << 1) | ((n & 0x4) >> 1) | ((n & 0x8) >> 3)
}

/// Packs a bit stream into message codewords and tracks batch position.
///
/// Bits are shifted in at the LSB. Every `bits_per_word` bits a message
/// codeword is pushed to the sink; whenever the batch position reaches
/// [`BATCH_SIZE`] a SYNC word follows it.
struct WordEmitter<'a, S: WordSink + ?Sized> {
    sink: &'a mut S,
    bits_per_word: usize,
    position: usize,
    current: u32,
    num_bits: usize,
    written: usize,
}

impl<'a, S: WordSink + ?Sized> WordEmitter<'a, S> {
    fn new(sink: &'a mut S, initial_offset: usize, bits_per_word: usize) -> Self {
        Self {
            sink,
            bits_per_word,
            position: initial_offset,
            current: 0,
            num_bits: 0,
            written: 0,
        }
    }

    fn push_bit(&mut self, bit: u32) -> Result<(), Error> {
        self.current = (self.current << 1) | (bit & 1);
        self.num_bits += 1;
        if self.num_bits == self.bits_per_word {
            self.emit()?;
        }
        Ok(())
    }

    fn emit(&mut self) -> Result<(), Error> {
        self.sink
            .push_word(encode_codeword(self.current | FLAG_MESSAGE))?;
        self.current = 0;
        self.num_bits = 0;
        self.written += 1;

        self.position += 1;
        if self.position == BATCH_SIZE {
            self.sink.push_word(SYNC)?;
            self.written += 1;
            self.position = 0;
        }
        Ok(())
    }

    /// Flushes a partial word, zero padded at the bottom, and returns the
    /// number of words written.
    fn finish(mut self) -> Result<usize, Error> {
        if self.num_bits > 0 {
            self.current <<= self.bits_per_word - self.num_bits;
            self.emit()?;
        }
        Ok(self.written)
    }
}

/// Encodes a text message body into `out`.
///
/// # Arguments
/// - `initial_offset`: Position within the current batch of the first word
///   written, so SYNC words land on batch boundaries
/// - `message`: The message bytes; only the low 7 bits of each are sent
/// - `out`: The destination sink
///
/// # Returns
/// The number of words written, SYNC words included.
pub fn encode_text<S: WordSink + ?Sized>(
    initial_offset: usize,
    message: &[u8],
    out: &mut S,
) -> Result<usize, Error> {
    let mut emitter = WordEmitter::new(out, initial_offset, TEXT_BITS_PER_WORD);
    for &c in message {
        for i in 0..TEXT_BITS_PER_CHAR {
            emitter.push_bit(u32::from(c >> i))?;
        }
    }
    emitter.finish()
}

/// Encodes a numeric message body into `out`.
///
/// Each character is mapped with [`encode_digit`], nibble-reversed, and then
/// sent low bit first.
///
/// # Arguments
/// - `initial_offset`: Position within the current batch of the first word
///   written, so SYNC words land on batch boundaries
/// - `message`: The message characters
/// - `out`: The destination sink
///
/// # Returns
/// The number of words written, SYNC words included.
pub fn encode_numeric<S: WordSink + ?Sized>(
    initial_offset: usize,
    message: &[u8],
    out: &mut S,
) -> Result<usize, Error> {
    let mut emitter = WordEmitter::new(out, initial_offset, NUMERIC_BITS_PER_WORD);
    for &c in message {
        let digit = reverse_nibble(encode_digit(c));
        for i in 0..NUMERIC_BITS_PER_DIGIT {
            emitter.push_bit(u32::from(digit >> i))?;
        }
    }
    emitter.finish()
}

/// Encodes a message body in the given mode. See [`encode_text`] and
/// [`encode_numeric`].
pub fn encode_body<S: WordSink + ?Sized>(
    mode: MessageMode,
    initial_offset: usize,
    message: &[u8],
    out: &mut S,
) -> Result<usize, Error> {
    match mode {
        MessageMode::Numeric => encode_numeric(initial_offset, message, out),
        MessageMode::Text => encode_text(initial_offset, message, out),
    }
}
