//! Assembly of complete POCSAG transmissions.
//!
//! A transmission is laid out as:
//!
//! ```text
//! preamble (18 words of 0xAAAAAAAA)
//! SYNC | IDLE x (address & 7) * 2 | address word | message words ... | IDLE | IDLE padding
//! ```
//!
//! with a SYNC word at the start of every 16-word batch and the last batch
//! padded out with IDLE words. The receiver derives the 3 low address bits
//! from which frame carries the address word, so the IDLE prefix is part of
//! the address.
//!
//! The length functions mirror the assembler exactly and are `const`, so a
//! caller can size a buffer before (or without) encoding anything:
//!
//! ```
//! use pocsag_tx::encoding::MessageMode;
//! use pocsag_tx::transmission::{encode_transmission, numeric_message_length};
//!
//! let words = encode_transmission(MessageMode::Numeric, 924395, 3, b"42").unwrap();
//! assert_eq!(words.len(), numeric_message_length(924395, 2));
//! ```

use crate::consts::{
    BATCH_SIZE, FLAG_ADDRESS, FRAME_SIZE, IDLE, NUMERIC_BITS_PER_DIGIT, NUMERIC_BITS_PER_WORD,
    PREAMBLE_WORD, PREAMBLE_WORDS, SYNC, TEXT_BITS_PER_CHAR, TEXT_BITS_PER_WORD,
};
#[cfg(not(feature = "std"))]
use crate::consts::MAX_TRANSMISSION_WORDS;
use crate::crc::encode_codeword;
use crate::encoding::{MessageMode, encode_body};
use crate::error::Error;

/// Owned buffer holding one encoded transmission.
#[cfg(feature = "std")]
pub type WordBuffer = Vec<u32>;

/// Owned buffer holding one encoded transmission.
///
/// Without `std` this is a fixed-capacity vector large enough for any
/// message of up to [`MAX_MESSAGE_LEN`](crate::consts::MAX_MESSAGE_LEN)
/// characters.
#[cfg(not(feature = "std"))]
pub type WordBuffer = heapless::Vec<u32, MAX_TRANSMISSION_WORDS>;

/// Destination for encoded codewords.
///
/// Bounded sinks must report running out of room instead of dropping words.
pub trait WordSink {
    /// Appends one word.
    fn push_word(&mut self, word: u32) -> Result<(), Error>;
}

#[cfg(feature = "std")]
impl WordSink for Vec<u32> {
    fn push_word(&mut self, word: u32) -> Result<(), Error> {
        self.push(word);
        Ok(())
    }
}

impl<const N: usize> WordSink for heapless::Vec<u32, N> {
    fn push_word(&mut self, word: u32) -> Result<(), Error> {
        self.push(word).map_err(|_| Error::BufferFull { capacity: N })
    }
}

/// A [`WordSink`] writing into a caller-owned slice through a cursor.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u32],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    /// Starts writing at the beginning of `buf`.
    pub fn new(buf: &'a mut [u32]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of words written so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl WordSink for SliceSink<'_> {
    fn push_word(&mut self, word: u32) -> Result<(), Error> {
        let capacity = self.buf.len();
        let slot = self
            .buf
            .get_mut(self.pos)
            .ok_or(Error::BufferFull { capacity })?;
        *slot = word;
        self.pos += 1;
        Ok(())
    }
}

/// Number of IDLE words that precede the address word in its batch.
///
/// Only 18 of the 21 address bits are carried in the address word; the low 3
/// bits select one of the 8 frames of the batch.
pub const fn address_offset(address: u32) -> usize {
    (address & 0x7) as usize * FRAME_SIZE
}

const fn transmission_length(
    address: u32,
    num_chars: usize,
    bits_per_char: usize,
    bits_per_word: usize,
) -> usize {
    // Padding and the address word itself.
    let mut num_words = address_offset(address) + 1;
    num_words += (num_chars * bits_per_char).div_ceil(bits_per_word);
    // End-of-message IDLE.
    num_words += 1;
    num_words = num_words.next_multiple_of(BATCH_SIZE);
    // One SYNC per batch.
    num_words += num_words / BATCH_SIZE;
    num_words + PREAMBLE_WORDS
}

/// Length in words of a text transmission of `num_chars` characters to
/// `address`, preamble included.
pub const fn text_message_length(address: u32, num_chars: usize) -> usize {
    transmission_length(address, num_chars, TEXT_BITS_PER_CHAR, TEXT_BITS_PER_WORD)
}

/// Length in words of a numeric transmission of `num_chars` characters to
/// `address`, preamble included.
pub const fn numeric_message_length(address: u32, num_chars: usize) -> usize {
    transmission_length(
        address,
        num_chars,
        NUMERIC_BITS_PER_DIGIT,
        NUMERIC_BITS_PER_WORD,
    )
}

/// Length in words of a transmission in `mode`. See [`text_message_length`]
/// and [`numeric_message_length`].
pub const fn message_length(mode: MessageMode, address: u32, num_chars: usize) -> usize {
    transmission_length(
        address,
        num_chars,
        mode.bits_per_char(),
        mode.bits_per_word(),
    )
}

/// Encodes a complete transmission into `out`.
///
/// # Arguments
/// - `mode`: Numeric or text body encoding
/// - `address`: 21-bit capcode; wider values corrupt the address word
/// - `function_bits`: 2-bit function code; wider values corrupt the address
/// - `message`: The message body
/// - `out`: The destination sink
///
/// # Returns
/// The number of words written, which is always
/// [`message_length(mode, address, message.len())`](message_length).
///
/// # Errors
/// Only the sink can fail, with [`Error::BufferFull`] when it is bounded.
pub fn encode_transmission_into<S: WordSink + ?Sized>(
    mode: MessageMode,
    address: u32,
    function_bits: u8,
    message: &[u8],
    out: &mut S,
) -> Result<usize, Error> {
    for _ in 0..PREAMBLE_WORDS {
        out.push_word(PREAMBLE_WORD)?;
    }

    // Everything from here on is counted in batches.
    out.push_word(SYNC)?;
    let mut written = 1;

    let prefix = address_offset(address);
    for _ in 0..prefix {
        out.push_word(IDLE)?;
    }
    written += prefix;

    out.push_word(encode_codeword(
        FLAG_ADDRESS | ((address >> 3) << 2) | u32::from(function_bits),
    ))?;
    written += 1;

    written += encode_body(mode, prefix + 1, message, out)?;

    out.push_word(IDLE)?;
    written += 1;

    let batch_words = BATCH_SIZE + 1;
    let padding = (batch_words - written % batch_words) % batch_words;
    for _ in 0..padding {
        out.push_word(IDLE)?;
    }
    written += padding;

    let total = PREAMBLE_WORDS + written;
    debug_assert_eq!(total, message_length(mode, address, message.len()));
    debug!(
        "encoded {} page for capcode {}: {} chars, {} words",
        mode.as_str(),
        address,
        message.len(),
        total
    );
    Ok(total)
}

/// Encodes a complete transmission into a new [`WordBuffer`].
///
/// # Errors
/// [`Error::BufferFull`] if the message is too long for the fixed-capacity
/// buffer used without `std`.
pub fn encode_transmission(
    mode: MessageMode,
    address: u32,
    function_bits: u8,
    message: &[u8],
) -> Result<WordBuffer, Error> {
    let mut buf = WordBuffer::new();
    let _ = encode_transmission_into(mode, address, function_bits, message, &mut buf)?;
    Ok(buf)
}

/// Encodes a complete transmission into the start of `out`.
///
/// # Errors
/// [`Error::BufferTooSmall`] if `out` is shorter than
/// [`message_length`]; nothing is written in that case.
pub fn encode_into_slice(
    mode: MessageMode,
    address: u32,
    function_bits: u8,
    message: &[u8],
    out: &mut [u32],
) -> Result<usize, Error> {
    let needed = message_length(mode, address, message.len());
    if out.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
            capacity: out.len(),
        });
    }
    let mut sink = SliceSink::new(out);
    encode_transmission_into(mode, address, function_bits, message, &mut sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_MESSAGE_LEN, MAX_TRANSMISSION_WORDS};

    const BATCH_WORDS: usize = BATCH_SIZE + 1;

    fn assert_batches(words: &[u32]) {
        assert!(words[..PREAMBLE_WORDS].iter().all(|&w| w == PREAMBLE_WORD));
        let body = &words[PREAMBLE_WORDS..];
        assert_eq!(body.len() % BATCH_WORDS, 0);
        for (i, &w) in body.iter().enumerate() {
            if i % BATCH_WORDS == 0 {
                assert_eq!(w, SYNC, "word {i} should be SYNC");
            } else {
                assert_ne!(w, SYNC, "unexpected SYNC at word {i}");
            }
        }
    }

    #[test]
    fn test_numeric_scenario() {
        let address = 924395;
        let words = encode_transmission(MessageMode::Numeric, address, 3, b"42").unwrap();
        assert_eq!(words.len(), PREAMBLE_WORDS + BATCH_WORDS);
        assert_eq!(words.len(), numeric_message_length(address, 2));

        assert!(words[..18].iter().all(|&w| w == 0xAAAA_AAAA));
        assert_eq!(words[18], SYNC);
        assert_eq!(address_offset(address), 6);
        assert!(words[19..25].iter().all(|&w| w == IDLE));

        // Address 924395 >> 3 = 0x1C35D, function bits 3.
        assert_eq!(words[25], 0x386B_B95B);
        // Digits '4' and '2' as 0b0010_0100 in the top byte of the payload.
        assert_eq!(words[26], 0x9200_03A8);

        assert!(words[27..].iter().all(|&w| w == IDLE));
        assert_batches(&words);
    }

    #[test]
    fn test_length_agreement() {
        let addresses = [0, 1, 2, 3, 4, 5, 6, 7, 924395, 0x1F_FFFF, 1234567];
        for address in addresses {
            for len in 0..=MAX_MESSAGE_LEN {
                let message: Vec<u8> = (0..len).map(|i| b'0' + (i % 10) as u8).collect();
                for mode in [MessageMode::Numeric, MessageMode::Text] {
                    let words = encode_transmission(mode, address, 0, &message).unwrap();
                    assert_eq!(
                        words.len(),
                        message_length(mode, address, len),
                        "{mode:?} address {address} len {len}"
                    );
                    assert!(words.len() <= MAX_TRANSMISSION_WORDS);
                    assert_batches(&words);
                }
            }
        }
    }

    #[test]
    fn test_mode_lengths_match_named_functions() {
        assert_eq!(
            message_length(MessageMode::Text, 5, 33),
            text_message_length(5, 33)
        );
        assert_eq!(
            message_length(MessageMode::Numeric, 5, 33),
            numeric_message_length(5, 33)
        );
    }

    #[test]
    fn test_address_placement() {
        for address in [8u32, 9, 10, 11, 12, 13, 14, 15] {
            let words = encode_transmission(MessageMode::Text, address, 2, b"hello").unwrap();
            let pos = PREAMBLE_WORDS + 1 + address_offset(address);
            assert_eq!(words[pos], encode_codeword(((address >> 3) << 2) | 2));
            assert!(words[PREAMBLE_WORDS + 1..pos].iter().all(|&w| w == IDLE));
            assert_eq!(words[pos + 1] >> 31, 1);
        }
    }

    #[test]
    fn test_aligned_transmission_has_no_empty_batch() {
        // Frame 7 + address word + end IDLE fills the first batch exactly.
        let words = encode_transmission(MessageMode::Text, 7, 0, b"").unwrap();
        assert_eq!(words.len(), PREAMBLE_WORDS + BATCH_WORDS);
        assert_eq!(text_message_length(7, 0), PREAMBLE_WORDS + BATCH_WORDS);
        assert_eq!(words[words.len() - 1], IDLE);
        assert_batches(&words);
    }

    #[test]
    fn test_message_spanning_batches() {
        // 60 text characters = 21 message words, starting in frame 4:
        // 8 IDLE + address + 21 + end IDLE = 31 words, so two batches.
        let message = [b'z'; 60];
        let words = encode_transmission(MessageMode::Text, 4, 3, &message).unwrap();
        assert_eq!(words.len(), PREAMBLE_WORDS + 2 * BATCH_WORDS);
        assert_batches(&words);
        let message_words = words[PREAMBLE_WORDS..]
            .iter()
            .filter(|&&w| w != SYNC && w != IDLE && w >> 31 == 1)
            .count();
        assert_eq!(message_words, 21);
    }

    #[test]
    fn test_encode_into_slice() {
        let needed = text_message_length(3, 4);
        let mut buf = [0u32; 64];
        let n = encode_into_slice(MessageMode::Text, 3, 3, b"ping", &mut buf).unwrap();
        assert_eq!(n, needed);
        let owned = encode_transmission(MessageMode::Text, 3, 3, b"ping").unwrap();
        assert_eq!(&buf[..n], &owned[..]);
        assert!(buf[n..].iter().all(|&w| w == 0));
    }

    #[test]
    fn test_encode_into_slice_too_small() {
        let mut buf = [0u32; 20];
        let err = encode_into_slice(MessageMode::Numeric, 0, 0, b"1", &mut buf).unwrap_err();
        assert_eq!(
            err,
            Error::BufferTooSmall {
                needed: 35,
                capacity: 20
            }
        );
        assert!(buf.iter().all(|&w| w == 0));
    }

    #[test]
    fn test_bounded_sink_reports_full() {
        let mut buf: heapless::Vec<u32, 30> = heapless::Vec::new();
        let err =
            encode_transmission_into(MessageMode::Numeric, 0, 0, b"1", &mut buf).unwrap_err();
        assert_eq!(err, Error::BufferFull { capacity: 30 });
        assert_eq!(buf.len(), 30);

        let mut buf: heapless::Vec<u32, 35> = heapless::Vec::new();
        let n = encode_transmission_into(MessageMode::Numeric, 0, 0, b"1", &mut buf).unwrap();
        assert_eq!(n, 35);
    }

    #[test]
    fn test_slice_sink_cursor() {
        let mut buf = [0u32; 2];
        let mut sink = SliceSink::new(&mut buf);
        sink.push_word(1).unwrap();
        sink.push_word(2).unwrap();
        assert_eq!(sink.position(), 2);
        assert_eq!(sink.push_word(3), Err(Error::BufferFull { capacity: 2 }));
        assert_eq!(buf, [1, 2]);
    }

    #[test]
    fn test_max_transmission_words() {
        assert_eq!(MAX_TRANSMISSION_WORDS, 103);
        assert!(numeric_message_length(7, MAX_MESSAGE_LEN) <= MAX_TRANSMISSION_WORDS);
    }
}
