//! BCH(31,21) check bits, even parity and codeword packing.

use crate::consts::{CRC_BITS, CRC_GENERATOR};

/// Computes the 10-bit CRC of a 21-bit message.
///
/// This is a binary polynomial long division of the message, padded with
/// [`CRC_BITS`] zeroes, by [`CRC_GENERATOR`]. Subtraction is XOR, so the
/// remainder left in the low 10 bits is the check value.
pub fn crc(message: u32) -> u32 {
    // Generator MSB lines up with bit 30, the MSB of the padded message.
    let mut denominator = CRC_GENERATOR << 20;
    let mut msg = message << CRC_BITS;

    for column in 0..=20 {
        if (msg >> (30 - column)) & 1 != 0 {
            msg ^= denominator;
        }
        denominator >>= 1;
    }

    msg & 0x3FF
}

/// Returns the even parity bit for `word`: `1` if it has an odd number of
/// set bits, `0` otherwise.
pub fn parity(word: u32) -> u32 {
    word.count_ones() & 1
}

/// Encodes 21 data bits into a full 32-bit codeword.
///
/// The CRC is appended below the data and the parity bit becomes bit 0, so
/// every codeword has an even number of set bits. The caller sets the
/// address/message flag in bit 20 of `data`.
pub fn encode_codeword(data: u32) -> u32 {
    let full = (data << CRC_BITS) | crc(data);
    (full << 1) | parity(full)
}
