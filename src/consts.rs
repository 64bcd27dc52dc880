//! Constants used across the POCSAG protocol implementation.
//!
//! This module defines the fixed codewords, framing geometry, codeword flags,
//! character packing widths and BCH parameters of the POCSAG air interface,
//! together with the buffer limits used when no allocator is available.
//!
//! ## Key Concepts
//!
//! - **Codewords**: Every transmitted unit is a 32-bit word. SYNC and IDLE are
//!   fixed patterns; every other word carries 21 data bits, a 10-bit CRC and a
//!   parity bit.
//! - **Batches**: A SYNC word followed by 16 codewords, grouped as 8 frames of 2.
//! - **Preamble**: 576 alternating bits sent before the first batch so the
//!   receiver can acquire bit timing.
//! - **Buffer Sizing**: The largest transmission the crate will build in
//!   `no_std` mode is derived from [`MAX_MESSAGE_LEN`].

use crate::transmission::text_message_length;

/// Batch synchronisation codeword, sent at the start of every batch.
pub const SYNC: u32 = 0x7CD2_15D8;

/// Idle codeword, used to fill empty slots and to terminate a message.
pub const IDLE: u32 = 0x7A89_C197;

/// Alternating `1010...` word repeated to form the preamble.
pub const PREAMBLE_WORD: u32 = 0xAAAA_AAAA;

/// Length of the preamble in bits.
pub const PREAMBLE_LENGTH: usize = 576;

/// Length of the preamble in 32-bit words.
pub const PREAMBLE_WORDS: usize = PREAMBLE_LENGTH / 32;

/// Number of codewords in one frame.
pub const FRAME_SIZE: usize = 2;

/// Number of codewords in one batch, not counting its SYNC word.
pub const BATCH_SIZE: usize = 16;

/// Flag bit (bit 20 of the 21 data bits) marking an address codeword.
pub const FLAG_ADDRESS: u32 = 0x00_0000;

/// Flag bit (bit 20 of the 21 data bits) marking a message codeword.
pub const FLAG_MESSAGE: u32 = 0x10_0000;

/// Conventional function bits for alphanumeric pages.
pub const FLAG_TEXT_DATA: u8 = 0x3;

/// Conventional function bits for numeric pages.
pub const FLAG_NUMERIC_DATA: u8 = 0x0;

/// Payload bits carried by one text message codeword.
pub const TEXT_BITS_PER_WORD: usize = 20;

/// Bits transmitted per text character (7-bit ASCII).
pub const TEXT_BITS_PER_CHAR: usize = 7;

/// Payload bits carried by one numeric message codeword.
pub const NUMERIC_BITS_PER_WORD: usize = 20;

/// Bits transmitted per numeric character.
pub const NUMERIC_BITS_PER_DIGIT: usize = 4;

/// Width of the BCH(31,21) check field.
pub const CRC_BITS: u32 = 10;

/// BCH(31,21) generator polynomial `x^10 + x^9 + x^8 + x^6 + x^5 + x^3 + 1`.
pub const CRC_GENERATOR: u32 = 0b111_0110_1001;

/// Mask for a valid 21-bit capcode.
pub const ADDRESS_MASK: u32 = 0x1F_FFFF;

/// Mask for valid function bits.
pub const FUNCTION_MASK: u8 = 0x3;

/// Largest message (in characters) accepted by the driver.
///
/// Matches the inbound buffer of the BLE pager bridge this crate grew out of.
pub const MAX_MESSAGE_LEN: usize = 140;

/// Largest transmission (in words) the crate ever produces for a message of
/// up to [`MAX_MESSAGE_LEN`] characters.
///
/// Text mode packs fewer characters per word than numeric mode, and frame 7 is
/// the latest address slot, so this bounds every mode and capcode.
pub const MAX_TRANSMISSION_WORDS: usize = text_message_length(0x7, MAX_MESSAGE_LEN);
