//! Pager addressing configuration.
//!
//! A [`PagerConfig`] bundles everything needed to address one pager: its
//! capcode, the function bits to send with it, and the body encoding. Unlike
//! the raw functions in [`transmission`](crate::transmission), it checks that
//! each value fits its field and that the address word is not one of the
//! reserved SYNC or IDLE codewords.

use crate::consts::{ADDRESS_MASK, FLAG_ADDRESS, FUNCTION_MASK, IDLE, SYNC};
use crate::crc::encode_codeword;
use crate::encoding::MessageMode;
use crate::error::Error;
use crate::transmission::{WordBuffer, encode_transmission, message_length};

/// Validated addressing for one pager.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct PagerConfig {
    capcode: u32,
    function_bits: u8,
    mode: MessageMode,
}

impl PagerConfig {
    /// Creates a text-mode configuration.
    ///
    /// # Errors
    /// - [`Error::InvalidAddress`] if `capcode` is wider than 21 bits
    /// - [`Error::InvalidFunctionBits`] if `function_bits` is wider than 2 bits
    /// - [`Error::ReservedAddress`] if the address word would equal SYNC or IDLE
    pub fn new(capcode: u32, function_bits: u8) -> Result<Self, Error> {
        if capcode & !ADDRESS_MASK != 0 {
            return Err(Error::InvalidAddress(capcode));
        }
        check_address_word(capcode, function_bits)?;
        Ok(Self {
            capcode,
            function_bits,
            mode: MessageMode::default(),
        })
    }

    /// Creates a configuration using the function bits pagers conventionally
    /// expect for `mode`.
    pub fn for_mode(capcode: u32, mode: MessageMode) -> Result<Self, Error> {
        Ok(Self::new(capcode, mode.function_bits())?.with_mode(mode))
    }

    /// Sets the body encoding, keeping the function bits as they are.
    pub fn with_mode(mut self, mode: MessageMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replaces the function bits.
    ///
    /// # Errors
    /// Same function bit checks as [`PagerConfig::new`].
    pub fn with_function_bits(mut self, function_bits: u8) -> Result<Self, Error> {
        check_address_word(self.capcode, function_bits)?;
        self.function_bits = function_bits;
        Ok(self)
    }

    /// The 21-bit capcode.
    pub fn capcode(&self) -> u32 {
        self.capcode
    }

    /// The 2-bit function code.
    pub fn function_bits(&self) -> u8 {
        self.function_bits
    }

    /// The body encoding.
    pub fn mode(&self) -> MessageMode {
        self.mode
    }

    /// Length in words of a transmission of `num_chars` characters.
    pub fn message_length(&self, num_chars: usize) -> usize {
        message_length(self.mode, self.capcode, num_chars)
    }

    /// Encodes `message` for this pager.
    pub fn encode(&self, message: &[u8]) -> Result<WordBuffer, Error> {
        encode_transmission(self.mode, self.capcode, self.function_bits, message)
    }
}

fn check_address_word(capcode: u32, function_bits: u8) -> Result<(), Error> {
    if function_bits & !FUNCTION_MASK != 0 {
        return Err(Error::InvalidFunctionBits(function_bits));
    }
    let word = encode_codeword(FLAG_ADDRESS | ((capcode >> 3) << 2) | u32::from(function_bits));
    if word == SYNC || word == IDLE {
        return Err(Error::ReservedAddress {
            capcode,
            function_bits,
        });
    }
    Ok(())
}
