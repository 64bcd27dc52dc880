//! Error type shared by the encoder, configuration and driver.
//!
//! The POCSAG encoding itself is total: every 21-bit address, 2-bit function
//! code and byte string has an encoding. Errors only arise at the edges, when
//! a bounded output buffer runs out of room or when a configuration value is
//! unusable.

use thiserror::Error;

/// Errors reported by this crate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Error {
    /// A bounded word buffer had no room for the next word.
    #[error("word buffer is full (capacity {capacity} words)")]
    BufferFull {
        /// Total capacity of the buffer, in words.
        capacity: usize,
    },

    /// A pre-sized output slice is shorter than the transmission it must hold.
    #[error("output buffer holds {capacity} words but the transmission needs {needed}")]
    BufferTooSmall {
        /// Words the transmission will occupy.
        needed: usize,
        /// Words available in the output slice.
        capacity: usize,
    },

    /// The message is longer than the driver's transmit buffer allows.
    #[error("message of {len} characters exceeds the {max} character limit")]
    MessageTooLong {
        /// Length of the rejected message.
        len: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// The capcode does not fit in 21 bits.
    #[error("capcode {0} does not fit in 21 bits")]
    InvalidAddress(u32),

    /// The capcode and function bits encode to the SYNC or IDLE codeword, so
    /// receivers would never see the address.
    #[error("capcode {capcode} with function bits {function_bits} encodes to a reserved codeword")]
    ReservedAddress {
        /// The rejected capcode.
        capcode: u32,
        /// The rejected function bits.
        function_bits: u8,
    },

    /// The function code does not fit in 2 bits.
    #[error("function bits {0} do not fit in 2 bits")]
    InvalidFunctionBits(u8),

    /// The global interrupt-driven driver has not been set up yet.
    #[error("global POCSAG driver is not initialized")]
    NotInitialized,
}
