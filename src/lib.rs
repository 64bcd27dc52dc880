//! # pocsag-tx
//!
//! A portable, no_std Rust encoder and bit-serial transmitter for the POCSAG
//! paging protocol, suitable for driving cheap pager-band FSK modules from a
//! single GPIO.
//!
//! This crate implements:
//! - BCH(31,21) codeword encoding with even parity
//! - numeric and alphanumeric message bodies
//! - batch framing with preamble, SYNC and IDLE codewords, and address frame
//!   placement
//! - exact, `const` transmission length calculation for buffer sizing
//! - `embedded-hal` based transmit driver clocked by a timer interrupt or a
//!   blocking delay
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support and replaces `heapless::Vec`s with
//! `std::vec::Vec`s |
//! | `delay-loop`          | Uses `embedded_hal::delay::DelayNs` for bit timing |
//! | `timer-isr` (default) | Uses `critical_section::with` for bit timing |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust
//! use pocsag_tx::config::PagerConfig;
//! use pocsag_tx::consts::{PREAMBLE_WORDS, SYNC};
//! use pocsag_tx::encoding::MessageMode;
//!
//! let pager = PagerConfig::for_mode(924395, MessageMode::Numeric).unwrap();
//! let words = pager.encode(b"42").unwrap();
//! assert_eq!(words.len(), pager.message_length(2));
//! assert_eq!(words[PREAMBLE_WORDS], SYNC);
//! ```
//!
//! To put the words on air, hand them to a [`driver::PocsagDriver`] and call
//! `tick()` at `ticks_per_bit` times 1200 Hz, or use
//! `timer::transmit_blocking` with a `DelayNs` implementation.
//!
//! ## Integration Notes
//!
//! - Bit rate is fixed at 1200 baud (833.3 µs per bit)
//! - Timing precision matters; hardware timer configuration is recommended
//! - Only one driver instance should be active at a time in interrupt-driven mode
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod fmt;

#[cfg(feature = "timer-isr")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod config;
pub mod consts;
pub mod crc;
pub mod driver;
pub mod encoding;
pub mod error;
pub mod timer;
pub mod transmission;

pub use error::Error;
