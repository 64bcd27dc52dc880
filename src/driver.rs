//! Bit-serial POCSAG transmit driver.
//!
//! This module provides the [`PocsagDriver`] struct, which clocks an encoded
//! POCSAG transmission out of a digital output pin, one bit per bit period,
//! most significant bit of each word first. The pin is meant to key an FSK
//! transmitter or to feed the data input of a pager-band radio module.
//!
//! The driver operates independently of the target platform's clock,
//! provided that [`tick()`](PocsagDriver::tick) is called at regular intervals
//! (`ticks_per_bit` calls per 1/1200 s).
//!
//! ## Polarity
//!
//! POCSAG transmits a binary `1` as the lower FSK frequency, so by default each
//! bit is written inverted (`~word`). Radios that already invert their data
//! input can be driven with `inverted = Some(true)`, which writes the bits as
//! they are. Either way the line rests HIGH while idle.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use pocsag_tx::config::PagerConfig;
//! use pocsag_tx::driver::PocsagDriver;
//! use pocsag_tx::encoding::MessageMode;
//!
//! # let tx_pin = Pin::new(&[PinTransaction::set(PinState::High)]);
//! let mut driver: PocsagDriver<Pin, Pin> = PocsagDriver::new(tx_pin, None, 8, None, None);
//! let pager = PagerConfig::for_mode(924395, MessageMode::Numeric).unwrap();
//! let words = driver.send(&pager, b"42").unwrap();
//! assert_eq!(words, 35);
//! # driver.tx.done();
//! ```
//!
//! For tick scheduling helpers, see [`crate::timer`].

use crate::config::PagerConfig;
use crate::consts::MAX_MESSAGE_LEN;
use crate::error::Error;
use crate::transmission::{WordBuffer, WordSink, encode_transmission_into};
use embedded_hal::digital::OutputPin;
use nb::block;

use core::convert::Infallible;

/// Operating state of a [`PocsagDriver`].
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum PocsagMode {
    /// Nothing is being sent. TX rests HIGH and PTT is released.
    #[default]
    Idle,
    /// A transmission is being clocked out by [`PocsagDriver::tick`].
    Tx,
}

/// A software bit-serial transmitter for POCSAG pages.
///
/// ## Type Parameters
///
/// - `TX`: A type implementing [`embedded_hal::digital::OutputPin`] carrying the data bits
/// - `PTT`: A type implementing [`embedded_hal::digital::OutputPin`] keying the transmitter
///
/// ## Notes
///
/// - Only one `PocsagDriver` instance should be ticked from an interrupt.
/// - Pin errors are ignored; a data line has no way to recover from them
///   mid-transmission.
#[derive(Debug)]
pub struct PocsagDriver<TX, PTT>
where
    TX: OutputPin,
    PTT: OutputPin,
{
    /// The current mode of the driver
    pub mode: PocsagMode,
    /// TX data pin
    pub tx: TX,
    /// Push To Talk (PTT) pin
    pub ptt: Option<PTT>,
    ticks_per_bit: u8,
    tick_counter: u8,
    /// The transmission currently queued or being sent
    pub tx_buf: WordBuffer,
    inverted: bool,
    ptt_inverted: bool,

    /// Index of the word currently being transmitted.
    pub(crate) tx_index: usize,

    /// Bit of the current word being transmitted, counted from the MSB (0–31).
    pub(crate) tx_bit: u8,

    /// Counter of completed transmissions.
    pub tx_good: u16,
}

impl<TX, PTT> PocsagDriver<TX, PTT>
where
    TX: OutputPin,
    PTT: OutputPin,
{
    /// Creates a new `PocsagDriver`.
    ///
    /// # Arguments
    /// - `tx`: The output pin carrying the serial data.
    /// - `ptt`: The optional push to talk output.
    /// - `ticks_per_bit`: Number of `tick()` calls per bit period.
    /// - `inverted`: Write bits as-is instead of inverted (default `false`).
    /// - `ptt_inverted`: Whether PTT is active LOW (default `false`).
    ///
    /// # Notes
    /// TX is driven HIGH initially (line idle).
    pub fn new(
        mut tx: TX,
        ptt: Option<PTT>,
        ticks_per_bit: u8,
        inverted: Option<bool>,
        ptt_inverted: Option<bool>,
    ) -> Self {
        let _ = tx.set_high();
        Self {
            mode: PocsagMode::Idle,
            tx,
            ptt,
            ticks_per_bit,
            tick_counter: 0,
            tx_buf: WordBuffer::new(),
            inverted: inverted.unwrap_or(false),
            ptt_inverted: ptt_inverted.unwrap_or(false),
            tx_index: 0,
            tx_bit: 0,
            tx_good: 0,
        }
    }

    fn write_tx(&mut self, level: bool) {
        let _ = if level {
            self.tx.set_high()
        } else {
            self.tx.set_low()
        };
    }

    fn write_ptt(&mut self, mode: bool) {
        let state = if self.ptt_inverted { !mode } else { mode };
        if let Some(ref mut ptt) = self.ptt {
            let _ = if state { ptt.set_high() } else { ptt.set_low() };
        }
    }

    /// Stops transmitting: releases PTT and returns TX to idle.
    pub fn set_mode_idle(&mut self) {
        if self.mode != PocsagMode::Idle {
            self.write_ptt(false);
            self.write_tx(true);
            self.mode = PocsagMode::Idle;
            debug!("pocsag driver idle");
        }
    }

    /// Keys PTT and starts clocking out `tx_buf` from its first bit.
    pub fn set_mode_tx(&mut self) {
        if self.mode != PocsagMode::Tx {
            self.tx_index = 0;
            self.tx_bit = 0;
            self.tick_counter = 0;

            self.write_ptt(true);
            self.mode = PocsagMode::Tx;
            debug!("pocsag driver transmitting {} words", self.tx_buf.len());
        }
    }

    /// Ready when no transmission is in progress.
    pub fn wait_packet_sent(&self) -> nb::Result<(), Infallible> {
        if self.mode == PocsagMode::Tx {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }

    /// Encodes `message` for `pager` and starts transmitting it.
    ///
    /// Blocks until any transmission already in progress has finished, so
    /// `tick()` must be driven from an interrupt when calling this while busy.
    ///
    /// # Returns
    /// The number of words queued.
    ///
    /// # Errors
    /// - [`Error::MessageTooLong`] if `message` exceeds [`MAX_MESSAGE_LEN`]
    pub fn send(&mut self, pager: &PagerConfig, message: &[u8]) -> Result<usize, Error> {
        if message.len() > MAX_MESSAGE_LEN {
            return Err(Error::MessageTooLong {
                len: message.len(),
                max: MAX_MESSAGE_LEN,
            });
        }

        let _ = block!(self.wait_packet_sent());

        self.tx_buf.clear();
        let words = encode_transmission_into(
            pager.mode(),
            pager.capcode(),
            pager.function_bits(),
            message,
            &mut self.tx_buf,
        )?;

        self.set_mode_tx();
        Ok(words)
    }

    /// Starts transmitting an already encoded transmission.
    ///
    /// # Errors
    /// - [`Error::BufferFull`] if `words` does not fit the transmit buffer
    pub fn send_words(&mut self, words: &[u32]) -> Result<usize, Error> {
        let _ = block!(self.wait_packet_sent());

        self.tx_buf.clear();
        for &word in words {
            self.tx_buf.push_word(word)?;
        }

        self.set_mode_tx();
        Ok(words.len())
    }

    /// Advances the transmit state machine by one tick.
    ///
    /// Every `ticks_per_bit` ticks the next bit is written to the TX pin.
    pub fn tick(&mut self) {
        if self.mode == PocsagMode::Tx {
            self.tick_counter += 1;
            if self.tick_counter >= self.ticks_per_bit {
                self.tick_counter = 0;
                self.transmit_bit();
            }
        }
    }

    /// Writes the next bit of the transmission.
    ///
    /// One call after the last bit (one bit period later) finishes the
    /// transmission and returns the driver to idle.
    pub(crate) fn transmit_bit(&mut self) {
        if self.tx_index >= self.tx_buf.len() {
            self.tx_good = self.tx_good.wrapping_add(1);
            self.set_mode_idle();
            return;
        }

        let word = self.tx_buf[self.tx_index];
        if self.tx_bit == 0 {
            trace!("tx word {}: {}", self.tx_index, word);
        }
        let bit = (word >> (31 - self.tx_bit)) & 1 != 0;
        self.write_tx(if self.inverted { bit } else { !bit });

        self.tx_bit += 1;
        if self.tx_bit >= 32 {
            self.tx_bit = 0;
            self.tx_index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::MessageMode;
    use crate::transmission::encode_transmission;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    fn level(high: bool) -> PinTransaction {
        PinTransaction::set(if high {
            PinState::High
        } else {
            PinState::Low
        })
    }

    /// Pin transactions for construction, every bit of `words`, and the
    /// return to idle.
    fn expected_tx(words: &[u32], inverted: bool) -> Vec<PinTransaction> {
        let mut expected = vec![level(true)];
        for &word in words {
            for j in (0..32).rev() {
                let bit = (word >> j) & 1 == 1;
                expected.push(level(if inverted { bit } else { !bit }));
            }
        }
        expected.push(level(true));
        expected
    }

    #[test]
    fn test_driver_initialization() {
        let tx = PinMock::new(&[level(true)]);
        let ptt = PinMock::new(&[]);

        let mut driver = PocsagDriver::new(tx, Some(ptt), 8, None, None);

        assert_eq!(driver.mode, PocsagMode::Idle);
        assert!(driver.wait_packet_sent().is_ok());
        driver.tx.done();
        let _ = driver.ptt.as_mut().map(|ptt| ptt.done());
    }

    #[test]
    fn test_send_starts_transmission() {
        let tx = PinMock::new(&[level(true)]);
        let ptt = PinMock::new(&[level(true)]);
        let mut driver = PocsagDriver::new(tx, Some(ptt), 8, None, None);

        let pager = PagerConfig::for_mode(924395, MessageMode::Numeric)
            .unwrap()
            .with_function_bits(3)
            .unwrap();
        assert_eq!(driver.send(&pager, b"42").unwrap(), 35);
        assert_eq!(driver.mode, PocsagMode::Tx);
        assert_eq!(
            driver.tx_buf,
            encode_transmission(MessageMode::Numeric, 924395, 3, b"42").unwrap()
        );
        assert!(driver.wait_packet_sent().is_err());
        driver.tx.done();
        let _ = driver.ptt.as_mut().map(|ptt| ptt.done());
    }

    #[test]
    fn test_send_rejects_long_message() {
        let tx = PinMock::new(&[level(true)]);
        let mut driver: PocsagDriver<PinMock, PinMock> =
            PocsagDriver::new(tx, None, 8, None, None);
        let pager = PagerConfig::new(1, 0).unwrap();
        let message = [b'a'; MAX_MESSAGE_LEN + 1];

        assert_eq!(
            driver.send(&pager, &message),
            Err(Error::MessageTooLong {
                len: MAX_MESSAGE_LEN + 1,
                max: MAX_MESSAGE_LEN
            })
        );
        assert_eq!(driver.mode, PocsagMode::Idle);
        driver.tx.done();
    }

    #[test]
    fn test_tick_sends_inverted_msb_first() {
        let words = [0x8000_0001];
        let tx = PinMock::new(&expected_tx(&words, false));
        let ptt = PinMock::new(&[level(true), level(false)]);

        let mut driver = PocsagDriver::new(tx, Some(ptt), 2, None, None);
        assert_eq!(driver.send_words(&words).unwrap(), 1);

        // 32 bits plus the trailing bit period, 2 ticks each.
        for _ in 0..(33 * 2) {
            driver.tick();
        }

        assert_eq!(driver.mode, PocsagMode::Idle);
        assert_eq!(driver.tx_good, 1);
        assert_eq!(driver.tx_index, 1);
        assert_eq!(driver.tx_bit, 0);

        // Further ticks do nothing while idle.
        for _ in 0..10 {
            driver.tick();
        }
        driver.tx.done();
        let _ = driver.ptt.as_mut().map(|ptt| ptt.done());
    }

    #[test]
    fn test_tick_full_transmission_non_inverted_polarity() {
        let words = encode_transmission(MessageMode::Text, 12, 3, b"Hi").unwrap();
        let tx = PinMock::new(&expected_tx(&words, true));
        let ptt = PinMock::new(&[level(false), level(true)]);

        let mut driver = PocsagDriver::new(tx, Some(ptt), 1, Some(true), Some(true));
        let pager = PagerConfig::new(12, 3).unwrap();
        assert_eq!(driver.send(&pager, b"Hi").unwrap(), words.len());

        for _ in 0..(words.len() * 32 + 1) {
            driver.tick();
        }

        assert_eq!(driver.mode, PocsagMode::Idle);
        assert_eq!(driver.tx_good, 1);
        driver.tx.done();
        let _ = driver.ptt.as_mut().map(|ptt| ptt.done());
    }

    #[test]
    fn test_back_to_back_transmissions() {
        let words = [0xFFFF_FFFF];
        let mut expected = expected_tx(&words, false);
        expected.extend(expected_tx(&words, false).into_iter().skip(1));
        let tx = PinMock::new(&expected);

        let mut driver: PocsagDriver<PinMock, PinMock> =
            PocsagDriver::new(tx, None, 1, None, None);
        for _ in 0..2 {
            let _ = driver.send_words(&words).unwrap();
            for _ in 0..33 {
                driver.tick();
            }
        }

        assert_eq!(driver.tx_good, 2);
        driver.tx.done();
    }
}
