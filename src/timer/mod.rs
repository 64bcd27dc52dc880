//! Timer and tick-loop utilities for the POCSAG driver.
//!
//! POCSAG here runs at 1200 baud, so one bit lasts 833.3 µs. The driver can be
//! clocked two ways: from a timer interrupt through `critical_section::with`
//! (`timer-isr` feature), or from a blocking delay loop (`delay-loop`
//! feature).
//!
//! Contains helpers for polling- and ISR-based scheduling, including:
//! - `compute_ocr_value`: runtime OCR calculator
//! - `const_ocr_value`: compile-time OCR calculator
//! - `run_pocsag_tick_loop` and `transmit_blocking`: blocking drivers for
//!   `DelayNs` (feature `delay-loop`)
//! - `global_pocsag_timer_tick` and `tick_pocsag_timer!()`: interrupt-based
//!   tick callback wrapper (feature `timer-isr`)
//!
//! Common AVR setups at 16 MHz for 8 ticks per bit (104.17 µs per tick):
//!
//! | PRESCALER | OCR |
//! |-----------|-----|
//! |         8 | 208 |
//! |        64 |  26 |

use libm::round;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

/// 1200 bits / second
pub const BITS_PER_SECOND: u32 = 1_200;
/// Bit period rounded down to whole microseconds
pub const MICROSECONDS_PER_BIT: u32 = 1_000_000 / BITS_PER_SECOND;
/// Bit period rounded down to whole nanoseconds
pub const NANOSECONDS_PER_BIT: u32 = 1_000_000_000 / BITS_PER_SECOND;
/// 1,000 nanoseconds = 1 microsecond
pub const NANOSECONDS_PER_MICROSECOND: u32 = 1_000;

const EXACT_MICROSECONDS_PER_BIT: f64 = 1_000_000.0 / BITS_PER_SECOND as f64;

/// Computes the OCR value for an AVR timer (CTC mode)
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 8, 64, 256)
/// - `tick_us`: desired tick interval in microseconds (e.g., 104.17)
///
/// # Returns
/// - OCR value for OCRnA (rounds to nearest integer)
/// - Number of ticks per bit (for initializing the `PocsagDriver`)
pub fn compute_ocr_value(f_cpu: u32, prescaler: u32, tick_us: f32) -> (u16, u8) {
    let counts_per_second = f64::from(f_cpu) / f64::from(prescaler);
    let counts_per_tick = counts_per_second * (f64::from(tick_us) / 1_000_000.0);
    (round(counts_per_tick) as u16, ticks_per_bit(tick_us))
}

/// Compile-time OCR value calculator
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 8, 64, 256)
/// - `tick_ns`: desired tick interval in nanoseconds (e.g., 104_167)
///
/// # Returns
/// - OCR value for OCRnA (truncated)
pub const fn const_ocr_value(f_cpu: u32, prescaler: u32, tick_ns: u32) -> u16 {
    let counts = (f_cpu / prescaler) as u64 * tick_ns as u64
        / (NANOSECONDS_PER_MICROSECOND as u64 * 1_000_000);
    counts as u16
}

/// Compute ticks per bit value
///
/// # Arguments
/// - `tick_us`: desired tick interval in microseconds (e.g., 104.17)
///
/// # Returns
/// - Number of ticks per bit (for initializing the `PocsagDriver`)
///
/// # Panics
/// If `tick_us` is not positive.
pub fn ticks_per_bit(tick_us: f32) -> u8 {
    assert!(tick_us > 0.0, "tick interval must be positive");
    round(EXACT_MICROSECONDS_PER_BIT / f64::from(tick_us)) as u8
}

/// Compile-time ticks per bit value
///
/// # Arguments
/// - `tick_ns`: desired tick interval in nanoseconds (e.g., 104_167)
///
/// # Returns
/// - Number of ticks per bit (for initializing the `PocsagDriver`)
///
/// # Panics
/// If `tick_ns` is zero. In a `const` context this is a compile error.
pub const fn const_ticks_per_bit(tick_ns: u32) -> u8 {
    assert!(tick_ns > 0, "tick interval must be positive");
    ((NANOSECONDS_PER_BIT + tick_ns / 2) / tick_ns) as u8
}
