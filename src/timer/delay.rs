use super::MICROSECONDS_PER_BIT;
use crate::driver::{PocsagDriver, PocsagMode};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Runs a blocking loop that repeatedly calls `tick()` on the provided driver.
///
/// This is a simple timing loop for use in environments where interrupts are
/// unavailable or undesired.
///
/// # Arguments
/// - `driver`: A mutable reference to a `PocsagDriver` instance.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `tick_us`: The delay between each tick call, in microseconds.
///
/// # Notes
/// - This loop never returns; it is intended for single-purpose firmware.
/// - Messages must be queued from elsewhere (e.g. an interrupt handler).
pub fn run_pocsag_tick_loop<D: DelayNs, TX, PTT>(
    driver: &mut PocsagDriver<TX, PTT>,
    delay: &mut D,
    tick_us: u32,
) -> !
where
    TX: OutputPin,
    PTT: OutputPin,
{
    loop {
        driver.tick();
        delay.delay_us(tick_us);
    }
}

/// Clocks out the queued transmission by busy-waiting one bit period per bit,
/// returning once the driver is idle again.
///
/// Returns immediately if nothing is being transmitted.
pub fn transmit_blocking<D: DelayNs, TX, PTT>(driver: &mut PocsagDriver<TX, PTT>, delay: &mut D)
where
    TX: OutputPin,
    PTT: OutputPin,
{
    while driver.mode == PocsagMode::Tx {
        driver.transmit_bit();
        delay.delay_us(MICROSECONDS_PER_BIT);
    }
}
