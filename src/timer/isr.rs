use crate::config::PagerConfig;
use crate::driver::{PocsagDriver, PocsagMode};
use crate::error::Error;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::OutputPin;

/// Global `PocsagDriver` slot shared between the main loop and a timer ISR.
pub type GlobalPocsagDriver<TX, PTT> = Mutex<RefCell<Option<PocsagDriver<TX, PTT>>>>;

/// Used to initialize the global static `PocsagDriver` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust
/// use embedded_hal_mock::eh1::digital::Mock as Pin;
/// use pocsag_tx::timer::{GlobalPocsagDriver, global_pocsag_driver_init};
///
/// static POCSAG: GlobalPocsagDriver<Pin, Pin> = global_pocsag_driver_init();
/// ```
pub const fn global_pocsag_driver_init<TX: OutputPin, PTT: OutputPin>()
-> GlobalPocsagDriver<TX, PTT> {
    Mutex::new(RefCell::new(None))
}

/// Creates the driver and stores it in the global slot.
///
/// # Arguments
/// * The global static `PocsagDriver`
/// * The tx pin
/// * The optional ptt pin
/// * The number of ISR ticks per bit such that
///   `interrupt frequency / ticks per bit = 1200 bits per second`
/// * Whether bits are written as-is instead of inverted
/// * Whether PTT is active LOW
pub fn global_pocsag_driver_setup<TX: OutputPin, PTT: OutputPin>(
    global_driver: &'static GlobalPocsagDriver<TX, PTT>,
    tx: TX,
    ptt: Option<PTT>,
    ticks_per_bit: u8,
    inverted: Option<bool>,
    ptt_inverted: Option<bool>,
) {
    critical_section::with(|cs| {
        let _ = global_driver.borrow(cs).replace(Some(PocsagDriver::new(
            tx,
            ptt,
            ticks_per_bit,
            inverted,
            ptt_inverted,
        )));
    });
}

/// Runs the tick at each interrupt
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     global_pocsag_timer_tick(&POCSAG);
/// }
/// ```
pub fn global_pocsag_timer_tick<TX: OutputPin, PTT: OutputPin>(
    global_driver: &'static GlobalPocsagDriver<TX, PTT>,
) {
    critical_section::with(|cs| {
        if let Some(driver) = global_driver.borrow(cs).borrow_mut().as_mut() {
            driver.tick();
        }
    });
}

/// Queues a page on the global driver without blocking inside the critical
/// section.
///
/// Returns `WouldBlock` while a transmission is in progress, so callers
/// retry with `nb::block!` and let the ISR keep ticking in between.
///
/// # Errors
/// - [`Error::NotInitialized`] if the global driver has not been set up
/// - Any error from [`PocsagDriver::send`]
pub fn global_pocsag_send<TX: OutputPin, PTT: OutputPin>(
    global_driver: &'static GlobalPocsagDriver<TX, PTT>,
    pager: &PagerConfig,
    message: &[u8],
) -> nb::Result<usize, Error> {
    critical_section::with(|cs| {
        let mut slot = global_driver.borrow(cs).borrow_mut();
        let driver = slot.as_mut().ok_or(nb::Error::Other(Error::NotInitialized))?;
        if driver.mode == PocsagMode::Tx {
            return Err(nb::Error::WouldBlock);
        }
        driver.send(pager, message).map_err(nb::Error::Other)
    })
}
