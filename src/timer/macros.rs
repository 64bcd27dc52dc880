/// Declares a static global `POCSAG_DRIVER` instance protected by a
/// `critical_section` mutex.
///
/// This macro creates a `static` singleton `POCSAG_DRIVER` suitable for use in
/// interrupt-based environments, where both the main thread and an ISR need
/// to safely access the shared driver state.
///
/// # Arguments
/// - `$tx`: The concrete type of the TX pin (must implement `OutputPin`)
/// - `$ptt`: The concrete type of the PTT pin (must implement `OutputPin`)
///
/// # Example
/// ```rust,ignore
/// init_pocsag_driver!(MyTxPinType, MyPttPinType);
/// ```
#[macro_export]
macro_rules! init_pocsag_driver {
    ( $tx:ty, $ptt:ty ) => {
        pub static POCSAG_DRIVER: $crate::timer::GlobalPocsagDriver<$tx, $ptt> =
            $crate::timer::global_pocsag_driver_init();
    };
}

/// Initializes the global `POCSAG_DRIVER` singleton with a new driver instance.
///
/// # Arguments
/// - `$tx`: The TX pin (must implement `OutputPin`)
/// - `$ptt`: `Some(pin)` or `None` for the PTT pin
/// - `$tpb`: Ticks per bit (e.g., 8 with a 104.17 µs timer)
/// - `$inverted`: `Option<bool>`, write bits as-is instead of inverted
/// - `$ptt_inverted`: `Option<bool>`, whether PTT is active LOW
///
/// # Example
/// ```rust,ignore
/// setup_pocsag_driver!(tx, None, 8, None, None);
/// ```
///
/// # Notes
/// - Requires `init_pocsag_driver!` to have been used earlier.
#[macro_export]
macro_rules! setup_pocsag_driver {
    ( $tx:expr, $ptt:expr, $tpb:expr, $inverted:expr, $ptt_inverted:expr ) => {
        $crate::timer::global_pocsag_driver_setup(
            &POCSAG_DRIVER,
            $tx,
            $ptt,
            $tpb,
            $inverted,
            $ptt_inverted,
        )
    };
}

/// Calls `tick()` on the global `POCSAG_DRIVER` if it has been initialized.
///
/// This macro is intended to be invoked from a timer ISR firing
/// `ticks_per_bit` times per 1/1200 s.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     tick_pocsag_timer!();
/// }
/// ```
///
/// # Notes
/// - Safe to call before setup; it silently does nothing.
#[macro_export]
macro_rules! tick_pocsag_timer {
    () => {
        $crate::timer::global_pocsag_timer_tick(&POCSAG_DRIVER)
    };
}

#[cfg(test)]
mod tests {
    use crate::driver::PocsagMode;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn test_macros_drive_global_driver() {
        init_pocsag_driver!(PinMock, PinMock);

        // Ticking before setup is a no-op.
        tick_pocsag_timer!();

        let mut expected = vec![PinTransaction::set(PinState::High)];
        expected.extend((0..32).map(|_| PinTransaction::set(PinState::High)));
        expected.push(PinTransaction::set(PinState::High));
        let tx = PinMock::new(&expected);

        setup_pocsag_driver!(tx, None, 1, Some(false), None);
        critical_section::with(|cs| {
            if let Some(driver) = POCSAG_DRIVER.borrow(cs).borrow_mut().as_mut() {
                let _ = driver.send_words(&[0]).unwrap();
            }
        });

        for _ in 0..33 {
            tick_pocsag_timer!();
        }

        let mut driver = critical_section::with(|cs| POCSAG_DRIVER.borrow(cs).take()).unwrap();
        assert_eq!(driver.mode, PocsagMode::Idle);
        assert_eq!(driver.tx_good, 1);
        driver.tx.done();
    }
}
