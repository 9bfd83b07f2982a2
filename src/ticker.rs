//! Periodic tick counter driven by the auto-reload timer interrupt.

use core::cell::Cell;

use critical_section::Mutex;

use crate::config::TICK_WRAP;

/// Tick count shared between the overflow interrupt and the foreground
/// loop. Single-writer (interrupt) / single-reader (foreground); both
/// sides go through a critical section so the read can never be torn,
/// whatever the native word size.
pub struct TickCounter {
    ticks: Mutex<Cell<u8>>,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
        }
    }

    /// Foreground read. Value is always in `[0, TICK_WRAP)`.
    pub fn read(&self) -> u8 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }

    /// Interrupt-side transition: +1, wrapping to 0 past `TICK_WRAP - 1`.
    ///
    /// If interrupts stay masked longer than one tick period, overflow
    /// events are silently lost; critical sections must stay shorter
    /// than the tick period.
    pub fn increment_and_wrap(&self) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            let next = ticks.get() + 1;
            ticks.set(if next >= TICK_WRAP { 0 } else { next });
        });
    }
}

/// The system tick, incremented every `TICK_PERIOD_MS` by the timer
/// overflow handler.
pub static SYSTEM_TICKS: TickCounter = TickCounter::new();
