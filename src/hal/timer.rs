//! Hardware timer abstraction and the blocking delay service built on it.

use embedded_hal::blocking::delay::DelayMs;

use crate::config::DELAY_RELOAD_1MS;

/// Counting mode of a 16-bit hardware timer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerMode {
    /// Software reloads and restarts the timer after each overflow.
    OneShot,
    /// Hardware reloads the preset value on overflow and keeps counting.
    AutoReload,
}

/// Register-level access to one hardware timer.
///
/// All operations are infallible: register access is unconditional and a
/// wrong reload value is a caller bug, not a runtime fault. Not safe to
/// share with an interrupt handler without masking that interrupt.
pub trait TimerRegisters {
    fn write_mode(&self, mode: TimerMode);
    /// Programs the reload value, `2^16 - period_in_ticks`. The backend
    /// splits it into the high/low register pair.
    fn write_reload(&self, value: u16);
    fn set_run(&self, running: bool);
    fn overflow_flag(&self) -> bool;
    /// Clears the hardware overflow flag. Must happen before an overflow
    /// interrupt handler returns or the interrupt re-fires immediately.
    fn clear_overflow_flag(&self);
}

impl<T: TimerRegisters> TimerRegisters for &T {
    fn write_mode(&self, mode: TimerMode) {
        (**self).write_mode(mode)
    }
    fn write_reload(&self, value: u16) {
        (**self).write_reload(value)
    }
    fn set_run(&self, running: bool) {
        (**self).set_run(running)
    }
    fn overflow_flag(&self) -> bool {
        (**self).overflow_flag()
    }
    fn clear_overflow_flag(&self) {
        (**self).clear_overflow_flag()
    }
}

/// A free-running countable timer behind a register backend.
pub struct Timer<T> {
    regs: T,
}

impl<T: TimerRegisters> Timer<T> {
    pub fn new(regs: T) -> Self {
        Self { regs }
    }

    pub fn configure(&mut self, mode: TimerMode, reload: u16) {
        self.regs.write_mode(mode);
        self.regs.write_reload(reload);
    }

    pub fn start(&mut self) {
        self.regs.set_run(true);
    }

    pub fn stop(&mut self) {
        self.regs.set_run(false);
    }

    pub fn overflow_occurred(&self) -> bool {
        self.regs.overflow_flag()
    }

    pub fn clear_overflow(&mut self) {
        self.regs.clear_overflow_flag();
    }
}

/// Busy-wait millisecond delay on a dedicated one-shot timer.
///
/// Runs entirely in foreground context and blocks for the full duration;
/// there is no scheduler to yield to. Interrupts stay enabled while
/// spinning, so tick and receive events keep being serviced.
pub struct Delay<T> {
    timer: Timer<T>,
}

impl<T: TimerRegisters> Delay<T> {
    pub fn new(regs: T) -> Self {
        Self {
            timer: Timer::new(regs),
        }
    }

    /// Blocks for `ms` milliseconds. Zero returns immediately.
    pub fn delay_ms(&mut self, mut ms: u16) {
        while ms > 0 {
            self.timer.configure(TimerMode::OneShot, DELAY_RELOAD_1MS);
            self.timer.start();
            while !self.timer.overflow_occurred() {}
            self.timer.stop();
            self.timer.clear_overflow();
            ms -= 1;
        }
    }
}

impl<T: TimerRegisters> DelayMs<u16> for Delay<T> {
    fn delay_ms(&mut self, ms: u16) {
        Delay::delay_ms(self, ms);
    }
}

impl<T: TimerRegisters> DelayMs<u8> for Delay<T> {
    fn delay_ms(&mut self, ms: u8) {
        Delay::delay_ms(self, u16::from(ms));
    }
}
