//! In-memory register backends.
//!
//! Stand-ins for the memory-mapped peripherals, used by the host test
//! suite. State lives in `Cell`s so a test can hold a shared reference
//! for inspection while the service under test drives the registers
//! through `&SimTimer` / `&SimSerial`.

use core::cell::{Cell, Ref, RefCell};
use core::convert::Infallible;

use embedded_hal::digital::v2::{OutputPin, ToggleableOutputPin};

use super::timer::{TimerMode, TimerRegisters};
use super::uart::SerialRegisters;

pub struct SimTimer {
    mode: Cell<TimerMode>,
    reload: Cell<u16>,
    running: Cell<bool>,
    overflow: Cell<bool>,
    /// When set, the overflow flag reads true as soon as the timer runs,
    /// so busy-wait loops terminate under test.
    auto_overflow: Cell<bool>,
    reload_writes: Cell<u32>,
    starts: Cell<u32>,
}

impl SimTimer {
    pub fn new() -> Self {
        Self {
            mode: Cell::new(TimerMode::OneShot),
            reload: Cell::new(0),
            running: Cell::new(false),
            overflow: Cell::new(false),
            auto_overflow: Cell::new(true),
            reload_writes: Cell::new(0),
            starts: Cell::new(0),
        }
    }

    pub fn set_auto_overflow(&self, enabled: bool) {
        self.auto_overflow.set(enabled);
    }

    pub fn raise_overflow(&self) {
        self.overflow.set(true);
    }

    pub fn overflow_raised(&self) -> bool {
        self.overflow.get()
    }

    pub fn mode(&self) -> TimerMode {
        self.mode.get()
    }

    pub fn reload(&self) -> u16 {
        self.reload.get()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn reload_writes(&self) -> u32 {
        self.reload_writes.get()
    }

    pub fn starts(&self) -> u32 {
        self.starts.get()
    }
}

impl Default for SimTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerRegisters for SimTimer {
    fn write_mode(&self, mode: TimerMode) {
        self.mode.set(mode);
    }

    fn write_reload(&self, value: u16) {
        self.reload.set(value);
        self.reload_writes.set(self.reload_writes.get() + 1);
    }

    fn set_run(&self, running: bool) {
        self.running.set(running);
        if running {
            self.starts.set(self.starts.get() + 1);
            if self.auto_overflow.get() {
                self.overflow.set(true);
            }
        }
    }

    fn overflow_flag(&self) -> bool {
        self.overflow.get()
    }

    fn clear_overflow_flag(&self) {
        self.overflow.set(false);
    }
}

const TX_LOG_SIZE: usize = 128;

struct TxLog {
    buf: [u8; TX_LOG_SIZE],
    len: usize,
}

pub struct SimSerial {
    divisor: Cell<u16>,
    tx: RefCell<TxLog>,
    tx_done: Cell<bool>,
    rx_data: Cell<u8>,
    rx_flag: Cell<bool>,
}

impl SimSerial {
    pub fn new() -> Self {
        Self {
            divisor: Cell::new(0),
            tx: RefCell::new(TxLog {
                buf: [0; TX_LOG_SIZE],
                len: 0,
            }),
            tx_done: Cell::new(true),
            rx_data: Cell::new(0),
            rx_flag: Cell::new(false),
        }
    }

    /// Loads a byte into the data register and raises the receive flag,
    /// as the wire would.
    pub fn deliver(&self, byte: u8) {
        self.rx_data.set(byte);
        self.rx_flag.set(true);
    }

    pub fn rx_flag_raised(&self) -> bool {
        self.rx_flag.get()
    }

    pub fn divisor(&self) -> u16 {
        self.divisor.get()
    }

    /// Everything written to the data register so far, in order.
    pub fn transmitted(&self) -> Ref<'_, [u8]> {
        Ref::map(self.tx.borrow(), |log| &log.buf[..log.len])
    }

    pub fn clear_transmitted(&self) {
        self.tx.borrow_mut().len = 0;
    }
}

impl Default for SimSerial {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialRegisters for SimSerial {
    fn configure(&self, divisor: u16) {
        self.divisor.set(divisor);
    }

    fn write_data(&self, byte: u8) {
        let mut log = self.tx.borrow_mut();
        if log.len < TX_LOG_SIZE {
            let at = log.len;
            log.buf[at] = byte;
            log.len += 1;
        }
        self.tx_done.set(true);
    }

    fn read_data(&self) -> u8 {
        self.rx_data.get()
    }

    fn tx_complete(&self) -> bool {
        self.tx_done.get()
    }

    fn clear_tx_complete(&self) {
        self.tx_done.set(false);
    }

    fn clear_rx_flag(&self) {
        self.rx_flag.set(false);
    }
}

/// Boolean output with a toggle count.
pub struct SimPin {
    level: Cell<bool>,
    toggles: Cell<u32>,
}

impl SimPin {
    pub fn new() -> Self {
        Self {
            level: Cell::new(false),
            toggles: Cell::new(0),
        }
    }

    pub fn is_high(&self) -> bool {
        self.level.get()
    }

    pub fn toggles(&self) -> u32 {
        self.toggles.get()
    }
}

impl Default for SimPin {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPin for &SimPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.level.set(true);
        Ok(())
    }
}

impl ToggleableOutputPin for &SimPin {
    type Error = Infallible;

    fn toggle(&mut self) -> Result<(), Infallible> {
        self.level.set(!self.level.get());
        self.toggles.set(self.toggles.get() + 1);
        Ok(())
    }
}
