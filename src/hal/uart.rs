//! Serial transmit service and the receive-interrupt entry point.

use core::convert::Infallible;

use crate::config::TX_MAX_LEN;
use crate::rxqueue;

/// Register-level access to one UART.
pub trait SerialRegisters {
    /// Programs the baud divisor and enables reception plus the
    /// receive interrupt.
    fn configure(&self, divisor: u16);
    fn write_data(&self, byte: u8);
    fn read_data(&self) -> u8;
    fn tx_complete(&self) -> bool;
    fn clear_tx_complete(&self);
    /// Clears the receive-interrupt flag. A no-op on hardware where
    /// reading the data register clears it.
    fn clear_rx_flag(&self);
}

impl<S: SerialRegisters> SerialRegisters for &S {
    fn configure(&self, divisor: u16) {
        (**self).configure(divisor)
    }
    fn write_data(&self, byte: u8) {
        (**self).write_data(byte)
    }
    fn read_data(&self) -> u8 {
        (**self).read_data()
    }
    fn tx_complete(&self) -> bool {
        (**self).tx_complete()
    }
    fn clear_tx_complete(&self) {
        (**self).clear_tx_complete()
    }
    fn clear_rx_flag(&self) {
        (**self).clear_rx_flag()
    }
}

/// Synchronous byte-at-a-time transmitter.
///
/// Foreground-only: calling this from an interrupt handler would spin on
/// the completion flag inside a context that already holds the interrupt
/// mask. Each byte is sent inside a critical section so the completion
/// flag observed belongs to this very transmission and the receive
/// interrupt cannot interleave with the data register write.
pub struct Uart<S> {
    regs: S,
}

impl<S: SerialRegisters> Uart<S> {
    /// Configures the UART for the given baud divisor.
    pub fn new(regs: S, divisor: u16) -> Self {
        regs.configure(divisor);
        Self { regs }
    }

    pub fn send_byte(&mut self, byte: u8) {
        critical_section::with(|_| {
            self.regs.write_data(byte);
            while !self.regs.tx_complete() {}
            self.regs.clear_tx_complete();
        });
    }

    /// Sends up to [`TX_MAX_LEN`] bytes of `s`, then CRLF unconditionally.
    /// Longer strings are truncated. Bytes received while the interrupt
    /// mask is held may be lost; the hardware offers no flow control.
    pub fn send_str(&mut self, s: &str) {
        for &byte in s.as_bytes().iter().take(TX_MAX_LEN) {
            self.send_byte(byte);
        }
        self.send_byte(b'\r');
        self.send_byte(b'\n');
    }
}

impl<S: SerialRegisters> ufmt::uWrite for Uart<S> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        for byte in s.bytes() {
            self.send_byte(byte);
        }
        Ok(())
    }
}

impl<S: SerialRegisters> embedded_hal::serial::Write<u8> for Uart<S> {
    type Error = Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Infallible> {
        self.send_byte(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        // send_byte completes synchronously, nothing is in flight
        Ok(())
    }
}

/// Foreground drain handle over the shared receive queue.
pub struct Receiver {
    _private: (),
}

impl Receiver {
    pub fn new() -> Self {
        Self { _private: () }
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        rxqueue::try_pop()
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}

impl embedded_hal::serial::Read<u8> for Receiver {
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<u8, Infallible> {
        rxqueue::try_pop().ok_or(nb::Error::WouldBlock)
    }
}

/// Receive-interrupt body: grab the byte, queue it, clear the flag.
/// Overflow is silent; with no flow-control signal to the sender the
/// byte is simply lost.
pub fn on_receive<S: SerialRegisters>(regs: &S) {
    let byte = regs.read_data();
    let _ = rxqueue::push_from_isr(byte);
    regs.clear_rx_flag();
}
