//! Fixed-capacity receive queue shared between the UART interrupt and
//! the foreground loop.
//!
//! Single-producer (interrupt) / single-consumer (foreground) with no
//! backpressure signal: once full, incoming bytes are dropped. Drain
//! order is strict FIFO so command bursts execute in arrival order.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::config::RX_CAPACITY;

/// Outcome of an interrupt-side push.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Push {
    Stored,
    /// Queue was full; the byte is lost.
    Dropped,
}

/// Index-counted ring buffer. The explicit length makes every one of the
/// `RX_CAPACITY` slots usable.
pub struct RxQueue {
    buf: [u8; RX_CAPACITY],
    head: usize,
    len: usize,
}

impl RxQueue {
    pub const fn new() -> Self {
        Self {
            buf: [0; RX_CAPACITY],
            head: 0,
            len: 0,
        }
    }

    /// Appends one byte. Never blocks; reports `Dropped` when full and
    /// leaves the stored contents untouched.
    pub fn try_push(&mut self, byte: u8) -> Push {
        if self.len == RX_CAPACITY {
            return Push::Dropped;
        }
        let tail = (self.head + self.len) % RX_CAPACITY;
        self.buf[tail] = byte;
        self.len += 1;
        Push::Stored
    }

    /// Removes the oldest byte, if any. The vacated slot is zeroed so
    /// stale data never shows up on inspection.
    pub fn try_pop(&mut self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        let byte = self.buf[self.head];
        self.buf[self.head] = 0;
        self.head = (self.head + 1) % RX_CAPACITY;
        self.len -= 1;
        Some(byte)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for RxQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// The queue instance shared with the receive interrupt. Lives for the
/// whole process; never deallocated.
pub static RX_QUEUE: Mutex<RefCell<RxQueue>> = Mutex::new(RefCell::new(RxQueue::new()));

/// Interrupt-side append to the shared queue.
pub fn push_from_isr(byte: u8) -> Push {
    critical_section::with(|cs| RX_QUEUE.borrow(cs).borrow_mut().try_push(byte))
}

/// Foreground-side drain of the shared queue.
pub fn try_pop() -> Option<u8> {
    critical_section::with(|cs| RX_QUEUE.borrow(cs).borrow_mut().try_pop())
}
