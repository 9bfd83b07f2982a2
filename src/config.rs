//! Configuration constants for the runtime
//!
//! Every timing assumption lives here. Changing `CPU_FREQ_HZ` or
//! `TIMER_DIVISOR` recomputes the derived reload values; nothing else in
//! the crate hardcodes a clock-dependent number.

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// Fixed prescaler applied to both hardware timers by the register backend
pub const TIMER_DIVISOR: u32 = 64;

/// Timer counts per millisecond at the configured clock and divisor
pub const TICKS_PER_MS: u32 = CPU_FREQ_HZ / TIMER_DIVISOR / 1000;

/// One-shot reload for a 1 ms delay: the 16-bit counter overflows after
/// exactly `TICKS_PER_MS` counts
pub const DELAY_RELOAD_1MS: u16 = (0x1_0000 - TICKS_PER_MS) as u16;

/// Period of the system tick in milliseconds
pub const TICK_PERIOD_MS: u32 = 50;

/// Auto-reload value for the periodic tick timer
pub const TICK_RELOAD: u16 = (0x1_0000 - TICKS_PER_MS * TICK_PERIOD_MS) as u16;

/// Tick counter wraps back to 0 after this many ticks (200 * 50 ms = 10 s)
pub const TICK_WRAP: u8 = 200;

/// The heartbeat action fires every this-many ticks (20 * 50 ms = 1 s)
pub const TICK_BOUNDARY: u8 = 20;

/// Delay after a heartbeat toggle so the same tick boundary is not
/// re-triggered before the counter advances
pub const BOUNDARY_HOLDOFF_MS: u16 = 100;

/// Receive queue capacity in bytes; incoming bytes are dropped once full
pub const RX_CAPACITY: usize = 32;

/// Maximum payload length of a transmitted line, excluding CRLF
pub const TX_MAX_LEN: usize = 32;

/// UART baud rate
pub const UART_BAUD: u32 = 2400;

/// Baud rate divisor for the UART backend
pub const BAUD_DIVISOR: u16 = (CPU_FREQ_HZ / (16 * UART_BAUD) - 1) as u16;

/// Message replayed by the `'4'` command
pub const GREETING: &str = "Hello there... General Kenobi.";
