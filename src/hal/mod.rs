pub mod sim;
pub mod timer;
pub mod uart;

#[cfg(feature = "atmega128")]
pub mod avr;
#[cfg(feature = "atmega128")]
pub mod gpio;

// Re-export commonly used types
pub use timer::{Delay, Timer, TimerMode, TimerRegisters};
pub use uart::{Receiver, SerialRegisters, Uart};
