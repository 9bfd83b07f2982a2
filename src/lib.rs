//! # tickloop
//!
//! Minimal runtime for single-loop MCU firmware: a timer-interrupt tick
//! counter, a busy-wait millisecond delay on a second timer, an
//! interrupt-fed serial receive queue, a synchronous transmit service,
//! and the foreground loop dispatching on both.
//!
//! Execution model: one foreground loop plus two non-nested interrupt
//! sources (tick timer overflow, serial receive). The only shared state
//! is the tick counter and the receive queue, each single-writer /
//! single-reader behind a critical section.
//!
//! Register access goes through the traits in [`hal`]; the ATmega128
//! backend sits behind the `atmega128` feature, and [`hal::sim`]
//! provides in-memory registers for the host test suite.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(feature = "atmega128", feature(abi_avr_interrupt))]

pub mod application;
pub mod config;
pub mod hal;
pub mod rxqueue;
pub mod ticker;

pub use application::Application;
pub use rxqueue::{Push, RxQueue};
pub use ticker::TickCounter;
