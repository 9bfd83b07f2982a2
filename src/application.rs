//! Foreground dispatch loop logic.
//!
//! `main` calls [`Application::poll`] forever. Each pass checks the tick
//! counter against the heartbeat boundary, then drains the receive queue
//! and dispatches each command byte. Nothing here blocks except through
//! the delay service.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::ToggleableOutputPin;
use embedded_hal::serial::Read;

use crate::config::{BOUNDARY_HOLDOFF_MS, GREETING, TICK_BOUNDARY};
use crate::hal::uart::{SerialRegisters, Uart};

/// The output pins the loop drives: one heartbeat plus one per toggle
/// command.
pub struct Leds<H, A, B, C> {
    pub heartbeat: H,
    pub cmd1: A,
    pub cmd2: B,
    pub cmd3: C,
}

/// True when `ticks` sits on a heartbeat boundary.
pub fn tick_due(ticks: u8, boundary: u8) -> bool {
    ticks % boundary == 0
}

pub struct Application {
    greeting: &'static str,
}

impl Application {
    pub fn new() -> Self {
        Self { greeting: GREETING }
    }

    pub fn with_greeting(greeting: &'static str) -> Self {
        Self { greeting }
    }

    /// Acts on one received command byte.
    ///
    /// `'1'`..`'3'` toggle the command LEDs, `'4'` replays the stored
    /// greeting, anything else is a 1 ms no-op delay.
    pub fn dispatch<H, A, B, C, S, D>(
        &mut self,
        cmd: u8,
        leds: &mut Leds<H, A, B, C>,
        uart: &mut Uart<S>,
        delay: &mut D,
    ) where
        H: ToggleableOutputPin,
        A: ToggleableOutputPin,
        B: ToggleableOutputPin,
        C: ToggleableOutputPin,
        S: SerialRegisters,
        D: DelayMs<u16>,
    {
        match cmd {
            b'1' => {
                let _ = leds.cmd1.toggle();
            }
            b'2' => {
                let _ = leds.cmd2.toggle();
            }
            b'3' => {
                let _ = leds.cmd3.toggle();
            }
            b'4' => uart.send_str(self.greeting),
            _ => delay.delay_ms(1),
        }
    }

    /// One pass of the foreground loop.
    ///
    /// On a tick boundary the heartbeat LED toggles, then the loop holds
    /// off long enough for the counter to move past the boundary so the
    /// same tick does not re-trigger it.
    pub fn poll<H, A, B, C, S, R, D>(
        &mut self,
        ticks: u8,
        leds: &mut Leds<H, A, B, C>,
        uart: &mut Uart<S>,
        rx: &mut R,
        delay: &mut D,
    ) where
        H: ToggleableOutputPin,
        A: ToggleableOutputPin,
        B: ToggleableOutputPin,
        C: ToggleableOutputPin,
        S: SerialRegisters,
        R: Read<u8>,
        D: DelayMs<u16>,
    {
        if tick_due(ticks, TICK_BOUNDARY) {
            let _ = leds.heartbeat.toggle();
            delay.delay_ms(BOUNDARY_HOLDOFF_MS);
        }

        while let Ok(byte) = rx.read() {
            self.dispatch(byte, leds, uart, delay);
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}
