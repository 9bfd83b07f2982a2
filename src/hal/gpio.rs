//! PORTA output pins for the board LEDs.

use core::convert::Infallible;

use avr_device::atmega128a::PORTA;
use embedded_hal::digital::v2::{OutputPin, ToggleableOutputPin};

/// One PORTA pin configured as an output, starting low.
pub struct Led<const P: u8> {
    _private: (),
}

impl<const P: u8> Led<P> {
    pub fn new() -> Self {
        unsafe {
            let port = &*PORTA::ptr();
            port.porta.modify(|r, w| w.bits(r.bits() & !(1 << P)));
            port.ddra.modify(|r, w| w.bits(r.bits() | (1 << P)));
        }
        Self { _private: () }
    }
}

impl<const P: u8> Default for Led<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const P: u8> OutputPin for Led<P> {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        unsafe {
            (*PORTA::ptr()).porta.modify(|r, w| w.bits(r.bits() & !(1 << P)));
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        unsafe {
            (*PORTA::ptr()).porta.modify(|r, w| w.bits(r.bits() | (1 << P)));
        }
        Ok(())
    }
}

impl<const P: u8> ToggleableOutputPin for Led<P> {
    type Error = Infallible;

    fn toggle(&mut self) -> Result<(), Infallible> {
        unsafe {
            (*PORTA::ptr()).porta.modify(|r, w| w.bits(r.bits() ^ (1 << P)));
        }
        Ok(())
    }
}

// Board LED assignment
pub type Heartbeat = Led<0>;
pub type CmdLed1 = Led<1>;
pub type CmdLed2 = Led<2>;
pub type CmdLed3 = Led<3>;
