//! ATmega128 register bindings and interrupt trampolines.
//!
//! TC1 runs the periodic tick in CTC mode (hardware auto-reload), TC3
//! runs the one-shot delay in normal mode, USART0 carries the serial
//! line. The interrupt handlers here are thin trampolines into the
//! chip-independent core.

use avr_device::atmega128a::{TC1, TC3, USART0};

use crate::application::Leds;
use crate::config::{BAUD_DIVISOR, TICK_RELOAD};
use crate::hal::gpio::{CmdLed1, CmdLed2, CmdLed3, Heartbeat, Led};
use crate::hal::timer::{Delay, Timer, TimerMode, TimerRegisters};
use crate::hal::uart::{self, SerialRegisters, Uart};
use crate::ticker::SYSTEM_TICKS;

// Clock select bits for /64 on both 16-bit timers
const CS_DIV64: u8 = 0x03;
const CS_MASK: u8 = 0x07;
// WGM12 selects CTC-on-OCR1A
const WGM12: u8 = 1 << 3;
// OCIE1A / OCF1A position in TIMSK / TIFR
const OC1A_BIT: u8 = 1 << 4;
// TOV1 / TOV3 positions in TIFR / ETIFR
const TOV1_BIT: u8 = 1 << 2;
const TOV3_BIT: u8 = 1 << 2;
// RXCIE | RXEN | TXEN
const UCSRB_INIT: u8 = 0x98;
// TXC position in UCSR0A
const TXC_BIT: u8 = 1 << 6;

/// TC1, the periodic tick timer.
pub struct TickTimerRegs;

impl TimerRegisters for TickTimerRegs {
    fn write_mode(&self, mode: TimerMode) {
        unsafe {
            let tc1 = &*TC1::ptr();
            match mode {
                TimerMode::AutoReload => tc1.tccr1b.modify(|r, w| w.bits(r.bits() | WGM12)),
                TimerMode::OneShot => tc1.tccr1b.modify(|r, w| w.bits(r.bits() & !WGM12)),
            }
        }
    }

    fn write_reload(&self, value: u16) {
        unsafe {
            let tc1 = &*TC1::ptr();
            if tc1.tccr1b.read().bits() & WGM12 != 0 {
                // CTC period is the tick count the reload value encodes
                tc1.ocr1a.write(|w| w.bits(0u16.wrapping_sub(value)));
            } else {
                tc1.tcnt1.write(|w| w.bits(value));
            }
        }
    }

    fn set_run(&self, running: bool) {
        unsafe {
            let tc1 = &*TC1::ptr();
            if running {
                tc1.tccr1b
                    .modify(|r, w| w.bits((r.bits() & !CS_MASK) | CS_DIV64));
            } else {
                tc1.tccr1b.modify(|r, w| w.bits(r.bits() & !CS_MASK));
            }
        }
    }

    fn overflow_flag(&self) -> bool {
        unsafe {
            let tc1 = &*TC1::ptr();
            let flag = if tc1.tccr1b.read().bits() & WGM12 != 0 {
                OC1A_BIT
            } else {
                TOV1_BIT
            };
            tc1.tifr.read().bits() & flag != 0
        }
    }

    fn clear_overflow_flag(&self) {
        unsafe {
            let tc1 = &*TC1::ptr();
            let flag = if tc1.tccr1b.read().bits() & WGM12 != 0 {
                OC1A_BIT
            } else {
                TOV1_BIT
            };
            // write-one-to-clear
            tc1.tifr.write(|w| w.bits(flag));
        }
    }
}

/// TC3, the one-shot delay timer.
pub struct DelayTimerRegs;

impl TimerRegisters for DelayTimerRegs {
    fn write_mode(&self, _mode: TimerMode) {
        // TC3 stays in normal mode; one-shot semantics come from the
        // delay service reloading TCNT3 on every run
        unsafe {
            let tc3 = &*TC3::ptr();
            tc3.tccr3a.write(|w| w.bits(0));
            tc3.tccr3b.modify(|r, w| w.bits(r.bits() & !WGM12));
        }
    }

    fn write_reload(&self, value: u16) {
        unsafe {
            (*TC3::ptr()).tcnt3.write(|w| w.bits(value));
        }
    }

    fn set_run(&self, running: bool) {
        unsafe {
            let tc3 = &*TC3::ptr();
            if running {
                tc3.tccr3b
                    .modify(|r, w| w.bits((r.bits() & !CS_MASK) | CS_DIV64));
            } else {
                tc3.tccr3b.modify(|r, w| w.bits(r.bits() & !CS_MASK));
            }
        }
    }

    fn overflow_flag(&self) -> bool {
        unsafe { (*TC3::ptr()).etifr.read().bits() & TOV3_BIT != 0 }
    }

    fn clear_overflow_flag(&self) {
        unsafe {
            (*TC3::ptr()).etifr.write(|w| w.bits(TOV3_BIT));
        }
    }
}

/// USART0 at 8N1.
pub struct Usart0Regs;

impl SerialRegisters for Usart0Regs {
    fn configure(&self, divisor: u16) {
        unsafe {
            let usart = &*USART0::ptr();
            usart.ubrr0h.write(|w| w.bits((divisor >> 8) as u8));
            usart.ubrr0l.write(|w| w.bits(divisor as u8));
            usart.ucsr0b.write(|w| w.bits(UCSRB_INIT));
        }
    }

    fn write_data(&self, byte: u8) {
        unsafe {
            (*USART0::ptr()).udr0.write(|w| w.bits(byte));
        }
    }

    fn read_data(&self) -> u8 {
        unsafe { (*USART0::ptr()).udr0.read().bits() }
    }

    fn tx_complete(&self) -> bool {
        unsafe { (*USART0::ptr()).ucsr0a.read().bits() & TXC_BIT != 0 }
    }

    fn clear_tx_complete(&self) {
        unsafe {
            // write-one-to-clear
            (*USART0::ptr())
                .ucsr0a
                .modify(|r, w| w.bits(r.bits() | TXC_BIT));
        }
    }

    fn clear_rx_flag(&self) {
        // RXC clears itself when UDR0 is read
    }
}

/// One-time peripheral bring-up. Global interrupts stay disabled until
/// the caller enables them.
pub fn init() -> (
    Delay<DelayTimerRegs>,
    Uart<Usart0Regs>,
    Leds<Heartbeat, CmdLed1, CmdLed2, CmdLed3>,
) {
    let mut tick = Timer::new(TickTimerRegs);
    tick.configure(TimerMode::AutoReload, TICK_RELOAD);
    unsafe {
        (*TC1::ptr()).timsk.modify(|r, w| w.bits(r.bits() | OC1A_BIT));
    }
    tick.start();

    let delay = Delay::new(DelayTimerRegs);
    let uart = Uart::new(Usart0Regs, BAUD_DIVISOR);
    let leds = Leds {
        heartbeat: Led::new(),
        cmd1: Led::new(),
        cmd2: Led::new(),
        cmd3: Led::new(),
    };

    (delay, uart, leds)
}

#[avr_device::interrupt(atmega128a)]
fn TIMER1_COMPA() {
    SYSTEM_TICKS.increment_and_wrap();
    TickTimerRegs.clear_overflow_flag();
}

#[avr_device::interrupt(atmega128a)]
fn USART0_RX() {
    uart::on_receive(&Usart0Regs);
}
