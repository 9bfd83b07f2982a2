#![no_std]
#![no_main]

use panic_halt as _;

use tickloop::application::Application;
use tickloop::hal::avr;
use tickloop::hal::uart::Receiver;
use tickloop::ticker::SYSTEM_TICKS;

#[avr_device::entry]
fn main() -> ! {
    let (mut delay, mut uart, mut leds) = avr::init();
    let mut rx = Receiver::new();
    let mut app = Application::new();

    unsafe { avr_device::interrupt::enable() };

    let _ = ufmt::uwrite!(uart, "tickloop {}\r\n", env!("CARGO_PKG_VERSION"));
    uart.send_str("Start:");

    loop {
        app.poll(SYSTEM_TICKS.read(), &mut leds, &mut uart, &mut rx, &mut delay);
    }
}
