//! Blocking delay service tests against the simulated timer

use embedded_hal::blocking::delay::DelayMs;

use tickloop::config::DELAY_RELOAD_1MS;
use tickloop::hal::sim::SimTimer;
use tickloop::hal::timer::{Delay, Timer, TimerMode};

#[test]
fn zero_duration_touches_nothing() {
    let timer = SimTimer::new();
    let mut delay = Delay::new(&timer);

    delay.delay_ms(0);

    assert_eq!(timer.reload_writes(), 0);
    assert_eq!(timer.starts(), 0);
}

#[test]
fn one_reload_and_start_per_millisecond() {
    let timer = SimTimer::new();
    let mut delay = Delay::new(&timer);

    delay.delay_ms(5);

    assert_eq!(timer.reload_writes(), 5);
    assert_eq!(timer.starts(), 5);
    assert_eq!(timer.reload(), DELAY_RELOAD_1MS);
    assert_eq!(timer.mode(), TimerMode::OneShot);
}

#[test]
fn timer_left_stopped_with_flag_cleared() {
    let timer = SimTimer::new();
    let mut delay = Delay::new(&timer);

    delay.delay_ms(3);

    assert!(!timer.is_running());
    assert!(!timer.overflow_raised());
}

#[test]
fn embedded_hal_delay_trait_is_the_same_path() {
    let timer = SimTimer::new();
    let mut delay = Delay::new(&timer);

    DelayMs::<u8>::delay_ms(&mut delay, 2);
    DelayMs::<u16>::delay_ms(&mut delay, 2);

    assert_eq!(timer.reload_writes(), 4);
}

#[test]
fn timer_abstraction_drives_the_backend() {
    let regs = SimTimer::new();
    let mut timer = Timer::new(&regs);

    timer.configure(TimerMode::AutoReload, 0xCAFE);
    assert_eq!(regs.mode(), TimerMode::AutoReload);
    assert_eq!(regs.reload(), 0xCAFE);

    timer.start();
    assert!(regs.is_running());
    timer.stop();
    assert!(!regs.is_running());

    regs.set_auto_overflow(false);
    assert!(!timer.overflow_occurred());
    regs.raise_overflow();
    assert!(timer.overflow_occurred());
    timer.clear_overflow();
    assert!(!timer.overflow_occurred());
}
