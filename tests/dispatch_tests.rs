//! Foreground dispatch loop tests

use embedded_hal_mock::delay::MockNoop;
use embedded_hal_mock::serial::{Mock as SerialMock, Transaction};

use tickloop::application::{tick_due, Application, Leds};
use tickloop::config::{GREETING, TICK_BOUNDARY, TICK_WRAP};
use tickloop::hal::sim::{SimPin, SimSerial};
use tickloop::hal::uart::Uart;

struct Bench {
    heartbeat: SimPin,
    cmd1: SimPin,
    cmd2: SimPin,
    cmd3: SimPin,
    serial: SimSerial,
}

impl Bench {
    fn new() -> Self {
        Self {
            heartbeat: SimPin::new(),
            cmd1: SimPin::new(),
            cmd2: SimPin::new(),
            cmd3: SimPin::new(),
            serial: SimSerial::new(),
        }
    }

    fn leds(&self) -> Leds<&SimPin, &SimPin, &SimPin, &SimPin> {
        Leds {
            heartbeat: &self.heartbeat,
            cmd1: &self.cmd1,
            cmd2: &self.cmd2,
            cmd3: &self.cmd3,
        }
    }
}

#[test]
fn tick_due_fires_on_every_boundary_multiple() {
    for ticks in 0..TICK_WRAP {
        assert_eq!(tick_due(ticks, TICK_BOUNDARY), ticks % TICK_BOUNDARY == 0);
    }
}

#[test]
fn each_command_toggles_its_own_led() {
    let bench = Bench::new();
    let mut leds = bench.leds();
    let mut uart = Uart::new(&bench.serial, 0);
    let mut delay = MockNoop::new();
    let mut app = Application::new();

    app.dispatch(b'1', &mut leds, &mut uart, &mut delay);
    app.dispatch(b'2', &mut leds, &mut uart, &mut delay);
    app.dispatch(b'3', &mut leds, &mut uart, &mut delay);

    assert_eq!(bench.cmd1.toggles(), 1);
    assert_eq!(bench.cmd2.toggles(), 1);
    assert_eq!(bench.cmd3.toggles(), 1);
    assert_eq!(bench.heartbeat.toggles(), 0);
}

#[test]
fn toggle_parity_matches_dispatch_count() {
    let bench = Bench::new();
    let mut leds = bench.leds();
    let mut uart = Uart::new(&bench.serial, 0);
    let mut delay = MockNoop::new();
    let mut app = Application::new();

    for n in 1..=7u32 {
        app.dispatch(b'2', &mut leds, &mut uart, &mut delay);
        assert_eq!(bench.cmd2.toggles(), n);
        assert_eq!(bench.cmd2.is_high(), n % 2 == 1);
    }
}

#[test]
fn replay_command_sends_greeting_and_nothing_more() {
    let bench = Bench::new();
    let mut leds = bench.leds();
    let mut uart = Uart::new(&bench.serial, 0);
    let mut delay = MockNoop::new();
    let mut app = Application::new();

    app.dispatch(b'4', &mut leds, &mut uart, &mut delay);

    let mut expected = GREETING.as_bytes().to_vec();
    expected.extend_from_slice(b"\r\n");
    assert_eq!(&*bench.serial.transmitted(), expected.as_slice());
    assert_eq!(bench.cmd1.toggles() + bench.cmd2.toggles() + bench.cmd3.toggles(), 0);
}

#[test]
fn unrecognized_byte_is_a_no_op() {
    let bench = Bench::new();
    let mut leds = bench.leds();
    let mut uart = Uart::new(&bench.serial, 0);
    let mut delay = MockNoop::new();
    let mut app = Application::new();

    app.dispatch(b'?', &mut leds, &mut uart, &mut delay);

    assert!(bench.serial.transmitted().is_empty());
    assert_eq!(bench.heartbeat.toggles(), 0);
    assert_eq!(bench.cmd1.toggles(), 0);
}

#[test]
fn poll_toggles_heartbeat_only_on_boundary() {
    let bench = Bench::new();
    let mut leds = bench.leds();
    let mut uart = Uart::new(&bench.serial, 0);
    let mut delay = MockNoop::new();
    let mut app = Application::new();

    let mut rx = SerialMock::new(&[
        Transaction::read_error(nb::Error::WouldBlock),
        Transaction::read_error(nb::Error::WouldBlock),
    ]);

    app.poll(TICK_BOUNDARY, &mut leds, &mut uart, &mut rx, &mut delay);
    assert_eq!(bench.heartbeat.toggles(), 1);

    app.poll(TICK_BOUNDARY + 1, &mut leds, &mut uart, &mut rx, &mut delay);
    assert_eq!(bench.heartbeat.toggles(), 1);

    rx.done();
}

#[test]
fn poll_drains_a_burst_in_arrival_order() {
    let bench = Bench::new();
    let mut leds = bench.leds();
    let mut uart = Uart::new(&bench.serial, 0);
    let mut delay = MockNoop::new();
    let mut app = Application::new();

    let mut rx = SerialMock::new(&[
        Transaction::read(b'1'),
        Transaction::read(b'4'),
        Transaction::read(b'1'),
        Transaction::read_error(nb::Error::WouldBlock),
    ]);

    app.poll(1, &mut leds, &mut uart, &mut rx, &mut delay);

    // both toggles landed and the replay happened in between
    assert_eq!(bench.cmd1.toggles(), 2);
    assert!(!bench.cmd1.is_high());
    let mut expected = GREETING.as_bytes().to_vec();
    expected.extend_from_slice(b"\r\n");
    assert_eq!(&*bench.serial.transmitted(), expected.as_slice());

    rx.done();
}

#[test]
fn custom_greeting_is_replayed_verbatim() {
    let bench = Bench::new();
    let mut leds = bench.leds();
    let mut uart = Uart::new(&bench.serial, 0);
    let mut delay = MockNoop::new();
    let mut app = Application::with_greeting("ping");

    app.dispatch(b'4', &mut leds, &mut uart, &mut delay);

    assert_eq!(&*bench.serial.transmitted(), b"ping\r\n");
}
