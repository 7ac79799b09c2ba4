use core::fmt::{self, Display, Formatter};

use arduino_hal::{
    default_serial, pins, prelude::*, Peripherals, Pins,
};
use ufmt::{uWrite, uwriteln};
use unistep::{
    command::{self, Command, MoveMode},
    line::LineBuffer,
    Config, StepperDriver,
};

use crate::{
    clock::Tc1Clock,
    uno::{UnoDriver, UnoSerial},
};

/// Write an error message, expanding its arguments.
macro_rules! error {
    ($serial:expr, $($arg:tt)*) => {
        report($serial, format_args!("ERROR: {}", format_args!($($arg)*)))
    };
}

/// Write an info message, expanding its arguments.
macro_rules! info {
    ($serial:expr, $($arg:tt)*) => {
        report($serial, format_args!("INFO: {}", format_args!($($arg)*)))
    };
}

/// Longest line received from the serial port.
const LINE_CAPACITY: usize = 80;

/// Longest message sent to the serial port. The longest message echoes a
/// full received line inside an error.
const MESSAGE_CAPACITY: usize = LINE_CAPACITY + 48;

/// Runs the motor from commands on the serial port.
///
/// Nothing here blocks: each call to [Controller::poll] gives the motor a
/// chance to step, then handles at most one received byte.
pub struct Controller {
    serial: UnoSerial,
    line: LineBuffer<LINE_CAPACITY>,
    driver: UnoDriver,
    move_mode: MoveMode,
    moving: bool,
}
impl Controller {
    const BAUD_RATE: u32 = 57600;

    pub fn new(dp: Peripherals) -> Self {
        let pins: Pins = pins!(dp);
        let mut serial = default_serial!(dp, pins, Self::BAUD_RATE);
        uwriteln!(&mut serial, "UNISTEP").unwrap_infallible();

        let clock = Tc1Clock::new(dp.TC1);
        let driver = match StepperDriver::from_pins(
            pins.d8.into_output(),
            pins.d9.into_output(),
            pins.d10.into_output(),
            pins.d11.into_output(),
            clock,
            Config::default(),
        ) {
            Ok(driver) => driver,
            Err(e) => halt(&mut serial, e),
        };

        Self {
            serial,
            line: LineBuffer::new(),
            driver,
            move_mode: MoveMode::Absolute,
            moving: false,
        }
    }

    /// Steps the motor if a step is due, then reads from the serial port.
    pub fn poll(&mut self) {
        if self.driver.poll() && self.moving {
            self.moving = false;
            self.report_position("Target reached.");
        }

        match self.serial.read() {
            Ok(byte) => self.receive(byte),
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(never)) => match never {},
        }
    }

    /// Handles one byte from the serial port.
    fn receive(&mut self, byte: u8) {
        let command = match self.line.push(byte) {
            Ok(None) => return,
            Ok(Some(text)) => match Command::parse(text) {
                Ok(command) => command,
                Err(e) => {
                    error!(&mut self.serial, "{}: \"{}\"", e, text);
                    return;
                }
            },
            Err(e) => {
                error!(&mut self.serial, "{}", e);
                return;
            }
        };

        match self.execute(command) {
            Ok(()) => writeln(&mut self.serial, "Ok."),
            Err(e) => error!(&mut self.serial, "{}", e),
        }
    }

    fn execute(&mut self, command: Command) -> Result<(), command::Error> {
        match command {
            Command::AbsolutePositioning => {
                self.move_mode = MoveMode::Absolute;
                info!(&mut self.serial, "Set absolute positioning mode.");
            }
            Command::RelativePositioning => {
                self.move_mode = MoveMode::Relative;
                info!(&mut self.serial, "Set relative positioning mode.");
            }
            Command::Move(target) => {
                target.start(&mut self.driver, self.move_mode)?;
                self.moving = !self.driver.is_idle();
                self.report_position("Starting move.");
            }
            Command::Stop => {
                self.driver.stop();
                self.moving = false;
                self.report_position("Stopped.");
            }
            Command::ReportPosition => self.report_position("Position."),
        }
        Ok(())
    }

    fn report_position(&mut self, event: &str) {
        uwriteln!(
            &mut self.serial,
            "INFO: {} At step {} ({} deg), {} to go.",
            event,
            self.driver.current_position(),
            self.driver.current_angle(),
            self.driver.steps_remaining().get_value()
        )
        .unwrap_infallible();
    }
}

/// Report a fatal error and stop.
fn halt(serial: &mut UnoSerial, error: unistep::Error) -> ! {
    error!(serial, "{}", Fatal(error));
    loop {}
}

/// Write a formatted message line to the UART.
///
/// A message longer than [MESSAGE_CAPACITY] is cut short and ends in `...`.
fn report(serial: &mut UnoSerial, args: fmt::Arguments) {
    let mut out: heapless::String<MESSAGE_CAPACITY> = heapless::String::new();
    let truncated = fmt::Write::write_fmt(&mut out, args).is_err();
    serial.write_str(out.as_str()).unwrap_infallible();
    if truncated {
        serial.write_str("...").unwrap_infallible();
    }
    serial.write_char('\n').unwrap_infallible();
}

/// Write a line to the UART.
fn writeln(serial: &mut UnoSerial, s: &str) {
    serial.write_str(s).unwrap_infallible();
    serial.write_char('\n').unwrap_infallible();
}

struct Fatal(unistep::Error);
impl Display for Fatal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Cannot start the motor: {}.", self.0)
    }
}
