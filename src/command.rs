//! Line-oriented serial commands.
//!
//! One command per line, in a small G-code flavoured language:
//!
//! | line            | command                                       |
//! |-----------------|-----------------------------------------------|
//! | `G90`           | absolute positioning                          |
//! | `G91`           | relative positioning                          |
//! | `G0 S<steps>`   | move by / to a number of steps                |
//! | `G0 A<degrees>` | move by / to an angle, up to 3 decimal places |
//! | `M0`            | stop immediately                              |
//! | `M114`          | report the position                           |

use core::fmt::{self, Display, Formatter};

use ufmt_macros::uDebug;
use winnow::{
    ascii::{digit1, space1},
    combinator::{alt, opt, preceded},
    token::literal,
    Parser, Result,
};

use crate::Clock;
use crate::MilliDegrees;
use crate::Stepper;
use crate::StepperDriver;
use crate::Steps;

#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum Command {
    AbsolutePositioning,
    RelativePositioning,
    Move(Target),
    Stop,
    ReportPosition,
}
impl Command {
    /// Parses one line.
    ///
    /// Leading and trailing whitespace (including a `\r`) is ignored. The
    /// rest of the line must be exactly one command.
    pub fn parse(line: &str) -> core::result::Result<Command, Error> {
        alt((
            Self::parse_absolute_positioning,
            Self::parse_relative_positioning,
            Self::parse_move,
            Self::parse_stop,
            Self::parse_report_position,
        ))
        .parse(line.trim())
        .map_err(|_| Error::InvalidCommand)
    }

    fn parse_absolute_positioning(input: &mut &str) -> Result<Command> {
        literal("G90")
            .value(Command::AbsolutePositioning)
            .parse_next(input)
    }

    fn parse_relative_positioning(input: &mut &str) -> Result<Command> {
        literal("G91")
            .value(Command::RelativePositioning)
            .parse_next(input)
    }

    fn parse_move(input: &mut &str) -> Result<Command> {
        preceded(
            (literal("G0"), space1),
            alt((
                preceded(literal("S"), parse_steps).map(Target::Steps),
                preceded(literal("A"), parse_decimal_millis)
                    .map(|v| Target::Angle(MilliDegrees::new(v))),
            )),
        )
        .map(Command::Move)
        .parse_next(input)
    }

    fn parse_stop(input: &mut &str) -> Result<Command> {
        literal("M0").value(Command::Stop).parse_next(input)
    }

    fn parse_report_position(input: &mut &str) -> Result<Command> {
        literal("M114")
            .value(Command::ReportPosition)
            .parse_next(input)
    }
}

/// How the target of a move is interpreted.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum MoveMode {
    /// Targets are positions within a revolution.
    Absolute,
    /// Targets are offsets from the current position.
    Relative,
}

/// Target of a move command.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum Target {
    /// A number of steps.
    Steps(i32),
    /// An angle.
    Angle(MilliDegrees),
}
impl Target {
    /// Starts moving `driver` to this target.
    ///
    /// In [MoveMode::Absolute] the target is wrapped into one revolution and
    /// approached along the shorter arc. In [MoveMode::Relative] it is a
    /// signed offset, and may span several revolutions.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: if the move was started.
    /// - `Err(Error::Overflow)`: if a relative angle is too large to express
    ///   in steps. The driver is left untouched.
    pub fn start<S: Stepper, K: Clock>(
        &self,
        driver: &mut StepperDriver<S, K>,
        mode: MoveMode,
    ) -> core::result::Result<(), Error> {
        match (mode, *self) {
            (MoveMode::Absolute, Target::Steps(steps)) => {
                let n = driver.steps_per_revolution() as i64;
                // In [0, n), and n fits in a u32.
                let position = (steps as i64).rem_euclid(n) as u32;
                driver.move_to(position);
            }
            (MoveMode::Absolute, Target::Angle(angle)) => {
                driver.move_to_angle(angle);
            }
            (MoveMode::Relative, Target::Steps(steps)) => {
                driver.move_by(Steps::new(steps));
            }
            (MoveMode::Relative, Target::Angle(angle)) => {
                let steps =
                    driver.revolution().to_steps(angle).ok_or(Error::Overflow)?;
                driver.move_by(steps);
            }
        }
        Ok(())
    }
}

/// Possible errors from commands.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum Error {
    /// The line is not a command.
    InvalidCommand,
    /// The move does not fit in a step count.
    Overflow,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCommand => f.write_str("invalid command"),
            Error::Overflow => f.write_str("move too large"),
        }
    }
}

/// Parse a signed whole number of steps.
fn parse_steps(input: &mut &str) -> Result<i32> {
    (opt(alt((literal("+"), literal("-")))), digit1)
        .take()
        .try_map(str::parse::<i32>)
        .parse_next(input)
}

/// Parse a signed decimal value with thousandths precision.
///
/// eg.
///   - 3      -> 3000
///   - 3.14   -> 3140
///   - -3.142 -> -3142
///   - 3.1428 -> 3142
fn parse_decimal_millis(input: &mut &str) -> Result<i32> {
    (
        opt(alt((literal("-").value(-1i64), literal("+").value(1i64)))),
        digit1.try_map(str::parse::<i64>),
        opt(preceded(literal("."), digit1)),
    )
        .verify_map(|(sign, whole, fraction)| {
            let millis = whole
                .checked_mul(1000)?
                .checked_add(fraction.map_or(0, thousandths))?;
            i32::try_from(sign.unwrap_or(1) * millis).ok()
        })
        .parse_next(input)
}

/// Converts the digits after a decimal point to thousandths.
///
/// Digits past the third are dropped.
fn thousandths(digits: &str) -> i64 {
    digits
        .bytes()
        .chain(core::iter::repeat(b'0'))
        .take(3)
        .fold(0, |acc, d| acc * 10 + i64::from(d - b'0'))
}
