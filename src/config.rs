use core::fmt::{self, Display, Formatter};

use ufmt_macros::uDebug;

use crate::MicroSeconds;

/// Static configuration of a stepper driver.
///
/// This is fixed when the driver is constructed.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Config {
    /// Number of half-steps in one full revolution of the output shaft.
    pub steps_per_revolution: u32,
    /// Minimum time between two consecutive steps.
    pub step_interval: MicroSeconds,
}
impl Config {
    /// Half-steps per revolution of a geared 28BYJ-48.
    pub const STEPS_PER_REVOLUTION_28BYJ48: u32 = 4096;

    /// A step interval the 28BYJ-48 follows reliably when driven by a
    /// ULN2003 board from 5V.
    pub const STEP_INTERVAL_28BYJ48: MicroSeconds = MicroSeconds::new(900);

    /// Creates a new configuration.
    ///
    /// The configuration is not checked until [Config::validate] is called
    /// (which every driver constructor does).
    pub fn new(steps_per_revolution: u32, step_interval: MicroSeconds) -> Self {
        Self {
            steps_per_revolution,
            step_interval,
        }
    }

    /// Checks that the configuration can drive a motor.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: if the configuration is usable.
    /// - `Err(Error::InvalidConfiguration(reason))`: otherwise.
    pub fn validate(&self) -> Result<(), Error> {
        use Reason::*;
        if self.steps_per_revolution == 0 {
            return Err(Error::InvalidConfiguration(ZeroStepsPerRevolution));
        }
        if self.steps_per_revolution > i32::MAX as u32 {
            return Err(Error::InvalidConfiguration(TooManyStepsPerRevolution));
        }
        if self.step_interval.get_value() == 0 {
            return Err(Error::InvalidConfiguration(ZeroStepInterval));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            Self::STEPS_PER_REVOLUTION_28BYJ48,
            Self::STEP_INTERVAL_28BYJ48,
        )
    }
}

/// Errors that might occur when constructing a driver.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum Error {
    /// The supplied [Config] cannot drive a motor.
    InvalidConfiguration(Reason),
}

/// Why a [Config] was rejected.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum Reason {
    /// A revolution must contain at least one step.
    ZeroStepsPerRevolution,
    /// Signed step deltas across a revolution must fit in an `i32`.
    TooManyStepsPerRevolution,
    /// A zero interval would step on every poll.
    ZeroStepInterval,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(reason) => {
                write!(f, "invalid configuration: {}", reason)
            }
        }
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Reason::*;
        let text = match self {
            ZeroStepsPerRevolution => "steps per revolution must be non-zero",
            TooManyStepsPerRevolution => {
                "steps per revolution must not exceed i32::MAX"
            }
            ZeroStepInterval => "step interval must be non-zero",
        };
        f.write_str(text)
    }
}
