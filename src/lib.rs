//! Non-blocking half-step driver for 4-wire unipolar stepper motors, such as
//! the 28BYJ-48 on a ULN2003 board.
//!
//! A [StepperDriver] is told where to go with [StepperDriver::move_by] or
//! [StepperDriver::move_to], then polled from the host's main loop. Each
//! poll takes at most one step and never waits.
#![cfg_attr(not(test), no_std)]

mod clock;
pub mod command;
mod config;
mod direction;
pub mod line;
mod microseconds;
mod millidegrees;
mod motor;
mod steps;

pub use clock::Clock;
pub use config::Config;
pub use config::Error;
pub use config::Reason;
pub use direction::Direction;
pub use microseconds::MicroSeconds;
pub use millidegrees::MilliDegrees;
pub use motor::HalfStepMotor;
pub use motor::Phase;
pub use motor::Revolution;
pub use motor::Stepper;
pub use motor::StepperDriver;
pub use motor::PHASE_COUNT;
pub use steps::Steps;

#[cfg(test)]
pub use motor::TestStepper;
