use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use log::{debug, trace};

use super::half_step::HalfStepMotor;
use super::revolution::Revolution;
use crate::config::{Config, Error};
use crate::Clock;
use crate::Direction;
use crate::MicroSeconds;
use crate::MilliDegrees;
use crate::Stepper;
use crate::Steps;

/// Non-blocking stepper driver.
///
/// The driver never waits. A move only sets how far there is to go; the
/// motor advances one step per call to [StepperDriver::poll], at most once
/// every step interval. The host calls `poll` from its main loop as often as
/// it can.
///
/// The absolute position is tracked modulo one revolution. Steps that are
/// due while nobody polls are not made up for later: a late poll takes a
/// single step, so the motor just turns more slowly.
///
/// # Type Parameters
///
/// - `S`: the [Stepper] being driven.
/// - `K`: the [Clock] used to time steps.
pub struct StepperDriver<S, K> {
    stepper: S,
    clock: K,
    revolution: Revolution,
    step_interval: MicroSeconds,
    /// Absolute position in `[0, steps_per_revolution)`.
    position: u32,
    /// Sign is the direction, magnitude is the steps left.
    remaining: Steps,
    last_step: MicroSeconds,
}

impl<A, B, C, D, K> StepperDriver<HalfStepMotor<A, B, C, D>, K>
where
    A: OutputPin<Error = Infallible>,
    B: OutputPin<Error = Infallible>,
    C: OutputPin<Error = Infallible>,
    D: OutputPin<Error = Infallible>,
    K: Clock,
{
    /// Creates a driver for a half-stepped motor on four output lines.
    ///
    /// # Parameters
    ///
    /// - `line_a` .. `line_d`: Output lines to the `IN1`..`IN4` inputs of
    ///   the driver board.
    /// - `clock`: Clock used to time steps.
    /// - `config`: Steps per revolution and step interval.
    pub fn from_pins(
        line_a: A,
        line_b: B,
        line_c: C,
        line_d: D,
        clock: K,
        config: Config,
    ) -> Result<Self, Error> {
        // Creating the motor drives the lines, so reject a bad config first.
        config.validate()?;
        let motor = HalfStepMotor::new(line_a, line_b, line_c, line_d);
        Self::new(motor, clock, config)
    }
}

impl<S: Stepper, K: Clock> StepperDriver<S, K> {
    /// Creates a new driver.
    ///
    /// The driver starts idle, at position zero. The stepper is not touched,
    /// so its windings stay however the stepper left them (a
    /// [HalfStepMotor] starts de-energized).
    ///
    /// # Parameters
    ///
    /// - `stepper`: The underlying stepper to drive.
    /// - `clock`: Clock used to time steps.
    /// - `config`: Steps per revolution and step interval.
    ///
    /// # Returns
    ///
    /// - `Ok(driver)`: if the configuration is valid.
    /// - `Err(Error::InvalidConfiguration(_))`: otherwise.
    pub fn new(stepper: S, clock: K, config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            stepper,
            clock,
            revolution: Revolution::new(config.steps_per_revolution),
            step_interval: config.step_interval,
            position: 0,
            remaining: Steps::zero(),
            last_step: MicroSeconds::new(0),
        })
    }

    /// Sets up a relative move.
    ///
    /// The windings are energized at the current phase straight away, so the
    /// first step is not lost to a de-energized rotor. Motion itself happens
    /// in [StepperDriver::poll]. Any move in progress is replaced.
    ///
    /// # Parameters
    ///
    /// - `delta`: Steps to move; positive is forward, negative is reverse.
    pub fn move_by(&mut self, delta: Steps) {
        debug!("move by {} steps", delta.get_value());
        self.start(delta);
    }

    /// Sets up a move to an absolute position, along the shorter arc.
    ///
    /// When both arcs are exactly half a revolution, the move is forward.
    /// The windings are energized as in [StepperDriver::move_by].
    ///
    /// # Parameters
    ///
    /// - `target`: Target position in `[0, steps_per_revolution)`. Larger
    ///   values are wrapped into range.
    pub fn move_to(&mut self, target: u32) {
        let delta = self.revolution.shortest_delta(self.position, target);
        debug!(
            "move to {} from {}: {} steps",
            target,
            self.position,
            delta.get_value()
        );
        self.start(delta);
    }

    /// Sets up a move to an absolute position, travelling only in the
    /// supplied direction.
    ///
    /// If the motor is already at `target` nothing is left to do, but the
    /// windings are still energized.
    pub fn move_to_direction(&mut self, target: u32, direction: Direction) {
        let delta = self
            .revolution
            .directed_delta(self.position, target, direction);
        debug!(
            "move to {} from {} ({:?}): {} steps",
            target,
            self.position,
            direction,
            delta.get_value()
        );
        self.start(delta);
    }

    /// Sets up a move to an absolute angle, along the shorter arc.
    ///
    /// The angle is rounded down to a whole step.
    pub fn move_to_angle(&mut self, angle: MilliDegrees) {
        self.move_to(self.revolution.to_position(angle));
    }

    /// Polls the motor, taking a step if one is due.
    ///
    /// This never blocks. When there is nothing to do it returns without
    /// reading the clock or touching the lines.
    ///
    /// # Returns
    ///
    /// - `true`: if the motor is at its target. This is the case both when
    ///   the motor was already idle and when this call took the last step.
    ///   The windings are de-energized.
    /// - `false`: if steps remain.
    pub fn poll(&mut self) -> bool {
        let Some(direction) = self.remaining.direction() else {
            return true;
        };

        let now = self.clock.now();
        if now.elapsed_since(self.last_step) < self.step_interval {
            return false;
        }

        self.stepper.step(direction);
        self.position = self.revolution.advance(self.position, direction);
        self.remaining = self.remaining.toward_zero();
        self.last_step = now;

        if self.remaining.is_zero() {
            self.stepper.power_down();
            trace!("target reached at {}", self.position);
            true
        } else {
            false
        }
    }

    /// Stops immediately and de-energizes the windings.
    ///
    /// No further step is taken, and there is no deceleration.
    pub fn stop(&mut self) {
        if !self.remaining.is_zero() {
            debug!(
                "stopped at {} with {} steps left",
                self.position,
                self.remaining.get_value()
            );
        }
        self.remaining = Steps::zero();
        self.stepper.power_down();
    }

    /// Returns the absolute position in `[0, steps_per_revolution)`.
    pub fn current_position(&self) -> u32 {
        self.position
    }

    /// Returns the absolute position as an angle.
    pub fn current_angle(&self) -> MilliDegrees {
        self.revolution.to_millidegrees(self.position)
    }

    /// Returns the steps left to go. Positive is forward; zero means idle.
    pub fn steps_remaining(&self) -> Steps {
        self.remaining
    }

    /// Returns `true` if there are no steps left to go.
    pub fn is_idle(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Returns the number of steps in a revolution.
    pub fn steps_per_revolution(&self) -> u32 {
        self.revolution.steps_per_revolution()
    }

    /// Returns the revolution arithmetic this driver uses.
    pub fn revolution(&self) -> &Revolution {
        &self.revolution
    }

    /// Returns the minimum time between steps.
    pub fn step_interval(&self) -> MicroSeconds {
        self.step_interval
    }

    /// Returns the stepper being driven.
    pub fn stepper(&self) -> &S {
        &self.stepper
    }

    /// Releases the stepper and the clock.
    pub fn release(self) -> (S, K) {
        (self.stepper, self.clock)
    }

    fn start(&mut self, delta: Steps) {
        self.stepper.power_up();
        self.remaining = delta;
    }
}
