use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};

use super::phase::{Phase, RELEASED};
use crate::Direction;
use crate::Stepper;

/// Unipolar stepper driven in half-steps through four output lines.
///
/// The lines are the `IN1`..`IN4` inputs of a ULN2003 (or similar) board.
/// They are owned exclusively by the motor and are only ever written as a
/// complete phase pattern, or all low.
///
/// Output lines must be infallible: a failed write cannot be reported from
/// the middle of a step, so it has to be dealt with by the pin
/// implementation.
///
/// # Type Parameters
///
/// - `A`, `B`, `C`, `D`: output lines for windings A to D.
pub struct HalfStepMotor<A, B, C, D> {
    line_a: A,
    line_b: B,
    line_c: C,
    line_d: D,
    phase: Phase,
}
impl<A, B, C, D> HalfStepMotor<A, B, C, D>
where
    A: OutputPin<Error = Infallible>,
    B: OutputPin<Error = Infallible>,
    C: OutputPin<Error = Infallible>,
    D: OutputPin<Error = Infallible>,
{
    /// Creates a new `HalfStepMotor` at phase zero.
    ///
    /// All four lines are driven low, so the motor starts de-energized
    /// whatever state the pins were left in.
    pub fn new(line_a: A, line_b: B, line_c: C, line_d: D) -> Self {
        let mut motor = Self {
            line_a,
            line_b,
            line_c,
            line_d,
            phase: Phase::zero(),
        };
        motor.write_lines(RELEASED);
        motor
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Releases the output lines.
    ///
    /// The lines are returned in whatever state they were last driven.
    pub fn release(self) -> (A, B, C, D) {
        (self.line_a, self.line_b, self.line_c, self.line_d)
    }

    /// Drives the lines to the pattern of `phase` and records it.
    fn apply(&mut self, phase: Phase) {
        self.write_lines(phase.pattern());
        self.phase = phase;
    }

    fn write_lines(&mut self, levels: [PinState; 4]) {
        let [a, b, c, d] = levels;
        set_line(&mut self.line_a, a);
        set_line(&mut self.line_b, b);
        set_line(&mut self.line_c, c);
        set_line(&mut self.line_d, d);
    }
}

impl<A, B, C, D> Stepper for HalfStepMotor<A, B, C, D>
where
    A: OutputPin<Error = Infallible>,
    B: OutputPin<Error = Infallible>,
    C: OutputPin<Error = Infallible>,
    D: OutputPin<Error = Infallible>,
{
    fn step(&mut self, direction: Direction) {
        self.apply(self.phase.next(direction));
    }

    fn power_up(&mut self) {
        self.apply(self.phase);
    }

    fn power_down(&mut self) {
        self.write_lines(RELEASED);
    }
}

/// Sets a single line.
fn set_line<P: OutputPin<Error = Infallible>>(line: &mut P, level: PinState) {
    match line.set_state(level) {
        Ok(()) => {}
        Err(never) => match never {},
    }
}
