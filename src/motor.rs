mod driver;
mod half_step;
mod phase;
mod revolution;
mod stepper;

pub use driver::StepperDriver;
pub use half_step::HalfStepMotor;
pub use phase::Phase;
pub use phase::PHASE_COUNT;
pub use revolution::Revolution;
pub use stepper::Stepper;

#[cfg(test)]
pub use stepper::test::TestStepper;
