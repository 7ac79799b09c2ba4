use arduino_hal::{
    hal::port::{PD0, PD1},
    pac::USART0,
    port::{
        mode::{Input, Output},
        Pin, D10, D11, D8, D9,
    },
    Usart,
};
use unistep::{HalfStepMotor, StepperDriver};

use crate::clock::Tc1Clock;

pub type UnoSerial = Usart<USART0, Pin<Input, PD0>, Pin<Output, PD1>>;

/// 28BYJ-48 on a ULN2003 board, with `IN1`..`IN4` wired to D8..D11.
pub type UnoMotor = HalfStepMotor<
    Pin<Output, D8>,
    Pin<Output, D9>,
    Pin<Output, D10>,
    Pin<Output, D11>,
>;

pub type UnoDriver = StepperDriver<UnoMotor, Tc1Clock>;
