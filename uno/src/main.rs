#![no_std]
#![no_main]

mod clock;
mod controller;
mod uno;

use controller::Controller;
use panic_halt as _;

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let mut controller = Controller::new(dp);
    loop {
        controller.poll();
    }
}
