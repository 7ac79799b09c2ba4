use core::cell::Cell;

use arduino_hal::pac::TC1;
use unistep::{Clock, MicroSeconds};

/// Microsecond clock running off Timer/Counter1.
///
/// The timer free-runs at 16 MHz / 64, so it ticks every 4us and its 16-bit
/// count overflows every 262ms. Each read adds the ticks since the previous
/// read to a wrapping `u32` count of microseconds. If reads are more than
/// 262ms apart, whole timer periods are lost and the clock runs slow; it
/// never runs fast.
pub struct Tc1Clock {
    tc1: TC1,
    last_count: Cell<u16>,
    micros: Cell<u32>,
}
impl Tc1Clock {
    const MICROS_PER_TICK: u32 = 4;

    /// Takes over Timer/Counter1 and starts it.
    pub fn new(tc1: TC1) -> Self {
        // Normal mode: count up through 0xFFFF and wrap.
        tc1.tccr1a().reset();
        tc1.tccr1b().write(|w| w.cs1().prescale_64());
        let last_count = Cell::new(tc1.tcnt1().read().bits());
        Self {
            tc1,
            last_count,
            micros: Cell::new(0),
        }
    }
}

impl Clock for Tc1Clock {
    fn now(&self) -> MicroSeconds {
        let count = self.tc1.tcnt1().read().bits();
        let ticks = count.wrapping_sub(self.last_count.get());
        self.last_count.set(count);

        let micros = self
            .micros
            .get()
            .wrapping_add(u32::from(ticks) * Self::MICROS_PER_TICK);
        self.micros.set(micros);
        MicroSeconds::new(micros)
    }
}
