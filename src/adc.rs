//! Analog source seam. The firmware plugs the ATmega ADC in here, tests plug a fake.

use crate::channel::PinId;
use crate::sample::Sample;

pub trait AnalogSource {
    type Error;

    /// Start (or poll) a conversion on `pin`. `WouldBlock` until it lands.
    fn sample(&mut self, pin: PinId) -> nb::Result<Sample, Self::Error>;
}

