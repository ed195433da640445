//! Arduino Uno wiring: USART0 for diagnostics, TWI slave on PC4/PC5, ADC on A0..A5.

use arduino_hal::adc::Channel as AdcChannel;
use arduino_hal::hal::port::{PC0, PC1, PC2, PC3, PC4, PC5, PD0, PD1};
use arduino_hal::hal::usart::BaudrateArduinoExt;
use arduino_hal::pac::{TWI, USART0};
use arduino_hal::port::mode::{Floating, Input, Output};
use arduino_hal::port::Pin;
use embedded_hal::i2c::SevenBitAddress;
use heapless::Vec;
use planterra_sensor::config::CHANNEL_COUNT;
use planterra_sensor::{AnalogSource, PinId, Platform, Sample};
use ufmt::derive::uDebug;

use crate::twi::TwiSlave;

pub type Serial = arduino_hal::Usart<USART0, Pin<Input, PD0>, Pin<Output, PD1>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum UnoError {
    SerialTaken,
    BusTaken,
    /// Pin isn't one of A0..A5.
    NotAnalog(PinId),
    /// Pin was already handed to the ADC.
    PinTaken(PinId),
}

struct AnalogPins {
    a0: Option<Pin<Input<Floating>, PC0>>,
    a1: Option<Pin<Input<Floating>, PC1>>,
    a2: Option<Pin<Input<Floating>, PC2>>,
    a3: Option<Pin<Input<Floating>, PC3>>,
    a4: Option<Pin<Input<Floating>, PC4>>, // ← SDA, see DESIGN.md
    a5: Option<Pin<Input<Floating>, PC5>>, // ← SCL
}

macro_rules! into_channel {
    ($slot:expr, $adc:expr) => {
        $slot.take().map(|pin| pin.into_analog_input($adc).into_channel())
    };
}

pub struct UnoAdc {
    adc: arduino_hal::Adc,
    channels: Vec<(PinId, AdcChannel), CHANNEL_COUNT>,
}

impl AnalogSource for UnoAdc {
    type Error = UnoError;

    fn sample(&mut self, pin: PinId) -> nb::Result<Sample, UnoError> {
        let (_, channel) = self
            .channels
            .iter()
            .find(|(p, _)| *p == pin)
            .ok_or(nb::Error::Other(UnoError::NotAnalog(pin)))?;
        Ok(Sample::from_raw(self.adc.read_blocking(channel)))
    }
}

pub struct Uno {
    usart: Option<(USART0, Pin<Input<Floating>, PD0>, Pin<Input<Floating>, PD1>)>,
    twi: Option<TWI>,
    slave: Option<TwiSlave>,
    analog: AnalogPins,
    adc: UnoAdc,
}

impl Uno {
    pub fn new(dp: arduino_hal::Peripherals) -> Self {
        let pins = arduino_hal::pins!(dp);
        Self {
            usart: Some((dp.USART0, pins.d0, pins.d1)),
            twi: Some(dp.TWI),
            slave: None,
            analog: AnalogPins {
                a0: Some(pins.a0),
                a1: Some(pins.a1),
                a2: Some(pins.a2),
                a3: Some(pins.a3),
                a4: Some(pins.a4),
                a5: Some(pins.a5),
            },
            adc: UnoAdc {
                adc: arduino_hal::Adc::new(dp.ADC, Default::default()),
                channels: Vec::new(),
            },
        }
    }

    /// What the interrupt handler needs once startup is done.
    pub fn into_parts(self) -> Result<(TwiSlave, UnoAdc), UnoError> {
        let slave = self.slave.ok_or(UnoError::BusTaken)?;
        Ok((slave, self.adc))
    }
}

impl Platform for Uno {
    type Error = UnoError;
    type Serial = Serial;

    fn open_serial(&mut self, baud: u32) -> Result<Serial, UnoError> {
        let (usart, rx, tx) = self.usart.take().ok_or(UnoError::SerialTaken)?;
        Ok(arduino_hal::Usart::new(usart, rx, tx.into_output(), baud.into_baudrate()))
    }

    fn join_bus(&mut self, address: SevenBitAddress) -> Result<(), UnoError> {
        let twi = self.twi.take().ok_or(UnoError::BusTaken)?;
        self.slave = Some(TwiSlave::begin(twi, address));
        Ok(())
    }

    fn configure_analog_input(&mut self, pin: PinId) -> Result<(), UnoError> {
        let adc = &mut self.adc.adc;
        let channel = match pin.number() {
            14 => into_channel!(self.analog.a0, adc),
            15 => into_channel!(self.analog.a1, adc),
            16 => into_channel!(self.analog.a2, adc),
            17 => into_channel!(self.analog.a3, adc),
            18 => into_channel!(self.analog.a4, adc),
            19 => into_channel!(self.analog.a5, adc),
            _ => return Err(UnoError::NotAnalog(pin)),
        }
        .ok_or(UnoError::PinTaken(pin))?;

        self.adc
            .channels
            .push((pin, channel))
            .map_err(|_| UnoError::PinTaken(pin))
    }
}
