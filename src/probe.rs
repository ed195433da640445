//! Master side of the protocol, for a controller (Pi, another MCU) polling the node.

use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::channel::Channel;
use crate::config::{BUS_ADDRESS, CHANNEL_COUNT, RESPONSE_LENGTH};
use crate::sample::Sample;

pub struct Probe<I> {
    i2c: I,
    address: SevenBitAddress,
}

impl<I: I2c> Probe<I> {
    pub fn new(i2c: I, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    pub fn with_default_address(i2c: I) -> Self {
        Self::new(i2c, BUS_ADDRESS)
    }

    /// Register write and two-byte read under one repeated start.
    pub fn read(&mut self, channel: Channel) -> Result<Sample, I::Error> {
        let mut buffer = [0u8; RESPONSE_LENGTH];
        self.i2c.write_read(self.address, &[channel.register()], &mut buffer)?;
        Ok(Sample::from_be_bytes(buffer))
    }

    pub fn read_all(&mut self) -> Result<[Sample; CHANNEL_COUNT], I::Error> {
        let mut samples = [Sample::ZERO; CHANNEL_COUNT];
        for channel in Channel::ALL {
            samples[channel.index()] = self.read(channel)?;
        }
        Ok(samples)
    }

    pub fn release(self) -> I {
        self.i2c
    }
}
