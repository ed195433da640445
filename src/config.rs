use embedded_hal::i2c::SevenBitAddress;

use crate::channel::ChannelMap;

pub const BUS_ADDRESS: SevenBitAddress = 0x01;
pub const SERIAL_BAUD: u32 = 9600;

pub const CHANNEL_COUNT: usize = 6;
pub const FIRST_ANALOG_PIN: u8 = 14; // ← A0 in Uno digital numbering

pub const RESPONSE_LENGTH: usize = 2;
pub const BUFFER_LENGTH: usize = 32; // ← same as the Wire library

/// Everything the node needs at startup. All of it is compiled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub bus_address: SevenBitAddress,
    pub serial_baud: u32,
    pub channels: ChannelMap,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            bus_address: BUS_ADDRESS,
            serial_baud: SERIAL_BAUD,
            channels: ChannelMap::ARDUINO_UNO,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
