//! Logical channels and the table that pins them to physical inputs.

use ufmt::derive::uDebug;

use crate::config::{CHANNEL_COUNT, FIRST_ANALOG_PIN};

/// One of the six analog inputs, selected by the register byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
#[repr(u8)]
pub enum Channel {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
}

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::A0,
        Channel::A1,
        Channel::A2,
        Channel::A3,
        Channel::A4,
        Channel::A5,
    ];

    /// Decode a register byte. Anything past A5 has no channel.
    pub fn from_register(register: u8) -> Option<Self> {
        Self::ALL.get(register as usize).copied()
    }

    pub fn register(self) -> u8 {
        self as u8
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Physical pin number in the board's own numbering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub struct PinId(pub u8);

impl PinId {
    pub fn number(self) -> u8 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelMap {
    pins: [PinId; CHANNEL_COUNT],
}

impl ChannelMap {
    /// A0..A5 are digital pins 14..19 on the Uno/Nano.
    pub const ARDUINO_UNO: ChannelMap = ChannelMap::offset(FIRST_ANALOG_PIN);

    pub const fn new(pins: [PinId; CHANNEL_COUNT]) -> Self {
        Self { pins }
    }

    /// Contiguous analog block starting at `base`.
    pub const fn offset(base: u8) -> Self {
        let mut pins = [PinId(0); CHANNEL_COUNT];
        let mut i = 0;
        while i < CHANNEL_COUNT {
            pins[i] = PinId(base + i as u8);
            i += 1;
        }
        Self { pins }
    }

    pub fn pin(&self, channel: Channel) -> PinId {
        self.pins[channel.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, PinId)> + '_ {
        Channel::ALL.into_iter().zip(self.pins.iter().copied())
    }

    pub fn contains(&self, pin: PinId) -> bool {
        self.pins.contains(&pin)
    }
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self::ARDUINO_UNO
    }
}
