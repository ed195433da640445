use ufmt::derive::uDebug;

use crate::config::RESPONSE_LENGTH;

/// One ADC conversion. 10 bits on the ATmega, carried in a u16.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, uDebug)]
pub struct Sample(u16);

impl Sample {
    pub const ZERO: Sample = Sample(0);
    pub const MAX: u16 = 1023;

    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    pub const fn to_be_bytes(self) -> [u8; RESPONSE_LENGTH] {
        [((self.0 >> 8) & 0xFF) as u8, (self.0 & 0xFF) as u8]
    }

    pub const fn from_be_bytes(bytes: [u8; RESPONSE_LENGTH]) -> Self {
        Self(((bytes[0] as u16) << 8) | bytes[1] as u16)
    }

    /// SMBus word reads take the first byte on the wire as the low byte.
    pub const fn from_smbus_word(word: u16) -> Self {
        Self(word.swap_bytes())
    }
}

impl From<Sample> for u16 {
    fn from(sample: Sample) -> Self {
        sample.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_byte_goes_first() {
        for v in [0u16, 1, 255, 256, 511, 512, 777, 1022, Sample::MAX] {
            let bytes = Sample::from_raw(v).to_be_bytes();
            assert_eq!(bytes[0], ((v >> 8) & 0xFF) as u8);
            assert_eq!(bytes[1], (v & 0xFF) as u8);
        }
    }

    #[test]
    fn values_above_255_survive_the_split() {
        let bytes = Sample::from_raw(0x3A7).to_be_bytes();
        assert_eq!(bytes, [0x03, 0xA7]);
        assert_eq!(Sample::from_be_bytes(bytes).value(), 0x3A7);
    }

    #[test]
    fn smbus_word_is_byte_swapped() {
        // wire bytes 0x03, 0xA7 come back from read_word_data as 0xA703
        assert_eq!(Sample::from_smbus_word(0xA703), Sample::from_raw(0x03A7));
    }
}
