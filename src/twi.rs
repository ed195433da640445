use arduino_hal::pac::TWI;
use embedded_hal::i2c::SevenBitAddress;
use planterra_sensor::wire::{Reply, TwiStatus};

// TWCR bits (ATmega328P datasheet 22.9.2)
const TWINT: u8 = 1 << 7;
const TWEA: u8 = 1 << 6;
const TWSTO: u8 = 1 << 4;
const TWEN: u8 = 1 << 2;
const TWIE: u8 = 1 << 0;

/// Interrupt-driven TWI in slave mode. Only ever touched from the TWI vector after `begin`.
pub struct TwiSlave {
    twi: TWI,
}

impl TwiSlave {
    pub fn begin(twi: TWI, address: SevenBitAddress) -> Self {
        // 7-bit address in TWA[6:0], general call off
        twi.twar().write(|w| unsafe { w.bits((address & 0x7F) << 1) });
        twi.twcr().write(|w| unsafe { w.bits(TWEN | TWEA | TWIE | TWINT) });
        Self { twi }
    }

    pub fn status(&self) -> TwiStatus {
        TwiStatus::from(self.twi.twsr().read().bits())
    }

    pub fn data(&self) -> u8 {
        self.twi.twdr().read().bits()
    }

    /// Write TWDR/TWCR for `reply` and clear TWINT so the bus moves on.
    pub fn answer(&mut self, reply: Reply) {
        let twcr = match reply {
            Reply::Ack => TWINT | TWEN | TWIE | TWEA,
            Reply::Nack => TWINT | TWEN | TWIE,
            Reply::Transmit { byte, ack } => {
                self.twi.twdr().write(|w| unsafe { w.bits(byte) });
                if ack {
                    TWINT | TWEN | TWIE | TWEA
                } else {
                    TWINT | TWEN | TWIE
                }
            }
            Reply::Recover => TWINT | TWEN | TWIE | TWEA | TWSTO, // ← releases SDA/SCL, no STOP actually sent in slave mode
        };
        self.twi.twcr().write(|w| unsafe { w.bits(twcr) });
    }
}
