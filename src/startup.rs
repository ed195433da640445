//! Power-on sequence. Runs once; nothing it sets up is ever torn down.

use embedded_hal::i2c::SevenBitAddress;
use ufmt::uWrite;

use crate::channel::PinId;
use crate::config::Config;
use crate::diag;

/// Board resources the startup sequence needs.
pub trait Platform {
    type Error;
    type Serial: uWrite;

    fn open_serial(&mut self, baud: u32) -> Result<Self::Serial, Self::Error>;

    /// Enable the slave on `address`. Interrupts stay masked until the caller is ready.
    fn join_bus(&mut self, address: SevenBitAddress) -> Result<(), Self::Error>;

    fn configure_analog_input(&mut self, pin: PinId) -> Result<(), Self::Error>;
}

/// Serial first, then the bus, then exactly the mapped pins.
pub fn initialize<P: Platform>(platform: &mut P, config: &Config) -> Result<P::Serial, P::Error> {
    let mut serial = platform.open_serial(config.serial_baud)?;
    platform.join_bus(config.bus_address)?;
    for (_, pin) in config.channels.iter() {
        platform.configure_analog_input(pin)?;
    }
    // banner is best effort, a dead serial line must not stop the node
    let _ = diag::banner(&mut serial, config);
    Ok(serial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelMap;
    use heapless::String;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Serial(u32),
        Bus(u8),
        Input(u8),
    }

    #[derive(Default)]
    struct FakeBoard {
        calls: Vec<Call>,
        refuse_pin: Option<u8>,
    }

    impl Platform for FakeBoard {
        type Error = &'static str;
        type Serial = String<256>;

        fn open_serial(&mut self, baud: u32) -> Result<Self::Serial, Self::Error> {
            self.calls.push(Call::Serial(baud));
            Ok(String::new())
        }

        fn join_bus(&mut self, address: SevenBitAddress) -> Result<(), Self::Error> {
            self.calls.push(Call::Bus(address));
            Ok(())
        }

        fn configure_analog_input(&mut self, pin: PinId) -> Result<(), Self::Error> {
            if self.refuse_pin == Some(pin.number()) {
                return Err("pin taken");
            }
            self.calls.push(Call::Input(pin.number()));
            Ok(())
        }
    }

    #[test]
    fn brings_up_serial_bus_and_six_inputs_in_order() {
        let mut board = FakeBoard::default();
        let serial = initialize(&mut board, &Config::new()).unwrap();

        assert_eq!(
            board.calls,
            [
                Call::Serial(9600),
                Call::Bus(0x01),
                Call::Input(14),
                Call::Input(15),
                Call::Input(16),
                Call::Input(17),
                Call::Input(18),
                Call::Input(19),
            ]
        );
        assert!(serial.starts_with("planterra-sensor: i2c addr 1"));
    }

    #[test]
    fn only_mapped_pins_are_touched() {
        let mut board = FakeBoard::default();
        let config = Config {
            channels: ChannelMap::offset(54),
            ..Config::new()
        };
        initialize(&mut board, &config).unwrap();

        let inputs: Vec<u8> = board
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Input(pin) => Some(*pin),
                _ => None,
            })
            .collect();
        assert_eq!(inputs, [54, 55, 56, 57, 58, 59]);
    }

    #[test]
    fn stops_at_the_first_platform_error() {
        let mut board = FakeBoard {
            refuse_pin: Some(16),
            ..FakeBoard::default()
        };
        assert_eq!(initialize(&mut board, &Config::new()).err(), Some("pin taken"));
        assert_eq!(board.calls.last(), Some(&Call::Input(15)));
    }
}
