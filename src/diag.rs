//! Serial diagnostics. Only ever written from the foreground, never from the TWI interrupt.

use ufmt::{uWrite, uwriteln};

use crate::config::{Config, CHANNEL_COUNT};

pub fn banner<W: uWrite + ?Sized>(w: &mut W, config: &Config) -> Result<(), W::Error> {
    uwriteln!(
        w,
        "planterra-sensor: i2c addr {}, {} baud, {} channels\r",
        config.bus_address,
        config.serial_baud,
        CHANNEL_COUNT
    )?;
    for (channel, pin) in config.channels.iter() {
        uwriteln!(w, "  {:?} -> pin {}\r", channel, pin.number())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    #[test]
    fn banner_lists_address_and_every_pin() {
        let mut out: String<256> = String::new();
        banner(&mut out, &Config::new()).unwrap();

        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("planterra-sensor: i2c addr 1, 9600 baud, 6 channels"));
        assert_eq!(lines.next(), Some("  A0 -> pin 14"));
        assert_eq!(lines.last(), Some("  A5 -> pin 19"));
    }

    #[test]
    fn full_serial_buffer_surfaces_the_error() {
        let mut out: String<8> = String::new();
        assert!(banner(&mut out, &Config::new()).is_err());
    }
}
