//! Slave-side Wire buffers and the TWI status machine that feeds them.
//!
//! The firmware's TWI interrupt reads TWSR/TWDR, hands them to [`Wire::service`]
//! and writes back whatever [`Reply`] says. Nothing in here touches registers.

use heapless::{Deque, Vec};
use ufmt::derive::uDebug;

use crate::config::BUFFER_LENGTH;

const STATUS_MASK: u8 = 0xF8; // ← TWSR prescaler bits out

#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum WireError {
    /// Transmit buffer already holds `BUFFER_LENGTH` bytes.
    BufferFull,
}

/// TWSR slave status codes (ATmega328P datasheet, tables 22-4 and 22-5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum TwiStatus {
    /// SLA+W (or general call) matched, ACK returned.
    AddressedForWrite,
    DataReceived,
    DataReceivedNack,
    StopOrRestart,
    /// SLA+R matched, ACK returned. This is the on-request moment.
    AddressedForRead,
    DataSentAck,
    DataSentNack,
    LastDataSentAck,
    BusError,
    Other(u8),
}

impl From<u8> for TwiStatus {
    fn from(twsr: u8) -> Self {
        match twsr & STATUS_MASK {
            0x60 | 0x68 | 0x70 | 0x78 => TwiStatus::AddressedForWrite,
            0x80 | 0x90 => TwiStatus::DataReceived,
            0x88 | 0x98 => TwiStatus::DataReceivedNack,
            0xA0 => TwiStatus::StopOrRestart,
            0xA8 | 0xB0 => TwiStatus::AddressedForRead,
            0xB8 => TwiStatus::DataSentAck,
            0xC0 => TwiStatus::DataSentNack,
            0xC8 => TwiStatus::LastDataSentAck,
            0x00 => TwiStatus::BusError,
            other => TwiStatus::Other(other),
        }
    }
}

/// What the TWI unit should do before clearing TWINT.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum Reply {
    Ack,
    Nack,
    /// Load TWDR with `byte`. `ack` = more bytes follow.
    Transmit { byte: u8, ack: bool },
    /// Bus error, release the lines and rearm.
    Recover,
}

/// The callback run when a master addresses us for reading.
pub trait RequestHandler {
    fn on_request(&mut self, wire: &mut Wire);
}

impl<F: FnMut(&mut Wire)> RequestHandler for F {
    fn on_request(&mut self, wire: &mut Wire) {
        self(wire)
    }
}

#[derive(Debug, Default)]
pub struct Wire {
    rx: Deque<u8, BUFFER_LENGTH>,
    staging: Vec<u8, BUFFER_LENGTH>,
    tx: Vec<u8, BUFFER_LENGTH>,
    tx_index: usize,
    writing: bool, // ← addressed for write, not yet committed
}

impl Wire {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next byte the master wrote, consumed. `None` once the buffer is drained.
    pub fn read(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    pub fn write(&mut self, byte: u8) -> Result<(), WireError> {
        self.tx.push(byte).map_err(|_| WireError::BufferFull)
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        if self.tx.len() + bytes.len() > BUFFER_LENGTH {
            return Err(WireError::BufferFull);
        }
        for &byte in bytes {
            self.write(byte)?;
        }
        Ok(())
    }

    /// Complete master write, as if the bus delivered `bytes` then a stop.
    /// Replaces whatever was left unread.
    pub fn receive(&mut self, bytes: &[u8]) {
        self.rx.clear();
        for &byte in bytes.iter().take(BUFFER_LENGTH) {
            let _ = self.rx.push_back(byte); // ← can't overflow, capped above
        }
    }

    /// Advance by one TWI event.
    pub fn service<H: RequestHandler + ?Sized>(
        &mut self,
        status: TwiStatus,
        data: u8,
        handler: &mut H,
    ) -> Reply {
        match status {
            TwiStatus::AddressedForWrite => {
                self.staging.clear();
                self.writing = true;
                Reply::Ack
            }
            TwiStatus::DataReceived => match self.staging.push(data) {
                Ok(()) => Reply::Ack,
                Err(_) => Reply::Nack,
            },
            TwiStatus::StopOrRestart => {
                self.commit_staging();
                Reply::Ack
            }
            TwiStatus::AddressedForRead => {
                // covers a repeated start that skipped 0xA0
                self.commit_staging();
                self.tx.clear();
                self.tx_index = 0;
                handler.on_request(self);
                if self.tx.is_empty() {
                    let _ = self.tx.push(0x00);
                }
                self.next_byte()
            }
            TwiStatus::DataSentAck => self.next_byte(),
            // rearm own-address recognition
            TwiStatus::DataReceivedNack
            | TwiStatus::DataSentNack
            | TwiStatus::LastDataSentAck
            | TwiStatus::Other(_) => Reply::Ack,
            TwiStatus::BusError => {
                self.staging.clear();
                self.writing = false;
                Reply::Recover
            }
        }
    }

    /// A finished write replaces the receive buffer, even when it carried no bytes.
    fn commit_staging(&mut self) {
        if !core::mem::take(&mut self.writing) {
            return;
        }
        let staged = core::mem::take(&mut self.staging);
        self.receive(&staged);
    }

    fn next_byte(&mut self) -> Reply {
        let byte = self.tx.get(self.tx_index).copied().unwrap_or(0xFF); // ← master overran, idle bus level
        self.tx_index += 1;
        Reply::Transmit {
            byte,
            ack: self.tx_index < self.tx.len(),
        }
    }
}
