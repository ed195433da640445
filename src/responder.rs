//! The on-request handler: register byte in, two sample bytes out.

use ufmt::derive::uDebug;

use crate::adc::AnalogSource;
use crate::channel::{Channel, ChannelMap, PinId};
use crate::config::RESPONSE_LENGTH;
use crate::sample::Sample;
use crate::wire::{RequestHandler, Wire};

/// Sent whenever there is no sample to report.
pub const FALLBACK_RESPONSE: [u8; RESPONSE_LENGTH] = [0x00, 0x00];

#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum Response {
    Sample { channel: Channel, sample: Sample },
    /// Master asked for a read without writing a register first.
    Missing,
    /// Register byte past the last channel.
    Unmapped { register: u8 },
    /// ADC refused the conversion.
    Fault { channel: Channel },
}

impl Response {
    pub fn to_bytes(self) -> [u8; RESPONSE_LENGTH] {
        match self {
            Response::Sample { sample, .. } => sample.to_be_bytes(),
            Response::Missing | Response::Unmapped { .. } | Response::Fault { .. } => FALLBACK_RESPONSE,
        }
    }
}

/// Decode and map a register byte. `Err` carries the fallback answer.
fn resolve(register: Option<u8>, map: &ChannelMap) -> Result<(Channel, PinId), Response> {
    let register = register.ok_or(Response::Missing)?;
    let channel = Channel::from_register(register).ok_or(Response::Unmapped { register })?;
    Ok((channel, map.pin(channel)))
}

/// Request/response with no device state at all.
pub fn encode_response<F>(register: Option<u8>, map: &ChannelMap, mut sample: F) -> [u8; RESPONSE_LENGTH]
where
    F: FnMut(PinId) -> Sample,
{
    match resolve(register, map) {
        Ok((_, pin)) => sample(pin).to_be_bytes(),
        Err(fallback) => fallback.to_bytes(),
    }
}

pub struct Responder<A> {
    map: ChannelMap,
    adc: A,
}

impl<A: AnalogSource> Responder<A> {
    pub fn new(map: ChannelMap, adc: A) -> Self {
        Self { map, adc }
    }

    /// Fresh conversion every call, nothing is cached between requests.
    pub fn respond(&mut self, register: Option<u8>) -> Response {
        let (channel, pin) = match resolve(register, &self.map) {
            Ok(target) => target,
            Err(fallback) => return fallback,
        };
        match nb::block!(self.adc.sample(pin)) {
            Ok(sample) => Response::Sample { channel, sample },
            Err(_) => Response::Fault { channel },
        }
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }

    pub fn release(self) -> A {
        self.adc
    }
}

impl<A: AnalogSource> RequestHandler for Responder<A> {
    fn on_request(&mut self, wire: &mut Wire) {
        let response = self.respond(wire.read());
        // tx was cleared for this request, two bytes always fit
        let _ = wire.write_all(&response.to_bytes());
    }
}
