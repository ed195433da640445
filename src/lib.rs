#![cfg_attr(not(test), no_std)]

//! Planterra soil-sensor node.
//!
//! Six analog inputs behind an I2C slave. A master writes one register byte (0..=5),
//! reads two bytes back, and gets a fresh big-endian ADC sample of A0 + register.
//!
//! Everything here is hardware-free. The Uno firmware in `main.rs` only moves bytes
//! between the TWI registers and [`Wire`], and the ADC and [`Responder`].

pub mod adc;
pub mod channel;
pub mod config;
pub mod diag;
pub mod probe;
pub mod responder;
pub mod sample;
pub mod startup;
pub mod wire;

pub use adc::AnalogSource;
pub use channel::{Channel, ChannelMap, PinId};
pub use config::Config;
pub use probe::Probe;
pub use responder::{encode_response, Responder, Response};
pub use sample::Sample;
pub use startup::{initialize, Platform};
pub use wire::{Reply, RequestHandler, TwiStatus, Wire, WireError};
