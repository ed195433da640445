#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

mod board;
mod twi;

use core::cell::RefCell;

use avr_device::interrupt::Mutex;
use panic_halt as _;
use planterra_sensor::{initialize, Config, Responder, Wire};

use crate::board::{Uno, UnoAdc};
use crate::twi::TwiSlave;

const CONFIG: Config = Config::new();

/// Everything the TWI vector owns. `None` until startup finishes.
struct Node {
    twi: TwiSlave,
    wire: Wire,
    responder: Responder<UnoAdc>,
}

static NODE: Mutex<RefCell<Option<Node>>> = Mutex::new(RefCell::new(None));

#[avr_device::interrupt(atmega328p)]
fn TWI() {
    avr_device::interrupt::free(|cs| {
        if let Some(node) = NODE.borrow(cs).borrow_mut().as_mut() {
            let reply = node.wire.service(node.twi.status(), node.twi.data(), &mut node.responder);
            node.twi.answer(reply);
        }
    });
}

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let mut uno = Uno::new(dp);

    // serial stays open for the life of the node, nothing writes to it after the banner
    let _serial = initialize(&mut uno, &CONFIG).expect("startup failed");
    let (twi, adc) = uno.into_parts().expect("bus not joined");

    avr_device::interrupt::free(|cs| {
        NODE.borrow(cs).replace(Some(Node {
            twi,
            wire: Wire::new(),
            responder: Responder::new(CONFIG.channels, adc),
        }));
    });
    unsafe { avr_device::interrupt::enable() };

    loop {
        avr_device::asm::nop(); // ← idle, all work happens in TWI()
    }
}
