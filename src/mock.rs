//! Recording doubles for pins and delays, plus a decoder which turns the
//! recorded pin activity back into what the controller would latch.

extern crate std;

use core::{cell::RefCell, convert::Infallible};
use std::{collections::HashMap, rc::Rc, vec::Vec};

use embedded_hal::delay::DelayNs;

use crate::{
    lcd::{Config, Lcd},
    port::OutputPort,
    sender::{ParallelSender, Pins},
};

pub const RS: u8 = 2;
pub const EN: u8 = 3;
pub const DB: [u8; 4] = [4, 5, 6, 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Configure(u8),
    High(u8),
    Low(u8),
    DelayUs(u32),
    DelayMs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub struct MockPort {
    log: Log,
}

impl MockPort {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

impl OutputPort for MockPort {
    type Pin = u8;
    type Error = Infallible;

    fn configure_output(&mut self, pin: u8) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Event::Configure(pin));
        Ok(())
    }

    fn set_high(&mut self, pin: u8) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Event::High(pin));
        Ok(())
    }

    fn set_low(&mut self, pin: u8) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Event::Low(pin));
        Ok(())
    }
}

pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayUs(ns.div_ceil(1_000)));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

pub type MockLcd = Lcd<ParallelSender<MockPort>, MockDelay>;

pub fn init_lcd(config: Config) -> (MockLcd, Log) {
    let log: Log = Rc::default();
    let lcd = Lcd::new_4bit(
        MockPort::new(log.clone()),
        Pins::new(RS, EN, DB[0], DB[1], DB[2], DB[3]),
        MockDelay::new(log.clone()),
        config,
    )
    .unwrap();
    (lcd, log)
}

/// An LCD past its init sequence, with an empty log
pub fn ready_lcd() -> (MockLcd, Log) {
    let (lcd, log) = init_lcd(Config::default());
    log.borrow_mut().clear();
    (lcd, log)
}

/// What the controller sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latched {
    Nibble { data: bool, value: u8 },
    /// a wait other than the hold time which ends every enable pulse
    DelayMs(u32),
}

/// Replay pin events, latch data lines on every falling edge of enable
pub fn latched(log: &Log) -> Vec<Latched> {
    let mut levels: HashMap<u8, bool> = HashMap::new();
    let mut out = Vec::new();
    let mut after_latch = false;

    for &event in log.borrow().iter() {
        let was_after_latch = core::mem::take(&mut after_latch);
        match event {
            Event::High(pin) => {
                levels.insert(pin, true);
            }
            Event::Low(pin) => {
                let falling = pin == EN && levels.get(&EN).copied().unwrap_or(false);
                levels.insert(pin, false);
                if falling {
                    let value = DB.iter().enumerate().fold(0u8, |acc, (bit, pin)| {
                        match levels.get(pin).copied().unwrap_or(false) {
                            true => acc | (1 << bit),
                            false => acc,
                        }
                    });
                    let data = levels.get(&RS).copied().unwrap_or(false);
                    out.push(Latched::Nibble { data, value });
                    after_latch = true;
                }
            }
            Event::DelayMs(ms) if !was_after_latch => out.push(Latched::DelayMs(ms)),
            _ => {}
        }
    }
    out
}

/// Only the nibbles, in order
pub fn nibbles(log: &Log) -> Vec<u8> {
    latched(log)
        .into_iter()
        .filter_map(|l| match l {
            Latched::Nibble { value, .. } => Some(value),
            Latched::DelayMs(_) => None,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Command(u8),
    Data(u8),
    DelayMs(u32),
}

/// Pair nibbles into bytes, the stream has to start on a byte boundary
pub fn transfers(latched: &[Latched]) -> Vec<Transfer> {
    let mut out = Vec::new();
    let mut high: Option<(bool, u8)> = None;

    for &l in latched {
        match l {
            Latched::Nibble { data, value } => match high.take() {
                None => high = Some((data, value)),
                Some((high_data, high_value)) => {
                    assert_eq!(high_data, data, "RS changed in the middle of a byte");
                    let byte = (high_value << 4) | value;
                    out.push(match data {
                        true => Transfer::Data(byte),
                        false => Transfer::Command(byte),
                    });
                }
            },
            Latched::DelayMs(ms) => {
                assert!(high.is_none(), "delay in the middle of a byte");
                out.push(Transfer::DelayMs(ms));
            }
        }
    }

    assert!(high.is_none(), "stream ends with half a byte");
    out
}

pub fn log_transfers(log: &Log) -> Vec<Transfer> {
    transfers(&latched(log))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Broken(pub u32);

/// Fails on the n-th pin operation
pub struct FlakyPort {
    pub ops: u32,
    pub fail_at: u32,
}

impl FlakyPort {
    fn tick(&mut self) -> Result<(), Broken> {
        self.ops += 1;
        match self.ops == self.fail_at {
            true => Err(Broken(self.ops)),
            false => Ok(()),
        }
    }
}

impl OutputPort for FlakyPort {
    type Pin = u8;
    type Error = Broken;

    fn configure_output(&mut self, _pin: u8) -> Result<(), Broken> {
        self.tick()
    }

    fn set_high(&mut self, _pin: u8) -> Result<(), Broken> {
        self.tick()
    }

    fn set_low(&mut self, _pin: u8) -> Result<(), Broken> {
        self.tick()
    }
}

pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
