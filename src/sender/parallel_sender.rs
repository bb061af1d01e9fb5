use embedded_hal::delay::DelayNs;
use log::trace;

use crate::{
    command::{Bits, Command, RegisterSelection},
    port::OutputPort,
    sender::SendCommand,
    utils::{BitOps, BitState, Nibbles},
};

/// Enable low before the rising edge, in microseconds
pub const ENABLE_SETUP_US: u32 = 1;
/// Enable high time, in microseconds
pub const ENABLE_PULSE_US: u32 = 1;
/// Wait after the falling edge, covers execution time of most instructions
pub const ENABLE_HOLD_MS: u32 = 1;

/// The six pins of a 4-bit bus, by identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pins<Id> {
    /// RS, low for instruction, high for data
    pub register_select: Id,
    /// E, latches data lines on falling edge
    pub enable: Id,
    /// DB4 to DB7, in this order
    pub data: [Id; 4],
}

impl<Id: Copy + PartialEq> Pins<Id> {
    /// Collect the pin identifiers, data pins from DB4 to DB7
    pub fn new(register_select: Id, enable: Id, db4: Id, db5: Id, db6: Id, db7: Id) -> Self {
        Self {
            register_select,
            enable,
            data: [db4, db5, db6, db7],
        }
    }

    /// All six pins, control pins first
    pub fn all(&self) -> [Id; 6] {
        let [db4, db5, db6, db7] = self.data;
        [self.register_select, self.enable, db4, db5, db6, db7]
    }

    /// `false` if one pin shows up twice
    pub fn are_distinct(&self) -> bool {
        let pins = self.all();
        pins.iter()
            .enumerate()
            .all(|(index, pin)| !pins[index + 1..].contains(pin))
    }
}

/// Bit-banged 4-bit parallel sender, write only
///
/// RW is expected to be tied to ground, busy flag is never read,
/// every transfer ends with a fixed delay instead.
pub struct ParallelSender<Port: OutputPort> {
    port: Port,
    pins: Pins<Port::Pin>,
}

impl<Port: OutputPort> ParallelSender<Port> {
    /// Pair a port with the pins the LCD is wired to, nothing is touched until [`SendCommand::init_bus`]
    pub fn new(port: Port, pins: Pins<Port::Pin>) -> Self {
        debug_assert!(pins.are_distinct(), "LCD pins should be distinct");
        Self { port, pins }
    }

    /// Get port and pins back
    pub fn release(self) -> (Port, Pins<Port::Pin>) {
        (self.port, self.pins)
    }

    #[allow(missing_docs)]
    pub fn get_pins(&self) -> &Pins<Port::Pin> {
        &self.pins
    }

    /// Drive DB4..DB7 to bit 0..3 of `raw_bits`
    fn push_bits(&mut self, raw_bits: u8) -> Result<(), Port::Error> {
        for (index, &pin) in self.pins.data.iter().enumerate() {
            let high = raw_bits.check_bit(index as u8) == BitState::Set;
            self.port.set_state(pin, high)?;
        }
        Ok(())
    }

    fn pulse_enable(&mut self, delayer: &mut impl DelayNs) -> Result<(), Port::Error> {
        self.port.set_low(self.pins.enable)?;
        delayer.delay_us(ENABLE_SETUP_US);

        self.port.set_high(self.pins.enable)?;
        delayer.delay_us(ENABLE_PULSE_US);

        self.port.set_low(self.pins.enable)?;
        delayer.delay_ms(ENABLE_HOLD_MS);
        Ok(())
    }

    /// Put one nibble on the data lines and latch it
    pub fn write_nibble(
        &mut self,
        nibble: u8,
        delayer: &mut impl DelayNs,
    ) -> Result<(), Port::Error> {
        trace!("nibble {:04b}", nibble.low_nibble());
        self.push_bits(nibble.low_nibble())?;
        self.pulse_enable(delayer)
    }
}

impl<Port, Delayer> SendCommand<Delayer> for ParallelSender<Port>
where
    Port: OutputPort,
    Delayer: DelayNs,
{
    type Error = Port::Error;

    fn init_bus(&mut self) -> Result<(), Self::Error> {
        for pin in self.pins.all() {
            self.port.configure_output(pin)?;
        }

        self.port.set_low(self.pins.register_select)?;
        self.port.set_low(self.pins.enable)
    }

    fn send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut Delayer,
    ) -> Result<(), Self::Error> {
        let command = command.into();

        let rs = command.get_register_selection();
        match rs {
            RegisterSelection::Command => self.port.set_low(self.pins.register_select)?,
            RegisterSelection::Data => self.port.set_high(self.pins.register_select)?,
        }

        match command.get_data() {
            Bits::Bit4(raw_bits) => {
                trace!("send {:?} half {:04b}", rs, raw_bits);
                self.write_nibble(raw_bits, delayer)
            }
            Bits::Bit8(raw_bits) => {
                trace!("send {:?} {:08b}", rs, raw_bits);
                // high nibble always goes first
                self.write_nibble(raw_bits.high_nibble(), delayer)?;
                self.write_nibble(raw_bits.low_nibble(), delayer)
            }
        }
    }
}
