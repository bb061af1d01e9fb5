//! Built-in sender
//! If you want to create a new sender, you will need to implement [`SendCommand`] trait

use embedded_hal::delay::DelayNs;

use crate::command::{Command, CommandSet};

mod parallel_sender;

pub use parallel_sender::{
    ParallelSender, Pins, ENABLE_HOLD_MS, ENABLE_PULSE_US, ENABLE_SETUP_US,
};

/// [`SendCommand`] is the trait a sender should implement to put commands on the wire
///
/// There is no read back: once [`SendCommand::send`] returns `Ok`,
/// the transfer is assumed to be done, including the controller's execution time.
pub trait SendCommand<Delayer: DelayNs> {
    /// Error raised by the underlying hardware
    type Error;

    /// Bring the bus into its idle state, called once before the first transfer
    fn init_bus(&mut self) -> Result<(), Self::Error>;

    /// Put a [`Command`] on the wire
    fn send(&mut self, command: impl Into<Command>, delayer: &mut Delayer)
        -> Result<(), Self::Error>;

    /// Send command, then wait specific duration
    ///
    /// For instructions that run longer than a regular transfer covers
    fn send_and_delay(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut Delayer,
        delay_ms: u32,
    ) -> Result<(), Self::Error> {
        self.send(command, delayer)?;
        delayer.delay_ms(delay_ms);
        Ok(())
    }

    /// Send a raw instruction byte
    fn send_command(&mut self, byte: u8, delayer: &mut Delayer) -> Result<(), Self::Error> {
        self.send(Command::instruction(byte), delayer)
    }

    /// Send a raw data byte
    fn send_data(&mut self, byte: u8, delayer: &mut Delayer) -> Result<(), Self::Error> {
        self.send(CommandSet::WriteDataToRAM(byte), delayer)
    }
}
