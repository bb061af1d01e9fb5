//! The display API
//!
//! [`Lcd`] is created by [`Lcd::new`], which runs the power-on handshake,
//! so an [`Lcd`] you hold is always ready to take commands.

use core::fmt;

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::{
    command::{CommandSet, MoveDirection, ShiftType, State},
    sender::SendCommand,
};

mod init;

pub use init::{Config, INTERFACE_RESET_DELAYS_MS, POWER_ON_DELAY_MS};

/// Clear display runs longer than a regular instruction, in milliseconds
pub const CLEAR_DELAY_MS: u32 = 2;
/// Return home runs longer than a regular instruction, in milliseconds
pub const RETURN_HOME_DELAY_MS: u32 = 2;
/// DDRAM address where the second line starts
pub const SECOND_LINE_OFFSET: u8 = 0x40;
/// Number of CGRAM glyph slots
pub const GLYPH_SLOTS: u8 = 8;
/// Character sent for anything CGROM can't show
pub const FULL_BLOCK: u8 = 0xFF;

/// A HD44780 compatible LCD, driven through a [`SendCommand`]
pub struct Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    sender: Sender,
    delayer: Delayer,
    rows: u8,
    columns: u8,
}

impl<Sender, Delayer> Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    fn send(&mut self, command: CommandSet) -> Result<(), Sender::Error> {
        self.sender.send(command, &mut self.delayer)
    }

    /// Clean the whole display, and move cursor to the top left
    pub fn clear(&mut self) -> Result<(), Sender::Error> {
        self.sender
            .send_and_delay(CommandSet::ClearDisplay, &mut self.delayer, CLEAR_DELAY_MS)?;
        // cursor to (0, 0)
        self.send(CommandSet::SetDDRAM(0))
    }

    /// Move cursor to the top left, and undo any display shift
    pub fn return_home(&mut self) -> Result<(), Sender::Error> {
        self.sender.send_and_delay(
            CommandSet::ReturnHome,
            &mut self.delayer,
            RETURN_HOME_DELAY_MS,
        )
    }

    /// Move cursor to (`row`, `column`)
    ///
    /// Out of range `row` and `column` are clamped to the last row and column.
    pub fn set_cursor(&mut self, row: u8, column: u8) -> Result<(), Sender::Error> {
        let raw_pos = cursor_address(row, column, self.rows, self.columns);
        self.send(CommandSet::SetDDRAM(raw_pos))
    }

    /// Write a string from current cursor position
    ///
    /// ASCII characters are sent as is, anything else shows up as a full block.
    /// There is no line wrap, see the datasheet for what the controller does past the line end.
    pub fn print(&mut self, text: &str) -> Result<(), Sender::Error> {
        for char in text.chars() {
            self.print_glyph(rom_code(char))?;
        }
        Ok(())
    }

    /// Write raw character codes from current cursor position
    ///
    /// For CGROM characters outside ASCII, like `0xDF` (degree sign on A00 ROM)
    pub fn print_bytes(&mut self, bytes: &[u8]) -> Result<(), Sender::Error> {
        for &byte in bytes {
            self.print_glyph(byte)?;
        }
        Ok(())
    }

    /// Write a single character code, 0 to 7 are the custom glyphs
    pub fn print_glyph(&mut self, code: u8) -> Result<(), Sender::Error> {
        self.send(CommandSet::WriteDataToRAM(code))
    }

    /// Store a 5x8 glyph in CGRAM slot `index`
    ///
    /// Only the lower 3 bits of `index` are used, and only the lower 5 bits of each line.
    /// Cursor ends up at the top left.
    pub fn create_glyph(&mut self, index: u8, graph_data: &[u8; 8]) -> Result<(), Sender::Error> {
        let index = index % GLYPH_SLOTS;
        debug!("write glyph {} to CGRAM", index);

        self.send(CommandSet::SetCGRAM(index << 3))?;
        for &line in graph_data {
            self.send(CommandSet::WriteDataToRAM(line))?;
        }

        // leave CGRAM, this also moves cursor to (0, 0)
        self.send(CommandSet::SetDDRAM(0))
    }

    /// Switch display, cursor and cursor blink in one go
    pub fn set_display_control(
        &mut self,
        display: State,
        cursor: State,
        cursor_blink: State,
    ) -> Result<(), Sender::Error> {
        self.send(CommandSet::DisplayOnOff {
            display,
            cursor,
            cursor_blink,
        })
    }

    /// Set where cursor goes after a write, and whether display follows
    pub fn set_entry_mode(
        &mut self,
        dir: MoveDirection,
        shift: ShiftType,
    ) -> Result<(), Sender::Error> {
        self.send(CommandSet::EntryModeSet(dir, shift))
    }

    /// Move cursor, or cursor and display window, one step
    pub fn shift(&mut self, shift_type: ShiftType, dir: MoveDirection) -> Result<(), Sender::Error> {
        self.send(CommandSet::CursorOrDisplayShift(shift_type, dir))
    }

    /// Wait for specified milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delayer.delay_ms(ms);
    }

    /// Wait for specified microseconds
    pub fn delay_us(&mut self, us: u32) {
        self.delayer.delay_us(us);
    }

    #[allow(missing_docs)]
    pub fn rows(&self) -> u8 {
        self.rows
    }

    #[allow(missing_docs)]
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Give sender and delayer back, the display keeps showing what it has
    pub fn release(self) -> (Sender, Delayer) {
        (self.sender, self.delayer)
    }
}

impl<Sender, Delayer> fmt::Write for Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map_err(|_| fmt::Error)
    }
}

/// DDRAM address of (`row`, `column`), saturating both
fn cursor_address(row: u8, column: u8, rows: u8, columns: u8) -> u8 {
    let row = row.min(rows.saturating_sub(1));
    let column = column.min(columns.saturating_sub(1));

    match row {
        0 => column,
        _ => SECOND_LINE_OFFSET + column,
    }
}

/// map char outside of ASCII to full block
fn rom_code(char: char) -> u8 {
    match char.is_ascii() {
        true => char as u8,
        false => FULL_BLOCK,
    }
}
