//! HD44780 instruction set
//!
//! [`CommandSet`] is the high level form of every instruction the driver issues,
//! [`Command`] is what actually travels over the bus: a register selection plus
//! either a full byte or a single nibble.

use crate::utils::{BitOps, BitState};

/// Instruction opcodes, the highest set bit of each identifies the instruction
pub mod opcode {
    /// Clear display, cursor goes home
    pub const CLEAR_DISPLAY: u8 = 1 << 0;
    /// Cursor goes home, display shift is undone
    pub const RETURN_HOME: u8 = 1 << 1;
    /// Cursor move direction and display shift on write
    pub const ENTRY_MODE_SET: u8 = 1 << 2;
    /// Display, cursor and blink on/off
    pub const DISPLAY_CONTROL: u8 = 1 << 3;
    /// Move cursor or shift display without touching RAM
    pub const CURSOR_SHIFT: u8 = 1 << 4;
    /// Interface width, line count and font
    pub const FUNCTION_SET: u8 = 1 << 5;
    /// Set CGRAM address
    pub const SET_CGRAM_ADDR: u8 = 1 << 6;
    /// Set DDRAM address
    pub const SET_DDRAM_ADDR: u8 = 1 << 7;
}

/// The nibble sent three times to resynchronize an interface of unknown width
pub const INTERFACE_RESET_NIBBLE: u8 = 0b0011;

/// The nibble which switches the controller into 4-bit mode
pub const HALF_FUNCTION_SET_NIBBLE: u8 = 0b0010;

/// Every instruction this driver can issue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandSet {
    /// Clear DDRAM and return cursor home
    ClearDisplay,
    /// Return cursor home
    ReturnHome,
    /// Set cursor direction and whether display shifts on write
    EntryModeSet(MoveDirection, ShiftType),
    /// Switch display, cursor and cursor blink
    DisplayOnOff {
        /// whole display
        display: State,
        /// underline cursor
        cursor: State,
        /// blinking block cursor
        cursor_blink: State,
    },
    /// Move the cursor, or the cursor together with the display window
    CursorOrDisplayShift(ShiftType, MoveDirection),
    // the next two are not commands from datasheet,
    // they are the single nibbles of the power-on handshake
    /// Nibble `0b0011`, sent three times during initialization
    InterfaceReset,
    /// Nibble `0b0010`, commits the controller to 4-bit mode
    HalfFunctionSet,
    /// Function set, always 4-bit interface
    FunctionSet(LineMode, Font),
    /// Set CGRAM address, only lower 6 bits are used
    SetCGRAM(u8),
    /// Set DDRAM address, only lower 7 bits are used
    SetDDRAM(u8),
    /// Write a byte to current RAM address
    WriteDataToRAM(u8),
}

/// Cursor move direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MoveDirection {
    /// decrease address
    RightToLeft,
    /// increase address
    #[default]
    LeftToRight,
}

/// What moves when cursor moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShiftType {
    /// only cursor moves
    #[default]
    CursorOnly,
    /// display window follows the cursor
    CursorAndDisplay,
}

/// On/Off switch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum State {
    #[allow(missing_docs)]
    Off,
    #[allow(missing_docs)]
    #[default]
    On,
}

/// How many lines the controller drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineMode {
    #[allow(missing_docs)]
    OneLine,
    #[allow(missing_docs)]
    #[default]
    TwoLine,
}

/// Character font, 5x11 only works in [`LineMode::OneLine`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Font {
    #[allow(missing_docs)]
    #[default]
    Font5x8,
    #[allow(missing_docs)]
    Font5x11,
}

impl From<State> for BitState {
    fn from(state: State) -> Self {
        match state {
            State::Off => BitState::Clear,
            State::On => BitState::Set,
        }
    }
}

impl From<MoveDirection> for BitState {
    fn from(dir: MoveDirection) -> Self {
        match dir {
            MoveDirection::RightToLeft => BitState::Clear,
            MoveDirection::LeftToRight => BitState::Set,
        }
    }
}

impl From<ShiftType> for BitState {
    fn from(st: ShiftType) -> Self {
        match st {
            ShiftType::CursorOnly => BitState::Clear,
            ShiftType::CursorAndDisplay => BitState::Set,
        }
    }
}

/// Whether a transfer goes to the instruction register or the data register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterSelection {
    /// RS low
    Command,
    /// RS high
    Data,
}

/// Payload of a transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bits {
    /// A lone nibble, only lower 4 bits are valid
    Bit4(u8),
    /// A full byte, sent as two nibbles on a 4-bit bus
    Bit8(u8),
}

/// A framed transfer, ready to be put on the bus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    rs: RegisterSelection,
    data: Bits,
}

impl Command {
    /// Frame a payload
    pub fn new(rs: RegisterSelection, data: Bits) -> Self {
        Self { rs, data }
    }

    /// An instruction byte, RS low
    pub fn instruction(byte: u8) -> Self {
        Self::new(RegisterSelection::Command, Bits::Bit8(byte))
    }

    /// A data byte, RS high
    pub fn data(byte: u8) -> Self {
        Self::new(RegisterSelection::Data, Bits::Bit8(byte))
    }

    #[allow(missing_docs)]
    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    #[allow(missing_docs)]
    pub fn get_data(&self) -> Bits {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => Self::instruction(opcode::CLEAR_DISPLAY),

            CommandSet::ReturnHome => Self::instruction(opcode::RETURN_HOME),

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits = opcode::ENTRY_MODE_SET;
                raw_bits.put_bit(1, dir.into());
                raw_bits.put_bit(0, st.into());
                Self::instruction(raw_bits)
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits = opcode::DISPLAY_CONTROL;
                raw_bits.put_bit(2, display.into());
                raw_bits.put_bit(1, cursor.into());
                raw_bits.put_bit(0, cursor_blink.into());
                Self::instruction(raw_bits)
            }

            CommandSet::CursorOrDisplayShift(st, dir) => {
                let mut raw_bits = opcode::CURSOR_SHIFT;
                raw_bits.put_bit(3, st.into());
                raw_bits.put_bit(2, dir.into());
                Self::instruction(raw_bits)
            }

            CommandSet::InterfaceReset => Self::new(
                RegisterSelection::Command,
                Bits::Bit4(INTERFACE_RESET_NIBBLE),
            ),

            CommandSet::HalfFunctionSet => Self::new(
                RegisterSelection::Command,
                Bits::Bit4(HALF_FUNCTION_SET_NIBBLE),
            ),

            CommandSet::FunctionSet(line, font) => {
                // bit 4 stays clear, 4-bit interface
                let mut raw_bits = opcode::FUNCTION_SET;

                match line {
                    LineMode::OneLine => raw_bits.clear_bit(3),
                    LineMode::TwoLine => raw_bits.set_bit(3),
                };

                match font {
                    Font::Font5x8 => raw_bits.clear_bit(2),
                    Font::Font5x11 => raw_bits.set_bit(2),
                };

                Self::instruction(raw_bits)
            }

            CommandSet::SetCGRAM(addr) => {
                Self::instruction(opcode::SET_CGRAM_ADDR | (addr & 0b0011_1111))
            }

            CommandSet::SetDDRAM(addr) => {
                Self::instruction(opcode::SET_DDRAM_ADDR | (addr & 0b0111_1111))
            }

            CommandSet::WriteDataToRAM(data) => Self::data(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte_of(command: CommandSet) -> u8 {
        match Command::from(command).get_data() {
            Bits::Bit8(byte) => byte,
            Bits::Bit4(nibble) => panic!("expected a byte, got nibble {nibble:#x}"),
        }
    }

    #[test]
    fn reference_init_bytes() {
        assert_eq!(
            byte_of(CommandSet::FunctionSet(LineMode::TwoLine, Font::Font5x8)),
            0x28
        );
        assert_eq!(
            byte_of(CommandSet::DisplayOnOff {
                display: State::On,
                cursor: State::Off,
                cursor_blink: State::Off,
            }),
            0x0C
        );
        assert_eq!(byte_of(CommandSet::ClearDisplay), 0x01);
        assert_eq!(
            byte_of(CommandSet::EntryModeSet(
                MoveDirection::LeftToRight,
                ShiftType::CursorOnly
            )),
            0x06
        );
    }

    #[test]
    fn flag_bits() {
        assert_eq!(byte_of(CommandSet::ReturnHome), 0x02);
        assert_eq!(
            byte_of(CommandSet::FunctionSet(LineMode::OneLine, Font::Font5x11)),
            0x24
        );
        assert_eq!(
            byte_of(CommandSet::DisplayOnOff {
                display: State::On,
                cursor: State::On,
                cursor_blink: State::On,
            }),
            0x0F
        );
        assert_eq!(
            byte_of(CommandSet::EntryModeSet(
                MoveDirection::RightToLeft,
                ShiftType::CursorAndDisplay
            )),
            0x05
        );
        assert_eq!(
            byte_of(CommandSet::CursorOrDisplayShift(
                ShiftType::CursorAndDisplay,
                MoveDirection::LeftToRight
            )),
            0x1C
        );
        assert_eq!(
            byte_of(CommandSet::CursorOrDisplayShift(
                ShiftType::CursorOnly,
                MoveDirection::RightToLeft
            )),
            0x10
        );
    }

    #[test]
    fn addresses_are_masked_into_their_field() {
        assert_eq!(byte_of(CommandSet::SetCGRAM(24)), 0x58);
        assert_eq!(byte_of(CommandSet::SetCGRAM(0xFF)), 0x7F);
        assert_eq!(byte_of(CommandSet::SetDDRAM(0x40)), 0xC0);
        assert_eq!(byte_of(CommandSet::SetDDRAM(0xFF)), 0xFF);
    }

    #[test]
    fn register_selection() {
        let data = Command::from(CommandSet::WriteDataToRAM(0x48));
        assert_eq!(data.get_register_selection(), RegisterSelection::Data);
        assert_eq!(data.get_data(), Bits::Bit8(0x48));

        let clear = Command::from(CommandSet::ClearDisplay);
        assert_eq!(clear.get_register_selection(), RegisterSelection::Command);
    }

    #[test]
    fn handshake_nibbles() {
        let reset = Command::from(CommandSet::InterfaceReset);
        assert_eq!(reset.get_register_selection(), RegisterSelection::Command);
        assert_eq!(reset.get_data(), Bits::Bit4(0x3));
        assert_eq!(
            Command::from(CommandSet::HalfFunctionSet).get_data(),
            Bits::Bit4(0x2)
        );
    }
}
