//! Common tools

/// The state of a bit,
/// It's either [`BitState::Clear`] to represent a 0
/// or [`BitState::Set`] to represent a 1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitState {
    /// Bit is 0
    Clear,
    /// Bit is 1
    Set,
}

impl From<bool> for BitState {
    fn from(value: bool) -> Self {
        match value {
            true => BitState::Set,
            false => BitState::Clear,
        }
    }
}

/// Simple bit ops on a byte
pub trait BitOps {
    /// Set bit at `pos` to 1, and return the new value
    fn set_bit(&mut self, pos: u8) -> Self;
    /// Set bit at `pos` to 0, and return the new value
    fn clear_bit(&mut self, pos: u8) -> Self;
    /// Set or clear bit at `pos` according to `state`
    fn put_bit(&mut self, pos: u8, state: BitState) -> Self;
    /// Read bit at `pos`
    fn check_bit(&self, pos: u8) -> BitState;
}

impl BitOps for u8 {
    fn set_bit(&mut self, pos: u8) -> Self {
        debug_assert!(pos <= 7, "bit offset larger than 7");
        *self |= 1u8 << (pos & 0b111);
        *self
    }

    fn clear_bit(&mut self, pos: u8) -> Self {
        debug_assert!(pos <= 7, "bit offset larger than 7");
        *self &= !(1u8 << (pos & 0b111));
        *self
    }

    fn put_bit(&mut self, pos: u8, state: BitState) -> Self {
        match state {
            BitState::Set => self.set_bit(pos),
            BitState::Clear => self.clear_bit(pos),
        }
    }

    fn check_bit(&self, pos: u8) -> BitState {
        debug_assert!(pos <= 7, "bit offset larger than 7");
        ((*self >> (pos & 0b111)) & 1 == 1).into()
    }
}

/// Split a byte into the two halves a 4-bit bus carries
pub trait Nibbles {
    /// Upper 4 bits, shifted down
    fn high_nibble(self) -> u8;
    /// Lower 4 bits
    fn low_nibble(self) -> u8;
}

impl Nibbles for u8 {
    fn high_nibble(self) -> u8 {
        self >> 4
    }

    fn low_nibble(self) -> u8 {
        self & 0x0F
    }
}
