//! Digital output capability the driver toggles pins through
//!
//! Pins are addressed by an opaque identifier, the driver never looks inside it.
//! [`PinArray`] adapts a set of embedded-hal [`OutputPin`]s, using their index
//! in the array as identifier.

use embedded_hal::digital::OutputPin;

use crate::error::PortError;

/// A bank of digital outputs addressed by identifier
pub trait OutputPort {
    /// Pin identifier
    type Pin: Copy + PartialEq + core::fmt::Debug;
    /// Whatever the hardware reports when a pin operation fails
    type Error: core::fmt::Debug;

    /// Put a pin into output mode, called once per pin before any other use
    fn configure_output(&mut self, pin: Self::Pin) -> Result<(), Self::Error>;

    /// Drive a pin high
    fn set_high(&mut self, pin: Self::Pin) -> Result<(), Self::Error>;

    /// Drive a pin low
    fn set_low(&mut self, pin: Self::Pin) -> Result<(), Self::Error>;

    /// Drive a pin high or low
    fn set_state(&mut self, pin: Self::Pin, high: bool) -> Result<(), Self::Error> {
        match high {
            true => self.set_high(pin),
            false => self.set_low(pin),
        }
    }
}

impl<T: OutputPort + ?Sized> OutputPort for &mut T {
    type Pin = T::Pin;
    type Error = T::Error;

    fn configure_output(&mut self, pin: Self::Pin) -> Result<(), Self::Error> {
        (**self).configure_output(pin)
    }

    fn set_high(&mut self, pin: Self::Pin) -> Result<(), Self::Error> {
        (**self).set_high(pin)
    }

    fn set_low(&mut self, pin: Self::Pin) -> Result<(), Self::Error> {
        (**self).set_low(pin)
    }
}

/// `N` embedded-hal output pins, addressed by index
///
/// Pins coming out of a HAL are already outputs by type, so
/// [`OutputPort::configure_output`] only checks the index.
/// Pins of different types can be put together after erasing them
/// (most HALs offer an `erase()` or `degrade()`).
pub struct PinArray<P, const N: usize> {
    pins: [P; N],
}

impl<P: OutputPin, const N: usize> PinArray<P, N> {
    /// Take ownership of the pins
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Give the pins back
    pub fn release(self) -> [P; N] {
        self.pins
    }

    fn pin_mut(&mut self, index: usize) -> Result<&mut P, PortError<P::Error>> {
        self.pins.get_mut(index).ok_or(PortError::UnknownPin(index))
    }
}

impl<P: OutputPin, const N: usize> OutputPort for PinArray<P, N> {
    type Pin = usize;
    type Error = PortError<P::Error>;

    fn configure_output(&mut self, pin: usize) -> Result<(), Self::Error> {
        self.pin_mut(pin).map(|_| ())
    }

    fn set_high(&mut self, pin: usize) -> Result<(), Self::Error> {
        self.pin_mut(pin)?.set_high().map_err(PortError::Pin)
    }

    fn set_low(&mut self, pin: usize) -> Result<(), Self::Error> {
        self.pin_mut(pin)?.set_low().map_err(PortError::Pin)
    }
}
