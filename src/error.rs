//! Error type of [`PinArray`](crate::port::PinArray)
//!
//! The driver itself defines no errors: the controller can't report anything,
//! so every `Result` in this crate carries the error type of whatever
//! [`OutputPort`](crate::port::OutputPort) the driver was built on.

/// Errors raised by [`PinArray`](crate::port::PinArray)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortError<E> {
    /// The underlying embedded-hal pin failed
    Pin(E),
    /// Pin identifier is not an index into the array
    UnknownPin(usize),
}

impl<E: core::fmt::Debug> core::fmt::Display for PortError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(err) => write!(f, "Pin error: {err:?}"),
            Self::UnknownPin(index) => write!(f, "Unknown pin: {index}"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for PortError<E> {}
