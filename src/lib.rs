/*!
# LCD 1602 Bit-Bang Driver

Drive a HD44780 compatible character LCD over a 4-bit bus, with six plain output pins.

The bus is write only (RW tied to ground), busy flag is never polled,
every instruction is followed by the worst case delay from datasheet instead.

Basic Usage:

1. Collect six output pins into something implementing [`port::OutputPort`] <br/>
    [`port::PinArray`] does it for any embedded-hal `OutputPin`s.
<br/>
<br/>
2. Use [`lcd::Lcd::new_4bit()`] to create a [`lcd::Lcd`], and initialize LCD1602 hardware
<br/>
<br/>
3. use any methods provide by [`lcd::Lcd`] to control LCD1602

```
# use core::convert::Infallible;
# use embedded_hal::{delay::DelayNs, digital::{ErrorType, OutputPin}};
# struct Pin;
# impl ErrorType for Pin { type Error = Infallible; }
# impl OutputPin for Pin {
#     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
#     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
# }
# struct Delay;
# impl DelayNs for Delay { fn delay_ns(&mut self, _ns: u32) {} }
use lcd1602_bitbang::{
    lcd::{Config, Lcd},
    port::PinArray,
    sender::Pins,
};

let port = PinArray::new([Pin, Pin, Pin, Pin, Pin, Pin]);
let pins = Pins::new(0, 1, 2, 3, 4, 5);

let mut lcd = Lcd::new_4bit(port, pins, Delay, Config::default()).unwrap();
lcd.set_cursor(1, 3).unwrap();
lcd.print("hello").unwrap();
```
*/

#![no_std]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod lcd;
pub mod port;
pub mod sender;
pub mod utils;

#[cfg(test)]
mod mock;
