//! Drive LCD1602 with a STM32F411RET6, 4-bit bus, write only
//!
//! Wiring diagram
//!
//! LCD1602 <-> STM32F411RET6
//!     Vss <-> GND
//!     Vdd <-> 5V
//!      V0 <-> potentiometer <-> 5V & GND (to adjust the display contrast)
//!      RS <-> PA0
//!      RW <-> GND (the driver never reads from LCD)
//!      EN <-> PA2 (and optionally connect to a 4.7 kOhm Pulldown resistor, to stable voltage level when STM32 reset)
//!      D4 <-> PA3
//!      D5 <-> PA4
//!      D6 <-> PA5
//!      D7 <-> PA6
//!       A <-> 5V
//!       K <-> GND

#![no_std]
#![no_main]

use core::fmt::Write;

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{pac, prelude::*};

use lcd1602_bitbang::{
    command::{MoveDirection, ShiftType, State},
    lcd::{Config, Lcd},
    port::PinArray,
    sender::Pins,
};

// a heart shape
const HEART: [u8; 8] = [
    0b00000, 0b00000, 0b01010, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000,
];

// degree sign in A00 CGROM
const DEGREE: u8 = 0xDF;

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    let gpioa = dp.GPIOA.split();

    // erase pin types, so they fit in one array
    let port = PinArray::new([
        gpioa.pa0.into_push_pull_output().erase(),
        gpioa.pa2.into_push_pull_output().erase(),
        gpioa.pa3.into_push_pull_output().erase(),
        gpioa.pa4.into_push_pull_output().erase(),
        gpioa.pa5.into_push_pull_output().erase(),
        gpioa.pa6.into_push_pull_output().erase(),
    ]);

    // identifiers are indexes into the array above
    let pins = Pins::new(0, 1, 2, 3, 4, 5);

    let mut lcd = Lcd::new_4bit(port, pins, &mut delayer, Config::default())
        .expect("LCD init failed");
    rprintln!("LCD ready");

    lcd.create_glyph(1, &HEART).unwrap();

    lcd.set_cursor(0, 1).unwrap();
    lcd.print("hello, world!").unwrap();
    lcd.print_glyph(1).unwrap();

    lcd.set_cursor(1, 0).unwrap();
    write!(lcd, "temp: {}", 23).unwrap();
    lcd.print_bytes(&[DEGREE, b'C']).unwrap();

    lcd.set_display_control(State::On, State::On, State::On)
        .unwrap();

    // slide the display window back and forth
    loop {
        for dir in [MoveDirection::RightToLeft, MoveDirection::LeftToRight] {
            for _ in 0..4 {
                lcd.delay_ms(250);
                lcd.shift(ShiftType::CursorAndDisplay, dir).unwrap();
            }
        }
    }
}
