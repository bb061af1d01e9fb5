use embedded_hal::delay::DelayNs;
use log::debug;

use crate::{
    command::{CommandSet, Font, LineMode, MoveDirection, ShiftType, State},
    lcd::Lcd,
    port::OutputPort,
    sender::{ParallelSender, Pins, SendCommand},
};

/// Wait after power on, until supply voltage is high enough, in milliseconds
pub const POWER_ON_DELAY_MS: u32 = 50;

/// Waits after each of the three interface reset nibbles, in milliseconds
pub const INTERFACE_RESET_DELAYS_MS: [u32; 3] = [5, 5, 1];

/// Widest line DDRAM holds in two line mode
const MAX_COLUMNS: u8 = 40;

/// [`Config`] is the init config of a [`Lcd`]
///
/// Default is a 16x2 LCD1602 with 5x8 font, display on, no cursor, writing left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    line: LineMode,
    font: Font,
    display_on: State,
    cursor_on: State,
    cursor_blink: State,
    direction: MoveDirection,
    shift_type: ShiftType,
    columns: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line: LineMode::TwoLine,
            font: Font::Font5x8,
            display_on: State::On,
            cursor_on: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::LeftToRight,
            shift_type: ShiftType::CursorOnly,
            columns: 16,
        }
    }
}

#[allow(missing_docs)]
impl Config {
    pub fn get_line_mode(&self) -> LineMode {
        self.line
    }

    pub fn set_line_mode(mut self, line: LineMode) -> Self {
        self.line = line;
        self
    }

    /// Visible rows, follows line mode
    pub fn get_rows(&self) -> u8 {
        match self.line {
            LineMode::OneLine => 1,
            LineMode::TwoLine => 2,
        }
    }

    pub fn get_columns(&self) -> u8 {
        self.columns
    }

    /// Visible characters per row, clamped to 1..=40
    pub fn set_columns(mut self, columns: u8) -> Self {
        self.columns = columns.clamp(1, MAX_COLUMNS);
        self
    }

    pub fn get_font(&self) -> Font {
        self.font
    }

    /// Note: controller ignores 5x11 font in two line mode
    pub fn set_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn get_display_state(&self) -> State {
        self.display_on
    }

    pub fn set_display_state(mut self, display: State) -> Self {
        self.display_on = display;
        self
    }

    pub fn get_cursor_state(&self) -> State {
        self.cursor_on
    }

    pub fn set_cursor_state(mut self, cursor: State) -> Self {
        self.cursor_on = cursor;
        self
    }

    pub fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub fn set_cursor_blink(mut self, blink: State) -> Self {
        self.cursor_blink = blink;
        self
    }

    pub fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub fn set_direction(mut self, dir: MoveDirection) -> Self {
        self.direction = dir;
        self
    }

    pub fn get_shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub fn set_shift_type(mut self, shift: ShiftType) -> Self {
        self.shift_type = shift;
        self
    }
}

impl<Sender, Delayer> Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Create a [`Lcd`] driver, and init LCD hardware
    ///
    /// Controller state after power on is unknown, it may even be in 8-bit mode,
    /// so the reset sequence from datasheet runs first, timed by delays only.
    pub fn new(
        mut sender: Sender,
        mut delayer: Delayer,
        config: Config,
    ) -> Result<Self, Sender::Error> {
        debug!(
            "init LCD {}x{}",
            config.get_columns(),
            config.get_rows()
        );

        sender.init_bus()?;
        delayer.delay_ms(POWER_ON_DELAY_MS);

        for delay_ms in INTERFACE_RESET_DELAYS_MS {
            sender.send_and_delay(CommandSet::InterfaceReset, &mut delayer, delay_ms)?;
        }

        // from here on, every transfer is two nibbles
        sender.send(CommandSet::HalfFunctionSet, &mut delayer)?;
        debug!("LCD in 4-bit mode");

        sender.send(
            CommandSet::FunctionSet(config.get_line_mode(), config.get_font()),
            &mut delayer,
        )?;

        sender.send(
            CommandSet::DisplayOnOff {
                display: config.get_display_state(),
                cursor: config.get_cursor_state(),
                cursor_blink: config.get_cursor_blink(),
            },
            &mut delayer,
        )?;

        let mut lcd = Lcd {
            sender,
            delayer,
            rows: config.get_rows(),
            columns: config.get_columns(),
        };

        lcd.clear()?;
        lcd.set_entry_mode(config.get_direction(), config.get_shift_type())?;

        debug!("LCD ready");
        Ok(lcd)
    }
}

impl<Port, Delayer> Lcd<ParallelSender<Port>, Delayer>
where
    Port: OutputPort,
    Delayer: DelayNs,
{
    /// Init a LCD wired to six pins of `port`
    pub fn new_4bit(
        port: Port,
        pins: Pins<Port::Pin>,
        delayer: Delayer,
        config: Config,
    ) -> Result<Self, Port::Error> {
        Self::new(ParallelSender::new(port, pins), delayer, config)
    }
}
