//! HD44780 16x2 character LCD behind a PCF8574 I2C backpack
//!
//! The backpack wires the expander's low nibble to the control lines
//! (RS, RW, E, backlight) and the high nibble to DB4..DB7, so every
//! byte goes out as two strobed nibbles.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

const MASK_RS: u8 = 0x01;
const MASK_E: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

/// DDRAM address of each row start
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// Character columns
pub const LCD_COLS: u8 = 16;
/// Character rows
pub const LCD_ROWS: u8 = 2;

/// HD44780 LCD driver in 4-bit mode over I2C
pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
}

impl<I2C: I2c, D: DelayNs> Lcd1602<I2C, D> {
    /// Initialize the controller into 4-bit, 2-line mode
    ///
    /// Fails if the backpack does not acknowledge; callers should treat
    /// that as "panel absent" and carry on without it.
    pub fn new(i2c: I2C, addr: u8, delay: D) -> Result<Self, I2C::Error> {
        let mut lcd = Self { i2c, delay, addr };
        lcd.delay.delay_ms(50);
        // Magic reset dance from the HD44780 datasheet: three 8-bit
        // function-sets, then switch to 4-bit mode
        lcd.write_raw(0x30)?;
        lcd.strobe(0x30)?;
        lcd.delay.delay_ms(5);
        lcd.strobe(0x30)?;
        lcd.delay.delay_ms(1);
        lcd.strobe(0x20)?;
        lcd.delay.delay_ms(1);
        // 4-bit, 2 lines, 5x8 font; display on; clear; entry mode
        lcd.command(0x28)?;
        lcd.command(0x0C)?;
        lcd.clear()?;
        lcd.command(0x06)?;
        Ok(lcd)
    }

    fn write_raw(&mut self, data: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.addr, &[data | BACKLIGHT])
    }

    fn strobe(&mut self, data: u8) -> Result<(), I2C::Error> {
        self.write_raw(data | MASK_E)?;
        self.delay.delay_ms(1);
        self.write_raw(data & !MASK_E)?;
        self.delay.delay_ms(1);
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), I2C::Error> {
        self.write_raw(nibble)?;
        self.strobe(nibble)
    }

    fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.write_nibble(cmd & 0xF0)?;
        self.write_nibble((cmd << 4) & 0xF0)
    }

    fn write_char(&mut self, ch: u8) -> Result<(), I2C::Error> {
        self.write_nibble((ch & 0xF0) | MASK_RS)?;
        self.write_nibble(((ch << 4) & 0xF0) | MASK_RS)
    }

    /// Clear the panel and home the cursor
    pub fn clear(&mut self) -> Result<(), I2C::Error> {
        self.command(0x01)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), I2C::Error> {
        let row = row.min(LCD_ROWS - 1);
        self.command(0x80 | (col + ROW_OFFSETS[row as usize]))
    }

    /// Write ASCII text at the cursor, truncated to the panel width
    pub fn print(&mut self, text: &str) -> Result<(), I2C::Error> {
        for &b in text.as_bytes().iter().take(LCD_COLS as usize) {
            self.write_char(b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use heapless::Vec;

    /// Captures every byte written to the bus
    struct FakeI2c {
        writes: Vec<u8, 256>,
    }

    impl embedded_hal::i2c::ErrorType for FakeI2c {
        type Error = Infallible;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            _address: u8,
            operations: &mut [embedded_hal::i2c::Operation<'_>],
        ) -> Result<(), Infallible> {
            for op in operations {
                if let embedded_hal::i2c::Operation::Write(bytes) = op {
                    for &b in bytes.iter() {
                        let _ = self.writes.push(b);
                    }
                }
            }
            Ok(())
        }
    }

    struct NoopDelay;

    impl DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    #[test]
    fn test_init_keeps_backlight_on() {
        let lcd = Lcd1602::new(
            FakeI2c { writes: Vec::new() },
            0x27,
            NoopDelay,
        )
        .unwrap();
        assert!(!lcd.i2c.writes.is_empty());
        assert!(lcd.i2c.writes.iter().all(|b| b & BACKLIGHT != 0));
    }

    #[test]
    fn test_print_sets_register_select() {
        let mut lcd = Lcd1602::new(
            FakeI2c { writes: Vec::new() },
            0x27,
            NoopDelay,
        )
        .unwrap();
        lcd.i2c.writes.clear();
        lcd.print("A").unwrap();
        // Every data-phase byte carries RS
        assert!(lcd.i2c.writes.iter().all(|b| b & MASK_RS != 0));
        // 'A' = 0x41: high nibble then low nibble on DB4..DB7
        assert_eq!(lcd.i2c.writes[0] & 0xF0, 0x40);
    }
}
