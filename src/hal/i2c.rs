//! I2C Bus Abstractions
//!
//! Byte-addressed register access for the PMIC. Blocking: every call runs to
//! completion or reports the controller's failure.

use embedded_hal::i2c::I2c;

use crate::error::BusError;

/// I2C operation result
pub type I2cResult<T> = Result<T, BusError>;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// Power management IC address
    pub const PMIC: Self = Self(crate::config::PMIC_I2C_ADDR);

    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// I2C bus wrapper owning the controller handle
pub struct I2cBus<I> {
    i2c: I,
}

impl<I: I2c> I2cBus<I> {
    /// Create a new I2C bus wrapper
    #[must_use]
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Write a single register: one `[reg, value]` transfer
    pub fn write_reg(&mut self, addr: I2cAddress, reg: u8, value: u8) -> I2cResult<()> {
        trace!("i2c {} W 0x{:02X} <- 0x{:02X}", addr, reg, value);
        self.i2c
            .write(addr.addr(), &[reg, value])
            .map_err(|e| BusError::i2c(&e))
    }

    /// Read a single register: address write and data read in one combined transaction
    pub fn read_reg(&mut self, addr: I2cAddress, reg: u8) -> I2cResult<u8> {
        let mut buf = [0u8];
        self.i2c
            .write_read(addr.addr(), &[reg], &mut buf)
            .map_err(|e| BusError::i2c(&e))?;
        trace!("i2c {} R 0x{:02X} -> 0x{:02X}", addr, reg, buf[0]);
        Ok(buf[0])
    }

    /// Give back the controller handle
    pub fn into_inner(self) -> I {
        self.i2c
    }
}
