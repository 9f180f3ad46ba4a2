//! SPI NOR Flash Driver
//!
//! Drives the module's 32 Mbit flash through the command sequence needed
//! before the FPGA (or the MCU) can use it: wake from deep power-down,
//! software reset, capacity check, and optionally a full chip erase.
//!
//! Each command is its own chip-select frame. The two-byte commands (reset,
//! erase) must be sent as two separate one-byte frames: the part latches the
//! enable opcode on the rising edge of chip select.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;

use crate::config::{FLASH_CAPACITY_32MBIT, FLASH_RESET_DELAY_US, FLASH_WAKE_DELAY_US};
use crate::error::{BusError, S1Error, S1Result};
use crate::hal::spi::SpiTransport;
use crate::types::JedecId;

/// Flash opcodes
pub mod opcode {
    /// Release from deep power-down
    pub const WAKE: u8 = 0xAB;
    /// Enable software reset
    pub const RESET_ENABLE: u8 = 0x66;
    /// Perform software reset
    pub const RESET: u8 = 0x99;
    /// Read capacity (JEDEC) ID
    pub const READ_ID: u8 = 0x9F;
    /// Write enable, required before erase
    pub const WRITE_ENABLE: u8 = 0x06;
    /// Erase the whole chip
    pub const CHIP_ERASE: u8 = 0x60;
    /// Read status register
    pub const READ_STATUS: u8 = 0x05;
}

/// Status register bit set while an erase or program is running
pub const STATUS_BUSY: u8 = 0x01;

/// Flash driver
pub struct Flash<S, F, D> {
    spi: SpiTransport<S, F>,
    delay: D,
}

impl<S, F, D> Flash<S, F, D>
where
    S: SpiDevice,
    F: FnOnce() -> Result<S, BusError>,
    D: DelayNs,
{
    /// Create a flash driver
    ///
    /// `delay` provides the blocking waits the part requires between commands.
    #[must_use]
    pub fn new(spi: SpiTransport<S, F>, delay: D) -> Self {
        Self { spi, delay }
    }

    /// Bring the part out of deep power-down
    ///
    /// Sends the wake opcode followed by three dummy bytes, then waits tRES1.
    pub fn wake(&mut self) -> S1Result<()> {
        self.spi.write(&[opcode::WAKE, 0, 0, 0])?;
        self.delay.delay_us(FLASH_WAKE_DELAY_US);
        Ok(())
    }

    /// Software reset, then wait tRST
    pub fn reset(&mut self) -> S1Result<()> {
        self.command(opcode::RESET_ENABLE)?;
        self.command(opcode::RESET)?;
        self.delay.delay_us(FLASH_RESET_DELAY_US);
        Ok(())
    }

    /// Read the four-byte response to the capacity-ID command
    pub fn read_id(&mut self) -> S1Result<JedecId> {
        let mut response = [0u8; 4];
        self.spi.transfer(&[opcode::READ_ID], &mut response)?;
        let id = JedecId::from_response(response);
        info!("Flash capacity = 0x{:02X}", id.capacity());
        Ok(id)
    }

    /// Check the capacity ID against the supported 32 Mbit part
    ///
    /// # Errors
    /// `FlashError` on mismatch, including an all-zero response from an
    /// absent or unpowered part.
    pub fn identify(&mut self) -> S1Result<()> {
        let id = self.read_id()?;
        if id.capacity() != FLASH_CAPACITY_32MBIT {
            warn!("Flash: unexpected {}", id);
            return Err(S1Error::FlashError);
        }
        Ok(())
    }

    /// Wake, reset and identify the part
    pub fn wake_up(&mut self) -> S1Result<()> {
        self.wake()?;
        self.reset()?;
        self.identify()
    }

    /// Start a full chip erase
    ///
    /// Returns as soon as the command is accepted. Poll [`Flash::is_busy`]
    /// until it reports `false`.
    pub fn erase_all(&mut self) -> S1Result<()> {
        self.command(opcode::WRITE_ENABLE)?;
        self.command(opcode::CHIP_ERASE)?;
        debug!("Flash: chip erase started");
        Ok(())
    }

    /// Check whether an erase or program is still running
    ///
    /// One status read per call. There is no timeout here; the caller owns
    /// the polling loop.
    pub fn is_busy(&mut self) -> S1Result<bool> {
        let mut response = [0u8; 2];
        self.spi.transfer(&[opcode::READ_STATUS], &mut response)?;
        let status = response[1];
        debug!("Status: 0x{:02X}", status);

        if status & STATUS_BUSY == 0 {
            debug!("Erase Done!");
            return Ok(false);
        }
        Ok(true)
    }

    /// Give back the transport and the delay
    pub fn release(self) -> (SpiTransport<S, F>, D) {
        (self.spi, self.delay)
    }

    fn command(&mut self, op: u8) -> S1Result<()> {
        Ok(self.spi.write(&[op])?)
    }
}
