//! S1 Module Bring-up
//!
//! Ties the drivers together. [`S1::init`] puts the FPGA in reset and checks
//! that the PMIC answers with the right identity. The flash transport is
//! stored as-is; its SPI device is only built by the first flash command.
//!
//! ```text
//! init: hold FPGA reset -> read PMIC chip ID -> ready | PmicError
//!
//! caller: set_fpga_core_rail(true) -> set_vio(..) -> release reset
//!         flash: wake -> reset -> identify [-> erase_all -> poll is_busy]
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

use crate::drivers::flash::Flash;
use crate::drivers::fpga::FpgaControl;
use crate::drivers::pmic::Pmic;
use crate::error::{BusError, S1Result};
use crate::hal::spi::SpiTransport;

/// Board resources handed to [`S1::init`]
///
/// The I2C controller must already be enabled on the PMIC pins, the reset
/// pin configured as an output and the done pin as an input with pull-up.
pub struct S1Parts<I, S, F, D, RST, DONE> {
    /// PMIC I2C controller
    pub i2c: I,
    /// Flash SPI transport (usually lazy)
    pub spi: SpiTransport<S, F>,
    /// Blocking delay for flash timing
    pub delay: D,
    /// FPGA reset output
    pub fpga_reset: RST,
    /// FPGA done input
    pub fpga_done: DONE,
}

/// Initialised S1 module
pub struct S1<I, S, F, D, RST, DONE> {
    pmic: Pmic<I>,
    flash: Flash<S, F, D>,
    fpga: FpgaControl<RST, DONE>,
}

impl<I, S, F, D, RST, DONE> S1<I, S, F, D, RST, DONE>
where
    I: I2c,
    S: SpiDevice,
    F: FnOnce() -> Result<S, BusError>,
    D: DelayNs,
    RST: OutputPin,
    DONE: InputPin,
{
    /// Bring up the module
    ///
    /// # Errors
    /// `PmicError` if the PMIC identity does not match, `Bus` on any
    /// transport failure.
    pub fn init(parts: S1Parts<I, S, F, D, RST, DONE>) -> S1Result<Self> {
        let mut fpga = FpgaControl::new(parts.fpga_reset, parts.fpga_done);
        fpga.hold_reset()?;

        let mut pmic = Pmic::new(parts.i2c);
        if let Err(err) = pmic.verify_identity() {
            error!("S1 init failed: {}", err);
            return Err(err);
        }

        info!("S1 module ready");
        Ok(Self {
            pmic,
            flash: Flash::new(parts.spi, parts.delay),
            fpga,
        })
    }

    /// PMIC rail driver
    pub fn pmic(&mut self) -> &mut Pmic<I> {
        &mut self.pmic
    }

    /// External flash driver
    pub fn flash(&mut self) -> &mut Flash<S, F, D> {
        &mut self.flash
    }

    /// FPGA reset and done lines
    pub fn fpga(&mut self) -> &mut FpgaControl<RST, DONE> {
        &mut self.fpga
    }

    /// Split back into the individual drivers
    pub fn into_parts(self) -> (Pmic<I>, Flash<S, F, D>, FpgaControl<RST, DONE>) {
        (self.pmic, self.flash, self.fpga)
    }
}
