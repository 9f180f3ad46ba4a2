//! Error types
//!
//! Every fallible operation in this crate returns [`S1Result`]. The status
//! surface is deliberately small: validation, identity checks and transport
//! failures are the only things that can go wrong at this layer.

use embedded_hal::{digital, i2c, spi};
use thiserror::Error;

/// Result type used throughout the crate
pub type S1Result<T> = Result<T, S1Error>;

/// Failure reported by a bus controller or GPIO port
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BusError {
    /// I2C transfer to the PMIC failed
    #[error("I2C transfer failed: {0:?}")]
    I2c(i2c::ErrorKind),
    /// SPI transfer to the flash failed
    #[error("SPI transfer failed: {0:?}")]
    Spi(spi::ErrorKind),
    /// GPIO pin could not be driven or read
    #[error("GPIO access failed: {0:?}")]
    Gpio(digital::ErrorKind),
}

impl BusError {
    /// Convert any `embedded-hal` I2C error
    pub fn i2c<E: i2c::Error>(err: &E) -> Self {
        Self::I2c(err.kind())
    }

    /// Convert any `embedded-hal` SPI error
    pub fn spi<E: spi::Error>(err: &E) -> Self {
        Self::Spi(err.kind())
    }

    /// Convert any `embedded-hal` GPIO error
    pub fn gpio<E: digital::Error>(err: &E) -> Self {
        Self::Gpio(err.kind())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for BusError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::I2c(kind) => defmt::write!(f, "I2C({})", kind),
            Self::Spi(kind) => defmt::write!(f, "SPI({})", kind),
            Self::Gpio(kind) => defmt::write!(f, "GPIO({})", kind),
        }
    }
}

/// S1 module status
///
/// `Ok(())` plays the role of the success code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum S1Error {
    /// Requested voltage is out of range or violates a rail interlock.
    /// Nothing was written to the PMIC.
    #[error("invalid setting")]
    InvalidSetting,
    /// PMIC did not identify itself with the expected chip ID
    #[error("PMIC error")]
    PmicError,
    /// Flash did not report the expected capacity ID
    #[error("flash error")]
    FlashError,
    /// Bus transport failure. Unrecoverable at this layer; never retried.
    #[error(transparent)]
    Bus(#[from] BusError),
}

impl S1Error {
    /// True for transport failures, which firmware treats as fatal
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Bus(_))
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for S1Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::InvalidSetting => defmt::write!(f, "InvalidSetting"),
            Self::PmicError => defmt::write!(f, "PmicError"),
            Self::FlashError => defmt::write!(f, "FlashError"),
            Self::Bus(err) => defmt::write!(f, "Bus({})", err),
        }
    }
}
