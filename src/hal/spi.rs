//! SPI Transport
//!
//! Full-duplex transfers to the external flash. The SPI device is built on
//! first use rather than at module bring-up, so boards that never touch the
//! flash never claim the SPI peripheral.

use embedded_hal::spi::{ErrorKind, Operation, SpiDevice};

use crate::error::BusError;

/// SPI operation result
pub type SpiResult<T> = Result<T, BusError>;

/// Lazily initialised SPI device
///
/// `F` builds the device the first time a transfer is issued. Later
/// transfers reuse it, so repeated use never re-runs the factory.
pub struct SpiTransport<S, F = fn() -> Result<S, BusError>> {
    factory: Option<F>,
    device: Option<S>,
}

impl<S, F> SpiTransport<S, F>
where
    S: SpiDevice,
    F: FnOnce() -> Result<S, BusError>,
{
    /// Create a transport that builds its device on first transfer
    #[must_use]
    pub const fn new(factory: F) -> Self {
        Self {
            factory: Some(factory),
            device: None,
        }
    }

    /// Check whether the device has been built
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.device.is_some()
    }

    /// Get the device, building it if this is the first use
    fn device(&mut self) -> SpiResult<&mut S> {
        if self.device.is_none() {
            // A factory that failed once is gone; the transport stays unusable.
            let factory = self.factory.take().ok_or(BusError::Spi(ErrorKind::Other))?;
            debug!("spi: initialising controller");
            self.device = Some(factory()?);
        }
        self.device.as_mut().ok_or(BusError::Spi(ErrorKind::Other))
    }

    /// Send bytes in one chip-select frame, discarding what is clocked in
    pub fn write(&mut self, tx: &[u8]) -> SpiResult<()> {
        trace!("spi W {=[u8]:x}", tx);
        self.device()?
            .transaction(&mut [Operation::Write(tx)])
            .map_err(|e| BusError::spi(&e))
    }

    /// Full-duplex transfer in one chip-select frame
    ///
    /// The frame lasts `max(tx.len(), rx.len())` bytes. `rx[0]` is the byte
    /// clocked in alongside `tx[0]`.
    pub fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> SpiResult<()> {
        self.device()?
            .transaction(&mut [Operation::Transfer(&mut *rx, tx)])
            .map_err(|e| BusError::spi(&e))?;
        trace!("spi T {=[u8]:x} -> {=[u8]:x}", tx, rx);
        Ok(())
    }

    /// Give back the device, if it was ever built
    pub fn into_inner(self) -> Option<S> {
        self.device
    }
}

impl<S: SpiDevice> SpiTransport<S> {
    /// Create a transport around a device that is already initialised
    #[must_use]
    pub const fn ready(device: S) -> Self {
        Self {
            factory: None,
            device: Some(device),
        }
    }
}
