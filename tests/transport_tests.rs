//! Bus Transport Tests
//!
//! Tests for the I2C register wrapper and the lazily built SPI transport.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test transport_tests

use std::cell::Cell;
use std::convert::Infallible;

use embedded_hal::i2c::ErrorKind as I2cErrorKind;
use embedded_hal::spi::{self, ErrorKind as SpiErrorKind, Operation, SpiDevice};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

use s1_module::hal::i2c::{I2cAddress, I2cBus};
use s1_module::hal::spi::SpiTransport;
use s1_module::BusError;

// =============================================================================
// Test Doubles
// =============================================================================

/// SPI device that counts frames and answers transfers with a fixed byte
struct CountingSpi {
    frames: usize,
    fill: u8,
}

impl spi::ErrorType for CountingSpi {
    type Error = Infallible;
}

impl SpiDevice for CountingSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        self.frames += 1;
        for op in operations {
            if let Operation::Transfer(rx, _) = op {
                rx.fill(self.fill);
            }
        }
        Ok(())
    }
}

/// SPI device whose every transaction fails
struct BrokenSpi;

impl spi::ErrorType for BrokenSpi {
    type Error = SpiErrorKind;
}

impl SpiDevice for BrokenSpi {
    fn transaction(&mut self, _operations: &mut [Operation<'_, u8>]) -> Result<(), SpiErrorKind> {
        Err(SpiErrorKind::ModeFault)
    }
}

// =============================================================================
// I2C Address Tests
// =============================================================================

#[test]
fn test_i2c_address_masks_to_7bit() {
    assert_eq!(I2cAddress::new(0xC8).addr(), 0x48);
    assert_eq!(I2cAddress::PMIC.addr(), 0x48);
}

// =============================================================================
// I2C Register Tests
// =============================================================================

#[test]
fn test_write_reg_is_single_two_byte_write() {
    let expectations = [I2cTransaction::write(0x48, vec![0x38, 0x58])];
    let mut i2c = I2cMock::new(&expectations);

    let mut bus = I2cBus::new(i2c.clone());
    bus.write_reg(I2cAddress::PMIC, 0x38, 0x58).unwrap();

    i2c.done();
}

#[test]
fn test_read_reg_is_combined_write_read() {
    let expectations = [I2cTransaction::write_read(0x48, vec![0x14], vec![0x7A])];
    let mut i2c = I2cMock::new(&expectations);

    let mut bus = I2cBus::new(i2c.clone());
    assert_eq!(bus.read_reg(I2cAddress::PMIC, 0x14).unwrap(), 0x7A);

    i2c.done();
}

#[test]
fn test_i2c_error_maps_to_bus_error() {
    let expectations =
        [I2cTransaction::write(0x48, vec![0x2E, 0x0C]).with_error(I2cErrorKind::Other)];
    let mut i2c = I2cMock::new(&expectations);

    let mut bus = I2cBus::new(i2c.clone());
    assert_eq!(
        bus.write_reg(I2cAddress::PMIC, 0x2E, 0x0C),
        Err(BusError::I2c(I2cErrorKind::Other))
    );

    i2c.done();
}

// =============================================================================
// Lazy SPI Tests
// =============================================================================

#[test]
fn test_spi_factory_not_run_until_first_transfer() {
    let built = Cell::new(0);
    let spi = SpiTransport::new(|| {
        built.set(built.get() + 1);
        Ok(CountingSpi { frames: 0, fill: 0 })
    });

    assert!(!spi.is_initialized());
    assert_eq!(built.get(), 0);
}

#[test]
fn test_spi_factory_runs_once() {
    let built = Cell::new(0);
    let mut spi = SpiTransport::new(|| {
        built.set(built.get() + 1);
        Ok(CountingSpi { frames: 0, fill: 0xA5 })
    });

    spi.write(&[0x06]).unwrap();
    assert!(spi.is_initialized());

    let mut rx = [0u8; 2];
    spi.transfer(&[0x05], &mut rx).unwrap();
    spi.write(&[0x60]).unwrap();

    assert_eq!(built.get(), 1);
    assert_eq!(rx, [0xA5, 0xA5]);
    assert_eq!(spi.into_inner().unwrap().frames, 3);
}

#[test]
fn test_spi_failed_factory_leaves_transport_unusable() {
    let mut spi: SpiTransport<CountingSpi, _> =
        SpiTransport::new(|| Err(BusError::Spi(SpiErrorKind::Other)));

    assert_eq!(spi.write(&[0xAB]), Err(BusError::Spi(SpiErrorKind::Other)));
    assert!(!spi.is_initialized());

    // The factory is consumed; later commands fail without retrying it
    assert_eq!(spi.write(&[0xAB]), Err(BusError::Spi(SpiErrorKind::Other)));
    assert!(spi.into_inner().is_none());
}

#[test]
fn test_spi_ready_is_initialized() {
    let spi = SpiTransport::ready(CountingSpi { frames: 0, fill: 0 });
    assert!(spi.is_initialized());
}

#[test]
fn test_spi_error_maps_to_bus_error() {
    let mut spi = SpiTransport::ready(BrokenSpi);
    let mut rx = [0u8; 4];

    assert_eq!(
        spi.transfer(&[0x9F], &mut rx),
        Err(BusError::Spi(SpiErrorKind::ModeFault))
    );
}

#[test]
fn test_spi_frames_match_mock() {
    let expectations = [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0xAB, 0x00, 0x00, 0x00]),
        SpiTransaction::transaction_end(),
        SpiTransaction::transaction_start(),
        SpiTransaction::transfer(vec![0x05], vec![0xFF, 0x01]),
        SpiTransaction::transaction_end(),
    ];
    let mut mock = SpiMock::new(&expectations);

    let mut spi = SpiTransport::ready(mock.clone());
    spi.write(&[0xAB, 0x00, 0x00, 0x00]).unwrap();

    let mut rx = [0u8; 2];
    spi.transfer(&[0x05], &mut rx).unwrap();
    assert_eq!(rx, [0xFF, 0x01]);

    mock.done();
}
