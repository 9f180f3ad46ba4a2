//! S1 Module Firmware
//!
//! Entry point for the nRF52811 on the S1 module. Builds the board
//! peripherals, brings the module up, powers the FPGA rails and checks the
//! external flash.

#![no_std]
#![no_main]

use core::convert::Infallible;

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::spim::{self, Spim};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Delay, Duration, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use {defmt_rtt as _, panic_probe as _};

use s1_module::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    TWI0_SPI1 => twim::InterruptHandler<peripherals::TWISPI0>;
    SPI0 => spim::InterruptHandler<peripherals::SPI0>;
});

/// I/O rail voltage used for the bring-up check
const VIO_BRING_UP_VOLTS: f32 = 3.0;

const fn spim_frequency(hz: u32) -> spim::Frequency {
    match hz {
        8_000_000 => spim::Frequency::M8,
        4_000_000 => spim::Frequency::M4,
        2_000_000 => spim::Frequency::M2,
        1_000_000 => spim::Frequency::M1,
        _ => spim::Frequency::K500,
    }
}

const fn twim_frequency(hz: u32) -> twim::Frequency {
    match hz {
        400_000 => twim::Frequency::K400,
        250_000 => twim::Frequency::K250,
        _ => twim::Frequency::K100,
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("S1 Module Firmware v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_nrf::init(Default::default());

    // Low on reset holds the FPGA in reset until released
    // pins::FPGA_RESET = P0.20, pins::FPGA_DONE = P0.16
    let fpga_reset = Output::new(p.P0_20, Level::Low, OutputDrive::Standard);
    let fpga_done = Input::new(p.P0_16, Pull::Up);

    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim_frequency(I2C_FREQUENCY_HZ);
    // pins::PMIC_SDA = P0.14, pins::PMIC_SCL = P0.17
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_14, p.P0_17, i2c_config);

    info!("I2C initialized, PMIC at 0x{:02X}", PMIC_I2C_ADDR);

    // Not built until the first flash command
    // pins::SPI_CLK = P0.15, SPI_SI (MISO) = P0.08, SPI_SO (MOSI) = P0.11, SPI_CS = P0.12
    let (spi_periph, sck, miso, mosi, cs) = (p.SPI0, p.P0_15, p.P0_08, p.P0_11, p.P0_12);
    let spi = SpiTransport::new(move || {
        let mut config = spim::Config::default();
        config.frequency = spim_frequency(SPI_FREQUENCY_HZ);
        config.mode = spim::MODE_0;
        let bus = Spim::new(spi_periph, Irqs, sck, miso, mosi, config);
        let cs = Output::new(cs, Level::High, OutputDrive::Standard);
        ExclusiveDevice::new(bus, cs, Delay).map_err(|e: Infallible| match e {})
    });

    let parts = S1Parts {
        i2c,
        spi,
        delay: Delay,
        fpga_reset,
        fpga_done,
    };

    let mut s1 = match S1::init(parts) {
        Ok(s1) => s1,
        Err(err) => halt(err).await,
    };

    if let Err(err) = bring_up(&mut s1) {
        if err.is_fatal() {
            defmt::panic!("bus failure during bring-up: {}", err);
        }
        warn!("Bring-up incomplete: {}", err);
    }

    loop {
        Timer::after(Duration::from_secs(10)).await;
        match s1.fpga().is_configured() {
            Ok(done) => info!("FPGA done = {}", done),
            Err(err) => error!("FPGA done read failed: {}", err),
        }
    }
}

/// Power the FPGA rails in order and check the flash
fn bring_up<I, S, F, D, RST, DONE>(s1: &mut S1<I, S, F, D, RST, DONE>) -> S1Result<()>
where
    I: embedded_hal::i2c::I2c,
    S: embedded_hal::spi::SpiDevice,
    F: FnOnce() -> Result<S, BusError>,
    D: embedded_hal::delay::DelayNs,
    RST: embedded_hal::digital::OutputPin,
    DONE: embedded_hal::digital::InputPin,
{
    s1.pmic().set_fpga_core_rail(true)?;
    s1.pmic().set_vio(VIO_BRING_UP_VOLTS)?;
    s1.flash().wake_up()?;
    info!("Flash identified");
    Ok(())
}

/// Park after a failed init
async fn halt(err: S1Error) -> ! {
    error!("S1 init failed: {}", err);
    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}
