//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the S1 module hardware.
//! All pin mappings, bus addresses, identity codes and datasheet timings are
//! centralized here.

/// PMIC 7-bit I2C address
pub const PMIC_I2C_ADDR: u8 = 0x48;

/// Expected value of the PMIC chip-ID register
pub const PMIC_CHIP_ID: u8 = 0x7A;

/// Capacity code reported by the supported 32 Mbit flash
pub const FLASH_CAPACITY_32MBIT: u8 = 0x16;

/// Flash recovery time after the wake command (tRES1)
pub const FLASH_WAKE_DELAY_US: u32 = 3;

/// Flash software reset time (tRST)
pub const FLASH_RESET_DELAY_US: u32 = 30;

/// I2C bus frequency (controller default)
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// SPI clock frequency (controller default)
pub const SPI_FREQUENCY_HZ: u32 = 4_000_000;

/// Fixed FPGA core voltage in millivolts
pub const FPGA_CORE_MILLIVOLTS: u16 = 1200;

/// Pin assignments for GPIO
pub mod pins {
    //! nRF52811 pin numbers (port 0) wired inside the S1 module
    //!
    //! These are the internal connections between the MCU, PMIC, flash
    //! and FPGA, not the module's external pinout.

    /// SPI data from flash (MISO)
    pub const SPI_SI: u8 = 8;

    /// SPI data to flash (MOSI)
    pub const SPI_SO: u8 = 11;

    /// Flash chip select (active low)
    pub const SPI_CS: u8 = 12;

    /// SPI clock
    pub const SPI_CLK: u8 = 15;

    /// FPGA reset (active low, output)
    pub const FPGA_RESET: u8 = 20;

    /// FPGA configuration done (input, pull-up)
    pub const FPGA_DONE: u8 = 16;

    /// PMIC I2C data
    pub const PMIC_SDA: u8 = 14;

    /// PMIC I2C clock
    pub const PMIC_SCL: u8 = 17;
}

/// Analog input assignments
pub mod analog {
    //! SAADC analog input channels (`AINn`) routed on the module.
    //! Not configured by this crate.

    /// General purpose analog input 1 (AIN2)
    pub const ADC1: u8 = 2;

    /// General purpose analog input 2 (AIN3)
    pub const ADC2: u8 = 3;

    /// PMIC analog multiplexer output (AIN1)
    pub const PMIC_AMUX: u8 = 1;
}
