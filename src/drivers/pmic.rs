//! PMIC Rail Driver
//!
//! Controls the three regulator outputs the S1 module wires to its loads:
//!
//! - SBB1 (buck) feeds the FPGA core (`Vfpga`), fixed at 1.2 V
//! - SBB2 (buck-boost) feeds the auxiliary header supply (`Vaux`)
//! - LDO0 feeds the FPGA I/O banks (`Vio`)
//!
//! Every write replaces the whole register. Mode, discharge and current
//! limit bits travel with each write as fixed patterns, so there is no
//! read-modify-write anywhere in this driver.

use embedded_hal::i2c::I2c;

use crate::config::PMIC_CHIP_ID;
use crate::error::{S1Error, S1Result};
use crate::hal::i2c::{I2cAddress, I2cBus};
use crate::types::{Rail, RailCommand, RailLimits, Voltage};

/// PMIC register map, grouped per rail
pub mod regs {
    /// Identification
    pub mod chip {
        /// Chip ID register
        pub const ID: u8 = 0x14;
    }

    /// SBB1, FPGA core supply
    pub mod vfpga {
        /// Target voltage register
        pub const TARGET: u8 = 0x2B;
        /// Control register
        pub const CONTROL: u8 = 0x2C;
        /// Target code for 1.2 V (buck encoding, 50 mV/LSB from 0.8 V)
        pub const TARGET_1V2: u8 = 0x08;
        /// Enabled, buck mode, 0.333 A limit, discharge resistor on
        pub const ENABLE: u8 = 0x7E;
        /// Disabled, same mode and limit bits as [`ENABLE`]
        pub const DISABLE: u8 = 0x7C;
    }

    /// SBB2, auxiliary supply
    pub mod vaux {
        /// Target voltage register
        pub const TARGET: u8 = 0x2D;
        /// Control register
        pub const CONTROL: u8 = 0x2E;
        /// Enabled, buck-boost mode, 1 A limit, discharge resistor on
        pub const ENABLE: u8 = 0x0E;
        /// Disabled, discharge resistor on
        pub const DISABLE: u8 = 0x0C;
        /// Above this the I/O rail must not be in load-switch mode
        pub const LOAD_SWITCH_LIMIT_MV: u16 = 3460;
        /// [`LOAD_SWITCH_LIMIT_MV`] for requests given in volts
        pub const LOAD_SWITCH_LIMIT_V: f32 = 3.46;
    }

    /// LDO0, FPGA I/O supply
    pub mod vio {
        /// Target voltage register
        pub const TARGET: u8 = 0x38;
        /// Control register
        pub const CONTROL: u8 = 0x39;
        /// Enabled, LDO regulator mode, discharge resistor on
        pub const ENABLE: u8 = 0x0E;
        /// Disabled, discharge resistor on
        pub const DISABLE: u8 = 0x0C;
        /// Control register bit checked for load-switch mode
        pub const LOAD_SWITCH_MODE: u8 = 0x08;
    }
}

/// PMIC driver
pub struct Pmic<I> {
    bus: I2cBus<I>,
    addr: I2cAddress,
}

impl<I: I2c> Pmic<I> {
    /// Create a new PMIC driver on its fixed address
    #[must_use]
    pub fn new(i2c: I) -> Self {
        Self {
            bus: I2cBus::new(i2c),
            addr: I2cAddress::PMIC,
        }
    }

    /// Read the chip ID register
    pub fn chip_id(&mut self) -> S1Result<u8> {
        Ok(self.bus.read_reg(self.addr, regs::chip::ID)?)
    }

    /// Check that the expected PMIC is answering
    ///
    /// # Errors
    /// `PmicError` if the chip ID does not match, `Bus` if the read fails.
    pub fn verify_identity(&mut self) -> S1Result<()> {
        let id = self.chip_id()?;
        if id != PMIC_CHIP_ID {
            warn!("PMIC chip ID 0x{:02X}, expected 0x{:02X}", id, PMIC_CHIP_ID);
            return Err(S1Error::PmicError);
        }
        debug!("PMIC chip ID 0x{:02X}", id);
        Ok(())
    }

    /// Check whether LDO0 is currently configured as a load switch
    ///
    /// Reads live hardware state.
    pub fn vio_in_load_switch_mode(&mut self) -> S1Result<bool> {
        let control = self.bus.read_reg(self.addr, regs::vio::CONTROL)?;
        Ok(control & regs::vio::LOAD_SWITCH_MODE != 0)
    }

    /// Set the auxiliary rail voltage
    ///
    /// `0.0` turns the rail off. Otherwise the voltage must be within
    /// 0.8 V to 5.5 V, and above 3.46 V only while LDO0 is not a load switch.
    /// The limit is compared against `volts` as requested, before encoding.
    ///
    /// # Errors
    /// `InvalidSetting` before any write if the request is rejected.
    pub fn set_vaux(&mut self, volts: f32) -> S1Result<()> {
        let command = RailCommand::parse(volts, &RailLimits::VAUX).inspect_err(|_| {
            warn!("Vaux: rejected out-of-range request");
        })?;
        match command {
            RailCommand::Off => self.apply_vaux(RailCommand::Off),
            RailCommand::On(_) => {
                let code = RailLimits::VAUX.encode_volts(volts)?;
                self.enable_vaux(code, volts > regs::vaux::LOAD_SWITCH_LIMIT_V)
            }
        }
    }

    /// Apply a typed command to the auxiliary rail
    pub fn apply_vaux(&mut self, command: RailCommand) -> S1Result<()> {
        match command {
            RailCommand::Off => self.write_control(Rail::Vaux, regs::vaux::CONTROL, regs::vaux::DISABLE),
            RailCommand::On(voltage) => {
                let code = RailLimits::VAUX.encode(voltage)?;
                let limit = Voltage::from_millivolts(regs::vaux::LOAD_SWITCH_LIMIT_MV);
                self.enable_vaux(code, voltage > limit)
            }
        }
    }

    /// Set the FPGA I/O rail voltage
    ///
    /// `0.0` turns the rail off. Otherwise the voltage must be within
    /// 0.8 V to 3.46 V.
    ///
    /// # Errors
    /// `InvalidSetting` before any write if the request is rejected.
    pub fn set_vio(&mut self, volts: f32) -> S1Result<()> {
        let command = RailCommand::parse(volts, &RailLimits::VIO).inspect_err(|_| {
            warn!("Vio: rejected out-of-range request");
        })?;
        match command {
            RailCommand::Off => self.apply_vio(RailCommand::Off),
            RailCommand::On(_) => {
                let code = RailLimits::VIO.encode_volts(volts)?;
                self.enable_vio(code)
            }
        }
    }

    /// Apply a typed command to the FPGA I/O rail
    pub fn apply_vio(&mut self, command: RailCommand) -> S1Result<()> {
        match command {
            RailCommand::Off => self.write_control(Rail::Vio, regs::vio::CONTROL, regs::vio::DISABLE),
            RailCommand::On(voltage) => {
                let code = RailLimits::VIO.encode(voltage)?;
                self.enable_vio(code)
            }
        }
    }

    /// Switch the FPGA core rail
    ///
    /// The 1.2 V target is rewritten on every call. Turning the rail off
    /// first turns off `Vio`, so the I/O banks are never powered while the
    /// core is not. That `Vio` write happens even if `Vio` is already off.
    pub fn set_fpga_core_rail(&mut self, enable: bool) -> S1Result<()> {
        self.write_target(Rail::Vfpga, regs::vfpga::TARGET, regs::vfpga::TARGET_1V2)?;

        if enable {
            return self.write_control(Rail::Vfpga, regs::vfpga::CONTROL, regs::vfpga::ENABLE);
        }

        self.write_control(Rail::Vio, regs::vio::CONTROL, regs::vio::DISABLE)?;
        self.write_control(Rail::Vfpga, regs::vfpga::CONTROL, regs::vfpga::DISABLE)
    }

    /// Give back the I2C handle
    pub fn release(self) -> I {
        self.bus.into_inner()
    }

    /// Interlock check, then target and enable writes
    fn enable_vaux(&mut self, code: u8, above_load_switch_limit: bool) -> S1Result<()> {
        if above_load_switch_limit && self.vio_in_load_switch_mode()? {
            warn!("Vaux: code 0x{:02X} refused while LDO0 is in load-switch mode", code);
            return Err(S1Error::InvalidSetting);
        }
        self.write_target(Rail::Vaux, regs::vaux::TARGET, code)?;
        self.write_control(Rail::Vaux, regs::vaux::CONTROL, regs::vaux::ENABLE)
    }

    fn enable_vio(&mut self, code: u8) -> S1Result<()> {
        self.write_target(Rail::Vio, regs::vio::TARGET, code)?;
        self.write_control(Rail::Vio, regs::vio::CONTROL, regs::vio::ENABLE)
    }

    fn write_target(&mut self, rail: Rail, reg: u8, code: u8) -> S1Result<()> {
        debug!("{}: target code 0x{:02X}", rail, code);
        Ok(self.bus.write_reg(self.addr, reg, code)?)
    }

    fn write_control(&mut self, rail: Rail, reg: u8, pattern: u8) -> S1Result<()> {
        self.bus.write_reg(self.addr, reg, pattern)?;
        info!("{}: control 0x{:02X}", rail, pattern);
        Ok(())
    }
}
