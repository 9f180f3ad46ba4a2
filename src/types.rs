//! Shared types used across the S1 drivers
//!
//! This module defines domain-specific types that enforce invariants
//! before anything reaches a PMIC register.

use core::fmt;
#[cfg(feature = "embedded")]
use micromath::F32Ext;

use crate::error::S1Error;

/// Voltage in millivolts
///
/// Register encodings are linear in millivolts, so the value is kept as an
/// integer to make the encode formula exact. Requests given in volts are
/// encoded with [`RailLimits::encode_volts`] instead, which rounds once.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Voltage(u16);

impl Voltage {
    /// Zero volts
    pub const ZERO: Self = Self(0);

    /// Create from millivolts
    #[must_use]
    pub const fn from_millivolts(mv: u16) -> Self {
        Self(mv)
    }

    /// Create from volts, rounded to the nearest millivolt
    ///
    /// Returns `None` for NaN, negative values and anything above 65.535 V.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_volts(volts: f32) -> Option<Self> {
        if volts.is_nan() || volts < 0.0 {
            return None;
        }
        let mv = (volts * 1000.0).round();
        if mv > f32::from(u16::MAX) {
            return None;
        }
        Some(Self(mv as u16))
    }

    /// Get the voltage in millivolts
    #[must_use]
    pub const fn as_millivolts(self) -> u16 {
        self.0
    }

    /// Get the voltage in volts
    #[must_use]
    pub fn as_volts(self) -> f32 {
        f32::from(self.0) / 1000.0
    }
}

impl fmt::Debug for Voltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Voltage({} mV)", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Voltage {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}.{:03}V", self.0 / 1000, self.0 % 1000);
    }
}

/// Valid range and linear register encoding of one regulator output
///
/// `code = round((voltage - offset) / step)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RailLimits {
    /// Lowest programmable voltage
    pub min: Voltage,
    /// Highest voltage this board allows on the rail
    pub max: Voltage,
    /// Voltage at code 0
    pub offset: Voltage,
    /// Millivolts per code step
    pub step_mv: u16,
    /// Largest value the target register field holds
    pub max_code: u8,
}

impl RailLimits {
    /// Auxiliary rail (buck-boost SBB2): 0.8 V to 5.5 V in 50 mV steps
    pub const VAUX: Self = Self {
        min: Voltage::from_millivolts(800),
        max: Voltage::from_millivolts(5500),
        offset: Voltage::from_millivolts(800),
        step_mv: 50,
        max_code: 0x7F,
    };

    /// I/O rail (LDO0): 0.8 V to 3.46 V in 25 mV steps
    ///
    /// The upper bound is the FPGA I/O bank tolerance, not the regulator's.
    pub const VIO: Self = Self {
        min: Voltage::from_millivolts(800),
        max: Voltage::from_millivolts(3460),
        offset: Voltage::from_millivolts(800),
        step_mv: 25,
        max_code: 0x7F,
    };

    /// Buck encoding used for the fixed FPGA core target (SBB1)
    pub const BUCK: Self = Self {
        min: Voltage::from_millivolts(800),
        max: Voltage::from_millivolts(5500),
        offset: Voltage::from_millivolts(800),
        step_mv: 50,
        max_code: 0x7F,
    };

    /// Check if a voltage is within the rail's range
    #[must_use]
    pub fn contains(&self, voltage: Voltage) -> bool {
        voltage >= self.min && voltage <= self.max
    }

    /// Encode a voltage into its target register code
    ///
    /// # Errors
    /// `InvalidSetting` if the voltage is out of range or the code does not
    /// fit the register field.
    pub fn encode(&self, voltage: Voltage) -> Result<u8, S1Error> {
        if !self.contains(voltage) {
            return Err(S1Error::InvalidSetting);
        }
        let above = u32::from(voltage.as_millivolts() - self.offset.as_millivolts());
        let step = u32::from(self.step_mv);
        let code = (above + step / 2) / step;
        match u8::try_from(code) {
            Ok(code) if code <= self.max_code => Ok(code),
            _ => Err(S1Error::InvalidSetting),
        }
    }

    /// Encode a voltage given in volts into its target register code
    ///
    /// `code = round((volts - offset) / step)`, rounded once from the
    /// requested value rather than from a millivolt-quantised copy.
    ///
    /// # Errors
    /// `InvalidSetting` for NaN, values outside `min..=max`, or a code that
    /// does not fit the register field.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn encode_volts(&self, volts: f32) -> Result<u8, S1Error> {
        if volts.is_nan() || volts < self.min.as_volts() || volts > self.max.as_volts() {
            return Err(S1Error::InvalidSetting);
        }
        let step = f32::from(self.step_mv) / 1000.0;
        let code = ((volts - self.offset.as_volts()) / step).round();
        if code < 0.0 || code > f32::from(self.max_code) {
            return Err(S1Error::InvalidSetting);
        }
        Ok(code as u8)
    }

    /// Voltage programmed by a register code
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn decode(&self, code: u8) -> Voltage {
        Voltage::from_millivolts(self.offset.as_millivolts() + code as u16 * self.step_mv)
    }
}

/// Requested state of a rail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RailCommand {
    /// Shut the regulator down
    Off,
    /// Regulate at the given voltage
    On(Voltage),
}

impl RailCommand {
    /// Interpret a caller-supplied voltage for a rail
    ///
    /// Exactly `0.0` is the explicit off command. Anything else must fall
    /// within `limits`; there is no rounding of small values down to off.
    ///
    /// # Errors
    /// `InvalidSetting` for values outside `limits` (including NaN).
    #[allow(clippy::float_cmp)]
    pub fn parse(volts: f32, limits: &RailLimits) -> Result<Self, S1Error> {
        if volts == 0.0 {
            return Ok(Self::Off);
        }
        let min = limits.min.as_volts();
        let max = limits.max.as_volts();
        if volts.is_nan() || volts < min || volts > max {
            return Err(S1Error::InvalidSetting);
        }
        Voltage::from_volts(volts)
            .map(Self::On)
            .ok_or(S1Error::InvalidSetting)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RailCommand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "off"),
            Self::On(v) => defmt::write!(f, "on @ {}", v),
        }
    }
}

/// PMIC output rails wired on the S1 module
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rail {
    /// Auxiliary supply on the module header
    Vaux,
    /// FPGA I/O bank supply
    Vio,
    /// FPGA core supply
    Vfpga,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Rail {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Vaux => defmt::write!(f, "Vaux"),
            Self::Vio => defmt::write!(f, "Vio"),
            Self::Vfpga => defmt::write!(f, "Vfpga"),
        }
    }
}

/// Raw response to the flash capacity-ID command
///
/// Byte 0 is clocked in while the opcode is shifted out; bytes 1..=3 are
/// manufacturer, memory type and capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JedecId([u8; 4]);

impl JedecId {
    /// Wrap the four bytes read during the ID transaction
    #[must_use]
    pub const fn from_response(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Manufacturer ID
    #[must_use]
    pub const fn manufacturer(&self) -> u8 {
        self.0[1]
    }

    /// Memory type
    #[must_use]
    pub const fn memory_type(&self) -> u8 {
        self.0[2]
    }

    /// Capacity code (0x16 for 32 Mbit)
    #[must_use]
    pub const fn capacity(&self) -> u8 {
        self.0[3]
    }

    /// All four response bytes
    #[must_use]
    pub const fn raw(&self) -> [u8; 4] {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for JedecId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "JEDEC(mfr=0x{:02X}, type=0x{:02X}, cap=0x{:02X})",
            self.manufacturer(),
            self.memory_type(),
            self.capacity()
        );
    }
}
