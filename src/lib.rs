//! S1 Module Board Support Library
//!
//! Drivers for the peripherals wired inside the S1 module: a power
//! management IC feeding the FPGA and auxiliary rails, an external SPI NOR
//! flash, and the FPGA's reset and done lines. The nRF52811 on the module
//! talks to the PMIC over I2C and to the flash over SPI.
//!
//! # Architecture
//!
//! The library is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      MODULE BRING-UP                         │
//! │        S1::init  (FPGA reset, PMIC identity check)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       DRIVER LAYER                           │
//! │   PMIC rails  │  SPI flash commands  │  FPGA control          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      BUS TRANSPORT                           │
//! │   I2C registers  │  lazy SPI transport  │  GPIO lines         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                embedded-hal 1.0 blocking traits              │
//! │        embassy-nrf on hardware, mocks on the host            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Owned buses**: drivers take their I2C/SPI/GPIO handles by value
//! - **Validate before writing**: rejected settings never touch hardware
//! - **Blocking and single-caller**: no locking, no retries, no timeouts
//! - **Explicit error handling**: bus failures surface as `S1Error::Bus`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
mod fmt;

/// Bus Transport
///
/// Register-level I2C, lazily initialised SPI, and GPIO line wrappers.
pub mod hal;

/// Peripheral Drivers
///
/// PMIC rails, SPI flash and FPGA control.
pub mod drivers;

/// Module bring-up
pub mod module;

/// Error types
pub mod error;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

pub use error::{BusError, S1Error, S1Result};
pub use module::{S1Parts, S1};

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::drivers::flash::Flash;
    pub use crate::drivers::fpga::FpgaControl;
    pub use crate::drivers::pmic::Pmic;
    pub use crate::error::{BusError, S1Error, S1Result};
    pub use crate::hal::spi::SpiTransport;
    pub use crate::module::{S1Parts, S1};
    pub use crate::types::*;
}
