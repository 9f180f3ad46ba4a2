//! Peripheral Drivers
//!
//! Drivers for the ICs on the S1 module. They own their bus handles and
//! hold no other state between calls.

pub mod flash;
pub mod fpga;
pub mod pmic;
