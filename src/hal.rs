//! Bus Transport Layer
//!
//! Thin blocking wrappers over the `embedded-hal` traits. Controller
//! failures come back as [`BusError`](crate::error::BusError) and are never
//! retried here.

pub mod gpio;
pub mod i2c;
pub mod spi;
