//! GPIO Abstractions
//!
//! Type-safe wrappers for the FPGA control lines.
//! Provides semantic meaning to pins through the type system.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::BusError;

/// Active-low reset line
///
/// Only assertion is modelled. Releasing reset belongs to whatever layer
/// decides the FPGA may boot; it drives the pin through [`ResetLine::pin_mut`].
pub struct ResetLine<P> {
    pin: P,
}

impl<P: OutputPin> ResetLine<P> {
    /// Wrap an output pin wired to an active-low reset input
    #[must_use]
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Drive the line low, holding the target in reset
    pub fn assert(&mut self) -> Result<(), BusError> {
        self.pin.set_low().map_err(|e| BusError::gpio(&e))
    }

    /// Direct access to the pin
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Give back the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

/// Open-drain status input with pull-up, high when asserted
pub struct StatusInput<P> {
    pin: P,
}

impl<P: InputPin> StatusInput<P> {
    /// Wrap an input pin (pull-up configured by the board)
    #[must_use]
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Check if the line is high
    pub fn is_high(&mut self) -> Result<bool, BusError> {
        self.pin.is_high().map_err(|e| BusError::gpio(&e))
    }

    /// Direct access to the pin
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Give back the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}
