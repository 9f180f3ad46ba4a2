//! FPGA Control
//!
//! Owns the FPGA reset and done lines. This layer only ever holds the FPGA
//! in reset; releasing it is left to the code that sequences the rails and
//! decides the FPGA may boot, which drives the pin through
//! [`FpgaControl::reset_pin`].

use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::S1Result;
use crate::hal::gpio::{ResetLine, StatusInput};

/// FPGA reset and done lines
pub struct FpgaControl<RST, DONE> {
    reset: ResetLine<RST>,
    done: StatusInput<DONE>,
}

impl<RST: OutputPin, DONE: InputPin> FpgaControl<RST, DONE> {
    /// Take ownership of the configured pins
    ///
    /// `reset` must already be an output and `done` an input with pull-up.
    #[must_use]
    pub fn new(reset: RST, done: DONE) -> Self {
        Self {
            reset: ResetLine::new(reset),
            done: StatusInput::new(done),
        }
    }

    /// Drive reset low, holding the FPGA in reset
    pub fn hold_reset(&mut self) -> S1Result<()> {
        self.reset.assert()?;
        debug!("FPGA held in reset");
        Ok(())
    }

    /// Raw reset pin, for the layer that releases reset
    pub fn reset_pin(&mut self) -> &mut RST {
        self.reset.pin_mut()
    }

    /// Raw done pin (high once the FPGA has configured)
    pub fn done_pin(&mut self) -> &mut DONE {
        self.done.pin_mut()
    }

    /// Read the done line
    pub fn is_configured(&mut self) -> S1Result<bool> {
        Ok(self.done.is_high()?)
    }

    /// Give back both pins
    pub fn release(self) -> (RST, DONE) {
        (self.reset.into_inner(), self.done.into_inner())
    }
}
