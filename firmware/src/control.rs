//! The application side of the dimmer.
//!
//! The dimmer is shared with two interrupt handlers so every access goes through an
//! [`rtfm_core::Mutex`]. On the board that is the RTFM resource proxy, which raises the
//! running priority to the resource ceiling for the duration of the closure. In tests an
//! [`rtfm_core::Exclusive`] stands in for it.

use core::convert::Infallible;
use embedded_hal::digital::v2::OutputPin;
use itm_logger::*;
use rtfm_core::Mutex;

use crate::{dimmer::Dimmer, phase::OutOfRange, timer::PhaseTimer};

/// Operations the rest of the firmware uses to control a dimmer channel
pub trait DimmerControl {
    /// Start dimming at `percent`, or replace the current setting if already running.
    ///
    /// Out of range values are rejected and leave the channel exactly as it was.
    fn run(&mut self, percent: u8) -> Result<(), OutOfRange>;

    /// Stop dimming.
    ///
    /// The output is not driven here. The in-flight pulse (if any) completes and
    /// the next zero crossing leaves the output low.
    fn stop(&mut self);

    /// True while the channel is dimming. This is the requested state, not the pin level
    fn state(&mut self) -> bool;
}

impl<M, G, C> DimmerControl for M
where
    M: Mutex<T = Dimmer<G, C>>,
    G: OutputPin<Error = Infallible>,
    C: PhaseTimer,
{
    fn run(&mut self, percent: u8) -> Result<(), OutOfRange> {
        let delay_count = self.lock(|dimmer| dimmer.arm(percent))?;
        debug!("dimmer run {}%, delay_count=0x{:x}", percent, delay_count);
        Ok(())
    }

    fn stop(&mut self) {
        self.lock(|dimmer| dimmer.disarm());
        debug!("dimmer stop");
    }

    fn state(&mut self) -> bool {
        self.lock(|dimmer| dimmer.channel().enabled())
    }
}
