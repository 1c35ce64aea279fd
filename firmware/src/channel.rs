use crate::phase::{percent_to_preload, OutOfRange};

/// Which half of the firing sequence the phase counter is currently timing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulseState {
    /// Counting down the delay from the zero crossing to the firing point
    Idle,
    /// The gate is driven and the counter is timing the end of the pulse
    Firing,
}

impl Default for PulseState {
    fn default() -> Self {
        PulseState::Idle
    }
}

/// The state of one dimmer output.
///
/// `enabled`, `pulse` and `delay_count` are a unit: they are only ever changed together
/// from inside a single critical section (see [`crate::control`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimmerChannel {
    enabled: bool,
    pulse: PulseState,
    delay_count: u16,
}

impl DimmerChannel {
    /// A stopped channel
    pub const fn new() -> Self {
        Self {
            enabled: false,
            pulse: PulseState::Idle,
            delay_count: 0,
        }
    }

    /// Start dimming at `percent`. On error nothing is changed
    pub fn run(&mut self, percent: u8) -> Result<u16, OutOfRange> {
        let delay_count = percent_to_preload(percent)?;
        self.pulse = PulseState::Idle;
        self.delay_count = delay_count;
        self.enabled = true;
        Ok(delay_count)
    }

    /// Stop dimming. The output is left to the next interrupt to drive low
    pub fn stop(&mut self) {
        self.pulse = PulseState::Idle;
        self.enabled = false;
    }

    /// True while the channel is dimming
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The current firing phase
    pub fn pulse_state(&self) -> PulseState {
        self.pulse
    }

    /// Counter preload for the zero crossing. Only meaningful while enabled
    pub fn delay_count(&self) -> u16 {
        self.delay_count
    }

    pub(crate) fn set_pulse_state(&mut self, pulse: PulseState) {
        self.pulse = pulse;
    }
}

impl Default for DimmerChannel {
    fn default() -> Self {
        Self::new()
    }
}
