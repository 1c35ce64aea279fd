use core::convert::Infallible;
use embedded_hal::digital::v2::OutputPin;

use crate::{
    channel::{DimmerChannel, PulseState},
    phase::{OutOfRange, PULSE_PRELOAD},
    timer::PhaseTimer,
};

/// A dimmer channel together with the gate output and phase counter it drives.
///
/// `zero_cross` and `counter_overflow` are the bodies of the two interrupt handlers.
/// The zero crossing handler must run at a strictly higher priority than the counter
/// handler (see [`crate::priority`]) so a zero crossing always terminates whatever the
/// previous half-cycle left running.
pub struct Dimmer<G, C> {
    channel: DimmerChannel,
    gate: G,
    counter: C,
}

impl<G, C> Dimmer<G, C>
where
    G: OutputPin<Error = Infallible>,
    C: PhaseTimer,
{
    /// Takes ownership of the gate and counter and leaves both idle
    pub fn new(mut gate: G, mut counter: C) -> Self {
        drive(&mut gate, false);
        counter.stop();
        counter.take_overflow();

        Self {
            channel: DimmerChannel::new(),
            gate,
            counter,
        }
    }

    /// Zero crossing interrupt.
    ///
    /// Ends whatever the previous half-cycle was doing then arms the counter with the
    /// firing delay if the channel is enabled.
    pub fn zero_cross(&mut self) {
        drive(&mut self.gate, false);
        self.counter.stop();
        // An overflow that raced this crossing belongs to the previous half-cycle
        self.counter.take_overflow();
        self.channel.set_pulse_state(PulseState::Idle);

        if self.channel.enabled() {
            self.counter.reload(self.channel.delay_count());
            self.counter.start();
        }
    }

    /// Phase counter overflow interrupt.
    ///
    /// The first overflow after a zero crossing fires the gate and times the pulse,
    /// the second ends it. The counter stays stopped until the next zero crossing.
    pub fn counter_overflow(&mut self) {
        if !self.counter.take_overflow() {
            // Already consumed by a zero crossing
            return;
        }
        self.counter.stop();

        if !self.channel.enabled() {
            drive(&mut self.gate, false);
            return;
        }

        match self.channel.pulse_state() {
            PulseState::Idle => {
                drive(&mut self.gate, true);
                self.channel.set_pulse_state(PulseState::Firing);
                self.counter.reload(PULSE_PRELOAD);
                self.counter.start();
            }
            PulseState::Firing => {
                drive(&mut self.gate, false);
                self.channel.set_pulse_state(PulseState::Idle);
            }
        }
    }

    /// Start dimming at `percent`, replacing any previous setting. Takes effect at the next
    /// zero crossing
    pub fn arm(&mut self, percent: u8) -> Result<u16, OutOfRange> {
        self.channel.run(percent)
    }

    /// Stop dimming at the next interrupt boundary
    pub fn disarm(&mut self) {
        self.channel.stop();
    }

    /// The channel state
    pub fn channel(&self) -> &DimmerChannel {
        &self.channel
    }

    /// The gate output
    pub fn gate(&self) -> &G {
        &self.gate
    }

    /// The phase counter
    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// The phase counter, mutably. Used to advance simulated counters
    pub fn counter_mut(&mut self) -> &mut C {
        &mut self.counter
    }
}

fn drive<G: OutputPin<Error = Infallible>>(gate: &mut G, high: bool) {
    let result = if high { gate.set_high() } else { gate.set_low() };
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}
