use stm32f1xx_hal::gpio::State;
use core::convert::Infallible;
use embedded_hal::digital::v2::OutputPin;
use super::aliases::*;

/// This trait hides if an output is active low or active high.
pub trait EnableOutput: OutputPin<Error = Infallible> {
    /// The State for when this output is on
    const ON_STATE: State;
    /// The State for when this output is off
    const OFF_STATE: State;
    /// Turns the output on
    fn on(&mut self);
    /// Turns the output off
    fn off(&mut self);
    /// Turns the output on or off
    fn set(&mut self, on: bool) {
        if on { self.on() } else { self.off() }
    }
}

const ACTIVE_HIGH: (State, State) = (State::High, State::Low);
const ACTIVE_LOW: (State, State) = (State::Low, State::High);

fn infallible(result: Result<(), Infallible>) {
    match result {
        Ok(()) => {},
        Err(never) => match never {},
    }
}

macro_rules! define_enable_output {
    ($name: ty, $active_state: expr) => (
        impl EnableOutput for $name {
            const ON_STATE: State = $active_state.0;
            const OFF_STATE: State = $active_state.1;
            fn on(&mut self) {
                infallible(match Self::ON_STATE {
                    State::High => self.set_high(),
                    State::Low => self.set_low(),
                })
            }
            fn off(&mut self) {
                infallible(match Self::ON_STATE {
                    State::High => self.set_low(),
                    State::Low => self.set_high(),
                })
            }
        }
    )
}

define_enable_output!(LedStatus, ACTIVE_LOW);
define_enable_output!(GateOut, ACTIVE_HIGH);
