//! Simulated gate pin and phase counter for driving the dimmer tick by tick on the host

#![allow(dead_code)]

use std::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;
use rtfm_core::Exclusive;
use triac_dimmer::{dimmer::Dimmer, timer::PhaseTimer};

/// Ticks in a 50Hz half-cycle at the phase clock rate
pub const HALF_CYCLE_TICKS: u32 = 104;

#[derive(Default)]
pub struct SimGate {
    pub high: bool,
}

impl OutputPin for SimGate {
    type Error = Infallible;
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        Ok(())
    }
}

/// Up-counter that sets its overflow flag when the count wraps to 0
#[derive(Default)]
pub struct SimCounter {
    pub count: u16,
    pub running: bool,
    pub overflow: bool,
}

impl SimCounter {
    /// Advance one phase clock edge
    pub fn tick(&mut self) {
        if self.running {
            self.count = self.count.wrapping_add(1);
            if self.count == 0 {
                self.overflow = true;
            }
        }
    }
}

impl PhaseTimer for SimCounter {
    fn stop(&mut self) {
        self.running = false;
    }
    fn reload(&mut self, preload: u16) {
        self.count = preload;
    }
    fn start(&mut self) {
        self.running = true;
    }
    fn take_overflow(&mut self) -> bool {
        std::mem::replace(&mut self.overflow, false)
    }
}

pub type SimDimmer = Dimmer<SimGate, SimCounter>;

/// A dimmer wired to simulated hardware, with the gate level recorded after every tick
pub struct Bench {
    pub dimmer: SimDimmer,
    pub trace: Vec<bool>,
}

impl Bench {
    pub fn new() -> Self {
        Self {
            dimmer: Dimmer::new(SimGate::default(), SimCounter::default()),
            trace: Vec::new(),
        }
    }

    /// The application side handle, as the firmware sees it through its resource lock
    pub fn control(&mut self) -> Exclusive<'_, SimDimmer> {
        Exclusive(&mut self.dimmer)
    }

    pub fn gate_high(&self) -> bool {
        self.dimmer.gate().high
    }

    pub fn zero_cross(&mut self) {
        self.dimmer.zero_cross();
    }

    /// One phase clock edge, servicing the counter interrupt if it fired
    pub fn tick(&mut self) {
        self.dimmer.counter_mut().tick();
        if self.dimmer.counter().overflow {
            self.dimmer.counter_overflow();
        }
        let high = self.gate_high();
        self.trace.push(high);
    }

    /// A zero crossing followed by `ticks` phase clock edges. Returns that half-cycle's trace
    pub fn half_cycle(&mut self, ticks: u32) -> Vec<bool> {
        let start = self.trace.len();
        self.zero_cross();
        for _ in 0..ticks {
            self.tick();
        }
        self.trace[start..].to_vec()
    }
}

/// Ticks at which the gate was high. The first edge after the zero crossing is tick 1
pub fn high_ticks(trace: &[bool]) -> Vec<usize> {
    trace
        .iter()
        .enumerate()
        .filter(|(_, high)| **high)
        .map(|(i, _)| i + 1)
        .collect()
}

/// Number of low to high transitions, starting from low
pub fn rising_edges(trace: &[bool]) -> usize {
    let mut last = false;
    let mut edges = 0;
    for &high in trace {
        if high && !last {
            edges += 1;
        }
        last = high;
    }
    edges
}
