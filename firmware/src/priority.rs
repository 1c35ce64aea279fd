//! Interrupt priorities are part of the dimmer's correctness, not a tuning knob.
//!
//! A zero crossing must always be able to terminate a firing sequence left over from the
//! previous half-cycle, so the zero crossing source is strictly above the phase counter
//! source. The application runs below both. The RTFM app declares its tasks with these
//! values and checks them at compile time.

/// Priority of the zero crossing interrupt
pub const ZERO_CROSS_PRIORITY: u8 = 3;

/// Priority of the phase counter overflow interrupt
pub const PHASE_TIMER_PRIORITY: u8 = 2;

/// Priority of the application (RTFM idle)
pub const IDLE_PRIORITY: u8 = 0;

const _: () = assert!(ZERO_CROSS_PRIORITY > PHASE_TIMER_PRIORITY);
const _: () = assert!(PHASE_TIMER_PRIORITY > IDLE_PRIORITY);

/// An interrupt source that drives the dimmer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IrqSource {
    /// Falling edge from the zero crossing detector
    ZeroCross,
    /// Phase counter rollover
    PhaseTimer,
}

impl IrqSource {
    /// The fixed priority of this source
    pub const fn priority(self) -> u8 {
        match self {
            IrqSource::ZeroCross => ZERO_CROSS_PRIORITY,
            IrqSource::PhaseTimer => PHASE_TIMER_PRIORITY,
        }
    }

    /// True if this source preempts `running`
    pub fn preempts(self, running: IrqSource) -> bool {
        self.priority() > running.priority()
    }
}

/// The source the interrupt controller dispatches next, if any.
///
/// `running` is the handler that is currently executing (None for the application). Only
/// a pending source that preempts it is dispatched; of those the highest priority wins.
pub fn next_to_run(pending: &[IrqSource], running: Option<IrqSource>) -> Option<IrqSource> {
    let floor = running.map_or(IDLE_PRIORITY, IrqSource::priority);
    pending
        .iter()
        .copied()
        .filter(|source| source.priority() > floor)
        .max_by_key(|source| source.priority())
}
