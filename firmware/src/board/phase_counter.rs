use crate::timer::PhaseTimer;
use super::aliases::PhaseTim;

/// The phase counter: TIM2 counting phase clock edges on ETR in external clock mode 2.
///
/// Counts up and raises the update interrupt on rollover from 0xFFFF to 0. Constructed by
/// `Configure::configure` which leaves it stopped with the update interrupt enabled.
///
/// TODO: should live inside hal. The revision we're on has no external clock mode so the
///       registers are driven directly
pub struct PhaseCounter {
    pub(super) tim: PhaseTim,
}

impl PhaseTimer for PhaseCounter {
    fn stop(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().clear_bit());
    }

    fn reload(&mut self, preload: u16) {
        #[allow(unused_unsafe)]
        unsafe {
            self.tim.cnt.write(|w| w.cnt().bits(preload));
        }
    }

    fn start(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    fn take_overflow(&mut self) -> bool {
        if self.tim.sr.read().uif().bit_is_set() {
            self.tim.sr.modify(|_, w| w.uif().clear_bit());
            true
        } else {
            false
        }
    }
}
