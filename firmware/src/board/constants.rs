use stm32f1xx_hal::time::*;

use crate::phase::PHASE_CLOCK_HZ;

/// High speed internal oscillator clock frequency
pub const HSI: MegaHertz = MegaHertz(8);

/// High speed external crystal oscillator frequency
pub const HSE: MegaHertz = MegaHertz(8);

/// Target systclk frequency after PLL is enabled
pub const SYSCLK_FREQ: MegaHertz = MegaHertz(72);

/// Target PCLK1 frequency
pub const PCLK1_FREQ: MegaHertz = MegaHertz(36);
/// Target PCLK2 frequency
pub const PCLK2_FREQ: MegaHertz = MegaHertz(72);

/// Baud rate used for ITM communication
pub const ITM_BAUDRATE: MegaHertz = MegaHertz(2);

/// The frequency of the phase clock fed back into the phase counter's external clock input.
/// One period is one phase tick
pub const PHASE_CLOCK_FREQ: Hertz = Hertz(PHASE_CLOCK_HZ);

/// The frequency the report timer runs at. Status reports are scheduled in ticks of this timer
pub const REPORT_TIMER_FREQ: Hertz = Hertz(1);
