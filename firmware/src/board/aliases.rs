use stm32f1xx_hal::{
    gpio::{
        PushPull,
        Alternate,
        Input,
        Output,
        Floating,
        PullDown,
        gpioa::*,
        gpiob::*,
        gpioc::*,
    },
    timer::CountDownTimer,
    pac::{
        TIM2,
        TIM3,
        TIM4,
    },
    pwm::{
        Pwm,
        C1,
    },
};

use crate::dimmer::Dimmer;
use super::PhaseCounter;

/// The phase counter counts phase clock edges from its external trigger input and interrupts on rollover
pub type PhaseTim = TIM2;
/// The phase clock timer generates the fixed rate phase clock
pub type PhaseClockTim = TIM3;
/// The report timer provides the periodic tick used to schedule status reports
pub type ReportTim = TIM4;

/// The complete handle for the report timer
pub type ReportTimer = CountDownTimer<ReportTim>;

/// Status LED, on while the dimmer is running. Active low
pub type LedStatus      = PC13<Output<PushPull>>;

/// Output that triggers the TRIAC gate through the opto driver. Active high
pub type GateOut        = PB0<Output<PushPull>>;

/// Local wall switch input. Closed is high
pub type Switch         = PB5<Input<PullDown>>;

/// Input from zero crossing detection circuit. Falling edge at each crossing
/// EXTI1
pub type ZcIn           = PA1<Input<Floating>>;

/// Phase clock input, wired to `PhaseClockOut` on the board
/// TIM2_ETR
pub type PhaseClockIn   = PA0<Input<Floating>>;

/// Phase clock output
/// TIM3_CH1
pub type PhaseClockOut  = PA6<Alternate<PushPull>>;

/// Complete handle for the phase clock generator
pub type PhaseClock     = Pwm<PhaseClockTim, C1>;

/// The dimmer as wired on this board
pub type BoardDimmer    = Dimmer<GateOut, PhaseCounter>;
