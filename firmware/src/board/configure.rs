use stm32f1xx_hal::{
    rcc::{self, Clocks},
    afio,
    flash,
    gpio::{
        Input,
        Floating,
        gpioa,
        gpiob,
        gpioc,
        Edge,
        ExtiPin,
    },
    timer::{
        Timer,
        Event,
    },
    pac::{
        EXTI,
        RCC,
    },
    prelude::*,
};
use itm_logger::*;
use super::{
    constants::*,
    aliases::*,
    EnableOutput,
    PhaseCounter,
};

/// Errors that can be returned by Configure::configure
#[derive(Debug)]
pub enum Error {
    /// The TPIU baud rate can't be derived from the core clock
    ItmBaudrate,
}

/// This trait allows a configure function to be implemented on the type aliases
/// from super::aliases. This provides a somewhat convenient interface to configure
/// the various board devices without the caller having to do it all manually.
pub trait Configure<'a>
where Self: Sized
{
    /// The type of the parameters that need to be provided to the configure function
    type Params;
    /// Configure the peripherals required to construct `Self`
    fn configure(_: Self::Params) -> Result<Self, Error>;
}

impl <'a> Configure<'a> for Clocks {
    type Params = (
        rcc::CFGR,
        &'a mut flash::ACR,
    );
    fn configure((cfgr, acr): Self::Params) -> Result<Self, Error> {
        Ok(cfgr
            .use_hse(HSE)
            .sysclk(SYSCLK_FREQ)
            .pclk1(PCLK1_FREQ)
            .pclk2(PCLK2_FREQ)
            .freeze(acr))
    }
}

impl<'a> Configure<'a> for LedStatus {
    type Params = (
        gpioc::PC13<Input<Floating>>,
        &'a mut gpioc::CRH,
    );
    fn configure((pin, cr): Self::Params) -> Result<Self, Error> {
        Ok(pin.into_push_pull_output_with_state(cr, Self::OFF_STATE))
    }
}

impl<'a> Configure<'a> for GateOut {
    type Params = (
        gpiob::PB0<Input<Floating>>,
        &'a mut gpiob::CRL,
    );
    fn configure((pin, cr): Self::Params) -> Result<Self, Error> {
        // Gate must never glitch high while the pin mode changes
        Ok(pin.into_push_pull_output_with_state(cr, Self::OFF_STATE))
    }
}

impl<'a> Configure<'a> for Switch {
    type Params = (
        gpiob::PB5<Input<Floating>>,
        &'a mut gpiob::CRL,
    );
    fn configure((pin, cr): Self::Params) -> Result<Self, Error> {
        Ok(pin.into_pull_down_input(cr))
    }
}

impl<'a> Configure<'a> for ZcIn {
    type Params = (
        gpioa::PA1<Input<Floating>>,
        &'a mut gpioa::CRL,
        &'a mut EXTI,
        &'a mut afio::Parts,
    );
    fn configure((mut pin, _cr, exti, afio): Self::Params) -> Result<Self, Error> {
        pin.make_interrupt_source(afio);
        pin.trigger_on_edge(exti, Edge::FALLING);
        pin.enable_interrupt(exti);

        Ok(pin)
    }
}

impl<'a> Configure<'a> for PhaseClockIn {
    type Params = (
        gpioa::PA0<Input<Floating>>,
        &'a mut gpioa::CRL,
    );
    fn configure((pin, _cr): Self::Params) -> Result<Self, Error> {
        Ok(pin)
    }
}

impl<'a> Configure<'a> for PhaseClockOut {
    type Params = (
        gpioa::PA6<Input<Floating>>,
        &'a mut gpioa::CRL,
    );
    fn configure((pin, cr): Self::Params) -> Result<Self, Error> {
        Ok(pin.into_alternate_push_pull(cr))
    }
}

impl<'a> Configure<'a> for PhaseClock {
    type Params = (
        PhaseClockOut,
        PhaseClockTim,
        Clocks,
        &'a mut rcc::APB1,
        &'a mut afio::MAPR,
    );
    fn configure((pin, tim, clocks, apb1, mapr): Self::Params) -> Result<Self, Error> {
        let mut phase_clock = Timer::tim3(tim, &clocks, apb1)
            .pwm(pin, mapr, PHASE_CLOCK_FREQ);

        // Square wave, the counter only sees the rising edge
        phase_clock.set_duty(phase_clock.get_max_duty() / 2);
        phase_clock.enable();

        debug!("Phase clock running at {}Hz", PHASE_CLOCK_FREQ.0);

        Ok(phase_clock)
    }
}

impl<'a> Configure<'a> for PhaseCounter {
    type Params = (
        PhaseTim,
        PhaseClockIn,
        &'a mut rcc::APB1,
    );
    fn configure((tim, _etr, _apb1): Self::Params) -> Result<Self, Error> {
        unsafe {
            // The hal owns the enable and reset registers but doesn't expose them
            let rcc = &(*RCC::ptr());
            rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());
            rcc.apb1rstr.modify(|_, w| w.tim2rst().set_bit());
            rcc.apb1rstr.modify(|_, w| w.tim2rst().clear_bit());

            // One count per phase clock edge
            tim.psc.write(|w| w.psc().bits(0));
            tim.arr.write(|w| w.arr().bits(0xFFFF));
        }

        tim.smcr.modify(|_, w| w
            // External clock mode 2, clocked from ETR
            .ece().set_bit()
        );
        tim.cr1.modify(|_, w| w
            // Only a rollover raises the update interrupt, not UG
            .urs().set_bit()
            .cen().clear_bit()
        );
        // Latch the prescaler
        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.modify(|_, w| w.uif().clear_bit());
        tim.dier.modify(|_, w| w.uie().set_bit());

        Ok(PhaseCounter { tim })
    }
}

impl<'a> Configure<'a> for ReportTimer {
    type Params = (
        ReportTim,
        Clocks,
        &'a mut rcc::APB1,
    );
    fn configure((tim, clocks, apb1): Self::Params) -> Result<Self, Error> {
        let mut report_timer = Timer::tim4(tim, &clocks, apb1)
            .start_count_down(REPORT_TIMER_FREQ);
        report_timer.listen(Event::Update);

        Ok(report_timer)
    }
}
