#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
use {
    core::{
        convert::Infallible,
        panic::PanicInfo,
        sync::atomic::{self, Ordering},
    },
    cortex_m::{asm, interrupt},
    embedded_hal::digital::v2::InputPin,
    itm_logger::*,
    rtfm::Mutex,
    stm32f1xx_hal::{
        prelude::*,
        rcc::Clocks,
        gpio::ExtiPin,
        pac::Peripherals as DevicePeripherals,
    },
    triac_dimmer::{
        board::*,
        command::{self, ReportSchedule},
        config::DimmerConfig,
        control::DimmerControl,
        priority::{ZERO_CROSS_PRIORITY, PHASE_TIMER_PRIORITY},
    },
};

#[cfg(all(target_os = "none", feature = "itm"))]
use cortex_m::{iprintln, peripheral::ITM};

// Task priorities below have to be literals
#[cfg(target_os = "none")]
const _: () = assert!(ZERO_CROSS_PRIORITY == 3 && PHASE_TIMER_PRIORITY == 2);

#[cfg(target_os = "none")]
#[rtfm::app(device = stm32f1xx_hal::stm32, peripherals = true)]
const APP: () = {
    struct Resources {
        dimmer: BoardDimmer,
        zc_in: ZcIn,
        switch: Switch,
        status_led: LedStatus,
        phase_clock: PhaseClock,
        report_timer: ReportTimer,

        #[init(DimmerConfig::new())]
        config: DimmerConfig,

        #[init(ReportSchedule::new())]
        report_schedule: ReportSchedule,
    }

    #[init]
    fn init(cx: init::Context) -> init::LateResources {
        configure(cx.device).unwrap()
    }

    /// The application loop. Woken at least once per half-cycle by the zero crossing so the
    /// switch is polled at mains rate
    #[idle(resources = [dimmer, config, switch, status_led, phase_clock])]
    fn idle(mut cx: idle::Context) -> ! {
        let config = cx.resources.config.lock(|c| *c);
        if let Some(report) = command::on_boot(&config, &mut cx.resources.dimmer) {
            info!("boot: {:?}", report);
        }

        loop {
            let config = cx.resources.config.lock(|c| *c);
            let closed = level(cx.resources.switch.is_high());
            if let Some(report) = command::on_switch(closed, &config, &mut cx.resources.dimmer) {
                info!("switch: {:?}", report);
            }

            let running = cx.resources.dimmer.state();
            cx.resources.status_led.set(running);

            asm::wfi();
        }
    }

    /// EXTI1 Interrupt is the zero crossing detector. Highest priority so it can always
    /// cut off whatever the phase counter was doing
    #[task(binds = EXTI1, priority = 3, resources = [dimmer, zc_in])]
    fn exti1(cx: exti1::Context) {
        cx.resources.zc_in.clear_interrupt_pending_bit();
        cx.resources.dimmer.zero_cross();
    }

    /// TIM2 Interrupt is the phase counter rollover
    #[task(binds = TIM2, priority = 2, resources = [dimmer])]
    fn tim2(mut cx: tim2::Context) {
        cx.resources.dimmer.lock(|dimmer| dimmer.counter_overflow());
    }

    /// TIM4 Interrupt ticks once a second to send the periodic status report
    #[task(binds = TIM4, priority = 1, resources = [report_timer, report_schedule, config, dimmer])]
    fn tim4(mut cx: tim4::Context) {
        cx.resources.report_timer.clear_update_interrupt_flag();

        let config: &DimmerConfig = &*cx.resources.config;
        if cx.resources.report_schedule.tick(config.report) {
            let report = command::status_report(config, &mut cx.resources.dimmer);
            info!("status: {:?}", report);
        }
    }
};

#[cfg(target_os = "none")]
fn level(result: Result<bool, Infallible>) -> bool {
    match result {
        Ok(high) => high,
        Err(never) => match never {},
    }
}

/// This configures all peripherals. Mainly broken out to a function to allow the use of `?`
#[cfg(target_os = "none")]
fn configure(mut device: DevicePeripherals) -> Result<init::LateResources, Error> {
    let mut rcc = device.RCC.constrain();
    let mut flash = device.FLASH.constrain();
    let mut afio = device.AFIO.constrain(&mut rcc.apb2);
    let mut gpioa = device.GPIOA.split(&mut rcc.apb2);
    let mut gpiob = device.GPIOB.split(&mut rcc.apb2);
    let mut gpioc = device.GPIOC.split(&mut rcc.apb2);

    // The gate is driven low first so a slow clock or ITM setup can't leave it floating
    let gate = GateOut::configure((gpiob.pb0, &mut gpiob.crl))?;

    // After reset the clock is set to HSI and the TPIU clock scaler doesn't get reset
    itm_reset()?;

    // Configure the clock for full speed
    let clocks = Clocks::configure((rcc.cfgr, &mut flash.acr))?;

    itm_update_clocks(&clocks)?;

    info!("Configured max freq");

    let status_led = LedStatus::configure((gpioc.pc13, &mut gpioc.crh))?;

    let switch = Switch::configure((gpiob.pb5, &mut gpiob.crl))?;

    let phase_clock = PhaseClock::configure((
        PhaseClockOut::configure((gpioa.pa6, &mut gpioa.crl))?,
        device.TIM3,
        clocks,
        &mut rcc.apb1,
        &mut afio.mapr,
    ))?;

    let counter = PhaseCounter::configure((
        device.TIM2,
        PhaseClockIn::configure((gpioa.pa0, &mut gpioa.crl))?,
        &mut rcc.apb1,
    ))?;

    let dimmer = BoardDimmer::new(gate, counter);

    let zc_in = ZcIn::configure((
        gpioa.pa1,
        &mut gpioa.crl,
        &mut device.EXTI,
        &mut afio,
    ))?;

    let report_timer = ReportTimer::configure((device.TIM4, clocks, &mut rcc.apb1))?;

    info!("Init done");

    Ok(init::LateResources {
        dimmer,
        zc_in,
        switch,
        status_led,
        phase_clock,
        report_timer,
    })
}

#[cfg(target_os = "none")]
#[panic_handler]
fn panic(
    #[cfg_attr(not(feature = "itm"), allow(unused_variables))]
    info: &PanicInfo
) -> ! {
    interrupt::disable();

    #[cfg(feature = "itm")]
    {
        let itm = unsafe { &mut *ITM::ptr() };
        let stim = &mut itm.stim[0];

        iprintln!(stim, "{}", info);
    }

    loop {
        // add some side effect to prevent this from turning into a UDF instruction
        // see rust-lang/rust#28728 for details
        atomic::compiler_fence(Ordering::SeqCst)
    }
}

// Host builds only need the library
#[cfg(not(target_os = "none"))]
fn main() {}
