//! Translates device commands and local inputs into dimmer operations and status replies.
//!
//! Message framing and transport belong to the radio layer; this module only sees decoded
//! commands and produces the report the radio layer sends back.

use core::convert::TryFrom;
use itm_logger::*;

use crate::{
    config::{valid_percent, ConfigError, ConfigStore, DimmerConfig, Param},
    control::DimmerControl,
};

/// A decoded command addressed to this device
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run at the configured percentage
    On,
    /// Stop
    Off,
    /// Run at the given percentage and make it the configured one
    OnWithPercent(u16),
    /// Read a configuration parameter
    ConfigRead(Param),
    /// Write and persist a configuration parameter
    ConfigWrite(Param, u16),
}

/// Outcome code sent with a dimmer report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DimmerStatus {
    /// Command carried out
    Ok,
    /// Requested percentage outside the accepted range
    Param,
}

/// A reply or unsolicited status message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// Dimmer state: the running percentage, or 0 when stopped or refused
    Dimmer {
        /// Percentage now in effect
        value: u16,
        /// Outcome of the command
        status: DimmerStatus,
    },
    /// Current value of a configuration parameter
    Config {
        /// The parameter
        param: Param,
        /// Its value
        value: u16,
    },
    /// A configuration write was refused
    ConfigError {
        /// The parameter
        param: Param,
        /// Why it was refused
        error: ConfigError,
    },
}

impl Report {
    const fn running(percent: u8) -> Self {
        Report::Dimmer {
            value: percent as u16,
            status: DimmerStatus::Ok,
        }
    }

    const fn stopped() -> Self {
        Report::Dimmer {
            value: 0,
            status: DimmerStatus::Ok,
        }
    }

    const fn refused() -> Self {
        Report::Dimmer {
            value: 0,
            status: DimmerStatus::Param,
        }
    }
}

/// Carry out `command` and return the reply
pub fn handle<D, S>(command: Command, config: &mut DimmerConfig, dimmer: &mut D, store: &mut S) -> Report
where
    D: DimmerControl,
    S: ConfigStore,
{
    debug!("command: {:?}", command);

    let report = match command {
        Command::On => match config.run_percent() {
            Some(percent) => run(dimmer, percent),
            None => Report::refused(),
        },
        Command::Off => {
            dimmer.stop();
            Report::stopped()
        },
        Command::OnWithPercent(value) => match valid_percent(value) {
            Some(percent) => {
                config.percent = percent;
                run(dimmer, percent)
            },
            None => Report::refused(),
        },
        Command::ConfigRead(param) => Report::Config {
            param,
            value: config.get(param),
        },
        Command::ConfigWrite(param, value) => match write_config(config, store, param, value) {
            Ok(()) => Report::Config {
                param,
                value: config.get(param),
            },
            Err(error) => {
                warn!("config write {:?}={} failed: {:?}", param, value, error);
                Report::ConfigError { param, error }
            },
        },
    };

    info!("reply: {:?}", report);
    report
}

/// Restore the channel after reset if the configuration asks for it
pub fn on_boot<D: DimmerControl>(config: &DimmerConfig, dimmer: &mut D) -> Option<Report> {
    if !config.state {
        return None;
    }
    let percent = config.run_percent()?;
    info!("restoring dimmer at {}%", percent);
    Some(run(dimmer, percent))
}

/// Follow the local wall switch. Reports only when the channel changes state
pub fn on_switch<D: DimmerControl>(closed: bool, config: &DimmerConfig, dimmer: &mut D) -> Option<Report> {
    let running = dimmer.state();
    if closed && !running {
        let percent = config.run_percent()?;
        Some(run(dimmer, percent))
    } else if !closed && running {
        dimmer.stop();
        Some(Report::stopped())
    } else {
        None
    }
}

/// The periodic status report
pub fn status_report<D: DimmerControl>(config: &DimmerConfig, dimmer: &mut D) -> Report {
    if dimmer.state() {
        Report::running(config.percent)
    } else {
        Report::stopped()
    }
}

/// Counts seconds between periodic status reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportSchedule {
    remaining: u16,
}

impl ReportSchedule {
    /// A schedule that reports on the first tick
    pub const fn new() -> Self {
        Self { remaining: 0 }
    }

    /// Advance by one second. True when a report is due.
    ///
    /// `interval` is read on every tick so a configuration change applies without a reset.
    /// An interval of 0 disables reporting.
    pub fn tick(&mut self, interval: u16) -> bool {
        if interval == 0 {
            self.remaining = 0;
            return false;
        }
        self.remaining = self.remaining.min(interval);
        if self.remaining <= 1 {
            self.remaining = interval;
            true
        } else {
            self.remaining -= 1;
            false
        }
    }
}

fn run<D: DimmerControl>(dimmer: &mut D, percent: u8) -> Report {
    match dimmer.run(percent) {
        Ok(()) => Report::running(percent),
        Err(_) => Report::refused(),
    }
}

fn write_config<S: ConfigStore>(
    config: &mut DimmerConfig,
    store: &mut S,
    param: Param,
    value: u16,
) -> Result<(), ConfigError> {
    let mut updated = *config;
    updated.set(param, value)?;
    store.save(&updated)?;
    *config = updated;
    Ok(())
}

impl TryFrom<u16> for DimmerStatus {
    type Error = u16;

    fn try_from(code: u16) -> Result<Self, u16> {
        match code {
            0 => Ok(DimmerStatus::Ok),
            1 => Ok(DimmerStatus::Param),
            _ => Err(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::OutOfRange;

    #[derive(Default)]
    struct FakeDimmer {
        running: Option<u8>,
        runs: u32,
        stops: u32,
    }

    impl DimmerControl for FakeDimmer {
        fn run(&mut self, percent: u8) -> Result<(), OutOfRange> {
            if !(10..=100).contains(&percent) {
                return Err(OutOfRange(percent));
            }
            self.running = Some(percent);
            self.runs += 1;
            Ok(())
        }
        fn stop(&mut self) {
            self.running = None;
            self.stops += 1;
        }
        fn state(&mut self) -> bool {
            self.running.is_some()
        }
    }

    #[derive(Default)]
    struct Store {
        saved: Option<DimmerConfig>,
        fail: bool,
    }

    impl ConfigStore for Store {
        fn save(&mut self, config: &DimmerConfig) -> Result<(), ConfigError> {
            if self.fail {
                return Err(ConfigError::Write);
            }
            self.saved = Some(*config);
            Ok(())
        }
    }

    fn ok(value: u16) -> Report {
        Report::Dimmer {
            value,
            status: DimmerStatus::Ok,
        }
    }

    const REFUSED: Report = Report::Dimmer {
        value: 0,
        status: DimmerStatus::Param,
    };

    #[test]
    fn on_uses_configured_percent() {
        let mut config = DimmerConfig::new();
        config.percent = 45;
        let mut d = FakeDimmer::default();
        let report = handle(Command::On, &mut config, &mut d, &mut Store::default());
        assert_eq!(report, ok(45));
        assert_eq!(d.running, Some(45));
    }

    #[test]
    fn on_refuses_corrupt_percent() {
        let mut config = DimmerConfig::new();
        config.percent = 2;
        let mut d = FakeDimmer::default();
        let report = handle(Command::On, &mut config, &mut d, &mut Store::default());
        assert_eq!(report, REFUSED);
        assert_eq!(d.runs, 0);
    }

    #[test]
    fn off_always_succeeds() {
        let mut config = DimmerConfig::new();
        let mut d = FakeDimmer::default();
        assert_eq!(handle(Command::Off, &mut config, &mut d, &mut Store::default()), ok(0));
        assert_eq!(d.stops, 1);
    }

    #[test]
    fn on_with_percent_updates_config_without_saving() {
        let mut config = DimmerConfig::new();
        let mut d = FakeDimmer::default();
        let mut store = Store::default();

        assert_eq!(handle(Command::OnWithPercent(25), &mut config, &mut d, &mut store), ok(25));
        assert_eq!(config.percent, 25);
        assert_eq!(d.running, Some(25));
        assert!(store.saved.is_none());

        assert_eq!(handle(Command::OnWithPercent(300), &mut config, &mut d, &mut store), REFUSED);
        assert_eq!(handle(Command::OnWithPercent(5), &mut config, &mut d, &mut store), REFUSED);
        assert_eq!(config.percent, 25);
        assert_eq!(d.running, Some(25));
    }

    #[test]
    fn config_read_and_write() {
        let mut config = DimmerConfig::new();
        let mut d = FakeDimmer::default();
        let mut store = Store::default();

        let report = handle(Command::ConfigWrite(Param::Report, 300), &mut config, &mut d, &mut store);
        assert_eq!(report, Report::Config { param: Param::Report, value: 300 });
        assert_eq!(store.saved.map(|c| c.report), Some(300));

        let report = handle(Command::ConfigRead(Param::Report), &mut config, &mut d, &mut store);
        assert_eq!(report, Report::Config { param: Param::Report, value: 300 });
    }

    #[test]
    fn config_write_rejects_bad_value() {
        let mut config = DimmerConfig::new();
        let mut d = FakeDimmer::default();
        let mut store = Store::default();

        let report = handle(Command::ConfigWrite(Param::MaxSend, 0), &mut config, &mut d, &mut store);
        assert_eq!(report, Report::ConfigError { param: Param::MaxSend, error: ConfigError::Param });
        assert!(store.saved.is_none());
        assert_eq!(config, DimmerConfig::new());
    }

    #[test]
    fn failed_save_keeps_old_config() {
        let mut config = DimmerConfig::new();
        let mut d = FakeDimmer::default();
        let mut store = Store { saved: None, fail: true };

        let report = handle(Command::ConfigWrite(Param::Percent, 60), &mut config, &mut d, &mut store);
        assert_eq!(report, Report::ConfigError { param: Param::Percent, error: ConfigError::Write });
        assert_eq!(config.percent, 100);
    }

    #[test]
    fn boot_restores_when_configured() {
        let mut d = FakeDimmer::default();
        let mut config = DimmerConfig::new();
        assert_eq!(on_boot(&config, &mut d), None);

        config.state = true;
        config.percent = 70;
        assert_eq!(on_boot(&config, &mut d), Some(ok(70)));
        assert_eq!(d.running, Some(70));

        let mut d = FakeDimmer::default();
        config.percent = 0;
        assert_eq!(on_boot(&config, &mut d), None);
        assert_eq!(d.runs, 0);
    }

    #[test]
    fn switch_reports_edges_only() {
        let mut d = FakeDimmer::default();
        let mut config = DimmerConfig::new();
        config.percent = 40;

        assert_eq!(on_switch(false, &config, &mut d), None);
        assert_eq!(on_switch(true, &config, &mut d), Some(ok(40)));
        assert_eq!(on_switch(true, &config, &mut d), None);
        assert_eq!(d.runs, 1);
        assert_eq!(on_switch(false, &config, &mut d), Some(ok(0)));
        assert_eq!(on_switch(false, &config, &mut d), None);
        assert_eq!(d.stops, 1);
    }

    #[test]
    fn status_report_follows_state() {
        let mut d = FakeDimmer::default();
        let mut config = DimmerConfig::new();
        config.percent = 80;
        assert_eq!(status_report(&config, &mut d), ok(0));
        d.run(80).unwrap();
        assert_eq!(status_report(&config, &mut d), ok(80));
    }

    #[test]
    fn report_schedule_interval() {
        let mut schedule = ReportSchedule::new();
        let due: Vec<bool> = (0..7).map(|_| schedule.tick(3)).collect();
        assert_eq!(due, [true, false, false, true, false, false, true]);
    }

    #[test]
    fn report_schedule_disabled_and_shortened() {
        let mut schedule = ReportSchedule::new();
        assert!(!schedule.tick(0));
        assert!(!schedule.tick(0));

        assert!(schedule.tick(600));
        assert!(!schedule.tick(600));
        // Shortening the interval takes effect straight away
        assert!(!schedule.tick(2));
        assert!(schedule.tick(2));
    }

    #[test]
    fn status_codes() {
        assert_eq!(DimmerStatus::try_from(0), Ok(DimmerStatus::Ok));
        assert_eq!(DimmerStatus::try_from(1), Ok(DimmerStatus::Param));
        assert_eq!(DimmerStatus::try_from(7), Err(7));
    }
}
