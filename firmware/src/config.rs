use core::ops::RangeInclusive;

use crate::phase::PERCENT_RANGE;

/// Accepted values for the radio send retry count
pub const MAX_SEND_RANGE: RangeInclusive<u16> = 1..=50;

/// Longest accepted status report interval in seconds
pub const REPORT_MAX: u16 = 65_000;

/// A configuration parameter addressable by read/write commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Param {
    /// Radio send retries
    MaxSend,
    /// Restore the channel to running on boot (0 or 1)
    State,
    /// Brightness used by `On`, boot restore and the wall switch
    Percent,
    /// Status report interval in seconds, 0 disables reporting
    Report,
}

/// Why a configuration write was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The value is outside the parameter's accepted range
    Param,
    /// The store failed to persist the new configuration
    Write,
}

/// Runtime device configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimmerConfig {
    /// Radio send retries
    pub max_send: u8,
    /// Restore the channel to running on boot
    pub state: bool,
    /// Brightness percentage
    pub percent: u8,
    /// Status report interval in seconds, 0 disables reporting
    pub report: u16,
}

impl DimmerConfig {
    /// Factory configuration
    pub const fn new() -> Self {
        Self {
            max_send: 10,
            state: false,
            percent: 100,
            report: 0,
        }
    }

    /// Read a parameter in its wire representation
    pub fn get(&self, param: Param) -> u16 {
        match param {
            Param::MaxSend => self.max_send.into(),
            Param::State => self.state.into(),
            Param::Percent => self.percent.into(),
            Param::Report => self.report,
        }
    }

    /// Validate and set a parameter. Nothing is changed on error
    pub fn set(&mut self, param: Param, value: u16) -> Result<(), ConfigError> {
        match param {
            Param::MaxSend if MAX_SEND_RANGE.contains(&value) => self.max_send = value as u8,
            Param::State if value <= 1 => self.state = value == 1,
            Param::Percent => self.percent = valid_percent(value).ok_or(ConfigError::Param)?,
            Param::Report if value <= REPORT_MAX => self.report = value,
            _ => return Err(ConfigError::Param),
        }
        Ok(())
    }

    /// The configured percentage if it is one the dimmer will accept
    pub fn run_percent(&self) -> Option<u8> {
        valid_percent(self.percent.into())
    }
}

impl Default for DimmerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// `value` as a brightness percentage if it is within the dimmer's range
pub fn valid_percent(value: u16) -> Option<u8> {
    let percent = value as u8;
    if u16::from(percent) == value && PERCENT_RANGE.contains(&percent) {
        Some(percent)
    } else {
        None
    }
}

/// Persistent storage for the configuration.
///
/// The store owns the on-flash format and its integrity checks; the firmware only hands it
/// complete, validated configurations.
pub trait ConfigStore {
    /// Persist `config`
    fn save(&mut self, config: &DimmerConfig) -> Result<(), ConfigError>;
}
