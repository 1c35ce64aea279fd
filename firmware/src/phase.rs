use core::ops::RangeInclusive;

/// Frequency of the tick that clocks the phase counter
pub const PHASE_CLOCK_HZ: u32 = 10_457;

/// Length of one phase counter tick in nanoseconds (~95.6us)
pub const PHASE_TICK_NS: u32 = 1_000_000_000 / PHASE_CLOCK_HZ;

/// The phase counter overflows when it rolls over from 0xFFFF to 0x0000. Every preload
/// used in a half-cycle is less than 256 ticks from that point so the high byte is all ones
pub const BASE_HIGH_BYTE: u16 = 0xFF00;

/// Ticks from the zero crossing to the firing point for a 0% request (~9.75ms).
/// Just short of a 50Hz half-cycle so even the lowest setting fires before the next crossing
pub const FULL_DELAY_TICKS: u16 = 102;

/// Desired length of the TRIAC gate pulse in nanoseconds
pub const GATE_PULSE_NS: u32 = 190_000;

/// Gate pulse length in whole phase clock ticks, rounded to nearest
pub const PULSE_WIDTH_TICKS: u16 = ((GATE_PULSE_NS + PHASE_TICK_NS / 2) / PHASE_TICK_NS) as u16;

/// Preload that ends the gate pulse after `PULSE_WIDTH_TICKS`
pub const PULSE_PRELOAD: u16 = preload_for_ticks(PULSE_WIDTH_TICKS);

/// Lowest brightness `run` accepts
pub const PERCENT_MIN: u8 = 10;

/// Highest brightness `run` accepts
pub const PERCENT_MAX: u8 = 100;

/// The brightness range `run` accepts
pub const PERCENT_RANGE: RangeInclusive<u8> = PERCENT_MIN..=PERCENT_MAX;

// A full brightness request must still leave at least one tick before firing and every
// delay preload must share the 0xFF high byte
const _: () = assert!(FULL_DELAY_TICKS > PERCENT_MAX as u16);
const _: () = assert!(FULL_DELAY_TICKS - (PERCENT_MIN as u16) < 0x100);
const _: () = assert!(PULSE_PRELOAD == 0xFFFE);

/// Error for a brightness request outside `PERCENT_RANGE`. Holds the rejected value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange(pub u8);

/// The counter value that overflows after exactly `ticks` phase clock ticks
pub const fn preload_for_ticks(ticks: u16) -> u16 {
    0u16.wrapping_sub(ticks)
}

/// The number of ticks a counter loaded with `preload` runs before it overflows
pub const fn ticks_until_overflow(preload: u16) -> u32 {
    0x1_0000 - preload as u32
}

/// Ticks from the zero crossing to firing the TRIAC for the given brightness
pub fn delay_ticks(percent: u8) -> Result<u16, OutOfRange> {
    if !PERCENT_RANGE.contains(&percent) {
        return Err(OutOfRange(percent));
    }
    Ok(FULL_DELAY_TICKS - u16::from(percent))
}

/// Converts a brightness percentage into the phase counter preload loaded at the zero crossing.
///
/// Equivalent to `0xFF00 | (percent + 154)`: higher brightness means fewer ticks before the
/// gate fires and so a larger share of the half-cycle conducts.
pub fn percent_to_preload(percent: u8) -> Result<u16, OutOfRange> {
    delay_ticks(percent).map(preload_for_ticks)
}
