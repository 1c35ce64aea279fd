/// A 16-bit counter clocked by the phase clock that raises its interrupt when the count
/// rolls over from 0xFFFF to 0x0000.
///
/// The dimmer only ever loads values close to the rollover point, so a preload of `P`
/// overflows after `0x10000 - P` ticks. See [`crate::phase::ticks_until_overflow`].
pub trait PhaseTimer {
    /// Stop counting. The count is retained
    fn stop(&mut self);
    /// Load a new count. Does not start the counter
    fn reload(&mut self, preload: u16);
    /// Resume counting from the current count
    fn start(&mut self);
    /// Returns true if the counter overflowed since the last call and clears the flag
    fn take_overflow(&mut self) -> bool;
}
