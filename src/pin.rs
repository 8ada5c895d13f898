//! What the core needs from the board: pin levels, an output pin, and a tick.
//!
//! The board implements these over esp-hal; tests implement them over plain data.

/// GPIO number of a pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

impl PinId {
    pub const fn number(self) -> u8 {
        self.0
    }
}

/// Logical level of a digital pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level == Level::High
    }
}

/// Instantaneous level of input pins.
pub trait InputLevel {
    /// Current level of `pin`, or `None` if that pin isn't wired to anything we watch.
    fn level(&self, pin: PinId) -> Option<Level>;
}

/// An output pin.
pub trait OutputLevel {
    fn set_level(&mut self, level: Level);
}

/// Fixed-period tick.
///
/// `next_tick()` suspends the caller for one period.
#[allow(async_fn_in_trait)]
pub trait TickSource {
    async fn next_tick(&mut self);
}
