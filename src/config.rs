//! Pins, queue sizes and poller timing.

use anyhow::{Context, Result};
use embassy_time::Duration;

use crate::error::ConfigError;
use crate::pin::PinId;


/// Button: input with pull-up, active low, interrupts on any edge.
pub const BUTTON_GPIO: PinId = PinId(9);

/// LED: push-pull output, no pull resistors.
pub const LED_GPIO: PinId = PinId(8);

/// Slots in the edge event queue between the GPIO interrupt and the counting task.
pub const EVENT_QUEUE_CAPACITY: usize = 10;

/// Interrupt level of the GPIO edge handler. Must stay above [`COUNTER_PRIORITY`]
/// so the counting task never preempts it.
pub const EDGE_IRQ_PRIORITY: u8 = 3;

/// Interrupt level of the executor running the counting task.
/// Above thread mode, where the poller runs.
pub const COUNTER_PRIORITY: u8 = 2;

pub const DEFAULT_TICK_MS: u64 = 100;
pub const DEFAULT_LONG_PRESS_TICKS: u32 = 10;
pub const DEFAULT_BLINK_STEPS: u32 = 10;

// Optional overrides.
// Variables will be read *at compile time*
const TICK_MS: Option<&str> = option_env!("PRESSBLINK_TICK_MS");
const LONG_PRESS_TICKS: Option<&str> = option_env!("PRESSBLINK_LONG_PRESS_TICKS");
const BLINK_STEPS: Option<&str> = option_env!("PRESSBLINK_BLINK_STEPS");


/// Timing of the long-press/blink poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// Sampling period. Each blink step also lasts one tick.
    pub tick: Duration,
    /// Consecutive pressed ticks that toggle "blink armed".
    pub long_press_ticks: u32,
    /// Output changes in one blink sequence.
    pub blink_steps: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            long_press_ticks: DEFAULT_LONG_PRESS_TICKS,
            blink_steps: DEFAULT_BLINK_STEPS,
        }
    }
}

impl PollerConfig {
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_long_press_ticks(mut self, ticks: u32) -> Self {
        self.long_press_ticks = ticks;
        self
    }

    pub fn with_blink_steps(mut self, steps: u32) -> Self {
        self.blink_steps = steps;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick.as_ticks() == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.long_press_ticks == 0 {
            return Err(ConfigError::ZeroLongPress);
        }
        if self.blink_steps == 0 {
            return Err(ConfigError::ZeroBlinkSteps);
        }
        Ok(())
    }

    /// Defaults, with any of the given textual values replacing them.
    pub fn from_overrides(
        tick_ms: Option<&str>,
        long_press_ticks: Option<&str>,
        blink_steps: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(ms) = parse_override("PRESSBLINK_TICK_MS", tick_ms)? {
            config = config.with_tick(Duration::from_millis(ms));
        }
        if let Some(ticks) = parse_override("PRESSBLINK_LONG_PRESS_TICKS", long_press_ticks)? {
            config = config.with_long_press_ticks(ticks);
        }
        if let Some(steps) = parse_override("PRESSBLINK_BLINK_STEPS", blink_steps)? {
            config = config.with_blink_steps(steps);
        }
        config.validate()?;
        Ok(config)
    }

    /// Config for this build: defaults plus compile-time overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(TICK_MS, LONG_PRESS_TICKS, BLINK_STEPS)
    }

    fn load_from(
        tick_ms: Option<&str>,
        long_press_ticks: Option<&str>,
        blink_steps: Option<&str>,
    ) -> Result<Self> {
        Self::from_overrides(tick_ms, long_press_ticks, blink_steps)
            .map_err(anyhow::Error::msg)
            .context("Load poller config")
    }
}

fn parse_override<T: core::str::FromStr>(
    name: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, ConfigError> {
    match value {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name }),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PollerConfig::default();
        assert_eq!(config.tick, Duration::from_millis(100));
        assert_eq!(config.long_press_ticks, 10);
        assert_eq!(config.blink_steps, 10);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_no_overrides_gives_defaults() {
        let config = PollerConfig::from_overrides(None, None, None).unwrap();
        assert_eq!(config, PollerConfig::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = PollerConfig::from_overrides(Some("50"), Some(" 20 "), Some("4")).unwrap();
        assert_eq!(config.tick, Duration::from_millis(50));
        assert_eq!(config.long_press_ticks, 20);
        assert_eq!(config.blink_steps, 4);
    }

    #[test]
    fn test_garbage_override_is_rejected() {
        let err = PollerConfig::from_overrides(None, Some("ten"), None).unwrap_err();
        assert_eq!(err, ConfigError::InvalidNumber { name: "PRESSBLINK_LONG_PRESS_TICKS" });
    }

    #[test]
    fn test_zero_values_are_rejected() {
        assert_eq!(
            PollerConfig::from_overrides(Some("0"), None, None),
            Err(ConfigError::ZeroTick)
        );
        assert_eq!(
            PollerConfig::default().with_long_press_ticks(0).validate(),
            Err(ConfigError::ZeroLongPress)
        );
        assert_eq!(
            PollerConfig::default().with_blink_steps(0).validate(),
            Err(ConfigError::ZeroBlinkSteps)
        );
    }

    #[test]
    fn test_load_error_names_the_bad_variable() {
        let err = PollerConfig::load_from(None, Some("ten"), None).unwrap_err();
        // Alternate form carries the whole chain, which is what the firmware logs
        assert_eq!(
            format!("{:#}", err),
            "Load poller config: PRESSBLINK_LONG_PRESS_TICKS is not a valid number"
        );
    }

    #[test]
    fn test_edge_interrupt_outranks_counter() {
        assert!(EDGE_IRQ_PRIORITY > COUNTER_PRIORITY);
        assert!(COUNTER_PRIORITY >= 1);
        // Levels the board maps to esp-hal priorities
        assert!(EDGE_IRQ_PRIORITY <= 7);
    }

    #[test]
    fn test_load_without_env_succeeds() {
        // Overrides aren't set for test builds
        if TICK_MS.is_none() && LONG_PRESS_TICKS.is_none() && BLINK_STEPS.is_none() {
            assert_eq!(PollerConfig::load().unwrap(), PollerConfig::default());
        }
    }
}
