//! Long press to arm, release to blink.
//!
//! Once per tick the poller samples the button level:
//! - pressed (low): count the tick. At exactly `long_press_ticks` the armed flag
//!   flips. Holding longer keeps counting but doesn't flip it again.
//! - released (high): reset the count. If armed, play the blink sequence: one
//!   output change per tick, `Low, High, Low, ...`. It runs to completion and
//!   nothing interrupts it.
//!
//! Armed stays set across blinks; another long press disarms it.

use crate::config::PollerConfig;
use crate::pin::{InputLevel, Level, OutputLevel, PinId, TickSource};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Released, nothing to do.
    Idle,
    /// Pressed for `ticks` consecutive ticks.
    Held { ticks: u32 },
    /// Blink sequence in progress; `step` output changes done so far.
    Blinking { step: u32 },
}

/// What one sample did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    Held { ticks: u32, toggled: bool },
    Released { blink: bool },
}

pub struct LongPressPoller {
    config: PollerConfig,
    pin: PinId,
    phase: Phase,
    armed: bool,
}

impl LongPressPoller {
    /// Watch `pin`. Starts idle and disarmed.
    pub fn new(config: PollerConfig, pin: PinId) -> Self {
        Self { config, pin, phase: Phase::Idle, armed: false }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn armed(&self) -> bool {
        self.armed
    }

    /// Consecutive pressed ticks so far; zero unless held.
    pub fn press_ticks(&self) -> u32 {
        match self.phase {
            Phase::Held { ticks } => ticks,
            _ => 0,
        }
    }

    /// Apply one sample of the button level.
    pub fn on_tick(&mut self, level: Level) -> TickOutcome {
        match level {
            Level::Low => {
                // Saturate: a wrap would hit the threshold a second time
                let ticks = self.press_ticks().saturating_add(1);
                self.phase = Phase::Held { ticks };
                debug!("Button held: {} ticks", ticks);

                let toggled = ticks == self.config.long_press_ticks;
                if toggled {
                    self.armed = !self.armed;
                    info!("Blink armed: {}", self.armed);
                }
                TickOutcome::Held { ticks, toggled }
            }
            Level::High => {
                trace!("Button released");
                self.phase = if self.armed { Phase::Blinking { step: 0 } } else { Phase::Idle };
                TickOutcome::Released { blink: self.armed }
            }
        }
    }

    /// Next output level of a running blink sequence, or `None` once it's done.
    ///
    /// Step `i` drives the output to `i % 2`.
    pub fn next_blink_level(&mut self) -> Option<Level> {
        let Phase::Blinking { step } = self.phase else {
            return None;
        };
        if step >= self.config.blink_steps {
            self.phase = Phase::Idle;
            return None;
        }
        self.phase = Phase::Blinking { step: step + 1 };
        Some(Level::from(step % 2 == 1))
    }

    /// Wait one tick, sample the button, and blink if released while armed.
    ///
    /// A blink takes `blink_steps` more ticks before this returns.
    pub async fn poll_once(
        &mut self,
        ticks: &mut impl TickSource,
        input: &impl InputLevel,
        output: &mut impl OutputLevel,
    ) -> TickOutcome {
        ticks.next_tick().await;

        // A pin nobody monitors reads as pulled up: released
        let level = input.level(self.pin).unwrap_or(Level::High);
        let outcome = self.on_tick(level);

        if let TickOutcome::Released { blink: true } = outcome {
            debug!("Blinking");
            while let Some(level) = self.next_blink_level() {
                ticks.next_tick().await;
                output.set_level(level);
            }
            debug!("Blinking done");
        }
        outcome
    }

    /// Poll forever.
    pub async fn run(
        &mut self,
        ticks: &mut impl TickSource,
        input: &impl InputLevel,
        output: &mut impl OutputLevel,
    ) -> ! {
        info!(
            "Long-press poller: GPIO{}, hold {} ticks to toggle blinking",
            self.pin.number(),
            self.config.long_press_ticks
        );
        loop {
            self.poll_once(ticks, input, output).await;
        }
    }
}
