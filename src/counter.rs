//! Press counting: drains the edge queue and counts edges that are still high.
//!
//! This is debounce by confirmation, not by time: an edge counts only if the
//! pin still reads high when the task gets to it. Bounces that have already
//! settled low are discarded.

use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Receiver};

use crate::config::EVENT_QUEUE_CAPACITY;
use crate::edge::{EdgeDetector, PinEvent};
use crate::pin::{InputLevel, Level};


/// Owns the press count. Only the counting task mutates it.
#[derive(Debug, Default)]
pub struct PressCounter {
    count: u32,
    // Drop count last reported, to only warn about new drops
    dropped_seen: u32,
}

impl PressCounter {
    pub const fn new() -> Self {
        Self { count: 0, dropped_seen: 0 }
    }

    /// Confirmed presses so far. Wraps at `u32::MAX`.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Count `event` if its pin still reads high.
    /// Returns the new count, or `None` if the edge was discarded.
    pub fn confirm(&mut self, event: PinEvent, levels: &impl InputLevel) -> Option<u32> {
        let pin = event.pin();
        if levels.level(pin) != Some(Level::High) {
            trace!("GPIO{}: edge resolved before it was handled, ignored", pin.number());
            return None;
        }

        self.count = self.count.wrapping_add(1);
        info!("Button pressed: {} times", self.count);
        Some(self.count)
    }

    /// Wait for the next event (forever, if need be) and handle it.
    pub async fn next<M: RawMutex, const N: usize>(
        &mut self,
        events: &Receiver<'_, M, PinEvent, N>,
        levels: &impl InputLevel,
    ) -> Option<u32> {
        let event = events.receive().await;
        self.confirm(event, levels)
    }

    /// Warn once about edges the interrupt had to drop since the last report.
    /// Returns how many are new.
    pub fn report_drops(&mut self, dropped: u32) -> u32 {
        let new = dropped.wrapping_sub(self.dropped_seen);
        if new > 0 {
            warn!("Edge queue full: {} events dropped ({} total)", new, dropped);
            self.dropped_seen = dropped;
        }
        new
    }

    /// Count presses forever.
    pub async fn run<M: RawMutex>(
        mut self,
        events: Receiver<'_, M, PinEvent, EVENT_QUEUE_CAPACITY>,
        edges: &EdgeDetector<'_, M>,
        levels: &impl InputLevel,
    ) -> ! {
        loop {
            self.next(&events, levels).await;
            self.report_drops(edges.dropped());
        }
    }
}
