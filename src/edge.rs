//! Edge detection: GPIO interrupt → bounded event queue.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_sync::{
    blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex},
    channel::Channel,
};

use crate::config::EVENT_QUEUE_CAPACITY;
use crate::pin::PinId;


/// Something happened on a monitored pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinEvent {
    /// The pin changed level (either direction).
    Edge(PinId),
}

impl PinEvent {
    pub fn pin(self) -> PinId {
        match self {
            PinEvent::Edge(pin) => pin,
        }
    }
}

/// FIFO of pin events: one producer (interrupt), one consumer (task).
pub type EventQueue<M> = Channel<M, PinEvent, EVENT_QUEUE_CAPACITY>;

/// Channel: edges from the GPIO interrupt to the counting task.
//
// CriticalSectionRawMutex: the sender runs in interrupt context.
pub static EDGE_EVENTS: EventQueue<CriticalSectionRawMutex> = Channel::new();

/// The detector the GPIO interrupt handler reports to.
pub static EDGE_DETECTOR: EdgeDetector<'static, CriticalSectionRawMutex> =
    EdgeDetector::new(&EDGE_EVENTS);


/// Interrupt-side end of the event queue.
///
/// Enqueues without blocking. When the queue is full the event is dropped
/// and only a counter records it: no retry, no log. Safe to call from an ISR.
pub struct EdgeDetector<'q, M: RawMutex> {
    queue: &'q EventQueue<M>,
    // No atomic read-modify-write on the ESP32-C3 core
    dropped: Mutex<Cell<u32>>,
}

impl<'q, M: RawMutex> EdgeDetector<'q, M> {
    pub const fn new(queue: &'q EventQueue<M>) -> Self {
        Self { queue, dropped: Mutex::new(Cell::new(0)) }
    }

    /// Report an edge on `pin`.
    /// Returns `false` if the queue was full and the event was dropped.
    pub fn on_edge(&self, pin: PinId) -> bool {
        match self.queue.try_send(PinEvent::Edge(pin)) {
            Ok(()) => true,
            Err(_) => {
                critical_section::with(|cs| {
                    let dropped = self.dropped.borrow(cs);
                    dropped.set(dropped.get().wrapping_add(1));
                });
                false
            }
        }
    }

    /// Edges lost to a full queue since boot. Wraps.
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.dropped.borrow(cs).get())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_edges_are_queued_in_order() {
        let queue = EventQueue::<NoopRawMutex>::new();
        let detector = EdgeDetector::new(&queue);

        assert!(detector.on_edge(PinId(2)));
        assert!(detector.on_edge(PinId(9)));
        assert!(detector.on_edge(PinId(2)));

        assert_eq!(queue.try_receive(), Ok(PinEvent::Edge(PinId(2))));
        assert_eq!(queue.try_receive(), Ok(PinEvent::Edge(PinId(9))));
        assert_eq!(queue.try_receive(), Ok(PinEvent::Edge(PinId(2))));
        assert!(queue.try_receive().is_err());
        assert_eq!(detector.dropped(), 0);
    }

    #[test]
    fn test_full_queue_drops_and_counts() {
        let queue = EventQueue::<NoopRawMutex>::new();
        let detector = EdgeDetector::new(&queue);

        for _ in 0..EVENT_QUEUE_CAPACITY {
            assert!(detector.on_edge(PinId(9)));
        }
        assert!(!detector.on_edge(PinId(9)));
        assert!(!detector.on_edge(PinId(9)));
        assert_eq!(detector.dropped(), 2);
        assert_eq!(queue.len(), EVENT_QUEUE_CAPACITY);

        // Room again after the consumer catches up
        queue.try_receive().unwrap();
        assert!(detector.on_edge(PinId(9)));
        assert_eq!(detector.dropped(), 2);
    }

    #[test]
    fn test_critical_section_queue() {
        let queue = EventQueue::<CriticalSectionRawMutex>::new();
        let detector = EdgeDetector::new(&queue);
        assert!(detector.on_edge(PinId(9)));
        assert_eq!(queue.try_receive().map(PinEvent::pin), Ok(PinId(9)));
    }
}
