use crate::board::SharedButton;
use crate::counter::PressCounter;
use crate::edge::{EDGE_DETECTOR, EDGE_EVENTS};


/// Task: count confirmed button presses.
/// Runs on the high-priority executor so presses are handled ahead of the poller.
#[embassy_executor::task]
pub async fn task_count_presses() {
    defmt::info!("Press counter: waiting for edges");
    PressCounter::new()
        .run(EDGE_EVENTS.receiver(), &EDGE_DETECTOR, &SharedButton)
        .await
}
