#![cfg_attr(not(test), no_std)]

//! Button press counter and long-press blink firmware.
//!
//! Two independent paths watch the same button:
//! - the GPIO interrupt pushes edges into a bounded queue, and a task drains it
//!   and counts presses that are still high when they are consumed;
//! - a 100 ms poller samples the pin level, toggles "blink armed" after a
//!   one second hold, and plays a short blink on release while armed.
//!
//! Everything except [`board`] and [`tasks`] is hardware independent and is
//! tested on the host.

// Must come first: the logging macros are used by every module below.
#[macro_use]
mod fmt;

pub mod config;
pub mod counter;
pub mod edge;
pub mod error;
pub mod pin;
pub mod poller;

#[cfg(feature = "esp32c3")]
pub mod board;
#[cfg(feature = "esp32c3")]
pub mod tasks;

/// Put a value into a `'static` cell, once.
#[macro_export]
macro_rules! mk_static {
    ($t:ty,$val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}
