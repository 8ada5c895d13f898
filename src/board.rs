//! esp-hal bindings: the button interrupt, pin reads, the LED and the tick.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::{Duration, Timer};
use esp_hal::{
    gpio::{self, Event, Input, Io},
    handler,
    interrupt::Priority,
    ram,
};

use crate::config::{BUTTON_GPIO, COUNTER_PRIORITY, EDGE_IRQ_PRIORITY};
use crate::edge::EDGE_DETECTOR;
use crate::pin::{InputLevel, Level, OutputLevel, PinId, TickSource};


/// Level of the GPIO edge handler.
pub const EDGE_PRIORITY: Priority = priority(EDGE_IRQ_PRIORITY);

/// Level of the executor the counting task runs on.
pub const COUNTER_EXECUTOR_PRIORITY: Priority = priority(COUNTER_PRIORITY);

const fn priority(level: u8) -> Priority {
    match level {
        1 => Priority::Priority1,
        2 => Priority::Priority2,
        3 => Priority::Priority3,
        4 => Priority::Priority4,
        5 => Priority::Priority5,
        6 => Priority::Priority6,
        7 => Priority::Priority7,
        _ => panic!("interrupt priority out of range"),
    }
}

// The counting task must never preempt the edge handler
const _: () = assert!(EDGE_PRIORITY as u8 > COUNTER_EXECUTOR_PRIORITY as u8);

// The button lives here once installed: the interrupt handler clears its
// interrupt, tasks read its level.
static BUTTON: Mutex<RefCell<Option<Input<'static>>>> = Mutex::new(RefCell::new(None));

/// Hook the button up to the GPIO interrupt: every edge goes to [`EDGE_DETECTOR`].
pub fn install_button(io: &mut Io<'_>, mut button: Input<'static>) {
    io.set_interrupt_handler(on_gpio_interrupt);

    critical_section::with(|cs| {
        button.listen(Event::AnyEdge);
        BUTTON.borrow_ref_mut(cs).replace(button);
    });
    defmt::info!("GPIO{}: listening for edges", BUTTON_GPIO.number());
}

// Interrupt context: no blocking, no logging
#[handler(priority = EDGE_PRIORITY)]
#[ram]
fn on_gpio_interrupt() {
    let fired = critical_section::with(|cs| {
        let mut button = BUTTON.borrow_ref_mut(cs);
        let Some(button) = button.as_mut() else {
            return false;
        };
        let fired = button.is_interrupt_set();
        if fired {
            button.clear_interrupt();
        }
        fired
    });

    if fired {
        EDGE_DETECTOR.on_edge(BUTTON_GPIO);
    }
}


/// Reads the installed button. Every other pin is unmonitored.
#[derive(Clone, Copy)]
pub struct SharedButton;

impl InputLevel for SharedButton {
    fn level(&self, pin: PinId) -> Option<Level> {
        if pin != BUTTON_GPIO {
            return None;
        }
        critical_section::with(|cs| {
            BUTTON
                .borrow_ref(cs)
                .as_ref()
                .map(|button| Level::from(button.is_high()))
        })
    }
}


/// The blink output. Levels go to the pin as-is.
pub struct LedOutput {
    pin: gpio::Output<'static>,
}

impl LedOutput {
    pub fn new(pin: gpio::Output<'static>) -> Self {
        Self { pin }
    }
}

impl OutputLevel for LedOutput {
    fn set_level(&mut self, level: Level) {
        self.pin.set_level(gpio::Level::from(bool::from(level)));
    }
}


/// Sleeps one period per tick.
pub struct TimerTicks {
    period: Duration,
}

impl TimerTicks {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl TickSource for TimerTicks {
    async fn next_tick(&mut self) {
        Timer::after(self.period).await;
    }
}
