#![no_std]
#![no_main]
#![deny(clippy::mem_forget)]
#![deny(clippy::large_stack_frames)]
extern crate alloc;
use {esp_backtrace as _, esp_println as _};
esp_bootloader_esp_idf::esp_app_desc!();

use defmt;
use esp_hal::{
    clock::CpuClock,
    timer::timg::TimerGroup,
    interrupt::software::SoftwareInterruptControl,
    gpio,
};
use esp_rtos::embassy::InterruptExecutor;

use embassy_executor::Spawner;

use pressblink::{
    self,
    board::{self, LedOutput, SharedButton, TimerTicks, COUNTER_EXECUTOR_PRIORITY},
    config::{PollerConfig, BUTTON_GPIO, LED_GPIO},
    mk_static,
    poller::LongPressPoller,
};


#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    // Init allocator: error messages only, no radio
    esp_alloc::heap_allocator!(size: 16 * 1024);

    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));

    // Init Embassy the usual way
    let sw_int = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0, sw_int.software_interrupt0);
    defmt::info!("Embassy initialized!");

    let config = match PollerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            // `{:#}`: the whole context chain, down to the bad variable
            let reason = alloc::format!("{:#}", e);
            defmt::error!("{}: using defaults", reason.as_str());
            PollerConfig::default()
        }
    };

    // Init GPIO: LED. Output, no pulls.
    let led = gpio::Output::new(peripherals.GPIO8, gpio::Level::Low, gpio::OutputConfig::default());
    defmt::info!("Blink output: GPIO{}", LED_GPIO.number());

    // Init GPIO: button. Input, pull-up, interrupt on any edge.
    let button = gpio::Input::new(
        peripherals.GPIO9,
        gpio::InputConfig::default().with_pull(gpio::Pull::Up),
    );
    let mut io = gpio::Io::new(peripherals.IO_MUX);
    board::install_button(&mut io, button);

    // Press counter: its own executor, above the main loop's priority
    let executor = mk_static!(InterruptExecutor<1>, InterruptExecutor::new(sw_int.software_interrupt1));
    let high_priority = executor.start(COUNTER_EXECUTOR_PRIORITY);
    high_priority.must_spawn(pressblink::tasks::task_count_presses());

    // The main loop is the long-press poller
    let mut poller = LongPressPoller::new(config, BUTTON_GPIO);
    poller
        .run(&mut TimerTicks::new(config.tick), &SharedButton, &mut LedOutput::new(led))
        .await
}
