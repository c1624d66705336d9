#![no_std]
#![no_main]

// https://github.com/embassy-rs/embassy/blob/main/examples/stm32f4/src/bin/multiprio.rs

use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;

use despi_m02_occupancy::config::{CAPACITY, Timeouts};
use despi_m02_occupancy::hal::Silent;
use despi_m02_occupancy::input::{Action, InputTask};
use despi_m02_occupancy::{OccupancyStore, indicator, render};
use embassy_executor::{Executor, InterruptExecutor};
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::usart::{Config, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use static_cell::StaticCell;

mod io;
use io::{Button, FaultLed, Piezo, RgbLed, SerialConsole};

// Locked from both executors, so it needs a critical-section mutex rather than
// the thread-mode one.
static STORE: OccupancyStore<CriticalSectionRawMutex> =
    OccupancyStore::new(CAPACITY, Timeouts::DEFAULT);

// Buttons run here, preempting the display and the status light.
static INPUT_EXECUTOR: InterruptExecutor = InterruptExecutor::new();
static OUTPUT_EXECUTOR: StaticCell<Executor> = StaticCell::new();

#[interrupt]
unsafe fn UART4() {
    unsafe { INPUT_EXECUTOR.on_interrupt() }
}

#[embassy_executor::task]
async fn entry_task(button: Button, alarm: Piezo) -> ! {
    InputTask::new(Action::Admit, button, alarm).run(&STORE).await
}

#[embassy_executor::task]
async fn exit_task(button: Button) -> ! {
    InputTask::new(Action::Depart, button, Silent).run(&STORE).await
}

#[embassy_executor::task]
async fn reset_task(button: Button, chime: Piezo) -> ! {
    InputTask::new(Action::Reset, button, chime).run(&STORE).await
}

#[embassy_executor::task]
async fn render_task(console: SerialConsole) -> ! {
    render::run(&STORE, console).await
}

#[embassy_executor::task]
async fn indicator_task(led: RgbLed) -> ! {
    indicator::run(&STORE, led).await
}

#[entry]
fn main() -> ! {
    let peripherals = embassy_stm32::init(Default::default());
    defmt::info!("occupancy controller, {=u32} places", CAPACITY);

    let fault = FaultLed::new(Output::new(peripherals.PE12, Level::High, Speed::Low));

    let console = match Uart::new_blocking(
        peripherals.USART1,
        peripherals.PA10,
        peripherals.PA9,
        Config::default(), // 115200 baud
    ) {
        Ok(uart) => SerialConsole::new(uart),
        Err(_) => io::halt_with_fault(fault),
    };

    let entry = Button::new(Input::new(peripherals.PE11, Pull::Up));
    let exit = Button::new(Input::new(peripherals.PE2, Pull::Up));
    let reset = Button::new(Input::new(peripherals.PE3, Pull::Up));

    let alarm = Piezo::new(Output::new(peripherals.PB8, Level::Low, Speed::Low));
    let chime = Piezo::new(Output::new(peripherals.PB9, Level::Low, Speed::Low));

    let led = RgbLed::new(
        Output::new(peripherals.PB10, Level::Low, Speed::Low),
        Output::new(peripherals.PB14, Level::Low, Speed::Low),
        Output::new(peripherals.PB12, Level::Low, Speed::Low),
    );

    interrupt::UART4.set_priority(Priority::P6);
    let spawner = INPUT_EXECUTOR.start(interrupt::UART4);
    let spawned = spawner
        .spawn(entry_task(entry, alarm))
        .and_then(|()| spawner.spawn(exit_task(exit)))
        .and_then(|()| spawner.spawn(reset_task(reset, chime)));
    if spawned.is_err() {
        io::halt_with_fault(fault);
    }

    let executor = OUTPUT_EXECUTOR.init(Executor::new());
    executor.run(move |spawner| {
        let spawned = spawner
            .spawn(render_task(console))
            .and_then(|()| spawner.spawn(indicator_task(led)));
        if spawned.is_err() {
            io::halt_with_fault(fault);
        }
    })
}
