/*
 * The I/O module for the occupancy controller.
 *
 * This module implements the board side of the `hal` traits. The intention is
 * for this module to be the only part of the program that is device-specific:
 * it knows which levels mean "pressed" or "lit", how to make a piezo beep and
 * how to show text on the serial console.
 */

use core::fmt::Write;

use despi_m02_occupancy::feedback::Pitch;
use despi_m02_occupancy::hal::{Buzzer, RgbIndicator, TextDisplay, Trigger};
use embassy_futures::select::select;
use embassy_stm32::{
    gpio::{Input, Level, Output},
    mode::Blocking,
    usart::Uart,
};
use embassy_time::{Duration, Ticker, Timer};
use enum_ordinalize::Ordinalize;
use heapless::String;

// 100 ms at the 8 MHz HSI clock the chip runs on by default.
const FAULT_BLINK_CYCLES: u32 = 800_000;

// The console stands in for a 128x64 panel with an 8x8 font.
const ROW_PIXELS: i32 = 8;
const COLUMN_PIXELS: i32 = 8;
const FRAME_BYTES: usize = 256;

const CLEAR_SCREEN: &str = "\x1b[2J";

fn light(output: &mut Output, on: bool) {
    output.set_level(if on { Level::High } else { Level::Low });
}

/// A push button to ground with the internal pull-up enabled.
pub struct Button {
    input: Input<'static>,
}

impl Button {
    pub fn new(input: Input<'static>) -> Self {
        Self { input }
    }
}

impl Trigger for Button {
    fn is_asserted(&mut self) -> bool {
        // pressed pulls the line low
        self.input.is_low()
    }
}

/// A passive piezo, driven with a square wave straight from a GPIO.
pub struct Piezo {
    pin: Output<'static>,
}

impl Piezo {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl Buzzer for Piezo {
    async fn play_tone(&mut self, pitch: Pitch, duration: Duration) {
        select(square_wave(&mut self.pin, pitch), Timer::after(duration)).await;
        self.pin.set_low();
    }
}

async fn square_wave(pin: &mut Output<'static>, pitch: Pitch) -> ! {
    let mut half_period = Ticker::every(Duration::from_hz(u64::from(pitch.hz()) * 2));
    loop {
        pin.toggle();
        half_period.next().await;
    }
}

#[derive(Ordinalize, Clone, Copy)]
#[repr(usize)]
pub enum Led {
    Red,
    Green,
    Blue,
}

pub struct RgbLed {
    outputs: [Output<'static>; Led::VARIANT_COUNT],
}

impl RgbLed {
    pub fn new(red: Output<'static>, green: Output<'static>, blue: Output<'static>) -> Self {
        Self {
            outputs: [red, green, blue],
        }
    }
}

impl RgbIndicator for RgbLed {
    fn set_color(&mut self, red: bool, green: bool, blue: bool) {
        light(&mut self.outputs[Led::Red.ordinal()], red);
        light(&mut self.outputs[Led::Green.ordinal()], green);
        light(&mut self.outputs[Led::Blue.ordinal()], blue);
    }
}

/*
 * There is no OLED on this board, so frames go to a VT100 terminal on USART1
 * instead. Pixel positions are mapped onto character cells, so the layout on
 * the terminal matches what a small panel would show.
 */
pub struct SerialConsole {
    uart: Uart<'static, Blocking>,
    frame: String<FRAME_BYTES>,
}

impl SerialConsole {
    pub fn new(uart: Uart<'static, Blocking>) -> Self {
        Self {
            uart,
            frame: String::new(),
        }
    }
}

impl TextDisplay for SerialConsole {
    fn clear(&mut self) {
        self.frame.clear();
        let _ = self.frame.push_str(CLEAR_SCREEN);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let row = y / ROW_PIXELS + 1;
        let column = x / COLUMN_PIXELS + 1;
        if write!(self.frame, "\x1b[{};{}H{}", row, column, text).is_err() {
            defmt::warn!("console frame full, dropped {=str}", text);
        }
    }

    fn flush(&mut self) {
        if self.uart.blocking_write(self.frame.as_bytes()).is_err() {
            defmt::warn!("console write failed");
        }
        self.frame.clear();
    }
}

/// The on-board LED, only used to signal that startup failed.
pub struct FaultLed {
    led: Output<'static>,
}

impl FaultLed {
    pub fn new(led: Output<'static>) -> Self {
        Self { led }
    }

    fn set(&mut self, on: bool) {
        // the on-board LED is active-low
        self.led.set_level(if on { Level::Low } else { Level::High });
    }
}

pub fn halt_with_fault(mut fault: FaultLed) -> ! {
    defmt::error!("startup failed, halting");
    loop {
        fault.set(true);
        cortex_m::asm::delay(FAULT_BLINK_CYCLES);
        fault.set(false);
        cortex_m::asm::delay(FAULT_BLINK_CYCLES);
    }
}
