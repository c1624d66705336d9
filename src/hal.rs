/*
 * The capabilities the core needs from the board. The firmware implements
 * these in `io.rs`; tests implement them with recording doubles. Nothing in
 * here knows about pins, buses or duty cycles.
 */

use embassy_time::Duration;

use crate::feedback::Pitch;

/// A polled push button or contact.
pub trait Trigger {
    /// `true` while the trigger is pressed, whatever the electrical polarity.
    fn is_asserted(&mut self) -> bool;
}

/// A text display addressed in pixels from the top-left corner.
pub trait TextDisplay {
    fn clear(&mut self);
    fn draw_text(&mut self, text: &str, x: i32, y: i32);
    /// Push everything drawn since the last `clear` to the screen.
    fn flush(&mut self);
}

pub trait RgbIndicator {
    fn set_color(&mut self, red: bool, green: bool, blue: bool);
}

#[allow(async_fn_in_trait)]
pub trait Buzzer {
    /// Sound `pitch` for `duration`, then go quiet.
    async fn play_tone(&mut self, pitch: Pitch, duration: Duration);
}

/// A buzzer that never makes a sound, for inputs without audible feedback.
pub struct Silent;

impl Buzzer for Silent {
    async fn play_tone(&mut self, _pitch: Pitch, _duration: Duration) {}
}
