// Host-side doubles for the board capabilities.

use std::collections::VecDeque;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Duration;

use crate::config::Timeouts;
use crate::feedback::Pitch;
use crate::hal::{Buzzer, RgbIndicator, TextDisplay, Trigger};
use crate::occupancy::OccupancyStore;

pub type TestStore = OccupancyStore<CriticalSectionRawMutex>;

pub const FAST: Timeouts = Timeouts {
    token: Duration::from_millis(5),
    guard: Duration::from_millis(5),
};

#[derive(Default)]
pub struct RecordingBuzzer {
    pub tones: Vec<(Pitch, Duration)>,
}

impl Buzzer for RecordingBuzzer {
    async fn play_tone(&mut self, pitch: Pitch, duration: Duration) {
        self.tones.push((pitch, duration));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    Clear,
    Text(String, i32, i32),
    Flush,
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub calls: Vec<DisplayCall>,
}

impl RecordingDisplay {
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DisplayCall::Text(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl TextDisplay for RecordingDisplay {
    fn clear(&mut self) {
        self.calls.push(DisplayCall::Clear);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.calls.push(DisplayCall::Text(text.to_string(), x, y));
    }

    fn flush(&mut self) {
        self.calls.push(DisplayCall::Flush);
    }
}

#[derive(Default)]
pub struct RecordingIndicator {
    pub colors: Vec<(bool, bool, bool)>,
}

impl RgbIndicator for RecordingIndicator {
    fn set_color(&mut self, red: bool, green: bool, blue: bool) {
        self.colors.push((red, green, blue));
    }
}

/// Reports the queued levels one poll at a time, then stays released.
#[derive(Default)]
pub struct ScriptedTrigger {
    levels: VecDeque<bool>,
}

impl ScriptedTrigger {
    pub fn new(levels: &[bool]) -> Self {
        Self {
            levels: levels.iter().copied().collect(),
        }
    }
}

impl Trigger for ScriptedTrigger {
    fn is_asserted(&mut self) -> bool {
        self.levels.pop_front().unwrap_or(false)
    }
}
